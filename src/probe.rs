//! Timing probe
//!
//! The measured window is bracketed by a digital output so that it can be
//! timed externally with a scope or logic analyzer. Any
//! `embedded_hal::digital::OutputPin` works; [`LogProbe`] stands in for the
//! GPIO on the host and records the transitions.
use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, PinState, StatefulOutputPin};

/// Host probe that logs and counts its edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogProbe {
    state: bool,
    rising: u32,
    falling: u32,
}

impl LogProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of low to high transitions.
    pub fn rising_edges(&self) -> u32 {
        self.rising
    }

    /// Number of high to low transitions.
    pub fn falling_edges(&self) -> u32 {
        self.falling
    }

    fn drive(&mut self, state: PinState) {
        let high = matches!(state, PinState::High);
        if high != self.state {
            if high {
                self.rising += 1;
            } else {
                self.falling += 1;
            }
            log::trace!("probe {}", if high { "high" } else { "low" });
        }
        self.state = high;
    }
}

impl ErrorType for LogProbe {
    type Error = Infallible;
}

impl OutputPin for LogProbe {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(PinState::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(PinState::High);
        Ok(())
    }
}

impl StatefulOutputPin for LogProbe {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.state)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges() {
        let mut p = LogProbe::new();
        assert!(p.is_set_low().unwrap());
        p.set_low().unwrap();
        assert_eq!((p.rising_edges(), p.falling_edges()), (0, 0));
        p.set_high().unwrap();
        p.set_high().unwrap();
        assert!(p.is_set_high().unwrap());
        p.toggle().unwrap();
        p.set_state(PinState::High).unwrap();
        assert_eq!((p.rising_edges(), p.falling_edges()), (2, 1));
    }
}
