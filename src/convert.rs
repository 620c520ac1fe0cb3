//! Fixed-point rendering
//!
//! Q-format words are printed as sign, integer part and exactly six
//! truncated fractional digits, computed without floating point so the host
//! output matches the target's console output character for character.
use core::fmt;

/// A signed fixed-point word with `frac_bits` fractional bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fixed {
    pub value: i32,
    pub frac_bits: u32,
}

impl Fixed {
    pub const fn new(value: i32, frac_bits: u32) -> Self {
        Self { value, frac_bits }
    }

    /// Integer part and six digit fraction of the magnitude.
    pub fn parts(&self) -> (u32, u32) {
        let m = self.value.unsigned_abs();
        let ip = m >> self.frac_bits;
        let fp = m & ((1u32 << self.frac_bits) - 1);
        let frac6 = ((fp as u64 * 1_000_000) >> self.frac_bits) as u32;
        (ip, frac6)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (ip, frac6) = self.parts();
        let sign = if self.value < 0 { "-" } else { "" };
        write!(f, "{sign}{ip}.{frac6:06}")
    }
}

/// Phase in turns.
pub fn turns(theta: u32) -> Fixed {
    Fixed::new(theta as i32, pll_q30::Q30)
}

/// Unit amplitude value.
pub fn q30(x: i32) -> Fixed {
    Fixed::new(x, pll_q30::Q30)
}

/// Frequency in Hz.
pub fn hertz(f: i32) -> Fixed {
    Fixed::new(f, pll_q30::Q25)
}
