//! Benchmark run
//!
//! Mirrors the measurement on the target: the emulated ADC feeds the loop
//! for a settling period, then the probe is raised and the cycle counter
//! sampled around a window of updates. The end state is reported as raw
//! words for comparison against the HDL and in human readable units.
use core::fmt;

use embedded_hal::digital::OutputPin;
use pll_q30::{
    ExactDivision, PhaseIncrement, Pll, ReciprocalMultiply, SineTable,
    Snapshot, FS_HZ, Q25, THETA_BITS,
};
use serde::Serialize;

use crate::{
    adc::{Accu, Adc, SampleBuffer},
    convert,
    cycle_counter::CycleCounter,
    settings::{Settings, Strategy},
    statistics::{ScaledStatistics, State, Statistics},
    Error,
};

/// Outcome of one benchmark run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    /// Phase increment strategy.
    pub strategy: &'static str,
    pub settle: u32,
    pub window: u32,
    /// Cycles spent in the measured window.
    pub cycles: u64,
    pub cycles_per_sample: u64,
    /// Loop state after the window.
    pub state: Snapshot,
    /// `out_f` over the window in Q25 words.
    pub out_f_q25: Statistics,
    /// `out_f` over the window in Hz.
    pub out_f: ScaledStatistics,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.state;
        writeln!(
            f,
            "[{}] cycles = {} (N={})  cycles/sample = {}",
            self.strategy, self.cycles, self.window, self.cycles_per_sample
        )?;
        writeln!(
            f,
            "theta_q30={:#010x}  sin={:#010x} cos={:#010x}  Out_f(Q25)={:#010x}",
            s.theta, s.sin, s.cos, s.out_f
        )?;
        writeln!(f, "theta(turn)={}", convert::turns(s.theta))?;
        writeln!(
            f,
            "sin={}   cos={}",
            convert::q30(s.sin),
            convert::q30(s.cos)
        )?;
        writeln!(f, "Out_f(Hz)={}", convert::hertz(s.out_f))?;
        write!(
            f,
            "Out_f window (Hz): min {:.6} max {:.6} mean {:.6} std {:.6}",
            self.out_f.min, self.out_f.max, self.out_f.mean, self.out_f.std
        )
    }
}

/// Run one loop through settling and the measured window.
///
/// # Args
/// * `settings` - Run parameters. The gains are used for the loop.
/// * `table` - NCO sine table.
/// * `buffer` - Staged input samples.
/// * `counter` - Cycle counter sampled around the window.
/// * `probe` - Driven high for the duration of the window.
pub fn run<P, C, O>(
    settings: &Settings,
    table: &SineTable,
    buffer: &SampleBuffer,
    counter: &mut C,
    probe: &mut O,
) -> Result<Report, Error>
where
    P: PhaseIncrement,
    C: CycleCounter,
    O: OutputPin,
{
    settings.validate()?;
    let (settle, window) = (*settings.settle, *settings.window);
    let strategy = P::NAME;
    let tone = Accu::tone(*settings.input_frequency, P::FS).ok_or_else(|| {
        Error::Setting {
            path: "/input_frequency".into(),
            reason: format!("must be below {} Hz", P::FS),
        }
    })?;
    let mut pll = Pll::<P>::new(table, settings.gains);
    let mut adc = Adc::new(buffer, tone);

    log::info!(
        "[{strategy}] Settle running... samples={settle} ({:.3} s)",
        settle as f64 / P::FS as f64
    );
    for x in adc.by_ref().take(settle as _) {
        pll.update(x);
    }

    let mut out_f = Vec::with_capacity(window as _);
    probe
        .set_high()
        .map_err(|e| Error::Probe(format!("{e:?}")))?;
    let t0 = counter.cycles();
    for x in adc.by_ref().take(window as _) {
        out_f.push(pll.update(x));
    }
    let t1 = counter.cycles();
    probe
        .set_low()
        .map_err(|e| Error::Probe(format!("{e:?}")))?;

    let mut stats = State::default();
    stats.extend(out_f);

    let cycles = t1.saturating_sub(t0);
    Ok(Report {
        strategy,
        settle,
        window,
        cycles,
        cycles_per_sample: cycles / window as u64,
        state: pll.snapshot(),
        out_f_q25: stats.get(),
        out_f: stats.get_scaled(1. / (1u64 << Q25) as f64),
    })
}

/// Run the strategies selected by the settings, in order, on the same input.
pub fn run_all<C: CycleCounter, O: OutputPin>(
    settings: &Settings,
    table: &SineTable,
    counter: &mut C,
    probe: &mut O,
) -> Result<Vec<Report>, Error> {
    settings.validate()?;
    let buffer = SampleBuffer::from_table(table);
    for (i, w) in buffer.key_points() {
        log::info!("SINE i={i} v={:#010x}", w);
    }

    let mut reports = Vec::with_capacity(2);
    if matches!(*settings.strategy, Strategy::Exact | Strategy::Both) {
        reports.push(run::<ExactDivision<FS_HZ>, _, _>(
            settings, table, &buffer, counter, probe,
        )?);
    }
    if matches!(*settings.strategy, Strategy::Reciprocal | Strategy::Both) {
        reports.push(run::<ReciprocalMultiply<FS_HZ>, _, _>(
            settings, table, &buffer, counter, probe,
        )?);
    }
    Ok(reports)
}

/// Signed phase difference `a - b` in Q30 turns, wrapped to `[-1/2, 1/2)`.
pub fn theta_difference(a: &Snapshot, b: &Snapshot) -> i32 {
    let shift = 32 - THETA_BITS;
    (a.theta.wrapping_sub(b.theta) << shift) as i32 >> shift
}
