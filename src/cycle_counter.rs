use std::time::Instant;

/// A free running, monotonic cycle count.
pub trait CycleCounter {
    /// Cycles elapsed since the counter was created.
    fn cycles(&mut self) -> u64;
}

/// Cycle counter emulated from the host clock.
///
/// Elapsed wall time is expressed in cycles of a nominal CPU clock so that
/// host and target measurements read the same.
#[derive(Copy, Clone, Debug)]
pub struct HostCycleCounter {
    start: Instant,
    cpu_frequency: u32,
}

impl HostCycleCounter {
    /// Construct the cycle counter.
    ///
    /// # Args
    /// * `cpu_frequency` - The nominal frequency that the counter counts at.
    pub fn new(cpu_frequency: u32) -> Self {
        Self {
            start: Instant::now(),
            cpu_frequency,
        }
    }
}

impl CycleCounter for HostCycleCounter {
    fn cycles(&mut self) -> u64 {
        let ns = self.start.elapsed().as_nanos();
        (ns * self.cpu_frequency as u128 / 1_000_000_000) as u64
    }
}
