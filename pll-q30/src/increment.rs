use super::{Q25, Q30};

/// Reference sample rate of the HDL design in Hz.
pub const FS_HZ: u32 = 40_000;

/// Conversion of the Q25 frequency estimate (Hz) to a Q30 phase increment
/// (turns per sample) at a fixed sample rate.
///
/// The reference system carries two implementations of this step that are
/// not bit-identical. Both are provided; neither is preferred.
pub trait PhaseIncrement {
    /// Sample rate in Hz.
    const FS: u32;

    /// Short name used in reports.
    const NAME: &'static str;

    /// Phase increment in Q30 turns per sample for frequency `f` in Q25 Hz.
    fn phase_increment(f: i32) -> i32;
}

/// `(f << 5) / FS` with truncating integer division.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExactDivision<const FS: u32>;

impl<const FS: u32> ExactDivision<FS> {
    const DIVISOR: i64 = {
        assert!(FS > 0 && FS <= i32::MAX as u32);
        FS as i64
    };
}

impl<const FS: u32> PhaseIncrement for ExactDivision<FS> {
    const FS: u32 = FS;
    const NAME: &'static str = "exact";

    #[inline]
    fn phase_increment(f: i32) -> i32 {
        (((f as i64) << (Q30 - Q25)) / Self::DIVISOR) as i32
    }
}

/// `(f * round(2^32 / FS)) >> 27`, avoiding a division per sample.
///
/// The rounded reciprocal is off by up to half an LSB of `2^32 / FS`, so the
/// increment deviates from [`ExactDivision`] by a few LSB.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReciprocalMultiply<const FS: u32>;

impl<const FS: u32> ReciprocalMultiply<FS> {
    /// `2^32 / FS`, rounded half up.
    pub const INV_FS: i64 = {
        assert!(FS > 0 && FS <= i32::MAX as u32);
        ((1i64 << 32) + (FS as i64 >> 1)) / FS as i64
    };
}

impl<const FS: u32> PhaseIncrement for ReciprocalMultiply<FS> {
    const FS: u32 = FS;
    const NAME: &'static str = "reciprocal";

    #[inline]
    fn phase_increment(f: i32) -> i32 {
        // Q25 * Q32/FS -> Q57/FS -> Q30
        ((f as i64 * Self::INV_FS) >> (32 + Q25 - Q30)) as i32
    }
}
