use core::marker::PhantomData;

use miniconf::{Leaf, Tree};
use serde::{Deserialize, Serialize};

use super::{
    mul_q30, q22_to_q30, saturate, sin_cos, ExactDivision, PhaseIncrement,
    ReciprocalMultiply, SineTable, FS_HZ, Q25, Q30, THETA_MASK,
};

/// Nominal frequency: 50 Hz in Q25.
pub const BASE_FREQUENCY: i32 = 50 << Q25;

/// PI gains.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Tree)]
pub struct Gains {
    /// Proportional gain, signed Q2.30.
    pub kp: Leaf<i32>,
    /// Integral gain per sample, signed Q2.30.
    pub ki: Leaf<i32>,
}

impl Gains {
    pub const fn new(kp: i32, ki: i32) -> Self {
        Self {
            kp: Leaf(kp),
            ki: Leaf(ki),
        }
    }
}

impl Default for Gains {
    /// kp = 0.5, ki = 0.00125
    fn default() -> Self {
        Self::new(0x2000_0000, 0x0014_7AE1)
    }
}

/// Phase detector.
///
/// Placeholder error `-x * sin(theta)`. A synchronous reference frame PLL
/// would derive the quadrature error through a Park transform and a lowpass;
/// this one feeds the raw product (including its double frequency ripple)
/// to the PI controller, exactly like the HDL model.
///
/// The negation saturates: `-(-2.0)` becomes the largest positive Q2.30.
#[inline]
pub fn phase_error(x: i32, sin: i32) -> i32 {
    mul_q30(x, sin).saturating_neg()
}

/// Observable loop state after an update.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Phase, Q30 turns in `[0, 1)`.
    pub theta: u32,
    /// NCO sine used by the last update, Q2.30.
    pub sin: i32,
    /// NCO cosine, Q2.30.
    pub cos: i32,
    /// PI integrator, Q2.30.
    pub integrator: i32,
    /// Frequency estimate, Q25 Hz.
    pub out_f: i32,
    /// PI contribution to `out_f`, Q25 Hz.
    pub delta_f: i32,
}

/// Fixed-point table PLL.
///
/// Tracks the phase and frequency of a sinusoidal input sampled at `P::FS`.
/// Each [`Pll::update`] performs one closed loop iteration:
///
/// 1. NCO lookup of `sin`/`cos` at the current phase,
/// 2. Q22 -> Q30 input scaling (saturating),
/// 3. phase error `-x * sin`,
/// 4. PI: `p = kp * e`, `i = sat(i + ki * e)`, `u = sat(p + i)`,
/// 5. `delta_f = u >> 5` (Q30 -> Q25),
/// 6. `out_f = 50 Hz + delta_f`,
/// 7. phase increment `out_f / FS` via the [`PhaseIncrement`] strategy,
/// 8. phase update modulo one turn (`1 << 30`).
///
/// All products are truncated and saturated the way the HDL does it. The
/// final `50 Hz + delta_f` sum is the one unsaturated addition; it can not
/// overflow since `delta_f` is within `+-2^26`.
///
/// There is no uninitialized state: [`Pll::new`] is the only constructor.
#[derive(Copy, Clone, Debug)]
pub struct Pll<'a, P = ExactDivision<FS_HZ>> {
    table: &'a SineTable,
    gains: Gains,
    theta: u32,
    integrator: i32,
    sin: i32,
    cos: i32,
    out_f: i32,
    delta_f: i32,
    increment: PhantomData<P>,
}

/// PLL at the reference rate using the exact division.
pub type ExactPll<'a> = Pll<'a, ExactDivision<FS_HZ>>;

/// PLL at the reference rate using the reciprocal multiply.
pub type ReciprocalPll<'a> = Pll<'a, ReciprocalMultiply<FS_HZ>>;

impl<'a, P: PhaseIncrement> Pll<'a, P> {
    /// Create a PLL at zero phase, empty integrator and 50 Hz.
    ///
    /// # Args
    /// * `table` - NCO sine table, shared read-only.
    /// * `gains` - PI gains. Fixed for the lifetime of the instance.
    pub fn new(table: &'a SineTable, gains: Gains) -> Self {
        log::debug!(
            "PLL init: kp={:#010x} ki={:#010x} fs={} Hz",
            *gains.kp,
            *gains.ki,
            P::FS
        );
        Self {
            table,
            gains,
            theta: 0,
            integrator: 0,
            sin: 0,
            cos: 0,
            out_f: BASE_FREQUENCY,
            delta_f: 0,
            increment: PhantomData,
        }
    }

    /// Re-initialize in place, keeping gains and table.
    pub fn reset(&mut self) {
        *self = Self::new(self.table, self.gains);
    }

    /// Advance the loop by one input sample.
    ///
    /// This needs to be called once per sample period `1 / P::FS`; the loop has
    /// no notion of time beyond that.
    ///
    /// # Args
    /// * `x` - Input sample, signed Q(9).22.
    ///
    /// # Returns
    /// The updated frequency estimate `out_f` in Q25 Hz.
    pub fn update(&mut self, x: i32) -> i32 {
        (self.sin, self.cos) = sin_cos(self.table, self.theta);

        let e = phase_error(q22_to_q30(x), self.sin);

        let p = mul_q30(*self.gains.kp, e);
        // Accumulate, then saturate.
        self.integrator = saturate(
            self.integrator as i64 + mul_q30(*self.gains.ki, e) as i64,
        );
        let u = saturate(p as i64 + self.integrator as i64);

        self.delta_f = saturate(u as i64 >> (Q30 - Q25));
        self.out_f = BASE_FREQUENCY.wrapping_add(self.delta_f);

        let dtheta = P::phase_increment(self.out_f);
        self.theta = self.theta.wrapping_add(dtheta as u32) & THETA_MASK;
        self.out_f
    }

    /// Phase, Q30 turns in `[0, 1 << 30)`.
    pub fn theta(&self) -> u32 {
        self.theta
    }

    /// Sine used by the last update, Q2.30.
    pub fn sin(&self) -> i32 {
        self.sin
    }

    /// Cosine of the last update, Q2.30.
    pub fn cos(&self) -> i32 {
        self.cos
    }

    /// PI integrator, Q2.30.
    pub fn integrator(&self) -> i32 {
        self.integrator
    }

    /// Frequency estimate, Q25 Hz.
    pub fn out_f(&self) -> i32 {
        self.out_f
    }

    /// PI frequency contribution, Q25 Hz.
    pub fn delta_f(&self) -> i32 {
        self.delta_f
    }

    pub fn gains(&self) -> Gains {
        self.gains
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            theta: self.theta,
            sin: self.sin,
            cos: self.cos,
            integrator: self.integrator,
            out_f: self.out_f,
            delta_f: self.delta_f,
        }
    }
}
