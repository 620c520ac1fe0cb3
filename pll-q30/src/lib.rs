//! Fixed-point Q2.30 phase-locked loop.
//!
//! A bit-exact software model of a table driven PLL estimating the frequency
//! and phase of a sampled sinusoid. All loop arithmetic is integer with an
//! implicit binary point and saturating where the hardware saturates, so that
//! results can be compared word for word against the HDL implementation.
//!
//! The loop is built from:
//! * [`SineTable`]: 1024 Q2.30 sine samples over one turn.
//! * [`saturate`], [`mul_q30`]: saturating fixed-point primitives.
//! * [`sin_cos`]: the table NCO.
//! * [`Pll`]: state and per-sample update, generic over the
//!   [`PhaseIncrement`] strategy ([`ExactDivision`] or [`ReciprocalMultiply`]).
#![cfg_attr(not(test), no_std)]

mod fixed;
pub use fixed::*;
mod table;
pub use table::*;
mod nco;
pub use nco::*;
mod increment;
pub use increment::*;
mod pll;
pub use pll::*;
