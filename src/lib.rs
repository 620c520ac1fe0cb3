//! Host harness for the fixed-point PLL
//!
//! Reproduces the target benchmark around [`pll_q30`]: the sine table is
//! staged as Q22 input words, an emulated ADC samples it at the loop rate,
//! and the loop is timed over a window bracketed by a probe output. The end
//! state is reported as raw words and in physical units.
pub mod adc;
pub mod bench;
pub mod convert;
pub mod cycle_counter;
mod error;
pub mod metadata;
pub mod probe;
pub mod settings;
pub mod statistics;
pub mod table_file;

pub use error::Error;
