//! Benchmark settings
//!
//! Settings form a `miniconf` tree so individual values can be addressed by
//! path (e.g. `/gains/kp`) and updated from JSON, the same way run-time
//! settings are handled on the target. Defaults reproduce the reference
//! measurement: 50 Hz input at 40 kHz, 20000 samples settling, 1024 samples
//! measured.
use miniconf::{Leaf, Tree};
use pll_q30::{Gains, FS_HZ};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Phase increment implementation(s) to benchmark.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Integer division by the sample rate.
    Exact,
    /// Multiply by the rounded reciprocal of the sample rate.
    Reciprocal,
    /// Both, one after the other, on the same input.
    Both,
}

#[derive(Clone, Debug, PartialEq, Tree, Serialize)]
pub struct Settings {
    /// PI gains in Q2.30.
    pub gains: Gains,

    /// Frequency of the emulated ADC input tone in Hz.
    pub input_frequency: Leaf<u32>,

    /// Number of samples processed before the measurement window.
    pub settle: Leaf<u32>,

    /// Number of samples in the measurement window.
    pub window: Leaf<u32>,

    /// Phase increment strategy.
    pub strategy: Leaf<Strategy>,

    /// Nominal CPU clock in Hz used to express host time as cycles.
    pub cpu_frequency: Leaf<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gains: Gains::default(),
            input_frequency: 50.into(),
            settle: 20_000.into(),
            window: 1024.into(),
            strategy: Strategy::Both.into(),
            cpu_frequency: 100_000_000.into(),
        }
    }
}

impl Settings {
    /// Update a single setting from its JSON representation.
    ///
    /// # Args
    /// * `path` - Setting path, e.g. `/gains/ki`.
    /// * `value` - JSON value, e.g. `1342177` or `"Exact"`.
    pub fn set(&mut self, path: &str, value: &str) -> Result<(), Error> {
        let mut next = self.clone();
        miniconf::json::set(&mut next, path, value.as_bytes()).map_err(
            |e| Error::Setting {
                path: path.into(),
                reason: format!("{e:?}"),
            },
        )?;
        next.validate()?;
        log::debug!("Set `{path}` to {value}");
        *self = next;
        Ok(())
    }

    /// Apply a `path=value` assignment.
    pub fn apply(&mut self, assignment: &str) -> Result<(), Error> {
        let (path, value) =
            assignment.split_once('=').ok_or_else(|| Error::Setting {
                path: assignment.into(),
                reason: "expected `path=value`".into(),
            })?;
        self.set(path.trim(), value.trim())
    }

    /// Check value ranges.
    ///
    /// Fields are public, so a run validates again before it starts.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        let invalid = |path: &str, reason: String| -> Result<(), Error> {
            Err(Error::Setting {
                path: path.into(),
                reason,
            })
        };
        if *self.input_frequency == 0 || *self.input_frequency >= FS_HZ {
            return invalid(
                "/input_frequency",
                format!("must be within (0, {FS_HZ}) Hz"),
            );
        }
        if *self.window == 0 {
            return invalid("/window", "empty measurement window".into());
        }
        if *self.cpu_frequency == 0 {
            return invalid("/cpu_frequency", "must be non-zero".into());
        }
        Ok(())
    }
}
