include!(concat!(env!("OUT_DIR"), "/sine_table.rs"));

/// Table index bits.
pub const SINE_BITS: u32 = SINE_DEPTH as u32;

/// Number of samples in one table turn.
pub const SINE_LEN: usize = 1 << SINE_DEPTH;

/// Table index offset of a quarter turn (+90 degrees).
pub const QUARTER_TURN: usize = SINE_LEN / 4;

static REFERENCE: SineTable = SineTable::new(SINE);

/// Errors constructing a table from external data.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("sine table needs {expected} samples, got {actual}")]
    Length { expected: usize, actual: usize },
}

/// One full sine turn as signed Q2.30 samples.
///
/// Index 0 is phase zero, [`QUARTER_TURN`] is +1.0, half a turn is the
/// negative going zero crossing and three quarters is -1.0.
///
/// The table is immutable and shared by reference between any number of
/// loops.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SineTable {
    samples: [i32; SINE_LEN],
}

impl SineTable {
    /// Wrap a complete set of samples.
    pub const fn new(samples: [i32; SINE_LEN]) -> Self {
        Self { samples }
    }

    /// The table generated at build time: `round(sin(2 pi i / 1024) * 2^30)`.
    pub fn reference() -> &'static Self {
        &REFERENCE
    }

    /// Copy an externally produced table (e.g. the one baked into the HDL).
    ///
    /// The words are taken bit for bit.
    pub fn from_words(words: &[i32]) -> Result<Self, TableError> {
        let samples: [i32; SINE_LEN] =
            words.try_into().map_err(|_| TableError::Length {
                expected: SINE_LEN,
                actual: words.len(),
            })?;
        Ok(Self::new(samples))
    }

    /// Sample at `index` modulo one turn.
    #[inline]
    pub fn get(&self, index: usize) -> i32 {
        self.samples[index & (SINE_LEN - 1)]
    }

    pub fn samples(&self) -> &[i32; SINE_LEN] {
        &self.samples
    }
}

impl AsRef<[i32]> for SineTable {
    fn as_ref(&self) -> &[i32] {
        &self.samples
    }
}
