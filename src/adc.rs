//! Emulated ADC input
//!
//! On the target the sine table is staged into a scratch memory as Q22 words
//! (the format of the HDL input port) and a phase accumulator stands in for
//! the converter: its top bits select the word sampled each period. This
//! module reproduces that sampling on the host. The buffer is read-only and
//! may be shared by any number of emulated inputs.
use pll_q30::{SineTable, Q22, Q30, SINE_BITS};

/// The sine table in Q22, one word per table entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleBuffer {
    words: Vec<i32>,
}

impl SampleBuffer {
    /// Stage a Q2.30 table as Q22 words (arithmetic shift, truncating).
    pub fn from_table(table: &SineTable) -> Self {
        Self {
            words: table
                .samples()
                .iter()
                .map(|s| s >> (Q30 - Q22))
                .collect(),
        }
    }

    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// Words at zero, a quarter, half and three quarter turn.
    pub fn key_points(&self) -> [(usize, i32); 4] {
        let n = self.words.len();
        [0, n / 4, n / 2, 3 * n / 4].map(|i| (i, self.words[i]))
    }
}

/// Free running 32 bit phase accumulator.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct Accu {
    state: u32,
    step: u32,
}

impl Accu {
    pub fn new(state: u32, step: u32) -> Self {
        Self { state, step }
    }

    /// Accumulator for a tone of `frequency` at `sample_rate` starting at zero.
    ///
    /// The step is `floor(frequency * 2^32 / sample_rate)`. `None` unless
    /// `frequency` is below `sample_rate`.
    pub fn tone(frequency: u32, sample_rate: u32) -> Option<Self> {
        (frequency < sample_rate).then(|| {
            let step = ((frequency as u64) << 32) / sample_rate as u64;
            Self::new(0, step as u32)
        })
    }

    pub fn step(&self) -> u32 {
        self.step
    }
}

impl Iterator for Accu {
    type Item = u32;
    #[inline]
    fn next(&mut self) -> Option<u32> {
        let s = self.state;
        self.state = self.state.wrapping_add(self.step);
        Some(s)
    }
}

/// Input samples drawn from a [`SampleBuffer`] by a phase accumulator.
///
/// Endless; use `by_ref().take(n)` to draw consecutive blocks.
#[derive(Clone, Debug)]
pub struct Adc<'a> {
    buffer: &'a SampleBuffer,
    phase: Accu,
}

impl<'a> Adc<'a> {
    pub fn new(buffer: &'a SampleBuffer, phase: Accu) -> Self {
        debug_assert_eq!(buffer.words().len(), 1 << SINE_BITS);
        Self { buffer, phase }
    }
}

impl Iterator for Adc<'_> {
    type Item = i32;
    #[inline]
    fn next(&mut self) -> Option<i32> {
        let phase = self.phase.next()?;
        Some(self.buffer.words[(phase >> (32 - SINE_BITS)) as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_words() {
        let b = SampleBuffer::from_table(SineTable::reference());
        assert_eq!(b.words().len(), 1024);
        assert_eq!(
            b.key_points(),
            [(0, 0), (256, 0x0040_0000), (512, 0), (768, 0xFFC0_0000u32 as i32)]
        );
        assert_eq!(b.words()[1], 25735);
        // Truncation of negative values rounds down.
        assert_eq!(b.words()[1023], -25736);
    }

    #[test]
    fn tone_step() {
        // 50 Hz at 40 kHz: 5368709.12
        assert_eq!(Accu::tone(50, 40_000).unwrap().step(), 5_368_709);
        assert_eq!(Accu::tone(10_000, 40_000).unwrap().step(), 1 << 30);
        assert_eq!(Accu::tone(39_999, 40_000).unwrap().step(), 4_294_859_921);
        assert_eq!(Accu::tone(40_000, 40_000), None);
        assert_eq!(Accu::tone(1, 0), None);
        let mut a = Accu::new(u32::MAX, 2);
        assert_eq!(a.next(), Some(u32::MAX));
        assert_eq!(a.next(), Some(1));
    }

    #[test]
    fn sampling() {
        let b = SampleBuffer::from_table(SineTable::reference());
        // A quarter of the sample rate hits the four key points in turn.
        let adc = Adc::new(&b, Accu::tone(10_000, 40_000).unwrap());
        let x: Vec<i32> = adc.take(5).collect();
        assert_eq!(x, [0, 0x0040_0000, 0, -0x0040_0000, 0]);

        let mut adc = Adc::new(&b, Accu::tone(50, 40_000).unwrap());
        let first: Vec<i32> = adc.by_ref().take(3).collect();
        assert_eq!(first, [0, 25735, 51470]);
        // Continues where the previous block ended.
        assert_eq!(adc.next(), Some(77203));
    }
}
