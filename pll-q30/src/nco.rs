use super::{SineTable, QUARTER_TURN, SINE_BITS};

/// Bits of the phase accumulator. One turn is `1 << THETA_BITS`.
pub const THETA_BITS: u32 = 30;

/// Mask confining a phase to `[0, 1)` turn.
pub const THETA_MASK: u32 = (1 << THETA_BITS) - 1;

/// Sine and cosine of a phase by table lookup.
///
/// # Arguments
/// * `table` - One turn of Q2.30 sine samples.
/// * `theta` - Phase in turns, `1 << 30` per turn. Bits above are ignored.
///
/// # Returns
/// `(sin, cos)` in Q2.30. The top ten phase bits select the table entry, the
/// lower twenty are truncated (no interpolation). Cosine is the entry a
/// quarter turn ahead.
#[inline]
pub fn sin_cos(table: &SineTable, theta: u32) -> (i32, i32) {
    let index = ((theta & THETA_MASK) >> (THETA_BITS - SINE_BITS)) as usize;
    (table.get(index), table.get(index + QUARTER_TURN))
}
