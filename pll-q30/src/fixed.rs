/// Fractional bits of the Q2.30 loop format (gains, sin/cos, integrator).
pub const Q30: u32 = 30;
/// Fractional bits of the Q(7).25 frequency format (Hz).
pub const Q25: u32 = 25;
/// Fractional bits of the Q(9).22 input sample format.
pub const Q22: u32 = 22;

/// Clamp a wide intermediate into the i32 range.
///
/// This is the hardware saturation applied after every multiply and
/// accumulate in the loop. Values already in range pass unchanged.
#[inline]
pub fn saturate(x: i64) -> i32 {
    x.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Q2.30 x Q2.30 -> Q2.30 multiply.
///
/// The full Q4.60 product is shifted right arithmetically, i.e. truncated
/// towards negative infinity, and then saturated. No rounding bias is added:
/// the HDL multiplier truncates.
#[inline]
pub fn mul_q30(a: i32, b: i32) -> i32 {
    saturate((a as i64 * b as i64) >> Q30)
}

/// Convert a Q(9).22 input sample to Q2.30.
///
/// Input magnitudes beyond the Q2.30 range saturate.
#[inline]
pub fn q22_to_q30(x: i32) -> i32 {
    saturate((x as i64) << (Q30 - Q22))
}
