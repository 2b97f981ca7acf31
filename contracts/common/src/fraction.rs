//! Fixed-point fractions with a 2^24 denominator.
//!
//! Fees and rates are stored as the numerator only; `1 << 24` would be 100%,
//! so valid numerators live in `[0, 2^24)`.

pub const FRACTION_BITS: u32 = 24;
pub const FRACTION_DENOMINATOR: u32 = 1 << FRACTION_BITS;

pub fn is_valid(numerator: u32) -> bool {
    numerator < FRACTION_DENOMINATOR
}
