//! Functions to construct [`Integer`]s and [`Float`]s from various types.

use rug::{Assign, Float, Integer};

/// The number of bits of precision to use for [`Float`]s.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Parses a decimal [`Integer`] from a string slice. Returns [`None`] if the string is not a
/// decimal integer.
pub fn int_from_str(s: &str) -> Option<Integer> {
    Integer::from_str_radix(s.trim(), 10).ok()
}

/// Parses a finite [`Float`] from a string slice. Returns [`None`] if the string is not a number,
/// or if it names a non-finite value such as `inf` or `nan`.
pub fn float_from_str(s: &str) -> Option<Float> {
    let parsed = Float::parse(s.trim()).ok()?;
    let float = float(parsed);
    float.is_finite().then_some(float)
}
