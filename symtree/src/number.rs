//! Numeric values held by [`Expr::Constant`](crate::Expr::Constant) nodes and power exponents.
//!
//! A [`Number`] is either an exact [`Integer`] or a [`Float`] with [`PRECISION`] bits of
//! precision. Arithmetic between two integers stays exact; as soon as a float is involved, the
//! result is a float.
//!
//! This module **must never** produce non-finite [`Float`]s (such as `NaN` or `Infinity`). Every
//! way of making a [`Number`] from outside the crate rejects them with [`NotANumber`].

use crate::error::NotANumber;
use crate::primitive::{float, float_from_str, int, int_from_str, PRECISION};
use rug::{ops::Pow, Float, Integer};
use std::{fmt, ops::{Add, Mul, Neg, Sub}};
use symtree_error::Error;

/// The largest size, in bits, of an integer power computed exactly. Larger powers are computed
/// with floats by [`Number::pow`], and left symbolic by [`Number::exact_pow`].
const MAX_EXACT_BITS: u64 = 1 << 16;

/// Raises an integer to a non-negative integer power, if the result fits in [`MAX_EXACT_BITS`].
///
/// The bound is checked before any allocation: `base ^ n` needs at most `n` times the bits of
/// `base`.
fn exact_integer_pow(base: &Integer, exponent: &Integer) -> Option<Integer> {
    let exponent = exponent.to_u32()?;
    let bits = base.significant_bits() as u64 * u64::from(exponent);
    if bits > MAX_EXACT_BITS {
        return None;
    }
    Some(base.clone().pow(exponent))
}

/// A numeric scalar.
#[derive(Debug, Clone)]
pub enum Number {
    /// An integer, such as `2` or `-144`.
    Integer(Integer),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),
}

impl Number {
    /// The number `0`.
    pub fn zero() -> Self {
        Self::Integer(int(0))
    }

    /// The number `1`.
    pub fn one() -> Self {
        Self::Integer(int(1))
    }

    /// Returns true if the number is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Integer(n) => n.is_zero(),
            Self::Float(n) => n.is_zero(),
        }
    }

    /// Returns true if the number is one.
    pub fn is_one(&self) -> bool {
        match self {
            Self::Integer(n) => *n == 1,
            Self::Float(n) => *n == 1,
        }
    }

    /// Returns true if the number is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Integer(n) => *n < 0,
            Self::Float(n) => *n < 0,
        }
    }

    /// Returns true if the number has no fractional part.
    pub fn is_integral(&self) -> bool {
        match self {
            Self::Integer(_) => true,
            Self::Float(n) => n.is_integer(),
        }
    }

    /// If the number is a [`Number::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Integer(n) => Some(n),
            Self::Float(_) => None,
        }
    }

    /// Converts the number to a [`Float`].
    pub fn to_float(&self) -> Float {
        match self {
            Self::Integer(n) => float(n),
            Self::Float(n) => n.clone(),
        }
    }

    /// Converts the number to an [`f64`], rounding to the nearest representable value.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Integer(n) => n.to_f64(),
            Self::Float(n) => n.to_f64(),
        }
    }

    /// Raises this number to the given power.
    ///
    /// An integer raised to a non-negative integer is computed exactly, unless the result would be
    /// too large. Any other combination is computed with floats. Returns [`None`] if the result
    /// is not a finite real number, such as `0 ^ -1` or `(-8) ^ 0.5`.
    pub fn pow(&self, exponent: &Number) -> Option<Number> {
        if let (Self::Integer(base), Self::Integer(exponent)) = (self, exponent) {
            if let Some(result) = exact_integer_pow(base, exponent) {
                return Some(Self::Integer(result));
            }
        }

        if self.is_zero() && exponent.is_negative() {
            return None;
        }

        let result = self.to_float().pow(exponent.to_float());
        result.is_finite().then_some(Self::Float(result))
    }

    /// Raises this number to the given power, but only if the result can be represented without
    /// losing exactness.
    ///
    /// Integer bases are only raised to non-negative integer exponents, and only if the result is
    /// small enough to compute; float bases are raised to any exponent that gives a finite real
    /// result.
    pub fn exact_pow(&self, exponent: &Number) -> Option<Number> {
        match (self, exponent) {
            (Self::Integer(base), Self::Integer(n)) => exact_integer_pow(base, n).map(Self::Integer),
            (Self::Integer(_), Self::Float(_)) => None,
            (Self::Float(_), _) => self.pow(exponent),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(n) => {
                // prefer the short form when the value survives the trip to `f64`
                let approx = n.to_f64();
                if approx.is_finite() && (approx != 0.0 || n.is_zero()) {
                    write!(f, "{}", approx)
                } else {
                    write!(f, "{:.17}", n)
                }
            },
        }
    }
}

/// Numbers compare equal if their values are equal, regardless of representation, so
/// `Integer(2) == Float(2.0)`.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(lhs), Self::Integer(rhs)) => lhs == rhs,
            (Self::Float(lhs), Self::Float(rhs)) => lhs == rhs,
            (Self::Integer(int), Self::Float(float)) | (Self::Float(float), Self::Integer(int)) => {
                *float == *int
            },
        }
    }
}

/// [`Eq`] is implemented manually since [`Float`] is only [`PartialEq`]. This module **must
/// never** produce `NaN`s! Report any bugs that cause this to happen.
impl Eq for Number {}

impl PartialEq<i32> for Number {
    fn eq(&self, other: &i32) -> bool {
        match self {
            Self::Integer(n) => *n == *other,
            Self::Float(n) => *n == *other,
        }
    }
}

impl PartialEq<i64> for Number {
    fn eq(&self, other: &i64) -> bool {
        match self {
            Self::Integer(n) => *n == *other,
            Self::Float(n) => *n == *other,
        }
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Integer(lhs), Self::Integer(rhs)) => Self::Integer(lhs + rhs),
            (lhs, rhs) => Self::Float(lhs.to_float() + rhs.to_float()),
        }
    }
}

impl Sub for Number {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Integer(lhs), Self::Integer(rhs)) => Self::Integer(lhs - rhs),
            (lhs, rhs) => Self::Float(lhs.to_float() - rhs.to_float()),
        }
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Integer(lhs), Self::Integer(rhs)) => Self::Integer(lhs * rhs),
            (lhs, rhs) => Self::Float(lhs.to_float() * rhs.to_float()),
        }
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Integer(n) => Self::Integer(-n),
            Self::Float(n) => Self::Float(-n),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Self::Integer(int(n))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<Integer> for Number {
    fn from(n: Integer) -> Self {
        Self::Integer(n)
    }
}

impl TryFrom<f64> for Number {
    type Error = Error;

    fn try_from(n: f64) -> Result<Self, Self::Error> {
        if n.is_finite() {
            Ok(Self::Float(float(n)))
        } else {
            Err(Error::spanning(n.to_string(), NotANumber { value: n.to_string() }))
        }
    }
}

impl TryFrom<Float> for Number {
    type Error = Error;

    fn try_from(n: Float) -> Result<Self, Self::Error> {
        if n.is_finite() {
            Ok(Self::Float(Float::with_val(PRECISION, n)))
        } else {
            Err(Error::spanning(n.to_string(), NotANumber { value: n.to_string() }))
        }
    }
}

/// Conversion of a value into a [`Number`], failing with [`NotANumber`] if the value is not a
/// finite number.
///
/// This is implemented for the primitive integer and float types, [`Integer`], [`Float`],
/// [`Number`], and for text, which is parsed as a decimal integer or float.
pub trait ToNumber {
    /// Converts the value into a [`Number`].
    fn to_number(self) -> Result<Number, Error>;
}

macro_rules! impl_to_number_infallible {
    ($($ty:ty),*) => {
        $(
            impl ToNumber for $ty {
                fn to_number(self) -> Result<Number, Error> {
                    Ok(Number::from(self))
                }
            }
        )*
    };
}

impl_to_number_infallible!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, Integer);

impl ToNumber for Number {
    fn to_number(self) -> Result<Number, Error> {
        Ok(self)
    }
}

impl ToNumber for f64 {
    fn to_number(self) -> Result<Number, Error> {
        Number::try_from(self)
    }
}

impl ToNumber for f32 {
    fn to_number(self) -> Result<Number, Error> {
        Number::try_from(f64::from(self))
    }
}

impl ToNumber for Float {
    fn to_number(self) -> Result<Number, Error> {
        Number::try_from(self)
    }
}

impl ToNumber for &str {
    fn to_number(self) -> Result<Number, Error> {
        if let Some(n) = int_from_str(self) {
            return Ok(Number::Integer(n));
        }

        float_from_str(self)
            .map(Number::Float)
            .ok_or_else(|| Error::spanning(self, NotANumber { value: self.to_string() }))
    }
}

impl ToNumber for String {
    fn to_number(self) -> Result<Number, Error> {
        self.as_str().to_number()
    }
}
