//! Named construction and inspection functions.
//!
//! Every operator implemented on [`Expr`] is sugar for one of the functions here. Arguments
//! accept anything that converts into an [`Expr`], so raw integers are promoted to constants:
//!
//! ```
//! use symtree::ops::{add, constant, multiply, variable};
//!
//! let x = variable("x").unwrap();
//! let expr = add(multiply(2, &x), 1);
//! assert_eq!(expr.to_string(), "( ( 2 * x ) + 1 )");
//! assert_eq!(expr, add(multiply(constant(2).unwrap(), &x), constant(1).unwrap()));
//! ```

use crate::expr::Expr;
use crate::number::{Number, ToNumber};
use symtree_error::Error;

/// Creates a constant. Fails with [`NotANumber`](crate::error::NotANumber) if `value` is not a
/// finite number.
pub fn constant(value: impl ToNumber) -> Result<Expr, Error> {
    Expr::constant(value)
}

/// Creates a variable with a fresh identity. Fails with [`InvalidName`](crate::error::InvalidName)
/// if `name` is not an identifier.
pub fn variable(name: &str) -> Result<Expr, Error> {
    Expr::variable(name)
}

/// `a + b`
pub fn add(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::Sum(vec![a.into(), b.into()])
}

/// `a + b + c + ...`
pub fn sum<I, E>(terms: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Expr::sum(terms)
}

/// `a - b`, built as `a + (-1 * b)`.
pub fn subtract(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    add(a, negate(b))
}

/// `-a`, built as `-1 * a`.
pub fn negate(a: impl Into<Expr>) -> Expr {
    Expr::product([Expr::neg_one(), a.into()])
}

/// `a * b`. Collapses to `0` if either side is the constant `0`.
pub fn multiply(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::product([a.into(), b.into()])
}

/// `a * b * c * ...`. Collapses to `0` if any factor is the constant `0`.
pub fn product<I, E>(factors: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Expr::product(factors)
}

/// `a / b`, built as `a * b^-1`.
pub fn divide(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::product([a.into(), Expr::Power(Box::new(b.into()), Number::from(-1))])
}

/// `a ^ n` for a constant `n`. Fails with
/// [`UnsupportedExponent`](crate::error::UnsupportedExponent) if `n` is not a constant.
pub fn power(a: impl Into<Expr>, n: impl Into<Expr>) -> Result<Expr, Error> {
    Expr::power(a, n)
}

/// `a ^ n` for an integer `n`. Fails with [`InvalidExponent`](crate::error::InvalidExponent) if
/// `n` has a fractional part.
pub fn powi(a: impl Into<Expr>, n: impl ToNumber) -> Result<Expr, Error> {
    Expr::powi(a, n)
}

/// Returns true if `a` and `b` are structurally equal.
pub fn equals(a: &Expr, b: &Expr) -> bool {
    a == b
}

/// Renders the expression as text.
pub fn to_display_string(expr: &Expr) -> String {
    expr.to_string()
}
