//! Exact symbolic partial derivatives.
//!
//! [`partial`] applies the sum, product and power rules recursively. The result is **not**
//! simplified: the only reduction that happens is the zero absorption performed by
//! [`Expr::product`]. Pass the result to [`normalize`](crate::normalize()) for a reduced form.
//!
//! ```
//! use symtree::{normalize, ops::{power, variable}};
//!
//! let x = variable("x").unwrap();
//! let cube = power(&x, 3).unwrap();
//!
//! // d/dx x^3 = 3 * x^2 * 1
//! let derivative = cube.partial(&x);
//! assert_eq!(derivative.to_string(), "( 3 * x ^ 2 * 1 )");
//! assert_eq!(normalize(&derivative).to_string(), "( 3 * x ^ 2 )");
//! ```

use crate::expr::Expr;
use crate::number::Number;

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[Expr], wrt: &Expr) -> Expr {
    Expr::Sum(terms.iter().map(|term| partial(term, wrt)).collect())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(factors: &[Expr], wrt: &Expr) -> Expr {
    let terms = (0..factors.len())
        .map(|derivative_index| {
            Expr::product(factors.iter().enumerate().map(|(factor_index, factor)| {
                if factor_index == derivative_index {
                    partial(factor, wrt)
                } else {
                    factor.clone()
                }
            }))
        })
        .collect();

    Expr::Sum(terms)
}

/// `(f^n)' = n * f^(n - 1) * f'`
fn power_rule(base: &Expr, exponent: &Number, wrt: &Expr) -> Expr {
    Expr::product([
        Expr::Constant(exponent.clone()),
        Expr::Power(Box::new(base.clone()), exponent.clone() - Number::one()),
        partial(base, wrt),
    ])
}

/// Computes the partial derivative of `f` with respect to `wrt`, treating every other variable
/// as a constant.
///
/// `wrt` is normally a [`Expr::Variable`], but any sub-expression may be chosen: a non-constant
/// node structurally equal to `wrt` differentiates to `1`. Variables are matched by identity.
pub fn partial(f: &Expr, wrt: &Expr) -> Expr {
    if !f.is_constant() && f == wrt {
        return Expr::one();
    }

    match f {
        Expr::Constant(_) | Expr::Variable(_) => Expr::zero(),
        Expr::Sum(terms) => sum_rule(terms, wrt),
        Expr::Product(factors) => product_rule(factors, wrt),
        Expr::Power(base, exponent) => power_rule(base, exponent, wrt),
    }
}
