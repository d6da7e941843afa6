//! Numeric evaluation of expressions.
//!
//! [`evaluate`] folds an expression into a [`Number`] given a set of [`Bindings`]. A binding may
//! be attached to any sub-expression, not just a variable: when a node structurally equal to a
//! bound expression is reached, the bound value is used and the node's children are not
//! evaluated.
//!
//! ```
//! use symtree::{eval::{evaluate, Bindings}, ops::variable};
//!
//! let x = variable("x").unwrap();
//! let y = variable("y").unwrap();
//! let expr = &x * &y + 1;
//!
//! let bindings = Bindings::new().with(&x, 3).with(&y, 4);
//! assert_eq!(evaluate(&expr, &bindings).unwrap(), 13);
//! ```

use crate::error::{UnboundVariable, UndefinedPower};
use crate::expr::{power_error_src, Expr};
use crate::number::Number;
use log::trace;
use symtree_error::Error;

/// Values bound to expressions for [`evaluate`].
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: Vec<(Expr, Number)>,
}

impl Bindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` to `expr`, replacing any previous binding of a structurally equal
    /// expression.
    pub fn insert(&mut self, expr: &Expr, value: impl Into<Number>) {
        let value = value.into();
        match self.values.iter_mut().find(|(bound, _)| bound == expr) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((expr.clone(), value)),
        }
    }

    /// Binds `value` to `expr` and returns the bindings, for chaining.
    pub fn with(mut self, expr: &Expr, value: impl Into<Number>) -> Self {
        self.insert(expr, value);
        self
    }

    /// Returns the value bound to an expression structurally equal to `expr`, if any.
    pub fn get(&self, expr: &Expr) -> Option<&Number> {
        self.values.iter()
            .find(|(bound, _)| bound == expr)
            .map(|(_, value)| value)
    }
}

/// Evaluates the expression with the given bindings.
///
/// Returns [`UnboundVariable`] if a variable is reached that has no value, and [`UndefinedPower`]
/// if a power does not have a finite real value, such as `0 ^ -1`. Empty sums evaluate to `0`, and
/// empty products to `1`.
pub fn evaluate(expr: &Expr, bindings: &Bindings) -> Result<Number, Error> {
    if let Some(value) = bindings.get(expr) {
        return Ok(value.clone());
    }

    match expr {
        Expr::Constant(num) => Ok(num.clone()),
        Expr::Variable(var) => Err(Error::spanning(var.name(), UnboundVariable {
            name: var.name().to_string(),
        })),
        Expr::Sum(terms) => {
            let mut sum = Number::zero();
            for term in terms {
                sum = sum + evaluate(term, bindings)?;
            }
            Ok(sum)
        },
        Expr::Product(factors) => {
            let mut product = Number::one();
            for factor in factors {
                product = product * evaluate(factor, bindings)?;
            }
            Ok(product)
        },
        Expr::Power(base, exponent) => {
            let base = evaluate(base, bindings)?;
            match base.pow(exponent) {
                Some(value) => Ok(value),
                None => {
                    trace!("`{} ^ {}` has no finite real value", base, exponent);
                    let (src, spans) = power_error_src(&base, exponent);
                    Err(Error::new(src, spans, UndefinedPower {
                        base: base.to_string(),
                        exponent: exponent.to_string(),
                    }))
                },
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_f64_near;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn integers_stay_exact() {
        let x = Expr::variable("x").unwrap();
        let expr = Expr::power(&x, 40).unwrap() - 1;
        let value = evaluate(&expr, &Bindings::new().with(&x, 3)).unwrap();
        assert!(matches!(value, Number::Integer(_)));
        assert_eq!(value.to_string(), "12157665459056928800");
    }

    #[test]
    fn division_produces_floats() {
        let x = Expr::variable("x").unwrap();
        let expr = 1 / &x;
        let value = evaluate(&expr, &Bindings::new().with(&x, 4)).unwrap();
        assert!(matches!(value, Number::Float(_)));
        assert_f64_near!(value.to_f64(), 0.25);
    }

    #[test]
    fn empty_nodes() {
        let bindings = Bindings::new();
        assert_eq!(evaluate(&Expr::Sum(vec![]), &bindings).unwrap(), 0);
        assert_eq!(evaluate(&Expr::Product(vec![]), &bindings).unwrap(), 1);
    }

    #[test]
    fn unbound_variable() {
        let x = Expr::variable("x").unwrap();
        let other_x = Expr::variable("x").unwrap();
        let err = evaluate(&(&x + 1), &Bindings::new().with(&other_x, 2)).unwrap_err();
        assert!(err.is::<UnboundVariable>());
        assert_eq!(err.src, "x");
    }

    #[test]
    fn undefined_power() {
        let x = Expr::variable("x").unwrap();
        let err = evaluate(&(1 / &x), &Bindings::new().with(&x, 0)).unwrap_err();
        assert!(err.is::<UndefinedPower>());
        assert_eq!(err.src, "0 ^ -1");
    }

    #[test]
    fn binding_sub_expressions() {
        let x = Expr::variable("x").unwrap();
        let y = Expr::variable("y").unwrap();
        let inner = &x + &y;
        let expr = 2 * &inner;

        // neither `x` nor `y` is bound, but their sum is
        let bindings = Bindings::new().with(&inner, 5);
        assert_eq!(evaluate(&expr, &bindings).unwrap(), 10);
    }

    #[test]
    fn rebinding_replaces() {
        let x = Expr::variable("x").unwrap();
        let mut bindings = Bindings::new().with(&x, 1);
        bindings.insert(&x, 2);
        assert_eq!(bindings.get(&x), Some(&Number::from(2)));
    }
}
