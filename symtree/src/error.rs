//! Kinds of errors that can occur while building or evaluating expressions.

use ariadne::Fmt;
use symtree_attrs::ErrorKind;
use symtree_error::{ErrorKind, EXPR};

/// A constant was built from a value that is not a finite number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a number", self.value),
    labels = ["this value"],
    help = "constants must be finite integers or decimal numbers",
)]
pub struct NotANumber {
    /// The rejected value, as text.
    pub value: String,
}

/// A variable was given a name that is not an identifier.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a valid variable name", self.name),
    labels = ["this name"],
    help = format!(
        "variable names start with a letter or `_`, followed by letters, digits, `_` or `'`, such as {}",
        "x_1".fg(EXPR),
    ),
)]
pub struct InvalidName {
    /// The rejected name.
    pub name: String,
}

/// A power was built with an exponent that is not a constant.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "exponents must be constants",
    labels = ["this base".to_string(), format!("this exponent is `{}`", self.exponent)],
    help = "symbolic exponents are not supported; use a number instead",
)]
pub struct UnsupportedExponent {
    /// The rendering of the rejected exponent.
    pub exponent: String,
}

/// Integer power was requested with an exponent that is not an integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "only integer powers are allowed here",
    labels = ["this base".to_string(), format!("`{}` is not an integer", self.exponent)],
    help = format!("to raise to any constant power, use {} instead", "power".fg(EXPR)),
)]
pub struct InvalidExponent {
    /// The rendering of the rejected exponent.
    pub exponent: String,
}

/// A variable was evaluated without a value bound to it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has no value", self.name),
    labels = ["this variable"],
    help = "bind a value to every variable in the expression before evaluating it",
)]
pub struct UnboundVariable {
    /// The name of the variable.
    pub name: String,
}

/// A power evaluated to a value that is not a finite real number, such as `0 ^ -1`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "this power is undefined",
    labels = [format!("base evaluated to `{}`", self.base), format!("exponent is `{}`", self.exponent)],
)]
pub struct UndefinedPower {
    /// The value of the base.
    pub base: String,

    /// The exponent.
    pub exponent: String,
}

#[cfg(test)]
mod tests {
    use crate::expr::Expr;
    use crate::number::ToNumber;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn messages() {
        let err = "1.2.3".to_number().unwrap_err();
        assert_eq!(err.to_string(), "`1.2.3` is not a number");

        let err = Expr::variable("2x").unwrap_err();
        assert!(err.is::<InvalidName>());
        assert_eq!(err.to_string(), "`2x` is not a valid variable name");

        let err = Expr::powi(Expr::variable("x").unwrap(), 0.5).unwrap_err();
        assert_eq!(err.downcast_ref::<InvalidExponent>().map(|k| k.exponent.as_str()), Some("0.5"));
    }

    #[test]
    fn report_points_at_exponent() {
        let x = Expr::variable("x").unwrap();
        let n = Expr::variable("n").unwrap();
        let err = Expr::power(&x, &n).unwrap_err();
        let report = strip_ansi_escapes::strip_str(err.report_to_string());
        assert!(report.contains("exponents must be constants"));
        assert!(report.contains("this exponent is `n`"));
    }
}
