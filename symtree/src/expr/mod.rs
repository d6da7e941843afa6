//! The immutable expression tree.
//!
//! An [`Expr`] is a closed variant over five kinds of node: [`Expr::Constant`],
//! [`Expr::Variable`], [`Expr::Sum`], [`Expr::Product`] and [`Expr::Power`]. Nodes are never
//! mutated after they are built; every operation in this crate produces a new tree.
//!
//! # Smart construction
//!
//! Building a product through [`Expr::product`] (or anything built on it, such as the `*`
//! operator, [`ops::multiply`](crate::ops::multiply), [`ops::negate`](crate::ops::negate) and
//! [`ops::divide`](crate::ops::divide)) collapses the product to the constant `0` if any factor is
//! the constant `0`. Powers can only be raised to constants: [`Power`](Expr::Power) stores its
//! exponent as a [`Number`], and [`Expr::power`] rejects any other exponent with
//! [`UnsupportedExponent`].
//!
//! # Structural equality
//!
//! The [`PartialEq`] implementation for [`Expr`] implements **structural** equality, not semantic
//! equality. Two expressions are structurally equal if:
//!
//! - Both are [`Expr::Constant`]s with numerically equal values.
//! - Both are [`Expr::Variable`]s with the same identity (see [`Variable`]).
//! - Both are [`Expr::Sum`]s (or both [`Expr::Product`]s) with pairwise equal terms / factors, in
//! the **same order**.
//! - Both are [`Expr::Power`]s with equal bases and equal exponents.
//!
//! This means that `x + y` and `y + x` are **not** structurally equal. Only the normalizer's like
//! term combination ever looks past the position of a term.

mod iter;

use crate::error::{InvalidExponent, InvalidName, UnsupportedExponent};
use crate::number::{Number, ToNumber};
use iter::ExprIter;
use rug::Integer;
use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, Div, Mul, Neg, Sub},
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};
use symtree_error::Error;

/// Source of variable identities.
static NEXT_VARIABLE_ID: AtomicU64 = AtomicU64::new(0);

/// Returns true if the given name is a textual identifier: a letter or `_`, followed by any
/// number of letters, digits, `_` or `'`.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '\'')
        },
        _ => false,
    }
}

/// A named variable with a unique identity.
///
/// Every call to [`Variable::new`] creates a new identity, even if the name was used before. Two
/// variables are equal only if they share an identity, which is the case for a variable and its
/// clones. Several independent variables can therefore share a display name; to refer to "the
/// same" variable, reuse the value you created.
///
/// ```
/// use symtree::Variable;
///
/// let x = Variable::new("x").unwrap();
/// assert_eq!(x, x.clone());
/// assert_ne!(x, Variable::new("x").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Variable {
    id: u64,
    name: Rc<str>,
}

impl Variable {
    /// Creates a new variable with the given name and a fresh identity.
    ///
    /// Returns [`InvalidName`] if the name is not an identifier.
    pub fn new(name: &str) -> Result<Self, Error> {
        if !is_identifier(name) {
            return Err(Error::spanning(name, InvalidName { name: name.to_string() }));
        }

        Ok(Self {
            id: NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed),
            name: Rc::from(name),
        })
    }

    /// The display name of the variable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The identity of the variable.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A symbolic arithmetic expression.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone)]
pub enum Expr {
    /// A numeric constant, such as `2` or `0.5`.
    Constant(Number),

    /// A variable, such as `x`.
    Variable(Variable),

    /// Multiple terms added together.
    Sum(Vec<Expr>),

    /// Multiple factors multiplied together.
    Product(Vec<Expr>),

    /// An expression raised to a constant power.
    Power(Box<Expr>, Number),
}

/// Renders the expression fully parenthesized: sums as `( a + b )`, products as `( a * b )` and
/// powers as `base ^ exponent`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(num) => write!(f, "{}", num),
            Self::Variable(var) => write!(f, "{}", var),
            Self::Sum(terms) => {
                write!(f, "( ")?;
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    write!(f, "{}", term)?;
                    for term in iter {
                        write!(f, " + {}", term)?;
                    }
                }
                write!(f, " )")
            },
            Self::Product(factors) => {
                write!(f, "( ")?;
                let mut iter = factors.iter();
                if let Some(factor) = iter.next() {
                    write!(f, "{}", factor)?;
                    for factor in iter {
                        write!(f, " * {}", factor)?;
                    }
                }
                write!(f, " )")
            },
            // `^` reads right-associative, so a nested power needs parentheses
            Self::Power(base, exp) if matches!(**base, Self::Power(..)) => {
                write!(f, "( {} ) ^ {}", base, exp)
            },
            Self::Power(base, exp) => write!(f, "{} ^ {}", base, exp),
        }
    }
}

/// Builds the source text and spans used to report a rejected `base ^ exponent`.
pub(crate) fn power_error_src(
    base: &dyn fmt::Display,
    exponent: &dyn fmt::Display,
) -> (String, Vec<std::ops::Range<usize>>) {
    let base = base.to_string();
    let src = format!("{} ^ {}", base, exponent);
    let spans = vec![0..base.len(), base.len() + 3..src.len()];
    (src, spans)
}

impl Expr {
    /// Creates a constant from any number-like value.
    ///
    /// Returns [`NotANumber`](crate::error::NotANumber) if the value is not a finite number.
    pub fn constant(value: impl ToNumber) -> Result<Self, Error> {
        value.to_number().map(Self::Constant)
    }

    /// Creates a new variable with a fresh identity.
    ///
    /// Returns [`InvalidName`] if the name is not an identifier.
    pub fn variable(name: &str) -> Result<Self, Error> {
        Variable::new(name).map(Self::Variable)
    }

    /// The constant `0`.
    pub fn zero() -> Self {
        Self::Constant(Number::zero())
    }

    /// The constant `1`.
    pub fn one() -> Self {
        Self::Constant(Number::one())
    }

    /// The constant `-1`.
    pub fn neg_one() -> Self {
        Self::Constant(Number::from(-1))
    }

    /// Creates a sum of the given terms. No flattening or simplification is done.
    pub fn sum<I, E>(terms: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Self::Sum(terms.into_iter().map(Into::into).collect())
    }

    /// Creates a product of the given factors.
    ///
    /// If any factor is the constant `0`, the product collapses to the constant `0`. No other
    /// simplification is done.
    pub fn product<I, E>(factors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        let mut collected = Vec::new();
        for factor in factors {
            let factor = factor.into();
            if factor.is_zero() {
                return Self::zero();
            }
            collected.push(factor);
        }
        Self::Product(collected)
    }

    /// Raises `base` to the power of `exponent`.
    ///
    /// The exponent must be a constant after promotion; otherwise [`UnsupportedExponent`] is
    /// returned.
    pub fn power(base: impl Into<Expr>, exponent: impl Into<Expr>) -> Result<Self, Error> {
        let base = base.into();
        let exponent: Expr = exponent.into();
        match exponent {
            Self::Constant(exp) => Ok(Self::Power(Box::new(base), exp)),
            exponent => {
                let (src, spans) = power_error_src(&base, &exponent);
                Err(Error::new(src, spans, UnsupportedExponent { exponent: exponent.to_string() }))
            },
        }
    }

    /// Raises `base` to an integer power.
    ///
    /// Returns [`NotANumber`](crate::error::NotANumber) if `exponent` is not a number, and
    /// [`InvalidExponent`] if it is a number with a fractional part.
    pub fn powi(base: impl Into<Expr>, exponent: impl ToNumber) -> Result<Self, Error> {
        let base = base.into();
        let exponent = exponent.to_number()?;
        if !exponent.is_integral() {
            let (src, spans) = power_error_src(&base, &exponent);
            return Err(Error::new(src, spans, InvalidExponent { exponent: exponent.to_string() }));
        }

        Ok(Self::Power(Box::new(base), exponent))
    }

    /// If the expression is a [`Expr::Constant`], returns a reference to the contained number.
    pub fn as_constant(&self) -> Option<&Number> {
        match self {
            Self::Constant(num) => Some(num),
            _ => None,
        }
    }

    /// If the expression is a [`Expr::Constant`], returns the contained number.
    pub fn into_constant(self) -> Option<Number> {
        match self {
            Self::Constant(num) => Some(num),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Expr::Constant`].
    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }

    /// Returns true if the expression is the constant `0`.
    pub fn is_zero(&self) -> bool {
        self.as_constant().map(Number::is_zero).unwrap_or(false)
    }

    /// Returns true if the expression is the constant `1`.
    pub fn is_one(&self) -> bool {
        self.as_constant().map(Number::is_one).unwrap_or(false)
    }

    /// If the expression is a [`Expr::Variable`], returns a reference to the contained variable.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(var) => Some(var),
            _ => None,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`Expr::Sum`] with zero / one term, or an
    /// [`Expr::Product`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the constant 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Sum(mut terms) => {
                if terms.is_empty() {
                    Self::zero()
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Sum(terms)
                }
            },
            Self::Product(mut factors) => {
                if factors.is_empty() {
                    Self::one()
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Product(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the distinct variables in the expression, in order of first appearance.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut vars: Vec<&Variable> = Vec::new();
        for var in self.post_order_iter().filter_map(Expr::as_variable) {
            if !vars.contains(&var) {
                vars.push(var);
            }
        }
        vars
    }

    /// Returns the number of nodes in the expression.
    pub fn node_count(&self) -> usize {
        self.post_order_iter().count()
    }

    /// Computes the partial derivative of this expression with respect to `wrt`. See
    /// [`partial`](crate::derivative::partial).
    pub fn partial(&self, wrt: &Expr) -> Expr {
        crate::derivative::partial(self, wrt)
    }

    /// Normalizes this expression with the default options. See
    /// [`normalize`](crate::normalize::normalize).
    pub fn normalize(&self) -> Expr {
        crate::normalize::normalize(self)
    }
}

/// Checks if two expressions are **structurally** equal.
///
/// For more information about structural equality, see the [module-level documentation](self).
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Constant(lhs), Self::Constant(rhs)) => lhs == rhs,
            (Self::Variable(lhs), Self::Variable(rhs)) => lhs == rhs,
            (Self::Sum(lhs), Self::Sum(rhs)) | (Self::Product(lhs), Self::Product(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().zip(rhs).all(|(lhs, rhs)| lhs == rhs)
            },
            (Self::Power(lhs_base, lhs_exp), Self::Power(rhs_base, rhs_exp)) => {
                lhs_exp == rhs_exp && lhs_base == rhs_base
            },
            _ => false,
        }
    }
}

impl Eq for Expr {}

impl PartialEq<i32> for Expr {
    fn eq(&self, other: &i32) -> bool {
        self.as_constant().map(|num| num == other).unwrap_or(false)
    }
}

impl PartialEq<i64> for Expr {
    fn eq(&self, other: &i64) -> bool {
        self.as_constant().map(|num| num == other).unwrap_or(false)
    }
}

impl PartialEq<Number> for Expr {
    fn eq(&self, other: &Number) -> bool {
        self.as_constant().map(|num| num == other).unwrap_or(false)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Expr {
                fn from(n: $ty) -> Self {
                    Self::Constant(Number::from(n))
                }
            }
        )*
    };
}

impl_from_int!(i32, i64, u32, u64, usize, Integer);

impl From<Number> for Expr {
    fn from(num: Number) -> Self {
        Self::Constant(num)
    }
}

impl From<Variable> for Expr {
    fn from(var: Variable) -> Self {
        Self::Variable(var)
    }
}

impl From<&Variable> for Expr {
    fn from(var: &Variable) -> Self {
        Self::Variable(var.clone())
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}

impl TryFrom<f64> for Expr {
    type Error = Error;

    fn try_from(n: f64) -> Result<Self, Self::Error> {
        Number::try_from(n).map(Self::Constant)
    }
}

/// Implements a binary operator for [`Expr`] and `&Expr` with any right-hand side that converts
/// into an [`Expr`], and for the primitive integers with an [`Expr`] right-hand side.
macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $func:path) => {
        impl<T: Into<Expr>> $trait<T> for Expr {
            type Output = Expr;

            fn $method(self, rhs: T) -> Expr {
                $func(self, rhs)
            }
        }

        impl<T: Into<Expr>> $trait<T> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: T) -> Expr {
                $func(self.clone(), rhs)
            }
        }

        impl_binary_op!(@prim $trait, $method, $func, i32, i64);
    };
    (@prim $trait:ident, $method:ident, $func:path, $($ty:ty),*) => {
        $(
            impl $trait<Expr> for $ty {
                type Output = Expr;

                fn $method(self, rhs: Expr) -> Expr {
                    $func(self, rhs)
                }
            }

            impl $trait<&Expr> for $ty {
                type Output = Expr;

                fn $method(self, rhs: &Expr) -> Expr {
                    $func(self, rhs.clone())
                }
            }
        )*
    };
}

impl_binary_op!(Add, add, crate::ops::add);
impl_binary_op!(Sub, sub, crate::ops::subtract);
impl_binary_op!(Mul, mul, crate::ops::multiply);
impl_binary_op!(Div, div, crate::ops::divide);

/// Multiplies this expression by -1. No simplification is done, so `-x` is `( -1 * x )`.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        crate::ops::negate(self)
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        crate::ops::negate(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::error::{InvalidExponent, InvalidName, NotANumber, UnsupportedExponent};

    fn x() -> Expr {
        Expr::variable("x").unwrap()
    }

    #[test]
    fn constant_equality() {
        assert_eq!(Expr::from(1), Expr::from(1));
        assert_eq!(Expr::from(1), 1);
        assert_ne!(Expr::from(1), Expr::from(2));
        assert_eq!(Expr::from(2), Expr::try_from(2.0).unwrap());
    }

    #[test]
    fn variable_identity() {
        let x = x();
        assert_eq!(x, x);
        assert_eq!(x, x.clone());
        assert_ne!(x, Expr::variable("x").unwrap());
    }

    #[test]
    fn sum_and_product_equality() {
        let x = x();
        let y = Expr::variable("y").unwrap();
        assert_eq!(&x + &y, &x + &y);
        assert_ne!(&x + 0, &x + 1);
        assert_eq!(&x * &y, &x * &y);
        assert_ne!(&x * 1, &x * 2);

        // position matters, and sums are never products
        assert_ne!(&x + &y, &y + &x);
        assert_ne!(Expr::sum([&x, &y]), Expr::product([&x, &y]));
    }

    #[test]
    fn power_equality() {
        let x = x();
        assert_eq!(Expr::power(&x, 2).unwrap(), Expr::power(&x, 2).unwrap());
        assert_ne!(Expr::power(&x, 2).unwrap(), Expr::power(&x, 3).unwrap());
    }

    #[test]
    fn product_absorbs_zero() {
        let x = x();
        assert_eq!(&x * 0, Expr::zero());
        assert_eq!(0 * &x, Expr::zero());
        assert_eq!(Expr::product([x.clone(), Expr::from(3), Expr::zero(), x]), Expr::zero());
    }

    #[test]
    fn operators_do_not_flatten() {
        let x = x();
        let y = Expr::variable("y").unwrap();
        let z = Expr::variable("z").unwrap();
        assert_eq!(
            &x + &y + &z,
            Expr::Sum(vec![Expr::Sum(vec![x.clone(), y.clone()]), z.clone()]),
        );
        assert_eq!(
            &x - &y,
            Expr::Sum(vec![x.clone(), Expr::Product(vec![Expr::neg_one(), y.clone()])]),
        );
        assert_eq!(
            &x / &y,
            Expr::Product(vec![x, Expr::Power(Box::new(y), Number::from(-1))]),
        );
    }

    #[test]
    fn non_constant_exponent() {
        let x = x();
        let n = Expr::variable("n").unwrap();
        let err = Expr::power(&x, &n).unwrap_err();
        assert!(err.is::<UnsupportedExponent>());
        assert_eq!(err.src, "x ^ n");
        assert_eq!(err.spans, vec![0..1, 4..5]);
    }

    #[test]
    fn integer_power_sugar() {
        let x = x();
        assert_eq!(Expr::powi(&x, 3).unwrap(), Expr::power(&x, 3).unwrap());
        assert_eq!(Expr::powi(&x, 2.0).unwrap(), Expr::power(&x, 2).unwrap());
        assert!(Expr::powi(&x, 2.5).unwrap_err().is::<InvalidExponent>());
        assert!(Expr::powi(&x, "two").unwrap_err().is::<NotANumber>());
    }

    #[test]
    fn construction_errors() {
        assert!(Expr::constant("not a number").unwrap_err().is::<NotANumber>());
        assert!(Expr::constant(f64::NAN).unwrap_err().is::<NotANumber>());
        assert_eq!(Expr::constant("12").unwrap(), 12);

        for name in ["", "1x", "x y", "+"] {
            assert!(Expr::variable(name).unwrap_err().is::<InvalidName>(), "{name:?}");
        }
        for name in ["x", "theta_1", "_tmp", "x'", "θ"] {
            assert!(Expr::variable(name).is_ok(), "{name:?}");
        }
    }

    #[test]
    fn fmt_expr() {
        let x = x();
        let y = Expr::variable("y").unwrap();
        let expr = Expr::sum([
            Expr::product([Expr::from(2), x.clone()]),
            Expr::power(&y, 3).unwrap(),
            Expr::from(-1),
        ]);
        assert_eq!(expr.to_string(), "( ( 2 * x ) + y ^ 3 + -1 )");
        assert_eq!((&x / 2).to_string(), "( x * 2 ^ -1 )");
        assert_eq!(Expr::try_from(0.5).unwrap().to_string(), "0.5");
    }

    #[test]
    fn fmt_nested_power() {
        let x = x();
        let expr = Expr::power(Expr::power(&x, 2).unwrap(), 3).unwrap();
        assert_eq!(expr.to_string(), "( x ^ 2 ) ^ 3");

        let sum = Expr::power(&x + 1, 2).unwrap();
        assert_eq!(sum.to_string(), "( x + 1 ) ^ 2");
    }

    #[test]
    fn distinct_variables() {
        let x = x();
        let y = Expr::variable("y").unwrap();
        let other_x = Expr::variable("x").unwrap();
        let expr = &x * &y + &x + &other_x;
        let names = expr.variables().into_iter().map(Variable::name).collect::<Vec<_>>();
        assert_eq!(names, vec!["x", "y", "x"]);
        assert_eq!(expr.node_count(), 7);
    }
}
