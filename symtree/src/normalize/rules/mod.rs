//! Implementation of the normalization rules.
//!
//! Each rule in this module is a function that takes the expression to normalize as an argument,
//! and returns `Some(expr)` with the rewritten expression if the rule applies, or `None` if the
//! rule does not apply. A rule that would return an expression identical to its input returns
//! `None` instead.

pub mod power;
pub mod product;
pub mod sum;

use crate::expr::Expr;
use crate::number::Number;
use crate::step_collector::StepCollector;
use super::step::Step;

/// If the expression is a sum, calls the given transformation function with the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_sum(expr: &Expr, f: impl Fn(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Sum(terms) = expr {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a product, calls the given transformation function with the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_product(expr: &Expr, f: impl Fn(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Product(factors) = expr {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a power, calls the given transformation function with the base and
/// exponent.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(expr: &Expr, f: impl Fn(&Expr, &Number) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Power(base, exponent) = expr {
        f(base, exponent)
    } else {
        None
    }
}

/// Collects the children of every nested node of the same kind into one list, keeping their
/// order. `unwrap` returns the children of a node if it is of the kind being flattened.
///
/// Returns `None` if there was nothing to flatten.
pub(crate) fn flatten(exprs: &[Expr], unwrap: impl Fn(&Expr) -> Option<&[Expr]>) -> Option<Vec<Expr>> {
    if !exprs.iter().any(|expr| unwrap(expr).is_some()) {
        return None;
    }

    let mut flat = Vec::with_capacity(exprs.len());
    for expr in exprs {
        match unwrap(expr) {
            Some(children) => flat.extend(children.iter().cloned()),
            None => flat.push(expr.clone()),
        }
    }
    Some(flat)
}

/// Folds every constant in the list into a single constant with `op`, placed at the position of
/// the first constant.
///
/// Returns `None` if there are fewer than two constants.
pub(crate) fn fold_constants(exprs: &[Expr], op: impl Fn(Number, Number) -> Number) -> Option<Vec<Expr>> {
    let first_idx = exprs.iter().position(Expr::is_constant)?;
    if exprs.iter().filter(|expr| expr.is_constant()).count() < 2 {
        return None;
    }

    let folded = exprs.iter()
        .filter_map(Expr::as_constant)
        .cloned()
        .reduce(op)?;

    let mut new_exprs = Vec::with_capacity(exprs.len());
    for (idx, expr) in exprs.iter().enumerate() {
        if idx == first_idx {
            new_exprs.push(Expr::Constant(folded.clone()));
        } else if !expr.is_constant() {
            new_exprs.push(expr.clone());
        }
    }
    Some(new_exprs)
}

/// Applies the core rules: flattening, constant folding, identity elimination and combining like
/// terms.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    sum::all(expr, step_collector)
        .or_else(|| product::all(expr, step_collector))
}

/// Applies the core rules, then the rules that combine like factors and rewrite powers.
///
/// These can change where an expression is defined: `x * x^-1` becomes `1`, which has a value at
/// `x = 0` where the original does not.
pub fn all_extended(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    all(expr, step_collector)
        .or_else(|| product::combine_like_factors(expr, step_collector))
        .or_else(|| power::all(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sum_terms(expr: &Expr) -> Option<&[Expr]> {
        match expr {
            Expr::Sum(terms) => Some(terms),
            _ => None,
        }
    }

    #[test]
    fn flatten_one_level() {
        let x = Expr::variable("x").unwrap();
        let y = Expr::variable("y").unwrap();
        let exprs = [Expr::one(), &x + &y, Expr::from(2)];
        assert_eq!(
            flatten(&exprs, sum_terms),
            Some(vec![Expr::one(), x.clone(), y.clone(), Expr::from(2)]),
        );
        assert_eq!(flatten(&[x, y], sum_terms), None);
    }

    #[test]
    fn fold_at_first_constant() {
        let x = Expr::variable("x").unwrap();
        let exprs = [x.clone(), Expr::from(2), x.clone(), Expr::from(5)];
        assert_eq!(
            fold_constants(&exprs, |a, b| a + b),
            Some(vec![x.clone(), Expr::from(7), x.clone()]),
        );
        assert_eq!(fold_constants(&[x.clone(), Expr::from(2)], |a, b| a + b), None);
    }
}
