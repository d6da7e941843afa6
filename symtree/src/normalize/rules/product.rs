//! Normalization rules for products, including combining like factors.

use crate::expr::Expr;
use crate::number::Number;
use crate::normalize::{rules::{do_product, flatten, fold_constants}, step::Step};
use crate::step_collector::StepCollector;

fn product_factors(expr: &Expr) -> Option<&[Expr]> {
    match expr {
        Expr::Product(factors) => Some(factors),
        _ => None,
    }
}

/// `a * (b * c) = a * b * c`
pub fn flatten_product(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_product(expr, |factors| flatten(factors, product_factors).map(Expr::Product))?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `2 * x * 3 = 6 * x`
pub fn fold_product_constants(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_product(expr, |factors| {
        fold_constants(factors, |a, b| a * b).map(|factors| Expr::Product(factors).downgrade())
    })?;

    step_collector.push(Step::FoldConstants);
    Some(opt)
}

/// `0 * a = 0`
/// `a * 0 = 0`
pub fn multiply_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_product(expr, |factors| {
        if factors.iter().any(Expr::is_zero) {
            Some(Expr::zero())
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1 * a = a`
/// `a * 1 = a`
pub fn multiply_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_product(expr, |factors| {
        let mut new_factors = factors.iter()
            .filter(|factor| !factor.is_one())
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else if new_factors.is_empty() {
            Some(Expr::one())
        } else if new_factors.len() == 1 {
            Some(new_factors.remove(0))
        } else {
            Some(Expr::Product(new_factors))
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// A product of one factor is that factor, and the empty product is `1`.
pub fn downgrade_product(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_product(expr, |factors| {
        if factors.len() <= 1 {
            Some(Expr::Product(factors.to_vec()).downgrade())
        } else {
            None
        }
    })?;

    step_collector.push(Step::Downgrade);
    Some(opt)
}

/// Extracts the base and exponent of a factor. If the factor is not a [`Expr::Power`], the
/// exponent is `1`.
///
/// - `a^b` -> `(a, b)`
/// - `a` -> `(a, 1)`
fn split_exponent(factor: &Expr) -> (&Expr, Number) {
    match factor {
        Expr::Power(base, exponent) => (&**base, exponent.clone()),
        factor => (factor, Number::one()),
    }
}

/// Combines like factors.
///
/// `a * a = a^2`
/// `a^2 * b * a^3 = a^5 * b`
/// `a * a^-1 = 1`
///
/// The combined factor takes the position of the first factor it was made from. Constants, and
/// powers of constants, are never combined.
pub fn combine_like_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_product(expr, |factors| {
        let mut split = factors.iter()
            .map(|factor| {
                let (base, exponent) = split_exponent(factor);
                (base, exponent, factor)
            })
            .collect::<Vec<_>>();
        let mut new_factors = Vec::with_capacity(factors.len());
        let mut changed = false;

        // this is O(n^2) worst case, due to scanning the whole vec for each factor
        let mut current_idx = 0;
        while current_idx < split.len() {
            let (base, mut exponent, factor) = split[current_idx].clone();
            if base.is_constant() {
                new_factors.push(factor.clone());
                current_idx += 1;
                continue;
            }

            let mut combined = false;
            let mut next_idx = current_idx + 1;
            while next_idx < split.len() {
                // bases must be structurally equal
                if split[next_idx].0 == base {
                    let (_, next_exponent, _) = split.remove(next_idx);
                    exponent = exponent + next_exponent;
                    combined = true;
                } else {
                    next_idx += 1;
                }
            }

            if combined {
                new_factors.push(if exponent.is_zero() {
                    Expr::one()
                } else if exponent.is_one() {
                    base.clone()
                } else {
                    Expr::Power(Box::new(base.clone()), exponent)
                });
                changed = true;
            } else {
                new_factors.push(factor.clone());
            }

            current_idx += 1;
        }

        changed.then(|| Expr::Product(new_factors))
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all product rules, except [`combine_like_factors`].
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten_product(expr, step_collector)
        .or_else(|| fold_product_constants(expr, step_collector))
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| downgrade_product(expr, step_collector))
}
