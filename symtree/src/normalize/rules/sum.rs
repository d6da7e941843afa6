//! Normalization rules for sums, including combining like terms.

use crate::expr::Expr;
use crate::number::Number;
use crate::normalize::{rules::{do_sum, flatten, fold_constants}, step::Step};
use crate::step_collector::StepCollector;

fn sum_terms(expr: &Expr) -> Option<&[Expr]> {
    match expr {
        Expr::Sum(terms) => Some(terms),
        _ => None,
    }
}

/// `a + (b + c) = a + b + c`
pub fn flatten_sum(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sum(expr, |terms| flatten(terms, sum_terms).map(Expr::Sum))?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `1 + x + 2 = 3 + x`
pub fn fold_sum_constants(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sum(expr, |terms| {
        fold_constants(terms, |a, b| a + b).map(|terms| Expr::Sum(terms).downgrade())
    })?;

    step_collector.push(Step::FoldConstants);
    Some(opt)
}

/// `0 + a = a`
/// `a + 0 = a`
pub fn add_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sum(expr, |terms| {
        let mut new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else if new_terms.is_empty() {
            Some(Expr::zero())
        } else if new_terms.len() == 1 {
            Some(new_terms.remove(0))
        } else {
            Some(Expr::Sum(new_terms))
        }
    })?;

    step_collector.push(Step::AddZero);
    Some(opt)
}

/// A sum of one term is that term, and the empty sum is `0`.
pub fn downgrade_sum(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sum(expr, |terms| {
        if terms.len() <= 1 {
            Some(Expr::Sum(terms.to_vec()).downgrade())
        } else {
            None
        }
    })?;

    step_collector.push(Step::Downgrade);
    Some(opt)
}

/// Splits a term into its numeric coefficient and the rest of the term.
///
/// - `3` -> `(3, 1)`
/// - `3 * x * y` -> `(3, x * y)`
/// - `x * 3` -> `(3, x)`
/// - `x` -> `(1, x)`
fn split_coefficient(term: &Expr) -> (Number, Expr) {
    match term {
        Expr::Constant(num) => (num.clone(), Expr::one()),
        Expr::Product(factors) => match factors.iter().position(Expr::is_constant) {
            Some(idx) => {
                let mut rest = factors.clone();
                let coefficient = rest.remove(idx).into_constant().unwrap_or_else(Number::one);
                (coefficient, Expr::Product(rest).downgrade())
            },
            None => (Number::one(), term.clone()),
        },
        _ => (Number::one(), term.clone()),
    }
}

/// Rebuilds a term from a coefficient and the rest of the term.
fn join_coefficient(coefficient: Number, rest: Expr) -> Expr {
    if coefficient.is_zero() {
        Expr::zero()
    } else if rest.is_one() {
        Expr::Constant(coefficient)
    } else if coefficient.is_one() {
        rest
    } else if let Expr::Product(factors) = rest {
        let mut new_factors = Vec::with_capacity(factors.len() + 1);
        new_factors.push(Expr::Constant(coefficient));
        new_factors.extend(factors);
        Expr::Product(new_factors)
    } else {
        Expr::Product(vec![Expr::Constant(coefficient), rest])
    }
}

/// Combines like terms.
///
/// `a + a = 2a`
/// `2a + 3a = 5a`
/// `2a + b - 2a = 0 + b`
///
/// The combined term takes the position of the first term it was made from. Terms are compared
/// by structural equality, so `x * y` and `y * x` are not combined.
pub fn combine_like_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sum(expr, |terms| {
        let mut split = terms.iter()
            .map(|term| {
                let (coefficient, rest) = split_coefficient(term);
                (coefficient, rest, term)
            })
            .collect::<Vec<_>>();
        let mut new_terms = Vec::with_capacity(terms.len());
        let mut changed = false;

        let mut current_idx = 0;
        while current_idx < split.len() {
            let mut coefficient = split[current_idx].0.clone();
            let mut combined = false;

            // look at every term after the current one
            let mut next_idx = current_idx + 1;
            while next_idx < split.len() {
                if split[next_idx].1 == split[current_idx].1 {
                    let (next_coefficient, _, _) = split.remove(next_idx);
                    coefficient = coefficient + next_coefficient;
                    combined = true;
                } else {
                    next_idx += 1;
                }
            }

            let (_, rest, term) = &split[current_idx];
            if combined {
                new_terms.push(join_coefficient(coefficient, rest.clone()));
                changed = true;
            } else {
                new_terms.push((*term).clone());
            }

            current_idx += 1;
        }

        changed.then(|| Expr::Sum(new_terms))
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all sum rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten_sum(expr, step_collector)
        .or_else(|| fold_sum_constants(expr, step_collector))
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| downgrade_sum(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn vars() -> (Expr, Expr) {
        (Expr::variable("x").unwrap(), Expr::variable("y").unwrap())
    }

    #[test]
    fn flatten_nested_sums() {
        let (x, y) = vars();
        let expr = 1 + (&x + &y);
        assert_eq!(
            flatten_sum(&expr, &mut ()),
            Some(Expr::Sum(vec![Expr::one(), x.clone(), y.clone()])),
        );
        assert_eq!(flatten_sum(&(&x + &y), &mut ()), None);
    }

    #[test]
    fn fold_into_single_constant() {
        let (x, _) = vars();
        assert_eq!(fold_sum_constants(&(Expr::one() + 2), &mut ()), Some(Expr::from(3)));
        assert_eq!(
            fold_sum_constants(&Expr::sum([x.clone(), Expr::from(2), Expr::from(-5)]), &mut ()),
            Some(Expr::Sum(vec![x.clone(), Expr::from(-3)])),
        );
        assert_eq!(fold_sum_constants(&(&x + 2), &mut ()), None);
    }

    #[test]
    fn drop_zero_terms() {
        let (x, y) = vars();
        let mut steps = Vec::new();
        assert_eq!(add_zero(&(&x + 0), &mut steps), Some(x.clone()));
        assert_eq!(steps, vec![Step::AddZero]);

        assert_eq!(
            add_zero(&Expr::sum([Expr::zero(), x.clone(), y.clone()]), &mut ()),
            Some(&x + &y),
        );
        assert_eq!(add_zero(&(Expr::zero() + 0), &mut ()), Some(Expr::zero()));
    }

    #[test]
    fn downgrade_trivial_sums() {
        let (x, _) = vars();
        assert_eq!(downgrade_sum(&Expr::Sum(vec![]), &mut ()), Some(Expr::zero()));
        assert_eq!(downgrade_sum(&Expr::Sum(vec![x.clone()]), &mut ()), Some(x.clone()));
        assert_eq!(downgrade_sum(&(&x + &x), &mut ()), None);
    }

    #[test]
    fn combine_coefficients() {
        let (x, _) = vars();
        // 2x + 3x = 5x
        let expr = 2 * &x + 3 * &x;
        assert_eq!(
            combine_like_terms(&expr, &mut ()),
            Some(Expr::Sum(vec![5 * &x])),
        );

        // x + x = 2x
        assert_eq!(
            combine_like_terms(&(&x + &x), &mut ()),
            Some(Expr::Sum(vec![2 * &x])),
        );
    }

    #[test]
    fn combine_keeps_order() {
        let (x, y) = vars();
        // y + x + 2y + x*y = 3y + x + x*y
        let expr = Expr::sum([y.clone(), x.clone(), 2 * &y, &x * &y]);
        assert_eq!(
            combine_like_terms(&expr, &mut ()),
            Some(Expr::sum([3 * &y, x.clone(), &x * &y])),
        );
    }

    #[test]
    fn combine_cancels_to_zero() {
        let (x, y) = vars();
        let expr = Expr::sum([2 * &x, y.clone(), Expr::Product(vec![Expr::from(-2), x.clone()])]);
        assert_eq!(
            combine_like_terms(&expr, &mut ()),
            Some(Expr::sum([Expr::zero(), y.clone()])),
        );
    }

    #[test]
    fn combine_multi_factor_rest() {
        let (x, y) = vars();
        // 2xy + xy = 3xy
        let xy = &x * &y;
        let expr = Expr::sum([Expr::product([Expr::from(2), x.clone(), y.clone()]), xy.clone()]);
        assert_eq!(
            combine_like_terms(&expr, &mut ()),
            Some(Expr::Sum(vec![Expr::product([Expr::from(3), x.clone(), y.clone()])])),
        );
    }

    #[test]
    fn nothing_to_combine() {
        let (x, y) = vars();
        assert_eq!(combine_like_terms(&(&x + &y), &mut ()), None);
        assert_eq!(combine_like_terms(&(&x * &y + &y * &x), &mut ()), None);
    }
}
