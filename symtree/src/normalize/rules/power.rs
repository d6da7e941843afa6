//! Normalization rules for power expressions.

use crate::expr::Expr;
use crate::normalize::{rules::do_power, step::Step};
use crate::step_collector::StepCollector;

/// `a^0 = 1`
///
/// `0^0` is defined as `1` by this rule, though it may be undefined in other mathematical
/// contexts.
pub fn power_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |_, exponent| {
        if exponent.is_zero() {
            Some(Expr::one())
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exponent| {
        if exponent.is_one() {
            Some(base.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// Folds powers of constants whose value can be represented exactly.
///
/// `2^3 = 8`
/// `0.5^2 = 0.25`
///
/// `2^-1` is left as is, since it has no exact integer value.
pub fn fold_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exponent| {
        base.as_constant()?
            .exact_pow(exponent)
            .map(Expr::Constant)
    })?;

    step_collector.push(Step::FoldPower);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`
///
/// Only applies if both `b` and `c` are integers; `(x^2)^0.5` is `|x|`, not `x`.
pub fn power_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, outer| {
        if let Expr::Power(base, inner) = base {
            if inner.is_integral() && outer.is_integral() {
                return Some(Expr::Power(base.clone(), inner.clone() * outer.clone()));
            }
        }

        None
    })?;

    step_collector.push(Step::PowerPower);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    power_one(expr, step_collector)
        .or_else(|| power_zero(expr, step_collector))
        .or_else(|| fold_power(expr, step_collector))
        .or_else(|| power_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_f64_near;
    use crate::number::Number;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn trivial_exponents() {
        let x = Expr::variable("x").unwrap();
        let mut steps = Vec::new();
        assert_eq!(power_one(&Expr::power(&x, 1).unwrap(), &mut steps), Some(x.clone()));
        assert_eq!(power_zero(&Expr::power(&x, 0).unwrap(), &mut steps), Some(Expr::one()));
        assert_eq!(steps, vec![Step::PowerOne, Step::PowerZero]);

        // 0^0 = 1
        assert_eq!(all(&Expr::power(0, 0).unwrap(), &mut ()), Some(Expr::one()));
    }

    #[test]
    fn fold_exact_powers() {
        assert_eq!(fold_power(&Expr::power(2, 3).unwrap(), &mut ()), Some(Expr::from(8)));
        assert_eq!(fold_power(&Expr::power(-3, 2).unwrap(), &mut ()), Some(Expr::from(9)));
        assert_eq!(fold_power(&Expr::power(2, -1).unwrap(), &mut ()), None);
        assert_eq!(fold_power(&Expr::power(0, -1).unwrap(), &mut ()), None);

        let half = Expr::try_from(0.5).unwrap();
        let quarter = fold_power(&Expr::powi(half, 2).unwrap(), &mut ()).unwrap();
        assert_f64_near!(quarter.as_constant().unwrap().to_f64(), 0.25);
    }

    #[test]
    fn nested_integer_powers() {
        let x = Expr::variable("x").unwrap();
        let expr = Expr::power(Expr::power(&x, 2).unwrap(), 3).unwrap();
        assert_eq!(power_power(&expr, &mut ()), Some(Expr::power(&x, 6).unwrap()));

        let half = Number::try_from(0.5).unwrap();
        let root = Expr::power(Expr::power(&x, 2).unwrap(), half).unwrap();
        assert_eq!(power_power(&root, &mut ()), None);
    }
}
