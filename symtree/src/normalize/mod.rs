//! Module to normalize expressions.
//!
//! This module provides the [`normalize`] function, which rewrites an expression into a reduced
//! form. It works bottom-up: the children of a node are normalized first, then the rewriting
//! rules in [`rules`] are applied to the node until none of them apply. Such a pass over the whole
//! tree is repeated until it changes nothing (see [`NormalizeOptions`]).
//!
//! The rules flatten nested sums and products, fold constants, remove identity elements, and
//! combine like terms:
//!
//! ```
//! use symtree::{normalize, ops::{add, multiply, variable}};
//!
//! let x = variable("x").unwrap();
//!
//! // 2x + 3x = 5x
//! let expr = add(multiply(2, &x), multiply(3, &x));
//! assert_eq!(normalize(&expr), multiply(5, &x));
//!
//! // like factors are left alone
//! assert_eq!(normalize(&multiply(&x, &x)), multiply(&x, &x));
//! ```
//!
//! Setting [`NormalizeOptions::extended_rules`] also combines like factors and rewrites powers:
//!
//! ```
//! use symtree::{normalize_with, NormalizeOptions, ops::{multiply, power, variable}};
//!
//! let x = variable("x").unwrap();
//! let options = NormalizeOptions { extended_rules: true, ..Default::default() };
//!
//! assert_eq!(normalize_with(&multiply(&x, &x), &options), power(&x, 2).unwrap());
//! ```
//!
//! Normalization never looks past the order of terms when comparing them, so `x * y` and `y * x`
//! are considered different. The result is a reduced form, not a canonical one.

pub mod rules;
pub mod step;

use crate::expr::Expr;
use crate::step_collector::StepCollector;
use log::{debug, trace, warn};
use step::Step;

/// Options that control [`normalize_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// If true, bottom-up passes are repeated until a pass changes nothing. If false, a single
    /// pass is run.
    pub fixpoint: bool,

    /// The maximum number of passes to run when [`NormalizeOptions::fixpoint`] is set.
    pub max_passes: usize,

    /// If true, like factors are combined (`x * x = x^2`) and powers are rewritten (`x^1 = x`,
    /// `x^0 = 1`, `2^3 = 8`, `(x^2)^3 = x^6`) in addition to the core rules.
    ///
    /// Off by default, since combining `x * x^-1` into `1` defines the result at `x = 0`.
    pub extended_rules: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            fixpoint: true,
            max_passes: 64,
            extended_rules: false,
        }
    }
}

/// A set of rules to apply at each node, such as [`rules::all`].
type RuleSet = fn(&Expr, &mut dyn StepCollector<Step>) -> Option<Expr>;

/// Runs a single bottom-up pass over the expression. Returns the normalized expression, and
/// whether anything changed.
fn normalize_pass(
    expr: &Expr,
    rules: RuleSet,
    step_collector: &mut dyn StepCollector<Step>,
) -> (Expr, bool) {
    let mut changed = false;

    // normalize the children first
    let mut expr = match expr {
        Expr::Constant(_) | Expr::Variable(_) => expr.clone(),
        Expr::Sum(terms) => {
            let mut new_terms = Vec::with_capacity(terms.len());
            for term in terms {
                let (term, term_changed) = normalize_pass(term, rules, step_collector);
                new_terms.push(term);
                changed |= term_changed;
            }
            Expr::Sum(new_terms)
        },
        Expr::Product(factors) => {
            let mut new_factors = Vec::with_capacity(factors.len());
            for factor in factors {
                let (factor, factor_changed) = normalize_pass(factor, rules, step_collector);
                new_factors.push(factor);
                changed |= factor_changed;
            }
            Expr::Product(new_factors)
        },
        Expr::Power(base, exponent) => {
            let (base, base_changed) = normalize_pass(base, rules, step_collector);
            changed |= base_changed;
            Expr::Power(Box::new(base), exponent.clone())
        },
    };

    // then apply rules to this node until none apply
    while let Some(new_expr) = rules(&expr, step_collector) {
        trace!("rewrote `{}` to `{}`", expr, new_expr);
        expr = new_expr;
        changed = true;
    }

    (expr, changed)
}

/// Base implementation of the normalization algorithm.
fn inner_normalize(
    expr: &Expr,
    options: &NormalizeOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let rules: RuleSet = if options.extended_rules {
        rules::all_extended
    } else {
        rules::all
    };

    let (mut expr, mut changed) = normalize_pass(expr, rules, step_collector);
    let mut passes = 1;

    while options.fixpoint && changed {
        if passes >= options.max_passes {
            warn!("stopped normalizing after {} passes without reaching a fixpoint", passes);
            break;
        }

        (expr, changed) = normalize_pass(&expr, rules, step_collector);
        passes += 1;
    }

    debug!("normalized to `{}` in {} pass(es)", expr, passes);
    expr
}

/// Normalizes the given expression with the default options.
pub fn normalize(expr: &Expr) -> Expr {
    inner_normalize(expr, &NormalizeOptions::default(), &mut ())
}

/// Normalizes the given expression with the given options.
pub fn normalize_with(expr: &Expr, options: &NormalizeOptions) -> Expr {
    inner_normalize(expr, options, &mut ())
}

/// Normalizes the given expression with the default options. The steps taken by the normalizer
/// are also collected and returned, in the order they were applied.
pub fn normalize_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = inner_normalize(expr, &NormalizeOptions::default(), &mut steps);
    (expr, steps)
}
