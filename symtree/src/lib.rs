//! Immutable symbolic expression trees.
//!
//! Expressions are built from constants and variables with the functions in [`ops`], or with the
//! arithmetic operators implemented on [`Expr`]. Once built, an expression can be
//! differentiated with [`partial`], reduced with [`normalize`], and evaluated with [`evaluate`].
//!
//! ```
//! use symtree::{evaluate, normalize, normalize_with, ops::{power, variable}, Bindings, NormalizeOptions};
//!
//! let x = variable("x").unwrap();
//! let y = variable("y").unwrap();
//!
//! // f(x, y) = x^2 * y + 3x
//! let f = power(&x, 2).unwrap() * &y + 3 * &x;
//! assert_eq!(f.to_string(), "( ( x ^ 2 * y ) + ( 3 * x ) )");
//!
//! // df/dx = 2xy + 3
//! let df = normalize(&f.partial(&x));
//! assert_eq!(df.to_string(), "( ( 2 * x ^ 1 * y ) + 3 )");
//!
//! // the extended rules also rewrite powers
//! let options = NormalizeOptions { extended_rules: true, ..Default::default() };
//! assert_eq!(normalize_with(&f.partial(&x), &options).to_string(), "( ( 2 * x * y ) + 3 )");
//!
//! let bindings = Bindings::new().with(&x, 2).with(&y, 5);
//! assert_eq!(evaluate(&df, &bindings).unwrap(), 23);
//! ```
//!
//! # Features
//!
//! This crate has no optional features. It emits diagnostic records through the [`log`] facade,
//! mostly from the normalizer; install any logger to see them.

pub mod derivative;
pub mod error;
pub mod eval;
pub mod expr;
pub mod normalize;
pub mod number;
pub mod ops;
pub mod primitive;
pub mod step_collector;

pub use derivative::partial;
pub use eval::{evaluate, Bindings};
pub use expr::{Expr, Variable};
pub use normalize::{normalize, normalize_with, normalize_with_steps, NormalizeOptions};
pub use number::{Number, ToNumber};
pub use step_collector::StepCollector;
pub use symtree_error::Error;
