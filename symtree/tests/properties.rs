//! Property-based tests for normalization and differentiation.

use proptest::prelude::*;
use symtree::{evaluate, normalize, ops, Bindings, Expr, Number};

/// The shape of an expression, without any variables.
///
/// [`Expr`] holds its variables by identity, so the variables are created inside each test and
/// substituted into the shape with [`build`].
#[derive(Debug, Clone)]
enum Shape {
    Const(i64),
    Var(usize),
    Sum(Vec<Shape>),
    Product(Vec<Shape>),
    Power(Box<Shape>, u32),
}

// Strategy for generating small expression shapes, at most three levels deep
fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        (-5i64..=5).prop_map(Shape::Const),
        (0usize..2).prop_map(Shape::Var),
    ];

    leaf.prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..=3).prop_map(Shape::Sum),
            proptest::collection::vec(inner.clone(), 0..=3).prop_map(Shape::Product),
            (inner, 0u32..4).prop_map(|(base, exp)| Shape::Power(Box::new(base), exp)),
        ]
    })
}

/// Builds the expression with the given shape. Products are built without the smart
/// constructor, so they may contain zeros.
fn build(shape: &Shape, vars: &[Expr]) -> Expr {
    match shape {
        Shape::Const(n) => Expr::from(*n),
        Shape::Var(idx) => vars[idx % vars.len()].clone(),
        Shape::Sum(terms) => Expr::Sum(terms.iter().map(|term| build(term, vars)).collect()),
        Shape::Product(factors) => {
            Expr::Product(factors.iter().map(|factor| build(factor, vars)).collect())
        },
        Shape::Power(base, exp) => Expr::Power(Box::new(build(base, vars)), Number::from(*exp)),
    }
}

fn vars() -> [Expr; 2] {
    [ops::variable("x").unwrap(), ops::variable("y").unwrap()]
}

proptest! {
    #[test]
    fn add_zero_is_identity(s in shape()) {
        let vars = vars();
        let e = build(&s, &vars);
        prop_assert_eq!(normalize(&ops::add(&e, 0)), normalize(&e));
    }

    #[test]
    fn multiply_one_is_identity(s in shape()) {
        let vars = vars();
        let e = build(&s, &vars);
        prop_assert_eq!(normalize(&ops::multiply(&e, 1)), normalize(&e));
    }

    #[test]
    fn multiply_zero_collapses(s in shape()) {
        let vars = vars();
        let e = build(&s, &vars);
        prop_assert_eq!(ops::multiply(&e, 0), Expr::zero());
        prop_assert_eq!(ops::multiply(0, &e), Expr::zero());
    }

    #[test]
    fn normalize_is_idempotent(s in shape()) {
        let vars = vars();
        let once = normalize(&build(&s, &vars));
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_preserves_value(s in shape()) {
        let vars = vars();
        let e = build(&s, &vars);
        let bindings = Bindings::new().with(&vars[0], 2).with(&vars[1], -3);
        prop_assert_eq!(
            evaluate(&e, &bindings).unwrap(),
            evaluate(&normalize(&e), &bindings).unwrap(),
        );
    }

    #[test]
    fn normalized_derivative_preserves_value(s in shape()) {
        let vars = vars();
        let derivative = build(&s, &vars).partial(&vars[0]);
        let bindings = Bindings::new().with(&vars[0], 2).with(&vars[1], -3);
        prop_assert_eq!(
            evaluate(&derivative, &bindings).unwrap(),
            evaluate(&normalize(&derivative), &bindings).unwrap(),
        );
    }

    #[test]
    fn derivative_of_unrelated_expression_is_zero(s in shape()) {
        let [x, y] = vars();

        // every variable in the shape is `y`
        let e = build(&s, &[y]);
        prop_assert_eq!(normalize(&e.partial(&x)), Expr::zero());
    }
}
