use algex_expr::{canon::Record, Environment, Expr, Latex};
use algex_parser::parse;
use assert_float_eq::assert_float_absolute_eq;
use pretty_assertions::assert_eq;

/// Sources that are already in the form the renderer produces.
const RENDERED: [&str; 12] = [
    "2+3*4",
    "(2+3)*4",
    "a-(b-c)",
    "a-b-c",
    "[x+1]^2",
    "f(a,b)+g()",
    "-x*y",
    "2*-3",
    "a v 3",
    "x=y,z",
    "a/b*c",
    "max(k_1,(a,b))*X",
];

#[test]
fn arithmetic() {
    let env = Environment::new();
    assert_float_absolute_eq!(parse("2+3*4").unwrap().to_double(&env), 14.0);
    assert_float_absolute_eq!(parse("(2+3)*4").unwrap().to_double(&env), 20.0);
    assert_float_absolute_eq!(parse("2^3^2").unwrap().to_double(&env), 64.0);
    assert_float_absolute_eq!(parse("27 v 3").unwrap().to_double(&env), 3.0);
    assert_float_absolute_eq!(parse("-8 v 3").unwrap().to_double(&env), -2.0);
    assert_float_absolute_eq!(parse("12/2*3").unwrap().to_double(&env), 2.0);
}

#[test]
fn bound_symbols() {
    let mut env = Environment::new();
    let mut expr = parse("b*x").unwrap();
    assert_eq!(expr.let_("b", 2, &mut env), 1);
    assert_eq!(expr.let_("x", 5, &mut env), 1);
    assert_float_absolute_eq!(expr.to_double(&env), 10.0);

    // the rendering keeps the names
    assert_eq!(expr.to_string(), "b*x");

    // other expressions resolve the names through the environment
    assert_float_absolute_eq!(parse("x-b").unwrap().to_double(&env), 3.0);
}

#[test]
fn tex() {
    assert_eq!(parse("x^2").unwrap().to_tex(), "{x}^{2}");
    assert_eq!(parse("a v 2").unwrap().to_tex(), "\\sqrt{a}");
    assert_eq!(parse("a v 3").unwrap().to_tex(), "\\sqrt[3]{a}");
    assert_eq!(parse("(a+1)/2").unwrap().to_tex(), "\\frac{a+1}{2}");
}

#[test]
fn rendering_round_trip() {
    for source in RENDERED {
        let expr = parse(source).unwrap();
        assert_eq!(expr.to_string(), source);
        assert_eq!(parse(&expr.to_string()).unwrap(), expr, "{}", source);
    }
}

#[test]
fn spacing_is_not_preserved() {
    let expr = parse(" 2 + f( a , b ) ").unwrap();
    assert_eq!(expr.to_string(), "2+f(a,b)");
}

#[test]
fn converting_leaves_no_unbound_occurrence() {
    let mut env = Environment::new();
    let mut expr = parse("x+x*y-sin(x)").unwrap();
    expr.let_("x", 3, &mut env);

    let converted = expr.converting(&env);
    assert!(!converted.contains_name("x"));
    assert!(converted.contains_name("y"));
    assert_eq!(converted.to_string(), "3+3*y-sin(3)");

    // the original keeps its symbols
    assert_eq!(expr.to_string(), "x+x*y-sin(x)");
}

#[test]
fn compute_is_idempotent() {
    let env = Environment::with_constants();
    for source in ["(a+2)*3", "2*3+a*4", "f(1+1, y)", "pi*r^2", "[x=2+2]"] {
        let once = parse(source).unwrap().compute(&env);
        assert_eq!(once.compute(&env), once, "{}", source);
    }
}

#[test]
fn make_unique_preserves_everything() {
    let mut env = Environment::new();
    env.add_var("a", 3);
    env.add_var("X", 4);

    for source in RENDERED.iter().chain(&["a*X+a*X", "[a v 2]^(a v 2)"]) {
        let expr = parse(source).unwrap();
        let formula = expr.make_unique().unwrap();

        assert_eq!(formula.to_string(), expr.to_string());
        assert_eq!(formula.to_tex(), expr.to_tex());
        assert_eq!(formula.to_double(&env).to_bits(), expr.to_double(&env).to_bits(), "{}", source);
    }
}

#[test]
fn duplicate_products_share_a_node() {
    let formula = parse("a*x+a*x").unwrap().make_unique().unwrap();

    // a, x, a*x, a*x+a*x
    assert_eq!(formula.zone().len(), 4);
    let root = formula.zone().get(formula.root()).unwrap();
    let [lhs, rhs] = root.children() else {
        panic!("expected a binary root, found {:?}", root);
    };
    assert_eq!(lhs, rhs);

    let product = Expr::product(vec![Expr::symbol("a"), Expr::symbol("x")]);
    let sum = Expr::sum(vec![product.clone(), product]);
    let formula = sum.make_unique().unwrap();
    let Some(Record::Nary(_, children)) = formula.zone().get(formula.root()) else {
        panic!("expected an n-ary root");
    };
    assert_eq!(children[0], children[1]);
}

#[test]
fn binding_a_formula_binds_every_occurrence() {
    let mut env = Environment::new();
    let mut formula = parse("(k+1)*(k+1)").unwrap().make_unique().unwrap();
    formula.let_("k", 2, &mut env).unwrap();

    assert_float_absolute_eq!(formula.to_double(&()), 9.0);
    assert_eq!(formula.to_string(), "(k+1)*(k+1)");
}

#[test]
fn chained_formula_bindings() {
    let mut env = Environment::new();
    let mut formula = parse("a+x").unwrap().make_unique().unwrap();
    formula.let_("a", 2, &mut env).unwrap();
    formula.let_("x", parse("a*3").unwrap(), &mut env).unwrap();

    let mut tree = parse("a+x").unwrap();
    tree.let_("a", 2, &mut env);
    tree.let_("x", parse("a*3").unwrap(), &mut env);

    assert_float_absolute_eq!(formula.to_double(&env), 8.0);
    assert_float_absolute_eq!(tree.to_double(&env), 8.0);
}

#[test]
fn self_referencing_binding_survives_make_unique() {
    let mut env = Environment::new();
    let mut expr = parse("x*2").unwrap();
    expr.let_("x", parse("x+1").unwrap(), &mut env);

    let formula = expr.make_unique().unwrap();
    assert_eq!(formula.compute(&env), expr.compute(&env));
    assert_eq!(formula.compute(&env).to_string(), "(x+1)*2");
    assert_eq!(formula.to_string(), "x*2");
}
