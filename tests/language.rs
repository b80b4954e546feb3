use curio::error::{ParseError, RuntimeError};
use curio::interpreter::evaluator::core::Context;
use curio::interpreter::lexer::{Token, tokenize};
use curio::interpreter::parser::core::parse_program;
use curio::run;

fn assert_renders(src: &str, expected: &str) {
    match run(src) {
        Ok(Some(value)) => assert_eq!(value, expected, "Script: {src}"),
        Ok(None) => panic!("Script produced no value: {src}"),
        Err(e) => panic!("Script failed: {e}\nScript: {src}"),
    }
}

fn runtime_error(src: &str) -> RuntimeError {
    match run(src) {
        Err(e) => match e.downcast_ref::<RuntimeError>() {
            Some(err) => err.clone(),
            None => panic!("Expected a runtime error, got: {e}"),
        },
        Ok(_) => panic!("Script succeeded but was expected to fail: {src}"),
    }
}

fn parse_error(src: &str) -> ParseError {
    match run(src) {
        Err(e) => match e.downcast_ref::<ParseError>() {
            Some(err) => err.clone(),
            None => panic!("Expected a parse error, got: {e}"),
        },
        Ok(_) => panic!("Script succeeded but was expected to fail: {src}"),
    }
}

const RATIONAL: &str = r#"
class Rational(x: Int, y: Int) {
    require(y != 0)
    private def gcd(a: Int, b: Int): Int = if (b == 0) a else gcd(b, a % b)
    private val g = gcd(if (x < 0) -x else x, if (y < 0) -y else y)
    val numer = x / g
    val denom = y / g
    def add(that: Rational) = new Rational(numer * that.denom + that.numer * denom, denom * that.denom)
    def < (that: Rational) = numer * that.denom < that.numer * denom
    def unary_- = new Rational(-numer, denom)
    def toString = "" + numer + "/" + denom
}
"#;

fn rational(expr: &str) -> String {
    format!("{RATIONAL}\n{expr}")
}

#[test]
fn literals_and_arithmetic() {
    assert_renders("42", "42");
    assert_renders("1 + 2 * 3", "7");
    assert_renders("2 * 3 + 1", "7");
    assert_renders("(1 + 2) * 3", "9");
    assert_renders("10 - 2 - 3", "5");
    assert_renders("7 % 3", "1");
    assert_renders("1 + 2.5", "3.5");
    assert_renders("7 / 2.0", "3.5");
    assert_renders("-5", "-5");
    assert_renders("-2 * 3", "-6");
}

#[test]
fn comparisons_and_logic() {
    assert_renders("1 + 2 == 3 && 2 < 3", "true");
    assert_renders("2 <= 1 || 3 > 2", "true");
    assert_renders("\"abc\" < \"abd\"", "true");
    assert_renders("1 != 2", "true");
    assert_renders("!false", "true");
    assert_renders("true & false", "false");
    assert_renders("true | false", "true");
}

#[test]
fn logical_operators_short_circuit() {
    // The right operand would fail if it were ever evaluated.
    assert_renders("false && missing(1)", "false");
    assert_renders("true || missing(1)", "true");
}

#[test]
fn string_concatenation() {
    assert_renders("\"foo\" + 1", "foo1");
    assert_renders("1 + \"bar\"", "1bar");
    assert_renders("\"a\" + true + 1.5", "atrue1.5");
}

#[test]
fn value_definitions_and_statements() {
    assert_renders("val x = 1\nval y = 2\nx + y", "3");
    assert_renders("val x = 2 + 3; x * x", "25");
    assert!(run("val x = 1").unwrap().is_none());
}

#[test]
fn conditionals_evaluate_one_branch() {
    assert_renders("if (1 < 2) 10 else 20", "10");
    // The untaken branch may reference unbound names freely.
    assert_renders("if (true) 1 else missing", "1");
    assert_renders("if (false) missing else 2", "2");
}

#[test]
fn conditionals_require_else_and_boolean() {
    parse_error("if (true) 1");
    assert!(matches!(
        runtime_error("if (1) 2 else 3"),
        RuntimeError::TypeError { .. }
    ));
}

#[test]
fn blocks_scope_their_definitions() {
    assert_renders("val x = 1\nval y = { val x = 10; x + 1 }\ny + x", "12");
    assert_renders("{ def twice(n: Int) = 2 * n; twice(21) }", "42");
    assert!(matches!(
        parse_error("{ val x = 1 }"),
        ParseError::BlockWithoutResult { .. }
    ));
}

#[test]
fn anonymous_functions_and_closures() {
    assert_renders("val inc = x => x + 1\ninc(41)", "42");
    assert_renders("val mul = (a: Int, b: Int) => a * b\nmul(6, 7)", "42");
    assert_renders("def makeAdder(n: Int) = (m: Int) => n + m\nval add5 = makeAdder(5)\nadd5(37)", "42");
    // A lambda captures its defining scope, not the call site.
    assert_renders("val n = 10\ndef apply(f: Int => Int) = { val n = 99; f(1) }\napply(x => x + n)", "11");
}

#[test]
fn curried_definitions() {
    assert_renders("def mul(a: Int)(b: Int): Int = a * b\nmul(3)(4)", "12");
    // Partial application yields the next function in the chain.
    assert_renders("def mul(a: Int)(b: Int): Int = a * b\nmul(3)", "<function>");
    assert_renders(
        "def mul(a: Int)(b: Int): Int = a * b\nval nested = (a: Int) => (b: Int) => a * b\nmul(3)(4) - nested(3)(4)",
        "0",
    );
}

#[test]
fn sum_of_cubes() {
    assert_renders(
        "def sum(f: Int => Int)(a: Int, b: Int): Int = if (a > b) 0 else f(a) + sum(f)(a + 1, b)\nsum(x => x * x * x)(1, 10)",
        "3025",
    );
    // Fully curried, applied one list at a time.
    assert_renders(
        "def sum(f: Int => Int)(a: Int)(b: Int): Int = if (a > b) 0 else f(a) + sum(f)(a + 1)(b)\nsum(x => x * x * x)(1)(10)",
        "3025",
    );
}

#[test]
fn application_is_strict_per_parameter_list() {
    let err = runtime_error("def mul(a: Int)(b: Int): Int = a * b\nmul(3, 4)");
    assert!(matches!(
        err,
        RuntimeError::ArityMismatch {
            expected: 1,
            found: 2,
            ..
        }
    ));
}

#[test]
fn named_functions_recurse() {
    assert_renders(
        "def fact(n: Int): Int = if (n == 0) 1 else n * fact(n - 1)\nfact(10)",
        "3628800",
    );
}

#[test]
fn recursion_depth_is_limited() {
    let err = runtime_error("def loop(n: Int): Int = loop(n + 1)\nloop(0)");
    assert!(matches!(err, RuntimeError::RecursionLimit { .. }));
}

#[test]
fn accessor_recursion_is_limited() {
    // A parameterless member evaluates on every reference, so a
    // self-referential accessor must hit the depth limit, not the stack.
    let err = runtime_error("class B(x: Int) { def loop: Int = loop }\nB(1).loop");
    assert!(matches!(err, RuntimeError::RecursionLimit { .. }));
}

#[test]
fn guards_that_construct_are_limited() {
    let err = runtime_error("class A(x: Int) { require(new A(x) < new A(x)) }\nnew A(1)");
    assert!(matches!(err, RuntimeError::RecursionLimit { .. }));
}

#[test]
fn self_referential_rendering_is_limited() {
    let err = runtime_error("class R(x: Int) { def toString = this }\nnew R(1)");
    assert!(matches!(err, RuntimeError::RecursionLimit { .. }));
}

#[test]
fn rational_class_works() {
    assert_renders(&rational("new Rational(1, 2)"), "1/2");
    assert_renders(&rational("new Rational(1, 2).add(new Rational(1, 3))"), "5/6");
    assert_renders(&rational("new Rational(1, 2) < new Rational(2, 3)"), "true");
    assert_renders(&rational("-new Rational(1, 2)"), "-1/2");
    assert_renders(&rational("new Rational(4, 8)"), "1/2");
}

#[test]
fn construction_guards() {
    let err = runtime_error(&rational("new Rational(1, 0)"));
    assert!(matches!(err, RuntimeError::RequireFailed { .. }));
}

#[test]
fn bare_construction_matches_new() {
    assert_renders(&rational("Rational(1, 2)"), "1/2");
    assert_renders(&rational("Rational(1, 2).add(Rational(1, 3))"), "5/6");
    // A local binding shadows the class name.
    assert_renders(&rational("val Rational = (a: Int, b: Int) => a + b\nRational(1, 2)"), "3");
}

#[test]
fn private_members_are_sealed() {
    assert!(matches!(
        runtime_error(&rational("new Rational(1, 2).g")),
        RuntimeError::PrivateMember { .. }
    ));
    assert!(matches!(
        runtime_error(&rational("new Rational(1, 2).gcd(4, 6)")),
        RuntimeError::PrivateMember { .. }
    ));
}

#[test]
fn member_body_errors_are_not_masked() {
    // A failure inside an implicitly referenced member keeps its own error.
    let err = runtime_error("class C(x: Int) { val v = this.nope\nval w = v }\nC(1).w");
    assert!(matches!(err, RuntimeError::UnknownMember { name, .. } if name == "nope"));
}

#[test]
fn member_errors() {
    assert!(matches!(
        runtime_error(&rational("new Rational(1, 2).missing")),
        RuntimeError::UnknownMember { .. }
    ));
    // Constructor parameters are not members.
    assert!(matches!(
        runtime_error(&rational("new Rational(1, 2).x")),
        RuntimeError::UnknownMember { .. }
    ));
    assert!(matches!(
        runtime_error("new Nope(1)"),
        RuntimeError::UnknownClass { .. }
    ));
    assert!(matches!(
        runtime_error(&rational("new Rational(1)")),
        RuntimeError::ArityMismatch { .. }
    ));
}

#[test]
fn alphabetic_infix_dispatches_to_members() {
    let src = "class Box(v: Int) {\n    val value = v\n    def max(that: Box) = if (value < that.value) that else this\n}\nBox(1) max Box(2)";
    assert_renders(src, "Box(2)");
}

#[test]
fn objects_without_tostring_render_their_fields() {
    assert_renders("class Pair(a: Int, b: Int) { val first = a }\nnew Pair(1, 2)", "Pair(1, 2)");
}

#[test]
fn classes_are_visible_before_their_definition() {
    assert_renders(
        "val r = Pair(1, 2)\nclass Pair(a: Int, b: Int) { val first = a }\nr.first",
        "1",
    );
}

#[test]
fn class_lifecycle_errors() {
    assert!(matches!(
        runtime_error("class A(x: Int) { val v = x }\nclass A(y: Int) { val v = y }\n1"),
        RuntimeError::DuplicateClass { .. }
    ));
    assert!(matches!(
        parse_error("val x = { class C(n: Int) { val v = n }\n1 }"),
        ParseError::ClassNotTopLevel { .. }
    ));
}

#[test]
fn runtime_failures() {
    assert!(matches!(
        runtime_error("missing + 1"),
        RuntimeError::UnboundIdentifier { .. }
    ));
    assert!(matches!(
        runtime_error("1 / 0"),
        RuntimeError::DivisionByZero { .. }
    ));
    assert!(matches!(
        runtime_error("9223372036854775807 + 1"),
        RuntimeError::Overflow { .. }
    ));
    assert!(matches!(runtime_error("1(2)"), RuntimeError::NotCallable { .. }));
}

#[test]
fn operator_suffixed_identifiers_lex_as_one_token() {
    let tokens = tokenize("unary_-").unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0].0, Token::Identifier(s) if s == "unary_-"));

    let tokens = tokenize("x_=").unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0].0, Token::Identifier(s) if s == "x_="));

    // Whitespace keeps the pieces apart.
    let tokens = tokenize("x_ - 1").unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(matches!(&tokens[1].0, Token::Operator(s) if s == "-"));
}

#[test]
fn classes_cannot_register_after_the_first_run() {
    let program = |src: &str| parse_program(&tokenize(src).unwrap()).unwrap();

    let mut context = Context::new();
    context
        .run(&program("class A(x: Int) { val v = x }\n1"))
        .unwrap();

    let err = context
        .run(&program("class B(y: Int) { val v = y }\n1"))
        .unwrap_err();
    assert!(matches!(err, RuntimeError::RegistryFrozen { .. }));
}

#[test]
fn lexing_failures() {
    assert!(matches!(
        parse_error("\"unterminated"),
        ParseError::UnterminatedString { .. }
    ));
    assert!(matches!(
        parse_error("99999999999999999999"),
        ParseError::InvalidLiteral { .. }
    ));
}

#[test]
fn operator_precedence_shapes_the_tree() {
    use curio::ast::{Expr, Statement};

    let tokens = tokenize("a + b * c").unwrap();
    let statements = parse_program(&tokens).unwrap();
    let [Statement::Expression { expr, .. }] = statements.as_slice() else {
        panic!("Expected a single expression statement");
    };

    // a + (b * c)
    let Expr::Infix { op, right, .. } = expr else {
        panic!("Expected an infix expression, got {expr:?}");
    };
    assert_eq!(op, "+");
    assert!(matches!(&**right, Expr::Infix { op, .. } if op == "*"));
}

#[test]
fn colon_operators_group_to_the_right() {
    use curio::ast::{Expr, Statement};

    let tokens = tokenize("a +: b +: c").unwrap();
    let statements = parse_program(&tokens).unwrap();
    let [Statement::Expression { expr, .. }] = statements.as_slice() else {
        panic!("Expected a single expression statement");
    };

    // a +: (b +: c)
    let Expr::Infix { op, left, right, .. } = expr else {
        panic!("Expected an infix expression, got {expr:?}");
    };
    assert_eq!(op, "+:");
    assert!(matches!(&**left, Expr::Ident { name, .. } if name == "a"));
    assert!(matches!(&**right, Expr::Infix { op, .. } if op == "+:"));
}

#[test]
fn comments_are_ignored() {
    assert_renders("// leading comment\nval x = 1 // trailing\n/* block\n comment */\nx + 1", "2");
}
