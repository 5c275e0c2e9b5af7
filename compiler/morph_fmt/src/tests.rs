#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn fmt(source: &str) -> String {
    let out = morph_parse::parse(source);
    assert!(!out.has_errors(), "parse errors in {source:?}: {:?}", out.errors);
    format_program(&out.ast)
}

#[test]
fn keywords_are_lowercased() {
    assert_eq!(
        fmt("SET x = TRUE\nIF x :: Set y = NULL ELSE set y = False"),
        "set x = true\nwhen x :: set y = null else set y = false\n"
    );
}

#[test]
fn nested_operations_are_parenthesized() {
    assert_eq!(fmt("set x = 1 + 2 * 3"), "set x = 1 + (2 * 3)\n");
    assert_eq!(fmt("set x = -a * b"), "set x = (-a) * b\n");
    assert_eq!(fmt("set x = !(a || b)"), "set x = !(a || b)\n");
    assert_eq!(fmt("set x = (a + b).c"), "set x = (a + b).c\n");
}

#[test]
fn floats_stay_floats() {
    assert_eq!(fmt("set x = 1.0"), "set x = 1.0\n");
    assert_eq!(fmt("set x = .5"), "set x = 0.5\n");
    assert_eq!(fmt("set x = 0.0000001"), "set x = 0.0000001\n");
}

#[test]
fn strings_are_reescaped() {
    assert_eq!(
        fmt(r#"set x = "a\"b\\c\n\td""#),
        "set x = \"a\\\"b\\\\c\\n\\td\"\n"
    );
}

#[test]
fn paths_and_index_segments() {
    assert_eq!(fmt("set a.b.0 = x[i + 1]"), "set a.b[0] = x[i + 1]\n");
    assert_eq!(fmt("set @out = @in.mood"), "set @out = @in.mood\n");
}

#[test]
fn collections() {
    assert_eq!(
        fmt("set x = [1,2,  [ ] ,]"),
        "set x = [1, 2, []]\n"
    );
    assert_eq!(
        fmt("set x = {a:1, \"b c\": 2, null: {}}"),
        "set x = {a: 1, \"b c\": 2, null: {}}\n"
    );
}

#[test]
fn blocks_are_indented() {
    let source = "when a :: { set b = 1; when c :: { set d = 2 } } else { }";
    assert_eq!(
        fmt(source),
        "when a :: {\n    set b = 1\n    when c :: {\n        set d = 2\n    }\n} else {}\n"
    );
}

#[test]
fn arrow_bodies_follow_enclosing_indent() {
    let source =
        "{ set r = map(xs, e ~> { set return.key = \"p_\" + e.key; set return.value = e.value }) }";
    assert_eq!(
        fmt(source),
        concat!(
            "{\n",
            "    set r = map(xs, e ~> {\n",
            "        set return.key = \"p_\" + e.key\n",
            "        set return.value = e.value\n",
            "    })\n",
            "}\n",
        )
    );
}

#[test]
fn calls() {
    assert_eq!(
        fmt("drop()\nset t = std.parse_time(x, \"unix\")"),
        "drop()\nset t = std.parse_time(x, \"unix\")\n"
    );
}

#[test]
fn separator_before_expression_statements() {
    assert_eq!(fmt("set x = 1; -1"), "set x = 1;\n-1\n");
    assert_eq!(
        fmt("{ set x = 1; [2]; drop() }"),
        "{\n    set x = 1;\n    [2];\n    drop()\n}\n"
    );

    let once = fmt("set x = 1; (2)");
    let reparsed = morph_parse::parse(&once);
    assert!(!reparsed.has_errors());
    assert_eq!(reparsed.ast.root().len(), 2);
    assert_eq!(format_program(&reparsed.ast), once);
}

#[test]
fn empty_program() {
    assert_eq!(fmt(""), "");
    assert_eq!(fmt("// only a comment"), "");
}

#[test]
fn emitter_indents_by_width() {
    let mut out = StringEmitter::new();
    out.emit_indent(2);
    out.emit("x");
    out.emit_newline();
    out.emit_newline();
    out.ensure_trailing_newline();
    assert_eq!(out.output(), format!("{}x\n", " ".repeat(2 * INDENT_WIDTH)));
}

fn name() -> impl Strategy<Value = String> {
    "[a-z]{1,3}".prop_map(|s| format!("v_{s}"))
}

fn expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0i64..1000).prop_map(|v| v.to_string()),
        (0u32..1000, 1u32..100).prop_map(|(a, b)| format!("{a}.{b}")),
        "[a-z \\\\\"]{0,5}".prop_map(|s| {
            let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
            format!("\"{escaped}\"")
        }),
        Just("true".to_string()),
        Just("null".to_string()),
        name(),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        let op = prop_oneof![
            Just("+"),
            Just("-"),
            Just("*"),
            Just("/"),
            Just("%"),
            Just("=="),
            Just("!="),
            Just("<"),
            Just(">="),
            Just("&&"),
            Just("||"),
        ];
        prop_oneof![
            (inner.clone(), op, inner.clone()).prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            (inner.clone(), op_free()).prop_map(|(e, p)| format!("{p}({e})")),
            (name(), name()).prop_map(|(h, f)| format!("{h}.{f}")),
            (name(), inner.clone()).prop_map(|(h, i)| format!("{h}[{i}]")),
            prop::collection::vec(inner.clone(), 0..3).prop_map(|v| format!("[{}]", v.join(", "))),
            (name(), inner.clone()).prop_map(|(k, v)| format!("{{{k}: {v}}}")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("max({a}, {b})")),
            inner.prop_map(|body| format!("map(xs, e ~> {{ set return = {body} }})")),
        ]
    })
}

fn op_free() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("-"), Just("!"), Just("")]
}

fn stmt() -> impl Strategy<Value = String> {
    let set = (name(), expr()).prop_map(|(n, e)| format!("set {n} = {e}"));
    set.prop_recursive(3, 12, 3, |inner| {
        prop_oneof![
            (expr(), inner.clone()).prop_map(|(c, s)| format!("when {c} :: {s}")),
            (expr(), inner.clone(), inner.clone())
                .prop_map(|(c, s, e)| format!("if {c} :: {{ {s} }} else {e}")),
            prop::collection::vec(inner, 0..3).prop_map(|v| format!("{{ {} }}", v.join("; "))),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn formatting_is_idempotent(stmts in prop::collection::vec(stmt(), 1..4)) {
        let source = stmts.join("\n");
        let first = morph_parse::parse(&source);
        prop_assert!(!first.has_errors(), "{:?} in {}", first.errors, source);
        let once = format_program(&first.ast);

        let second = morph_parse::parse(&once);
        prop_assert!(!second.has_errors(), "{:?} in {}", second.errors, once);
        let twice = format_program(&second.ast);
        prop_assert_eq!(once, twice);
    }
}
