#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(expr) = exprprint::parse_tree(source) else {
        return;
    };

    let text = exprprint::render(&expr, 0);
    let doc = exprprint::render_markup(&expr, 0);
    let _ = exprprint::flatten(&doc);

    let json = exprprint::serialize_document(&doc);
    let _: serde_json::Value = serde_json::from_str(&json).expect("document JSON must be valid");

    if !contains_comparison(&expr) {
        assert_eq!(text, doc.plain_text());
    }
});

fn contains_comparison(expr: &exprprint::Expr) -> bool {
    use exprprint::Expr;
    match expr {
        Expr::Node(node) => {
            node.kind == exprprint::Kind::Comparison || node.args.iter().any(contains_comparison)
        }
        Expr::Quoted(inner) => contains_comparison(inner),
        Expr::Pair(first, second) => contains_comparison(first) || contains_comparison(second),
        Expr::Tuple(items) | Expr::List(items) => items.iter().any(contains_comparison),
        Expr::Mapping(entries) => entries
            .iter()
            .any(|(key, value)| contains_comparison(key) || contains_comparison(value)),
        _ => false,
    }
}
