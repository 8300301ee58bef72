use exprprint::tree_builder::{SerializeOptions, serialize_document_with_options};
use exprprint::{Expr, Kind, parse_tree, render, render_markup, serialize_document};

const GEOMETRY: &str = include_str!("fixtures/geometry.json");

#[test]
fn renders_tree_read_from_json() {
    let expr = parse_tree(GEOMETRY).unwrap();
    assert_eq!(
        "module Geometry\n\
         \x20 export area\n\
         \n\
         \x20 function area(r::Float64)\n\
         \x20   if <(r, 0)\n\
         \x20     throw(DomainError(r))\n\
         \x20   end\n\
         \x20   *(pi, ^(r, 2))\n\
         \x20 end\n\
         end",
        render(&expr, 0)
    );
}

#[test]
fn operators_in_fixture_are_classified() {
    let expr = parse_tree(GEOMETRY).unwrap();
    let json = serialize_document(&render_markup(&expr, 0));
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!("run", parsed["type"]);
    assert!(json.contains(r#"{"type":"tagged","tag":".operator.comparison","children":[{"type":"text","value":"<"}]}"#));
    assert!(json.contains(r#"{"type":"tagged","tag":".operator.arithmetic","children":[{"type":"text","value":"^"}]}"#));
    assert!(json.contains(r#"{"type":"tagged","tag":".variable.type","children":[{"type":"text","value":"Float64"}]}"#));
}

#[test]
fn unknown_head_from_json_renders_sentinel() {
    let expr = parse_tree(r#"{"node":{"kind":"weird","args":[{"symbol":"x"}]}}"#).unwrap();
    assert_eq!(Some(&Kind::Unknown("weird".to_string())), expr.kind());
    assert_eq!("ERROR: could not print Expr(:weird, :x) :ERROR", render(&expr, 0));
}

#[test]
fn document_json_is_valid() {
    let expr = Expr::Mapping(vec![(Expr::string("quote\"d"), Expr::Char('\n'))]);
    let options = SerializeOptions {
        include_selector: true,
    };
    let json = serialize_document_with_options(&render_markup(&expr, 2), &options);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let root = parsed.as_object().unwrap();
    assert!(root.contains_key("type"));
    assert!(root.contains_key("children"));
    let dict = &parsed["children"][1];
    assert_eq!("span", dict["element"]);
    assert_eq!(serde_json::json!(["collection", "dict"]), dict["classes"]);
}
