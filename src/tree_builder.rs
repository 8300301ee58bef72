use serde::Deserialize;

use crate::ast::Expr;
use crate::document::{Document, Selector};

/// Write a JSON-escaped string
fn write_json_string(output: &mut String, s: &str) {
    output.push('"');
    for c in s.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\u{00}'..='\u{1f}' => {
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            _ => output.push(c),
        }
    }
    output.push('"');
}

#[derive(Default)]
pub struct SerializeOptions {
    /// Also emit the decoded element, id and classes of each tagged unit.
    pub include_selector: bool,
}

/// Serialize a document as a nested JSON tree.
pub fn serialize_document(doc: &Document) -> String {
    serialize_document_with_options(doc, &SerializeOptions::default())
}

pub fn serialize_document_with_options(doc: &Document, options: &SerializeOptions) -> String {
    let mut output = String::new();
    serialize_node(doc, &mut output, options);
    output
}

fn serialize_node(doc: &Document, output: &mut String, options: &SerializeOptions) {
    output.push('{');
    match doc {
        Document::Text(value) => {
            output.push_str("\"type\":\"text\",\"value\":");
            write_json_string(output, value);
        }

        Document::Tagged { tag, children } => {
            output.push_str("\"type\":\"tagged\",\"tag\":");
            write_json_string(output, tag);

            if options.include_selector {
                let selector = Selector::parse(tag);
                output.push_str(",\"element\":");
                write_json_string(output, selector.element);
                if let Some(id) = selector.id {
                    output.push_str(",\"id\":");
                    write_json_string(output, id);
                }
                output.push_str(",\"classes\":[");
                for (i, class) in selector.classes.iter().enumerate() {
                    if i > 0 {
                        output.push(',');
                    }
                    write_json_string(output, class);
                }
                output.push(']');
            }

            serialize_children(children, output, options);
        }

        Document::Run(children) => {
            output.push_str("\"type\":\"run\"");
            serialize_children(children, output, options);
        }
    }
    output.push('}');
}

fn serialize_children(children: &[Document], output: &mut String, options: &SerializeOptions) {
    output.push_str(",\"children\":[");
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        serialize_node(child, output, options);
    }
    output.push(']');
}

/// Serialize an expression tree to JSON, node kinds spelled by head name.
pub fn serialize_tree(expr: &Expr) -> serde_json::Result<String> {
    serde_json::to_string(expr)
}

/// Read an expression tree handed over as JSON by an external parser.
///
/// Nesting depth is not capped; the stack grows on demand while reading.
pub fn parse_tree(json: &str) -> serde_json::Result<Expr> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let expr = Expr::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(expr)
}
