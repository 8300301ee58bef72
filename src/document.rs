use std::borrow::Cow;

use crate::tag::Tag;

/// Tag-annotated rendering produced by the markup renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    /// Literal text, emitted as-is.
    Text(String),
    /// A unit labeled with a selector such as `.constant.number` or
    /// `div#main.foo`.
    Tagged {
        tag: Cow<'static, str>,
        children: Vec<Document>,
    },
    /// Ordered, untagged grouping.
    Run(Vec<Document>),
}

impl Document {
    pub fn text(value: impl Into<String>) -> Document {
        Document::Text(value.into())
    }

    pub fn tagged(tag: Tag, children: Vec<Document>) -> Document {
        Document::Tagged {
            tag: Cow::Borrowed(tag.selector()),
            children,
        }
    }

    pub fn tagged_text(tag: Tag, value: impl Into<String>) -> Document {
        Document::tagged(tag, vec![Document::text(value)])
    }

    pub fn with_selector(selector: impl Into<Cow<'static, str>>, children: Vec<Document>) -> Document {
        Document::Tagged {
            tag: selector.into(),
            children,
        }
    }

    /// Visible text with every tag stripped.
    pub fn plain_text(&self) -> String {
        let mut output = String::new();
        self.write_plain_text(&mut output);
        output
    }

    fn write_plain_text(&self, output: &mut String) {
        match self {
            Document::Text(value) => output.push_str(value),
            Document::Tagged { children, .. } | Document::Run(children) => {
                for child in children {
                    child.write_plain_text(output);
                }
            }
        }
    }

    /// Selector of a tagged unit.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Document::Tagged { tag, .. } => Some(tag.as_ref()),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Document] {
        match self {
            Document::Text(_) => &[],
            Document::Tagged { children, .. } | Document::Run(children) => children,
        }
    }
}

/// Element name, id and classes decoded from a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector<'a> {
    pub element: &'a str,
    pub id: Option<&'a str>,
    pub classes: Vec<&'a str>,
}

impl<'a> Selector<'a> {
    /// Parse `name#id.class1.class2`. The element defaults to `span`; the
    /// first `#id` wins.
    pub fn parse(selector: &'a str) -> Selector<'a> {
        let head_end = selector.find(['#', '.']).unwrap_or(selector.len());
        let element = match &selector[..head_end] {
            "" => "span",
            name => name,
        };

        let mut id = None;
        let mut classes = Vec::new();
        let mut rest = &selector[head_end..];
        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let segment = &body[..end];
            if !segment.is_empty() {
                match marker {
                    '#' if id.is_none() => id = Some(segment),
                    '.' => classes.push(segment),
                    _ => {}
                }
            }
            rest = &body[end..];
        }

        Selector {
            element,
            id,
            classes,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Entity-escape `& < > "` in text fragments. Off by default: text is
    /// emitted exactly as rendered.
    pub escape_text: bool,
}

/// Serialize a document into a markup string.
pub fn flatten(doc: &Document) -> String {
    flatten_with_options(doc, &FlattenOptions::default())
}

pub fn flatten_with_options(doc: &Document, options: &FlattenOptions) -> String {
    let mut output = String::new();
    write_document(doc, &mut output, options);
    output
}

fn write_document(doc: &Document, output: &mut String, options: &FlattenOptions) {
    match doc {
        Document::Text(value) => {
            if options.escape_text {
                output.push_str(&escape_text(value));
            } else {
                output.push_str(value);
            }
        }

        Document::Run(children) => {
            for child in children {
                write_document(child, output, options);
            }
        }

        Document::Tagged { tag, children } => {
            let mut inner = String::new();
            for child in children {
                write_document(child, &mut inner, options);
            }
            // Purely structural units with nothing inside leave no trace.
            if inner.is_empty() {
                return;
            }

            let selector = Selector::parse(tag);
            output.push('<');
            output.push_str(selector.element);
            if let Some(id) = selector.id {
                output.push_str(" id=\"");
                output.push_str(id);
                output.push('"');
            }
            if !selector.classes.is_empty() {
                output.push_str(" class=\"");
                output.push_str(&selector.classes.join(" "));
                output.push('"');
            }
            output.push('>');
            output.push_str(&inner);
            output.push_str("</");
            output.push_str(selector.element);
            output.push('>');
        }
    }
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
