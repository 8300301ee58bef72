use crate::ast::*;
use crate::document::Document;
use crate::error::RenderError;
use crate::indent::{Indent, RenderOptions};
use crate::render::{
    Entry, RED_ZONE, STACK_GROWTH, module_parts, needs_logical_parens, split_parameters,
};
use crate::tag::{Tag, classify_symbol, kind_tag};

/// Render an expression tree as a tagged document.
///
/// Layout follows [`crate::render::render`] line for line; the document only
/// adds highlighting tags around the same text. Comparison chains are the one
/// exception: they are not parenthesized here.
pub fn render_markup(expr: &Expr, level: usize) -> Document {
    render_markup_with_options(expr, level, &RenderOptions::default())
}

pub fn render_markup_with_options(expr: &Expr, level: usize, options: &RenderOptions) -> Document {
    let ctx = MarkupContext {
        indent: Indent::from(options),
        level,
        depth: 0,
        max_depth: options.max_depth,
    };
    Document::Run(vec![
        Document::text(ctx.indent.prefix(level)),
        markup_expr(expr, &ctx),
    ])
}

#[derive(Clone, Copy)]
struct MarkupContext {
    indent: Indent,
    level: usize,
    depth: usize,
    max_depth: usize,
}

impl MarkupContext {
    fn nested(&self) -> MarkupContext {
        MarkupContext {
            level: self.level + 1,
            ..*self
        }
    }

    /// Line break followed by whitespace for `level + delta`.
    fn newline(&self, parts: &mut Vec<Document>, delta: isize) {
        parts.push(Document::text("\n"));
        parts.push(Document::text(self.indent.raw(self.level, delta)));
    }
}

fn keyword(word: &str) -> Document {
    Document::tagged_text(Tag::ReservedWord, word)
}

fn paren(text: &str) -> Document {
    Document::tagged_text(Tag::Paren, text)
}

fn comma() -> Document {
    Document::tagged_text(Tag::Comma, ",")
}

fn comma_space() -> Document {
    Document::Run(vec![comma(), Document::text(" ")])
}

fn dot() -> Document {
    Document::tagged_text(Tag::OperatorDot, ".")
}

/// Operator token. Spellings outside the operator sets (`=`, `->`, `&&`)
/// are still operators here, so they fall back to the misc class.
fn operator(op: &str) -> Document {
    let tag = match classify_symbol(op) {
        Tag::Variable | Tag::VariableType => Tag::OperatorMisc,
        tag => tag,
    };
    Document::tagged_text(tag, op)
}

fn spaced_operator(op: &str) -> Document {
    Document::Run(vec![
        Document::text(" "),
        operator(op),
        Document::text(" "),
    ])
}

fn markup_expr(expr: &Expr, ctx: &MarkupContext) -> Document {
    if ctx.depth >= ctx.max_depth && expr.is_compound() {
        return Document::text(RenderError::too_deep(expr, ctx.depth).sentinel());
    }
    let ctx = &MarkupContext {
        depth: ctx.depth + 1,
        ..*ctx
    };
    stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || markup_form(expr, ctx))
}

fn markup_form(expr: &Expr, ctx: &MarkupContext) -> Document {
    match expr {
        Expr::Nil => Document::tagged_text(Tag::Nil, "nothing"),
        Expr::Bool(value) => Document::tagged_text(Tag::Bool, if *value { "true" } else { "false" }),
        Expr::Int(value) => Document::tagged_text(Tag::Number, value.to_string()),
        Expr::UInt(value) => Document::tagged_text(Tag::NumberHex, format!("0x{:x}", value)),
        Expr::Float(value) => Document::tagged_text(Tag::NumberDecimal, format_float(*value)),
        Expr::Rational { num, den } => {
            Document::tagged_text(Tag::Rational, format!("{}//{}", num, den))
        }
        Expr::Char(c) => Document::tagged_text(Tag::Char, format!("'{}'", c)),
        Expr::Str(s) => Document::tagged_text(Tag::String, format!("\"{}\"", s)),
        Expr::Symbol(name) => Document::tagged_text(classify_symbol(name), name.as_str()),
        Expr::Quoted(inner) => match inner.as_ref() {
            Expr::Symbol(name) => Document::tagged_text(Tag::Quoted, format!(":{}", name)),
            other => Document::tagged(
                Tag::Quoted,
                vec![
                    Document::text(":"),
                    paren("("),
                    markup_expr(other, ctx),
                    paren(")"),
                ],
            ),
        },
        Expr::Pair(first, second) => {
            Document::tagged(Tag::Pair, pair_parts_markup(first, second, ctx))
        }
        Expr::Tuple(items) => Document::tagged(Tag::Tuple, bracketed(items, "(", ")", ctx)),
        Expr::List(items) => Document::tagged(Tag::Vect, bracketed(items, "[", "]", ctx)),
        Expr::Mapping(entries) => {
            let entries: Vec<Entry> = entries.iter().map(|(k, v)| Entry::Pair(k, v)).collect();
            Document::tagged(Tag::Dict, mapping_parts(&entries, ctx))
        }
        Expr::Node(node) => markup_node(node, ctx),
    }
}

fn markup_node(node: &Node, ctx: &MarkupContext) -> Document {
    let args = &node.args;
    let mut parts = Vec::new();

    match &node.kind {
        Kind::Rational => push_seq(args, &operator("//"), &mut parts, ctx),

        Kind::Pair => {
            if let [first, second] = args.as_slice() {
                parts = pair_parts_markup(first, second, ctx);
            } else {
                push_seq(args, &spaced_operator("=>"), &mut parts, ctx);
            }
        }

        Kind::Tuple => parts = bracketed(args, "(", ")", ctx),

        Kind::List => parts = bracketed(args, "[", "]", ctx),

        Kind::Dict => {
            let entries: Vec<Entry> = args.iter().map(Entry::of).collect();
            parts = mapping_parts(&entries, ctx);
        }

        Kind::Quote => match args.as_slice() {
            [Expr::Symbol(name)] => parts.push(Document::text(format!(":{}", name))),
            _ => {
                parts.push(Document::text(":"));
                parts.push(paren("("));
                push_seq(args, &Document::text("\n"), &mut parts, ctx);
                parts.push(paren(")"));
            }
        },

        Kind::Unquote => match args.as_slice() {
            [Expr::Symbol(name)] => parts.push(Document::text(format!("${}", name))),
            _ => {
                parts.push(Document::text("$"));
                parts.push(paren("("));
                push_seq(args, &comma_space(), &mut parts, ctx);
                parts.push(paren(")"));
            }
        },

        Kind::Splat => {
            push_seq(args, &comma_space(), &mut parts, ctx);
            parts.push(operator("..."));
        }

        Kind::Block => {
            if let [statement] = args.as_slice() {
                parts.push(markup_expr(statement, ctx));
            } else {
                parts.push(keyword("begin"));
                push_lines(args, &mut parts, ctx);
                ctx.newline(&mut parts, 0);
                parts.push(keyword("end"));
            }
        }

        Kind::If | Kind::ElseIf => {
            parts.push(keyword(node.kind.name()));
            push_branches(node, &mut parts, ctx);
            ctx.newline(&mut parts, 0);
            parts.push(keyword("end"));
        }

        Kind::Comparison => {
            let mut chain = Vec::new();
            push_seq(args, &Document::text(" "), &mut chain, ctx);
            parts.push(Document::Run(chain));
        }

        Kind::Let => {
            parts.push(keyword("let"));
            if let Some(bindings) = args.first() {
                let bindings = bindings.statements();
                if !bindings.is_empty() {
                    parts.push(Document::text(" "));
                    push_seq(bindings, &comma_space(), &mut parts, ctx);
                }
            }
            if let Some(body) = args.get(1) {
                push_lines(body.statements(), &mut parts, ctx);
            }
            ctx.newline(&mut parts, 0);
            parts.push(keyword("end"));
        }

        Kind::Function | Kind::Macro => {
            parts.push(keyword(node.kind.name()));
            if let Some(signature) = args.first() {
                parts.push(Document::text(" "));
                parts.push(markup_expr(signature, ctx));
            }
            if let Some(body) = args.get(1) {
                push_lines(body.statements(), &mut parts, ctx);
            }
            ctx.newline(&mut parts, 0);
            parts.push(keyword("end"));
        }

        Kind::Lambda => push_seq(args, &spaced_operator("->"), &mut parts, ctx),

        Kind::Assign => push_seq(args, &spaced_operator("="), &mut parts, ctx),

        Kind::Kw => match args.as_slice() {
            [Expr::Symbol(name), value] => {
                parts.push(Document::tagged_text(Tag::Keyword, name.as_str()));
                parts.push(operator("="));
                parts.push(markup_expr(value, ctx));
            }
            _ => push_seq(args, &operator("="), &mut parts, ctx),
        },

        Kind::Parameters => {
            parts.push(operator(";"));
            parts.push(Document::text(" "));
            push_seq(args, &comma_space(), &mut parts, ctx);
        }

        Kind::Ref => match args.split_first() {
            Some((base, indices)) => {
                parts.push(markup_expr(base, ctx));
                parts.extend(bracketed(indices, "[", "]", ctx));
            }
            None => return malformed(node),
        },

        Kind::Range => push_seq(args, &operator(":"), &mut parts, ctx),

        Kind::Module => {
            let (bare, rest) = module_parts(args);
            parts.push(keyword(if bare { "baremodule" } else { "module" }));
            if let Some(name) = rest.first() {
                parts.push(Document::text(" "));
                parts.push(markup_expr(name, ctx));
            }
            if let Some(body) = rest.get(1) {
                let inner = ctx.nested();
                for (i, statement) in body.statements().iter().enumerate() {
                    if i > 0 {
                        parts.push(Document::text("\n"));
                    }
                    ctx.newline(&mut parts, 1);
                    parts.push(markup_expr(statement, &inner));
                }
            }
            ctx.newline(&mut parts, 0);
            parts.push(keyword("end"));
        }

        Kind::Import | Kind::Using => {
            parts.push(keyword(node.kind.name()));
            parts.push(Document::text(" "));
            push_seq(args, &dot(), &mut parts, ctx);
        }

        Kind::Export => {
            parts.push(keyword("export"));
            parts.push(Document::text(" "));
            push_seq(args, &comma(), &mut parts, ctx);
        }

        Kind::Dot => match args.split_first() {
            Some((base, fields)) => {
                parts.push(markup_expr(base, ctx));
                for field in fields {
                    parts.push(dot());
                    match field {
                        Expr::Quoted(inner) => parts.push(markup_expr(inner, ctx)),
                        other => parts.push(markup_expr(other, ctx)),
                    }
                }
            }
            None => return malformed(node),
        },

        Kind::TypeAnnotation => {
            if let [type_expr] = args.as_slice() {
                parts.push(operator("::"));
                parts.push(markup_expr(type_expr, ctx));
            } else {
                push_seq(args, &operator("::"), &mut parts, ctx);
            }
        }

        Kind::Curly => match args.split_first() {
            Some((name, params)) => {
                parts.push(markup_expr(name, ctx));
                parts.extend(bracketed(params, "{", "}", ctx));
            }
            None => return malformed(node),
        },

        Kind::And | Kind::Or => {
            let op = if node.kind == Kind::And { "&&" } else { "||" };
            for (i, operand) in args.iter().enumerate() {
                if i > 0 {
                    parts.push(spaced_operator(op));
                }
                if needs_logical_parens(&node.kind, operand) {
                    parts.push(paren("("));
                    parts.push(markup_expr(operand, ctx));
                    parts.push(paren(")"));
                } else {
                    parts.push(markup_expr(operand, ctx));
                }
            }
        }

        Kind::Call | Kind::MacroCall => match args.split_first() {
            Some((callee, rest)) => {
                match (callee, &node.kind) {
                    (Expr::Symbol(name), Kind::MacroCall) => {
                        parts.push(Document::tagged_text(Tag::Macro, name.as_str()));
                    }
                    _ => parts.push(markup_expr(callee, ctx)),
                }
                let (positional, keywords) = split_parameters(rest);
                parts.push(paren("("));
                push_seq(&positional, &comma_space(), &mut parts, ctx);
                if !keywords.is_empty() {
                    parts.push(operator(";"));
                    parts.push(Document::text(" "));
                    push_seq(&keywords, &comma_space(), &mut parts, ctx);
                }
                parts.push(paren(")"));
            }
            None => return malformed(node),
        },

        Kind::TopLevel => {
            for (i, child) in args.iter().enumerate() {
                if i > 0 {
                    ctx.newline(&mut parts, 0);
                }
                parts.push(markup_expr(child, ctx));
            }
        }

        Kind::Unknown(_) => {
            parts.push(Document::text(RenderError::unsupported(node).sentinel()));
        }
    }

    match kind_tag(&node.kind) {
        Some(tag) => Document::tagged(tag, parts),
        None => Document::Run(parts),
    }
}

/// Sentinel for a node whose arity has no layout. Left untagged, like an
/// unsupported kind.
fn malformed(node: &Node) -> Document {
    Document::text(RenderError::malformed(node).sentinel())
}

/// Mirrors the plain renderer's `if`/`elseif`/`else` layout.
fn push_branches(node: &Node, parts: &mut Vec<Document>, ctx: &MarkupContext) {
    let mut branch = node;
    loop {
        if let Some(condition) = branch.args.first() {
            parts.push(Document::text(" "));
            parts.push(markup_expr(condition, ctx));
        }
        if let Some(body) = branch.args.get(1) {
            push_lines(body.statements(), parts, ctx);
        }
        match branch.args.get(2) {
            Some(Expr::Node(next)) if next.kind == Kind::ElseIf => {
                ctx.newline(parts, 0);
                parts.push(keyword("elseif"));
                branch = next;
            }
            Some(otherwise) => {
                ctx.newline(parts, 0);
                parts.push(keyword("else"));
                push_lines(otherwise.statements(), parts, ctx);
                break;
            }
            None => break,
        }
    }
}

/// Body statements, each on its own line one level below `ctx`.
fn push_lines(statements: &[Expr], parts: &mut Vec<Document>, ctx: &MarkupContext) {
    let inner = ctx.nested();
    for statement in statements {
        ctx.newline(parts, 1);
        parts.push(markup_expr(statement, &inner));
    }
}

fn push_seq(items: &[Expr], separator: &Document, parts: &mut Vec<Document>, ctx: &MarkupContext) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            parts.push(separator.clone());
        }
        parts.push(markup_expr(item, ctx));
    }
}

fn bracketed(items: &[Expr], open: &str, close: &str, ctx: &MarkupContext) -> Vec<Document> {
    let mut parts = vec![paren(open)];
    push_seq(items, &comma(), &mut parts, ctx);
    parts.push(paren(close));
    parts
}

fn pair_parts_markup(first: &Expr, second: &Expr, ctx: &MarkupContext) -> Vec<Document> {
    vec![
        markup_expr(first, ctx),
        spaced_operator("=>"),
        markup_expr(second, ctx),
    ]
}

fn mapping_parts(entries: &[Entry], ctx: &MarkupContext) -> Vec<Document> {
    let mut parts = vec![Document::tagged_text(Tag::VariableType, "Dict")];
    if entries.is_empty() {
        parts.push(paren("("));
        parts.push(paren(")"));
        return parts;
    }
    let inner = ctx.nested();
    parts.push(paren("("));
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            parts.push(comma());
        }
        ctx.newline(&mut parts, 1);
        parts.push(match entry {
            Entry::Pair(key, value) => {
                Document::tagged(Tag::Pair, pair_parts_markup(key, value, &inner))
            }
            Entry::Other(item) => markup_expr(item, &inner),
        });
    }
    parts.push(paren(")"));
    parts
}
