use crate::ast::*;
use crate::error::RenderError;
use crate::indent::{Indent, RenderOptions};

/// Render an expression tree as canonical indented source text.
///
/// `level` sets the indentation of the first line; nested block bodies are
/// indented relative to it.
pub fn render(expr: &Expr, level: usize) -> String {
    render_with_options(expr, level, &RenderOptions::default())
}

pub fn render_with_options(expr: &Expr, level: usize, options: &RenderOptions) -> String {
    let ctx = RenderContext {
        indent: Indent::from(options),
        level,
        depth: 0,
        max_depth: options.max_depth,
    };
    let mut output = ctx.indent.prefix(level);
    render_expr(expr, &mut output, &ctx);
    output
}

#[derive(Clone, Copy)]
struct RenderContext {
    indent: Indent,
    level: usize,
    depth: usize,
    max_depth: usize,
}

impl RenderContext {
    fn nested(&self) -> RenderContext {
        RenderContext {
            level: self.level + 1,
            ..*self
        }
    }

    /// Start a new line at this context's level.
    fn newline(&self, output: &mut String) {
        output.push('\n');
        self.indent.write(output, self.level);
    }
}

/// Remaining stack below which rendering a subtree moves to a fresh segment.
pub(crate) const RED_ZONE: usize = 64 * 1024;
pub(crate) const STACK_GROWTH: usize = 1024 * 1024;

/// Write the inline form of `expr`: no leading indentation, continuation
/// lines indented from `ctx.level`.
fn render_expr(expr: &Expr, output: &mut String, ctx: &RenderContext) {
    if ctx.depth >= ctx.max_depth && expr.is_compound() {
        output.push_str(&RenderError::too_deep(expr, ctx.depth).sentinel());
        return;
    }
    let ctx = &RenderContext {
        depth: ctx.depth + 1,
        ..*ctx
    };
    stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || render_form(expr, output, ctx))
}

fn render_form(expr: &Expr, output: &mut String, ctx: &RenderContext) {
    match expr {
        Expr::Nil => output.push_str("nothing"),
        Expr::Bool(value) => output.push_str(if *value { "true" } else { "false" }),
        Expr::Int(value) => output.push_str(&value.to_string()),
        Expr::UInt(value) => output.push_str(&format!("0x{:x}", value)),
        Expr::Float(value) => output.push_str(&format_float(*value)),
        Expr::Rational { num, den } => output.push_str(&format!("{}//{}", num, den)),
        Expr::Char(c) => {
            output.push('\'');
            output.push(*c);
            output.push('\'');
        }
        Expr::Str(s) => {
            output.push('"');
            output.push_str(s);
            output.push('"');
        }
        Expr::Symbol(name) => output.push_str(name),
        Expr::Quoted(inner) => match inner.as_ref() {
            Expr::Symbol(name) => {
                output.push(':');
                output.push_str(name);
            }
            other => {
                output.push_str(":(");
                render_expr(other, output, ctx);
                output.push(')');
            }
        },
        Expr::Pair(first, second) => render_pair(first, second, output, ctx),
        Expr::Tuple(items) => render_seq(items, "(", ",", ")", output, ctx),
        Expr::List(items) => render_seq(items, "[", ",", "]", output, ctx),
        Expr::Mapping(entries) => {
            let entries: Vec<Entry> = entries.iter().map(|(k, v)| Entry::Pair(k, v)).collect();
            render_mapping(&entries, output, ctx);
        }
        Expr::Node(node) => render_node(node, output, ctx),
    }
}

fn render_node(node: &Node, output: &mut String, ctx: &RenderContext) {
    let args = &node.args;

    match &node.kind {
        Kind::Rational => render_seq(args, "", "//", "", output, ctx),

        Kind::Pair => {
            if let [first, second] = args.as_slice() {
                render_pair(first, second, output, ctx);
            } else {
                render_seq(args, "", " => ", "", output, ctx);
            }
        }

        Kind::Tuple => render_seq(args, "(", ",", ")", output, ctx),

        Kind::List => render_seq(args, "[", ",", "]", output, ctx),

        Kind::Dict => {
            let entries: Vec<Entry> = args.iter().map(Entry::of).collect();
            render_mapping(&entries, output, ctx);
        }

        Kind::Quote => match args.as_slice() {
            [Expr::Symbol(name)] => {
                output.push(':');
                output.push_str(name);
            }
            _ => render_seq(args, ":(", "\n", ")", output, ctx),
        },

        Kind::Unquote => match args.as_slice() {
            [Expr::Symbol(name)] => {
                output.push('$');
                output.push_str(name);
            }
            _ => render_seq(args, "$(", ", ", ")", output, ctx),
        },

        Kind::Splat => {
            render_seq(args, "", ", ", "", output, ctx);
            output.push_str("...");
        }

        Kind::Block => {
            if let [statement] = args.as_slice() {
                render_expr(statement, output, ctx);
            } else {
                output.push_str("begin");
                render_lines(args, output, &ctx.nested());
                ctx.newline(output);
                output.push_str("end");
            }
        }

        Kind::If | Kind::ElseIf => {
            output.push_str(node.kind.name());
            render_branches(node, output, ctx);
            ctx.newline(output);
            output.push_str("end");
        }

        Kind::Comparison => render_seq(args, "(", " ", ")", output, ctx),

        Kind::Let => {
            output.push_str("let");
            if let Some(bindings) = args.first() {
                let bindings = bindings.statements();
                if !bindings.is_empty() {
                    output.push(' ');
                    render_seq(bindings, "", ", ", "", output, ctx);
                }
            }
            if let Some(body) = args.get(1) {
                render_lines(body.statements(), output, &ctx.nested());
            }
            ctx.newline(output);
            output.push_str("end");
        }

        Kind::Function | Kind::Macro => {
            output.push_str(node.kind.name());
            if let Some(signature) = args.first() {
                output.push(' ');
                render_expr(signature, output, ctx);
            }
            if let Some(body) = args.get(1) {
                render_lines(body.statements(), output, &ctx.nested());
            }
            ctx.newline(output);
            output.push_str("end");
        }

        Kind::Lambda => render_seq(args, "", " -> ", "", output, ctx),

        Kind::Assign => render_seq(args, "", " = ", "", output, ctx),

        Kind::Kw => render_seq(args, "", "=", "", output, ctx),

        Kind::Parameters => render_seq(args, "; ", ", ", "", output, ctx),

        Kind::Ref => match args.split_first() {
            Some((base, indices)) => {
                render_expr(base, output, ctx);
                render_seq(indices, "[", ",", "]", output, ctx);
            }
            None => output.push_str(&RenderError::malformed(node).sentinel()),
        },

        Kind::Range => render_seq(args, "", ":", "", output, ctx),

        Kind::Module => {
            let (bare, rest) = module_parts(args);
            output.push_str(if bare { "baremodule" } else { "module" });
            if let Some(name) = rest.first() {
                output.push(' ');
                render_expr(name, output, ctx);
            }
            if let Some(body) = rest.get(1) {
                let inner = ctx.nested();
                for (i, statement) in body.statements().iter().enumerate() {
                    if i > 0 {
                        output.push('\n');
                    }
                    inner.newline(output);
                    render_expr(statement, output, &inner);
                }
            }
            ctx.newline(output);
            output.push_str("end");
        }

        Kind::Import | Kind::Using => {
            output.push_str(node.kind.name());
            output.push(' ');
            render_seq(args, "", ".", "", output, ctx);
        }

        Kind::Export => render_seq(args, "export ", ",", "", output, ctx),

        Kind::Dot => match args.split_first() {
            Some((base, fields)) => {
                render_expr(base, output, ctx);
                for field in fields {
                    output.push('.');
                    match field {
                        Expr::Quoted(inner) => render_expr(inner, output, ctx),
                        other => render_expr(other, output, ctx),
                    }
                }
            }
            None => output.push_str(&RenderError::malformed(node).sentinel()),
        },

        Kind::TypeAnnotation => {
            if let [type_expr] = args.as_slice() {
                output.push_str("::");
                render_expr(type_expr, output, ctx);
            } else {
                render_seq(args, "", "::", "", output, ctx);
            }
        }

        Kind::Curly => match args.split_first() {
            Some((name, params)) => {
                render_expr(name, output, ctx);
                render_seq(params, "{", ",", "}", output, ctx);
            }
            None => output.push_str(&RenderError::malformed(node).sentinel()),
        },

        Kind::And | Kind::Or => {
            let op = if node.kind == Kind::And { " && " } else { " || " };
            for (i, operand) in args.iter().enumerate() {
                if i > 0 {
                    output.push_str(op);
                }
                if needs_logical_parens(&node.kind, operand) {
                    output.push('(');
                    render_expr(operand, output, ctx);
                    output.push(')');
                } else {
                    render_expr(operand, output, ctx);
                }
            }
        }

        Kind::Call | Kind::MacroCall => match args.split_first() {
            Some((callee, rest)) => {
                render_expr(callee, output, ctx);
                let (positional, keywords) = split_parameters(rest);
                output.push('(');
                render_seq(&positional, "", ", ", "", output, ctx);
                if !keywords.is_empty() {
                    output.push_str("; ");
                    render_seq(&keywords, "", ", ", "", output, ctx);
                }
                output.push(')');
            }
            None => output.push_str(&RenderError::malformed(node).sentinel()),
        },

        Kind::TopLevel => {
            for (i, child) in args.iter().enumerate() {
                if i > 0 {
                    ctx.newline(output);
                }
                render_expr(child, output, ctx);
            }
        }

        Kind::Unknown(_) => {
            output.push_str(&RenderError::unsupported(node).sentinel());
        }
    }
}

/// `cond` + body for an `if`/`elseif` node, then any `elseif`/`else`
/// branches. Walks the `elseif` chain iteratively.
fn render_branches(node: &Node, output: &mut String, ctx: &RenderContext) {
    let inner = ctx.nested();
    let mut branch = node;
    loop {
        if let Some(condition) = branch.args.first() {
            output.push(' ');
            render_expr(condition, output, ctx);
        }
        if let Some(body) = branch.args.get(1) {
            render_lines(body.statements(), output, &inner);
        }
        match branch.args.get(2) {
            Some(Expr::Node(next)) if next.kind == Kind::ElseIf => {
                ctx.newline(output);
                output.push_str("elseif");
                branch = next;
            }
            Some(otherwise) => {
                ctx.newline(output);
                output.push_str("else");
                render_lines(otherwise.statements(), output, &inner);
                break;
            }
            None => break,
        }
    }
}

/// Each statement on its own line at `ctx.level`.
fn render_lines(statements: &[Expr], output: &mut String, ctx: &RenderContext) {
    for statement in statements {
        ctx.newline(output);
        render_expr(statement, output, ctx);
    }
}

fn render_seq(
    items: &[Expr],
    open: &str,
    separator: &str,
    close: &str,
    output: &mut String,
    ctx: &RenderContext,
) {
    output.push_str(open);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            output.push_str(separator);
        }
        render_expr(item, output, ctx);
    }
    output.push_str(close);
}

fn render_pair(first: &Expr, second: &Expr, output: &mut String, ctx: &RenderContext) {
    render_expr(first, output, ctx);
    output.push_str(" => ");
    render_expr(second, output, ctx);
}

fn render_mapping(entries: &[Entry], output: &mut String, ctx: &RenderContext) {
    if entries.is_empty() {
        output.push_str("Dict()");
        return;
    }
    let inner = ctx.nested();
    output.push_str("Dict(");
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        inner.newline(output);
        match entry {
            Entry::Pair(key, value) => render_pair(key, value, output, &inner),
            Entry::Other(item) => render_expr(item, output, &inner),
        }
    }
    output.push(')');
}

/// One child of a mapping. Children that are not key/value pairs (splats,
/// bare names) keep their place in the entry list.
pub(crate) enum Entry<'a> {
    Pair(&'a Expr, &'a Expr),
    Other(&'a Expr),
}

impl<'a> Entry<'a> {
    /// Accepts both pair literals and `=>` nodes as pairs.
    pub(crate) fn of(expr: &'a Expr) -> Entry<'a> {
        match expr {
            Expr::Pair(first, second) => Entry::Pair(first, second),
            Expr::Node(Node {
                kind: Kind::Pair,
                args,
            }) => match args.as_slice() {
                [first, second] => Entry::Pair(first, second),
                _ => Entry::Other(expr),
            },
            other => Entry::Other(other),
        }
    }
}

/// Module arguments may start with a flag that is `false` for bare modules.
pub(crate) fn module_parts(args: &[Expr]) -> (bool, &[Expr]) {
    match args.split_first() {
        Some((Expr::Bool(standard), rest)) => (!standard, rest),
        _ => (false, args),
    }
}

/// Separate a call's positional arguments from the keyword arguments held
/// in `parameters` nodes.
pub(crate) fn split_parameters(args: &[Expr]) -> (Vec<Expr>, Vec<Expr>) {
    let mut positional = Vec::new();
    let mut keywords = Vec::new();
    for arg in args {
        match arg {
            Expr::Node(Node {
                kind: Kind::Parameters,
                args,
            }) => keywords.extend(args.iter().cloned()),
            other => positional.push(other.clone()),
        }
    }
    (positional, keywords)
}

/// An operand of `&&`/`||` is parenthesized when it is the other logical
/// operator.
pub(crate) fn needs_logical_parens(parent: &Kind, operand: &Expr) -> bool {
    match operand.kind() {
        Some(kind @ (Kind::And | Kind::Or)) => kind != parent,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::sym(name)
    }

    #[test]
    fn render_atoms() {
        assert_eq!("nothing", render(&Expr::Nil, 0));
        assert_eq!("true", render(&Expr::Bool(true), 0));
        assert_eq!("42", render(&Expr::Int(42), 0));
        assert_eq!("-7", render(&Expr::Int(-7), 0));
        assert_eq!("0xff", render(&Expr::UInt(255), 0));
        assert_eq!("2.5", render(&Expr::Float(2.5), 0));
        assert_eq!("3//4", render(&Expr::Rational { num: 3, den: 4 }, 0));
        assert_eq!("'c'", render(&Expr::Char('c'), 0));
        assert_eq!("\"hi\"", render(&Expr::string("hi"), 0));
        assert_eq!("x", render(&sym("x"), 0));
    }

    #[test]
    fn level_prefixes_only_the_first_line() {
        assert_eq!("    42", render(&Expr::Int(42), 2));
    }

    #[test]
    fn strings_are_not_escaped() {
        assert_eq!("\"a\"b\"", render(&Expr::string("a\"b"), 0));
    }

    #[test]
    fn render_quoted_references() {
        assert_eq!(":x", render(&Expr::quoted(sym("x")), 0));
        let call = Expr::call(sym("f"), vec![sym("x")]);
        assert_eq!(":(f(x))", render(&Expr::quoted(call), 0));
    }

    #[test]
    fn render_containers() {
        assert_eq!("(1,2)", render(&Expr::Tuple(vec![Expr::Int(1), Expr::Int(2)]), 0));
        assert_eq!("[a,b]", render(&Expr::List(vec![sym("a"), sym("b")]), 0));
        assert_eq!("a => 1", render(&Expr::pair(sym("a"), Expr::Int(1)), 0));
    }

    #[test]
    fn render_mapping_entries_one_level_in() {
        let mapping = Expr::Mapping(vec![
            (Expr::string("a"), Expr::Int(1)),
            (Expr::string("b"), Expr::Int(2)),
        ]);
        assert_eq!("Dict(\n  \"a\" => 1,\n  \"b\" => 2)", render(&mapping, 0));
        assert_eq!("  Dict(\n    \"a\" => 1,\n    \"b\" => 2)", render(&mapping, 1));
        assert_eq!("Dict()", render(&Expr::Mapping(vec![]), 0));
    }

    #[test]
    fn render_dict_node() {
        let dict = Expr::node(
            Kind::Dict,
            vec![Expr::node(Kind::Pair, vec![sym("k"), sym("v")])],
        );
        assert_eq!("Dict(\n  k => v)", render(&dict, 0));
    }

    #[test]
    fn render_dict_keeps_non_pair_children_in_place() {
        let dict = Expr::node(
            Kind::Dict,
            vec![
                Expr::pair(sym("a"), Expr::Int(1)),
                Expr::node(Kind::Splat, vec![sym("rest")]),
                sym("lost"),
            ],
        );
        assert_eq!("Dict(\n  a => 1,\n  rest...,\n  lost)", render(&dict, 0));
    }

    #[test]
    fn render_single_statement_block_without_wrapper() {
        let block = Expr::block(vec![Expr::call(sym("f"), vec![])]);
        assert_eq!("f()", render(&block, 0));
    }

    #[test]
    fn render_multi_statement_block() {
        let block = Expr::block(vec![sym("a"), sym("b")]);
        assert_eq!("begin\n  a\n  b\nend", render(&block, 0));
        assert_eq!("  begin\n    a\n    b\n  end", render(&block, 1));
    }

    #[test]
    fn render_if_else() {
        let expr = Expr::node(
            Kind::If,
            vec![
                sym("cond"),
                Expr::block(vec![sym("A")]),
                Expr::block(vec![sym("B")]),
            ],
        );
        assert_eq!("if cond\n  A\nelse\n  B\nend", render(&expr, 0));
    }

    #[test]
    fn render_if_elseif_chain() {
        let expr = Expr::node(
            Kind::If,
            vec![
                sym("a"),
                sym("x"),
                Expr::node(
                    Kind::ElseIf,
                    vec![sym("b"), sym("y"), Expr::block(vec![sym("z"), sym("w")])],
                ),
            ],
        );
        assert_eq!(
            "if a\n  x\nelseif b\n  y\nelse\n  z\n  w\nend",
            render(&expr, 0)
        );
    }

    #[test]
    fn render_comparison_chain() {
        let expr = Expr::node(
            Kind::Comparison,
            vec![sym("a"), sym("<"), sym("b"), sym("<="), sym("c")],
        );
        assert_eq!("(a < b <= c)", render(&expr, 0));
    }

    #[test]
    fn render_let() {
        let expr = Expr::node(
            Kind::Let,
            vec![
                Expr::block(vec![
                    Expr::node(Kind::Assign, vec![sym("x"), Expr::Int(1)]),
                    Expr::node(Kind::Assign, vec![sym("y"), Expr::Int(2)]),
                ]),
                Expr::block(vec![Expr::call(sym("+"), vec![sym("x"), sym("y")])]),
            ],
        );
        assert_eq!("let x = 1, y = 2\n  +(x, y)\nend", render(&expr, 0));
    }

    #[test]
    fn render_function_and_macro() {
        let function = Expr::node(
            Kind::Function,
            vec![
                Expr::call(sym("f"), vec![sym("x")]),
                Expr::block(vec![
                    Expr::node(Kind::Assign, vec![sym("y"), sym("x")]),
                    sym("y"),
                ]),
            ],
        );
        assert_eq!("function f(x)\n  y = x\n  y\nend", render(&function, 0));

        let mac = Expr::node(
            Kind::Macro,
            vec![
                Expr::call(sym("m"), vec![sym("ex")]),
                Expr::block(vec![sym("ex")]),
            ],
        );
        assert_eq!("macro m(ex)\n  ex\nend", render(&mac, 0));
    }

    #[test]
    fn render_lambda_and_assignment() {
        let lambda = Expr::node(
            Kind::Lambda,
            vec![
                sym("x"),
                Expr::block(vec![Expr::call(sym("*"), vec![sym("x"), Expr::Int(2)])]),
            ],
        );
        assert_eq!("x -> *(x, 2)", render(&lambda, 0));
        let assign = Expr::node(Kind::Assign, vec![sym("f"), lambda]);
        assert_eq!("f = x -> *(x, 2)", render(&assign, 0));
    }

    #[test]
    fn render_indexing_and_range() {
        let index = Expr::node(Kind::Ref, vec![sym("a"), Expr::Int(1), sym("j")]);
        assert_eq!("a[1,j]", render(&index, 0));
        let range = Expr::node(Kind::Range, vec![Expr::Int(1), Expr::Int(2), Expr::Int(10)]);
        assert_eq!("1:2:10", render(&range, 0));
    }

    #[test]
    fn render_module_with_blank_lines() {
        let module = Expr::node(
            Kind::Module,
            vec![
                Expr::Bool(true),
                sym("M"),
                Expr::block(vec![
                    Expr::node(Kind::Using, vec![sym("Base"), sym("Iterators")]),
                    Expr::node(Kind::Export, vec![sym("f"), sym("g")]),
                    Expr::node(Kind::Assign, vec![sym("x"), Expr::Int(1)]),
                ]),
            ],
        );
        assert_eq!(
            "module M\n  using Base.Iterators\n\n  export f,g\n\n  x = 1\nend",
            render(&module, 0)
        );
    }

    #[test]
    fn render_bare_module() {
        let module = Expr::node(
            Kind::Module,
            vec![Expr::Bool(false), sym("B"), Expr::block(vec![])],
        );
        assert_eq!("baremodule B\nend", render(&module, 0));
    }

    #[test]
    fn render_import() {
        let import = Expr::node(Kind::Import, vec![sym("A"), sym("b")]);
        assert_eq!("import A.b", render(&import, 0));
    }

    #[test]
    fn render_quote_unquote_splat() {
        assert_eq!(":x", render(&Expr::node(Kind::Quote, vec![sym("x")]), 0));
        let quote = Expr::node(Kind::Quote, vec![sym("a"), sym("b")]);
        assert_eq!(":(a\nb)", render(&quote, 0));
        assert_eq!("$x", render(&Expr::node(Kind::Unquote, vec![sym("x")]), 0));
        let unquote = Expr::node(Kind::Unquote, vec![Expr::call(sym("f"), vec![])]);
        assert_eq!("$(f())", render(&unquote, 0));
        assert_eq!("xs...", render(&Expr::node(Kind::Splat, vec![sym("xs")]), 0));
    }

    #[test]
    fn render_member_access_structurally() {
        let access = Expr::node(
            Kind::Dot,
            vec![
                Expr::node(Kind::Dot, vec![sym("a"), Expr::quoted(sym("b"))]),
                Expr::quoted(sym("c")),
            ],
        );
        assert_eq!("a.b.c", render(&access, 0));
        let broadcast = Expr::node(Kind::Dot, vec![sym("f"), Expr::Tuple(vec![sym("x")])]);
        assert_eq!("f.(x)", render(&broadcast, 0));
    }

    #[test]
    fn render_types() {
        let annotated = Expr::node(Kind::TypeAnnotation, vec![sym("x"), sym("Int")]);
        assert_eq!("x::Int", render(&annotated, 0));
        let bare = Expr::node(Kind::TypeAnnotation, vec![sym("Int")]);
        assert_eq!("::Int", render(&bare, 0));
        let curly = Expr::node(Kind::Curly, vec![sym("Dict"), sym("K"), sym("V")]);
        assert_eq!("Dict{K,V}", render(&curly, 0));
    }

    #[test]
    fn render_logical_grouping() {
        let or = Expr::node(Kind::Or, vec![sym("a"), sym("b")]);
        let and = Expr::node(Kind::And, vec![or, sym("c")]);
        assert_eq!("(a || b) && c", render(&and, 0));
        let same = Expr::node(
            Kind::And,
            vec![sym("a"), Expr::node(Kind::And, vec![sym("b"), sym("c")])],
        );
        assert_eq!("a && b && c", render(&same, 0));
    }

    #[test]
    fn render_call_with_keywords() {
        let call = Expr::call(
            sym("f"),
            vec![
                Expr::node(
                    Kind::Parameters,
                    vec![Expr::node(Kind::Kw, vec![sym("k"), Expr::Int(1)])],
                ),
                sym("x"),
                sym("y"),
            ],
        );
        assert_eq!("f(x, y; k=1)", render(&call, 0));
        let mac = Expr::node(Kind::MacroCall, vec![sym("@show"), sym("x")]);
        assert_eq!("@show(x)", render(&mac, 0));
    }

    #[test]
    fn render_toplevel_sequence() {
        let top = Expr::node(Kind::TopLevel, vec![sym("a"), sym("b")]);
        assert_eq!("a\nb", render(&top, 0));
        assert_eq!("  a\n  b", render(&top, 1));
    }

    #[test]
    fn nested_block_in_assignment_aligns_with_statement() {
        let rhs = Expr::node(Kind::If, vec![sym("c"), sym("a"), sym("b")]);
        let assign = Expr::node(Kind::Assign, vec![sym("x"), rhs]);
        assert_eq!(
            "  x = if c\n    a\n  else\n    b\n  end",
            render(&assign, 1)
        );
    }

    #[test]
    fn unsupported_kind_renders_sentinel_in_place() {
        let weird = Expr::node(Kind::from_name("weird"), vec![sym("x")]);
        let call = Expr::call(sym("f"), vec![weird, Expr::Int(1)]);
        assert_eq!(
            "f(ERROR: could not print Expr(:weird, :x) :ERROR, 1)",
            render(&call, 0)
        );
    }

    #[test]
    fn calls_and_accessors_without_a_head_render_sentinel() {
        for kind in [Kind::Call, Kind::MacroCall, Kind::Ref, Kind::Curly, Kind::Dot] {
            let expected = format!("ERROR: could not print Expr(:{}) :ERROR", kind.name());
            assert_eq!(expected, render(&Expr::node(kind, vec![]), 0));
        }
        let wrapped = Expr::node(Kind::Assign, vec![sym("x"), Expr::node(Kind::Ref, vec![])]);
        assert_eq!("x = ERROR: could not print Expr(:ref) :ERROR", render(&wrapped, 0));
    }

    #[test]
    fn nesting_past_max_depth_renders_sentinel() {
        let mut expr = sym("x");
        for _ in 0..5 {
            expr = Expr::call(sym("f"), vec![expr]);
        }
        let options = RenderOptions {
            max_depth: 3,
            ..RenderOptions::default()
        };
        assert_eq!(
            "f(f(f(ERROR: could not print Expr(:call, :f, ...) :ERROR)))",
            render_with_options(&expr, 0, &options)
        );
        assert_eq!("f(f(f(f(f(x)))))", render(&expr, 0));
    }

    #[test]
    fn custom_indent_width() {
        let block = Expr::block(vec![sym("a"), sym("b")]);
        let options = RenderOptions {
            indent_width: 4,
            ..RenderOptions::default()
        };
        assert_eq!("begin\n    a\n    b\nend", render_with_options(&block, 0, &options));
    }
}
