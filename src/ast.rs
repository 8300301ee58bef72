use serde::{Deserialize, Serialize};

/// A node or leaf of a code-as-data expression tree.
///
/// Trees are produced by an external parser and are never mutated by the
/// renderers; every render function borrows the tree immutably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Nil,
    Bool(bool),
    Int(i64),
    /// Unsigned literal, rendered in hexadecimal.
    #[serde(rename = "uint")]
    UInt(u64),
    Float(f64),
    Rational { num: i64, den: i64 },
    Char(char),
    Str(String),
    Symbol(String),
    /// Quoted reference to a symbol or a form (`:x`, `:(a + b)`).
    Quoted(Box<Expr>),
    Pair(Box<Expr>, Box<Expr>),
    Tuple(Vec<Expr>),
    List(Vec<Expr>),
    Mapping(Vec<(Expr, Expr)>),
    Node(Node),
}

/// A syntactic form: a head `kind` plus positional arguments whose meaning
/// is fixed by the kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: Kind,
    #[serde(default)]
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Kind {
    // Literal constructors
    Rational,
    Pair,
    Tuple,
    List,
    Dict,

    // Quoting
    Quote,
    Unquote,
    Splat,

    // Blocks and control flow
    Block,
    If,
    ElseIf,
    Comparison,
    Let,
    Function,
    Macro,
    Lambda,

    // Bindings and access
    Assign,
    Kw,
    Parameters,
    Ref,
    Range,
    Dot,
    TypeAnnotation,
    Curly,
    And,
    Or,
    Call,
    MacroCall,

    // Modules
    Module,
    Import,
    Using,
    Export,
    TopLevel,

    /// Any head this crate does not model. Rendered as a sentinel.
    Unknown(String),
}

impl Kind {
    /// Every supported kind, in declaration order.
    pub const ALL: &'static [Kind] = &[
        Kind::Rational,
        Kind::Pair,
        Kind::Tuple,
        Kind::List,
        Kind::Dict,
        Kind::Quote,
        Kind::Unquote,
        Kind::Splat,
        Kind::Block,
        Kind::If,
        Kind::ElseIf,
        Kind::Comparison,
        Kind::Let,
        Kind::Function,
        Kind::Macro,
        Kind::Lambda,
        Kind::Assign,
        Kind::Kw,
        Kind::Parameters,
        Kind::Ref,
        Kind::Range,
        Kind::Dot,
        Kind::TypeAnnotation,
        Kind::Curly,
        Kind::And,
        Kind::Or,
        Kind::Call,
        Kind::MacroCall,
        Kind::Module,
        Kind::Import,
        Kind::Using,
        Kind::Export,
        Kind::TopLevel,
    ];

    /// Head name as spelled in the host syntax tree.
    pub fn name(&self) -> &str {
        match self {
            Kind::Rational => "//",
            Kind::Pair => "=>",
            Kind::Tuple => "tuple",
            Kind::List => "vect",
            Kind::Dict => "dict",
            Kind::Quote => "quote",
            Kind::Unquote => "$",
            Kind::Splat => "...",
            Kind::Block => "block",
            Kind::If => "if",
            Kind::ElseIf => "elseif",
            Kind::Comparison => "comparison",
            Kind::Let => "let",
            Kind::Function => "function",
            Kind::Macro => "macro",
            Kind::Lambda => "->",
            Kind::Assign => "=",
            Kind::Kw => "kw",
            Kind::Parameters => "parameters",
            Kind::Ref => "ref",
            Kind::Range => ":",
            Kind::Dot => ".",
            Kind::TypeAnnotation => "::",
            Kind::Curly => "curly",
            Kind::And => "&&",
            Kind::Or => "||",
            Kind::Call => "call",
            Kind::MacroCall => "macrocall",
            Kind::Module => "module",
            Kind::Import => "import",
            Kind::Using => "using",
            Kind::Export => "export",
            Kind::TopLevel => "toplevel",
            Kind::Unknown(name) => name,
        }
    }

    pub fn from_name(name: &str) -> Kind {
        Kind::ALL
            .iter()
            .find(|kind| kind.name() == name)
            .cloned()
            .unwrap_or_else(|| Kind::Unknown(name.to_string()))
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Kind::Unknown(_))
    }
}

impl From<String> for Kind {
    fn from(name: String) -> Self {
        Kind::from_name(&name)
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.name().to_string()
    }
}

impl Expr {
    pub fn sym(name: impl Into<String>) -> Expr {
        Expr::Symbol(name.into())
    }

    pub fn string(value: impl Into<String>) -> Expr {
        Expr::Str(value.into())
    }

    pub fn quoted(inner: Expr) -> Expr {
        Expr::Quoted(Box::new(inner))
    }

    pub fn pair(first: Expr, second: Expr) -> Expr {
        Expr::Pair(Box::new(first), Box::new(second))
    }

    pub fn node(kind: Kind, args: Vec<Expr>) -> Expr {
        Expr::Node(Node { kind, args })
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(callee);
        all.extend(args);
        Expr::node(Kind::Call, all)
    }

    pub fn block(statements: Vec<Expr>) -> Expr {
        Expr::node(Kind::Block, statements)
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Expr::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<&Kind> {
        self.as_node().map(|node| &node.kind)
    }

    pub fn is_kind(&self, kind: &Kind) -> bool {
        self.kind() == Some(kind)
    }

    /// Whether this expression contains other expressions.
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            Expr::Quoted(_)
                | Expr::Pair(..)
                | Expr::Tuple(_)
                | Expr::List(_)
                | Expr::Mapping(_)
                | Expr::Node(_)
        )
    }

    /// Statements of a body: the arguments of a `block` node, or the
    /// expression itself for any other body.
    pub fn statements(&self) -> &[Expr] {
        match self {
            Expr::Node(Node {
                kind: Kind::Block,
                args,
            }) => args,
            other => std::slice::from_ref(other),
        }
    }

    /// Constructor-style representation used when a form cannot be printed,
    /// e.g. `Expr(:weird, 1, :x)`.
    pub fn repr(&self) -> String {
        self.repr_to_depth(REPR_DEPTH)
    }

    /// Like [`Expr::repr`], with forms nested more than `depth` levels down
    /// elided as `...`.
    pub fn repr_to_depth(&self, depth: usize) -> String {
        let mut output = String::new();
        write_repr(self, &mut output, depth);
        output
    }
}

impl Node {
    pub fn repr(&self) -> String {
        self.repr_to_depth(REPR_DEPTH)
    }

    pub fn repr_to_depth(&self, depth: usize) -> String {
        let mut output = String::new();
        write_node_repr(self, &mut output, depth);
        output
    }
}

/// Nesting shown by a full repr before elision.
const REPR_DEPTH: usize = 64;

fn write_repr(expr: &Expr, output: &mut String, depth: usize) {
    if expr.is_compound() && depth == 0 {
        output.push_str("...");
        return;
    }
    match expr {
        Expr::Nil => output.push_str("nothing"),
        Expr::Bool(value) => output.push_str(if *value { "true" } else { "false" }),
        Expr::Int(value) => output.push_str(&value.to_string()),
        Expr::UInt(value) => output.push_str(&format!("0x{:x}", value)),
        Expr::Float(value) => output.push_str(&format_float(*value)),
        Expr::Rational { num, den } => output.push_str(&format!("{}//{}", num, den)),
        Expr::Char(c) => output.push_str(&format!("{:?}", c)),
        Expr::Str(s) => output.push_str(&format!("{:?}", s)),
        Expr::Symbol(name) => {
            output.push(':');
            output.push_str(name);
        }
        Expr::Quoted(inner) => {
            output.push_str("QuoteNode(");
            write_repr(inner, output, depth - 1);
            output.push(')');
        }
        Expr::Pair(first, second) => {
            write_repr(first, output, depth - 1);
            output.push_str(" => ");
            write_repr(second, output, depth - 1);
        }
        Expr::Tuple(items) => write_repr_seq(items.iter(), "(", ")", output, depth - 1),
        Expr::List(items) => write_repr_seq(items.iter(), "[", "]", output, depth - 1),
        Expr::Mapping(entries) => {
            output.push_str("Dict(");
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    output.push_str(", ");
                }
                write_repr(key, output, depth - 1);
                output.push_str(" => ");
                write_repr(value, output, depth - 1);
            }
            output.push(')');
        }
        Expr::Node(node) => write_node_repr(node, output, depth),
    }
}

fn write_node_repr(node: &Node, output: &mut String, depth: usize) {
    if depth == 0 {
        output.push_str("...");
        return;
    }
    output.push_str("Expr(:");
    output.push_str(node.kind.name());
    for arg in &node.args {
        output.push_str(", ");
        write_repr(arg, output, depth - 1);
    }
    output.push(')');
}

fn write_repr_seq<'a>(
    items: impl Iterator<Item = &'a Expr>,
    open: &str,
    close: &str,
    output: &mut String,
    depth: usize,
) {
    output.push_str(open);
    for (i, item) in items.enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        write_repr(item, output, depth);
    }
    output.push_str(close);
}

/// Format a float so that it always reads as a decimal literal (`1.0`,
/// `2.5`, `1.0e100`).
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => {
            format!("{}.0e{}", mantissa, exponent)
        }
        _ => text,
    }
}
