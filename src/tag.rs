use crate::ast::Kind;

/// Semantic categories used to label markup units for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    // Punctuation
    Paren,
    Comma,

    // Constants
    Nil,
    Bool,
    Number,
    NumberHex,
    NumberDecimal,
    Rational,
    Char,
    String,
    Keyword,

    // Names
    Variable,
    VariableType,
    ReservedWord,

    // Quoting
    Quoted,
    Unquoted,

    // Operators
    OperatorDot,
    OperatorMisc,
    OperatorArithmetic,
    OperatorBitwise,
    OperatorComparison,

    // Collections
    Pair,
    Tuple,
    Vect,
    Dict,

    // Structure
    Block,
    If,
    Assignment,
    Comparison,
    Function,
    Macro,
}

const ARITHMETIC_OPERATORS: &[&str] = &["+", "-", "*", "/", "\\", "^", "%", "//"];
const BITWISE_OPERATORS: &[&str] = &["~", "&", "|", "$", ">>", "<<", ">>>"];
const COMPARISON_OPERATORS: &[&str] = &["==", "!=", "<", ">", "<=", ">="];
const MISC_OPERATORS: &[&str] = &[":", ".", "::", "=>", "..."];

impl Tag {
    pub const ALL: &'static [Tag] = &[
        Tag::Paren,
        Tag::Comma,
        Tag::Nil,
        Tag::Bool,
        Tag::Number,
        Tag::NumberHex,
        Tag::NumberDecimal,
        Tag::Rational,
        Tag::Char,
        Tag::String,
        Tag::Keyword,
        Tag::Variable,
        Tag::VariableType,
        Tag::ReservedWord,
        Tag::Quoted,
        Tag::Unquoted,
        Tag::OperatorDot,
        Tag::OperatorMisc,
        Tag::OperatorArithmetic,
        Tag::OperatorBitwise,
        Tag::OperatorComparison,
        Tag::Pair,
        Tag::Tuple,
        Tag::Vect,
        Tag::Dict,
        Tag::Block,
        Tag::If,
        Tag::Assignment,
        Tag::Comparison,
        Tag::Function,
        Tag::Macro,
    ];

    /// Markup selector for this category, e.g. `.constant.number`: no element
    /// name (so the flattener falls back to `span`) and one class per path
    /// segment. This is the only spelling of a tag.
    pub fn selector(&self) -> &'static str {
        match self {
            Tag::Paren => ".punctuation.paren",
            Tag::Comma => ".punctuation.comma",
            Tag::Nil => ".constant.nil",
            Tag::Bool => ".constant.bool",
            Tag::Number => ".constant.number",
            Tag::NumberHex => ".constant.number.hex",
            Tag::NumberDecimal => ".constant.number.decimal",
            Tag::Rational => ".constant.rational",
            Tag::Char => ".constant.char",
            Tag::String => ".constant.string",
            Tag::Keyword => ".constant.keyword",
            Tag::Variable => ".variable",
            Tag::VariableType => ".variable.type",
            Tag::ReservedWord => ".keyword.reserved",
            Tag::Quoted => ".quoted",
            Tag::Unquoted => ".unquoted",
            Tag::OperatorDot => ".operator.dot",
            Tag::OperatorMisc => ".operator.misc",
            Tag::OperatorArithmetic => ".operator.arithmetic",
            Tag::OperatorBitwise => ".operator.bitwise",
            Tag::OperatorComparison => ".operator.comparison",
            Tag::Pair => ".collection.pair",
            Tag::Tuple => ".collection.tuple",
            Tag::Vect => ".collection.vect",
            Tag::Dict => ".collection.dict",
            Tag::Block => ".structure.block",
            Tag::If => ".structure.if",
            Tag::Assignment => ".structure.assignment",
            Tag::Comparison => ".structure.comparison",
            Tag::Function => ".structure.function",
            Tag::Macro => ".structure.macro",
        }
    }
}

/// Classify an identifier or operator by its spelling. Operator sets are
/// tried in order; the first match wins.
pub fn classify_symbol(name: &str) -> Tag {
    if ARITHMETIC_OPERATORS.contains(&name) {
        Tag::OperatorArithmetic
    } else if BITWISE_OPERATORS.contains(&name) {
        Tag::OperatorBitwise
    } else if COMPARISON_OPERATORS.contains(&name) {
        Tag::OperatorComparison
    } else if MISC_OPERATORS.contains(&name) {
        Tag::OperatorMisc
    } else if name.chars().next().is_some_and(char::is_uppercase) {
        Tag::VariableType
    } else {
        Tag::Variable
    }
}

/// The tag wrapping a whole node of the given kind in markup mode.
pub fn kind_tag(kind: &Kind) -> Option<Tag> {
    let tag = match kind {
        Kind::Rational => Tag::Rational,
        Kind::Pair => Tag::Pair,
        Kind::Tuple | Kind::Parameters => Tag::Tuple,
        Kind::List | Kind::Ref => Tag::Vect,
        Kind::Dict => Tag::Dict,
        Kind::Quote => Tag::Quoted,
        Kind::Unquote => Tag::Unquoted,
        Kind::Splat | Kind::Range => Tag::OperatorMisc,
        Kind::Block | Kind::Let | Kind::Module | Kind::TopLevel => Tag::Block,
        Kind::If | Kind::ElseIf => Tag::If,
        Kind::Comparison | Kind::And | Kind::Or => Tag::Comparison,
        Kind::Function | Kind::Lambda | Kind::Call => Tag::Function,
        Kind::Macro | Kind::MacroCall => Tag::Macro,
        Kind::Assign | Kind::Kw => Tag::Assignment,
        Kind::Dot => Tag::OperatorDot,
        Kind::TypeAnnotation | Kind::Curly => Tag::VariableType,
        Kind::Import | Kind::Using | Kind::Export => Tag::ReservedWord,
        Kind::Unknown(_) => return None,
    };
    Some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifiers_are_variables() {
        assert_eq!(Tag::Variable, classify_symbol("x"));
        assert_eq!(Tag::Variable, classify_symbol("push!"));
    }

    #[test]
    fn capitalized_identifiers_are_types() {
        assert_eq!(Tag::VariableType, classify_symbol("Vector"));
        assert_eq!(Tag::VariableType, classify_symbol("Δ"));
    }

    #[test]
    fn operator_priority_order() {
        assert_eq!(Tag::OperatorArithmetic, classify_symbol("//"));
        assert_eq!(Tag::OperatorArithmetic, classify_symbol("\\"));
        assert_eq!(Tag::OperatorBitwise, classify_symbol("$"));
        assert_eq!(Tag::OperatorBitwise, classify_symbol(">>>"));
        assert_eq!(Tag::OperatorComparison, classify_symbol("<="));
        assert_eq!(Tag::OperatorMisc, classify_symbol("::"));
        assert_eq!(Tag::OperatorMisc, classify_symbol("..."));
    }

    #[test]
    fn every_supported_kind_has_a_tag() {
        for kind in Kind::ALL {
            assert!(kind_tag(kind).is_some(), "{} has no tag", kind.name());
        }
        assert_eq!(None, kind_tag(&Kind::from_name("weird")));
    }

    #[test]
    fn selectors_are_distinct_class_lists() {
        let mut seen = std::collections::HashSet::new();
        for tag in Tag::ALL {
            assert!(tag.selector().starts_with('.'), "{:?}", tag);
            assert!(seen.insert(tag.selector()), "{:?} shares a selector", tag);
        }
    }
}
