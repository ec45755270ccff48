//! Constant folding over expression subtrees
//!
//! This is not an evaluator. Literals, interpolated text and interpolated
//! strings made only of foldable pieces get a value; an `a + b` of constants
//! counts as constant without being computed; everything else is
//! [`ConstantValue::Unknown`].

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::syntax::{BinaryOp, LiteralKind, NodeId, NodeKind, SyntaxTree};

/// Result of folding a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstantValue {
    Bool(bool),
    Char(char),
    /// Exact decimal; `18.0m` keeps its scale.
    Number(Decimal),
    String(String),
    Unknown,
}

impl ConstantValue {
    pub fn is_unknown(&self) -> bool {
        matches!(self, ConstantValue::Unknown)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConstantValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Literal payload that folds back to this value, `None` for `Unknown`.
    pub fn to_literal(&self) -> Option<NodeKind> {
        let (literal, text) = match self {
            ConstantValue::Bool(true) => (LiteralKind::True, "true".to_string()),
            ConstantValue::Bool(false) => (LiteralKind::False, "false".to_string()),
            ConstantValue::Char(c) => (LiteralKind::Char, c.to_string()),
            ConstantValue::Number(n) => (LiteralKind::Numeric, format!("{n}m")),
            ConstantValue::String(s) => (LiteralKind::String, s.clone()),
            ConstantValue::Unknown => return None,
        };
        Some(NodeKind::Literal { literal, text })
    }

    /// Text this value contributes to an interpolated string.
    fn interpolation_text(&self) -> Option<String> {
        match self {
            ConstantValue::String(s) => Some(s.clone()),
            ConstantValue::Char(c) => Some(c.to_string()),
            ConstantValue::Number(n) => Some(n.to_string()),
            ConstantValue::Bool(_) | ConstantValue::Unknown => None,
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Bool(b) => write!(f, "{b}"),
            ConstantValue::Char(c) => write!(f, "{c}"),
            ConstantValue::Number(n) => write!(f, "{n}"),
            ConstantValue::String(s) => f.write_str(s),
            ConstantValue::Unknown => f.write_str("<unknown>"),
        }
    }
}

/// Fold the subtree rooted at `id`.
pub fn fold(tree: &SyntaxTree, id: NodeId) -> ConstantValue {
    let Some(kind) = tree.kind(id) else {
        return ConstantValue::Unknown;
    };
    match kind {
        NodeKind::Literal { literal, text } => fold_literal(*literal, text),
        NodeKind::InterpolatedText { text } => ConstantValue::String(text.clone()),
        NodeKind::Interpolation { expression } | NodeKind::Parenthesized { expression } => {
            fold(tree, *expression)
        }
        NodeKind::InterpolatedString { contents } => fold_interpolated(tree, contents),
        _ => ConstantValue::Unknown,
    }
}

fn fold_interpolated(tree: &SyntaxTree, contents: &[NodeId]) -> ConstantValue {
    if let [single] = contents {
        // `$"{18}"` is still a string
        return match fold(tree, *single) {
            ConstantValue::String(s) => ConstantValue::String(s),
            other => other
                .interpolation_text()
                .map_or(ConstantValue::Unknown, ConstantValue::String),
        };
    }

    let mut folded = String::new();
    for part in contents {
        match fold(tree, *part).interpolation_text() {
            Some(text) => folded.push_str(&text),
            None => return ConstantValue::Unknown,
        }
    }
    ConstantValue::String(folded)
}

/// Whether the subtree is a compile-time constant.
///
/// Wider than [`fold`]: concatenations of constants, initializers and array
/// creations whose elements are all constant qualify even though no value is
/// computed for them.
pub fn is_constant(tree: &SyntaxTree, id: NodeId) -> bool {
    match tree.kind(id) {
        Some(NodeKind::Binary {
            op: BinaryOp::Add,
            left,
            right,
        }) => is_constant(tree, *left) && is_constant(tree, *right),
        Some(NodeKind::Initializer { expressions }) => {
            expressions.iter().all(|e| is_constant(tree, *e))
        }
        Some(NodeKind::ArrayCreation {
            initializer: Some(initializer),
            ..
        }) => is_constant(tree, *initializer),
        Some(NodeKind::Parenthesized { expression }) => is_constant(tree, *expression),
        Some(_) => !fold(tree, id).is_unknown(),
        None => false,
    }
}

fn fold_literal(literal: LiteralKind, text: &str) -> ConstantValue {
    match literal {
        LiteralKind::String => ConstantValue::String(text.to_string()),
        LiteralKind::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => ConstantValue::Char(c),
                _ => ConstantValue::Unknown,
            }
        }
        LiteralKind::True => ConstantValue::Bool(true),
        LiteralKind::False => ConstantValue::Bool(false),
        LiteralKind::Numeric => {
            parse_numeric(text).map_or(ConstantValue::Unknown, ConstantValue::Number)
        }
        LiteralKind::Null => ConstantValue::Unknown,
    }
}

/// Parse a C# numeric literal token.
///
/// Integers and `m` literals are exact; `f`/`d` and unsuffixed real literals
/// are normalised since the source does not carry a meaningful scale.
pub fn parse_numeric(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|ch| *ch != '_')
        .collect::<String>()
        .to_ascii_lowercase();
    if cleaned.is_empty() {
        return None;
    }

    if let Some(digits) = cleaned.strip_prefix("0x") {
        return parse_radix(strip_integer_suffix(digits), 16);
    }
    if let Some(digits) = cleaned.strip_prefix("0b") {
        return parse_radix(strip_integer_suffix(digits), 2);
    }

    if let Some(body) = cleaned.strip_suffix('m') {
        return parse_decimal(body);
    }
    if let Some(body) = cleaned
        .strip_suffix('f')
        .or_else(|| cleaned.strip_suffix('d'))
    {
        return parse_decimal(body).map(|d| d.normalize());
    }

    let body = strip_integer_suffix(&cleaned);
    let value = parse_decimal(body)?;
    if body.contains(['.', 'e']) {
        Some(value.normalize())
    } else {
        Some(value)
    }
}

fn strip_integer_suffix(text: &str) -> &str {
    ["ul", "lu", "u", "l"]
        .iter()
        .find_map(|suffix| text.strip_suffix(suffix))
        .unwrap_or(text)
}

fn parse_radix(digits: &str, radix: u32) -> Option<Decimal> {
    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(Decimal::from)
}

fn parse_decimal(body: &str) -> Option<Decimal> {
    if body.is_empty() || !body.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    if body.contains('e') {
        Decimal::from_scientific(body).ok()
    } else {
        Decimal::from_str(body).ok()
    }
}
