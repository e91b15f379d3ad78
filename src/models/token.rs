//! Token model
//!
//! A token is a leaf value in a nested, insertion-ordered tree. Its identity is
//! its path within the tree; values are either literals or references to other
//! tokens written as `{a.b.c}`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dotted path identifying a token within a tree (e.g. `primary.900`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TokenPath(Vec<String>);

impl TokenPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Parse a dot-separated path. Empty segments are dropped.
    pub fn from_dotted(path: &str) -> Self {
        Self(
            path.split('.')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    /// Parse a slash-separated remote variable name (`primary/900`)
    pub fn from_slashed(name: &str) -> Self {
        Self(
            name.split('/')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Path with `segment` appended
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Path without its first segment
    pub fn tail(&self) -> Self {
        Self(self.0.iter().skip(1).cloned().collect())
    }

    /// Join segments with an arbitrary separator
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }

    /// Remote variable naming uses `/` as separator
    pub fn to_slashed(&self) -> String {
        self.join("/")
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join("."))
    }
}

impl From<&str> for TokenPath {
    fn from(path: &str) -> Self {
        TokenPath::from_dotted(path)
    }
}

/// Literal scalar carried by a token
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Scalar {
    /// Convert a JSON scalar; objects, arrays and null have no scalar form
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Scalar::Text(s.clone())),
            serde_json::Value::Number(n) => n.as_f64().map(Scalar::Number),
            serde_json::Value::Bool(b) => Some(Scalar::Bool(*b)),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Scalar::Text(s) => serde_json::Value::String(s.clone()),
            Scalar::Number(n) => crate::convert::units::number_to_json(*n),
            Scalar::Bool(b) => serde_json::Value::Bool(*b),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Number(n) => write!(f, "{}", crate::convert::units::format_number(*n)),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Token value: either a literal or an alias of another token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Literal(Scalar),
    Reference(TokenPath),
}

impl TokenValue {
    pub fn text(value: impl Into<String>) -> Self {
        TokenValue::Literal(Scalar::Text(value.into()))
    }

    pub fn number(value: f64) -> Self {
        TokenValue::Literal(Scalar::Number(value))
    }

    /// Classify a scalar: strings of the form `{a.b.c}` are references
    pub fn from_scalar(scalar: Scalar) -> Self {
        if let Scalar::Text(ref s) = scalar
            && let Some(path) = parse_reference(s)
        {
            return TokenValue::Reference(path);
        }
        TokenValue::Literal(scalar)
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, TokenValue::Reference(_))
    }

    pub fn as_literal(&self) -> Option<&Scalar> {
        match self {
            TokenValue::Literal(s) => Some(s),
            TokenValue::Reference(_) => None,
        }
    }

    /// Literal equality up to notation. Colors compare by channel bytes
    /// (`#6E7A8840` matches `#6e7a8840`), numeric types by magnitude
    /// (`"0.4"` matches `0.4`, `"16px"` matches `16`).
    pub fn same_literal(&self, other: &TokenValue, token_type: &TokenType) -> bool {
        if self == other {
            return true;
        }
        let (Some(a), Some(b)) = (self.as_literal(), other.as_literal()) else {
            return false;
        };
        if *token_type == TokenType::Color {
            let hex = |s: &Scalar| {
                s.as_text()
                    .and_then(crate::convert::color::parse_color)
                    .map(|c| crate::convert::color::color_to_hex(&c))
            };
            return matches!((hex(a), hex(b)), (Some(x), Some(y)) if x == y);
        }
        if token_type.is_numeric() {
            let magnitude = |s: &Scalar| match s {
                Scalar::Number(n) => Some(*n),
                Scalar::Text(t) => crate::convert::units::parse_dimension(t),
                Scalar::Bool(_) => None,
            };
            return magnitude(a)
                .zip(magnitude(b))
                .is_some_and(|(x, y)| (x - y).abs() < 1e-4);
        }
        false
    }

    /// JSON form used by source files and the diff reporter
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            TokenValue::Literal(s) => s.to_json(),
            TokenValue::Reference(path) => serde_json::Value::String(format!("{{{}}}", path)),
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Literal(s) => write!(f, "{}", s),
            TokenValue::Reference(path) => write!(f, "{{{}}}", path),
        }
    }
}

/// Parse `{a.b.c}` into a path
pub fn parse_reference(value: &str) -> Option<TokenPath> {
    let trimmed = value.trim();
    let inner = trimmed.strip_prefix('{')?.strip_suffix('}')?;
    if inner.is_empty() || inner.contains(['{', '}']) {
        return None;
    }
    let path = TokenPath::from_dotted(inner);
    (!path.is_empty()).then_some(path)
}

/// Token type tag as used by the leaf-node (Tokens Studio) format
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenType {
    Color,
    FontFamilies,
    FontSizes,
    FontWeights,
    LineHeights,
    LetterSpacing,
    Spacing,
    Sizing,
    BorderRadius,
    BoxShadow,
    Opacity,
    Duration,
    CubicBezier,
    Other(String),
}

impl TokenType {
    pub fn as_str(&self) -> &str {
        match self {
            TokenType::Color => "color",
            TokenType::FontFamilies => "fontFamilies",
            TokenType::FontSizes => "fontSizes",
            TokenType::FontWeights => "fontWeights",
            TokenType::LineHeights => "lineHeights",
            TokenType::LetterSpacing => "letterSpacing",
            TokenType::Spacing => "spacing",
            TokenType::Sizing => "sizing",
            TokenType::BorderRadius => "borderRadius",
            TokenType::BoxShadow => "boxShadow",
            TokenType::Opacity => "opacity",
            TokenType::Duration => "duration",
            TokenType::CubicBezier => "cubicBezier",
            TokenType::Other(tag) => tag,
        }
    }

    /// Types whose text values carry a `px` unit that the leaf format omits
    pub fn carries_px_unit(&self) -> bool {
        matches!(
            self,
            TokenType::Spacing | TokenType::FontSizes | TokenType::BorderRadius | TokenType::Sizing
        )
    }

    /// Types exported to the remote API as FLOAT variables
    pub fn is_numeric(&self) -> bool {
        self.carries_px_unit()
            || matches!(
                self,
                TokenType::FontWeights | TokenType::LineHeights | TokenType::Opacity
            )
    }
}

impl FromStr for TokenType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "color" => TokenType::Color,
            "fontFamilies" => TokenType::FontFamilies,
            "fontSizes" => TokenType::FontSizes,
            "fontWeights" => TokenType::FontWeights,
            "lineHeights" => TokenType::LineHeights,
            "letterSpacing" => TokenType::LetterSpacing,
            "spacing" => TokenType::Spacing,
            "sizing" => TokenType::Sizing,
            "borderRadius" => TokenType::BorderRadius,
            "boxShadow" => TokenType::BoxShadow,
            "opacity" => TokenType::Opacity,
            "duration" => TokenType::Duration,
            "cubicBezier" => TokenType::CubicBezier,
            other => TokenType::Other(other.to_string()),
        })
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TokenType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TokenType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        let Ok(token_type) = tag.parse::<TokenType>();
        Ok(token_type)
    }
}

/// A single design token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub value: TokenValue,
    pub token_type: TokenType,
    pub description: Option<String>,
}

impl Token {
    pub fn new(value: TokenValue, token_type: TokenType) -> Self {
        Self {
            value,
            token_type,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Node of a token tree: a leaf token or a nested group
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Token(Token),
    Group(TokenTree),
}

/// Insertion-ordered tree of token groups
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenTree {
    children: IndexMap<String, TokenNode>,
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of leaf tokens in the whole tree
    pub fn token_count(&self) -> usize {
        self.children
            .values()
            .map(|node| match node {
                TokenNode::Token(_) => 1,
                TokenNode::Group(group) => group.token_count(),
            })
            .sum()
    }

    pub fn children(&self) -> impl Iterator<Item = (&String, &TokenNode)> {
        self.children.iter()
    }

    pub fn child(&self, key: &str) -> Option<&TokenNode> {
        self.children.get(key)
    }

    /// Insert a direct child, replacing any previous node under `key`
    pub fn insert_node(&mut self, key: impl Into<String>, node: TokenNode) {
        self.children.insert(key.into(), node);
    }

    /// Insert a token at `path`, creating intermediate groups. A token sitting
    /// where a group is needed is replaced by the group.
    pub fn insert(&mut self, path: &TokenPath, token: Token) {
        let Some((last, parents)) = path.segments().split_last() else {
            return;
        };
        let mut current = self;
        for segment in parents {
            let entry = current
                .children
                .entry(segment.clone())
                .or_insert_with(|| TokenNode::Group(TokenTree::new()));
            if let TokenNode::Token(_) = entry {
                *entry = TokenNode::Group(TokenTree::new());
            }
            let TokenNode::Group(group) = entry else {
                return;
            };
            current = group;
        }
        current.children.insert(last.clone(), TokenNode::Token(token));
    }

    /// Look up a node by path
    pub fn get_node(&self, path: &TokenPath) -> Option<&TokenNode> {
        let (first, rest) = path.segments().split_first()?;
        let node = self.children.get(first)?;
        if rest.is_empty() {
            return Some(node);
        }
        match node {
            TokenNode::Group(group) => group.get_node(&TokenPath::new(rest.to_vec())),
            TokenNode::Token(_) => None,
        }
    }

    /// Look up a leaf token by path
    pub fn get(&self, path: &TokenPath) -> Option<&Token> {
        match self.get_node(path)? {
            TokenNode::Token(token) => Some(token),
            TokenNode::Group(_) => None,
        }
    }

    pub fn get_mut(&mut self, path: &TokenPath) -> Option<&mut Token> {
        let (first, rest) = path.segments().split_first()?;
        match self.children.get_mut(first)? {
            TokenNode::Token(token) if rest.is_empty() => Some(token),
            TokenNode::Group(group) if !rest.is_empty() => {
                group.get_mut(&TokenPath::new(rest.to_vec()))
            }
            _ => None,
        }
    }

    /// Depth-first leaves in insertion order
    pub fn leaves(&self) -> Vec<(TokenPath, &Token)> {
        let mut out = Vec::new();
        self.collect_leaves(&TokenPath::default(), &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, prefix: &TokenPath, out: &mut Vec<(TokenPath, &'a Token)>) {
        for (key, node) in &self.children {
            let path = prefix.child(key.clone());
            match node {
                TokenNode::Token(token) => out.push((path, token)),
                TokenNode::Group(group) => group.collect_leaves(&path, out),
            }
        }
    }

    /// Nested JSON of raw values, the shape used by source files
    pub fn to_value_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (key, node) in &self.children {
            let value = match node {
                TokenNode::Token(token) => token.value.to_json(),
                TokenNode::Group(group) => group.to_value_json(),
            };
            map.insert(key.clone(), value);
        }
        serde_json::Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(hex: &str) -> Token {
        Token::new(TokenValue::text(hex), TokenType::Color)
    }

    #[test]
    fn test_reference_parsing() {
        assert_eq!(
            parse_reference("{primary.900}"),
            Some(TokenPath::from_dotted("primary.900"))
        );
        assert_eq!(parse_reference("primary.900"), None);
        assert_eq!(parse_reference("{}"), None);
        assert_eq!(parse_reference("{a}{b}"), None);

        let value = TokenValue::from_scalar(Scalar::Text("{accent.500}".to_string()));
        assert!(value.is_reference());
        assert_eq!(value.to_string(), "{accent.500}");
    }

    #[test]
    fn test_same_literal_ignores_notation() {
        let alpha = TokenValue::text("#6E7A8840");
        assert!(alpha.same_literal(&TokenValue::text("#6e7a8840"), &TokenType::Color));
        assert!(!alpha.same_literal(&TokenValue::text("#6e7a8841"), &TokenType::Color));

        let opacity = TokenValue::number(0.4);
        assert!(opacity.same_literal(&TokenValue::text("0.4"), &TokenType::Opacity));
        assert!(opacity.same_literal(&TokenValue::number(0.4000000059604645), &TokenType::Opacity));
        assert!(TokenValue::text("16px").same_literal(&TokenValue::number(16.0), &TokenType::Spacing));

        // only numeric types compare by magnitude
        assert!(!TokenValue::text("1").same_literal(&TokenValue::number(1.0), &TokenType::Duration));
        assert!(!TokenValue::Reference("primary.900".into())
            .same_literal(&TokenValue::text("#0A1F44"), &TokenType::Color));
    }

    #[test]
    fn test_insert_and_lookup_preserve_order() {
        let mut tree = TokenTree::new();
        tree.insert(&"primary.900".into(), color("#0A1F44"));
        tree.insert(&"primary.50".into(), color("#E8F2FC"));
        tree.insert(&"white".into(), color("#FFFFFF"));

        let paths: Vec<String> = tree.leaves().iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(paths, vec!["primary.900", "primary.50", "white"]);
        assert_eq!(tree.token_count(), 3);
        assert_eq!(
            tree.get(&"primary.50".into()).map(|t| t.value.to_string()),
            Some("#E8F2FC".to_string())
        );
        assert!(tree.get(&"primary".into()).is_none());
        assert!(tree.get_node(&"primary".into()).is_some());
    }

    #[test]
    fn test_insert_replaces_token_with_group() {
        let mut tree = TokenTree::new();
        tree.insert(&"border".into(), color("#000000"));
        tree.insert(&"border.focus".into(), color("#3AF2D7"));
        assert!(tree.get(&"border".into()).is_none());
        assert!(tree.get(&"border.focus".into()).is_some());
    }

    #[test]
    fn test_token_type_tags() {
        let parsed: TokenType = "fontSizes".parse().unwrap();
        assert_eq!(parsed, TokenType::FontSizes);
        let other: TokenType = "textCase".parse().unwrap();
        assert_eq!(other.as_str(), "textCase");
        assert!(TokenType::BorderRadius.carries_px_unit());
        assert!(!TokenType::LineHeights.carries_px_unit());
        assert!(TokenType::LineHeights.is_numeric());
    }

    #[test]
    fn test_path_forms() {
        let path = TokenPath::from_slashed("semantic/background/primary");
        assert_eq!(path.to_string(), "semantic.background.primary");
        assert_eq!(path.tail().to_slashed(), "background/primary");
        assert_eq!(path.first(), Some("semantic"));
    }
}
