use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lexical categories, arranged in the same dotted hierarchy documentation
/// hosts use to pick styles (`Comment.Multiline` inherits from `Comment`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TokenKind {
    Text,
    Whitespace,
    Error,
    Other,
    Keyword,
    Name,
    NameFunction,
    NameClass,
    Literal,
    Number,
    String,
    Operator,
    Punctuation,
    Comment,
    CommentSingleline,
    CommentMultiline,
    Generic,
}

impl TokenKind {
    pub const ALL: [TokenKind; 17] = [
        Self::Text,
        Self::Whitespace,
        Self::Error,
        Self::Other,
        Self::Keyword,
        Self::Name,
        Self::NameFunction,
        Self::NameClass,
        Self::Literal,
        Self::Number,
        Self::String,
        Self::Operator,
        Self::Punctuation,
        Self::Comment,
        Self::CommentSingleline,
        Self::CommentMultiline,
        Self::Generic,
    ];

    /// `None` for top-level categories.
    pub fn parent(self) -> Option<TokenKind> {
        match self {
            Self::Whitespace => Some(Self::Text),
            Self::NameFunction | Self::NameClass => Some(Self::Name),
            Self::Number | Self::String => Some(Self::Literal),
            Self::CommentSingleline | Self::CommentMultiline => Some(Self::Comment),
            _ => None,
        }
    }

    /// The chain from the top-level category down to `self`, inclusive.
    pub fn lineage(self) -> Vec<TokenKind> {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(parent) = current.parent() {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    pub fn is_subtype_of(self, other: TokenKind) -> bool {
        self.lineage().contains(&other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Whitespace => "Text.Whitespace",
            Self::Error => "Error",
            Self::Other => "Other",
            Self::Keyword => "Keyword",
            Self::Name => "Name",
            Self::NameFunction => "Name.Function",
            Self::NameClass => "Name.Class",
            Self::Literal => "Literal",
            Self::Number => "Literal.Number",
            Self::String => "Literal.String",
            Self::Operator => "Operator",
            Self::Punctuation => "Punctuation",
            Self::Comment => "Comment",
            Self::CommentSingleline => "Comment.Singleline",
            Self::CommentMultiline => "Comment.Multiline",
            Self::Generic => "Generic",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown token category: {0}")]
pub struct UnknownTokenKind(pub String);

impl FromStr for TokenKind {
    type Err = UnknownTokenKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Hosts sometimes hand over the fully qualified `Token.` prefix.
        let name = s.strip_prefix("Token.").unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| UnknownTokenKind(s.to_string()))
    }
}

impl From<TokenKind> for String {
    fn from(kind: TokenKind) -> Self {
        kind.as_str().to_string()
    }
}

impl TryFrom<String> for TokenKind {
    type Error = UnknownTokenKind;

    fn try_from(value: String) -> Result<Self, UnknownTokenKind> {
        value.parse()
    }
}

/// A classified span of the input, borrowed from the buffer being tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, start: usize) -> Self {
        Self { kind, text, start }
    }

    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}
