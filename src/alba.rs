//! The Alba rule table and colour style.
//!
//! `root` handles ordinary source text; `comment` is entered by `{-` and left
//! by the first `-}`. Block comments do not nest: a `{-` inside a comment is
//! plain comment text.

use crate::config::{ExtensionConfig, KeywordSet};
use crate::lexer::{LexerDefinition, LexerError, LexerInfo, RegexLexer, RuleDef, StateDef, Transition};
use crate::style::{Style, StyleError};
use crate::token::TokenKind;

pub const NAME: &str = "alba";
pub const ALIASES: &[&str] = &["Alba"];
pub const FILENAMES: &[&str] = &["*.al", "*.ali"];
pub const MIMETYPES: &[&str] = &["text/x-alba"];

pub const ROOT: &str = "root";
pub const COMMENT: &str = "comment";

const COMMENT_RULES: [RuleDef; 3] = [
    RuleDef::new(r"[^-]", TokenKind::CommentMultiline, Transition::None),
    RuleDef::new(r"-\}", TokenKind::CommentMultiline, Transition::Pop),
    RuleDef::new(r"-", TokenKind::CommentMultiline, Transition::None),
];

pub fn keyword_pattern(keywords: KeywordSet) -> String {
    format!(r"\b({})\b", keywords.words().join("|"))
}

pub fn definition(keywords: KeywordSet) -> LexerDefinition {
    let root = vec![
        RuleDef::new(r"\s+", TokenKind::Whitespace, Transition::None),
        RuleDef::new(r"--.*", TokenKind::CommentSingleline, Transition::None),
        RuleDef::new(r"\{-", TokenKind::CommentMultiline, Transition::Push(COMMENT)),
        RuleDef::owned(keyword_pattern(keywords), TokenKind::Keyword, Transition::None),
        RuleDef::new(r"[a-zA-Z][a-zA-Z_0-9]*", TokenKind::Name, Transition::None),
        RuleDef::new(r"[0-9]+", TokenKind::Number, Transition::None),
        RuleDef::new(r"[+*/:=~\\-]", TokenKind::Operator, Transition::None),
        RuleDef::new(r"(?s).", TokenKind::Text, Transition::None),
    ];

    LexerDefinition {
        info: LexerInfo::new(NAME)
            .with_aliases(ALIASES)
            .with_filenames(FILENAMES)
            .with_mimetypes(MIMETYPES),
        states: vec![
            StateDef { name: ROOT, rules: root },
            StateDef { name: COMMENT, rules: COMMENT_RULES.to_vec() },
        ],
    }
}

pub fn lexer(keywords: KeywordSet) -> Result<RegexLexer, LexerError> {
    RegexLexer::new(definition(keywords))
}

const STYLE_ENTRIES: &[(TokenKind, &str)] = &[
    (TokenKind::Comment, "italic #888"),
    (TokenKind::Keyword, "bold #005"),
    (TokenKind::Name, "#f00"),
    (TokenKind::NameFunction, "#0f0"),
    (TokenKind::NameClass, "bold #0f0"),
    (TokenKind::String, "bg:#eee #111"),
];

pub fn style() -> Result<Style, StyleError> {
    Style::new(NAME, "", STYLE_ENTRIES)
}

/// The Alba style with the configured overrides applied on top.
pub fn configured_style(config: &ExtensionConfig) -> Result<Style, StyleError> {
    let overrides = config
        .style_overrides
        .iter()
        .map(|(kind, rule)| (*kind, rule.as_str()));
    style()?.with_overrides(overrides)
}
