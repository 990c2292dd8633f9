use std::ops::Range;

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub range: Range<usize>,
    pub kind: TokenKind,
}

/// Collapses a token stream into styled spans, joining neighbours of the same
/// category. The comment state emits one token per character, so this is
/// what keeps a block comment down to a single span.
pub fn merge<'a>(tokens: impl IntoIterator<Item = Token<'a>>) -> Vec<Highlight> {
    let mut highlights: Vec<Highlight> = Vec::new();
    for token in tokens {
        match highlights.last_mut() {
            Some(last) if last.kind == token.kind && last.range.end == token.start => {
                last.range.end = token.end();
            }
            _ => highlights.push(Highlight {
                range: token.range(),
                kind: token.kind,
            }),
        }
    }
    highlights
}

pub fn highlight(lexer: &dyn Lexer, source: &str) -> Vec<Highlight> {
    merge(lexer.tokens(source))
}
