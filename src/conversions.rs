use std::ops::Range;

use crate::config::ConfigError;
use crate::ffi_types::{FfiRange, HighlightFfi, LexerErrorFfi, LexerInfoFfi, StyleFfi, TokenFfi};
use crate::highlight::Highlight;
use crate::lexer::{LexerError, LexerInfo};
use crate::style::{Font, StyleAttributes, StyleError};
use crate::token::{Token, UnknownTokenKind};

impl From<Range<usize>> for FfiRange {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start as u32,
            end: range.end as u32,
        }
    }
}

impl From<FfiRange> for Range<usize> {
    fn from(range: FfiRange) -> Self {
        range.start as usize..range.end as usize
    }
}

impl From<Token<'_>> for TokenFfi {
    fn from(token: Token<'_>) -> Self {
        TokenFfi {
            kind: token.kind.to_string(),
            text: token.text.to_string(),
            range: token.range().into(),
        }
    }
}

impl From<Highlight> for HighlightFfi {
    fn from(h: Highlight) -> Self {
        HighlightFfi {
            range: h.range.into(),
            kind: h.kind.to_string(),
        }
    }
}

impl From<&LexerInfo> for LexerInfoFfi {
    fn from(info: &LexerInfo) -> Self {
        let strings = |items: &[smol_str::SmolStr]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        LexerInfoFfi {
            name: info.name.to_string(),
            aliases: strings(&info.aliases),
            filenames: strings(&info.filenames),
            mimetypes: strings(&info.mimetypes),
        }
    }
}

impl From<StyleAttributes> for StyleFfi {
    fn from(attrs: StyleAttributes) -> Self {
        StyleFfi {
            color: attrs.color.map(|c| c.to_string()),
            bgcolor: attrs.bgcolor.map(|c| c.to_string()),
            border: attrs.border.map(|c| c.to_string()),
            bold: attrs.bold,
            italic: attrs.italic,
            underline: attrs.underline,
            font: attrs.font.map(|font| {
                match font {
                    Font::Roman => "roman",
                    Font::Sans => "sans",
                    Font::Mono => "mono",
                }
                .to_string()
            }),
        }
    }
}

impl From<LexerError> for LexerErrorFfi {
    fn from(err: LexerError) -> Self {
        Self::Construction {
            details: err.to_string(),
        }
    }
}

impl From<ConfigError> for LexerErrorFfi {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            details: err.to_string(),
        }
    }
}

impl From<StyleError> for LexerErrorFfi {
    fn from(err: StyleError) -> Self {
        Self::Style {
            details: err.to_string(),
        }
    }
}

impl From<UnknownTokenKind> for LexerErrorFfi {
    fn from(err: UnknownTokenKind) -> Self {
        Self::UnknownCategory { name: err.0 }
    }
}
