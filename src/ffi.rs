use std::sync::Arc;

use log::debug;
use uniffi;

use crate::alba;
use crate::config::ExtensionConfig;
use crate::extension::VERSION;
use crate::ffi_types::{HighlightFfi, LexerErrorFfi, LexerInfoFfi, StyleFfi, TokenFfi};
use crate::highlight;
use crate::lexer::{Lexer, RegexLexer};
use crate::style::Style;
use crate::token::TokenKind;

/// Version string the host records for compatibility tracking.
#[uniffi::export]
pub fn alba_version() -> String {
    VERSION.to_string()
}

#[derive(Debug, uniffi::Object)]
pub struct AlbaLexerHandle {
    lexer: RegexLexer,
    style: Style,
}

#[uniffi::export]
impl AlbaLexerHandle {
    #[uniffi::constructor]
    pub fn new() -> Result<Arc<Self>, LexerErrorFfi> {
        Self::with_config(None)
    }

    /// `config_json` uses the same layout as the extension config file.
    #[uniffi::constructor]
    pub fn with_config(config_json: Option<String>) -> Result<Arc<Self>, LexerErrorFfi> {
        let config = match config_json {
            Some(json) => ExtensionConfig::from_json(&json)?,
            None => ExtensionConfig::default(),
        };
        debug!("Creating Alba lexer handle with {:?}", config);

        Ok(Arc::new(Self {
            lexer: alba::lexer(config.keywords)?,
            style: alba::configured_style(&config)?,
        }))
    }

    pub fn info(&self) -> LexerInfoFfi {
        self.lexer.info().into()
    }

    pub fn tokenize(&self, source: String) -> Vec<TokenFfi> {
        self.lexer.tokenize(&source).map(Into::into).collect()
    }

    pub fn highlight(&self, source: String) -> Vec<HighlightFfi> {
        highlight::merge(self.lexer.tokenize(&source))
            .into_iter()
            .map(Into::into)
            .collect()
    }

    pub fn style_for(&self, kind: String) -> Result<StyleFfi, LexerErrorFfi> {
        let kind: TokenKind = kind.parse()?;
        Ok(self.style.style_for(kind).into())
    }
}

#[cfg(test)]
#[path = "tests/ffi_tests.rs"]
mod ffi_tests;
