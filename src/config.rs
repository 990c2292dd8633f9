use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::token::TokenKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which reserved-word list the Alba lexer highlights.
///
/// Two lists circulated for the language. `Extended` is the canonical one;
/// `Legacy` lacks `do`, `else`, `if`, `section`, `then` and `use`, and only
/// exists for documentation trees written against the older list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordSet {
    #[default]
    Extended,
    Legacy,
}

impl KeywordSet {
    pub fn words(self) -> &'static [&'static str] {
        match self {
            Self::Extended => &[
                "all", "and", "case", "class", "do", "else", "if", "inspect", "mutual", "not", "or",
                "section", "then", "use", "where",
            ],
            Self::Legacy => &[
                "all", "and", "case", "class", "inspect", "mutual", "not", "or", "where",
            ],
        }
    }
}

/// Settings the embedding application passes to the setup hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtensionConfig {
    pub keywords: KeywordSet,
    /// Style strings replacing the built-in entry for a category.
    pub style_overrides: BTreeMap<TokenKind, String>,
}

impl ExtensionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_takes_defaults() {
        let config = ExtensionConfig::from_json("{}").unwrap();
        assert_eq!(config, ExtensionConfig::default());
        assert_eq!(config.keywords, KeywordSet::Extended);
    }

    #[test]
    fn reads_keywords_and_overrides() {
        let config = ExtensionConfig::from_json(
            r##"{
                "keywords": "legacy",
                "style_overrides": { "Keyword": "bold #00f", "Comment.Multiline": "noinherit #999" }
            }"##,
        )
        .unwrap();

        assert_eq!(config.keywords, KeywordSet::Legacy);
        assert_eq!(config.style_overrides.get(&TokenKind::Keyword).map(String::as_str), Some("bold #00f"));
        assert_eq!(
            config.style_overrides.get(&TokenKind::CommentMultiline).map(String::as_str),
            Some("noinherit #999")
        );
    }

    #[test]
    fn rejects_unknown_categories_and_fields() {
        assert!(matches!(
            ExtensionConfig::from_json(r##"{ "style_overrides": { "Name.Builtin": "#fff" } }"##),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ExtensionConfig::from_json(r#"{ "keyword": "legacy" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn legacy_list_is_a_subset() {
        let extended = KeywordSet::Extended.words();
        assert!(KeywordSet::Legacy.words().iter().all(|w| extended.contains(w)));
        assert_eq!(extended.len(), 15);
        assert_eq!(KeywordSet::Legacy.words().len(), 9);
    }
}
