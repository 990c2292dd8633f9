use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alba;
use crate::config::{ConfigError, ExtensionConfig};
use crate::lexer::LexerError;
use crate::registry::LexerRegistry;
use crate::style::StyleError;

pub const VERSION: &str = "0.0.1";

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What the setup hook reports back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionMetadata {
    pub version: String,
}

impl Default for ExtensionMetadata {
    fn default() -> Self {
        Self {
            version: VERSION.to_string(),
        }
    }
}

/// Registers the Alba lexer and style. Calling it again is harmless: the
/// entries registered first are kept.
pub fn setup(registry: &mut LexerRegistry, config: &ExtensionConfig) -> Result<ExtensionMetadata, SetupError> {
    let lexer = alba::lexer(config.keywords)?;
    let style = alba::configured_style(config)?;

    let registered = registry.register(Arc::new(lexer));
    registry.register_style(style);
    if registered {
        info!("Alba highlighting {} ready ({:?} keywords)", VERSION, config.keywords);
    }

    Ok(ExtensionMetadata::default())
}
