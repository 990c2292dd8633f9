pub mod alba;
pub mod config;
pub mod extension;
pub mod ffi;
pub mod ffi_types;
pub mod highlight;
pub mod lexer;
pub mod registry;
pub mod style;
pub mod token;

mod conversions;

pub use crate::config::{ExtensionConfig, KeywordSet};
pub use crate::extension::{ExtensionMetadata, SetupError, VERSION, setup};
pub use crate::lexer::{Lexer, LexerError, LexerInfo, RegexLexer};
pub use crate::registry::LexerRegistry;
pub use crate::style::{Style, StyleAttributes};
pub use crate::token::{Token, TokenKind};

uniffi::setup_scaffolding!();
