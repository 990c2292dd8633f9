use uniffi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct FfiRange {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct TokenFfi {
    pub kind: String,
    pub text: String,
    pub range: FfiRange,
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct HighlightFfi {
    pub range: FfiRange,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct LexerInfoFfi {
    pub name: String,
    pub aliases: Vec<String>,
    pub filenames: Vec<String>,
    pub mimetypes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, uniffi::Record)]
pub struct StyleFfi {
    pub color: Option<String>,
    pub bgcolor: Option<String>,
    pub border: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum LexerErrorFfi {
    #[error("Lexer construction failed: {details}")]
    Construction { details: String },
    #[error("Invalid configuration: {details}")]
    Config { details: String },
    #[error("Invalid style: {details}")]
    Style { details: String },
    #[error("Unknown token category: {name}")]
    UnknownCategory { name: String },
}
