use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubOcrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("Dictionary error: {0}")]
    Dictionary(String),

    #[error("Malformed frame name '{name}': {reason}")]
    FrameParse { name: String, reason: String },

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, SubOcrError>;
