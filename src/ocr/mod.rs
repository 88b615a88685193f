// OCR engine abstraction
//
// - Commands: argument builder for the engine binary
// - Tesseract: the command-line tesseract engine

pub mod commands;
pub mod tesseract;

use async_trait::async_trait;
use std::path::Path;

pub use commands::*;
pub use tesseract::*;

use crate::config::OcrConfig;
use crate::error::Result;

/// Text recognition over a single subtitle image
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize the text in an image, trimmed of surrounding whitespace
    async fn recognize(&self, image_path: &Path) -> Result<String>;

    /// Fail if the engine cannot be run
    async fn check_availability(&self) -> Result<()>;

    /// First line of the engine's version output
    async fn version_info(&self) -> Result<String>;
}

/// Factory for creating OCR engine instances
pub struct OcrEngineFactory;

impl OcrEngineFactory {
    /// Create the default engine (tesseract)
    pub fn create_engine(config: OcrConfig) -> Box<dyn OcrEngine> {
        Box::new(TesseractEngine::new(config))
    }
}
