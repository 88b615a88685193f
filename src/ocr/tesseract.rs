use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info};

use crate::config::OcrConfig;
use crate::error::{Result, SubOcrError};
use super::{OcrCommandBuilder, OcrEngine};

/// Tesseract command-line engine
pub struct TesseractEngine {
    config: OcrConfig,
    command_builder: OcrCommandBuilder,
}

impl TesseractEngine {
    pub fn new(config: OcrConfig) -> Self {
        let command_builder = OcrCommandBuilder::new(&config.binary_path);

        Self {
            config,
            command_builder,
        }
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn recognize(&self, image_path: &Path) -> Result<String> {
        if !image_path.is_file() {
            return Err(SubOcrError::FileNotFound(image_path.display().to_string()));
        }

        let command = self.command_builder.recognize(
            image_path,
            self.config.tessdata_dir.as_deref(),
            &self.config.language,
            self.config.page_segmentation_mode,
            self.config.quiet,
        );

        let text = command.execute().await?.trim().to_string();
        debug!("Recognized {:?} from {}", text, image_path.display());
        Ok(text)
    }

    async fn check_availability(&self) -> Result<()> {
        self.command_builder
            .version_check()
            .execute()
            .await
            .map_err(|e| SubOcrError::Ocr(format!("OCR engine not available: {}", e)))?;

        info!("OCR engine is available: {}", self.config.binary_path);
        Ok(())
    }

    async fn version_info(&self) -> Result<String> {
        let output = self.command_builder.version_check().execute().await?;
        Ok(output.lines().next().unwrap_or("Unknown version").trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_image_fails_before_spawning() {
        let engine = TesseractEngine::new(OcrConfig::default());
        let err = engine.recognize(Path::new("no/such/frame.png")).await.unwrap_err();
        assert!(matches!(err, SubOcrError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_unavailable_binary() {
        let engine = TesseractEngine::new(OcrConfig {
            binary_path: "definitely-not-a-real-ocr-binary".to_string(),
            ..OcrConfig::default()
        });
        assert!(matches!(engine.check_availability().await, Err(SubOcrError::Ocr(_))));
    }
}
