use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::{Result, SubOcrError};

fn default_extension() -> String {
    "png".to_string()
}

fn default_sort_by_name() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub frames: FramesConfig,
    #[serde(default)]
    pub dictionary: DictionaryConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Path to the OCR binary (e.g., tesseract)
    pub binary_path: String,
    /// Directory holding the trained language data (`--tessdata-dir`)
    pub tessdata_dir: Option<PathBuf>,
    /// Language model passed with `-l`
    pub language: String,
    /// Page segmentation mode; 6 treats the image as one uniform block of text
    pub page_segmentation_mode: u8,
    /// Suppress engine diagnostics on stderr
    pub quiet: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FramesConfig {
    /// Directory containing the cropped subtitle images
    pub images_dir: PathBuf,
    /// Image file extension, without the leading dot
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Process frames in file name order rather than directory order
    #[serde(default = "default_sort_by_name")]
    pub sort_by_name: bool,
    /// What to do with a frame whose name carries no timestamp
    #[serde(default)]
    pub on_malformed: MalformedFramePolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedFramePolicy {
    /// Abort: fail the whole run
    #[default]
    Abort,
    /// Skip: log a warning and continue with the next frame
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Newline-delimited word list
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Replacements applied after the built-in table, in order
    #[serde(default)]
    pub extra_replacements: Vec<Replacement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Image viewer launched with the frame path when a text prompt opens
    pub image_viewer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Subtitle file written at the end of the run
    pub path: PathBuf,
    /// Stop after this many entries; 0 or negative runs to the end
    pub max_entries: i64,
    /// Write accumulated entries even when the operator aborts
    pub flush_on_abort: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            binary_path: "tesseract".to_string(),
            tessdata_dir: None,
            language: "eng".to_string(),
            page_segmentation_mode: 6,
            quiet: true,
        }
    }
}

impl Default for FramesConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("TXTImages"),
            extension: default_extension(),
            sort_by_name: default_sort_by_name(),
            on_malformed: MalformedFramePolicy::Abort,
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("words_alpha.txt"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Output.srt"),
            max_entries: 0,
            flush_on_abort: false,
        }
    }
}

impl OutputConfig {
    /// Entry cap, or `None` when the run is unlimited
    pub fn entry_limit(&self) -> Option<usize> {
        usize::try_from(self.max_entries).ok().filter(|&n| n > 0)
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SubOcrError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SubOcrError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SubOcrError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| SubOcrError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [frames]
            images_dir = "frames"
            on_malformed = "skip"

            [output]
            path = "out.srt"
            max_entries = 10
            flush_on_abort = true
            "#,
        )
        .unwrap();

        assert_eq!(config.frames.images_dir, PathBuf::from("frames"));
        assert_eq!(config.frames.extension, "png");
        assert!(config.frames.sort_by_name);
        assert_eq!(config.frames.on_malformed, MalformedFramePolicy::Skip);
        assert_eq!(config.ocr.binary_path, "tesseract");
        assert_eq!(config.ocr.page_segmentation_mode, 6);
        assert_eq!(config.dictionary.path, PathBuf::from("words_alpha.txt"));
        assert_eq!(config.output.entry_limit(), Some(10));
    }

    #[test]
    fn test_entry_limit_unlimited() {
        let mut output = OutputConfig::default();
        assert_eq!(output.entry_limit(), None);
        output.max_entries = -3;
        assert_eq!(output.entry_limit(), None);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.ocr.tessdata_dir = Some(PathBuf::from("/usr/share/tessdata"));
        config.normalizer.extra_replacements.push(Replacement {
            from: "0f".to_string(),
            to: "of".to_string(),
        });
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.ocr.tessdata_dir, config.ocr.tessdata_dir);
        assert_eq!(loaded.normalizer.extra_replacements, config.normalizer.extra_replacements);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, SubOcrError::Config(_)));
    }
}
