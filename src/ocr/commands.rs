use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, SubOcrError};

/// OCR engine invocation, built up argument by argument
#[derive(Debug, Clone)]
pub struct OcrCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub description: String,
}

impl OcrCommand {
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Directory holding trained language data
    pub fn tessdata_dir<P: AsRef<Path>>(self, dir: P) -> Self {
        self.arg("--tessdata-dir").arg(dir.as_ref().to_string_lossy().to_string())
    }

    /// Image to recognize
    pub fn image<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Send recognized text to stdout
    pub fn output_stdout(self) -> Self {
        self.arg("-")
    }

    pub fn language<S: Into<String>>(self, language: S) -> Self {
        self.arg("-l").arg(language)
    }

    pub fn page_segmentation_mode(self, psm: u8) -> Self {
        self.arg("--psm").arg(psm.to_string())
    }

    /// Silence engine diagnostics
    pub fn quiet(self) -> Self {
        self.arg("quiet")
    }

    /// Run the command and return its stdout as UTF-8
    pub async fn execute(&self) -> Result<String> {
        debug!("Executing OCR command: {} {:?}", self.binary_path, self.args);

        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| {
                SubOcrError::Ocr(format!("Failed to execute {}: {}", self.binary_path, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SubOcrError::Ocr(format!(
                "{} failed ({}): {}",
                self.description,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            SubOcrError::Ocr(format!("{} produced invalid UTF-8: {}", self.description, e))
        })
    }
}

/// Builder for the engine invocations the pipeline needs
pub struct OcrCommandBuilder {
    binary_path: String,
}

impl OcrCommandBuilder {
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Build a recognition command for a single image
    pub fn recognize<P: AsRef<Path>>(
        &self,
        image_path: P,
        tessdata_dir: Option<&Path>,
        language: &str,
        psm: u8,
        quiet: bool,
    ) -> OcrCommand {
        let mut cmd = OcrCommand::new(&self.binary_path, "Text recognition");
        if let Some(dir) = tessdata_dir {
            cmd = cmd.tessdata_dir(dir);
        }

        cmd = cmd
            .image(image_path)
            .output_stdout()
            .language(language)
            .page_segmentation_mode(psm);

        if quiet {
            cmd = cmd.quiet();
        }
        cmd
    }

    /// Build version check command
    pub fn version_check(&self) -> OcrCommand {
        OcrCommand::new(&self.binary_path, "Version check").arg("--version")
    }
}
