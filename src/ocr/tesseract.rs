// src/ocr/tesseract.rs
//! Text extraction through the Tesseract command-line engine.

use crate::algebras::{CapabilityError, TextExtractor};
use crate::constants::{DEFAULT_OCR_LANG, DEFAULT_TESSERACT_CMD};
use crate::error::AppError;
use std::io::Write;
use std::process::{Command, Stdio};

/// Runs `<cmd> stdin stdout -l <lang>` once per image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TesseractExtractor {
    command: String,
    lang: String,
}

impl Default for TesseractExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TESSERACT_CMD, DEFAULT_OCR_LANG)
    }
}

impl TesseractExtractor {
    pub fn new(command: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            lang: lang.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    fn args(&self) -> [&str; 4] {
        ["stdin", "stdout", "-l", self.lang.as_str()]
    }

    fn run(&self, image: &[u8]) -> Result<String, AppError> {
        let mut child = Command::new(&self.command)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                AppError::ExtractionFailed(format!("could not start '{}': {}", self.command, e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(image) {
                drop(stdin);
                // The engine quit before reading the whole image; reap it.
                let _ = child.kill();
                let status = child.wait()?;
                return Err(AppError::ExtractionFailed(format!(
                    "{} stopped reading the image ({}): {}",
                    self.command, status, e
                )));
            }
        }

        let out = child.wait_with_output()?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(AppError::ExtractionFailed(format!(
                "{} exited with {}: {}",
                self.command,
                out.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
    }
}

impl TextExtractor for TesseractExtractor {
    fn extract_text(&self, image: &[u8]) -> Result<String, CapabilityError> {
        if image.is_empty() {
            return Err(CapabilityError::InvalidInput {
                reason: "empty image".to_string(),
            });
        }
        self.run(image).map_err(CapabilityError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation() {
        let extractor = TesseractExtractor::new("/usr/local/bin/tesseract", "ara+eng");
        assert_eq!(extractor.args(), ["stdin", "stdout", "-l", "ara+eng"]);
        assert_eq!(TesseractExtractor::default().lang(), "eng");
    }

    #[test]
    fn test_missing_binary_is_extraction_failure() {
        let extractor = TesseractExtractor::new("definitely-not-a-real-ocr-binary", "eng");
        let err = extractor.extract_text(b"\x89PNG").unwrap_err();
        assert!(matches!(err, CapabilityError::Extraction { .. }));
    }

    #[test]
    fn test_empty_image_rejected() {
        let err = TesseractExtractor::default().extract_text(&[]).unwrap_err();
        assert!(matches!(err, CapabilityError::InvalidInput { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_engine_exiting_early_is_extraction_failure() {
        // `true` never reads stdin, so writing more than a pipe buffer fails.
        let extractor = TesseractExtractor::new("true", "eng");
        let image = vec![0u8; 4 * 1024 * 1024];
        let err = extractor.extract_text(&image).unwrap_err();
        match err {
            CapabilityError::Extraction { reason } => {
                assert!(reason.contains("stopped reading the image"), "{}", reason)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
