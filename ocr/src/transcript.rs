use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::ocr::{Ocr, OcrResult};

/// Image extensions a transcript can belong to
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Extension of transcript files
pub const TRANSCRIPT_EXTENSION: &str = "txt";

/// OCR backed by transcripts recognized ahead of time
///
/// The transcript of `slip.png` is `slip.txt`, looked up in the transcript
/// directory when one is set, next to the image otherwise. A `.txt` path is
/// read as is.
pub struct TranscriptOcr {
    transcript_dir: Option<PathBuf>,
}

impl TranscriptOcr {
    /// Create a transcript reader
    ///
    /// # Arguments
    ///
    /// * `transcript_dir` - directory holding the transcripts
    pub fn new(transcript_dir: Option<PathBuf>) -> Self {
        Self { transcript_dir }
    }

    /// Transcript path of an image
    ///
    /// # Arguments
    ///
    /// * `image` - path of the image
    pub fn transcript_path(&self, image: &Path) -> Result<PathBuf> {
        let extension = image
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if extension == TRANSCRIPT_EXTENSION {
            return Ok(image.to_path_buf());
        }
        if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(anyhow!("unsupported file type: {}", image.display()));
        }

        let file_name = image
            .with_extension(TRANSCRIPT_EXTENSION)
            .file_name()
            .map(PathBuf::from)
            .context("image path has no file name")?;
        Ok(match &self.transcript_dir {
            Some(dir) => dir.join(file_name),
            None => image.with_extension(TRANSCRIPT_EXTENSION),
        })
    }
}

impl Ocr for TranscriptOcr {
    /// Read the transcript of an image
    ///
    /// # Arguments
    ///
    /// * `image` - path of the image
    fn recognize(&self, image: &Path) -> Result<OcrResult> {
        let path = self.transcript_path(image)?;
        let bytes = fs::read(&path)
            .with_context(|| format!("failed to read transcript {}", path.display()))?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        debug!("read transcript {} ({} bytes)", path.display(), bytes.len());
        Ok(OcrResult {
            text,
            confidence: 1.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_next_to_image() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("slip.txt"), "3 leg Parlay\n").unwrap();

        let ocr = TranscriptOcr::new(None);
        let result = ocr.recognize(&dir.path().join("slip.PNG")).unwrap();
        assert_eq!(result.text, "3 leg Parlay\n");
        assert_eq!(result.confidence, 1.0);

        let result = ocr.recognize(&dir.path().join("slip.txt")).unwrap();
        assert_eq!(result.text, "3 leg Parlay\n");
    }

    #[test]
    fn test_recognize_in_transcript_dir() {
        let images = tempfile::tempdir().unwrap();
        let transcripts = tempfile::tempdir().unwrap();
        fs::write(transcripts.path().join("slip.txt"), "MONEYLINE").unwrap();

        let ocr = TranscriptOcr::new(Some(transcripts.path().to_path_buf()));
        let result = ocr.recognize(&images.path().join("slip.jpg")).unwrap();
        assert_eq!(result.text, "MONEYLINE");
    }

    #[test]
    fn test_recognize_missing_or_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let ocr = TranscriptOcr::new(None);
        assert!(ocr.recognize(&dir.path().join("missing.png")).is_err());
        assert!(ocr.recognize(&dir.path().join("slip.gif")).is_err());
    }
}
