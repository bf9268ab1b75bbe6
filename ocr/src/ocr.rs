use std::path::Path;

use anyhow::Result;

/// OCR result
#[derive(Debug, Clone)]
pub struct OcrResult {
    pub text: String,
    pub confidence: f32,
}

/// OCR interface
pub trait Ocr {
    /// Recognize the text of a bet slip image
    ///
    /// # Arguments
    ///
    /// * `image` - path of the image
    fn recognize(&self, image: &Path) -> Result<OcrResult>;
}
