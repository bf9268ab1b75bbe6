mod ocr;
mod transcript;

pub use ocr::{Ocr, OcrResult};
pub use transcript::{IMAGE_EXTENSIONS, TRANSCRIPT_EXTENSION, TranscriptOcr};
