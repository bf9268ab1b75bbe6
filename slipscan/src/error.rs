use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("unsupported file: {0}")]
    UnsupportedFile(String),
    #[error("slip declares {expected} legs but {found} were found")]
    LegCountMismatch { expected: usize, found: usize },
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}
