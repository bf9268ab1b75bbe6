use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use ocr::{IMAGE_EXTENSIONS, Ocr, TRANSCRIPT_EXTENSION};
use parser::{Extraction, Extractor};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::ScanError;

/// Scan result of one file
#[derive(Serialize, Debug)]
pub struct ScanReport {
    pub file: String,
    /// Absent when the scan failed
    pub extraction: Option<Extraction>,
}

/// Lowercase extension of a path
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

fn is_image(path: &Path) -> bool {
    IMAGE_EXTENSIONS.contains(&extension_of(path).as_str())
}

fn is_supported(path: &Path) -> bool {
    is_image(path) || extension_of(path) == TRANSCRIPT_EXTENSION
}

/// Expand the inputs into the files to scan
///
/// Directories contribute their supported files in name order. A transcript
/// is skipped when an image with the same stem sits beside it.
///
/// # Arguments
///
/// * `inputs` - files and directories
pub fn collect_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
            continue;
        }
        if !input.is_dir() {
            bail!("input {} does not exist", input.display());
        }

        let mut entries = fs::read_dir(input)
            .with_context(|| format!("failed to read directory {}", input.display()))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("failed to read directory {}", input.display()))?;
        entries.retain(|path| path.is_file() && is_supported(path));
        entries.sort();

        let images = entries
            .iter()
            .filter(|path| is_image(path))
            .map(|path| path.with_extension(""))
            .collect::<Vec<_>>();
        entries.retain(|path| is_image(path) || !images.contains(&path.with_extension("")));

        debug!("found {} files in {}", entries.len(), input.display());
        files.extend(entries);
    }
    Ok(files)
}

/// Bet slip scanner
pub struct Scanner<'a> {
    ocr: &'a dyn Ocr,
    extractor: &'a Extractor,
    strict: bool,
}

impl<'a> Scanner<'a> {
    /// Create a scanner
    ///
    /// # Arguments
    ///
    /// * `ocr` - text recognizer
    /// * `extractor` - bet slip extractor
    /// * `strict` - fail slips whose leg count does not match
    pub fn new(ocr: &'a dyn Ocr, extractor: &'a Extractor, strict: bool) -> Self {
        Self {
            ocr,
            extractor,
            strict,
        }
    }

    /// Scan one file
    ///
    /// # Arguments
    ///
    /// * `file` - image or transcript path
    pub fn scan_file(&self, file: &Path) -> Result<Extraction, ScanError> {
        if !is_supported(file) {
            return Err(ScanError::UnsupportedFile(file.display().to_string()));
        }

        let ocr_result = self.ocr.recognize(file)?;
        debug!(
            "recognized {} chars with confidence {:.2}",
            ocr_result.text.len(),
            ocr_result.confidence
        );

        let extraction = self.extractor.extract(&ocr_result.text);
        let record = &extraction.record;
        if self.strict && !record.leg_count_matches() {
            return Err(ScanError::LegCountMismatch {
                expected: record.expected_legs,
                found: record.found_legs,
            });
        }
        Ok(extraction)
    }

    /// Scan every file of the inputs
    ///
    /// A file that fails to scan is logged and reported without a result.
    ///
    /// # Arguments
    ///
    /// * `inputs` - files and directories
    pub fn scan(&self, inputs: &[PathBuf]) -> Result<Vec<ScanReport>> {
        let files = collect_files(inputs)?;
        info!("scanning {} files", files.len());

        let mut reports = vec![];
        for file in files {
            info!("processing {}", file.display());
            let extraction = match self.scan_file(&file) {
                Ok(extraction) => {
                    info!("{}", extraction.record);
                    Some(extraction)
                }
                Err(e) => {
                    error!("failed to scan {}: {}", file.display(), e);
                    None
                }
            };
            reports.push(ScanReport {
                file: file.display().to_string(),
                extraction,
            });
        }

        let failed = reports.iter().filter(|r| r.extraction.is_none()).count();
        info!("scanned {} files, {} failed", reports.len(), failed);
        Ok(reports)
    }
}
