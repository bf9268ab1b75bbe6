use std::{io, path::Path};

use anyhow::{Result, bail};
use metadata::{SPORTSBOOK_INFO, SportsbookInfo};
use ocr::TranscriptOcr;
use parser::{Extractor, Vocabulary};
use tracing::{error, info};

use crate::{args::Args, log::init_log, report::write_reports, scanner::Scanner};

mod args;
mod error;
mod log;
mod report;
mod scanner;

/// Built-in sportsbooks extended with the user's list
///
/// # Arguments
///
/// * `sportsbooks_file` - optional YAML file with extra sportsbooks
fn load_sportsbooks(sportsbooks_file: Option<&str>) -> Result<SportsbookInfo> {
    let mut info = SPORTSBOOK_INFO.clone();
    if let Some(file) = sportsbooks_file {
        if !Path::new(file).exists() {
            bail!("sportsbooks file {} does not exist", file);
        }
        let sportsbooks = SportsbookInfo::load(file)?;
        info!("loaded {} sportsbooks from {}", sportsbooks.len(), file);
        info.extend(sportsbooks);
        info!("known sportsbooks: {}", info.get_sportsbook_names().join(", "));
    }
    Ok(info)
}

/// Program entry
fn application() -> Result<()> {
    let args = Args::new();

    init_log(&args)?;

    info!("slipscan: bet slip scanner");

    let sportsbooks = load_sportsbooks(args.sportsbooks_file.as_deref())?;
    let vocabulary = Vocabulary::new(sportsbooks.get_alias_map().clone())?;
    let extractor = Extractor::new(vocabulary);
    let ocr = TranscriptOcr::new(args.transcript_dir.clone());

    let scanner = Scanner::new(&ocr, &extractor, args.strict);
    let reports = scanner.scan(&args.inputs)?;

    let mut stdout = io::stdout().lock();
    write_reports(&mut stdout, &reports, args.format)
}

fn main() {
    match application() {
        Ok(_) => info!("done"),
        Err(e) => {
            error!("slipscan failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_load_sportsbooks() {
        let info = load_sportsbooks(None).unwrap();
        assert_eq!(
            info.get_sportsbook_name_by_alias("fanduel").as_deref(),
            Some("FanDuel")
        );

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("books.yaml");
        fs::write(&file, "- name: Prize Picks\n  alias:\n    - PRIZEPICKS\n").unwrap();
        let info = load_sportsbooks(file.to_str()).unwrap();
        assert_eq!(
            info.get_sportsbook_name_by_alias("PRIZEPICKS").as_deref(),
            Some("Prize Picks")
        );
        assert!(info.get_sportsbook_name_by_alias("FANDUEL").is_some());

        assert!(load_sportsbooks(Some("missing.yaml")).is_err());
    }
}
