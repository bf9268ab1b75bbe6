use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::Level;

/// Report output format
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Extract wagers, legs and payouts from bet slip screenshots
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Images, transcripts or directories to scan
    #[arg(default_values = ["images"])]
    pub inputs: Vec<PathBuf>,

    /// Directory holding the transcripts (defaults to next to each image)
    #[arg(short, long)]
    pub transcript_dir: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: Option<Level>,

    /// Log file path
    #[arg(long, default_value = "slipscan.log")]
    pub log_file: String,

    /// Append to the log file
    #[arg(long, default_value_t = false)]
    pub append_log: bool,

    /// YAML file with extra sportsbooks and aliases
    #[arg(short, long)]
    pub sportsbooks_file: Option<String>,

    /// Fail a slip whose declared leg count differs from the legs found
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

impl Args {
    /// Parse the command line
    pub fn new() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["slipscan"]);
        assert_eq!(args.inputs, vec![PathBuf::from("images")]);
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.log_level, Some(Level::INFO));
        assert_eq!(args.log_file, "slipscan.log");
        assert!(!args.strict);
        assert!(args.sportsbooks_file.is_none());
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "slipscan",
            "a.png",
            "slips",
            "--format",
            "json",
            "--strict",
            "-l",
            "debug",
            "-s",
            "books.yaml",
        ]);
        assert_eq!(
            args.inputs,
            vec![PathBuf::from("a.png"), PathBuf::from("slips")]
        );
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.log_level, Some(Level::DEBUG));
        assert_eq!(args.sportsbooks_file.as_deref(), Some("books.yaml"));
        assert!(args.strict);
    }
}
