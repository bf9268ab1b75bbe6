use std::io::Write;

use anyhow::Result;

use crate::{args::OutputFormat, scanner::ScanReport};

const RULE: &str = "==================================================";

/// Write the per-file reports followed by the batch summary
///
/// # Arguments
///
/// * `writer` - output
/// * `reports` - scan results
/// * `format` - output format
pub fn write_reports<W: Write>(
    writer: &mut W,
    reports: &[ScanReport],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, reports)?;
            writeln!(writer)?;
        }
        OutputFormat::Text => {
            for report in reports {
                write_details(writer, report)?;
            }
            write_summary(writer, reports)?;
        }
    }
    Ok(())
}

fn write_details<W: Write>(writer: &mut W, report: &ScanReport) -> Result<()> {
    writeln!(writer, "\nProcessing: {}", report.file)?;
    writeln!(writer, "{}", RULE)?;

    let Some(extraction) = &report.extraction else {
        writeln!(writer, "Scan failed, see the log for details")?;
        return Ok(());
    };
    let record = &extraction.record;

    writeln!(writer, "Type: {}", record.bet_type)?;
    writeln!(writer, "Expected legs: {}", record.expected_legs)?;
    writeln!(writer, "Found legs: {}", record.found_legs)?;
    writeln!(writer, "Total Wager: ${:.2}", record.wager)?;
    writeln!(writer, "Total Payout: ${:.2}", record.potential_payout)?;
    if record.is_finished {
        writeln!(writer, "Won: ${:.2}", record.won_amount)?;
    }
    if let Some(sportsbook) = &record.sportsbook {
        writeln!(writer, "Sportsbook: {}", sportsbook)?;
    }

    writeln!(writer, "\nFormatted Legs by Game:")?;
    for line in record.transcript() {
        writeln!(writer, "{}", line)?;
    }

    if !extraction.review.is_empty() {
        writeln!(writer, "\nNeeds review:")?;
        for note in extraction.review.iter() {
            writeln!(writer, "  - {}", note)?;
        }
    }
    Ok(())
}

fn write_summary<W: Write>(writer: &mut W, reports: &[ScanReport]) -> Result<()> {
    writeln!(writer, "\nSummary:")?;
    writeln!(writer, "{}", RULE)?;
    for report in reports {
        writeln!(writer, "\nFile: {}", report.file)?;
        match &report.extraction {
            Some(extraction) => {
                let record = &extraction.record;
                writeln!(writer, "Type: {}", record.bet_type)?;
                writeln!(
                    writer,
                    "Expected/Found Legs: {}/{}",
                    record.expected_legs, record.found_legs
                )?;
                writeln!(
                    writer,
                    "Wager/Payout: ${:.2}/${:.2}",
                    record.wager, record.potential_payout
                )?;
            }
            None => writeln!(writer, "Type: failed")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use parser::{BetRecord, BetType, Extraction, GameGroup, Leg, ReviewNote};
    use rust_decimal::prelude::*;

    use super::*;

    fn reports() -> Vec<ScanReport> {
        let record = BetRecord {
            bet_type: BetType::SameGameParlay,
            expected_legs: 2,
            found_legs: 1,
            wager: dec!(10),
            potential_payout: dec!(45.5),
            won_amount: Decimal::ZERO,
            is_finished: false,
            sportsbook: Some(String::from("FanDuel")),
            games: vec![GameGroup {
                game_label: Some(String::from("LAL @ BOS")),
                legs: vec![Leg::new(
                    String::from("LeBron James"),
                    String::from("TO SCORE 25+ POINTS"),
                    Some(String::from("LAL @ BOS")),
                )],
            }],
        };
        vec![
            ScanReport {
                file: String::from("a.png"),
                extraction: Some(Extraction {
                    record,
                    review: vec![ReviewNote::LegCountMismatch {
                        expected: 2,
                        found: 1,
                    }],
                }),
            },
            ScanReport {
                file: String::from("b.png"),
                extraction: None,
            },
        ]
    }

    #[test]
    fn test_write_text() {
        let mut out = vec![];
        write_reports(&mut out, &reports(), OutputFormat::Text).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Type: Same Game Parlay\n"));
        assert!(text.contains("Game: LAL @ BOS\nLeg 1 Position: LeBron James\nBet Details: TO SCORE 25+ POINTS\n"));
        assert!(text.contains("  - slip declares 2 legs but 1 were found\n"));
        assert!(text.contains(
            "File: a.png\nType: Same Game Parlay\nExpected/Found Legs: 2/1\nWager/Payout: $10.00/$45.50\n"
        ));
        assert!(text.contains("File: b.png\nType: failed\n"));
        assert!(!text.contains("Won:"));
    }

    #[test]
    fn test_write_json() {
        let mut out = vec![];
        write_reports(&mut out, &reports(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value[0]["file"], "a.png");
        assert_eq!(value[0]["extraction"]["record"]["bet_type"], "same_game_parlay");
        assert_eq!(value[0]["extraction"]["review"][0]["kind"], "leg_count_mismatch");
        assert!(value[1]["extraction"].is_null());
    }
}
