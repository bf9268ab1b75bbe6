use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use metadata::{Sportsbook, SportsbookInfo};
use parser::{BetRecord, Extraction};
use schemars::{JsonSchema, schema_for};

const VSCODE_DIR: &str = ".vscode";

fn write_schema<T: JsonSchema>(dir: &Path, file_name: &str) -> Result<()> {
    let schema = serde_json::to_string_pretty(&schema_for!(T))?;
    let path = dir.join(file_name);
    fs::write(&path, schema).with_context(|| format!("failed to write {}", path.display()))
}

fn main() -> Result<()> {
    let target_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(VSCODE_DIR));
    fs::create_dir_all(&target_dir)
        .with_context(|| format!("failed to create {}", target_dir.display()))?;

    write_schema::<BetRecord>(&target_dir, "bet_record.schema.json")?;
    write_schema::<Extraction>(&target_dir, "extraction.schema.json")?;
    write_schema::<SportsbookInfo>(&target_dir, "sportsbook_info.schema.json")?;
    write_schema::<Vec<Sportsbook>>(&target_dir, "sportsbooks.schema.json")?;
    Ok(())
}
