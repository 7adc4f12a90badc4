//! Flat-file export of the match log and the league table.
//!
//! Column order and quoting are part of the file format and must stay
//! stable: numeric fields are bare, everything else is quoted, and the
//! header row is never quoted.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::calculate::league_table;
use crate::models::{MatchRecord, PlayerAggregate};
use crate::storage::StorageError;

/// Match log CSV columns.
pub const MATCH_COLUMNS: [&str; 9] = [
    "Date",
    "Player1",
    "Player2",
    "Score1",
    "Score2",
    "Possession1",
    "Possession2",
    "Formation",
    "Result",
];

/// League table CSV columns.
pub const TABLE_COLUMNS: [&str; 12] = [
    "Position",
    "Player",
    "Matches",
    "Wins",
    "Draws",
    "Losses",
    "GoalsFor",
    "GoalsAgainst",
    "GoalDifference",
    "Points",
    "WinRate",
    "AvgPossession",
];

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown format: {} (expected csv or json)", other)),
        }
    }
}

/// What gets exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    /// Raw match records
    Matches,
    /// Computed league table
    Table,
}

impl ExportTarget {
    fn stem(&self) -> &'static str {
        match self {
            ExportTarget::Matches => "tactichub-matches",
            ExportTarget::Table => "tactichub-table",
        }
    }
}

impl std::str::FromStr for ExportTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "matches" => Ok(ExportTarget::Matches),
            "table" | "league" => Ok(ExportTarget::Table),
            other => Err(format!(
                "unknown export target: {} (expected matches or table)",
                other
            )),
        }
    }
}

/// File name for an export made on `date`, e.g. `tactichub-matches-2025-05-01.csv`.
pub fn default_filename(target: ExportTarget, format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{}-{}.{}",
        target.stem(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

fn write_csv<W: Write>(
    mut out: W,
    header: &[&str],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> Result<(), StorageError> {
    {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut out);
        writer.write_record(header)?;
        writer.flush()?;
    }

    // Rows arrive with text columns already quoted.
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(&mut out);
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<W: Write, T: Serialize>(mut out: W, value: &T) -> Result<(), StorageError> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Quote a text column, doubling embedded quotes. Text columns are always
/// quoted and numeric columns never are, whatever the value looks like.
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn match_row(record: &MatchRecord) -> Vec<String> {
    vec![
        quoted(&record.date.format("%Y-%m-%d").to_string()),
        quoted(&record.player1),
        quoted(&record.player2),
        record.score1.to_string(),
        record.score2.to_string(),
        record.possession1.to_string(),
        record.possession2.to_string(),
        quoted(&record.formation),
        quoted(record.result.as_str()),
    ]
}

fn table_row(position: usize, player: &PlayerAggregate) -> Vec<String> {
    vec![
        position.to_string(),
        quoted(&player.name),
        player.matches_played.to_string(),
        player.wins.to_string(),
        player.draws.to_string(),
        player.losses.to_string(),
        player.goals_for.to_string(),
        player.goals_against.to_string(),
        player.goal_difference.to_string(),
        player.points.to_string(),
        format!("{:.1}", player.win_rate),
        format!("{:.1}", player.avg_possession),
    ]
}

/// Write the match records in the given format.
pub fn export_matches<W: Write>(
    out: W,
    matches: &[MatchRecord],
    format: ExportFormat,
) -> Result<(), StorageError> {
    match format {
        ExportFormat::Csv => write_csv(out, &MATCH_COLUMNS, matches.iter().map(match_row)),
        ExportFormat::Json => write_json(out, &matches),
    }
}

/// Write a ranked league table in the given format.
pub fn export_table<W: Write>(
    out: W,
    table: &[PlayerAggregate],
    format: ExportFormat,
) -> Result<(), StorageError> {
    match format {
        ExportFormat::Csv => write_csv(
            out,
            &TABLE_COLUMNS,
            table.iter().enumerate().map(|(i, p)| table_row(i + 1, p)),
        ),
        ExportFormat::Json => write_json(out, &table),
    }
}

/// Export `target` derived from `matches` to a file, creating parent directories.
pub fn export_to_file(
    path: &Path,
    matches: &[MatchRecord],
    target: ExportTarget,
    format: ExportFormat,
) -> Result<usize, StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    let rows = match target {
        ExportTarget::Matches => {
            export_matches(&mut writer, matches, format)?;
            matches.len()
        }
        ExportTarget::Table => {
            let table = league_table(matches);
            export_table(&mut writer, &table, format)?;
            table.len()
        }
    };
    writer.flush()?;

    info!("Exported {} rows to {:?}", rows, path);
    Ok(rows)
}
