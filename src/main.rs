use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tactichub::bracket::Bracket;
use tactichub::calculate::{
    league_table, monthly_performance, rank_by_win_rate, recent_months, summarize,
};
use tactichub::config::AppConfig;
use tactichub::export::{self, ExportFormat, ExportTarget};
use tactichub::models::{is_known_formation, MatchId, MatchResult, NewMatch, PlayerAggregate};
use tactichub::storage::{SnapshotStore, StorageConfig};
use tactichub::store::{MatchQuery, MatchSort, MatchStore};

#[derive(Parser)]
#[command(name = "tactichub")]
#[command(about = "Match tracker and league statistics for TacticHub leagues")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./tactichub.toml")]
    config: PathBuf,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new match
    Add {
        /// Player 1 name
        #[arg(long)]
        player1: String,

        /// Player 2 name
        #[arg(long)]
        player2: String,

        #[arg(long, default_value = "0")]
        score1: u32,

        #[arg(long, default_value = "0")]
        score2: u32,

        /// Player 1 possession (%)
        #[arg(long, default_value = "50")]
        possession1: u8,

        /// Player 2 possession (%), defaults to the remainder
        #[arg(long)]
        possession2: Option<u8>,

        #[arg(long, default_value = "4-3-3")]
        formation: String,

        /// Venue (Online, Home, Away, Tournament, Friendly)
        #[arg(long, default_value = "Online")]
        venue: String,

        /// Match length in minutes
        #[arg(long, default_value = "90")]
        duration: u32,

        #[arg(long)]
        notes: Option<String>,

        /// Match date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a match by id
    Delete { id: MatchId },

    /// Show match history
    List {
        /// Filter by player name (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Only show matches with this result (win, loss, draw)
        #[arg(long)]
        result: Option<MatchResult>,

        /// Sort by date, result or score
        #[arg(long, default_value = "date")]
        sort: MatchSort,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the league table
    Table,

    /// Show players ranked by win rate
    Players,

    /// Show headline statistics, streak and monthly trend
    Dashboard,

    /// Export matches or the league table
    Export {
        /// csv or json
        #[arg(long, default_value = "csv")]
        format: ExportFormat,

        /// matches or table
        #[arg(long, default_value = "matches")]
        target: ExportTarget,

        /// Output file (default: exports dir with a dated name)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write to stdout instead of a file
        #[arg(long)]
        stdout: bool,
    },

    /// Run a knockout bracket
    Bracket {
        /// Entrants in pairing order (count must be a power of 2)
        #[arg(required = true)]
        entrants: Vec<String>,

        /// Winners in match order, earliest undecided match first
        #[arg(long = "winner")]
        winners: Vec<String>,
    },

    /// List known formations and venues
    Formations,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::debug!("Starting tactichub v{}", env!("CARGO_PKG_VERSION"));

    let storage = config.storage();
    storage.validate()?;
    let snapshot = SnapshotStore::for_config(&storage);

    match cli.command {
        Commands::Add {
            player1,
            player2,
            score1,
            score2,
            possession1,
            possession2,
            formation,
            venue,
            duration,
            notes,
            date,
        } => {
            let date = match date {
                Some(s) => tactichub::parse_date(&s)
                    .with_context(|| format!("Invalid --date (expected YYYY-MM-DD): {}", s))?,
                None => chrono::Local::now().date_naive(),
            };

            if !is_known_formation(&formation) && !config.formations.contains(&formation) {
                tracing::warn!("Formation {} is not in the configured list", formation);
            }

            let draft = NewMatch {
                player1,
                player2,
                score1,
                score2,
                possession1,
                possession2: possession2.unwrap_or_else(|| 100u8.saturating_sub(possession1)),
                formation,
                duration: Some(duration),
                venue: Some(venue),
                notes,
            };

            let store = snapshot.load()?;
            let now = chrono::Utc::now().timestamp_millis();
            let (store, record) = store.add_match(draft, now, date)?;
            persist(&snapshot, &store);

            println!(
                "Recorded match {}: {} {}-{} {} ({})",
                record.id, record.player1, record.score1, record.score2, record.player2, record.result
            );
        }
        Commands::Delete { id } => {
            let store = snapshot.load()?;
            let (store, removed) = store.without(id);
            if !removed {
                bail!("No match with id {}", id);
            }
            persist(&snapshot, &store);
            println!("Deleted match {}", id);
        }
        Commands::List {
            search,
            result,
            sort,
            limit,
        } => {
            let store = snapshot.load()?;
            let query = MatchQuery {
                search,
                result,
                sort,
                limit,
            };
            let rows = query.apply(store.matches());

            if rows.is_empty() {
                if store.is_empty() {
                    println!("No matches found. Use `tactichub add` to record one.");
                } else {
                    println!("No matches match your filters.");
                }
                return Ok(());
            }

            println!("=== Match History ({} of {}) ===\n", rows.len(), store.len());
            for m in rows {
                println!(
                    "  {}  {:<16} {:>2} - {:<2} {:<16} {:<5} {:>3}%/{:<3}% {}",
                    m.date,
                    m.player1,
                    m.score1,
                    m.score2,
                    m.player2,
                    m.result,
                    m.possession1,
                    m.possession2,
                    m.formation
                );
                let mut extra = vec![format!("id {}", m.id)];
                if let Some(venue) = &m.venue {
                    extra.push(venue.clone());
                }
                if let Some(notes) = &m.notes {
                    extra.push(notes.clone());
                }
                println!("              {}", extra.join(" | "));
            }
        }
        Commands::Table => {
            let store = snapshot.load()?;
            let table = league_table(store.matches());
            println!("=== League Table ({} players) ===\n", table.len());
            print_table(&table);
        }
        Commands::Players => {
            let store = snapshot.load()?;
            let ranked = rank_by_win_rate(&league_table(store.matches()));
            println!("=== Player Statistics ===\n");
            print_table(&ranked);
        }
        Commands::Dashboard => {
            let store = snapshot.load()?;
            let summary = summarize(store.matches());

            println!("=== Dashboard ===\n");
            println!("Total matches:    {}", summary.total);
            println!(
                "Record:           {}W {}D {}L",
                summary.wins, summary.draws, summary.losses
            );
            println!("Win rate:         {:.1}%", summary.win_rate);
            println!(
                "Goals:            {} for, {} against",
                summary.total_goals_for, summary.total_goals_against
            );
            println!(
                "Per match:        {:.1} for, {:.1} against",
                summary.avg_goals_for, summary.avg_goals_against
            );
            println!("Current streak:   {}", summary.current_streak);
            println!(
                "Fav. formation:   {}",
                summary.favorite_formation.as_deref().unwrap_or("N/A")
            );

            let trend = monthly_performance(store.matches());
            if trend.is_empty() {
                println!("\nPlay more matches to see monthly performance trends.");
            } else {
                println!("\nMonthly performance:");
                for month in recent_months(&trend, config.recent_months) {
                    println!(
                        "  {}  {}/{} wins ({:.0}%)",
                        month.label(),
                        month.wins,
                        month.total,
                        month.win_rate()
                    );
                }
            }
        }
        Commands::Export {
            format,
            target,
            output,
            stdout,
        } => {
            let store = snapshot.load()?;
            if store.is_empty() {
                bail!("No matches to export");
            }

            if stdout {
                let out = std::io::stdout();
                let mut out = out.lock();
                match target {
                    ExportTarget::Matches => export::export_matches(&mut out, store.matches(), format)?,
                    ExportTarget::Table => {
                        export::export_table(&mut out, &league_table(store.matches()), format)?
                    }
                }
                out.flush()?;
            } else {
                let path = output.unwrap_or_else(|| default_export_path(&storage, target, format));
                let rows = export::export_to_file(&path, store.matches(), target, format)?;
                println!("Exported {} rows to {}", rows, path.display());
            }
        }
        Commands::Bracket { entrants, winners } => {
            let mut bracket = Bracket::new(&entrants)?;
            for winner in &winners {
                bracket.record_next_winner(winner)?;
            }

            for (i, round) in bracket.rounds().iter().enumerate() {
                println!("=== Round {} ===", i + 1);
                for m in round {
                    match &m.winner {
                        Some(w) => println!("  {} vs {}  -> {}", m.player1, m.player2, w),
                        None => println!("  {} vs {}", m.player1, m.player2),
                    }
                }
                println!();
            }

            match bracket.champion() {
                Some(champion) => println!("Champion: {}", champion),
                None => {
                    if let Some((r, i)) = bracket.next_pending() {
                        let m = &bracket.rounds()[r][i];
                        println!("Next up: {} vs {}", m.player1, m.player2);
                    }
                }
            }
        }
        Commands::Formations => {
            println!("Formations: {}", config.formations.join(", "));
            println!("Venues:     {}", config.venues.join(", "));
        }
    }

    Ok(())
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let (plain, json) = if json {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        )
    } else {
        (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .init();
}

/// Best-effort snapshot write after a change. A failed write loses only the
/// latest change, so it is reported and not fatal.
fn persist(snapshot: &SnapshotStore, store: &MatchStore) {
    if let Err(e) = snapshot.save(store) {
        tracing::error!("Failed to save snapshot to {:?}: {}", snapshot.path(), e);
    }
}

fn default_export_path(storage: &StorageConfig, target: ExportTarget, format: ExportFormat) -> PathBuf {
    let today = chrono::Local::now().date_naive();
    storage
        .exports_dir()
        .join(export::default_filename(target, format, today))
}

fn print_table(table: &[PlayerAggregate]) {
    if table.is_empty() {
        println!("No matches recorded yet.");
        return;
    }

    println!(
        "  {:>3}  {:<18} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4} {:>6} {:>6}",
        "#", "Player", "P", "W", "D", "L", "GF", "GA", "GD", "Pts", "Win%", "Poss%"
    );
    for (i, p) in table.iter().enumerate() {
        println!(
            "  {:>3}  {:<18} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+4} {:>4} {:>6.1} {:>6.1}",
            i + 1,
            p.name,
            p.matches_played,
            p.wins,
            p.draws,
            p.losses,
            p.goals_for,
            p.goals_against,
            p.goal_difference,
            p.points,
            p.win_rate,
            p.avg_possession
        );
    }
}
