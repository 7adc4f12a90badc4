//! Streaks, formation usage, and monthly trend.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::models::{MatchRecord, MatchResult, MatchSummary, MonthlyPerformance, Streak};

use super::{calculate_average, calculate_win_rate};

/// Current run of identical results, most recent match first.
///
/// Matches are ordered by date descending, ties by id descending (the later
/// entry on the same day counts as more recent).
pub fn current_streak(matches: &[MatchRecord]) -> Streak {
    let mut recent: Vec<&MatchRecord> = matches.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    let Some(first) = recent.first() else {
        return Streak::none();
    };

    let result = first.result;
    let count = recent.iter().take_while(|m| m.result == result).count() as u32;

    Streak {
        kind: result.into(),
        count,
    }
}

/// Most used formation. Ties go to the formation seen first.
pub fn favorite_formation(matches: &[MatchRecord]) -> Option<String> {
    let mut counts: HashMap<&str, (u32, usize)> = HashMap::new();

    for (idx, record) in matches.iter().enumerate() {
        counts
            .entry(record.formation.as_str())
            .or_insert((0, idx))
            .0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(formation, _)| formation.to_string())
}

/// Wins and totals per calendar month, oldest month first.
pub fn monthly_performance(matches: &[MatchRecord]) -> Vec<MonthlyPerformance> {
    let mut months: BTreeMap<(i32, u32), (u32, u32)> = BTreeMap::new();

    for record in matches {
        let entry = months
            .entry((record.date.year(), record.date.month()))
            .or_default();
        entry.1 += 1;
        if record.result == MatchResult::Win {
            entry.0 += 1;
        }
    }

    months
        .into_iter()
        .map(|((year, month), (wins, total))| MonthlyPerformance {
            year,
            month,
            wins,
            total,
        })
        .collect()
}

/// Keep only the most recent `n` months of a chronological trend.
pub fn recent_months(trend: &[MonthlyPerformance], n: usize) -> &[MonthlyPerformance] {
    &trend[trend.len().saturating_sub(n)..]
}

/// Headline numbers for the dashboard.
pub fn summarize(matches: &[MatchRecord]) -> MatchSummary {
    let total = matches.len() as u32;
    let count = |result: MatchResult| matches.iter().filter(|m| m.result == result).count() as u32;
    let wins = count(MatchResult::Win);

    let total_goals_for: u64 = matches.iter().map(|m| u64::from(m.score1)).sum();
    let total_goals_against: u64 = matches.iter().map(|m| u64::from(m.score2)).sum();

    MatchSummary {
        total,
        wins,
        losses: count(MatchResult::Loss),
        draws: count(MatchResult::Draw),
        total_goals_for,
        total_goals_against,
        avg_goals_for: calculate_average(total_goals_for, total),
        avg_goals_against: calculate_average(total_goals_against, total),
        win_rate: calculate_win_rate(wins, total),
        current_streak: current_streak(matches),
        favorite_formation: favorite_formation(matches),
    }
}
