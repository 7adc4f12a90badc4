//! League table aggregation.

use std::collections::HashMap;

use crate::models::{MatchRecord, PlayerAggregate};

use super::{calculate_average, calculate_win_rate};

/// One side of a match, seen from that player's perspective.
struct Side<'a> {
    name: &'a str,
    goals_for: u64,
    goals_against: u64,
    possession: u8,
    result: crate::models::MatchResult,
}

fn sides(record: &MatchRecord) -> [Side<'_>; 2] {
    [
        Side {
            name: &record.player1,
            goals_for: u64::from(record.score1),
            goals_against: u64::from(record.score2),
            possession: record.possession1,
            result: record.result,
        },
        Side {
            name: &record.player2,
            goals_for: u64::from(record.score2),
            goals_against: u64::from(record.score1),
            possession: record.possession2,
            result: record.result.reversed(),
        },
    ]
}

/// Fold the match log into a ranked league table.
///
/// One entry per distinct name seen in either player slot. Ranked by points,
/// then goal difference, then goals scored (all descending), then name
/// ascending, so the order is total.
///
/// Each record updates both of its sides independently. A record naming the
/// same player twice therefore counts as two matches for that player; entry
/// validation keeps such records out of the log.
pub fn league_table(matches: &[MatchRecord]) -> Vec<PlayerAggregate> {
    let mut players: HashMap<&str, (PlayerAggregate, u64)> = HashMap::new();

    for record in matches {
        for side in sides(record) {
            let (agg, possession_sum) = players
                .entry(side.name)
                .or_insert_with(|| (PlayerAggregate::new(side.name.to_string()), 0));

            agg.matches_played += 1;
            agg.goals_for += side.goals_for;
            agg.goals_against += side.goals_against;
            agg.record_result(side.result);
            *possession_sum += u64::from(side.possession);
        }
    }

    let mut table: Vec<PlayerAggregate> = players
        .into_values()
        .map(|(mut agg, possession_sum)| {
            agg.goal_difference = agg.goals_for as i64 - agg.goals_against as i64;
            agg.win_rate = calculate_win_rate(agg.wins, agg.matches_played);
            agg.avg_possession = calculate_average(possession_sum, agg.matches_played);
            agg
        })
        .collect();

    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
            .then_with(|| a.name.cmp(&b.name))
    });

    table
}

/// Order players by win rate, then matches played, then name.
pub fn rank_by_win_rate(table: &[PlayerAggregate]) -> Vec<PlayerAggregate> {
    let mut ranked = table.to_vec();
    ranked.sort_by(|a, b| {
        b.win_rate
            .total_cmp(&a.win_rate)
            .then(b.matches_played.cmp(&a.matches_played))
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchResult;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(id: i64, p1: &str, p2: &str, score1: u32, score2: u32, poss1: u8) -> MatchRecord {
        MatchRecord::new(
            id,
            p1.to_string(),
            p2.to_string(),
            score1,
            score2,
            poss1,
            100 - poss1,
            "4-3-3".to_string(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
    }

    fn find<'a>(table: &'a [PlayerAggregate], name: &str) -> &'a PlayerAggregate {
        table.iter().find(|p| p.name == name).unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(league_table(&[]).is_empty());
    }

    #[test]
    fn test_single_decisive_match() {
        let table = league_table(&[record(1, "A", "B", 3, 1, 60)]);

        assert_eq!(
            table,
            vec![
                PlayerAggregate {
                    name: "A".to_string(),
                    matches_played: 1,
                    wins: 1,
                    draws: 0,
                    losses: 0,
                    goals_for: 3,
                    goals_against: 1,
                    goal_difference: 2,
                    points: 3,
                    win_rate: 100.0,
                    avg_possession: 60.0,
                },
                PlayerAggregate {
                    name: "B".to_string(),
                    matches_played: 1,
                    wins: 0,
                    draws: 0,
                    losses: 1,
                    goals_for: 1,
                    goals_against: 3,
                    goal_difference: -2,
                    points: 0,
                    win_rate: 0.0,
                    avg_possession: 40.0,
                },
            ]
        );
    }

    #[test]
    fn test_draw() {
        let table = league_table(&[record(1, "C", "D", 2, 2, 50)]);

        for name in ["C", "D"] {
            let p = find(&table, name);
            assert_eq!(p.draws, 1);
            assert_eq!(p.points, 1);
            assert_eq!(p.goal_difference, 0);
            assert_eq!(p.win_rate, 0.0);
        }
    }

    #[test]
    fn test_loss_credits_player_two() {
        let table = league_table(&[record(1, "A", "B", 0, 2, 70)]);

        assert_eq!(table[0].name, "B");
        assert_eq!(table[0].wins, 1);
        assert_eq!(table[0].points, 3);
        assert_eq!(find(&table, "A").losses, 1);
    }

    #[test]
    fn test_player_two_only_is_included() {
        let table = league_table(&[
            record(1, "A", "Zed", 1, 0, 50),
            record(2, "B", "Zed", 1, 1, 50),
        ]);

        let zed = find(&table, "Zed");
        assert_eq!(zed.matches_played, 2);
        assert_eq!(zed.points, 1);
    }

    #[test]
    fn test_points_conservation() {
        let matches = vec![
            record(1, "A", "B", 3, 1, 60),
            record(2, "B", "C", 0, 0, 45),
            record(3, "C", "A", 2, 4, 52),
            record(4, "D", "A", 1, 1, 50),
            record(5, "B", "D", 0, 5, 30),
        ];

        let draws = matches
            .iter()
            .filter(|m| m.result == MatchResult::Draw)
            .count() as u32;
        let decisive = matches.len() as u32 - draws;

        let total: u32 = league_table(&matches).iter().map(|p| p.points).sum();
        assert_eq!(total, 2 * draws + 3 * decisive);
    }

    #[test]
    fn test_tie_break_by_name() {
        let table = league_table(&[
            record(1, "Bob", "X", 1, 0, 50),
            record(2, "Alice", "Y", 1, 0, 50),
        ]);

        assert_eq!(table[0].name, "Alice");
        assert_eq!(table[1].name, "Bob");
    }

    #[test]
    fn test_tie_break_order() {
        // A and B both on 3 points; B has the better goal difference.
        // C and D are level on everything, so the name decides.
        let table = league_table(&[
            record(1, "A", "E", 1, 0, 50),
            record(2, "B", "E", 4, 0, 50),
            record(3, "C", "D", 1, 1, 50),
            record(4, "D", "C", 3, 3, 50),
        ]);

        let names: Vec<&str> = table.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C", "D", "E"]);
    }

    #[test]
    fn test_goals_for_breaks_tie() {
        let table = league_table(&[
            record(1, "Low", "X", 1, 0, 50),
            record(2, "High", "Y", 3, 2, 50),
        ]);

        assert_eq!(table[0].name, "High");
    }

    #[test]
    fn test_average_possession() {
        let table = league_table(&[
            record(1, "A", "B", 0, 0, 60),
            record(2, "B", "A", 0, 0, 30),
        ]);

        assert_eq!(find(&table, "A").avg_possession, 65.0);
        assert_eq!(find(&table, "B").avg_possession, 35.0);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let table = league_table(&[record(1, "alice", "Alice", 1, 0, 50)]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let matches = vec![
            record(1, "A", "B", 3, 1, 60),
            record(2, "B", "C", 2, 2, 45),
            record(3, "C", "A", 0, 1, 52),
        ];

        assert_eq!(league_table(&matches), league_table(&matches));
    }

    #[test]
    fn test_self_match_counts_both_sides() {
        // Not produced by entry validation; pinned so a change is noticed.
        let table = league_table(&[record(1, "A", "A", 2, 1, 70)]);

        assert_eq!(table.len(), 1);
        let a = &table[0];
        assert_eq!(a.matches_played, 2);
        assert_eq!((a.wins, a.losses), (1, 1));
        assert_eq!(a.points, 3);
        assert_eq!(a.goal_difference, 0);
        assert_eq!(a.avg_possession, 50.0);
    }

    #[test]
    fn test_large_scores_do_not_overflow() {
        let table = league_table(&[
            record(1, "A", "B", u32::MAX, 0, 50),
            record(2, "A", "B", u32::MAX, 1, 50),
        ]);

        let a = find(&table, "A");
        assert_eq!(a.goals_for, 2 * u64::from(u32::MAX));
        assert_eq!(a.goals_against, 1);
        assert_eq!(a.goal_difference, 2 * i64::from(u32::MAX) - 1);

        let b = find(&table, "B");
        assert_eq!(b.goals_against, 2 * u64::from(u32::MAX));
        assert_eq!(table[0].name, "A");
    }

    #[test]
    fn test_rank_by_win_rate() {
        let table = league_table(&[
            record(1, "A", "B", 1, 0, 50),
            record(2, "A", "C", 0, 1, 50),
            record(3, "D", "B", 2, 0, 50),
        ]);

        let ranked = rank_by_win_rate(&table);
        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();
        // C and D at 100%, A at 50%, B at 0%
        assert_eq!(names, vec!["C", "D", "A", "B"]);
    }
}
