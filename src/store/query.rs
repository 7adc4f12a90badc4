//! Search, filter, and ordering for the match history view.

use serde::{Deserialize, Serialize};

use crate::models::{MatchRecord, MatchResult};

/// Ordering for the match history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSort {
    /// Newest first
    #[default]
    Date,
    /// Alphabetical by result: draw, loss, win
    Result,
    /// Highest combined score first
    Score,
}

impl std::str::FromStr for MatchSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(MatchSort::Date),
            "result" => Ok(MatchSort::Result),
            "score" => Ok(MatchSort::Score),
            other => Err(format!(
                "unknown sort: {} (expected date, result or score)",
                other
            )),
        }
    }
}

/// Filter and sort parameters for listing matches.
#[derive(Debug, Clone, Default)]
pub struct MatchQuery {
    /// Case-insensitive substring of either player name
    pub search: Option<String>,

    /// Only matches with this result
    pub result: Option<MatchResult>,

    pub sort: MatchSort,

    /// Cap on returned rows
    pub limit: Option<usize>,
}

impl MatchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: &str) -> Self {
        self.search = Some(term.to_string());
        self
    }

    pub fn with_result(mut self, result: MatchResult) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_sort(mut self, sort: MatchSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, record: &MatchRecord, needle: Option<&str>) -> bool {
        let hit = match needle {
            None | Some("") => true,
            Some(needle) => {
                record.player1.to_lowercase().contains(needle)
                    || record.player2.to_lowercase().contains(needle)
            }
        };

        hit && self.result.map_or(true, |r| record.result == r)
    }

    /// Apply the query. The input order is kept among equal sort keys.
    pub fn apply<'a>(&self, records: &'a [MatchRecord]) -> Vec<&'a MatchRecord> {
        let needle = self.search.as_deref().map(|s| s.trim().to_lowercase());

        let mut selected: Vec<&MatchRecord> = records
            .iter()
            .filter(|m| self.matches(m, needle.as_deref()))
            .collect();

        match self.sort {
            MatchSort::Date => {
                selected.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)))
            }
            MatchSort::Result => selected.sort_by_key(|m| m.result),
            MatchSort::Score => selected.sort_by(|a, b| b.total_goals().cmp(&a.total_goals())),
        }

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: i64, p1: &str, p2: &str, score1: u32, score2: u32, day: u32) -> MatchRecord {
        MatchRecord::new(
            id,
            p1.to_string(),
            p2.to_string(),
            score1,
            score2,
            50,
            50,
            "4-3-3".to_string(),
            NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
        )
    }

    fn sample() -> Vec<MatchRecord> {
        vec![
            record(1, "Alice", "Bob", 2, 1, 3),
            record(2, "Carol", "Dave", 0, 0, 5),
            record(3, "Bobby", "Carol", 1, 4, 1),
            record(4, "Alice", "Dave", 3, 3, 5),
        ]
    }

    fn ids(rows: &[&MatchRecord]) -> Vec<i64> {
        rows.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_default_sorts_by_date_desc() {
        let records = sample();
        let rows = MatchQuery::new().apply(&records);
        assert_eq!(ids(&rows), vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = sample();
        let rows = MatchQuery::new().with_search("BOB").apply(&records);
        assert_eq!(ids(&rows), vec![1, 3]);
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let records = sample();
        assert_eq!(MatchQuery::new().with_search("  ").apply(&records).len(), 4);
    }

    #[test]
    fn test_result_filter() {
        let records = sample();
        let rows = MatchQuery::new()
            .with_result(MatchResult::Draw)
            .apply(&records);
        assert_eq!(ids(&rows), vec![4, 2]);
    }

    #[test]
    fn test_sort_by_score_is_stable() {
        let records = sample();
        let rows = MatchQuery::new()
            .with_sort(MatchSort::Score)
            .apply(&records);
        // 6 goals, then 5, 3, 0; input order kept otherwise
        assert_eq!(ids(&rows), vec![4, 3, 1, 2]);
    }

    #[test]
    fn test_sort_by_result() {
        let records = sample();
        let rows = MatchQuery::new()
            .with_sort(MatchSort::Result)
            .apply(&records);
        // draw, draw, loss, win
        assert_eq!(ids(&rows), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_limit() {
        let records = sample();
        let rows = MatchQuery::new().with_limit(2).apply(&records);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!("Score".parse::<MatchSort>().unwrap(), MatchSort::Score);
        assert!("goals".parse::<MatchSort>().is_err());
    }
}
