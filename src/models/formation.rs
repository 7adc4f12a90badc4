//! Known formations and venues offered at match entry.

/// Formations offered when logging a match.
pub const FORMATIONS: [&str; 8] = [
    "4-3-3", "4-4-2", "3-5-2", "4-2-3-1", "5-3-2", "3-4-3", "4-1-4-1", "3-4-2-1",
];

/// Venues offered when logging a match.
pub const VENUES: [&str; 5] = ["Online", "Home", "Away", "Tournament", "Friendly"];

pub const DEFAULT_FORMATION: &str = "4-3-3";

/// Whether a formation string is one of the offered choices.
///
/// Records keep the formation as free text, so unknown values are still
/// accepted downstream.
pub fn is_known_formation(formation: &str) -> bool {
    FORMATIONS.contains(&formation)
}
