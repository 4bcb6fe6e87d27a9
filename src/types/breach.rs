use serde::Serialize;

/// Final state of one breach check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BreachOutcome {
    /// The candidate's hash suffix did not appear in the returned range.
    Safe,
    /// The candidate appeared in the corpus with the given occurrence count.
    Leaked { count: u64 },
    /// A newer candidate was submitted while this check was in flight;
    /// the (stale) result was discarded.
    Superseded,
}
