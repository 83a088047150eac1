//! Generation input.

use serde::{Deserialize, Serialize};

use crate::models::{Group, PairKind, PairSet, Worker};
use crate::parsing::parse_pairs;

/// Input container for one generation run.
///
/// Immutable once handed to a producer: the engine reads it and never
/// writes back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Scheduling anchor (e.g., the first day the rota applies).
    pub start_date: Option<String>,
    /// Declared number of workers. `None` takes the roster length.
    pub worker_count: Option<usize>,
    /// Registered roster.
    pub workers: Vec<Worker>,
    /// Declared number of groups. `None` takes the group list length.
    pub group_count: Option<usize>,
    /// Groups to fill, in display order.
    pub groups: Vec<Group>,
    /// Raw forbidden pairs (`"A-B,C-D"`).
    pub forbidden_pairs: String,
    /// Raw desired pairs (`"A-B,C-D"`).
    pub desired_pairs: String,
    /// Raw history blocks, most recent first (`"Team1: A,B; Team2: C,D"`).
    pub history: Vec<String>,
}

impl GenerationRequest {
    /// Creates a request over a roster and its groups.
    pub fn new(workers: Vec<Worker>, groups: Vec<Group>) -> Self {
        Self {
            workers,
            groups,
            ..Self::default()
        }
    }

    /// Sets the scheduling anchor.
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Declares the worker count explicitly.
    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = Some(count);
        self
    }

    /// Declares the group count explicitly.
    pub fn with_group_count(mut self, count: usize) -> Self {
        self.group_count = Some(count);
        self
    }

    /// Sets the raw forbidden pair entry.
    pub fn with_forbidden_pairs(mut self, raw: impl Into<String>) -> Self {
        self.forbidden_pairs = raw.into();
        self
    }

    /// Sets the raw desired pair entry.
    pub fn with_desired_pairs(mut self, raw: impl Into<String>) -> Self {
        self.desired_pairs = raw.into();
        self
    }

    /// Appends a raw history block.
    pub fn with_history(mut self, block: impl Into<String>) -> Self {
        self.history.push(block.into());
        self
    }

    /// Declared worker count, falling back to the roster length.
    pub fn declared_worker_count(&self) -> usize {
        self.worker_count.unwrap_or(self.workers.len())
    }

    /// Declared group count, falling back to the group list length.
    pub fn declared_group_count(&self) -> usize {
        self.group_count.unwrap_or(self.groups.len())
    }

    /// Roster names in entry order.
    pub fn worker_names(&self) -> impl Iterator<Item = &str> {
        self.workers.iter().map(|w| w.name.as_str())
    }

    /// Whether `name` is on the roster.
    pub fn has_worker(&self, name: &str) -> bool {
        self.workers.iter().any(|w| w.name == name)
    }

    /// Index of the group `name` is pinned to, if any.
    pub fn fixed_group_of(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.is_fixed(name))
    }

    /// Parsed forbidden pair tokens.
    pub fn forbidden_tokens(&self) -> Vec<Vec<String>> {
        parse_pairs(&self.forbidden_pairs)
    }

    /// Parsed desired pair tokens.
    pub fn desired_tokens(&self) -> Vec<Vec<String>> {
        parse_pairs(&self.desired_pairs)
    }

    /// Forbidden pairs as a lookup set.
    pub fn forbidden_set(&self) -> PairSet {
        PairSet::from_tokens(&self.forbidden_tokens(), PairKind::Forbidden)
    }

    /// Desired pairs as an ordered set.
    pub fn desired_set(&self) -> PairSet {
        PairSet::from_tokens(&self.desired_tokens(), PairKind::Desired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> GenerationRequest {
        GenerationRequest::new(
            Worker::roster(["A", "B", "C", "D"]),
            vec![
                Group::new(1, "Team1", 2).with_fixed_member("C"),
                Group::new(2, "Team2", 2),
            ],
        )
        .with_start_date("2025-04-01")
        .with_forbidden_pairs("A-C")
        .with_desired_pairs("B - D")
    }

    #[test]
    fn test_declared_counts_fall_back_to_lists() {
        let r = sample_request();
        assert_eq!(r.declared_worker_count(), 4);
        assert_eq!(r.declared_group_count(), 2);

        let r = r.with_worker_count(3).with_group_count(5);
        assert_eq!(r.declared_worker_count(), 3);
        assert_eq!(r.declared_group_count(), 5);
    }

    #[test]
    fn test_lookups() {
        let r = sample_request();
        assert!(r.has_worker("D"));
        assert!(!r.has_worker("Z"));
        assert_eq!(r.fixed_group_of("C"), Some(0));
        assert_eq!(r.fixed_group_of("A"), None);
        assert_eq!(r.worker_names().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_pair_sets() {
        let r = sample_request();
        assert!(r.forbidden_set().contains("C", "A"));
        assert!(r.desired_set().contains("D", "B"));
        assert_eq!(r.desired_tokens(), vec![vec!["B", "D"]]);
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let json = r#"{
            "startDate": "2025-04-01",
            "workers": ["A", "B", {"name": "C", "role": "lead"}, "D"],
            "groups": [
                {"id": 1, "name": "Team1", "targetSize": 2, "fixedMembers": ["C"]},
                {"id": 2, "name": "Team2", "targetSize": 2}
            ],
            "forbiddenPairs": "A-C",
            "history": ["Team1: A,B; Team2: C,D"]
        }"#;
        let r: GenerationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(r.start_date.as_deref(), Some("2025-04-01"));
        assert_eq!(r.workers.len(), 4);
        assert_eq!(r.workers[2].role.as_deref(), Some("lead"));
        assert_eq!(r.groups[1].fixed_members.len(), 0);
        assert_eq!(r.desired_pairs, "");
        assert_eq!(r.worker_count, None);
        assert_eq!(r.history.len(), 1);
    }
}
