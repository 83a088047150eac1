//! Pair constraints between workers.
//!
//! Two flavors share one representation:
//! - **Forbidden**: the two workers must never share a group.
//! - **Desired**: the two workers should share a group when capacity allows.
//!
//! Pairs are unordered: `A-B` and `B-A` are the same constraint.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Which rule a pair expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairKind {
    /// Never in the same group.
    Forbidden,
    /// Same group whenever possible.
    Desired,
}

impl PairKind {
    /// Label used in diagnoses.
    pub fn label(self) -> &'static str {
        match self {
            PairKind::Forbidden => "forbidden",
            PairKind::Desired => "desired",
        }
    }
}

impl fmt::Display for PairKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An unordered pair of two distinct worker names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairConstraint {
    /// First name as entered.
    pub first: String,
    /// Second name as entered.
    pub second: String,
    /// Rule flavor.
    pub kind: PairKind,
}

impl PairConstraint {
    /// Creates a pair constraint.
    pub fn new(first: impl Into<String>, second: impl Into<String>, kind: PairKind) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            kind,
        }
    }

    /// Creates a forbidden pair.
    pub fn forbidden(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::new(first, second, PairKind::Forbidden)
    }

    /// Creates a desired pair.
    pub fn desired(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::new(first, second, PairKind::Desired)
    }

    /// Builds a pair from a parsed token. Returns `None` unless the token
    /// has exactly two parts.
    pub fn from_tokens(tokens: &[String], kind: PairKind) -> Option<Self> {
        match tokens {
            [a, b] => Some(Self::new(a.clone(), b.clone(), kind)),
            _ => None,
        }
    }

    /// Whether this pair joins `a` and `b`, in either order.
    pub fn matches(&self, a: &str, b: &str) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }
}

impl PartialEq for PairConstraint {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.matches(&other.first, &other.second)
    }
}

impl Eq for PairConstraint {}

impl fmt::Display for PairConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

/// An ordered set of pair constraints of one kind with symmetric lookup.
///
/// Iteration preserves input order; `contains` is O(1).
#[derive(Debug, Clone)]
pub struct PairSet {
    kind: PairKind,
    pairs: Vec<PairConstraint>,
    partners: HashMap<String, HashSet<String>>,
}

impl PairSet {
    /// Creates an empty set.
    pub fn new(kind: PairKind) -> Self {
        Self {
            kind,
            pairs: Vec::new(),
            partners: HashMap::new(),
        }
    }

    /// Builds a set from parsed tokens, dropping anything that is not a
    /// two-part token. Run validation first to reject those explicitly.
    pub fn from_tokens(tokens: &[Vec<String>], kind: PairKind) -> Self {
        let mut set = Self::new(kind);
        for t in tokens {
            if let Some(pair) = PairConstraint::from_tokens(t, kind) {
                set.insert(pair);
            }
        }
        set
    }

    /// Adds a pair. Repeats of an existing pair are ignored.
    pub fn insert(&mut self, pair: PairConstraint) {
        if self.contains(&pair.first, &pair.second) {
            return;
        }
        self.partners
            .entry(pair.first.clone())
            .or_default()
            .insert(pair.second.clone());
        self.partners
            .entry(pair.second.clone())
            .or_default()
            .insert(pair.first.clone());
        self.pairs.push(pair);
    }

    /// Whether `a` and `b` form a pair in this set.
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.partners.get(a).is_some_and(|p| p.contains(b))
    }

    /// Whether `name` conflicts with any of `members`.
    pub fn conflicts_with<'m, I>(&self, name: &str, members: I) -> bool
    where
        I: IntoIterator<Item = &'m str>,
    {
        match self.partners.get(name) {
            None => false,
            Some(p) => members.into_iter().any(|m| p.contains(m)),
        }
    }

    /// The first pair fully contained in `members`, if any.
    pub fn first_within(&self, members: &[String]) -> Option<&PairConstraint> {
        self.pairs.iter().find(|p| {
            members.iter().any(|m| *m == p.first) && members.iter().any(|m| *m == p.second)
        })
    }

    /// Rule flavor of this set.
    pub fn kind(&self) -> PairKind {
        self.kind
    }

    /// Pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = &PairConstraint> {
        self.pairs.iter()
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|t| t.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_pair_is_unordered() {
        let p = PairConstraint::forbidden("A", "B");
        assert!(p.matches("A", "B"));
        assert!(p.matches("B", "A"));
        assert!(!p.matches("A", "C"));
        assert_eq!(p, PairConstraint::forbidden("B", "A"));
        assert_ne!(p, PairConstraint::desired("A", "B"));
    }

    #[test]
    fn test_from_tokens_requires_two_parts() {
        let ok = PairConstraint::from_tokens(&["A".into(), "B".into()], PairKind::Forbidden);
        assert_eq!(ok.unwrap().to_string(), "A-B");
        assert!(PairConstraint::from_tokens(&["A".into()], PairKind::Forbidden).is_none());
        assert!(PairConstraint::from_tokens(
            &["A".into(), "B".into(), "C".into()],
            PairKind::Forbidden
        )
        .is_none());
    }

    #[test]
    fn test_pair_set_lookup_is_symmetric() {
        let set = PairSet::from_tokens(&tokens(&[&["A", "B"], &["C", "D"]]), PairKind::Forbidden);
        assert_eq!(set.len(), 2);
        assert!(set.contains("A", "B"));
        assert!(set.contains("B", "A"));
        assert!(set.contains("D", "C"));
        assert!(!set.contains("A", "C"));
        assert_eq!(set.kind(), PairKind::Forbidden);
    }

    #[test]
    fn test_pair_set_ignores_repeats_and_malformed() {
        let set = PairSet::from_tokens(
            &tokens(&[&["A", "B"], &["B", "A"], &["X"], &["A", "B", "C"]]),
            PairKind::Desired,
        );
        assert_eq!(set.len(), 1);
        let order: Vec<String> = set.iter().map(|p| p.to_string()).collect();
        assert_eq!(order, vec!["A-B"]);
    }

    #[test]
    fn test_conflicts_with_members() {
        let set = PairSet::from_tokens(&tokens(&[&["A", "C"]]), PairKind::Forbidden);
        assert!(set.conflicts_with("A", ["B", "C"]));
        assert!(!set.conflicts_with("A", ["B", "D"]));
        assert!(!set.conflicts_with("Z", ["A", "C"]));
    }

    #[test]
    fn test_first_within() {
        let set = PairSet::from_tokens(&tokens(&[&["A", "C"], &["B", "D"]]), PairKind::Forbidden);
        let members: Vec<String> = vec!["D".into(), "B".into(), "E".into()];
        assert_eq!(set.first_within(&members).unwrap().to_string(), "B-D");
        let clean: Vec<String> = vec!["A".into(), "B".into()];
        assert!(set.first_within(&clean).is_none());
    }
}
