//! Schedule deduplication.
//!
//! # Canonical form
//!
//! Each group's members are sorted and joined with `,`; the per-group
//! strings are sorted and joined with `;`. The result ignores both member
//! order within a group and group order within the schedule, so two
//! schedules are duplicates iff their canonical forms are equal.
//!
//! # History
//!
//! Prior schedules arrive as raw blocks (`"Team1: A,B; Team2: C,D"`). Only
//! member lists are kept; group labels are ignored. How a candidate is
//! compared against history is set by [`HistoryMatch`].

use std::collections::HashSet;
use std::fmt;

use crate::config::HistoryMatch;
use crate::models::Schedule;
use crate::parsing::parse_history_block;

const MEMBER_SEPARATOR: &str = ",";
const GROUP_SEPARATOR: &str = ";";

/// Order-independent serialization of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalForm(String);

impl CanonicalForm {
    /// Canonical form of a schedule.
    pub fn of(schedule: &Schedule) -> Self {
        Self::from_member_lists(schedule.groups.iter().map(|g| g.members.as_slice()))
    }

    /// Canonical form of bare per-group member lists.
    pub fn from_member_lists<'a, I>(lists: I) -> Self
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        let mut keys: Vec<String> = lists.into_iter().map(group_key).collect();
        keys.sort();
        Self(keys.join(GROUP_SEPARATOR))
    }

    /// Per-group keys in canonical order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.0.split(GROUP_SEPARATOR)
    }

    /// The canonically first group key.
    pub fn first_group(&self) -> &str {
        self.groups().next().unwrap_or("")
    }

    /// The canonical string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sorted, joined member list of one group.
fn group_key(members: &[String]) -> String {
    let mut sorted: Vec<&str> = members.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(MEMBER_SEPARATOR)
}

/// Parsed prior schedules, most recent first.
#[derive(Debug, Clone, Default)]
pub struct History {
    blocks: Vec<Vec<Vec<String>>>,
}

impl History {
    /// Parses up to `depth` raw history blocks. Blank or label-less
    /// blocks contribute nothing.
    pub fn parse(raw: &[String], depth: usize) -> Self {
        let blocks = raw
            .iter()
            .take(depth)
            .map(|block| parse_history_block(block))
            .filter(|groups| !groups.is_empty())
            .collect();
        Self { blocks }
    }

    /// Canonical form of each history block.
    pub fn canonical_forms(&self) -> impl Iterator<Item = CanonicalForm> + '_ {
        self.blocks
            .iter()
            .map(|groups| CanonicalForm::from_member_lists(groups.iter().map(Vec::as_slice)))
    }

    /// Key of every group across all history blocks.
    pub fn group_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.blocks
            .iter()
            .flatten()
            .map(|members| group_key(members))
    }

    /// Number of usable history blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no history is available.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Why a candidate was rejected as a repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duplicate {
    /// Matches a prior schedule.
    OfHistory,
    /// Matches a schedule already accepted in this run.
    OfGenerated,
}

/// Tracks history and accepted schedules for one run.
#[derive(Debug, Clone)]
pub struct Deduplicator {
    mode: HistoryMatch,
    history_forms: HashSet<CanonicalForm>,
    history_groups: HashSet<String>,
    accepted: HashSet<CanonicalForm>,
}

impl Deduplicator {
    /// Creates a deduplicator over parsed history.
    pub fn new(history: &History, mode: HistoryMatch) -> Self {
        Self {
            mode,
            history_forms: history.canonical_forms().collect(),
            history_groups: history.group_keys().collect(),
            accepted: HashSet::new(),
        }
    }

    /// Checks a candidate without recording it.
    pub fn check(&self, schedule: &Schedule) -> Result<CanonicalForm, Duplicate> {
        let form = CanonicalForm::of(schedule);
        if self.repeats_history(&form) {
            return Err(Duplicate::OfHistory);
        }
        if self.accepted.contains(&form) {
            return Err(Duplicate::OfGenerated);
        }
        Ok(form)
    }

    /// Checks a candidate and records it on success.
    pub fn admit(&mut self, schedule: &Schedule) -> Result<(), Duplicate> {
        let form = self.check(schedule)?;
        self.accepted.insert(form);
        Ok(())
    }

    /// Number of schedules admitted so far.
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    fn repeats_history(&self, form: &CanonicalForm) -> bool {
        match self.mode {
            HistoryMatch::FullSchedule => self.history_forms.contains(form),
            HistoryMatch::FirstGroup => self.history_groups.contains(form.first_group()),
        }
    }
}
