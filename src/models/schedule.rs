//! Schedule (solution) model.
//!
//! A schedule places every worker of the roster into exactly one group.
//! Groups appear in the same order as the input groups.

use serde::{Deserialize, Serialize};

/// The members placed into one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAssignment {
    /// Name of the originating group.
    pub name: String,
    /// Worker names placed into the group.
    pub members: Vec<String>,
}

/// A complete arrangement: one `GroupAssignment` per input group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    /// Group assignments in input group order.
    pub groups: Vec<GroupAssignment>,
}

/// A rule broken by a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity (group or worker name).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Group list does not line up with the requested groups.
    GroupMismatch,
    /// A group's member count differs from its target size.
    SizeMismatch,
    /// A name not present in the roster.
    UnknownWorker,
    /// A worker placed in more than one group (or twice in one).
    DuplicateWorker,
    /// A worker placed in no group.
    MissingWorker,
    /// A fixed member outside its group.
    FixedMemberMisplaced,
    /// A forbidden pair sharing a group.
    ForbiddenPair,
}

impl GroupAssignment {
    /// Creates a group assignment.
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `worker` is a member.
    pub fn contains(&self, worker: &str) -> bool {
        self.members.iter().any(|m| m == worker)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from group assignments.
    pub fn from_groups(groups: Vec<GroupAssignment>) -> Self {
        Self { groups }
    }

    /// Adds a group assignment.
    pub fn add_group(&mut self, group: GroupAssignment) {
        self.groups.push(group);
    }

    /// Finds the group assignment by name.
    pub fn group(&self, name: &str) -> Option<&GroupAssignment> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Name of the group holding `worker`.
    pub fn group_of(&self, worker: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.contains(worker))
            .map(|g| g.name.as_str())
    }

    /// Whether `a` and `b` share a group.
    pub fn together(&self, a: &str, b: &str) -> bool {
        self.groups.iter().any(|g| g.contains(a) && g.contains(b))
    }

    /// Total placed members across all groups.
    pub fn member_count(&self) -> usize {
        self.groups.iter().map(GroupAssignment::len).sum()
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
