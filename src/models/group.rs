//! Group model.
//!
//! A group is a named slot of fixed size that workers are placed into.
//! Some workers may be pinned to a group ahead of generation (fixed members).

use serde::{Deserialize, Serialize};

use crate::parsing::parse_member_list;

/// A predefined group to fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Stable identifier, assigned in creation order.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Exact number of members the group must end up with.
    #[serde(alias = "size")]
    pub target_size: usize,
    /// Workers pinned to this group, in entry order.
    #[serde(default)]
    pub fixed_members: Vec<String>,
}

impl Group {
    /// Creates a group with no fixed members.
    pub fn new(id: u32, name: impl Into<String>, target_size: usize) -> Self {
        Self {
            id,
            name: name.into(),
            target_size,
            fixed_members: Vec::new(),
        }
    }

    /// Pins a worker to this group.
    pub fn with_fixed_member(mut self, name: impl Into<String>) -> Self {
        self.fixed_members.push(name.into());
        self
    }

    /// Replaces the fixed members from a comma-separated entry (`"A, B"`).
    pub fn with_fixed_members_str(mut self, raw: &str) -> Self {
        self.fixed_members = parse_member_list(raw);
        self
    }

    /// Whether `name` is pinned to this group.
    pub fn is_fixed(&self, name: &str) -> bool {
        self.fixed_members.iter().any(|m| m == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_builder() {
        let g = Group::new(1, "Team1", 3)
            .with_fixed_member("A")
            .with_fixed_member("B");
        assert_eq!(g.id, 1);
        assert_eq!(g.name, "Team1");
        assert_eq!(g.target_size, 3);
        assert!(g.is_fixed("A"));
        assert!(!g.is_fixed("C"));
    }

    #[test]
    fn test_fixed_members_from_entry() {
        let g = Group::new(1, "Team1", 4).with_fixed_members_str(" A , B,, C ");
        assert_eq!(g.fixed_members, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_deserialize_size_alias() {
        let g: Group =
            serde_json::from_str(r#"{"id": 2, "name": "East", "size": 2, "fixedMembers": ["C"]}"#)
                .unwrap();
        assert_eq!(g.target_size, 2);
        assert_eq!(g.fixed_members, vec!["C"]);
    }
}
