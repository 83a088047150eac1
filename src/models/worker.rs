//! Worker model.
//!
//! A worker is a named member of the roster. The name is the identity:
//! there is no separate numeric id, and names must be unique within a
//! request. The optional role is informational only.

use serde::{Deserialize, Serialize};

/// A roster member that can be placed into a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WorkerRepr")]
pub struct Worker {
    /// Unique display name.
    pub name: String,
    /// Role tag (e.g., "lead", "trainee"). Not used by any constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Wire form: either a bare name or a `{ name, role }` object.
#[derive(Deserialize)]
#[serde(untagged)]
enum WorkerRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        role: Option<String>,
    },
}

impl From<WorkerRepr> for Worker {
    fn from(repr: WorkerRepr) -> Self {
        match repr {
            WorkerRepr::Name(name) => Worker::new(name),
            WorkerRepr::Full { name, role } => Worker {
                name,
                role: role.filter(|r| !r.trim().is_empty()),
            },
        }
    }
}

impl Worker {
    /// Creates a worker without a role.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
        }
    }

    /// Sets the role tag.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Builds a roster from plain names.
    pub fn roster<I, S>(names: I) -> Vec<Worker>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(Worker::new).collect()
    }
}

impl From<&str> for Worker {
    fn from(name: &str) -> Self {
        Worker::new(name)
    }
}

impl From<String> for Worker {
    fn from(name: String) -> Self {
        Worker::new(name)
    }
}
