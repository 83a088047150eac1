//! Generation output and diagnoses.

use serde::{Serialize, Serializer};
use thiserror::Error;

use super::stats::GenerationStats;
use crate::models::Schedule;
use crate::validation::ValidationError;

/// Why a run returned fewer schedules than its target.
///
/// Only [`Diagnosis::Invalid`] means the caller must change the input; the
/// other two still come with whatever schedules were found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnosis {
    /// The request failed validation; no attempt was made.
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    /// Every attempt was abandoned, rejected, or a repeat.
    #[error(
        "No valid arrangement was found after {attempts} attempts. \
         The fixed members, desired pairs, or forbidden pairs may be too strict; review the conditions."
    )]
    Unsatisfiable { attempts: usize },

    /// Some, but not enough, distinct schedules were found.
    #[error(
        "Only {found} of {target} distinct arrangements could be generated. \
         Relax the conditions to obtain more."
    )]
    Partial { found: usize, target: usize },
}

impl Serialize for Diagnosis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of one generation run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Accepted schedules, in acceptance order.
    pub schedules: Vec<Schedule>,
    /// Set when the run fell short of its target or the input was invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<Diagnosis>,
    /// Attempt counters.
    pub stats: GenerationStats,
}

impl GenerationResult {
    /// Result for a request that failed validation.
    pub fn invalid(error: ValidationError) -> Self {
        Self {
            diagnosis: Some(Diagnosis::Invalid(error)),
            ..Self::default()
        }
    }

    /// Result for a completed run, annotated when short of `target`.
    pub fn collected(schedules: Vec<Schedule>, target: usize, stats: GenerationStats) -> Self {
        let diagnosis = match schedules.len() {
            0 => Some(Diagnosis::Unsatisfiable {
                attempts: stats.attempts,
            }),
            found if found < target => Some(Diagnosis::Partial { found, target }),
            _ => None,
        };
        Self {
            schedules,
            diagnosis,
            stats,
        }
    }

    /// Whether the target was reached.
    pub fn is_complete(&self) -> bool {
        self.diagnosis.is_none()
    }

    /// The validation error, if the request was rejected.
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match &self.diagnosis {
            Some(Diagnosis::Invalid(e)) => Some(e),
            _ => None,
        }
    }
}
