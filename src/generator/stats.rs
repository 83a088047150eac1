//! Generation run statistics.
//!
//! Counts how each placement attempt ended. Useful for telling apart
//! "constraints are contradictory in practice" (every attempt abandoned)
//! from "the space of arrangements is small" (attempts succeed but repeat).
//!
//! | Counter | Attempt outcome |
//! |---------|-----------------|
//! | accepted | New distinct schedule |
//! | desired_unplaced | A desired pair found no group with room |
//! | worker_unplaced | A remaining worker found no compatible group |
//! | forbidden_in_group | Final check found a forbidden pair in a group |
//! | duplicate_of_history | Repeats a prior schedule |
//! | duplicate_of_generated | Repeats a schedule from this run |
//! | audit_failed | An externally produced schedule broke a rule |

use serde::{Deserialize, Serialize};

/// How a single attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Schedule admitted.
    Accepted,
    /// Abandoned while placing desired pairs.
    DesiredUnplaced,
    /// Abandoned while placing the remaining workers.
    WorkerUnplaced,
    /// Rejected by the final forbidden-pair check.
    ForbiddenInGroup,
    /// Rejected as a repeat of history.
    DuplicateOfHistory,
    /// Rejected as a repeat of a schedule from this run.
    DuplicateOfGenerated,
    /// An externally produced schedule failed the audit.
    AuditFailed,
}

/// Per-run attempt counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
    /// Attempts made.
    pub attempts: usize,
    /// Attempts that produced a new schedule.
    pub accepted: usize,
    /// Attempts abandoned at desired-pair placement.
    pub desired_unplaced: usize,
    /// Attempts abandoned at remaining-worker placement.
    pub worker_unplaced: usize,
    /// Attempts rejected by the final forbidden-pair check.
    pub forbidden_in_group: usize,
    /// Attempts rejected as repeats of history.
    pub duplicate_of_history: usize,
    /// Attempts rejected as repeats within the run.
    pub duplicate_of_generated: usize,
    /// External schedules rejected by the audit.
    pub audit_failed: usize,
}

impl GenerationStats {
    /// Records one attempt outcome.
    pub fn record(&mut self, outcome: AttemptOutcome) {
        self.attempts += 1;
        let counter = match outcome {
            AttemptOutcome::Accepted => &mut self.accepted,
            AttemptOutcome::DesiredUnplaced => &mut self.desired_unplaced,
            AttemptOutcome::WorkerUnplaced => &mut self.worker_unplaced,
            AttemptOutcome::ForbiddenInGroup => &mut self.forbidden_in_group,
            AttemptOutcome::DuplicateOfHistory => &mut self.duplicate_of_history,
            AttemptOutcome::DuplicateOfGenerated => &mut self.duplicate_of_generated,
            AttemptOutcome::AuditFailed => &mut self.audit_failed,
        };
        *counter += 1;
    }

    /// Attempts that never produced a complete arrangement.
    pub fn abandoned(&self) -> usize {
        self.desired_unplaced + self.worker_unplaced + self.forbidden_in_group + self.audit_failed
    }

    /// Attempts that produced a complete arrangement that was a repeat.
    pub fn duplicates(&self) -> usize {
        self.duplicate_of_history + self.duplicate_of_generated
    }

    /// Fraction of attempts that were accepted (0.0..1.0).
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.attempts as f64
    }
}
