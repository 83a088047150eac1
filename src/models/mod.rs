//! Roster domain models.
//!
//! Provides the core data types for describing a grouping problem and
//! its solutions.
//!
//! # Domain Mappings
//!
//! | u-roster | Cleaning crew | Classroom | Shift work |
//! |----------|---------------|-----------|------------|
//! | Worker | Cleaner | Student | Employee |
//! | Group | Area team | Project group | Shift crew |
//! | PairConstraint | Keep apart / pair up | Seating rule | Buddy rule |
//! | Schedule | Weekly rota | Group sheet | Crew plan |

mod constraint;
mod group;
mod schedule;
mod worker;

pub use constraint::{PairConstraint, PairKind, PairSet};
pub use group::Group;
pub use schedule::{GroupAssignment, Schedule, Violation, ViolationType};
pub use worker::Worker;
