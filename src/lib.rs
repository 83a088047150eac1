//! Roster grouping for the U-Engine ecosystem.
//!
//! Places a fixed roster of named workers into predefined groups of exact
//! sizes, honoring fixed memberships, forbidden pairs, and desired pairs,
//! and returns several distinct arrangements that avoid recent history.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Worker`, `Group`, `PairConstraint`,
//!   `PairSet`, `Schedule`, `GroupAssignment`, `Violation`
//! - **`parsing`**: Free-text entry parsing (pairs, member lists, history)
//! - **`validation`**: Request consistency checks and schedule audits
//! - **`generator`**: Randomized retry engine, deduplication, external replies
//! - **`config`**: Generator settings, loadable from TOML
//!
//! # Architecture
//!
//! Validation gates generation. Each run parses its constraint sets once,
//! then makes independent greedy placement attempts until it has enough
//! distinct schedules or hits the attempt cap. The engine is not an
//! optimal solver: it may miss an arrangement that exists.

pub mod config;
pub mod generator;
pub mod models;
pub mod parsing;
pub mod validation;
