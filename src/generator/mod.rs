//! Schedule generation.
//!
//! Turns a validated [`GenerationRequest`] into up to N distinct schedules
//! (three by default).
//!
//! # Producers
//!
//! - [`ScheduleGenerator`]: local randomized first-fit engine with an
//!   attempt cap.
//! - [`ReplyProducer`]: replays a reply from an external service through the
//!   same audit and deduplication.
//!
//! Both report through [`GenerationResult`]: the schedules found plus an
//! optional [`Diagnosis`] when the input was invalid or the run fell short.
//!
//! # Usage
//!
//! ```
//! use u_roster::config::GeneratorConfig;
//! use u_roster::generator::{GenerationRequest, ScheduleGenerator, ScheduleProducer};
//! use u_roster::models::{Group, Worker};
//!
//! let request = GenerationRequest::new(
//!     Worker::roster(["A", "B", "C", "D", "E", "F"]),
//!     vec![
//!         Group::new(1, "Kitchen", 3).with_fixed_member("A"),
//!         Group::new(2, "Lobby", 3),
//!     ],
//! )
//! .with_start_date("2025-04-01")
//! .with_forbidden_pairs("A-B");
//!
//! let mut producer = ScheduleGenerator::with_seed(GeneratorConfig::default(), 7);
//! let result = producer.produce(&request);
//! for schedule in &result.schedules {
//!     assert!(schedule.group("Kitchen").unwrap().contains("A"));
//!     assert!(!schedule.together("A", "B"));
//! }
//! ```

mod dedup;
mod engine;
mod reply;
mod request;
mod result;
mod stats;

pub use dedup::{CanonicalForm, Deduplicator, Duplicate, History};
pub use engine::ScheduleGenerator;
pub use reply::{ProducerReply, ReplyError, ReplyProducer};
pub use request::GenerationRequest;
pub use result::{Diagnosis, GenerationResult};
pub use stats::{AttemptOutcome, GenerationStats};

/// Anything that can answer a [`GenerationRequest`].
///
/// Implementations validate the request themselves and report invalid
/// input through [`Diagnosis::Invalid`] rather than panicking.
pub trait ScheduleProducer {
    /// Producer name (e.g., "local", "reply").
    fn name(&self) -> &'static str;

    /// Produces schedules for a request.
    fn produce(&mut self, request: &GenerationRequest) -> GenerationResult;
}
