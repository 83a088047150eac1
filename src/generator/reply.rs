//! External producer replies.
//!
//! An outside service may stand in for the local engine. It receives the
//! same request and answers with `{"schedules": [[{"name", "members"}]]}`,
//! possibly wrapped in a Markdown code fence. The reply is never trusted:
//! every schedule is audited against the request and deduplicated exactly
//! as locally generated ones are.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::dedup::{Deduplicator, Duplicate, History};
use super::request::GenerationRequest;
use super::result::GenerationResult;
use super::stats::{AttemptOutcome, GenerationStats};
use super::ScheduleProducer;
use crate::config::GeneratorConfig;
use crate::models::Schedule;
use crate::validation::{audit_schedule, validate_request};

/// Reply parsing error.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply is empty")]
    Empty,

    #[error("reply is not a valid schedules payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Structurally parsed reply payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerReply {
    /// Proposed schedules, in the producer's order.
    pub schedules: Vec<Schedule>,
}

impl ProducerReply {
    /// Parses a raw reply body, unwrapping a surrounding code fence.
    pub fn from_json(raw: &str) -> Result<Self, ReplyError> {
        let body = strip_code_fence(raw);
        if body.is_empty() {
            return Err(ReplyError::Empty);
        }
        Ok(serde_json::from_str(body)?)
    }
}

/// Removes a ```` ```lang ... ``` ```` wrapper, if present.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };
    let body = match inner.split_once('\n') {
        Some((tag, rest)) if tag.trim().chars().all(|c| c.is_alphanumeric() || c == '_') => rest,
        _ => inner.trim_start_matches(|c: char| c.is_alphanumeric() || c == '_'),
    };
    body.trim()
}

/// Producer that replays an external reply through audit and deduplication.
#[derive(Debug, Clone)]
pub struct ReplyProducer {
    reply: ProducerReply,
    config: GeneratorConfig,
}

impl ReplyProducer {
    /// Wraps a parsed reply.
    pub fn new(reply: ProducerReply, config: GeneratorConfig) -> Self {
        Self { reply, config }
    }

    /// Parses a raw reply body and wraps it.
    pub fn from_json(raw: &str, config: GeneratorConfig) -> Result<Self, ReplyError> {
        Ok(Self::new(ProducerReply::from_json(raw)?, config))
    }

    /// Validates the request, then keeps the reply's schedules that pass
    /// the audit and are not repeats, up to the configured target.
    pub fn accept(&self, request: &GenerationRequest) -> GenerationResult {
        if let Err(error) = validate_request(request) {
            warn!(event = "validation_failed", kind = ?error.kind, message = %error);
            return GenerationResult::invalid(error);
        }

        let history = History::parse(&request.history, self.config.history_depth);
        let mut dedup = Deduplicator::new(&history, self.config.history_match);
        let mut accepted: Vec<Schedule> = Vec::new();
        let mut stats = GenerationStats::default();

        for proposed in &self.reply.schedules {
            if dedup.accepted_count() >= self.config.target_schedules {
                break;
            }
            let violations = audit_schedule(request, proposed);
            let outcome = if let Some(first) = violations.first() {
                debug!(
                    event = "reply_schedule_rejected",
                    violations = violations.len(),
                    first = %first.message,
                );
                AttemptOutcome::AuditFailed
            } else {
                let schedule = normalized(proposed);
                match dedup.admit(&schedule) {
                    Ok(()) => {
                        accepted.push(schedule);
                        AttemptOutcome::Accepted
                    }
                    Err(Duplicate::OfHistory) => AttemptOutcome::DuplicateOfHistory,
                    Err(Duplicate::OfGenerated) => AttemptOutcome::DuplicateOfGenerated,
                }
            };
            stats.record(outcome);
        }

        let result = GenerationResult::collected(accepted, self.config.target_schedules, stats);
        info!(
            event = "reply_accepted",
            proposed = self.reply.schedules.len(),
            accepted = result.schedules.len(),
            audit_failed = result.stats.audit_failed,
            duplicates = result.stats.duplicates(),
        );
        result
    }
}

impl ScheduleProducer for ReplyProducer {
    fn name(&self) -> &'static str {
        "reply"
    }

    fn produce(&mut self, request: &GenerationRequest) -> GenerationResult {
        self.accept(request)
    }
}

/// Copy with each group's members sorted.
fn normalized(schedule: &Schedule) -> Schedule {
    let mut copy = schedule.clone();
    for group in &mut copy.groups {
        group.members.sort_unstable();
    }
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Diagnosis;
    use crate::models::{Group, Worker};

    fn request() -> GenerationRequest {
        GenerationRequest::new(
            Worker::roster(["A", "B", "C", "D"]),
            vec![
                Group::new(1, "Team1", 2).with_fixed_member("C"),
                Group::new(2, "Team2", 2),
            ],
        )
        .with_start_date("2025-04-01")
        .with_forbidden_pairs("A-C")
    }

    const REPLY: &str = r#"{
        "schedules": [
            [{"name": "Team1", "members": ["D", "C"]}, {"name": "Team2", "members": ["A", "B"]}],
            [{"name": "Team1", "members": ["A", "C"]}, {"name": "Team2", "members": ["B", "D"]}],
            [{"name": "Team1", "members": ["B", "C"]}, {"name": "Team2", "members": ["A", "D"]}],
            [{"name": "Team1", "members": ["C", "D"]}, {"name": "Team2", "members": ["B", "A"]}]
        ]
    }"#;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  ```\n[]\n```  "), "[]");
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_code_fence_with_padded_tag() {
        assert_eq!(strip_code_fence("```json \n\n{\"a\":1}\n \n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\t\n[1, 2]\n```"), "[1, 2]");

        let raw = format!("```json  \n\n{REPLY}\n```");
        assert_eq!(ProducerReply::from_json(&raw).unwrap().schedules.len(), 4);
    }

    #[test]
    fn test_parse_fenced_reply() {
        let raw = format!("```json\n{REPLY}\n```");
        let reply = ProducerReply::from_json(&raw).unwrap();
        assert_eq!(reply.schedules.len(), 4);
        assert_eq!(reply.schedules[0].groups[0].members, vec!["D", "C"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(ProducerReply::from_json("   "), Err(ReplyError::Empty)));
        assert!(matches!(
            ProducerReply::from_json("{\"schedules\": 3}"),
            Err(ReplyError::Json(_))
        ));
    }

    #[test]
    fn test_accept_audits_and_dedups() {
        let producer = ReplyProducer::from_json(REPLY, GeneratorConfig::default()).unwrap();
        let result = producer.accept(&request());

        // #2 puts A with C; #4 repeats #1.
        assert_eq!(result.schedules.len(), 2);
        assert_eq!(result.stats.audit_failed, 1);
        assert_eq!(result.stats.duplicate_of_generated, 1);
        assert_eq!(result.schedules[0].groups[0].members, vec!["C", "D"]);
        assert_eq!(
            result.diagnosis,
            Some(Diagnosis::Partial {
                found: 2,
                target: 3
            })
        );
    }

    #[test]
    fn test_accept_respects_history() {
        let r = request().with_history("Team1: C, D; Team2: A, B");
        let producer = ReplyProducer::from_json(REPLY, GeneratorConfig::default()).unwrap();
        let result = producer.accept(&r);
        assert_eq!(result.schedules.len(), 1);
        assert_eq!(result.stats.duplicate_of_history, 2);
    }

    #[test]
    fn test_accept_stops_at_target() {
        let config = GeneratorConfig::default().with_target_schedules(1);
        let producer = ReplyProducer::from_json(REPLY, config).unwrap();
        let result = producer.accept(&request());
        assert_eq!(result.schedules.len(), 1);
        assert_eq!(result.stats.attempts, 1);
        assert!(result.is_complete());
    }

    #[test]
    fn test_accept_rejects_invalid_request() {
        let mut producer = ReplyProducer::from_json(REPLY, GeneratorConfig::default()).unwrap();
        let r = request().with_desired_pairs("A-Q");
        let result = producer.produce(&r);
        assert!(result.schedules.is_empty());
        assert!(result.validation_error().is_some());
        assert_eq!(producer.name(), "reply");
    }

    #[test]
    fn test_empty_reply_is_unsatisfiable() {
        let producer = ReplyProducer::new(ProducerReply::default(), GeneratorConfig::default());
        let result = producer.accept(&request());
        assert_eq!(result.diagnosis, Some(Diagnosis::Unsatisfiable { attempts: 0 }));
    }
}
