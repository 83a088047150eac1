//! Randomized retry-based group assignment.
//!
//! # Algorithm
//!
//! Each attempt starts from scratch:
//!
//! 1. Seed every group with its fixed members.
//! 2. Place desired pairs in input order, first-fit, into the first group
//!    with two free slots. A pair is skipped when either member is already
//!    placed, fixed members included. No room abandons the attempt.
//! 3. Shuffle the remaining workers and place each into the first group
//!    with a free slot and no forbidden partner. No such group abandons
//!    the attempt.
//! 4. Sort each group's members and re-check forbidden pairs.
//! 5. Reject repeats of history or of schedules accepted earlier in the run.
//!
//! The run stops at the schedule target or the attempt cap. There is no
//! backtracking within an attempt; the shuffle in step 3 is the only source
//! of variety between attempts.
//!
//! # Complexity
//! O(a * w * g) where a=attempts, w=workers, g=groups.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::dedup::{Deduplicator, Duplicate, History};
use super::request::GenerationRequest;
use super::result::GenerationResult;
use super::stats::{AttemptOutcome, GenerationStats};
use super::ScheduleProducer;
use crate::config::{GeneratorConfig, HistoryMatch};
use crate::models::{GroupAssignment, PairSet, Schedule};
use crate::validation::validate_request;

/// Local schedule generator.
///
/// # Example
///
/// ```
/// use u_roster::config::GeneratorConfig;
/// use u_roster::generator::{GenerationRequest, ScheduleGenerator};
/// use u_roster::models::{Group, Worker};
///
/// let request = GenerationRequest::new(
///     Worker::roster(["A", "B", "C", "D"]),
///     vec![Group::new(1, "Team1", 2), Group::new(2, "Team2", 2)],
/// )
/// .with_start_date("2025-04-01");
///
/// let mut generator = ScheduleGenerator::with_seed(GeneratorConfig::default(), 42);
/// let result = generator.generate(&request);
/// assert_eq!(result.schedules.len(), 3);
/// assert!(result.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleGenerator<R = StdRng> {
    config: GeneratorConfig,
    rng: R,
}

impl ScheduleGenerator<StdRng> {
    /// Creates a generator. Uses `config.random_seed` when set, OS entropy
    /// otherwise.
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { config, rng }
    }

    /// Creates a generator with a fixed seed, overriding the config's.
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config: GeneratorConfig {
                random_seed: Some(seed),
                ..config
            },
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ScheduleGenerator<StdRng> {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl<R: Rng> ScheduleGenerator<R> {
    /// Creates a generator over an injected random source.
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Validates the request, then runs placement attempts until the
    /// target is met or the attempt cap is reached.
    pub fn generate(&mut self, request: &GenerationRequest) -> GenerationResult {
        if let Err(error) = validate_request(request) {
            warn!(event = "validation_failed", kind = ?error.kind, message = %error);
            return GenerationResult::invalid(error);
        }

        let run = GenerationRun::new(request, &self.config);
        info!(
            event = "generation_start",
            workers = request.workers.len(),
            groups = request.groups.len(),
            forbidden_pairs = run.forbidden.len(),
            desired_pairs = run.desired.len(),
            history = run.history.len(),
            target = self.config.target_schedules,
            max_attempts = self.config.max_attempts,
        );

        let mut dedup = run.deduplicator(self.config.history_match);
        let mut accepted: Vec<Schedule> = Vec::new();
        let mut stats = GenerationStats::default();

        while dedup.accepted_count() < self.config.target_schedules
            && stats.attempts < self.config.max_attempts
        {
            let outcome = match run.attempt(&mut self.rng) {
                Err(outcome) => outcome,
                Ok(schedule) => match dedup.admit(&schedule) {
                    Ok(()) => {
                        accepted.push(schedule);
                        AttemptOutcome::Accepted
                    }
                    Err(Duplicate::OfHistory) => AttemptOutcome::DuplicateOfHistory,
                    Err(Duplicate::OfGenerated) => AttemptOutcome::DuplicateOfGenerated,
                },
            };
            stats.record(outcome);
            if outcome != AttemptOutcome::Accepted {
                debug!(event = "attempt_rejected", attempt = stats.attempts, outcome = ?outcome);
            }
        }

        let result = GenerationResult::collected(accepted, self.config.target_schedules, stats);
        info!(
            event = "generation_end",
            accepted = result.schedules.len(),
            attempts = result.stats.attempts,
            abandoned = result.stats.abandoned(),
            duplicates = result.stats.duplicates(),
            acceptance_rate = result.stats.acceptance_rate(),
        );
        if let Some(diagnosis) = &result.diagnosis {
            warn!(event = "generation_short", diagnosis = %diagnosis);
        }
        result
    }
}

impl<R: Rng> ScheduleProducer for ScheduleGenerator<R> {
    fn name(&self) -> &'static str {
        "local"
    }

    fn produce(&mut self, request: &GenerationRequest) -> GenerationResult {
        self.generate(request)
    }
}

/// Constraint state materialized once per run.
struct GenerationRun<'a> {
    request: &'a GenerationRequest,
    forbidden: PairSet,
    desired: PairSet,
    /// Workers pinned to a group.
    fixed: HashSet<&'a str>,
    history: History,
}

impl<'a> GenerationRun<'a> {
    fn new(request: &'a GenerationRequest, config: &GeneratorConfig) -> Self {
        let fixed = request
            .groups
            .iter()
            .flat_map(|g| g.fixed_members.iter().map(String::as_str))
            .collect();
        let history = History::parse(&request.history, config.history_depth);
        Self {
            request,
            forbidden: request.forbidden_set(),
            desired: request.desired_set(),
            fixed,
            history,
        }
    }

    fn deduplicator(&self, mode: HistoryMatch) -> Deduplicator {
        Deduplicator::new(&self.history, mode)
    }

    /// One full placement pass on fresh working state.
    fn attempt<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Schedule, AttemptOutcome> {
        let groups = &self.request.groups;
        let mut working: Vec<Vec<&str>> = groups
            .iter()
            .map(|g| g.fixed_members.iter().map(String::as_str).collect())
            .collect();
        let mut placed: HashSet<&str> = self.fixed.clone();

        for pair in self.desired.iter() {
            let (a, b) = (pair.first.as_str(), pair.second.as_str());
            if placed.contains(a) || placed.contains(b) {
                continue;
            }
            let slot = working
                .iter()
                .zip(groups)
                .position(|(members, g)| members.len() + 2 <= g.target_size)
                .ok_or(AttemptOutcome::DesiredUnplaced)?;
            working[slot].extend([a, b]);
            placed.insert(a);
            placed.insert(b);
        }

        let mut remaining: Vec<&str> = self
            .request
            .worker_names()
            .filter(|name| !placed.contains(name))
            .collect();
        remaining.shuffle(rng);

        for worker in remaining {
            let slot = working
                .iter()
                .zip(groups)
                .position(|(members, g)| {
                    members.len() < g.target_size
                        && !self.forbidden.conflicts_with(worker, members.iter().copied())
                })
                .ok_or(AttemptOutcome::WorkerUnplaced)?;
            working[slot].push(worker);
        }

        let schedule = Schedule::from_groups(
            groups
                .iter()
                .zip(working)
                .map(|(g, mut members)| {
                    members.sort_unstable();
                    GroupAssignment::new(g.name.clone(), members)
                })
                .collect(),
        );

        if schedule
            .groups
            .iter()
            .any(|g| self.forbidden.first_within(&g.members).is_some())
        {
            return Err(AttemptOutcome::ForbiddenInGroup);
        }
        Ok(schedule)
    }
}
