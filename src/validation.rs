//! Input validation and schedule auditing.
//!
//! [`validate_request`] checks the structural and semantic consistency of a
//! [`GenerationRequest`] before any placement attempt. Checks run in a fixed
//! order and stop at the first failure, so a request always yields the same
//! single diagnosis:
//!
//! 1. A start date is set
//! 2. The declared worker count is positive, roster names are unique, and
//!    the count equals the roster size
//! 3. The declared group count is positive
//! 4. Group sizes add up to the worker count
//! 5. Every group has a name and a positive size
//! 6. No group has more fixed members than its size
//! 7. Every fixed member is on the roster
//! 8. No worker is fixed to two groups
//! 9. Every pair token has two distinct, registered names
//! 10. No forbidden pair is fixed into the same group
//! 11. No desired pair is fixed into different groups
//!
//! [`audit_schedule`] checks a finished schedule against the request.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::generator::GenerationRequest;
use crate::models::{PairKind, PairSet, Schedule, Violation, ViolationType};

/// Validation result.
pub type ValidationResult = Result<(), ValidationError>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description naming the offending entity.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No scheduling anchor.
    MissingStartDate,
    /// Declared worker count is zero.
    InvalidWorkerCount,
    /// Two roster entries share a name.
    DuplicateWorker,
    /// Declared worker count differs from the distinct roster size.
    WorkerCountMismatch,
    /// Declared group count is zero.
    InvalidGroupCount,
    /// Group sizes do not add up to the worker count.
    GroupSizeMismatch,
    /// A group has a blank name.
    UnnamedGroup,
    /// A group has size zero.
    InvalidGroupSize,
    /// A group has more fixed members than slots.
    TooManyFixedMembers,
    /// A fixed member is not on the roster.
    UnknownFixedMember,
    /// A worker is fixed to more than one group.
    DuplicateFixedMember,
    /// A pair token does not have exactly two parts.
    MalformedPair,
    /// A pair names a worker not on the roster.
    UnknownPairMember,
    /// A pair names the same worker twice.
    SelfPair,
    /// A forbidden pair is fixed into one group.
    FixedForbiddenConflict,
    /// A desired pair is fixed into two different groups.
    FixedDesiredConflict,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a generation request.
///
/// # Returns
/// `Ok(())` if every check passes, otherwise the first failure.
pub fn validate_request(request: &GenerationRequest) -> ValidationResult {
    check_start_date(request)?;
    check_worker_count(request)?;
    check_groups(request)?;
    check_fixed_members(request)?;
    check_pairs(request, PairKind::Forbidden, &request.forbidden_tokens())?;
    check_pairs(request, PairKind::Desired, &request.desired_tokens())?;
    check_fixed_conflicts(request)
}

fn check_start_date(request: &GenerationRequest) -> ValidationResult {
    match request.start_date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => Ok(()),
        _ => Err(ValidationError::new(
            ValidationErrorKind::MissingStartDate,
            "A start date must be set before generating schedules.",
        )),
    }
}

fn check_worker_count(request: &GenerationRequest) -> ValidationResult {
    let declared = request.declared_worker_count();
    if declared == 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidWorkerCount,
            "The worker count must be positive.",
        ));
    }

    let mut registered: HashSet<&str> = HashSet::new();
    if let Some(repeated) = request.worker_names().find(|name| !registered.insert(*name)) {
        return Err(ValidationError::new(
            ValidationErrorKind::DuplicateWorker,
            format!("Worker '{repeated}' is registered more than once; names must be unique."),
        ));
    }
    if registered.len() != declared {
        return Err(ValidationError::new(
            ValidationErrorKind::WorkerCountMismatch,
            format!(
                "The worker count is {declared}, but {} distinct worker names are registered.",
                registered.len()
            ),
        ));
    }
    Ok(())
}

fn check_groups(request: &GenerationRequest) -> ValidationResult {
    if request.declared_group_count() == 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidGroupCount,
            "The group count must be positive.",
        ));
    }

    let total: usize = request.groups.iter().map(|g| g.target_size).sum();
    let workers = request.declared_worker_count();
    if total != workers {
        return Err(ValidationError::new(
            ValidationErrorKind::GroupSizeMismatch,
            format!("Group sizes add up to {total}, but the worker count is {workers}."),
        ));
    }

    for group in &request.groups {
        if group.name.trim().is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::UnnamedGroup,
                format!("Group #{} has no name.", group.id),
            ));
        }
        if group.target_size == 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidGroupSize,
                format!("Group '{}' must have a positive size.", group.name),
            ));
        }
    }
    Ok(())
}

fn check_fixed_members(request: &GenerationRequest) -> ValidationResult {
    for group in &request.groups {
        if group.fixed_members.len() > group.target_size {
            return Err(ValidationError::new(
                ValidationErrorKind::TooManyFixedMembers,
                format!(
                    "Group '{}' has {} fixed members, more than its size of {}.",
                    group.name,
                    group.fixed_members.len(),
                    group.target_size
                ),
            ));
        }
    }

    for group in &request.groups {
        if let Some(unknown) = group.fixed_members.iter().find(|m| !request.has_worker(m)) {
            return Err(ValidationError::new(
                ValidationErrorKind::UnknownFixedMember,
                format!(
                    "Fixed member '{unknown}' of group '{}' is not a registered worker.",
                    group.name
                ),
            ));
        }
    }

    let mut owner: HashMap<&str, &str> = HashMap::new();
    for group in &request.groups {
        for member in &group.fixed_members {
            if let Some(first) = owner.insert(member.as_str(), group.name.as_str()) {
                return Err(ValidationError::new(
                    ValidationErrorKind::DuplicateFixedMember,
                    format!(
                        "Worker '{member}' is fixed to more than one group ('{first}' and '{}').",
                        group.name
                    ),
                ));
            }
        }
    }
    Ok(())
}

fn check_pairs(
    request: &GenerationRequest,
    kind: PairKind,
    tokens: &[Vec<String>],
) -> ValidationResult {
    for token in tokens {
        let [a, b] = token.as_slice() else {
            return Err(ValidationError::new(
                ValidationErrorKind::MalformedPair,
                format!(
                    "Malformed {kind} pair '{}'; expected the form A-B.",
                    token.join("-")
                ),
            ));
        };
        if let Some(unknown) = [a, b].into_iter().find(|n| !request.has_worker(n)) {
            return Err(ValidationError::new(
                ValidationErrorKind::UnknownPairMember,
                format!("The {kind} pair '{a}-{b}' names an unregistered worker '{unknown}'."),
            ));
        }
        if a == b {
            return Err(ValidationError::new(
                ValidationErrorKind::SelfPair,
                format!("The {kind} pair '{a}-{b}' names the same worker twice."),
            ));
        }
    }
    Ok(())
}

fn check_fixed_conflicts(request: &GenerationRequest) -> ValidationResult {
    let forbidden = request.forbidden_set();
    for group in &request.groups {
        if let Some(pair) = forbidden.first_within(&group.fixed_members) {
            return Err(ValidationError::new(
                ValidationErrorKind::FixedForbiddenConflict,
                format!(
                    "Workers '{}' and '{}' are both fixed to group '{}' but form a forbidden pair.",
                    pair.first, pair.second, group.name
                ),
            ));
        }
    }

    for pair in request.desired_set().iter() {
        let (Some(ga), Some(gb)) = (
            request.fixed_group_of(&pair.first),
            request.fixed_group_of(&pair.second),
        ) else {
            continue;
        };
        if ga != gb {
            return Err(ValidationError::new(
                ValidationErrorKind::FixedDesiredConflict,
                format!(
                    "Workers '{}' and '{}' form a desired pair but are fixed to different groups ('{}' and '{}').",
                    pair.first, pair.second, request.groups[ga].name, request.groups[gb].name
                ),
            ));
        }
    }
    Ok(())
}

/// Audits a finished schedule against a request.
///
/// Checks group alignment, group sizes, that each roster worker appears
/// exactly once, fixed placements, and forbidden pairs.
///
/// # Returns
/// Every violation found; empty when the schedule is acceptable.
pub fn audit_schedule(request: &GenerationRequest, schedule: &Schedule) -> Vec<Violation> {
    let mut violations = Vec::new();

    if schedule.group_count() != request.groups.len() {
        violations.push(Violation::new(
            ViolationType::GroupMismatch,
            "schedule",
            format!(
                "Schedule has {} groups, expected {}",
                schedule.group_count(),
                request.groups.len()
            ),
        ));
    }

    for (group, assigned) in request.groups.iter().zip(&schedule.groups) {
        if group.name != assigned.name {
            violations.push(Violation::new(
                ViolationType::GroupMismatch,
                &assigned.name,
                format!("Expected group '{}' at this position", group.name),
            ));
        }
        if assigned.len() != group.target_size {
            violations.push(Violation::new(
                ViolationType::SizeMismatch,
                &assigned.name,
                format!(
                    "Group has {} members, expected {}",
                    assigned.len(),
                    group.target_size
                ),
            ));
        }
        for fixed in &group.fixed_members {
            if !assigned.contains(fixed) {
                violations.push(Violation::new(
                    ViolationType::FixedMemberMisplaced,
                    fixed,
                    format!("Fixed member is not in group '{}'", group.name),
                ));
            }
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for assigned in &schedule.groups {
        for member in &assigned.members {
            if !request.has_worker(member) {
                violations.push(Violation::new(
                    ViolationType::UnknownWorker,
                    member,
                    format!("'{member}' in group '{}' is not on the roster", assigned.name),
                ));
            } else if !seen.insert(member.as_str()) {
                violations.push(Violation::new(
                    ViolationType::DuplicateWorker,
                    member,
                    format!("'{member}' is placed more than once"),
                ));
            }
        }
    }
    for name in request.worker_names() {
        if !seen.contains(name) {
            violations.push(Violation::new(
                ViolationType::MissingWorker,
                name,
                format!("'{name}' is not placed in any group"),
            ));
        }
    }

    let forbidden: PairSet = request.forbidden_set();
    for assigned in &schedule.groups {
        for pair in forbidden.iter() {
            if assigned.contains(&pair.first) && assigned.contains(&pair.second) {
                violations.push(Violation::new(
                    ViolationType::ForbiddenPair,
                    &assigned.name,
                    format!("Forbidden pair {pair} shares group '{}'", assigned.name),
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, GroupAssignment, Worker};

    fn sample_request() -> GenerationRequest {
        GenerationRequest::new(
            Worker::roster(["A", "B", "C", "D"]),
            vec![Group::new(1, "Team1", 2), Group::new(2, "Team2", 2)],
        )
        .with_start_date("2025-04-01")
    }

    fn kind_of(request: &GenerationRequest) -> ValidationErrorKind {
        validate_request(request).unwrap_err().kind
    }

    #[test]
    fn test_valid_input() {
        let r = sample_request()
            .with_forbidden_pairs("A-B")
            .with_desired_pairs("C-D");
        assert!(validate_request(&r).is_ok());
    }

    #[test]
    fn test_missing_start_date() {
        let mut r = sample_request();
        r.start_date = None;
        assert_eq!(kind_of(&r), ValidationErrorKind::MissingStartDate);

        r.start_date = Some("  ".into());
        assert_eq!(kind_of(&r), ValidationErrorKind::MissingStartDate);
    }

    #[test]
    fn test_worker_count_mismatch_names_counts() {
        let r = sample_request().with_worker_count(3);
        let err = validate_request(&r).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::WorkerCountMismatch);
        assert!(err.message.contains('3'));
        assert!(err.message.contains('4'));
    }

    #[test]
    fn test_zero_worker_count() {
        let r = sample_request().with_worker_count(0);
        assert_eq!(kind_of(&r), ValidationErrorKind::InvalidWorkerCount);
    }

    #[test]
    fn test_duplicate_worker_name() {
        let r = GenerationRequest::new(
            Worker::roster(["A", "B", "A"]),
            vec![Group::new(1, "Team1", 3)],
        )
        .with_start_date("2025-04-01");
        let err = validate_request(&r).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::DuplicateWorker);
        assert!(err.message.contains("'A'"));
    }

    #[test]
    fn test_duplicate_worker_name_with_matching_declared_count() {
        // Two distinct names match the declared count of 2.
        let r = GenerationRequest::new(
            Worker::roster(["A", "A", "B"]),
            vec![Group::new(1, "Team1", 1), Group::new(2, "Team2", 1)],
        )
        .with_start_date("2025-04-01")
        .with_worker_count(2);
        let err = validate_request(&r).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::DuplicateWorker);
        assert!(err.message.contains("'A'"));
    }

    #[test]
    fn test_zero_group_count() {
        let r = sample_request().with_group_count(0);
        assert_eq!(kind_of(&r), ValidationErrorKind::InvalidGroupCount);
    }

    #[test]
    fn test_group_size_sum_mismatch() {
        let mut r = sample_request();
        r.groups[1].target_size = 3;
        let err = validate_request(&r).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::GroupSizeMismatch);
        assert!(err.message.contains('5'));
        assert!(err.message.contains('4'));
    }

    #[test]
    fn test_unnamed_group() {
        let mut r = sample_request();
        r.groups[0].name = " ".into();
        assert_eq!(kind_of(&r), ValidationErrorKind::UnnamedGroup);
    }

    #[test]
    fn test_zero_size_group() {
        let r = GenerationRequest::new(
            Worker::roster(["A", "B"]),
            vec![Group::new(1, "Team1", 2), Group::new(2, "Team2", 0)],
        )
        .with_start_date("2025-04-01");
        let err = validate_request(&r).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidGroupSize);
        assert!(err.message.contains("Team2"));
    }

    #[test]
    fn test_too_many_fixed_members() {
        let mut r = sample_request();
        r.groups[0] = Group::new(1, "Team1", 2).with_fixed_members_str("A, B, C");
        assert_eq!(kind_of(&r), ValidationErrorKind::TooManyFixedMembers);
    }

    #[test]
    fn test_unknown_fixed_member() {
        let mut r = sample_request();
        r.groups[0] = Group::new(1, "Team1", 2).with_fixed_member("Z");
        let err = validate_request(&r).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::UnknownFixedMember);
        assert!(err.message.contains("'Z'"));
    }

    #[test]
    fn test_duplicate_fixed_member() {
        let mut r = sample_request();
        r.groups[0] = Group::new(1, "Team1", 2).with_fixed_member("A");
        r.groups[1] = Group::new(2, "Team2", 2).with_fixed_member("A");
        let err = validate_request(&r).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::DuplicateFixedMember);
        assert!(err.message.contains("Team1") && err.message.contains("Team2"));
    }

    #[test]
    fn test_malformed_pair() {
        let r = sample_request().with_forbidden_pairs("A-B, C");
        let err = validate_request(&r).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MalformedPair);
        assert!(err.message.contains("forbidden"));

        let r = sample_request().with_desired_pairs("A-B-C");
        let err = validate_request(&r).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MalformedPair);
        assert!(err.message.contains("desired"));
    }

    #[test]
    fn test_unknown_pair_member() {
        let r = sample_request().with_desired_pairs("A-Z");
        let err = validate_request(&r).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::UnknownPairMember);
        assert!(err.message.contains("'Z'"));
    }

    #[test]
    fn test_self_pair() {
        let r = sample_request().with_forbidden_pairs("B-B");
        assert_eq!(kind_of(&r), ValidationErrorKind::SelfPair);
    }

    #[test]
    fn test_forbidden_pair_checked_before_desired() {
        let r = sample_request()
            .with_forbidden_pairs("A-A")
            .with_desired_pairs("X");
        assert_eq!(kind_of(&r), ValidationErrorKind::SelfPair);
    }

    #[test]
    fn test_fixed_forbidden_conflict() {
        let mut r = sample_request().with_forbidden_pairs("B-A");
        r.groups[0] = Group::new(1, "Team1", 2).with_fixed_members_str("A, B");
        let err = validate_request(&r).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::FixedForbiddenConflict);
        assert!(err.message.contains("Team1"));
    }

    #[test]
    fn test_fixed_desired_conflict() {
        let mut r = sample_request().with_desired_pairs("A-C");
        r.groups[0] = Group::new(1, "Team1", 2).with_fixed_member("A");
        r.groups[1] = Group::new(2, "Team2", 2).with_fixed_member("C");
        assert_eq!(kind_of(&r), ValidationErrorKind::FixedDesiredConflict);
    }

    #[test]
    fn test_desired_pair_fixed_together_is_fine() {
        let mut r = sample_request().with_desired_pairs("A-B");
        r.groups[0] = Group::new(1, "Team1", 2).with_fixed_members_str("A, B");
        assert!(validate_request(&r).is_ok());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let r = sample_request().with_worker_count(7);
        assert_eq!(validate_request(&r), validate_request(&r));
    }

    #[test]
    fn test_error_display_is_message() {
        let r = sample_request().with_group_count(0);
        let err = validate_request(&r).unwrap_err();
        assert_eq!(err.to_string(), err.message);
    }

    #[test]
    fn test_audit_clean_schedule() {
        let r = sample_request().with_forbidden_pairs("A-B");
        let s = Schedule::from_groups(vec![
            GroupAssignment::new("Team1", ["A", "C"]),
            GroupAssignment::new("Team2", ["B", "D"]),
        ]);
        assert!(audit_schedule(&r, &s).is_empty());
    }

    #[test]
    fn test_audit_reports_each_problem() {
        let mut r = sample_request().with_forbidden_pairs("A-B");
        r.groups[1] = Group::new(2, "Team2", 2).with_fixed_member("D");
        let s = Schedule::from_groups(vec![
            GroupAssignment::new("Team1", ["A", "B", "D"]),
            GroupAssignment::new("Team2", ["A", "Z"]),
        ]);
        let types: Vec<ViolationType> = audit_schedule(&r, &s)
            .into_iter()
            .map(|v| v.violation_type)
            .collect();
        assert!(types.contains(&ViolationType::SizeMismatch));
        assert!(types.contains(&ViolationType::FixedMemberMisplaced));
        assert!(types.contains(&ViolationType::UnknownWorker));
        assert!(types.contains(&ViolationType::DuplicateWorker));
        assert!(types.contains(&ViolationType::MissingWorker));
        assert!(types.contains(&ViolationType::ForbiddenPair));
    }

    #[test]
    fn test_audit_group_mismatch() {
        let r = sample_request();
        let s = Schedule::from_groups(vec![GroupAssignment::new("Other", ["A", "B", "C", "D"])]);
        let violations = audit_schedule(&r, &s);
        assert!(violations
            .iter()
            .filter(|v| v.violation_type == ViolationType::GroupMismatch)
            .count()
            >= 2);
    }
}
