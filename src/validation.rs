//! Advisory input validation.
//!
//! The scheduler degrades gracefully on bad input, so nothing here blocks
//! scheduling. Hosts can run these checks to surface data problems to
//! planners. Detects:
//! - Duplicate executor IDs
//! - Numeric cells that are filled in but do not parse
//! - Location strings that are filled in but do not parse
//! - A non-empty plan with no in-progress rows

use std::collections::HashSet;

use crate::models::{
    non_blank, parse_count, parse_count_prefix, parse_number, Coordinate, Executor, PlanEntry,
};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Finding category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two roster entries share an ID.
    DuplicateExecutorId,
    /// A numeric cell is non-blank but unparsable.
    MalformedNumber,
    /// A location is non-blank but unparsable.
    MalformedCoordinate,
    /// The plan has rows but none of them is in progress.
    NoActiveEntries,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a plan and roster.
///
/// # Returns
/// `Ok(())` if nothing was found, `Err(findings)` with every finding.
pub fn validate_input(plan: &[PlanEntry], roster: &[Executor]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut executor_ids = HashSet::new();
    for e in roster {
        if !executor_ids.insert(e.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateExecutorId,
                format!("Duplicate executor ID: {}", e.id),
            ));
        }
        if let Some(raw) = non_blank(e.location.as_deref()) {
            if Coordinate::parse(raw).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MalformedCoordinate,
                    format!("Executor '{}' has malformed location '{raw}'", e.id),
                ));
            }
        }
    }

    for (row, entry) in plan.iter().enumerate() {
        check_cell(&mut errors, row, "executors needed", entry.executors_needed.as_deref(), |c| {
            if entry.is_template() {
                parse_count_prefix(c).is_some()
            } else {
                parse_count(c).is_some()
            }
        });
        check_cell(&mut errors, row, "duration norm", entry.duration_norm.as_deref(), |c| {
            parse_number(c).is_some()
        });
        check_cell(&mut errors, row, "quantity", entry.quantity.as_deref(), |c| {
            parse_number(c).is_some()
        });

        if let Some(raw) = non_blank(entry.location.as_deref()) {
            if Coordinate::parse(raw).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MalformedCoordinate,
                    format!("Row {row} has malformed location '{raw}'"),
                ));
            }
        }
    }

    if !plan.is_empty() && !plan.iter().any(PlanEntry::is_in_progress) {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoActiveEntries,
            "Plan has no in-progress rows; nothing will be scheduled",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_cell(
    errors: &mut Vec<ValidationError>,
    row: usize,
    field: &str,
    cell: Option<&str>,
    parses: impl Fn(&str) -> bool,
) {
    if let Some(raw) = non_blank(cell) {
        if !parses(raw) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedNumber,
                format!("Row {row}: {field} '{raw}' is not a valid number"),
            ));
        }
    }
}
