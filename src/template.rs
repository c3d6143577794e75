//! Template defaults resolution.
//!
//! Active plan rows often leave planning parameters blank and rely on a
//! reference ("template") project for them. [`build_template_lookup`]
//! scans the full record set once, before scheduling, and collects the
//! first non-blank executors-needed and duration-norm cell per task name
//! and per operation name. Later rows never overwrite a recorded value.
//!
//! Resolution precedence for a row's parameter:
//! 1. The row's own cell, when non-blank (unparsable → 1).
//! 2. Template value for the operation name.
//! 3. Template value for the task name.
//! 4. 1.
//!
//! Headcounts follow two rules. A row's own cell is read strictly, and an
//! explicit `"0"` means the operation needs no staff. A template cell only
//! has to start with a number (`"2 чел"` → 2), and a template count of 0
//! or one without a leading number resolves to 1.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{non_blank, parse_count, parse_count_prefix, parse_number, PlanEntry};

/// Default parameters recorded for one name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDefaults {
    /// First non-blank executors-needed cell.
    pub executors_needed: Option<String>,
    /// First non-blank duration-norm cell.
    pub duration_norm: Option<String>,
}

impl TemplateDefaults {
    /// Records the given cells, keeping any value already present.
    fn record(&mut self, executors_needed: Option<&str>, duration_norm: Option<&str>) {
        if self.executors_needed.is_none() {
            self.executors_needed = executors_needed.map(str::to_string);
        }
        if self.duration_norm.is_none() {
            self.duration_norm = duration_norm.map(str::to_string);
        }
    }
}

/// Name-keyed template defaults for tasks and operations.
///
/// Built once per project and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLookup {
    tasks: BTreeMap<String, TemplateDefaults>,
    operations: BTreeMap<String, TemplateDefaults>,
}

impl TemplateLookup {
    /// Creates an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults recorded for a task name.
    pub fn task(&self, name: &str) -> Option<&TemplateDefaults> {
        self.tasks.get(name.trim())
    }

    /// Defaults recorded for an operation name.
    pub fn operation(&self, name: &str) -> Option<&TemplateDefaults> {
        self.operations.get(name.trim())
    }

    /// Number of task names with at least one default.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of operation names with at least one default.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.operations.is_empty()
    }

    /// Template cell for `entry`: operation name first, then task name.
    fn fallback<'a>(
        &'a self,
        entry: &PlanEntry,
        field: impl Fn(&'a TemplateDefaults) -> Option<&'a String>,
    ) -> Option<&'a str> {
        let by_operation = entry
            .operation_name()
            .and_then(|name| self.operations.get(name))
            .and_then(&field);
        let by_task = || {
            entry
                .task_name()
                .and_then(|name| self.tasks.get(name))
                .and_then(&field)
        };
        by_operation.or_else(by_task).map(String::as_str)
    }
}

/// Builds the template lookup from the full record set, in plan order.
///
/// Only template rows contribute; in-progress rows are skipped so their
/// partially filled cells never become defaults.
pub fn build_template_lookup(entries: &[PlanEntry]) -> TemplateLookup {
    let mut lookup = TemplateLookup::new();

    for entry in entries.iter().filter(|e| e.is_template()) {
        let executors = non_blank(entry.executors_needed.as_deref());
        let norm = non_blank(entry.duration_norm.as_deref());
        if executors.is_none() && norm.is_none() {
            continue;
        }

        if let Some(task) = entry.task_name() {
            lookup
                .tasks
                .entry(task.to_string())
                .or_default()
                .record(executors, norm);
        }
        if let Some(operation) = entry.operation_name() {
            lookup
                .operations
                .entry(operation.to_string())
                .or_default()
                .record(executors, norm);
        }
    }

    tracing::debug!(
        tasks = lookup.tasks.len(),
        operations = lookup.operations.len(),
        "built template lookup"
    );
    lookup
}

/// Resolves the executors-needed count for a row.
pub fn resolve_executors_needed(entry: &PlanEntry, lookup: &TemplateLookup) -> u32 {
    if let Some(cell) = non_blank(entry.executors_needed.as_deref()) {
        return parse_count(cell).unwrap_or(1);
    }
    lookup
        .fallback(entry, |d| d.executors_needed.as_ref())
        .and_then(parse_count_prefix)
        .filter(|n| *n > 0)
        .unwrap_or(1)
}

/// Resolves the duration norm (hours per unit) for a row.
pub fn resolve_duration_norm(entry: &PlanEntry, lookup: &TemplateLookup) -> f64 {
    if let Some(cell) = non_blank(entry.duration_norm.as_deref()) {
        return parse_number(cell).unwrap_or(1.0);
    }
    lookup
        .fallback(entry, |d| d.duration_norm.as_ref())
        .and_then(parse_number)
        .unwrap_or(1.0)
}
