//! Plan entry (project row) model.
//!
//! A project plan is a flat, ordered list of rows. Each row names a task
//! and one of its operations, optionally pins it to a lane (an independent
//! work zone, "grip"), and carries the planning parameters as raw text
//! cells exactly as the backend delivers them.
//!
//! Rows are ordered by position in the plan; that order is the dependency
//! backbone used by the scheduler.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Status marker identifying an active (in-progress) project.
pub const IN_PROGRESS_MARKER: &str = "in progress";

/// The backend's native spelling of [`IN_PROGRESS_MARKER`].
pub const IN_PROGRESS_MARKER_NATIVE: &str = "В работе";

/// Classification of a plan row by its project status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Reference/blueprint row; only supplies default parameters.
    Template,
    /// Active row; materialized into a scheduled operation.
    InProgress,
}

impl ProjectStatus {
    /// Classifies a raw status cell. Anything other than the in-progress
    /// marker (including blank) is a template row.
    pub fn classify(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(IN_PROGRESS_MARKER) || raw == IN_PROGRESS_MARKER_NATIVE {
            Self::InProgress
        } else {
            Self::Template
        }
    }
}

/// One row of a project plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Project identifier.
    #[serde(default, alias = "ПроектID")]
    pub project_id: String,
    /// Raw project status (blank = template).
    #[serde(default, alias = "Статус проекта")]
    pub status: String,
    /// Task name.
    #[serde(default, alias = "Задача проекта")]
    pub task: String,
    /// Operation name.
    #[serde(default, alias = "Операция")]
    pub operation: String,
    /// Lane (work zone) identifier. Blank = sequential spine.
    #[serde(default, alias = "Захватка")]
    pub lane: Option<String>,
    /// Duration norm cell (hours per unit).
    #[serde(default, alias = "Норматив операции")]
    pub duration_norm: Option<String>,
    /// Quantity cell.
    #[serde(default, alias = "Кол-во")]
    pub quantity: Option<String>,
    /// Executors-needed cell.
    #[serde(default, alias = "Исполнителей")]
    pub executors_needed: Option<String>,
    /// Location cell (`"lat, lon"`).
    #[serde(default, alias = "Координаты")]
    pub location: Option<String>,
}

impl PlanEntry {
    /// Creates a row for the given project.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }

    /// Creates an in-progress row.
    pub fn in_progress(project_id: impl Into<String>) -> Self {
        Self::new(project_id).with_status(IN_PROGRESS_MARKER)
    }

    /// Sets the raw status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the task name.
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
        self
    }

    /// Sets the operation name.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = operation.into();
        self
    }

    /// Pins the row to a lane.
    pub fn with_lane(mut self, lane: impl Into<String>) -> Self {
        self.lane = Some(lane.into());
        self
    }

    /// Sets the duration norm cell.
    pub fn with_duration_norm(mut self, norm: impl Into<String>) -> Self {
        self.duration_norm = Some(norm.into());
        self
    }

    /// Sets the quantity cell.
    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    /// Sets the executors-needed cell.
    pub fn with_executors_needed(mut self, count: impl Into<String>) -> Self {
        self.executors_needed = Some(count.into());
        self
    }

    /// Sets the location cell.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Status classification of this row.
    pub fn project_status(&self) -> ProjectStatus {
        ProjectStatus::classify(&self.status)
    }

    /// Whether this row supplies template defaults.
    pub fn is_template(&self) -> bool {
        self.project_status() == ProjectStatus::Template
    }

    /// Whether this row is scheduled.
    pub fn is_in_progress(&self) -> bool {
        self.project_status() == ProjectStatus::InProgress
    }

    /// Trimmed task name, `None` when blank.
    pub fn task_name(&self) -> Option<&str> {
        non_blank(Some(self.task.as_str()))
    }

    /// Trimmed operation name, `None` when blank.
    pub fn operation_name(&self) -> Option<&str> {
        non_blank(Some(self.operation.as_str()))
    }

    /// Trimmed lane identifier, `None` for spine rows.
    pub fn lane_id(&self) -> Option<&str> {
        non_blank(self.lane.as_deref())
    }

    /// Parsed location. Malformed or missing → `None`.
    pub fn coordinate(&self) -> Option<Coordinate> {
        non_blank(self.location.as_deref()).and_then(Coordinate::parse)
    }
}

/// Trims a cell and returns it unless blank.
pub fn non_blank(cell: Option<&str>) -> Option<&str> {
    cell.map(str::trim).filter(|s| !s.is_empty())
}

/// Parses a headcount cell.
///
/// Accepts integers and finite decimals (truncated toward zero, so
/// `"2.00"` → 2). Negative or unparsable → `None`.
pub fn parse_count(cell: &str) -> Option<u32> {
    let cell = cell.trim();
    if let Ok(n) = cell.parse::<i64>() {
        return u32::try_from(n).ok();
    }
    let n: f64 = cell.parse().ok()?;
    if !n.is_finite() || n < 0.0 || n > f64::from(u32::MAX) {
        return None;
    }
    Some(n.trunc() as u32)
}

/// Parses the leading integer of a headcount cell, ignoring any trailing
/// text (`"2 чел"` → 2, `"3.5"` → 3). A leading `+` is accepted; a
/// negative or digit-less cell → `None`.
pub fn parse_count_prefix(cell: &str) -> Option<u32> {
    let cell = cell.trim_start();
    let cell = cell.strip_prefix('+').unwrap_or(cell);
    let end = cell
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(cell.len());
    cell[..end].parse().ok()
}

/// Parses a non-negative finite decimal cell.
pub fn parse_number(cell: &str) -> Option<f64> {
    let n: f64 = cell.trim().parse().ok()?;
    (n.is_finite() && n >= 0.0).then_some(n)
}
