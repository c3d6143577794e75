//! Timeline (solution) model.
//!
//! A timeline is the scheduler's output: one [`ScheduledOperation`] per
//! in-progress plan row, in plan order, each with resolved parameters,
//! concrete start/finish instants and the executors assigned to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlanEntry;

/// A scheduled operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledOperation {
    /// Position of the source row in the plan.
    pub plan_index: usize,
    /// Source plan row.
    pub entry: PlanEntry,
    /// Resolved elapsed duration (ms).
    pub duration_ms: i64,
    /// Resolved executors-needed.
    pub executors_needed: u32,
    /// Start instant.
    pub start: DateTime<Utc>,
    /// Finish instant.
    pub finish: DateTime<Utc>,
    /// Assigned executor IDs, nearest first. May be shorter than
    /// `executors_needed` when the roster runs out.
    pub assigned_executors: Vec<String>,
}

impl ScheduledOperation {
    /// Lane of the source row, `None` for spine operations.
    pub fn lane(&self) -> Option<&str> {
        self.entry.lane_id()
    }

    /// Whether fewer executors were assigned than needed.
    pub fn is_understaffed(&self) -> bool {
        self.assigned_executors.len() < self.executors_needed as usize
    }

    /// Executors still missing.
    pub fn staffing_gap(&self) -> u32 {
        (self.executors_needed as usize).saturating_sub(self.assigned_executors.len()) as u32
    }
}

/// Ordered sequence of scheduled operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    operations: Vec<ScheduledOperation>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, op: ScheduledOperation) {
        self.operations.push(op);
    }

    /// Operations in plan order.
    pub fn operations(&self) -> &[ScheduledOperation] {
        &self.operations
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the timeline has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledOperation> {
        self.operations.iter()
    }

    /// Latest finish across all operations.
    pub fn makespan_finish(&self) -> Option<DateTime<Utc>> {
        self.operations.iter().map(|op| op.finish).max()
    }

    /// Finish of the last operation scheduled on `lane`.
    pub fn lane_finish(&self, lane: &str) -> Option<DateTime<Utc>> {
        self.operations
            .iter()
            .rev()
            .find(|op| op.lane() == Some(lane))
            .map(|op| op.finish)
    }

    /// Latest finish of a named operation on a lane (`None` lane = spine).
    ///
    /// The same operation usually runs once per lane, each with its own
    /// completion time.
    pub fn operation_finish(&self, lane: Option<&str>, operation: &str) -> Option<DateTime<Utc>> {
        self.operations
            .iter()
            .filter(|op| op.lane() == lane && op.entry.operation_name() == Some(operation))
            .map(|op| op.finish)
            .max()
    }

    /// Distinct lane identifiers in order of first appearance.
    pub fn lanes(&self) -> Vec<&str> {
        let mut lanes: Vec<&str> = Vec::new();
        for lane in self.operations.iter().filter_map(ScheduledOperation::lane) {
            if !lanes.contains(&lane) {
                lanes.push(lane);
            }
        }
        lanes
    }

    /// Operations on a lane (`None` = spine), in plan order.
    pub fn operations_on_lane(&self, lane: Option<&str>) -> Vec<&ScheduledOperation> {
        self.operations.iter().filter(|op| op.lane() == lane).collect()
    }

    /// Operations staffed below their resolved need.
    pub fn understaffed(&self) -> Vec<&ScheduledOperation> {
        self.operations.iter().filter(|op| op.is_understaffed()).collect()
    }

    /// Operations an executor is assigned to.
    pub fn assignments_for_executor(&self, executor_id: &str) -> Vec<&ScheduledOperation> {
        self.operations
            .iter()
            .filter(|op| op.assigned_executors.iter().any(|id| id == executor_id))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a ScheduledOperation;
    type IntoIter = std::slice::Iter<'a, ScheduledOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}
