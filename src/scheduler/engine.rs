//! Lane-aware timeline engine.
//!
//! # Algorithm
//!
//! Walks the plan in order. Template rows are skipped; every in-progress
//! row becomes one [`ScheduledOperation`]:
//!
//! 1. Resolve executors-needed and duration norm (row → operation template
//!    → task template → 1).
//! 2. `duration = norm × quantity / executors` hours (quantity absent or
//!    zero → 1; executors zero → no division).
//! 3. Pick the predecessor finish:
//!    - spine row (no lane): the backbone finish;
//!    - lane row, lane already open: that lane's last finish;
//!    - lane row, new lane: the backbone finish (the lane forks here).
//! 4. `start = predecessor finish`, `finish = start + duration`.
//! 5. Advance the lane (lane row) or the backbone (spine row). Lanes never
//!    rejoin the backbone.
//! 6. Staff the operation with the nearest executors.
//!
//! # Complexity
//! O(n · r log r) where n = plan rows, r = roster size.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::assignment::assign_nearest;
use crate::config::SchedulerConfig;
use crate::models::{non_blank, parse_number, Executor, PlanEntry, ScheduledOperation, Timeline};
use crate::template::{
    build_template_lookup, resolve_duration_norm, resolve_executors_needed, TemplateLookup,
};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Per-run completion state.
///
/// Owned by a single [`TimelineEngine::schedule`] call and dropped when it
/// returns.
#[derive(Debug, Clone)]
pub struct LaneState {
    lanes: HashMap<String, DateTime<Utc>>,
    backbone_finish: DateTime<Utc>,
}

impl LaneState {
    /// Creates state with the backbone positioned at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            lanes: HashMap::new(),
            backbone_finish: start,
        }
    }

    /// Finish of the last spine operation (or the start instant).
    pub fn backbone_finish(&self) -> DateTime<Utc> {
        self.backbone_finish
    }

    /// Finish of the last operation on `lane`, if the lane is open.
    pub fn lane_finish(&self, lane: &str) -> Option<DateTime<Utc>> {
        self.lanes.get(lane).copied()
    }

    /// Number of open lanes.
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// The instant an operation on `lane` (`None` = spine) may start.
    pub fn predecessor_finish(&self, lane: Option<&str>) -> DateTime<Utc> {
        lane.and_then(|l| self.lane_finish(l))
            .unwrap_or(self.backbone_finish)
    }

    /// Records an operation finishing at `finish`.
    pub fn advance(&mut self, lane: Option<&str>, finish: DateTime<Utc>) {
        match lane {
            Some(lane) => {
                self.lanes.insert(lane.to_string(), finish);
            }
            None => self.backbone_finish = finish,
        }
    }
}

/// Timeline engine bound to an executor roster.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use site_schedule::models::{Executor, PlanEntry};
/// use site_schedule::scheduler::TimelineEngine;
/// use site_schedule::template::build_template_lookup;
///
/// let plan = vec![
///     PlanEntry::new("T").with_operation("Сборка каркаса").with_executors_needed("2"),
///     PlanEntry::in_progress("P").with_operation("Сборка каркаса").with_lane("A"),
///     PlanEntry::in_progress("P").with_operation("Сборка каркаса").with_lane("B"),
/// ];
/// let roster = vec![Executor::new("1"), Executor::new("2")];
/// let t0 = Utc.with_ymd_and_hms(2025, 11, 20, 9, 0, 0).unwrap();
///
/// let lookup = build_template_lookup(&plan);
/// let timeline = TimelineEngine::new(&roster).schedule(&plan, t0, &lookup);
///
/// assert_eq!(timeline.len(), 2);
/// assert_eq!(timeline.operations()[0].start, timeline.operations()[1].start);
/// assert_eq!(timeline.operations()[0].executors_needed, 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimelineEngine<'r> {
    roster: &'r [Executor],
}

impl<'r> TimelineEngine<'r> {
    /// Creates an engine staffing from `roster`.
    pub fn new(roster: &'r [Executor]) -> Self {
        Self { roster }
    }

    /// Schedules every in-progress row of `plan` starting at `start`.
    pub fn schedule(
        &self,
        plan: &[PlanEntry],
        start: DateTime<Utc>,
        lookup: &TemplateLookup,
    ) -> Timeline {
        let mut timeline = Timeline::new();
        let mut state = LaneState::new(start);

        for (plan_index, entry) in plan.iter().enumerate() {
            if !entry.is_in_progress() {
                continue;
            }

            let executors_needed = resolve_executors_needed(entry, lookup);
            let lane = entry.lane_id();
            let op_start = state.predecessor_finish(lane);
            let (duration_ms, op_finish) =
                place(op_start, elapsed_ms(entry, lookup, executors_needed));
            state.advance(lane, op_finish);

            let assigned_executors: Vec<String> = if executors_needed > 0 {
                assign_nearest(
                    entry.coordinate().as_ref(),
                    self.roster,
                    executors_needed as usize,
                )
                .into_iter()
                .map(|e| e.id.clone())
                .collect()
            } else {
                Vec::new()
            };

            tracing::debug!(
                plan_index,
                operation = entry.operation.as_str(),
                lane = lane.unwrap_or(""),
                executors_needed,
                assigned = assigned_executors.len(),
                duration_ms,
                start = %op_start,
                "scheduled operation"
            );

            timeline.push(ScheduledOperation {
                plan_index,
                entry: entry.clone(),
                duration_ms,
                executors_needed,
                start: op_start,
                finish: op_finish,
                assigned_executors,
            });
        }

        tracing::info!(
            operations = timeline.len(),
            lanes = state.lane_count(),
            understaffed = timeline.understaffed().len(),
            "timeline scheduled"
        );
        timeline
    }
}

/// Schedules a plan against a roster using a prebuilt template lookup.
pub fn schedule(
    plan: &[PlanEntry],
    start: DateTime<Utc>,
    lookup: &TemplateLookup,
    roster: &[Executor],
) -> Timeline {
    TimelineEngine::new(roster).schedule(plan, start, lookup)
}

/// Builds the template lookup from `records` and schedules `records`.
///
/// Convenience for hosts holding one combined record set (template and
/// in-progress rows together).
pub fn schedule_records(
    records: &[PlanEntry],
    start: DateTime<Utc>,
    roster: &[Executor],
) -> Timeline {
    let lookup = build_template_lookup(records);
    schedule(records, start, &lookup, roster)
}

/// Schedules a combined record set from the configured start instant.
pub fn schedule_configured(
    records: &[PlanEntry],
    config: &SchedulerConfig,
    roster: &[Executor],
) -> Timeline {
    schedule_records(records, config.resolve_start(), roster)
}

/// Elapsed duration of a row in whole milliseconds.
fn elapsed_ms(entry: &PlanEntry, lookup: &TemplateLookup, executors_needed: u32) -> i64 {
    let norm = resolve_duration_norm(entry, lookup);
    let quantity = non_blank(entry.quantity.as_deref())
        .and_then(parse_number)
        .filter(|q| *q > 0.0)
        .unwrap_or(1.0);
    let crew = f64::from(executors_needed.max(1));

    let ms = (norm * quantity / crew * MS_PER_HOUR).round();
    if ms > 0.0 {
        // `as` saturates: huge and infinite products both become i64::MAX.
        ms as i64
    } else {
        0
    }
}

/// Places a duration after `start`, clamping the finish to the latest
/// representable instant. Returns the duration actually applied, so it
/// always equals `finish - start`.
fn place(start: DateTime<Utc>, duration_ms: i64) -> (i64, DateTime<Utc>) {
    match start.checked_add_signed(Duration::milliseconds(duration_ms)) {
        Some(finish) => (duration_ms, finish),
        None => {
            let finish = DateTime::<Utc>::MAX_UTC;
            ((finish - start).num_milliseconds(), finish)
        }
    }
}
