//! Timeline quality metrics (KPIs).
//!
//! Summarizes a scheduled timeline for planners.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest finish − start instant |
//! | Labour hours | Σ duration × assigned executors |
//! | Staffing rate | Σ assigned / Σ needed |
//! | Understaffed | Operations with assigned < needed |
//! | Lanes | Distinct work zones in use |
//! | Duration (days) | Start to latest finish, rounded up |

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::models::Timeline;

const MS_PER_DAY: i64 = 86_400_000;

/// Timeline performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineKpi {
    /// Scheduled operations.
    pub operation_count: usize,
    /// Latest finish minus the start instant (ms).
    pub makespan_ms: i64,
    /// Whole project days from start to latest finish.
    pub duration_days: Option<i64>,
    /// Executor-hours booked.
    pub labour_hours: f64,
    /// Assigned / needed headcount (1.0 when nothing was needed).
    pub staffing_rate: f64,
    /// Operations with fewer executors than needed.
    pub understaffed_count: usize,
    /// Distinct lanes.
    pub lane_count: usize,
    /// Operations per executor.
    pub operations_by_executor: BTreeMap<String, usize>,
}

impl TimelineKpi {
    /// Computes KPIs for a timeline scheduled from `start`.
    pub fn calculate(timeline: &Timeline, start: DateTime<Utc>) -> Self {
        let finish = timeline.makespan_finish().unwrap_or(start);
        let makespan_ms = (finish - start).num_milliseconds().max(0);

        let mut labour_hours = 0.0;
        let mut needed: u64 = 0;
        let mut assigned: u64 = 0;
        let mut operations_by_executor: BTreeMap<String, usize> = BTreeMap::new();

        for op in timeline {
            let crew = op.assigned_executors.len();
            labour_hours += op.duration_ms as f64 / 3_600_000.0 * crew as f64;
            needed += u64::from(op.executors_needed);
            assigned += crew as u64;
            for id in &op.assigned_executors {
                *operations_by_executor.entry(id.clone()).or_insert(0) += 1;
            }
        }

        let staffing_rate = if needed == 0 {
            1.0
        } else {
            assigned as f64 / needed as f64
        };

        Self {
            operation_count: timeline.len(),
            makespan_ms,
            duration_days: project_duration_days(start, finish),
            labour_hours,
            staffing_rate,
            understaffed_count: timeline.understaffed().len(),
            lane_count: timeline.lanes().len(),
            operations_by_executor,
        }
    }

    /// Whether every operation is fully staffed.
    pub fn fully_staffed(&self) -> bool {
        self.understaffed_count == 0
    }

    /// Executor with the most operations (ties → smallest ID).
    pub fn busiest_executor(&self) -> Option<(&str, usize)> {
        self.operations_by_executor
            .iter()
            .fold(None, |best: Option<(&str, usize)>, (id, &n)| match best {
                Some((_, m)) if m >= n => best,
                _ => Some((id.as_str(), n)),
            })
    }
}

/// Whole days from `start` to `finish`, rounded up.
///
/// `None` when `finish` precedes `start`.
pub fn project_duration_days(start: DateTime<Utc>, finish: DateTime<Utc>) -> Option<i64> {
    let ms = (finish - start).num_milliseconds();
    if ms < 0 {
        return None;
    }
    Some((ms + MS_PER_DAY - 1) / MS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Executor, PlanEntry};
    use crate::scheduler::schedule_records;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    fn sample() -> Timeline {
        let plan = vec![
            PlanEntry::in_progress("P")
                .with_operation("O1")
                .with_duration_norm("4")
                .with_executors_needed("2"),
            PlanEntry::in_progress("P")
                .with_operation("O2")
                .with_lane("A")
                .with_duration_norm("10")
                .with_executors_needed("3"),
            PlanEntry::in_progress("P")
                .with_operation("O3")
                .with_lane("B")
                .with_duration_norm("1")
                .with_executors_needed("0"),
        ];
        let roster = vec![Executor::new("1"), Executor::new("2")];
        schedule_records(&plan, t0(), &roster)
    }

    #[test]
    fn test_kpi_calculate() {
        let kpi = TimelineKpi::calculate(&sample(), t0());

        assert_eq!(kpi.operation_count, 3);
        // O1: 4h/2 = 2h; O2 forks at 2h, 10h/3 ≈ 3.333h → ends ≈ 5.333h
        assert_eq!(kpi.makespan_ms, 2 * 3_600_000 + 12_000_000);
        assert_eq!(kpi.duration_days, Some(1));
        assert_eq!(kpi.lane_count, 2);
        assert_eq!(kpi.understaffed_count, 1);
        assert!(!kpi.fully_staffed());
        // needed 2 + 3 + 0, assigned 2 + 2 + 0
        assert!((kpi.staffing_rate - 0.8).abs() < 1e-10);
        // 2h × 2 + 3.333h × 2
        assert!((kpi.labour_hours - (4.0 + 20.0 / 3.0)).abs() < 1e-6);
        assert_eq!(kpi.operations_by_executor["1"], 2);
        assert_eq!(kpi.busiest_executor(), Some(("1", 2)));
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = TimelineKpi::calculate(&Timeline::new(), t0());
        assert_eq!(kpi.operation_count, 0);
        assert_eq!(kpi.makespan_ms, 0);
        assert_eq!(kpi.duration_days, Some(0));
        assert_eq!(kpi.staffing_rate, 1.0);
        assert!(kpi.fully_staffed());
        assert_eq!(kpi.busiest_executor(), None);
    }

    #[test]
    fn test_project_duration_days() {
        let start = t0();
        assert_eq!(project_duration_days(start, start + Duration::days(10)), Some(10));
        assert_eq!(project_duration_days(start, start), Some(0));
        assert_eq!(project_duration_days(start, start + Duration::hours(1)), Some(1));
        assert_eq!(project_duration_days(start, start + Duration::days(31)), Some(31));
        assert_eq!(project_duration_days(start, start - Duration::days(1)), None);
    }
}
