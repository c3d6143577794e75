//! Timeline engine and KPI evaluation.
//!
//! # Algorithm
//!
//! `TimelineEngine` makes a single ordered pass over the plan. Rows without
//! a lane form a sequential spine; each lane forks from the spine position
//! at its first row and then runs sequentially on its own. Operations are
//! staffed with the geographically nearest executors.
//!
//! # KPI
//!
//! `TimelineKpi` summarizes makespan, labour, staffing and lane usage.

mod engine;
mod kpi;

pub use engine::{schedule, schedule_configured, schedule_records, LaneState, TimelineEngine};
pub use kpi::{project_duration_days, TimelineKpi};
