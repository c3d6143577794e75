//! Project-operation scheduling for construction plans.
//!
//! Turns a flat, ordered project plan into a concrete timeline: resolves
//! missing planning parameters from a reference (template) project,
//! computes start/finish instants with parallel work-zone lanes, and staffs
//! each operation with the nearest executors.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `PlanEntry`, `Executor`, `Coordinate`,
//!   `Timeline`, `ScheduledOperation`
//! - **`template`**: Template defaults lookup and parameter resolution
//! - **`assignment`**: Distance-ranked executor selection
//! - **`scheduler`**: `TimelineEngine`, `LaneState`, `TimelineKpi`
//! - **`config`**: `SchedulerConfig` (start instant)
//! - **`validation`**: Advisory input checks
//!
//! # Example
//!
//! ```
//! use site_schedule::config::SchedulerConfig;
//! use site_schedule::models::{Executor, PlanEntry};
//! use site_schedule::scheduler::schedule_configured;
//!
//! let records = vec![
//!     PlanEntry::new("2326").with_operation("Разгрузка").with_duration_norm("12"),
//!     PlanEntry::in_progress("2614").with_operation("Разгрузка").with_quantity("2"),
//! ];
//! let roster = vec![Executor::new("1").with_location("55.75, 37.62")];
//! let config = SchedulerConfig::from_toml_str(r#"start_instant = "2025-11-20T09:00:00Z""#)?;
//!
//! let timeline = schedule_configured(&records, &config, &roster);
//! let op = &timeline.operations()[0];
//! assert_eq!(op.duration_ms, 24 * 3_600_000);
//! assert_eq!(op.assigned_executors, vec!["1"]);
//! # Ok::<(), site_schedule::error::ScheduleError>(())
//! ```

pub mod assignment;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod template;
pub mod validation;
