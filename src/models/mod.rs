//! Project scheduling domain models.
//!
//! Provides the record types a host supplies (plan rows, executor roster)
//! and the timeline the scheduler returns.
//!
//! # Domain Mappings
//!
//! | site-schedule | Construction site | Backend column |
//! |---------------|-------------------|----------------|
//! | PlanEntry | Task/operation row | Задача проекта / Операция |
//! | lane | Grip (work zone) | Захватка |
//! | Executor | Worker or crew | Исполнитель |
//! | Timeline | Project schedule | — |

mod coordinate;
mod executor;
mod plan;
mod timeline;

pub use coordinate::{
    distance_km, distance_or_infinite, parse_coordinate, Coordinate, EARTH_RADIUS_KM,
};
pub use executor::Executor;
pub use plan::{
    non_blank, parse_count, parse_count_prefix, parse_number, PlanEntry, ProjectStatus, IN_PROGRESS_MARKER,
    IN_PROGRESS_MARKER_NATIVE,
};
pub use timeline::{ScheduledOperation, Timeline};
