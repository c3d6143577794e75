//! Executor model.
//!
//! Executors are the people or crews that staff operations. Each carries
//! a raw location string from the roster; a blank or malformed location
//! simply means the executor ranks last by distance.

use serde::{Deserialize, Serialize};

use super::plan::non_blank;
use super::Coordinate;

/// A roster member that can be assigned to operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Executor {
    /// Unique executor identifier.
    #[serde(alias = "ИсполнительID")]
    pub id: String,
    /// Display name.
    #[serde(default, alias = "Исполнитель")]
    pub name: String,
    /// Raw location (`"lat, lon"`).
    #[serde(default, alias = "Координаты")]
    pub location: Option<String>,
}

impl Executor {
    /// Creates an executor with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the raw location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Parsed location. Empty or malformed → `None`.
    pub fn coordinate(&self) -> Option<Coordinate> {
        non_blank(self.location.as_deref()).and_then(Coordinate::parse)
    }

    /// Whether the executor has a usable location.
    pub fn is_located(&self) -> bool {
        self.coordinate().is_some()
    }
}
