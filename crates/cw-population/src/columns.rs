//! Which CSV columns hold the fields of a population record.

use std::fmt;

use csv::StringRecord;
use serde::Deserialize;

use crate::{PopulationLoadError, PopulationResult};

/// A column given by zero-based position or by header name.
///
/// In TOML an integer selects by position and a string by name:
///
/// ```toml
/// columns = { count = 39, home_tract = 11, work_tract = 40, road_id = "ROAD_ID" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Column {
    Index(usize),
    Name(String),
}

impl Column {
    fn resolve(&self, field: &'static str, headers: &StringRecord) -> PopulationResult<usize> {
        let found = match self {
            Column::Index(i) => (*i < headers.len()).then_some(*i),
            Column::Name(name) => headers.iter().position(|h| h == name),
        };
        found.ok_or_else(|| PopulationLoadError::MissingColumn {
            field,
            column: self.to_string(),
        })
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Index(i) => write!(f, "#{i}"),
            Column::Name(name) => write!(f, "{name:?}"),
        }
    }
}

impl From<usize> for Column {
    fn from(i: usize) -> Self {
        Column::Index(i)
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::Name(name.to_owned())
    }
}

/// Column mapping for the four fields the loader reads.
///
/// Defaults to header names `count`, `home_tract`, `work_tract`, `road_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecordColumns {
    pub count: Column,
    pub home_tract: Column,
    pub work_tract: Column,
    pub road_id: Column,
}

impl Default for RecordColumns {
    fn default() -> Self {
        Self {
            count: "count".into(),
            home_tract: "home_tract".into(),
            work_tract: "work_tract".into(),
            road_id: "road_id".into(),
        }
    }
}

impl RecordColumns {
    /// Positional layout of the census commuter tables: count in column 39,
    /// home tract in 11 (which doubles as the starting road id), work tract
    /// in 40.
    pub fn census() -> Self {
        Self {
            count: 39.into(),
            home_tract: 11.into(),
            work_tract: 40.into(),
            road_id: 11.into(),
        }
    }

    pub(crate) fn resolve(&self, headers: &StringRecord) -> PopulationResult<ResolvedColumns> {
        Ok(ResolvedColumns {
            count: self.count.resolve("count", headers)?,
            home_tract: self.home_tract.resolve("home_tract", headers)?,
            work_tract: self.work_tract.resolve("work_tract", headers)?,
            road_id: self.road_id.resolve("road_id", headers)?,
        })
    }
}

/// Column positions after matching against a header row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedColumns {
    pub count: usize,
    pub home_tract: usize,
    pub work_tract: usize,
    pub road_id: usize,
}
