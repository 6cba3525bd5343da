//! Per-kind configuration.

use serde::Deserialize;

use cw_core::RoadId;

use crate::{AgentError, AgentResult};

/// Movement capability shared by every agent of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementProfile {
    /// Distance covered per tick on an otherwise empty edge.
    pub speed_m_per_tick: f64,

    /// Slow-down per other agent on the same edge: the effective speed is
    /// `speed / (1 + traffic_sensitivity * others)`.  `0` ignores traffic.
    pub traffic_sensitivity: f64,
}

impl Default for MovementProfile {
    fn default() -> Self {
        Self {
            speed_m_per_tick: 50.0,
            traffic_sensitivity: 0.0,
        }
    }
}

impl MovementProfile {
    /// Metres walked this tick with `congestion` other agents on the edge.
    #[inline]
    pub fn effective_speed(&self, congestion: usize) -> f64 {
        self.speed_m_per_tick / (1.0 + self.traffic_sensitivity * congestion as f64)
    }
}

/// Static description of one agent kind.
///
/// Deserialized from the `[[population]]` tables of a scenario file:
///
/// ```toml
/// [[population]]
/// name  = "elderly"
/// goals = [60608, 17877, 78159, 82044]
/// profile = { speed_m_per_tick = 30.0, traffic_sensitivity = 0.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KindSpec {
    pub name: String,

    /// Candidate goal roads.  One is drawn uniformly per population record.
    pub goals: Vec<RoadId>,

    #[serde(default)]
    pub profile: MovementProfile,
}

impl KindSpec {
    pub fn new(name: impl Into<String>, goals: Vec<RoadId>) -> Self {
        Self {
            name: name.into(),
            goals,
            profile: MovementProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: MovementProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Check the goal set and the movement profile.
    pub fn validate(&self) -> AgentResult<()> {
        if self.goals.is_empty() {
            return Err(AgentError::EmptyGoalSet { kind: self.name.clone() });
        }
        let speed = self.profile.speed_m_per_tick;
        if !(speed.is_finite() && speed > 0.0) {
            return Err(AgentError::InvalidSpeed { kind: self.name.clone(), speed });
        }
        let value = self.profile.traffic_sensitivity;
        if !(value.is_finite() && value >= 0.0) {
            return Err(AgentError::InvalidSensitivity { kind: self.name.clone(), value });
        }
        Ok(())
    }
}
