use serde::{Deserialize, Serialize};

/// Road-network stress configuration used to modulate synthetic samples.
///
/// A scenario is an immutable value object: user edits produce a whole new
/// `Scenario` rather than mutating one in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Per-direction traffic flow percentages (0-100).
    pub flow_north: f64,
    pub flow_east: f64,
    pub flow_south: f64,
    pub flow_west: f64,
    /// Incident configuration (e.g. a stalled vehicle or blocked lane).
    pub incident: Option<Incident>,
    /// Peak-hour configuration.
    pub peak_hour: Option<PeakHour>,
    /// Queue occupancy above this ratio counts as congested.
    pub congestion_threshold: f64,
}

/// An active incident somewhere in the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    /// Severity in [0, 1].
    pub severity: f64,
    /// Human-readable location label, e.g. "Intersection 12".
    pub location: String,
}

/// Peak-hour traffic surge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakHour {
    /// Intensity >= 1.0; 1.0 means no surge.
    pub intensity: f64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            flow_north: 0.0,
            flow_east: 0.0,
            flow_south: 0.0,
            flow_west: 0.0,
            incident: None,
            peak_hour: None,
            congestion_threshold: 0.8,
        }
    }
}

impl Scenario {
    /// Average of the four directional flow percentages.
    pub fn average_flow(&self) -> f64 {
        (self.flow_north + self.flow_east + self.flow_south + self.flow_west) / 4.0
    }

    /// Scalar stress multiplier combining directional flow, incident
    /// severity, and peak-hour intensity.
    ///
    /// The default scenario (all flows 0, no incident, no peak hour) yields
    /// exactly 1.0, leaving per-strategy baselines unchanged.
    pub fn stress_multiplier(&self) -> f64 {
        let mut stress = 1.0 + 0.5 * (self.average_flow() / 100.0);
        if let Some(incident) = &self.incident {
            stress += 0.3 * incident.severity.clamp(0.0, 1.0);
        }
        if let Some(peak) = &self.peak_hour {
            stress += 0.25 * (peak.intensity.max(1.0) - 1.0);
        }
        stress
    }
}
