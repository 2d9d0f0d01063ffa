//! Lure condition profiles
//!
//! Canonical, persisted form of a lure's environmental preferences: optional
//! ideal ranges for a fixed set of numeric dimensions plus categorical
//! descriptor sets. Derived once per catalog update by the normalizer and
//! re-derivable at any time.

pub mod bands;
pub mod normalizer;

use serde::{Deserialize, Serialize};

/// The fixed numeric scoring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    AirTempC,
    WaterTempC,
    FlowCfs,
    WindMph,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::AirTempC,
        Dimension::WaterTempC,
        Dimension::FlowCfs,
        Dimension::WindMph,
    ];

    /// Default weight assigned by the normalizer when the authored record
    /// does not carry one. Water temperature dominates trout behavior;
    /// wind mostly affects castability.
    pub fn default_weight(&self) -> f64 {
        match self {
            Dimension::AirTempC => 0.20,
            Dimension::WaterTempC => 0.35,
            Dimension::FlowCfs => 0.30,
            Dimension::WindMph => 0.15,
        }
    }

    /// Distance from the ideal range at which the closeness term reaches 0.
    pub fn falloff_distance(&self) -> f64 {
        match self {
            Dimension::AirTempC => 12.0,  // °C
            Dimension::WaterTempC => 10.0, // °C
            Dimension::FlowCfs => 300.0,  // cfs
            Dimension::WindMph => 12.0,   // mph
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::AirTempC => "air temperature",
            Dimension::WaterTempC => "water temperature",
            Dimension::FlowCfs => "stream flow",
            Dimension::WindMph => "wind speed",
        }
    }
}

/// Ideal numeric range for one dimension, with its scoring weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub min: f64,
    pub max: f64,
    pub weight: f64,
}

impl DimensionRange {
    /// An authored range with min > max is malformed; the scorer drops it
    /// and surfaces a warning instead of failing the lure.
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Distance from `value` to the nearest range boundary, 0 inside.
    pub fn distance_to(&self, value: f64) -> f64 {
        if value < self.min {
            self.min - value
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        }
    }
}

/// Canonical condition profile for one lure.
///
/// A dimension absent from the profile means "no preference": it is excluded
/// from scoring entirely, never treated as failing. Presence is represented
/// with `Option`, not a numeric sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LureConditionProfile {
    pub lure_id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_temp_c: Option<DimensionRange>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_temp_c: Option<DimensionRange>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_cfs: Option<DimensionRange>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_mph: Option<DimensionRange>,

    /// Canonical (lowercased, sorted, deduplicated) descriptor sets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weather: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_of_day: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seasons: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub water_clarity: Vec<String>,
}

impl LureConditionProfile {
    pub fn dimension(&self, dim: Dimension) -> Option<&DimensionRange> {
        match dim {
            Dimension::AirTempC => self.air_temp_c.as_ref(),
            Dimension::WaterTempC => self.water_temp_c.as_ref(),
            Dimension::FlowCfs => self.flow_cfs.as_ref(),
            Dimension::WindMph => self.wind_mph.as_ref(),
        }
    }

    /// Number of numeric dimensions present on this profile.
    pub fn known_dimension_count(&self) -> usize {
        Dimension::ALL
            .iter()
            .filter(|d| self.dimension(**d).is_some())
            .count()
    }
}
