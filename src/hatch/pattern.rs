//! Hatch pattern types
//!
//! Static, authored records describing insect emergence events: when they
//! run, what water temperature they need, which rivers they apply to, and
//! which lure-name keywords they recommend. Immutable at runtime.

use serde::{Deserialize, Serialize};

use super::calendar::day_of_year;

/// Editorial ranking of how strongly an active hatch should influence
/// lure-choice scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportanceTier {
    Critical,
    Major,
    Moderate,
    Minor,
}

impl ImportanceTier {
    /// Sort rank, ascending (critical hatches sort first).
    pub fn rank(&self) -> u8 {
        match self {
            ImportanceTier::Critical => 0,
            ImportanceTier::Major => 1,
            ImportanceTier::Moderate => 2,
            ImportanceTier::Minor => 3,
        }
    }

    /// Base value contributed to a lure's hatch bonus on a keyword match.
    pub fn bonus_value(&self) -> f64 {
        match self {
            ImportanceTier::Critical => 0.25,
            ImportanceTier::Major => 0.15,
            ImportanceTier::Moderate => 0.10,
            ImportanceTier::Minor => 0.05,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ImportanceTier::Critical => "Critical",
            ImportanceTier::Major => "Major",
            ImportanceTier::Moderate => "Moderate",
            ImportanceTier::Minor => "Minor",
        }
    }
}

/// Mayfly-style life stages a pattern covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeStage {
    Nymph,
    Emerger,
    Dun,
    Spinner,
}

impl LifeStage {
    pub fn display_name(&self) -> &'static str {
        match self {
            LifeStage::Nymph => "Nymph",
            LifeStage::Emerger => "Emerger",
            LifeStage::Dun => "Dun",
            LifeStage::Spinner => "Spinner",
        }
    }
}

/// Parts of the day a hatch typically comes off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Midday,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn display_name(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Midday => "Midday",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

/// Emergence intensity derived from proximity to the pattern's peak date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HatchIntensity {
    Light,
    Moderate,
    Heavy,
}

impl HatchIntensity {
    /// Classify by circular distance (in days) from the peak date.
    pub fn from_peak_distance(days: u32) -> Self {
        if days <= 7 {
            HatchIntensity::Heavy
        } else if days <= 21 {
            HatchIntensity::Moderate
        } else {
            HatchIntensity::Light
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            HatchIntensity::Light => "Light",
            HatchIntensity::Moderate => "Moderate",
            HatchIntensity::Heavy => "Heavy",
        }
    }
}

/// Authored emergence window with start, peak, and end dates.
///
/// The window may be a normal forward interval or may wrap the year boundary
/// (e.g. Nov -> Mar). Membership tests handle both forms; callers never
/// special-case wrapping windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergenceWindow {
    pub start_month: u32,
    pub start_day: u32,
    pub peak_month: u32,
    pub peak_day: u32,
    pub end_month: u32,
    pub end_day: u32,
}

impl EmergenceWindow {
    pub fn start_ordinal(&self) -> u32 {
        day_of_year(self.start_month, self.start_day)
    }

    pub fn peak_ordinal(&self) -> u32 {
        day_of_year(self.peak_month, self.peak_day)
    }

    pub fn end_ordinal(&self) -> u32 {
        day_of_year(self.end_month, self.end_day)
    }

    /// Windows whose start ordinal exceeds their end ordinal wrap the year
    /// boundary; membership becomes a logical OR instead of AND.
    pub fn wraps_year(&self) -> bool {
        self.start_ordinal() > self.end_ordinal()
    }

    /// Date membership, inclusive on both ends.
    pub fn contains_ordinal(&self, ordinal: u32) -> bool {
        let start = self.start_ordinal();
        let end = self.end_ordinal();
        if start > end {
            ordinal >= start || ordinal <= end
        } else {
            ordinal >= start && ordinal <= end
        }
    }
}

/// A static hatch-pattern record in the calendar registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HatchPattern {
    /// Stable registry id (e.g. "BWO_SPRING").
    pub id: String,

    /// Display name (e.g. "Blue-Winged Olive").
    pub name: String,

    /// Scientific name, when authored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,

    /// Emergence window (start / peak / end).
    pub window: EmergenceWindow,

    /// Water-temperature activity range, °F (min, max).
    pub water_temp_range_f: (f64, f64),

    /// Times of day the emergence typically runs.
    pub times_of_day: Vec<TimeOfDay>,

    /// Applicable rivers; may contain the wildcard "All".
    pub rivers: Vec<String>,

    /// Lure-name keywords recommended during this hatch.
    pub lure_keywords: Vec<String>,

    /// Hook-size descriptor (e.g. "16-20").
    pub size_range: String,

    /// Editorial importance tier.
    pub importance: ImportanceTier,

    /// Life stages the pattern covers.
    pub life_stages: Vec<LifeStage>,

    /// Preferred water condition descriptors.
    #[serde(default)]
    pub water_conditions: Vec<String>,

    /// Preferred weather condition descriptors.
    #[serde(default)]
    pub weather_conditions: Vec<String>,
}

impl HatchPattern {
    /// True when the pattern's water-temperature range contains the reading.
    pub fn water_temp_ok(&self, water_temp_f: f64) -> bool {
        let (min, max) = self.water_temp_range_f;
        water_temp_f >= min && water_temp_f <= max
    }
}

/// Ephemeral per-query view of an active emergence, recomputed fresh on each
/// call and never persisted. One instance per (hatch, life stage).
#[derive(Debug, Clone)]
pub struct ActiveHatchInstance {
    pub insect: String,
    pub stage: LifeStage,
    pub size_range: String,
    pub intensity: HatchIntensity,
    pub times_of_day: Vec<TimeOfDay>,
    pub water_temp_range_f: (f64, f64),
}
