//! Recommendation scorer
//!
//! Combines live readings, normalized lure profiles, and active-hatch
//! bonuses into a ranked suggestion list. Scoring is pure per call and runs
//! in parallel across lures with Rayon; the registry and profile snapshots
//! are immutable.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::data::EnvReadings;
use crate::hatch::calendar::MonthDay;
use crate::hatch::evaluator::{
    active_hatches, active_instances, hatch_bonus, hatch_reasons, ActiveHatch,
};
use crate::hatch::pattern::ActiveHatchInstance;
use crate::hatch::registry::HatchRegistry;
use crate::profile::{Dimension, LureConditionProfile};
use crate::utils::units::fahrenheit_to_celsius;

/// Base score for lures with no known dimensions, so unprofiled lures are
/// not uniformly buried at the bottom.
pub const NEUTRAL_BASE_SCORE: f64 = 0.5;

/// Weight applied to each categorical descriptor match (weather, time of
/// day, season). Small relative to the numeric dimensions.
const CATEGORICAL_WEIGHT: f64 = 0.10;

/// One ranked lure suggestion.
#[derive(Debug, Clone)]
pub struct Suggestion {
    pub lure_id: String,
    pub lure_name: String,
    /// Final score in [0, 1]: weighted base fit plus hatch bonus, clamped.
    pub score: f64,
    pub reasons: Vec<String>,
    /// Data-quality warnings (e.g. a malformed profile range that was
    /// dropped). Never fails the lure.
    pub warnings: Vec<String>,
}

/// Base-fit result for one profile against one set of readings.
#[derive(Debug, Clone)]
pub struct BaseScore {
    pub score: f64,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
}

/// Closeness of a reading to an ideal range: 1.0 inside, decaying linearly
/// to 0 at `falloff` distance beyond either boundary.
fn closeness(distance: f64, falloff: f64) -> f64 {
    if distance <= 0.0 {
        1.0
    } else {
        (1.0 - distance / falloff).max(0.0)
    }
}

/// The live reading for a numeric dimension, converted to profile units.
fn reading_for(dim: Dimension, readings: &EnvReadings) -> Option<f64> {
    match dim {
        Dimension::AirTempC => readings.air_temperature_f.map(fahrenheit_to_celsius),
        Dimension::WaterTempC => readings.water_temperature_f.map(fahrenheit_to_celsius),
        Dimension::FlowCfs => readings.stream_flow_cfs,
        Dimension::WindMph => readings.wind_speed_mph,
    }
}

fn tag_matches(tags: &[String], value: &str) -> bool {
    let value = value.trim().to_lowercase();
    tags.iter()
        .any(|tag| value.contains(tag.as_str()) || tag.contains(&value))
}

/// Weighted base fit of one profile against the live readings.
///
/// Each dimension present on the profile contributes a closeness term times
/// its weight; the sum is normalized by the weight actually present, so
/// sparsely profiled lures are not penalized relative to fully profiled
/// ones. A missing reading silently disables its dimension; a malformed
/// range (min > max) is dropped with a warning. Zero known dimensions
/// default to the neutral constant.
pub fn base_score(profile: &LureConditionProfile, readings: &EnvReadings) -> BaseScore {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut reasons = Vec::new();
    let mut warnings = Vec::new();

    // Numeric dimensions
    for dim in Dimension::ALL {
        let Some(range) = profile.dimension(dim) else {
            continue;
        };
        if !range.is_valid() {
            let message = format!(
                "Ignoring malformed {} range ({} > {}) on \"{}\"",
                dim.label(),
                range.min,
                range.max,
                profile.name
            );
            warn!(lure = profile.lure_id.as_str(), "{}", message);
            warnings.push(message);
            continue;
        }
        let Some(value) = reading_for(dim, readings) else {
            continue; // MissingReading: dimension disabled, not an error
        };

        let distance = range.distance_to(value);
        let term = closeness(distance, dim.falloff_distance());
        weighted_sum += term * range.weight;
        weight_total += range.weight;

        if distance <= 0.0 {
            reasons.push(format!(
                "Current {} {:.1} is in this lure's ideal range {:.1}-{:.1}",
                dim.label(),
                value,
                range.min,
                range.max
            ));
        }
    }

    // Categorical descriptors: scored only when both the profile set and the
    // corresponding reading field are present
    let categorical: [(&[String], Option<&String>, &str); 3] = [
        (
            profile.weather.as_slice(),
            readings.weather_description.as_ref(),
            "weather",
        ),
        (
            profile.time_of_day.as_slice(),
            readings.time_of_day.as_ref(),
            "time of day",
        ),
        (profile.seasons.as_slice(), readings.season.as_ref(), "season"),
    ];
    for (tags, reading, label) in categorical {
        let Some(value) = reading else { continue };
        if tags.is_empty() {
            continue;
        }
        let matched = tag_matches(tags, value);
        if matched {
            weighted_sum += CATEGORICAL_WEIGHT;
            reasons.push(format!("Preferred {} conditions (\"{}\")", label, value));
        }
        weight_total += CATEGORICAL_WEIGHT;
    }

    let score = if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        NEUTRAL_BASE_SCORE
    };

    BaseScore {
        score,
        reasons,
        warnings,
    }
}

/// The engine facade: an immutable registry snapshot plus the scoring entry
/// points. Cheap to share behind an `Arc` across concurrent requests.
pub struct RecommendationEngine {
    registry: HatchRegistry,
}

impl RecommendationEngine {
    pub fn new(registry: HatchRegistry) -> Self {
        Self { registry }
    }

    /// Engine over the built-in hatch calendar.
    pub fn builtin() -> Self {
        Self::new(HatchRegistry::builtin())
    }

    pub fn registry(&self) -> &HatchRegistry {
        &self.registry
    }

    /// Active hatches for a query, ordered for display. Usable standalone
    /// for a "what's hatching now" view.
    pub fn active_hatches(
        &self,
        date: MonthDay,
        water_temp_f: Option<f64>,
        location_label: Option<&str>,
    ) -> Vec<ActiveHatch<'_>> {
        active_hatches(&self.registry, date, water_temp_f, location_label)
    }

    /// Per-stage emergence instances with intensity tiers.
    pub fn whats_hatching(
        &self,
        date: MonthDay,
        water_temp_f: Option<f64>,
        location_label: Option<&str>,
    ) -> Vec<ActiveHatchInstance> {
        active_instances(&self.registry, date, water_temp_f, location_label)
    }

    /// Rank the whole catalog against the live readings and active hatches.
    ///
    /// Final score per lure is `clamp(base + hatch_bonus, 0, 1)`. Ranking is
    /// descending by score, ties broken by lexical lure name for
    /// determinism. An empty catalog yields an empty list.
    pub fn get_suggestions(
        &self,
        readings: &EnvReadings,
        date: MonthDay,
        location_label: Option<&str>,
        catalog: &[LureConditionProfile],
    ) -> Vec<Suggestion> {
        let active = self.active_hatches(date, readings.water_temperature_f, location_label);
        debug!(
            active_hatches = active.len(),
            lures = catalog.len(),
            "scoring catalog"
        );

        let mut suggestions: Vec<Suggestion> = catalog
            .par_iter()
            .map(|profile| self.score_lure(profile, readings, &active))
            .collect();

        suggestions.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.lure_name.cmp(&b.lure_name))
        });
        suggestions
    }

    fn score_lure(
        &self,
        profile: &LureConditionProfile,
        readings: &EnvReadings,
        active: &[ActiveHatch],
    ) -> Suggestion {
        let base = base_score(profile, readings);
        let bonus = hatch_bonus(&self.registry, &profile.name, active);

        let mut reasons = base.reasons;
        reasons.extend(hatch_reasons(&profile.name, active));

        Suggestion {
            lure_id: profile.lure_id.clone(),
            lure_name: profile.name.clone(),
            score: (base.score + bonus).clamp(0.0, 1.0),
            reasons,
            warnings: base.warnings,
        }
    }
}
