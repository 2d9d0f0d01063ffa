//! Live readings and lure catalog data
//!
//! Wire types for the engine's external collaborators: the environmental
//! reading supplier and the lure catalog store. JSON field names follow the
//! mobile app's camelCase documents.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::profile::LureConditionProfile;

/// Live environmental readings for one query. Every field is optional:
/// a missing field simply disables the corresponding scoring dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvReadings {
    pub air_temperature_f: Option<f64>,
    pub water_temperature_f: Option<f64>,
    pub stream_flow_cfs: Option<f64>,
    pub wind_speed_mph: Option<f64>,
    pub weather_description: Option<String>,
    pub time_of_day: Option<String>,
    pub season: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Raw authored lure record as stored in the catalog: loosely structured
/// categorical descriptors and optional °F temperature ranges. The
/// normalizer converts these into canonical [`LureConditionProfile`]s.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLureRecord {
    pub lure_id: String,
    pub name: String,

    /// Authored air-temperature range, °F (min, max).
    pub air_temp_range_f: Option<(f64, f64)>,

    /// Authored water-temperature range, °F (min, max).
    pub water_temp_range_f: Option<(f64, f64)>,

    /// Flow descriptors (e.g. "slow", "high"); mapped through band tables.
    pub flow: Vec<String>,

    /// Wind descriptors (e.g. "calm", "breezy").
    pub wind: Vec<String>,

    pub weather: Vec<String>,
    pub time_of_day: Vec<String>,
    pub seasons: Vec<String>,
    pub water_clarity: Vec<String>,
}

/// Load raw authored lure records from a JSON array file.
pub fn load_raw_catalog(path: &Path) -> Result<Vec<RawLureRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read lure catalog file: {:?}", path))?;
    let records: Vec<RawLureRecord> =
        serde_json::from_str(&contents).context("Failed to parse lure catalog JSON")?;
    info!(lures = records.len(), path = ?path, "loaded raw lure catalog");
    Ok(records)
}

/// Load previously normalized profiles from a JSON array file.
pub fn load_profiles(path: &Path) -> Result<Vec<LureConditionProfile>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile file: {:?}", path))?;
    let profiles: Vec<LureConditionProfile> =
        serde_json::from_str(&contents).context("Failed to parse profile JSON")?;
    info!(profiles = profiles.len(), path = ?path, "loaded lure profiles");
    Ok(profiles)
}

/// Persist normalized profiles as a new generation. The storage layer swaps
/// generations atomically; scoring only ever reads a complete snapshot.
pub fn save_profiles(path: &Path, profiles: &[LureConditionProfile]) -> Result<()> {
    let json = serde_json::to_string_pretty(profiles).context("Failed to serialize profiles")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write profile file: {:?}", path))?;
    info!(profiles = profiles.len(), path = ?path, "saved lure profiles");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_deserialize_with_missing_fields() {
        let readings: EnvReadings =
            serde_json::from_str(r#"{"waterTemperatureF": 50.0, "timeOfDay": "morning"}"#)
                .unwrap();
        assert_eq!(readings.water_temperature_f, Some(50.0));
        assert_eq!(readings.time_of_day.as_deref(), Some("morning"));
        assert!(readings.air_temperature_f.is_none());
        assert!(readings.stream_flow_cfs.is_none());
    }

    #[test]
    fn test_raw_record_defaults() {
        let record: RawLureRecord =
            serde_json::from_str(r#"{"lureId": "l1", "name": "Parachute Adams"}"#).unwrap();
        assert_eq!(record.lure_id, "l1");
        assert!(record.water_temp_range_f.is_none());
        assert!(record.flow.is_empty());
    }
}
