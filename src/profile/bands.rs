//! Descriptor band tables
//!
//! Fixed lookup tables mapping authored categorical flow and wind
//! descriptors to numeric [min, max] bands. When several descriptors apply
//! to the same dimension, the merged range is the union of the matched
//! bands (min of mins, max of maxes).

use rustc_hash::FxHashMap;

/// A numeric [min, max] band for one descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

fn flow_bands() -> FxHashMap<&'static str, Band> {
    let mut bands = FxHashMap::default();
    for key in ["low", "slow", "trickle"] {
        bands.insert(key, Band { min: 60.0, max: 180.0 });
    }
    for key in ["medium", "moderate", "normal"] {
        bands.insert(key, Band { min: 150.0, max: 400.0 });
    }
    for key in ["high", "fast", "heavy"] {
        bands.insert(key, Band { min: 350.0, max: 900.0 });
    }
    for key in ["flood", "blown out", "runoff"] {
        bands.insert(key, Band { min: 800.0, max: 2000.0 });
    }
    bands
}

fn wind_bands() -> FxHashMap<&'static str, Band> {
    let mut bands = FxHashMap::default();
    for key in ["calm", "still"] {
        bands.insert(key, Band { min: 0.0, max: 3.0 });
    }
    bands.insert("light", Band { min: 2.0, max: 8.0 });
    for key in ["breezy", "moderate"] {
        bands.insert(key, Band { min: 7.0, max: 15.0 });
    }
    for key in ["windy", "strong", "gusty"] {
        bands.insert(key, Band { min: 14.0, max: 30.0 });
    }
    bands
}

/// Stream-flow band for a descriptor (cfs), `None` if unrecognized.
pub fn flow_band(descriptor: &str) -> Option<Band> {
    flow_bands().get(descriptor.trim().to_lowercase().as_str()).copied()
}

/// Wind-speed band for a descriptor (mph), `None` if unrecognized.
pub fn wind_band(descriptor: &str) -> Option<Band> {
    wind_bands().get(descriptor.trim().to_lowercase().as_str()).copied()
}

/// Union of bands: min of mins, max of maxes. `None` for an empty input.
pub fn merge_bands<I: IntoIterator<Item = Band>>(bands: I) -> Option<Band> {
    bands.into_iter().reduce(|acc, b| Band {
        min: acc.min.min(b.min),
        max: acc.max.max(b.max),
    })
}
