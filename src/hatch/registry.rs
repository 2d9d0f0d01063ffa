//! Hatch calendar registry
//!
//! Fixed, in-memory set of hatch-pattern records. Loaded once at process
//! start (built-in set or a JSON file) and immutable thereafter. The
//! registry also precomputes a keyword-token -> pattern association table so
//! lure-to-hatch matching is deterministic and independently testable;
//! runtime substring comparison remains the fallback for unregistered names.

use std::path::Path;

use ahash::AHashMap;
use anyhow::{Context, Result};
use smallvec::SmallVec;
use tracing::{debug, info};

use super::pattern::{EmergenceWindow, HatchPattern, ImportanceTier, LifeStage, TimeOfDay};

/// Immutable hatch-pattern registry with a precomputed keyword index.
pub struct HatchRegistry {
    patterns: Vec<HatchPattern>,
    /// Lowercased keyword -> indices of patterns recommending it.
    keyword_index: AHashMap<String, SmallVec<[usize; 4]>>,
}

impl HatchRegistry {
    /// Build a registry from authored patterns, indexing their keywords.
    pub fn new(patterns: Vec<HatchPattern>) -> Self {
        let mut keyword_index: AHashMap<String, SmallVec<[usize; 4]>> = AHashMap::new();
        for (idx, pattern) in patterns.iter().enumerate() {
            for keyword in &pattern.lure_keywords {
                let token = keyword.trim().to_lowercase();
                if token.is_empty() {
                    continue;
                }
                let entries = keyword_index.entry(token).or_default();
                if !entries.contains(&idx) {
                    entries.push(idx);
                }
            }
        }
        debug!(
            patterns = patterns.len(),
            tokens = keyword_index.len(),
            "built hatch keyword index"
        );
        Self {
            patterns,
            keyword_index,
        }
    }

    /// Load authored patterns from a JSON array file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read hatch registry file: {:?}", path))?;
        let patterns: Vec<HatchPattern> =
            serde_json::from_str(&contents).context("Failed to parse hatch registry JSON")?;
        info!(patterns = patterns.len(), path = ?path, "loaded hatch registry");
        Ok(Self::new(patterns))
    }

    /// The built-in calendar shipped with the app.
    pub fn builtin() -> Self {
        Self::new(builtin_patterns())
    }

    pub fn patterns(&self) -> &[HatchPattern] {
        &self.patterns
    }

    pub fn get(&self, id: &str) -> Option<&HatchPattern> {
        self.patterns.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern indices whose keyword list contains `token` exactly
    /// (lowercased). Fast path for registered names; substring comparison
    /// covers everything else.
    pub(crate) fn token_hits(&self, token: &str) -> &[usize] {
        self.keyword_index
            .get(token)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

// ============================================================================
// Built-in calendar
// ============================================================================

fn window(sm: u32, sd: u32, pm: u32, pd: u32, em: u32, ed: u32) -> EmergenceWindow {
    EmergenceWindow {
        start_month: sm,
        start_day: sd,
        peak_month: pm,
        peak_day: pd,
        end_month: em,
        end_day: ed,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The authored emergence calendar. Editorial dates reflect typical
/// freestone/tailwater timing for the app's covered regions; tailwater
/// hatches (e.g. winter midges) carry tighter temperature bands.
fn builtin_patterns() -> Vec<HatchPattern> {
    use ImportanceTier::*;
    use LifeStage::*;
    use TimeOfDay::*;

    vec![
        // --------------------------------------------------------------------
        // Winter / early season
        // --------------------------------------------------------------------
        HatchPattern {
            id: "WINTER_MIDGE".to_string(),
            name: "Winter Midge".to_string(),
            scientific_name: Some("Chironomidae".to_string()),
            window: window(11, 1, 1, 15, 3, 1), // wraps the year boundary
            water_temp_range_f: (34.0, 46.0),
            times_of_day: vec![Midday, Afternoon],
            rivers: strings(&["All"]),
            lure_keywords: strings(&["midge", "zebra", "griffith", "black beauty", "brassie"]),
            size_range: "18-24".to_string(),
            importance: Moderate,
            life_stages: vec![Nymph, Emerger, Dun],
            water_conditions: strings(&["clear", "low"]),
            weather_conditions: strings(&["overcast", "snow", "calm"]),
        },
        HatchPattern {
            id: "SKWALA".to_string(),
            name: "Skwala Stonefly".to_string(),
            scientific_name: Some("Skwala americana".to_string()),
            window: window(2, 15, 3, 20, 4, 15),
            water_temp_range_f: (42.0, 52.0),
            times_of_day: vec![Midday, Afternoon],
            rivers: strings(&["Bitterroot", "Yakima", "Clark Fork"]),
            lure_keywords: strings(&["skwala", "stonefly", "stimulator"]),
            size_range: "8-12".to_string(),
            importance: Moderate,
            life_stages: vec![Nymph, Dun],
            water_conditions: strings(&["clear", "medium"]),
            weather_conditions: strings(&["sunny", "partly cloudy"]),
        },
        // --------------------------------------------------------------------
        // Spring
        // --------------------------------------------------------------------
        HatchPattern {
            id: "BWO_SPRING".to_string(),
            name: "Blue-Winged Olive".to_string(),
            scientific_name: Some("Baetis tricaudatus".to_string()),
            window: window(3, 1, 4, 15, 5, 31),
            water_temp_range_f: (45.0, 58.0),
            times_of_day: vec![Morning, Afternoon],
            rivers: strings(&["All"]),
            lure_keywords: strings(&["bwo", "blue wing", "baetis", "olive", "rs2"]),
            size_range: "16-20".to_string(),
            importance: Critical,
            life_stages: vec![Nymph, Emerger, Dun],
            water_conditions: strings(&["clear", "slightly stained"]),
            weather_conditions: strings(&["overcast", "drizzle", "cloudy"]),
        },
        HatchPattern {
            id: "BLUE_QUILL".to_string(),
            name: "Blue Quill".to_string(),
            scientific_name: Some("Paraleptophlebia adoptiva".to_string()),
            window: window(4, 1, 4, 20, 5, 20),
            water_temp_range_f: (46.0, 56.0),
            times_of_day: vec![Midday, Afternoon],
            rivers: strings(&["All"]),
            lure_keywords: strings(&["blue quill", "mahogany", "adams"]),
            size_range: "16-18".to_string(),
            importance: Minor,
            life_stages: vec![Nymph, Dun],
            water_conditions: strings(&["clear"]),
            weather_conditions: strings(&["overcast", "partly cloudy"]),
        },
        HatchPattern {
            id: "HENDRICKSON".to_string(),
            name: "Hendrickson".to_string(),
            scientific_name: Some("Ephemerella subvaria".to_string()),
            window: window(4, 1, 4, 25, 5, 15),
            water_temp_range_f: (50.0, 60.0),
            times_of_day: vec![Afternoon],
            rivers: strings(&["Delaware", "Beaverkill", "Au Sable", "Battenkill"]),
            lure_keywords: strings(&["hendrickson", "red quill", "dark hendrickson"]),
            size_range: "12-14".to_string(),
            importance: Major,
            life_stages: vec![Nymph, Emerger, Dun, Spinner],
            water_conditions: strings(&["clear", "medium"]),
            weather_conditions: strings(&["partly cloudy", "overcast"]),
        },
        HatchPattern {
            id: "CADDIS_GRANNOM".to_string(),
            name: "Grannom Caddis".to_string(),
            scientific_name: Some("Brachycentrus".to_string()),
            window: window(4, 15, 5, 10, 6, 15),
            water_temp_range_f: (50.0, 64.0),
            times_of_day: vec![Afternoon, Evening],
            rivers: strings(&["All"]),
            lure_keywords: strings(&["caddis", "elk hair", "grannom", "x-caddis", "sparkle pupa"]),
            size_range: "14-16".to_string(),
            importance: Major,
            life_stages: vec![Emerger, Dun],
            water_conditions: strings(&["clear", "medium", "slightly stained"]),
            weather_conditions: strings(&["sunny", "partly cloudy"]),
        },
        // --------------------------------------------------------------------
        // Early summer
        // --------------------------------------------------------------------
        HatchPattern {
            id: "SULPHUR".to_string(),
            name: "Sulphur Dun".to_string(),
            scientific_name: Some("Ephemerella invaria".to_string()),
            window: window(5, 10, 6, 5, 6, 30),
            water_temp_range_f: (55.0, 68.0),
            times_of_day: vec![Evening],
            rivers: strings(&["All"]),
            lure_keywords: strings(&["sulphur", "pale evening", "sparkle dun"]),
            size_range: "14-18".to_string(),
            importance: Major,
            life_stages: vec![Nymph, Emerger, Dun, Spinner],
            water_conditions: strings(&["clear"]),
            weather_conditions: strings(&["calm", "partly cloudy"]),
        },
        HatchPattern {
            id: "SALMONFLY".to_string(),
            name: "Salmonfly".to_string(),
            scientific_name: Some("Pteronarcys californica".to_string()),
            window: window(5, 15, 6, 10, 7, 5),
            water_temp_range_f: (52.0, 62.0),
            times_of_day: vec![Midday, Afternoon],
            rivers: strings(&["Madison", "Deschutes", "Big Hole", "Gunnison"]),
            lure_keywords: strings(&["salmonfly", "stonefly", "chubby", "pteronarcys"]),
            size_range: "4-8".to_string(),
            importance: Critical,
            life_stages: vec![Nymph, Dun],
            water_conditions: strings(&["medium", "high"]),
            weather_conditions: strings(&["sunny", "partly cloudy"]),
        },
        HatchPattern {
            id: "GREEN_DRAKE".to_string(),
            name: "Green Drake".to_string(),
            scientific_name: Some("Drunella grandis".to_string()),
            window: window(5, 25, 6, 15, 7, 10),
            water_temp_range_f: (56.0, 66.0),
            times_of_day: vec![Afternoon, Evening],
            rivers: strings(&["Henry's Fork", "Frying Pan", "Penns Creek"]),
            lure_keywords: strings(&["green drake", "drake", "wulff"]),
            size_range: "8-12".to_string(),
            importance: Major,
            life_stages: vec![Nymph, Emerger, Dun, Spinner],
            water_conditions: strings(&["clear", "medium"]),
            weather_conditions: strings(&["overcast", "drizzle"]),
        },
        HatchPattern {
            id: "PMD".to_string(),
            name: "Pale Morning Dun".to_string(),
            scientific_name: Some("Ephemerella excrucians".to_string()),
            window: window(6, 1, 7, 1, 8, 15),
            water_temp_range_f: (54.0, 66.0),
            times_of_day: vec![Morning, Midday],
            rivers: strings(&["Henry's Fork", "Madison", "Missouri", "Bighorn", "Green"]),
            lure_keywords: strings(&["pmd", "pale morning", "rusty spinner", "comparadun"]),
            size_range: "14-18".to_string(),
            importance: Critical,
            life_stages: vec![Nymph, Emerger, Dun, Spinner],
            water_conditions: strings(&["clear"]),
            weather_conditions: strings(&["sunny", "partly cloudy", "overcast"]),
        },
        HatchPattern {
            id: "GOLDEN_STONE".to_string(),
            name: "Golden Stonefly".to_string(),
            scientific_name: Some("Hesperoperla pacifica".to_string()),
            window: window(6, 1, 7, 1, 7, 31),
            water_temp_range_f: (55.0, 65.0),
            times_of_day: vec![Midday, Afternoon],
            rivers: strings(&["All"]),
            lure_keywords: strings(&["golden stone", "stonefly", "pat's rubber legs"]),
            size_range: "6-10".to_string(),
            importance: Major,
            life_stages: vec![Nymph, Dun],
            water_conditions: strings(&["medium", "high"]),
            weather_conditions: strings(&["sunny"]),
        },
        // --------------------------------------------------------------------
        // Late summer / fall
        // --------------------------------------------------------------------
        HatchPattern {
            id: "TRICO".to_string(),
            name: "Trico".to_string(),
            scientific_name: Some("Tricorythodes".to_string()),
            window: window(7, 1, 8, 15, 9, 30),
            water_temp_range_f: (58.0, 70.0),
            times_of_day: vec![Morning],
            rivers: strings(&["All"]),
            lure_keywords: strings(&["trico", "spinner", "cdc"]),
            size_range: "20-24".to_string(),
            importance: Moderate,
            life_stages: vec![Dun, Spinner],
            water_conditions: strings(&["clear", "low"]),
            weather_conditions: strings(&["calm", "sunny"]),
        },
        HatchPattern {
            id: "MAHOGANY_DUN".to_string(),
            name: "Mahogany Dun".to_string(),
            scientific_name: Some("Paraleptophlebia bicornuta".to_string()),
            window: window(9, 1, 9, 25, 10, 31),
            water_temp_range_f: (48.0, 58.0),
            times_of_day: vec![Midday, Afternoon],
            rivers: strings(&["All"]),
            lure_keywords: strings(&["mahogany", "pheasant tail"]),
            size_range: "14-16".to_string(),
            importance: Minor,
            life_stages: vec![Nymph, Dun],
            water_conditions: strings(&["clear", "low"]),
            weather_conditions: strings(&["overcast", "partly cloudy"]),
        },
        HatchPattern {
            id: "BWO_FALL".to_string(),
            name: "Fall Blue-Winged Olive".to_string(),
            scientific_name: Some("Baetis tricaudatus".to_string()),
            window: window(9, 15, 10, 15, 11, 15),
            water_temp_range_f: (44.0, 56.0),
            times_of_day: vec![Midday, Afternoon],
            rivers: strings(&["All"]),
            lure_keywords: strings(&["bwo", "baetis", "olive", "rs2"]),
            size_range: "18-22".to_string(),
            importance: Major,
            life_stages: vec![Nymph, Emerger, Dun],
            water_conditions: strings(&["clear", "low"]),
            weather_conditions: strings(&["overcast", "drizzle", "snow"]),
        },
        HatchPattern {
            id: "OCTOBER_CADDIS".to_string(),
            name: "October Caddis".to_string(),
            scientific_name: Some("Dicosmoecus".to_string()),
            window: window(9, 15, 10, 10, 11, 10),
            water_temp_range_f: (48.0, 58.0),
            times_of_day: vec![Afternoon, Evening],
            rivers: strings(&["Deschutes", "Rogue", "Yakima", "Clearwater"]),
            lure_keywords: strings(&["october caddis", "caddis", "orange stimulator"]),
            size_range: "8-10".to_string(),
            importance: Moderate,
            life_stages: vec![Emerger, Dun],
            water_conditions: strings(&["clear", "medium"]),
            weather_conditions: strings(&["overcast", "partly cloudy"]),
        },
    ]
}
