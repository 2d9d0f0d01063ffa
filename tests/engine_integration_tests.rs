//! Engine Integration Tests
//!
//! Exercises the full pipeline from authored lure records through
//! normalization and hatch evaluation to ranked suggestions, using the
//! built-in hatch calendar.

use approx::assert_relative_eq;
use hatch_scorer_rust::{
    hatch_bonus, is_active, is_peak, normalize_catalog, renormalize, EnvReadings, MonthDay,
    RawLureRecord, RecommendationEngine,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn date(month: u32, day: u32) -> MonthDay {
    MonthDay::new(month, day).unwrap()
}

/// A small authored catalog resembling the app's lure documents.
fn sample_catalog() -> Vec<RawLureRecord> {
    vec![
        RawLureRecord {
            lure_id: "bwo-emerger-18".to_string(),
            name: "BWO Emerger".to_string(),
            air_temp_range_f: Some((40.0, 65.0)),
            water_temp_range_f: Some((42.0, 58.0)),
            flow: strings(&["slow", "medium"]),
            wind: strings(&["calm", "light"]),
            weather: strings(&["overcast", "drizzle"]),
            time_of_day: strings(&["morning", "afternoon"]),
            seasons: strings(&["spring", "fall"]),
            water_clarity: strings(&["clear"]),
        },
        RawLureRecord {
            lure_id: "elk-hair-caddis-14".to_string(),
            name: "Elk Hair Caddis".to_string(),
            air_temp_range_f: Some((55.0, 85.0)),
            water_temp_range_f: Some((50.0, 68.0)),
            flow: strings(&["medium"]),
            wind: strings(&["calm", "breezy"]),
            weather: strings(&["sunny", "partly cloudy"]),
            time_of_day: strings(&["afternoon", "evening"]),
            seasons: strings(&["spring", "summer"]),
            water_clarity: strings(&["clear", "slightly stained"]),
        },
        RawLureRecord {
            lure_id: "wooly-bugger-8".to_string(),
            name: "Wooly Bugger".to_string(),
            water_temp_range_f: Some((38.0, 70.0)),
            flow: strings(&["high", "flood"]),
            water_clarity: strings(&["stained", "muddy"]),
            ..Default::default()
        },
        // Unprofiled lure: no authored condition data at all
        RawLureRecord {
            lure_id: "royal-wulff-12".to_string(),
            name: "Royal Wulff".to_string(),
            ..Default::default()
        },
    ]
}

#[test]
fn test_spring_bwo_day_end_to_end() {
    let engine = RecommendationEngine::builtin();
    let catalog = normalize_catalog(&sample_catalog());

    let readings = EnvReadings {
        air_temperature_f: Some(52.0),
        water_temperature_f: Some(50.0),
        stream_flow_cfs: Some(160.0),
        wind_speed_mph: Some(4.0),
        weather_description: Some("Overcast".to_string()),
        time_of_day: Some("morning".to_string()),
        season: Some("spring".to_string()),
        ..Default::default()
    };

    let suggestions = engine.get_suggestions(&readings, date(4, 20), None, &catalog);
    assert_eq!(suggestions.len(), catalog.len());

    // An overcast spring morning at 50 °F is a textbook Baetis day: the BWO
    // pattern must win, carried by both base fit and the critical-tier bonus
    assert_eq!(suggestions[0].lure_name, "BWO Emerger");
    assert!(suggestions[0].score > suggestions[1].score);
    assert!(suggestions[0]
        .reasons
        .iter()
        .any(|r| r.contains("Blue-Winged Olive") && r.contains("peak")));

    // Scores are valid and ranking is monotone
    for window in suggestions.windows(2) {
        assert!(window[0].score >= window[1].score);
    }
    for s in &suggestions {
        assert!((0.0..=1.0).contains(&s.score));
        assert!(s.warnings.is_empty());
    }
}

#[test]
fn test_whats_hatching_view() {
    let engine = RecommendationEngine::builtin();
    let instances = engine.whats_hatching(date(4, 15), Some(50.0), Some("Beaverkill"));

    assert!(!instances.is_empty());
    // BWO peaks Apr 15: heavy-intensity instances lead the view
    assert_eq!(instances[0].insect, "Blue-Winged Olive");
    assert_eq!(
        instances[0].intensity,
        hatch_scorer_rust::HatchIntensity::Heavy
    );
}

#[test]
fn test_wrapping_winter_window_through_public_api() {
    let engine = RecommendationEngine::builtin();
    let midge = engine.registry().get("WINTER_MIDGE").unwrap();

    assert!(is_active(date(12, 10), None, midge));
    assert!(!is_active(date(7, 1), None, midge));

    // Peak Jan 15: a Dec 10 query is active but well short of peak
    assert!(!is_peak(date(12, 10), midge));
    assert!(is_peak(date(1, 20), midge));

    // Mid-January midge fishing: only the winter pattern is on
    let active = engine.active_hatches(date(1, 15), Some(40.0), None);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].pattern.id, "WINTER_MIDGE");
    assert!(active[0].peak);

    let bonus = hatch_bonus(engine.registry(), "Zebra Midge", &active);
    assert_relative_eq!(bonus, 0.10); // moderate tier
}

#[test]
fn test_normalization_idempotent_across_persistence_round_trip() {
    let profiles = normalize_catalog(&sample_catalog());

    // Persist, reload, renormalize: bytes must not change
    let persisted = serde_json::to_string(&profiles).unwrap();
    let reloaded: Vec<hatch_scorer_rust::LureConditionProfile> =
        serde_json::from_str(&persisted).unwrap();
    let renormalized: Vec<_> = reloaded.iter().map(renormalize).collect();

    assert_eq!(
        serde_json::to_vec(&profiles).unwrap(),
        serde_json::to_vec(&renormalized).unwrap()
    );
}

#[test]
fn test_empty_catalog_yields_empty_suggestions() {
    let engine = RecommendationEngine::builtin();
    let readings = EnvReadings {
        water_temperature_f: Some(50.0),
        ..Default::default()
    };
    let suggestions = engine.get_suggestions(&readings, date(4, 20), None, &[]);
    assert!(suggestions.is_empty());
}

#[test]
fn test_missing_readings_still_rank_catalog() {
    let engine = RecommendationEngine::builtin();
    let catalog = normalize_catalog(&sample_catalog());

    // No readings at all: every numeric dimension is disabled, profiled and
    // unprofiled lures alike fall back toward neutral and date-only hatch
    // bonuses still apply
    let suggestions =
        engine.get_suggestions(&EnvReadings::default(), date(4, 20), None, &catalog);
    assert_eq!(suggestions.len(), catalog.len());
    for s in &suggestions {
        assert!(s.score >= 0.5 - 1e-9);
    }
    // "BWO Emerger" and "Elk Hair Caddis" both earn bonuses; the critical
    // Baetis match outranks the major caddis match
    assert_eq!(suggestions[0].lure_name, "BWO Emerger");
    assert_eq!(suggestions[1].lure_name, "Elk Hair Caddis");
}

#[test]
fn test_invalid_date_rejected_at_construction() {
    assert!(MonthDay::new(13, 1).is_err());
    assert!(MonthDay::new(2, 0).is_err());
    assert!(MonthDay::new(6, 31).is_ok()); // calendar is 1-31 per month
}
