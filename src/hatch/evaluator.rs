//! Hatch activity evaluation
//!
//! Pure functions over an immutable registry snapshot: date/temperature
//! membership, peak detection, per-lure hatch bonuses, and human-readable
//! match explanations. No I/O, no shared mutable state.

use ahash::AHashSet;

use super::calendar::{circular_distance, MonthDay};
use super::pattern::{ActiveHatchInstance, HatchIntensity, HatchPattern};
use super::registry::HatchRegistry;

/// Half-width of the peak period, in days either side of the peak date.
pub const PEAK_WINDOW_DAYS: u32 = 14;

/// Ceiling on the hatch bonus a single lure can earn. Equal to the critical
/// tier base value; the bonus is a maximum over matches, never a sum, so many
/// weak partial matches cannot stack past it.
pub const MAX_HATCH_BONUS: f64 = 0.25;

/// An emergence that is active for the current query, with its peak status
/// resolved. Borrows the registry snapshot; lives for one request.
#[derive(Debug, Clone)]
pub struct ActiveHatch<'a> {
    pub pattern: &'a HatchPattern,
    /// Query date falls within the ±14-day peak period.
    pub peak: bool,
    /// Circular ordinal distance from the pattern's peak date.
    pub peak_distance_days: u32,
    /// Position in the registry, for keyword-index lookups.
    pub(crate) registry_index: usize,
}

/// Date (and optionally water-temperature) membership for a single pattern.
///
/// When `water_temp_f` is absent the temperature check is treated as
/// satisfied; the result is then date-only and callers must know that.
pub fn is_active(date: MonthDay, water_temp_f: Option<f64>, hatch: &HatchPattern) -> bool {
    if !hatch.window.contains_ordinal(date.ordinal()) {
        return false;
    }
    match water_temp_f {
        Some(temp) => hatch.water_temp_ok(temp),
        None => true,
    }
}

/// True when the query date is within the peak period.
///
/// Distance is measured circularly on the 365-day ring, so a pattern peaking
/// Dec 28 is still near peak for a Jan 3 query.
pub fn is_peak(date: MonthDay, hatch: &HatchPattern) -> bool {
    peak_distance(date, hatch) <= PEAK_WINDOW_DAYS
}

fn peak_distance(date: MonthDay, hatch: &HatchPattern) -> u32 {
    circular_distance(date.ordinal(), hatch.window.peak_ordinal())
}

fn river_matches(rivers: &[String], label: &str) -> bool {
    let label = label.trim().to_lowercase();
    rivers.iter().any(|river| {
        let river = river.trim().to_lowercase();
        river == "all" || label.contains(&river) || river.contains(&label)
    })
}

/// Case-insensitive containment in either direction: the lure name contains
/// the keyword, or the keyword contains the lure name. Inputs must already
/// be lowercased.
fn substring_match(lure_lower: &str, keyword_lower: &str) -> bool {
    lure_lower.contains(keyword_lower) || keyword_lower.contains(lure_lower)
}

/// Lowercased unigram and adjacent-bigram tokens of a lure name, used
/// against the registry's keyword index. An exact token hit always implies
/// the lure name contains that keyword, so the fast path never over-matches.
fn name_tokens(lure_name: &str) -> Vec<String> {
    let words: Vec<String> = lure_name
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect();
    let mut tokens = words.clone();
    for pair in words.windows(2) {
        tokens.push(format!("{} {}", pair[0], pair[1]));
    }
    tokens
}

/// Active hatches for a query, ordered for display.
///
/// Filters the registry by `is_active`; a location label additionally
/// requires the pattern's river list to contain "All" or a case-insensitive
/// substring match against the label. Sort order: peak status descending,
/// then importance rank ascending, ties broken by stable registry order.
pub fn active_hatches<'a>(
    registry: &'a HatchRegistry,
    date: MonthDay,
    water_temp_f: Option<f64>,
    location_label: Option<&str>,
) -> Vec<ActiveHatch<'a>> {
    let mut active: Vec<ActiveHatch<'a>> = registry
        .patterns()
        .iter()
        .enumerate()
        .filter(|(_, hatch)| is_active(date, water_temp_f, hatch))
        .filter(|(_, hatch)| match location_label {
            Some(label) => river_matches(&hatch.rivers, label),
            None => true,
        })
        .map(|(registry_index, pattern)| {
            let peak_distance_days = peak_distance(date, pattern);
            ActiveHatch {
                pattern,
                peak: peak_distance_days <= PEAK_WINDOW_DAYS,
                peak_distance_days,
                registry_index,
            }
        })
        .collect();

    // Vec::sort_by is stable, so registry order breaks remaining ties
    active.sort_by(|a, b| {
        b.peak
            .cmp(&a.peak)
            .then(a.pattern.importance.rank().cmp(&b.pattern.importance.rank()))
    });
    active
}

/// Hatch bonus for a lure name against the active set, in `[0, 0.25]`.
///
/// Every (active hatch, keyword) pair whose names match contributes a
/// candidate equal to the hatch's importance-tier base value; the result is
/// the maximum candidate. Registered names resolve through the precomputed
/// keyword index; substring comparison is the fallback.
pub fn hatch_bonus(registry: &HatchRegistry, lure_name: &str, active: &[ActiveHatch]) -> f64 {
    if active.is_empty() {
        return 0.0;
    }

    let mut indexed_hits: AHashSet<usize> = AHashSet::new();
    for token in name_tokens(lure_name) {
        indexed_hits.extend(registry.token_hits(&token).iter().copied());
    }

    let lure_lower = lure_name.to_lowercase();
    let mut bonus: f64 = 0.0;
    for hatch in active {
        let matched = indexed_hits.contains(&hatch.registry_index)
            || hatch
                .pattern
                .lure_keywords
                .iter()
                .any(|k| substring_match(&lure_lower, &k.to_lowercase()));
        if matched {
            bonus = bonus.max(hatch.pattern.importance.bonus_value());
        }
    }
    bonus.min(MAX_HATCH_BONUS)
}

/// One explanation per matching active hatch, not deduplicated, noting
/// whether the match falls in a peak period.
pub fn hatch_reasons(lure_name: &str, active: &[ActiveHatch]) -> Vec<String> {
    let lure_lower = lure_name.to_lowercase();
    active
        .iter()
        .filter(|hatch| {
            hatch
                .pattern
                .lure_keywords
                .iter()
                .any(|k| substring_match(&lure_lower, &k.to_lowercase()))
        })
        .map(|hatch| {
            let phase = if hatch.peak {
                "at peak emergence"
            } else {
                "actively emerging"
            };
            format!(
                "Matches the {} hatch ({} importance), {}",
                hatch.pattern.name,
                hatch.pattern.importance.display_name(),
                phase
            )
        })
        .collect()
}

/// The "what's hatching now" view: one ephemeral instance per
/// (active hatch, life stage), intensity derived from peak proximity.
pub fn active_instances(
    registry: &HatchRegistry,
    date: MonthDay,
    water_temp_f: Option<f64>,
    location_label: Option<&str>,
) -> Vec<ActiveHatchInstance> {
    active_hatches(registry, date, water_temp_f, location_label)
        .iter()
        .flat_map(|hatch| {
            let intensity = HatchIntensity::from_peak_distance(hatch.peak_distance_days);
            hatch.pattern.life_stages.iter().map(move |stage| ActiveHatchInstance {
                insect: hatch.pattern.name.clone(),
                stage: *stage,
                size_range: hatch.pattern.size_range.clone(),
                intensity,
                times_of_day: hatch.pattern.times_of_day.clone(),
                water_temp_range_f: hatch.pattern.water_temp_range_f,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(month: u32, day: u32) -> MonthDay {
        MonthDay::new(month, day).unwrap()
    }

    #[test]
    fn test_bwo_spring_scenario() {
        let registry = HatchRegistry::builtin();
        let bwo = registry.get("BWO_SPRING").unwrap();

        // Apr 20 at 50°F: active, and 5 days from the Apr 15 peak
        assert!(is_active(date(4, 20), Some(50.0), bwo));
        assert!(is_peak(date(4, 20), bwo));

        // Water temperature outside [45, 58] gates activity off
        assert!(!is_active(date(4, 20), Some(62.0), bwo));
        assert!(!is_active(date(4, 20), Some(40.0), bwo));

        // No reading means the temperature check is satisfied (date-only)
        assert!(is_active(date(4, 20), None, bwo));
    }

    #[test]
    fn test_winter_midge_wrapping_scenario() {
        let registry = HatchRegistry::builtin();
        let midge = registry.get("WINTER_MIDGE").unwrap();

        assert!(is_active(date(12, 10), None, midge));
        assert!(is_active(date(2, 1), None, midge));
        assert!(!is_active(date(7, 1), None, midge));
    }

    #[test]
    fn test_peak_detection_across_year_boundary() {
        let registry = HatchRegistry::builtin();
        let midge = registry.get("WINTER_MIDGE").unwrap();

        // Peak Jan 15: Jan 3 is 12 days out, Dec 28 is 18 days out
        assert!(is_peak(date(1, 3), midge));
        assert!(!is_peak(date(12, 28), midge));
        assert!(is_peak(date(1, 29), midge));
        assert!(!is_peak(date(2, 15), midge));
    }

    #[test]
    fn test_active_ordering_peak_then_importance() {
        let registry = HatchRegistry::builtin();

        // Apr 20, no temperature: BWO_SPRING (critical, peak),
        // HENDRICKSON (major, peak Apr 25 -> 5 days, peak),
        // BLUE_QUILL (minor, peak Apr 20 -> peak),
        // CADDIS_GRANNOM (major, peak May 10 -> 20 days, not peak)
        let active = active_hatches(&registry, date(4, 20), None, None);
        let ids: Vec<&str> = active.iter().map(|h| h.pattern.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["BWO_SPRING", "HENDRICKSON", "BLUE_QUILL", "CADDIS_GRANNOM"]
        );
        assert!(active[0].peak);
        assert!(!active[3].peak);
    }

    #[test]
    fn test_location_filtering() {
        let registry = HatchRegistry::builtin();

        // Hendrickson only applies to its listed eastern rivers
        let on_delaware = active_hatches(
            &registry,
            date(4, 25),
            None,
            Some("Upper Delaware River"),
        );
        assert!(on_delaware.iter().any(|h| h.pattern.id == "HENDRICKSON"));

        let on_madison = active_hatches(&registry, date(4, 25), None, Some("Madison River"));
        assert!(!on_madison.iter().any(|h| h.pattern.id == "HENDRICKSON"));
        // Wildcard "All" patterns still apply on any river
        assert!(on_madison.iter().any(|h| h.pattern.id == "BWO_SPRING"));

        // Unknown locations keep wildcard patterns and drop river-specific ones
        let nowhere = active_hatches(&registry, date(4, 25), None, Some("Mystery Creek"));
        assert!(nowhere.iter().all(|h| h
            .pattern
            .rivers
            .iter()
            .any(|r| r.eq_ignore_ascii_case("all"))));
    }

    #[test]
    fn test_hatch_bonus_exact_value_for_critical_match() {
        let registry = HatchRegistry::builtin();
        let active = active_hatches(&registry, date(4, 20), Some(50.0), None);

        let bonus = hatch_bonus(&registry, "BWO Emerger", &active);
        assert_relative_eq!(bonus, 0.25);
    }

    #[test]
    fn test_hatch_bonus_is_max_never_sum() {
        let registry = HatchRegistry::builtin();
        // Apr 20: BWO_SPRING (critical) and CADDIS_GRANNOM (major) are both
        // active; a lure matching both earns 0.25, not 0.40.
        let active = active_hatches(&registry, date(4, 20), None, None);
        let bonus = hatch_bonus(&registry, "Olive Elk Hair Caddis", &active);
        assert_relative_eq!(bonus, 0.25);
        assert!(bonus <= MAX_HATCH_BONUS);
    }

    #[test]
    fn test_hatch_bonus_order_independent() {
        let registry = HatchRegistry::builtin();
        let mut active = active_hatches(&registry, date(4, 20), None, None);
        let forward = hatch_bonus(&registry, "Olive Elk Hair Caddis", &active);
        active.reverse();
        let reversed = hatch_bonus(&registry, "Olive Elk Hair Caddis", &active);
        assert_relative_eq!(forward, reversed);
    }

    #[test]
    fn test_hatch_bonus_unmatched_and_empty() {
        let registry = HatchRegistry::builtin();
        let active = active_hatches(&registry, date(4, 20), None, None);
        assert_relative_eq!(hatch_bonus(&registry, "Clouser Minnow", &active), 0.0);
        assert_relative_eq!(hatch_bonus(&registry, "BWO Emerger", &[]), 0.0);
    }

    #[test]
    fn test_hatch_reasons_note_peak_status() {
        let registry = HatchRegistry::builtin();
        let active = active_hatches(&registry, date(4, 20), None, None);

        let reasons = hatch_reasons("Olive Elk Hair Caddis", &active);
        // Matches both Baetis ("olive") and Grannom ("caddis", "elk hair"),
        // one reason each, not deduplicated
        assert_eq!(reasons.len(), 2);
        assert!(reasons[0].contains("Blue-Winged Olive"));
        assert!(reasons[0].contains("peak"));
        assert!(reasons[1].contains("Grannom"));
        assert!(reasons[1].contains("actively emerging"));
    }

    #[test]
    fn test_active_instances_expand_life_stages() {
        let registry = HatchRegistry::builtin();
        let instances = active_instances(&registry, date(4, 15), Some(50.0), None);

        // BWO_SPRING is at its exact peak: heavy intensity, 3 life stages
        let bwo: Vec<_> = instances
            .iter()
            .filter(|i| i.insect == "Blue-Winged Olive")
            .collect();
        assert_eq!(bwo.len(), 3);
        assert!(bwo.iter().all(|i| i.intensity == HatchIntensity::Heavy));
    }

    #[test]
    fn test_determinism() {
        let registry = HatchRegistry::builtin();
        let a = active_instances(&registry, date(4, 20), Some(50.0), Some("Madison"));
        let b = active_instances(&registry, date(4, 20), Some(50.0), Some("Madison"));
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.insect, y.insect);
            assert_eq!(x.stage, y.stage);
            assert_eq!(x.intensity, y.intensity);
        }
    }
}
