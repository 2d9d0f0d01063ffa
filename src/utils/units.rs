//! Unit conversions
//!
//! Authored lure data and live gauge readings arrive in US units (°F, cfs,
//! mph). Normalized profiles store temperatures in °C with one-decimal
//! rounding; flow and wind stay in their source units.

/// Round to one decimal place.
///
/// Idempotent by construction: `round1(round1(x)) == round1(x)`, which the
/// normalizer relies on for byte-identical renormalization.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Convert °F to °C, rounded to one decimal place.
pub fn fahrenheit_to_celsius(deg_f: f64) -> f64 {
    round1((deg_f - 32.0) * 5.0 / 9.0)
}
