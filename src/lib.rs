//! Hatch Scorer Rust Implementation
//!
//! Condition-matching and hatch-aware lure recommendation engine for the
//! angler companion app. Given a query date, a location label, and live
//! environmental readings, it determines which insect emergences ("hatches")
//! are biologically active and ranks candidate lure patterns by fit.
//!
//! Module layout:
//! - `hatch/`: Emergence calendar registry and activity evaluation
//! - `profile/`: Lure condition profile normalization
//! - `data`: Live readings and catalog loading
//! - `scorer`: Weighted condition scoring and ranked suggestions
//!
//! All evaluation is pure and stateless per call: the registry and profile
//! snapshots are immutable, so scoring is safe to run fully in parallel
//! across lures and across concurrent requests.

pub mod data;
pub mod error;
pub mod hatch;
pub mod profile;
pub mod scorer;
pub mod utils;

// Re-export commonly used types
pub use data::{EnvReadings, RawLureRecord};
pub use error::EngineError;
pub use hatch::calendar::MonthDay;
pub use hatch::evaluator::{
    active_hatches, active_instances, hatch_bonus, hatch_reasons, is_active, is_peak, ActiveHatch,
};
pub use hatch::pattern::{ActiveHatchInstance, HatchIntensity, HatchPattern, ImportanceTier, LifeStage};
pub use hatch::registry::HatchRegistry;
pub use profile::normalizer::{normalize_catalog, normalize_record, renormalize};
pub use profile::{DimensionRange, LureConditionProfile};
pub use scorer::{RecommendationEngine, Suggestion};
