//! Hatch calendar registry and activity evaluation
//!
//! The registry is a fixed, in-memory set of hatch-pattern records loaded
//! once at process start and immutable thereafter; concurrent readers never
//! contend. The evaluator is a set of pure functions over that snapshot.

pub mod calendar;
pub mod evaluator;
pub mod pattern;
pub mod registry;

pub use calendar::MonthDay;
pub use evaluator::{
    active_hatches, active_instances, hatch_bonus, hatch_reasons, is_active, is_peak, ActiveHatch,
};
pub use pattern::{
    ActiveHatchInstance, EmergenceWindow, HatchIntensity, HatchPattern, ImportanceTier, LifeStage,
    TimeOfDay,
};
pub use registry::HatchRegistry;
