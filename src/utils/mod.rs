//! Shared unit and formatting utilities

pub mod units;

pub use units::{fahrenheit_to_celsius, round1};
