//! Step completion validation.
//!
//! Provides rule types, a pure-logic evaluator over the form's JSON
//! projection, and the per-layout step rule tables.

pub mod evaluator;
pub mod rules;
pub mod steps;

pub use rules::{FieldViolation, ValidationMode, ValidationResult};
pub use steps::evaluate_step;
