//! Battery physics: the empirical resistance curve and the per-pack
//! SOC update law.

pub mod curve;
pub mod pack;

pub use curve::ResistanceCurve;
pub use pack::{ArithmeticError, BatteryPack, StepOutcome};
