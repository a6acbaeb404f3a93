//! Federate engine, clock, and co-simulation boundaries.

/// Value exchange boundary and the standalone charger stand-in.
pub mod bus;
/// Simulation clock for granted-time tracking.
pub mod clock;
/// Time-grant coordination boundary.
pub mod coordinator;
pub mod engine;
pub mod types;

pub use bus::{ChargerBus, ValueBus};
pub use clock::SimClock;
pub use coordinator::{LockstepCoordinator, TimeCoordinator};
pub use engine::{Federate, Phase};
pub use types::{RunReport, TickRecord};
