//! EV battery value federate.
//!
//! Models the physics of a fleet of EV battery packs as they charge,
//! acting as one timestep-synchronized participant in a co-simulation:
//! each tick it receives an applied charging voltage per unit, derives
//! the charging current from an empirical SOC → resistance curve,
//! advances each pack's true SOC, and publishes the current back to
//! the counterpart charger federate.

pub mod config;
/// CSV export of tick records.
pub mod io;
/// Battery physics models.
pub mod model;
/// Federate engine and co-simulation boundaries.
pub mod sim;
