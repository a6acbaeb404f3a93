//! Federate engine: lifecycle, tick cadence, and value exchange.

use rand::{SeedableRng, rngs::StdRng};

use crate::config::FederateConfig;
use crate::model::curve::ResistanceCurve;
use crate::model::pack::{ArithmeticError, BatteryPack};

use super::bus::ValueBus;
use super::clock::SimClock;
use super::coordinator::TimeCoordinator;
use super::types::TickRecord;

/// Lifecycle of the federate.
///
/// `Uninitialized` is the state before construction; building a
/// [`Federate`] from a validated config performs registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Channels bound, packs initialized, not yet exchanging values.
    Registered,
    /// Inside the tick loop, exchanging values under time grants.
    Executing,
    /// Horizon reached; no further transitions.
    Terminated,
}

/// The battery value federate.
///
/// Owns the pack set, clock, resistance curve, and RNG exclusively;
/// the coordinator and bus are the injected boundaries to the host
/// co-simulation. Execution is single-threaded: within a granted time
/// every unit is processed synchronously in index order, and the only
/// suspension point is the coordinator's time request.
pub struct Federate<C: TimeCoordinator, B: ValueBus> {
    clock: SimClock,
    curve: ResistanceCurve,
    packs: Vec<BatteryPack>,
    coordinator: C,
    bus: B,
    rng: StdRng,
    phase: Phase,
}

impl<C: TimeCoordinator, B: ValueBus> Federate<C, B> {
    /// Registers the federate from a validated configuration.
    ///
    /// Each pack's SOC is drawn from the seeded RNG, modeling the
    /// partially-charged vehicles connected at startup.
    ///
    /// # Panics
    ///
    /// Panics if the config's channel lists are empty or mismatched;
    /// call [`FederateConfig::validate`] first for a diagnosable error.
    pub fn new(config: &FederateConfig, coordinator: C, bus: B) -> Self {
        let units = config.channels.inputs.len();
        assert!(units > 0);
        assert_eq!(units, config.channels.outputs.len());

        let mut rng = StdRng::seed_from_u64(config.simulation.seed);
        let p = &config.pack;
        let packs = (0..units)
            .map(|id| {
                BatteryPack::new(
                    id,
                    p.cells_in_series,
                    p.cells_in_parallel,
                    p.capacity_kwh,
                    &mut rng,
                )
            })
            .collect();

        Self {
            clock: SimClock::new(
                config.simulation.step_seconds,
                config.simulation.horizon_seconds(),
            ),
            curve: ResistanceCurve::empirical(),
            packs,
            coordinator,
            bus,
            rng,
            phase: Phase::Registered,
        }
    }

    /// Runs the tick loop to the horizon and returns the records.
    ///
    /// Each iteration requests `current + step` from the coordinator,
    /// accepts the (possibly later) grant, and for every unit in index
    /// order reads the applied voltage, advances the pack, and
    /// publishes the charging current.
    ///
    /// # Errors
    ///
    /// Returns the first [`ArithmeticError`] raised by a pack; the run
    /// aborts mid-tick and is not retried, since retrying without new
    /// input would recompute the same failure.
    ///
    /// # Panics
    ///
    /// Panics if called after the federate has terminated.
    pub fn run(&mut self) -> Result<Vec<TickRecord>, ArithmeticError> {
        assert!(self.phase != Phase::Terminated, "federate already terminated");
        self.phase = Phase::Executing;

        let step_seconds = self.clock.step_seconds();
        let mut records = Vec::new();

        while !self.clock.is_finished() {
            let granted = self.coordinator.request_time(self.clock.next_request());
            self.clock.advance_to(granted);
            let time_s = self.clock.current_s();

            for pack in &mut self.packs {
                let voltage_v = self.bus.read_input(pack.id);
                let outcome = pack.step(voltage_v, step_seconds, &self.curve, &mut self.rng)?;
                self.bus.write_output(pack.id, outcome.current_a);

                records.push(TickRecord {
                    time_s,
                    time_hr: time_s / 3600.0,
                    unit: pack.id,
                    voltage_v,
                    resistance_ohm: outcome.resistance_ohm,
                    current_a: outcome.current_a,
                    soc: outcome.soc,
                    reset: outcome.reset,
                });
            }
        }

        self.phase = Phase::Terminated;
        Ok(records)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The owned pack set, in unit-index order.
    pub fn packs(&self) -> &[BatteryPack] {
        &self.packs
    }

    /// The simulation clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// The injected value bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }
}
