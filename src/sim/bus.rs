//! Scalar value exchange boundary and a standalone charger stand-in.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// The per-tick scalar exchange capability of the host co-simulation.
///
/// One value moves per channel per tick; the last value written before
/// the next grant is what counterpart federates observe.
pub trait ValueBus {
    /// Reads the applied charging voltage on an input channel (V).
    fn read_input(&mut self, channel: usize) -> f64;

    /// Publishes a charging current on an output channel (A).
    fn write_output(&mut self, channel: usize, value: f64);
}

/// In-process stand-in for the EV charger federate.
///
/// Each unit sees charging sessions of seeded-random dwell: a constant
/// supply voltage while a vehicle is connected, then a single 0 V tick
/// signalling "charged vehicle departed, new vehicle plugged in"
/// before the next session begins.
#[derive(Debug, Clone)]
pub struct ChargerBus {
    /// Supply voltage during an active session (V).
    supply_voltage: f64,
    /// Minimum session dwell in ticks.
    dwell_ticks_min: u32,
    /// Maximum session dwell in ticks.
    dwell_ticks_max: u32,
    /// Remaining ticks of each unit's current session.
    remaining: Vec<u32>,
    /// Last current published per unit (A).
    published: Vec<f64>,
    rng: StdRng,
}

impl ChargerBus {
    /// Creates a charger stand-in for `units` channels.
    ///
    /// # Panics
    ///
    /// Panics if `supply_voltage` is negative, `units` is zero, or the
    /// dwell range is empty or inverted.
    pub fn new(
        units: usize,
        supply_voltage: f64,
        dwell_ticks_min: u32,
        dwell_ticks_max: u32,
        seed: u64,
    ) -> Self {
        assert!(units > 0);
        assert!(supply_voltage >= 0.0);
        assert!(dwell_ticks_min > 0);
        assert!(dwell_ticks_max >= dwell_ticks_min);

        let mut rng = StdRng::seed_from_u64(seed);
        let remaining = (0..units)
            .map(|_| rng.random_range(dwell_ticks_min..=dwell_ticks_max))
            .collect();

        Self {
            supply_voltage,
            dwell_ticks_min,
            dwell_ticks_max,
            remaining,
            published: vec![0.0; units],
            rng,
        }
    }

    /// Last current published on each output channel (A).
    pub fn published(&self) -> &[f64] {
        &self.published
    }
}

impl ValueBus for ChargerBus {
    fn read_input(&mut self, channel: usize) -> f64 {
        if self.remaining[channel] == 0 {
            // Vehicle swap tick: zero voltage, then a fresh session.
            self.remaining[channel] = self
                .rng
                .random_range(self.dwell_ticks_min..=self.dwell_ticks_max);
            return 0.0;
        }
        self.remaining[channel] -= 1;
        self.supply_voltage
    }

    fn write_output(&mut self, channel: usize, value: f64) {
        self.published[channel] = value;
    }
}
