//! Per-unit battery pack state and the SOC update law.

use std::fmt;

use rand::Rng;

use super::curve::ResistanceCurve;

/// SOC of an incoming vehicle is drawn uniformly from this range,
/// modeling partially-charged arrivals.
const ARRIVAL_SOC_RANGE: std::ops::Range<f64> = 0.0..0.80;

/// Non-positive effective resistance encountered during a tick.
///
/// Raised instead of propagating an infinite or NaN current; the
/// failing unit's SOC is left unmutated by the update law.
#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticError {
    /// Index of the unit whose computation failed.
    pub unit: usize,
    /// The offending effective resistance (ohms).
    pub resistance_ohm: f64,
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arithmetic error: unit {} has non-positive effective resistance {} ohm",
            self.unit, self.resistance_ohm
        )
    }
}

impl std::error::Error for ArithmeticError {}

/// Result of one pack update, captured for telemetry.
#[derive(Debug, Clone, Copy)]
pub struct StepOutcome {
    /// Charging current drawn this tick (A).
    pub current_a: f64,
    /// Effective pack resistance used for the computation (ohms).
    pub resistance_ohm: f64,
    /// SOC after the update.
    pub soc: f64,
    /// Whether a zero-voltage disconnect reset the SOC this tick.
    pub reset: bool,
}

/// One EV battery pack tracking its true state of charge.
///
/// The SOC modeled here is the battery's own, which may differ from
/// the SOC estimated by the charger on the other side of the wire.
#[derive(Debug, Clone)]
pub struct BatteryPack {
    /// Unit index, stable for the process lifetime.
    pub id: usize,
    /// True state of charge. Nominally in [0, 1] but not clamped; the
    /// discrete step may overshoot slightly near full charge.
    pub soc: f64,
    /// Series-connected cells; effective resistance scales with this.
    pub cells_in_series: u32,
    /// Parallel cell strings.
    pub cells_in_parallel: u32,
    /// Pack energy capacity (kWh).
    pub capacity_kwh: f64,
}

impl BatteryPack {
    /// Creates a pack with an arrival SOC drawn from the injected RNG.
    pub fn new(
        id: usize,
        cells_in_series: u32,
        cells_in_parallel: u32,
        capacity_kwh: f64,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            id,
            soc: draw_arrival_soc(rng),
            cells_in_series,
            cells_in_parallel,
            capacity_kwh,
        }
    }

    /// Advances the pack by one tick under the given applied voltage.
    ///
    /// A zero applied voltage means the charged vehicle departed and a
    /// new one plugged in: the SOC is re-drawn before the computation,
    /// so the output stream still carries one value for this tick.
    ///
    /// The update law, matching the empirical fit the curve was made
    /// against:
    ///
    /// ```text
    /// R = cells_in_series * curve(soc)
    /// I = V / R
    /// soc += I * V * dt / 3600
    /// ```
    ///
    /// SOC is accumulated directly, without capacity normalization or
    /// clamping.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError`] if the effective resistance is not
    /// positive; the SOC update is not applied in that case.
    pub fn step(
        &mut self,
        applied_voltage: f64,
        dt_seconds: f64,
        curve: &ResistanceCurve,
        rng: &mut impl Rng,
    ) -> Result<StepOutcome, ArithmeticError> {
        assert!(dt_seconds > 0.0);

        let reset = applied_voltage == 0.0;
        if reset {
            self.soc = draw_arrival_soc(rng);
        }

        let resistance_ohm = f64::from(self.cells_in_series) * curve.resistance_at(self.soc);
        if resistance_ohm <= 0.0 {
            return Err(ArithmeticError {
                unit: self.id,
                resistance_ohm,
            });
        }

        let current_a = applied_voltage / resistance_ohm;
        let added_kwh = current_a * applied_voltage * dt_seconds / 3600.0;
        self.soc += added_kwh;

        Ok(StepOutcome {
            current_a,
            resistance_ohm,
            soc: self.soc,
            reset,
        })
    }
}

/// Uniform arrival-SOC draw in `[0.0, 0.80)`.
pub fn draw_arrival_soc(rng: &mut impl Rng) -> f64 {
    rng.random_range(ARRIVAL_SOC_RANGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn pack(soc: f64) -> BatteryPack {
        BatteryPack {
            id: 0,
            soc,
            cells_in_series: 96,
            cells_in_parallel: 3,
            capacity_kwh: 62.0,
        }
    }

    #[test]
    fn arrival_soc_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let soc = draw_arrival_soc(&mut rng);
            assert!((0.0..0.80).contains(&soc));
        }
    }

    #[test]
    fn energy_accumulation_matches_update_law() {
        let curve = ResistanceCurve::empirical();
        let mut rng = StdRng::seed_from_u64(0);
        let mut p = pack(0.5);

        let r = 96.0 * curve.resistance_at(0.5);
        let current = 400.0 / r;
        let added = current * 400.0 * 60.0 / 3600.0;

        let out = p.step(400.0, 60.0, &curve, &mut rng).unwrap();
        assert!((out.current_a - current).abs() < 1e-9);
        assert!((p.soc - (0.5 + added)).abs() < 1e-9);
        assert!(!out.reset);
    }

    #[test]
    fn zero_voltage_resets_soc_before_computing() {
        let curve = ResistanceCurve::empirical();
        let mut rng = StdRng::seed_from_u64(42);
        let mut p = pack(0.97);

        let out = p.step(0.0, 60.0, &curve, &mut rng).unwrap();
        assert!(out.reset);
        assert!((0.0..0.80).contains(&p.soc), "soc={}", p.soc);
        assert_eq!(out.current_a, 0.0);
    }

    #[test]
    fn zero_voltage_reset_is_independent_of_prior_soc() {
        let curve = ResistanceCurve::empirical();
        let mut rng_a = StdRng::seed_from_u64(9);
        let mut rng_b = StdRng::seed_from_u64(9);
        let mut low = pack(0.01);
        let mut high = pack(5.0);

        low.step(0.0, 60.0, &curve, &mut rng_a).unwrap();
        high.step(0.0, 60.0, &curve, &mut rng_b).unwrap();
        assert_eq!(low.soc, high.soc);
    }

    #[test]
    fn non_negative_voltage_yields_non_negative_current() {
        let curve = ResistanceCurve::empirical();
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = pack(0.2);
        for v in [0.0, 1.0, 120.0, 400.0, 800.0] {
            let out = p.step(v, 60.0, &curve, &mut rng).unwrap();
            assert!(out.current_a >= 0.0, "voltage {v} gave {}", out.current_a);
        }
    }

    #[test]
    fn soc_is_not_clamped_above_one() {
        let curve = ResistanceCurve::empirical();
        let mut rng = StdRng::seed_from_u64(0);
        let mut p = pack(0.999);
        // Large dt pushes the accumulation past 1.0.
        p.step(400.0, 36_000.0, &curve, &mut rng).unwrap();
        assert!(p.soc > 1.0);
    }

    #[test]
    fn zero_series_cells_is_an_arithmetic_error() {
        let curve = ResistanceCurve::empirical();
        let mut rng = StdRng::seed_from_u64(0);
        let mut p = pack(0.5);
        p.cells_in_series = 0;

        let err = p.step(400.0, 60.0, &curve, &mut rng).unwrap_err();
        assert_eq!(err.unit, 0);
        assert_eq!(err.resistance_ohm, 0.0);
        assert_eq!(p.soc, 0.5, "failed tick must not mutate soc");
    }

    #[test]
    fn resistance_scales_with_series_cells() {
        let curve = ResistanceCurve::empirical();
        let mut rng = StdRng::seed_from_u64(0);
        let mut single = pack(0.5);
        single.cells_in_series = 1;
        let mut stacked = pack(0.5);

        let out_1 = single.step(400.0, 60.0, &curve, &mut rng).unwrap();
        let out_96 = stacked.step(400.0, 60.0, &curve, &mut rng).unwrap();
        assert!((out_96.resistance_ohm - 96.0 * out_1.resistance_ohm).abs() < 1e-9);
    }
}
