//! Per-tick records and the post-hoc run report.

use std::fmt;

/// Complete record of one unit's computation at one granted time.
#[derive(Debug, Clone)]
pub struct TickRecord {
    /// Granted simulation time (s).
    pub time_s: f64,
    /// Granted simulation time (h).
    pub time_hr: f64,
    /// Unit index.
    pub unit: usize,
    /// Applied charging voltage read from the input channel (V).
    pub voltage_v: f64,
    /// Effective pack resistance used for the computation (ohms).
    pub resistance_ohm: f64,
    /// Published charging current (A).
    pub current_a: f64,
    /// True SOC after the update.
    pub soc: f64,
    /// Whether a zero-voltage disconnect reset this unit's SOC.
    pub reset: bool,
}

impl fmt::Display for TickRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>8.0}s ({:>6.2}h) | unit {} | V={:>6.1} V  R={:>8.2} ohm  \
             I={:>7.4} A | SOC={:.4}{}",
            self.time_s,
            self.time_hr,
            self.unit,
            self.voltage_v,
            self.resistance_ohm,
            self.current_a,
            self.soc,
            if self.reset { " (new vehicle)" } else { "" },
        )
    }
}

/// Aggregate summary derived from a complete run.
///
/// Computed post-hoc from the tick records so the reported numbers
/// always agree with the exported telemetry.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Number of granted time steps executed.
    pub ticks: usize,
    /// Zero-voltage disconnect events across all units.
    pub disconnects: usize,
    /// Mean published current across all records (A).
    pub mean_current_a: f64,
    /// Peak published current (A).
    pub peak_current_a: f64,
    /// Final SOC per unit, in index order.
    pub final_soc: Vec<f64>,
}

impl RunReport {
    /// Computes the summary from the complete record vector.
    pub fn from_records(records: &[TickRecord], units: usize) -> Self {
        if records.is_empty() {
            return Self {
                ticks: 0,
                disconnects: 0,
                mean_current_a: 0.0,
                peak_current_a: 0.0,
                final_soc: vec![0.0; units],
            };
        }

        let mut disconnects = 0;
        let mut current_sum = 0.0;
        let mut peak = 0.0_f64;
        let mut final_soc = vec![0.0; units];

        for r in records {
            if r.reset {
                disconnects += 1;
            }
            current_sum += r.current_a;
            peak = peak.max(r.current_a);
            final_soc[r.unit] = r.soc;
        }

        Self {
            ticks: records.len() / units,
            disconnects,
            mean_current_a: current_sum / records.len() as f64,
            peak_current_a: peak,
            final_soc,
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run report")?;
        writeln!(f, "  ticks executed:    {}", self.ticks)?;
        writeln!(f, "  vehicle swaps:     {}", self.disconnects)?;
        writeln!(f, "  mean current:      {:.4} A", self.mean_current_a)?;
        writeln!(f, "  peak current:      {:.4} A", self.peak_current_a)?;
        for (i, soc) in self.final_soc.iter().enumerate() {
            writeln!(f, "  unit {i} final SOC:  {soc:.4}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(t: f64, unit: usize, current: f64, soc: f64, reset: bool) -> TickRecord {
        TickRecord {
            time_s: t,
            time_hr: t / 3600.0,
            unit,
            voltage_v: 400.0,
            resistance_ohm: 264.5,
            current_a: current,
            soc,
            reset,
        }
    }

    #[test]
    fn report_aggregates_over_units() {
        let records = vec![
            record(60.0, 0, 1.0, 0.5, false),
            record(60.0, 1, 3.0, 0.6, true),
            record(120.0, 0, 2.0, 0.51, false),
            record(120.0, 1, 0.0, 0.1, true),
        ];
        let report = RunReport::from_records(&records, 2);
        assert_eq!(report.ticks, 2);
        assert_eq!(report.disconnects, 2);
        assert!((report.mean_current_a - 1.5).abs() < 1e-12);
        assert_eq!(report.peak_current_a, 3.0);
        assert_eq!(report.final_soc, vec![0.51, 0.1]);
    }

    #[test]
    fn empty_run_reports_zeros() {
        let report = RunReport::from_records(&[], 3);
        assert_eq!(report.ticks, 0);
        assert_eq!(report.final_soc, vec![0.0; 3]);
    }

    #[test]
    fn tick_record_display_does_not_panic() {
        let r = record(60.0, 0, 1.5, 0.5, true);
        let s = format!("{r}");
        assert!(s.contains("new vehicle"));
    }
}
