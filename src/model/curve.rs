//! Empirical SOC → effective-resistance lookup table.

/// Piecewise-linear interpolation over ordered breakpoints.
///
/// Queries outside `[nodes.first, nodes.last]` clamp to the endpoint
/// values, the standard table-lookup boundary policy.
///
/// # Arguments
///
/// * `nodes` - Strictly increasing x-axis breakpoints
/// * `values` - y-values at each breakpoint, same length as `nodes`
/// * `query` - x-axis query point
///
/// # Panics
///
/// Panics if `nodes` and `values` differ in length or are empty.
pub fn piecewise_linear(nodes: &[f64], values: &[f64], query: f64) -> f64 {
    assert_eq!(nodes.len(), values.len());
    assert!(!nodes.is_empty());

    if query <= nodes[0] {
        return values[0];
    }
    if query >= nodes[nodes.len() - 1] {
        return values[values.len() - 1];
    }

    // Bracketing interval: nodes[i] <= query <= nodes[i + 1]
    let i = nodes.partition_point(|&n| n <= query) - 1;
    let frac = (query - nodes[i]) / (nodes[i + 1] - nodes[i]);
    values[i] + frac * (values[i + 1] - values[i])
}

/// Empirical battery resistance curve: 16 SOC breakpoints paired with
/// effective internal resistance per cell (ohms).
///
/// Resistance rises sharply near full charge; the table is fixed for
/// the process lifetime and shared read-only by all packs.
#[derive(Debug, Clone)]
pub struct ResistanceCurve {
    soc_grid: Vec<f64>,
    resistance_grid: Vec<f64>,
}

/// SOC breakpoints of the empirical fit.
const SOC_GRID: [f64; 16] = [
    0.0, 0.0667, 0.1333, 0.2, 0.2667, 0.3333, 0.4, 0.4667, 0.5333, 0.6, 0.6667, 0.7333, 0.8,
    0.8667, 0.9333, 1.0,
];

/// Effective resistance (ohms per cell) at each SOC breakpoint.
const RESISTANCE_GRID: [f64; 16] = [
    2.0, 2.2222, 2.4444, 2.6667, 2.6815, 2.6963, 2.7111, 2.7259, 2.7407, 2.7556, 2.7704, 2.7852,
    2.8, 3.8182, 6.0, 21.0,
];

impl ResistanceCurve {
    /// Creates a curve from explicit breakpoint tables.
    ///
    /// # Panics
    ///
    /// Panics if the tables differ in length, the SOC grid is not
    /// strictly increasing, or any resistance is non-positive.
    pub fn new(soc_grid: Vec<f64>, resistance_grid: Vec<f64>) -> Self {
        assert_eq!(soc_grid.len(), resistance_grid.len());
        assert!(!soc_grid.is_empty());
        assert!(soc_grid.windows(2).all(|w| w[0] < w[1]));
        assert!(resistance_grid.iter().all(|&r| r > 0.0));

        Self {
            soc_grid,
            resistance_grid,
        }
    }

    /// Returns the empirical curve from the reference fit.
    pub fn empirical() -> Self {
        Self::new(SOC_GRID.to_vec(), RESISTANCE_GRID.to_vec())
    }

    /// Interpolated effective resistance (ohms per cell) at the given SOC.
    ///
    /// Out-of-range queries clamp to the table endpoints; this never fails.
    pub fn resistance_at(&self, soc: f64) -> f64 {
        piecewise_linear(&self.soc_grid, &self.resistance_grid, soc)
    }

    /// Number of breakpoints in the table.
    pub fn len(&self) -> usize {
        self.soc_grid.len()
    }

    /// Returns true if the table has no breakpoints (never, by construction).
    pub fn is_empty(&self) -> bool {
        self.soc_grid.is_empty()
    }

    /// The SOC breakpoint grid.
    pub fn soc_grid(&self) -> &[f64] {
        &self.soc_grid
    }

    /// The resistance value grid.
    pub fn resistance_grid(&self) -> &[f64] {
        &self.resistance_grid
    }
}

impl Default for ResistanceCurve {
    fn default() -> Self {
        Self::empirical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints_interpolate_exactly() {
        let curve = ResistanceCurve::empirical();
        for (soc, r) in SOC_GRID.iter().zip(RESISTANCE_GRID.iter()) {
            assert_eq!(curve.resistance_at(*soc), *r, "breakpoint soc={soc}");
        }
    }

    #[test]
    fn midpoints_lie_between_bracketing_values() {
        let curve = ResistanceCurve::empirical();
        for w in 0..SOC_GRID.len() - 1 {
            let mid = (SOC_GRID[w] + SOC_GRID[w + 1]) / 2.0;
            let r = curve.resistance_at(mid);
            let lo = RESISTANCE_GRID[w].min(RESISTANCE_GRID[w + 1]);
            let hi = RESISTANCE_GRID[w].max(RESISTANCE_GRID[w + 1]);
            assert!(r >= lo && r <= hi, "mid soc={mid} gave r={r}");
            if lo < hi {
                assert!(r > lo && r < hi, "mid soc={mid} should be strictly between");
            }
        }
    }

    #[test]
    fn out_of_range_queries_clamp_to_endpoints() {
        let curve = ResistanceCurve::empirical();
        assert_eq!(curve.resistance_at(-1.0), curve.resistance_at(0.0));
        assert_eq!(curve.resistance_at(2.0), curve.resistance_at(1.0));
        assert_eq!(curve.resistance_at(-1.0), 2.0);
        assert_eq!(curve.resistance_at(2.0), 21.0);
    }

    #[test]
    fn interpolation_at_half_soc() {
        // 0.5 sits between breakpoints 0.4667 and 0.5333.
        let r = piecewise_linear(&SOC_GRID, &RESISTANCE_GRID, 0.5);
        assert!(r > 2.7259 && r < 2.7407);
    }

    #[test]
    fn linear_fraction_is_exact() {
        let nodes = [0.0, 1.0, 2.0];
        let values = [10.0, 20.0, 40.0];
        assert!((piecewise_linear(&nodes, &values, 0.25) - 12.5).abs() < 1e-12);
        assert!((piecewise_linear(&nodes, &values, 1.5) - 30.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic]
    fn mismatched_table_lengths_panic() {
        ResistanceCurve::new(vec![0.0, 1.0], vec![2.0]);
    }

    #[test]
    #[should_panic]
    fn non_increasing_soc_grid_panics() {
        ResistanceCurve::new(vec![0.0, 0.5, 0.5], vec![1.0, 2.0, 3.0]);
    }

    #[test]
    #[should_panic]
    fn non_positive_resistance_panics() {
        ResistanceCurve::new(vec![0.0, 1.0], vec![2.0, 0.0]);
    }
}
