//! Simulation clock driven by externally granted times.

/// Tracks simulated time over a fixed horizon.
///
/// The clock never advances itself: `current_s` moves only through
/// [`SimClock::advance_to`] with a time granted by the coordinator,
/// and granted times must be monotonically non-decreasing.
///
/// # Examples
///
/// ```
/// use batt_fed::sim::clock::SimClock;
///
/// let mut clock = SimClock::new(60.0, 180.0);
/// while !clock.is_finished() {
///     let granted = clock.next_request(); // lockstep grant
///     clock.advance_to(granted);
/// }
/// assert_eq!(clock.current_s(), 180.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimClock {
    /// Tick duration in seconds.
    step_seconds: f64,
    /// Total simulated duration in seconds.
    horizon_seconds: f64,
    /// Last granted time in seconds.
    current_s: f64,
}

impl SimClock {
    /// Creates a clock starting at t=0.
    ///
    /// # Panics
    ///
    /// Panics if `step_seconds` or `horizon_seconds` is not positive.
    pub fn new(step_seconds: f64, horizon_seconds: f64) -> Self {
        assert!(step_seconds > 0.0, "step_seconds must be > 0");
        assert!(horizon_seconds > 0.0, "horizon_seconds must be > 0");
        Self {
            step_seconds,
            horizon_seconds,
            current_s: 0.0,
        }
    }

    /// The next time point to request from the coordinator.
    pub fn next_request(&self) -> f64 {
        self.current_s + self.step_seconds
    }

    /// Accepts a granted time.
    ///
    /// # Panics
    ///
    /// Panics if the grant would move time backwards.
    pub fn advance_to(&mut self, granted_s: f64) {
        assert!(
            granted_s >= self.current_s,
            "granted time {granted_s} is before current time {}",
            self.current_s
        );
        self.current_s = granted_s;
    }

    /// True once the horizon has been reached.
    pub fn is_finished(&self) -> bool {
        self.current_s >= self.horizon_seconds
    }

    /// Last granted time in seconds.
    pub fn current_s(&self) -> f64 {
        self.current_s
    }

    /// Tick duration in seconds.
    pub fn step_seconds(&self) -> f64 {
        self.step_seconds
    }

    /// Total simulated duration in seconds.
    pub fn horizon_seconds(&self) -> f64 {
        self.horizon_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clock_starts_at_zero() {
        let clock = SimClock::new(60.0, 3600.0);
        assert_eq!(clock.current_s(), 0.0);
        assert!(!clock.is_finished());
        assert_eq!(clock.next_request(), 60.0);
    }

    #[test]
    fn lockstep_grants_reach_horizon_in_exact_ticks() {
        let mut clock = SimClock::new(60.0, 3600.0);
        let mut ticks = 0;
        while !clock.is_finished() {
            clock.advance_to(clock.next_request());
            ticks += 1;
        }
        assert_eq!(ticks, 60);
    }

    #[test]
    fn late_grant_advances_past_request() {
        let mut clock = SimClock::new(60.0, 3600.0);
        clock.advance_to(95.0);
        assert_eq!(clock.current_s(), 95.0);
        assert_eq!(clock.next_request(), 155.0);
    }

    #[test]
    #[should_panic]
    fn backwards_grant_panics() {
        let mut clock = SimClock::new(60.0, 3600.0);
        clock.advance_to(120.0);
        clock.advance_to(60.0);
    }

    #[test]
    #[should_panic]
    fn zero_step_panics() {
        SimClock::new(0.0, 3600.0);
    }
}
