//! Time-grant coordination boundary.

/// The barrier-style time synchronization capability of the host
/// co-simulation.
///
/// `request_time` is the federate's single suspension point: it blocks
/// until every participant agrees the requested (or a later) time may
/// be computed. Granted times are monotonically non-decreasing across
/// calls and may exceed the request; they are never earlier than the
/// previously granted time.
pub trait TimeCoordinator {
    /// Requests permission to advance to `desired_s`, returning the
    /// granted time.
    fn request_time(&mut self, desired_s: f64) -> f64;
}

/// In-process coordinator that grants exactly the requested time.
///
/// Stands in for the external scheduler when the federate runs
/// standalone, and gives tests a deterministic grant sequence.
#[derive(Debug, Clone, Default)]
pub struct LockstepCoordinator {
    last_granted_s: f64,
}

impl LockstepCoordinator {
    /// Creates a coordinator with no grants issued yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeCoordinator for LockstepCoordinator {
    fn request_time(&mut self, desired_s: f64) -> f64 {
        // Monotonicity holds even for a stale request.
        self.last_granted_s = self.last_granted_s.max(desired_s);
        self.last_granted_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lockstep_grants_requested_time() {
        let mut coord = LockstepCoordinator::new();
        assert_eq!(coord.request_time(60.0), 60.0);
        assert_eq!(coord.request_time(120.0), 120.0);
    }

    #[test]
    fn grants_never_regress() {
        let mut coord = LockstepCoordinator::new();
        coord.request_time(120.0);
        assert_eq!(coord.request_time(60.0), 120.0);
    }
}
