use twine_solvers::equation::bisection;
use uom::{
    ConstZero,
    si::{
        f64::{Length, VolumeRate},
        length::meter,
        volume_rate::cubic_meter_per_second,
    },
};

use crate::support::constraint::{StrictlyPositive, ensure_finite};

use super::SolveError;

/// Solver configuration for inverse filling solves.
#[derive(Debug, Clone, Copy)]
pub struct SolveConfig {
    /// Maximum iteration count for each bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the filling height, strictly positive and finite.
    pub filling_tol: Length,

    /// Absolute tolerance on the flow residual (achieved - target).
    ///
    /// Zero by default, so convergence is judged on the filling alone.
    pub flow_tol: VolumeRate,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            filling_tol: Length::new::<meter>(1e-9),
            flow_tol: VolumeRate::ZERO,
        }
    }
}

impl SolveConfig {
    /// Default configuration with a custom filling tolerance.
    #[must_use]
    pub fn with_tolerance(filling_tol: Length) -> Self {
        Self {
            filling_tol,
            ..Self::default()
        }
    }

    /// Checks that the filling tolerance can terminate a bisection.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::InvalidTolerance`] for a zero, negative, infinite
    /// or NaN tolerance.
    pub(super) fn validate(&self) -> Result<(), SolveError> {
        let tolerance = self.filling_tol;
        let invalid = |source| SolveError::InvalidTolerance { tolerance, source };
        StrictlyPositive::new(tolerance).map_err(invalid)?;
        ensure_finite(tolerance.get::<meter>()).map_err(invalid)?;
        Ok(())
    }

    /// Bisection configuration for matching a target flow.
    pub(super) fn flow_bisection(&self) -> bisection::Config {
        self.bisection(self.flow_tol.get::<cubic_meter_per_second>())
    }

    /// Bisection configuration for locating the capacity filling.
    ///
    /// The stationarity residual has no physical tolerance, so only the
    /// filling tolerance applies.
    pub(super) fn peak_bisection(&self) -> bisection::Config {
        self.bisection(0.0)
    }

    fn bisection(&self, residual_tol: f64) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.filling_tol.get::<meter>(),
            x_rel_tol: 0.0,
            residual_tol,
        }
    }
}
