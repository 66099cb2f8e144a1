use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::{Length, VolumeRate};

use crate::support::{constraint::ConstraintError, pipe::GeometryError};

/// Errors that can occur while solving for a filling height.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The pipe geometry is invalid.
    #[error("invalid geometry")]
    Geometry(#[from] GeometryError),

    /// The target flow is negative or not a number.
    #[error("invalid target flow {target:?}")]
    InvalidTarget {
        target: VolumeRate,
        #[source]
        source: ConstraintError,
    },

    /// The filling tolerance is not strictly positive and finite.
    #[error("invalid filling tolerance {tolerance:?}")]
    InvalidTolerance {
        tolerance: Length,
        #[source]
        source: ConstraintError,
    },

    /// No filling carries the target flow.
    #[error("target flow {target:?} exceeds pipe capacity {capacity:?}")]
    NoSolution {
        /// Requested flow.
        target: VolumeRate,

        /// Largest flow the pipe can carry at its slope.
        capacity: VolumeRate,
    },

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Best residual achieved, in SI units of the solved equation.
        residual: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
