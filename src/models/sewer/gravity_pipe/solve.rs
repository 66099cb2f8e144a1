//! Inverse solves on a gravity pipe.
//!
//! Flow is a transcendental function of the filling height, so the filling
//! that carries a target flow is found by bisection. Flow increases with
//! filling only up to the pipe capacity near the crown, so the capacity is
//! located first and bounds the search.

mod config;
mod error;
mod problem;

pub use config::SolveConfig;
pub use error::SolveError;

use twine_solvers::equation::bisection;
use uom::{
    ConstZero,
    si::{f64::VolumeRate, length::meter},
};

use crate::support::{
    constraint::{Constrained, NonNegative},
    pipe::FlowState,
};

use super::GravityPipe;

use problem::{FlowTarget, PeakFlow};

/// Finds the filling with the largest flow.
///
/// Bisects on the stationarity condition of Manning flow over the upper half
/// of the pipe, where the maximum always lies.
///
/// # Errors
///
/// Returns [`SolveError`] for an invalid tolerance, or if the bisection fails
/// or hits the iteration limit.
pub(super) fn capacity(pipe: &GravityPipe, config: &SolveConfig) -> Result<FlowState, SolveError> {
    config.validate()?;
    let d = pipe.diameter().get::<meter>();

    // The bracket lies inside the pipe, so every evaluation succeeds.
    let solution = bisection::solve(
        pipe,
        &PeakFlow,
        [0.5 * d, d],
        &config.peak_bisection(),
        |_: &bisection::Event<'_, _, _>| None,
    )?;

    if solution.status != bisection::Status::Converged {
        tracing::warn!(iters = solution.iters, "capacity search hit iteration limit");
        return Err(SolveError::MaxIters {
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    Ok(solution.snapshot.output)
}

/// Finds the lowest filling at which the pipe carries `target`.
///
/// # Errors
///
/// Returns [`SolveError::NoSolution`] if the target exceeds the pipe capacity,
/// or another [`SolveError`] if the bisection fails.
pub(super) fn filling_for_flow(
    pipe: &GravityPipe,
    target: Constrained<VolumeRate, NonNegative>,
    config: &SolveConfig,
) -> Result<FlowState, SolveError> {
    config.validate()?;
    let target = target.into_inner();

    if target == VolumeRate::ZERO {
        return Ok(pipe.dry());
    }

    let peak = capacity(pipe, config)?;
    if target > peak.flow_rate {
        tracing::debug!(
            target = ?target,
            capacity = ?peak.flow_rate,
            "target flow exceeds pipe capacity"
        );
        return Err(SolveError::NoSolution {
            target,
            capacity: peak.flow_rate,
        });
    }

    let solution = bisection::solve(
        pipe,
        &FlowTarget::new(target),
        [0.0, peak.filling().get::<meter>()],
        &config.flow_bisection(),
        |_: &bisection::Event<'_, _, _>| None,
    )?;

    if solution.status != bisection::Status::Converged {
        tracing::warn!(iters = solution.iters, "filling solve hit iteration limit");
        return Err(SolveError::MaxIters {
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    let state = solution.snapshot.output;
    tracing::debug!(
        target = ?target,
        filling = ?state.filling(),
        iters = solution.iters,
        "solved filling for target flow"
    );
    Ok(state)
}
