use thiserror::Error;
use uom::si::f64::{Ratio, Velocity, VolumeRate};

use crate::support::{
    constraint::{Constrained, NonNegative},
    pipe::{FlowState, Slope, SlopeBounds, SlopeError, VelocityClass, max_filling_ratio, slope_bounds},
};

use super::{GravityPipe, SolveConfig, SolveError};

/// Errors that prevent a design check from completing.
#[derive(Debug, Error)]
pub enum DesignError {
    /// The filling for the design flow could not be solved.
    #[error("failed to solve filling for design flow")]
    Solve(#[from] SolveError),

    /// The slope limits could not be determined.
    #[error("failed to determine slope limits")]
    Slope(#[from] SlopeError),
}

/// A design limit exceeded by a pipe at its design flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DesignViolation {
    /// The filling ratio is above the permitted maximum for the diameter.
    FillingAboveLimit,

    /// The slope is too flat to keep the pipe self-cleansing.
    SlopeBelowMinimum,

    /// The slope is steeper than the catalog allows for the velocity class.
    SlopeAboveMaximum,

    /// The flow velocity exceeds the velocity class limit.
    VelocityAboveLimit,
}

/// Outcome of checking a pipe against its design limits.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignCheck {
    /// Flow state at the design flow.
    pub state: FlowState,

    /// Filling ratio `h / d` at the design flow.
    pub filling_ratio: Ratio,

    /// Permitted maximum filling ratio.
    pub max_filling: Ratio,

    /// Permitted slope range.
    pub bounds: SlopeBounds,

    /// Bottom slope of the pipe.
    pub slope: Slope,

    /// Velocity limit of the class.
    pub max_velocity: Velocity,

    /// Limits exceeded, empty for an acceptable design.
    pub violations: Vec<DesignViolation>,
}

impl DesignCheck {
    /// Returns `true` if no design limit is exceeded.
    #[must_use]
    pub fn is_acceptable(&self) -> bool {
        self.violations.is_empty()
    }
}

pub(super) fn check_design(
    pipe: &GravityPipe,
    flow: Constrained<VolumeRate, NonNegative>,
    class: VelocityClass,
    config: &SolveConfig,
) -> Result<DesignCheck, DesignError> {
    let state = pipe.filling_for_flow(flow, config)?;
    let bounds = slope_bounds(&state.geometry, class)?;

    let filling_ratio = state.geometry.filling_ratio();
    let max_filling = max_filling_ratio(pipe.diameter());
    let max_velocity = class.max_velocity();
    let slope = pipe.slope();

    let mut violations = Vec::new();
    if filling_ratio > max_filling {
        violations.push(DesignViolation::FillingAboveLimit);
    }
    if slope < bounds.minimum {
        violations.push(DesignViolation::SlopeBelowMinimum);
    }
    if slope > bounds.maximum {
        violations.push(DesignViolation::SlopeAboveMaximum);
    }
    if state.velocity > max_velocity {
        violations.push(DesignViolation::VelocityAboveLimit);
    }

    if !violations.is_empty() {
        tracing::debug!(?violations, "design limits exceeded");
    }

    Ok(DesignCheck {
        state,
        filling_ratio,
        max_filling,
        bounds,
        slope,
        max_velocity,
        violations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::{
        ConstZero,
        si::{f64::Length, length::meter, ratio::ratio, volume_rate::liter_per_second},
    };

    fn check(slope: f64, q: f64) -> Result<DesignCheck, DesignError> {
        let pipe =
            GravityPipe::new(Length::new::<meter>(0.3), Slope::per_mille(slope).unwrap()).unwrap();
        pipe.check_design(
            NonNegative::new(VolumeRate::new::<liter_per_second>(q)).unwrap(),
            VelocityClass::ConcreteOrCeramic,
            &SolveConfig::default(),
        )
    }

    #[test]
    fn acceptable_design() {
        let result = check(5.0, 20.0).unwrap();

        assert!(result.is_acceptable(), "{:?}", result.violations);
        assert_relative_eq!(result.filling_ratio.get::<ratio>(), 0.370_468, epsilon = 1e-5);
        assert_relative_eq!(result.max_filling.get::<ratio>(), 0.6);
    }

    #[test]
    fn overfilled_design() {
        let result = check(5.0, 60.0).unwrap();
        assert_eq!(result.violations, [DesignViolation::FillingAboveLimit]);
    }

    #[test]
    fn too_flat() {
        let result = check(2.0, 20.0).unwrap();
        assert_eq!(result.violations, [DesignViolation::SlopeBelowMinimum]);
    }

    #[test]
    fn too_steep() {
        let result = check(60.0, 20.0).unwrap();
        assert_eq!(result.violations, [DesignViolation::SlopeAboveMaximum]);

        // Half full, the velocity equals the full-pipe velocity of about 3.35 m/s.
        let result = check(60.0, 120.0).unwrap();
        assert_eq!(
            result.violations,
            [
                DesignViolation::SlopeAboveMaximum,
                DesignViolation::VelocityAboveLimit
            ]
        );
    }

    #[test]
    fn dry_pipe_has_no_slope_limits() {
        let pipe =
            GravityPipe::new(Length::new::<meter>(0.3), Slope::per_mille(5.0).unwrap()).unwrap();
        let result = pipe.check_design(
            NonNegative::new(VolumeRate::ZERO).unwrap(),
            VelocityClass::ConcreteOrCeramic,
            &SolveConfig::default(),
        );
        assert!(matches!(result, Err(DesignError::Slope(SlopeError::DryPipe))));
    }

    #[test]
    fn non_nominal_diameter() {
        let pipe =
            GravityPipe::new(Length::new::<meter>(0.35), Slope::per_mille(5.0).unwrap()).unwrap();
        let result = pipe.check_design(
            NonNegative::new(VolumeRate::new::<liter_per_second>(20.0)).unwrap(),
            VelocityClass::ConcreteOrCeramic,
            &SolveConfig::default(),
        );
        assert!(matches!(result, Err(DesignError::Slope(SlopeError::Catalog(_)))));
    }

    #[test]
    fn unreachable_design_flow() {
        assert!(matches!(
            check(5.0, 100.0),
            Err(DesignError::Solve(SolveError::NoSolution { .. }))
        ));
    }
}
