//! Free functions over raw quantities.
//!
//! Each function validates its inputs and evaluates a concrete pipe with the
//! default Manning roughness. Use [`GravityPipe`] directly to reuse a pipe or
//! to choose another roughness.

use uom::si::f64::{Length, Ratio, Velocity, VolumeRate};

use crate::support::{
    constraint::NonNegative,
    pipe::{
        self, CatalogError, CrossSection, GeometryError, ManningRoughness, PipeGeometry, Slope,
        SlopeError, VelocityClass,
    },
};

use super::{GravityPipe, SolveConfig, SolveError};

/// Computes the wetted cross-section at a filling height.
///
/// # Errors
///
/// Returns a [`GeometryError`] if the diameter is not strictly positive or the
/// filling lies outside `[0, diameter]`.
pub fn cross_section(filling: Length, diameter: Length) -> Result<CrossSection, GeometryError> {
    Ok(PipeGeometry::new(diameter, filling)?.cross_section())
}

/// Computes the wetted area as a fraction of the full area.
///
/// # Errors
///
/// Returns a [`GeometryError`] for an invalid geometry.
pub fn filling_percentage(filling: Length, diameter: Length) -> Result<Ratio, GeometryError> {
    Ok(PipeGeometry::new(diameter, filling)?.filling_percentage())
}

/// Computes the mean flow velocity of a concrete pipe.
///
/// # Errors
///
/// Returns a [`GeometryError`] for an invalid geometry.
pub fn velocity(filling: Length, diameter: Length, slope: Slope) -> Result<Velocity, GeometryError> {
    let section = cross_section(filling, diameter)?;
    Ok(pipe::velocity(&section, slope, ManningRoughness::concrete()))
}

/// Computes the flow rate of a concrete pipe.
///
/// # Errors
///
/// Returns a [`GeometryError`] for an invalid geometry.
pub fn flow(filling: Length, diameter: Length, slope: Slope) -> Result<VolumeRate, GeometryError> {
    let section = cross_section(filling, diameter)?;
    Ok(pipe::flow_rate(&section, slope, ManningRoughness::concrete()))
}

/// Finds the filling height at which a concrete pipe carries `flow`.
///
/// The result is within `tolerance` of the lowest filling that carries the
/// flow.
///
/// # Errors
///
/// Returns [`SolveError::InvalidTarget`] for a negative flow,
/// [`SolveError::InvalidTolerance`] unless `tolerance` is positive and finite,
/// [`SolveError::NoSolution`] if the flow exceeds the pipe capacity, or
/// another [`SolveError`] for an invalid diameter or a failed solve.
pub fn solve_filling_for_flow(
    flow: VolumeRate,
    diameter: Length,
    slope: Slope,
    tolerance: Length,
) -> Result<Length, SolveError> {
    let target =
        NonNegative::new(flow).map_err(|source| SolveError::InvalidTarget { target: flow, source })?;
    let pipe = GravityPipe::new(diameter, slope)?;

    let state = pipe.filling_for_flow(target, &SolveConfig::with_tolerance(tolerance))?;
    Ok(state.filling())
}

/// Returns the self-cleansing minimum slope at a filling height.
///
/// # Errors
///
/// Returns a [`SlopeError`] for an invalid geometry or a dry pipe.
pub fn minimum_slope(filling: Length, diameter: Length) -> Result<Slope, SlopeError> {
    pipe::minimum_slope(&PipeGeometry::new(diameter, filling)?)
}

/// Returns the catalog maximum slope for a nominal diameter.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownDiameter`] for a non-nominal diameter.
pub fn maximum_slope(diameter: Length, class: VelocityClass) -> Result<Slope, CatalogError> {
    pipe::maximum_slope(diameter, class)
}
