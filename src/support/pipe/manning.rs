use std::ops::Deref;

use uom::si::{
    f64::{Length, Ratio, Velocity, VolumeRate},
    length::meter,
    ratio::{per_mille, ratio},
    velocity::meter_per_second,
};

use crate::support::constraint::{ConstraintResult, NonNegative, StrictlyPositive, ensure_finite};

use super::{CrossSection, PipeGeometry};

/// Bottom slope of a pipe run.
///
/// Sewer slopes are conventionally quoted in per mille (‰); a slope of
/// 20 ‰ is a fall of 2 cm per metre. The slope must be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Slope(Ratio);

impl Slope {
    /// Creates a [`Slope`] from a per-mille value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is negative, infinite or `NaN`.
    pub fn per_mille(value: f64) -> ConstraintResult<Self> {
        Self::new(Ratio::new::<per_mille>(value))
    }

    /// Creates a [`Slope`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is negative, infinite or `NaN`.
    pub fn new(quantity: Ratio) -> ConstraintResult<Self> {
        NonNegative::new(quantity)?;
        ensure_finite(quantity.get::<ratio>())?;
        Ok(Self(quantity))
    }

    /// Creates a [`Slope`] without validation.
    ///
    /// The caller must ensure the value is finite and non-negative.
    pub(crate) fn from_per_mille_unchecked(value: f64) -> Self {
        Self(Ratio::new::<per_mille>(value))
    }
}

impl Deref for Slope {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Manning roughness coefficient `n`, in s·m^-1/3.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ManningRoughness(f64);

impl ManningRoughness {
    /// Roughness of concrete sewer pipes.
    pub const CONCRETE: f64 = 0.013;

    /// Creates a roughness coefficient.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `n` is not strictly positive and finite.
    pub fn new(n: f64) -> ConstraintResult<Self> {
        let n = StrictlyPositive::new(n)?.into_inner();
        Ok(Self(ensure_finite(n)?))
    }

    /// Returns the roughness of concrete pipes, `n = 0.013`.
    #[must_use]
    pub fn concrete() -> Self {
        Self(Self::CONCRETE)
    }

    /// Returns the coefficient value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for ManningRoughness {
    fn default() -> Self {
        Self::concrete()
    }
}

/// Mean velocity from Manning's formula, `v = (1/n)·Rh^(2/3)·S^(1/2)`.
#[must_use]
pub fn velocity(section: &CrossSection, slope: Slope, roughness: ManningRoughness) -> Velocity {
    let rh = section.hydraulic_radius.get::<meter>();
    let s = slope.get::<ratio>();
    Velocity::new::<meter_per_second>(rh.powf(2.0 / 3.0) * s.sqrt() / roughness.value())
}

/// Volumetric flow through the wetted area at the Manning velocity.
#[must_use]
pub fn flow_rate(section: &CrossSection, slope: Slope, roughness: ManningRoughness) -> VolumeRate {
    section.wetted_area * velocity(section, slope, roughness)
}

/// Uniform-flow state of a partially filled pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowState {
    /// Pipe diameter and filling this state was computed for.
    pub geometry: PipeGeometry,

    /// Wetted cross-section.
    pub section: CrossSection,

    /// Mean flow velocity.
    pub velocity: Velocity,

    /// Volumetric flow rate.
    pub flow_rate: VolumeRate,
}

impl FlowState {
    /// Evaluates the steady uniform flow for a geometry and slope.
    #[must_use]
    pub fn new(geometry: PipeGeometry, slope: Slope, roughness: ManningRoughness) -> Self {
        let section = geometry.cross_section();
        let velocity = velocity(&section, slope, roughness);
        Self {
            geometry,
            section,
            velocity,
            flow_rate: section.wetted_area * velocity,
        }
    }

    /// Returns the filling height of this state.
    #[must_use]
    pub fn filling(&self) -> Length {
        self.geometry.filling()
    }
}
