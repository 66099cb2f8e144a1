//! Steady uniform flow in a circular gravity sewer.
//!
//! [`GravityPipe`] fixes a diameter, a bottom slope and a Manning roughness.
//! As a [`twine_core::Model`] it maps a filling height to the resulting
//! [`FlowState`]. It also answers the inverse question, which filling carries
//! a given flow, and checks a design against the slope and filling limits.
//!
//! The [`functional`] module exposes the same calculations as free functions
//! over raw quantities.
//!
//! # Example
//!
//! ```
//! use sewer_models::models::sewer::gravity_pipe::{GravityPipe, SolveConfig};
//! use sewer_models::support::{constraint::NonNegative, pipe::Slope};
//! use uom::si::{
//!     f64::{Length, VolumeRate},
//!     length::{meter, millimeter},
//!     volume_rate::liter_per_second,
//! };
//!
//! let pipe = GravityPipe::new(Length::new::<millimeter>(200.0), Slope::per_mille(20.0).unwrap())
//!     .unwrap();
//!
//! let target = NonNegative::new(VolumeRate::new::<liter_per_second>(15.630_840_181)).unwrap();
//! let state = pipe.filling_for_flow(target, &SolveConfig::default()).unwrap();
//!
//! assert!((state.filling().get::<meter>() - 0.08).abs() < 1e-8);
//! ```

mod design;
pub mod functional;
mod solve;

pub use design::{DesignCheck, DesignError, DesignViolation};
pub use solve::{SolveConfig, SolveError};

use twine_core::Model;
use uom::{
    ConstZero,
    si::f64::{Length, VolumeRate},
};

use crate::support::{
    constraint::{Constrained, NonNegative},
    pipe::{
        CatalogError, FlowState, GeometryError, ManningRoughness, PipeGeometry, Slope, SlopeError,
        VelocityClass, maximum_slope, minimum_slope,
    },
};

/// A circular pipe run flowing partially full under gravity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityPipe {
    diameter: Length,
    slope: Slope,
    roughness: ManningRoughness,
}

impl GravityPipe {
    /// Creates a concrete pipe with the given diameter and bottom slope.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDiameter`] if the diameter is not strictly positive.
    pub fn new(diameter: Length, slope: Slope) -> Result<Self, GeometryError> {
        PipeGeometry::empty(diameter)?;
        Ok(Self {
            diameter,
            slope,
            roughness: ManningRoughness::default(),
        })
    }

    /// Replaces the Manning roughness coefficient.
    #[must_use]
    pub fn with_roughness(self, roughness: ManningRoughness) -> Self {
        Self { roughness, ..self }
    }

    /// Returns the pipe diameter.
    #[must_use]
    pub fn diameter(&self) -> Length {
        self.diameter
    }

    /// Returns the bottom slope.
    #[must_use]
    pub fn slope(&self) -> Slope {
        self.slope
    }

    /// Returns the Manning roughness coefficient.
    #[must_use]
    pub fn roughness(&self) -> ManningRoughness {
        self.roughness
    }

    /// Evaluates the flow at a filling height.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if the filling is negative or exceeds the diameter.
    pub fn at_filling(&self, filling: Length) -> Result<FlowState, GeometryError> {
        let geometry = PipeGeometry::new(self.diameter, filling)?;
        Ok(FlowState::new(geometry, self.slope, self.roughness))
    }

    /// Evaluates the flow with the pipe running completely full.
    #[must_use]
    pub fn full(&self) -> FlowState {
        let geometry = PipeGeometry::new_unchecked(self.diameter, self.diameter);
        FlowState::new(geometry, self.slope, self.roughness)
    }

    /// Finds the largest flow the pipe can carry.
    ///
    /// The maximum occurs slightly below the crown, at about 94 % of the
    /// diameter, and exceeds the full-pipe flow by roughly 7.6 %.
    ///
    /// # Errors
    ///
    /// Returns a [`SolveError`] if the search does not converge.
    pub fn capacity(&self, config: &SolveConfig) -> Result<FlowState, SolveError> {
        solve::capacity(self, config)
    }

    /// Finds the filling height at which the pipe carries `target`.
    ///
    /// Flow rises with filling up to the [capacity](Self::capacity) and then
    /// falls slightly towards the full-pipe value, so the lowest filling that
    /// carries the target is returned.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::NoSolution`] if the target exceeds the capacity,
    /// or another [`SolveError`] if the bisection does not converge.
    pub fn filling_for_flow(
        &self,
        target: Constrained<VolumeRate, NonNegative>,
        config: &SolveConfig,
    ) -> Result<FlowState, SolveError> {
        solve::filling_for_flow(self, target, config)
    }

    /// Returns the self-cleansing minimum slope at a filling height.
    ///
    /// # Errors
    ///
    /// Returns a [`SlopeError`] for an invalid filling or a dry pipe.
    pub fn minimum_slope(&self, filling: Length) -> Result<Slope, SlopeError> {
        minimum_slope(&PipeGeometry::new(self.diameter, filling)?)
    }

    /// Returns the catalog maximum slope for this diameter.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownDiameter`] for a non-nominal diameter.
    pub fn maximum_slope(&self, class: VelocityClass) -> Result<Slope, CatalogError> {
        maximum_slope(self.diameter, class)
    }

    /// Tabulates the flow from an empty to a full pipe.
    ///
    /// Yields `steps + 1` states at filling ratios `k / steps`; the last state
    /// is exactly full. A `steps` of zero is treated as one.
    pub fn filling_sweep(&self, steps: usize) -> impl Iterator<Item = FlowState> + use<> {
        let pipe = *self;
        let steps = steps.max(1);
        (0..=steps).map(move |k| {
            #[allow(clippy::cast_precision_loss)]
            let fraction = k as f64 / steps as f64;
            let filling = if k == steps {
                pipe.diameter
            } else {
                pipe.diameter * fraction
            };
            let geometry = PipeGeometry::new_unchecked(pipe.diameter, filling);
            FlowState::new(geometry, pipe.slope, pipe.roughness)
        })
    }

    /// Checks a design flow against the filling, slope and velocity limits.
    ///
    /// # Errors
    ///
    /// Returns a [`DesignError`] if the filling cannot be solved or a limit
    /// cannot be determined, for example for a non-nominal diameter.
    pub fn check_design(
        &self,
        flow: Constrained<VolumeRate, NonNegative>,
        class: VelocityClass,
        config: &SolveConfig,
    ) -> Result<DesignCheck, DesignError> {
        design::check_design(self, flow, class, config)
    }

    /// Evaluates the empty pipe.
    fn dry(&self) -> FlowState {
        FlowState::new(
            PipeGeometry::new_unchecked(self.diameter, Length::ZERO),
            self.slope,
            self.roughness,
        )
    }
}

impl Model for GravityPipe {
    type Input = Length;
    type Output = FlowState;
    type Error = GeometryError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.at_filling(*input)
    }
}
