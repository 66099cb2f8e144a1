//! Hydraulics of partially filled circular pipes.
//!
//! This module provides the closed-form building blocks for steady, uniform
//! gravity flow in circular sewer pipes:
//!
//! - **Geometry**: [`PipeGeometry`] and its wetted [`CrossSection`]
//! - **Flow**: Manning's formula via [`velocity`], [`flow_rate`] and [`FlowState`]
//! - **Slope policy**: [`minimum_slope`], [`maximum_slope`], [`SlopeBounds`]
//! - **Catalog**: nominal diameters and their slope limits, see [`catalog`]
//!
//! # Example
//!
//! ```
//! use sewer_models::support::pipe::{FlowState, ManningRoughness, PipeGeometry, Slope};
//! use uom::si::{f64::Length, length::millimeter, volume_rate::liter_per_second};
//!
//! let geometry = PipeGeometry::new(
//!     Length::new::<millimeter>(200.0),
//!     Length::new::<millimeter>(80.0),
//! )
//! .unwrap();
//! let state = FlowState::new(
//!     geometry,
//!     Slope::per_mille(20.0).unwrap(),
//!     ManningRoughness::concrete(),
//! );
//!
//! let q = state.flow_rate.get::<liter_per_second>();
//! assert!((q - 15.63).abs() < 0.01);
//! ```

mod catalog;
mod geometry;
mod manning;
mod slope;

pub use catalog::{
    CatalogError, NominalDiameter, NominalPipe, VelocityClass, catalog, max_filling_ratio,
    nominal_pipe,
};
pub use geometry::{CrossSection, GeometryError, PipeGeometry};
pub use manning::{FlowState, ManningRoughness, Slope, flow_rate, velocity};
pub use slope::{SlopeBounds, SlopeError, maximum_slope, minimum_slope, slope_bounds};
