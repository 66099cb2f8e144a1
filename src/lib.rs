//! # Sewer Models
//!
//! Hydraulic models of gravity sewers for [Twine](https://github.com/isentropic-dev/twine).
//!
//! The crate computes steady uniform flow in partially filled circular pipes
//! with Manning's formula, solves the filling height that carries a design
//! flow, and checks a pipe against the self-cleansing and velocity-limited
//! slope rules of a nominal pipe catalog.
//!
//! ## Crate layout
//!
//! - [`models`]: [`twine_core::Model`] implementations, starting with
//!   [`GravityPipe`](models::sewer::gravity_pipe::GravityPipe).
//! - [`support`]: The closed-form hydraulics and catalog data the models use.
//!
//! Modules in [`support`] are public because they're useful on their own, but
//! their APIs are not stable.

pub mod models;
pub mod support;
