//! Public Twine models.
//!
//! Models are the primary public interface of this crate. Each one bundles the
//! fixed parameters of a physical component and implements
//! [`twine_core::Model`], delegating the physics to [`crate::support`].
//!
//! # Organization
//!
//! Models are grouped by domain (currently only `sewer`).

pub mod sewer;
