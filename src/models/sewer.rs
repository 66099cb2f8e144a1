//! Sewer network models.
//!
//! This module contains models for gravity sewers: pipe runs that flow
//! partially full under the pull of their bottom slope.

pub mod gravity_pipe;
