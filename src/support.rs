//! Supporting utilities used by models.
//!
//! - [`constraint`]: Numeric invariants checked at construction
//! - [`pipe`]: Geometry, Manning flow and design limits of circular pipes

pub mod constraint;
pub mod pipe;
