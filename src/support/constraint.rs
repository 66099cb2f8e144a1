//! Numeric domains checked once, when a value enters the crate.
//!
//! A pipe diameter must be strictly positive; a filling height, slope or
//! design flow must not be negative. [`Constrained<T, C>`] carries a value
//! together with proof that marker `C` accepted it, so the hydraulic formulas
//! downstream never re-validate.
//!
//! Markers: [`NonNegative`] and [`StrictlyPositive`]. Both accept plain `f64`
//! and any [`uom`] quantity, since each implements [`num_traits::Zero`].

mod non_negative;
mod strictly_positive;

use std::{cmp::Ordering, marker::PhantomData};

use num_traits::Zero;
use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;

/// A rule deciding whether a value of type `T` is admissible.
pub trait Constraint<T> {
    /// Accepts or rejects `value`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] describing why `value` was rejected.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// Reason a value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value is negative")]
    Negative,
    #[error("value is zero")]
    Zero,
    #[error("value is NaN")]
    NotANumber,
    #[error("value is infinite")]
    NotFinite,
}

/// Shorthand for results whose error is a [`ConstraintError`].
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Position of a value relative to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// Classifies `value`, rejecting NaN.
    fn of<T: PartialOrd + Zero>(value: &T) -> ConstraintResult<Self> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Less) => Ok(Self::Negative),
            Some(Ordering::Equal) => Ok(Self::Zero),
            Some(Ordering::Greater) => Ok(Self::Positive),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Rejects positive and negative infinity.
///
/// NaN passes here and is left to the sign check of the marker types.
///
/// # Errors
///
/// Returns [`ConstraintError::NotFinite`] for an infinite value.
pub(crate) fn ensure_finite(value: f64) -> ConstraintResult<f64> {
    if value.is_infinite() {
        return Err(ConstraintError::NotFinite);
    }
    Ok(value)
}

/// A value accepted by constraint `C`.
///
/// ```
/// use sewer_models::support::constraint::{Constrained, StrictlyPositive};
/// use uom::si::{f64::Length, length::millimeter};
///
/// let diameter = Length::new::<millimeter>(300.0);
/// let dn = Constrained::<_, StrictlyPositive>::new(diameter).unwrap();
/// assert_eq!(dn.into_inner(), diameter);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Checks `value` against `C` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] raised by `C`.
    pub fn new(value: T) -> ConstraintResult<Self> {
        C::check(&value)?;
        Ok(Self::accepted(value))
    }

    /// Wraps a value already known to satisfy `C`.
    fn accepted(value: T) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Unwraps the checked value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
