use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError, ConstraintResult, Sign};

/// Admits zero and positive values.
///
/// Filling heights, slopes and design flows are all non-negative: an empty
/// pipe or a zero flow is a valid design state.
///
/// ```
/// use sewer_models::support::constraint::NonNegative;
/// use uom::si::{f64::VolumeRate, volume_rate::liter_per_second};
///
/// assert!(NonNegative::new(VolumeRate::new::<liter_per_second>(12.5)).is_ok());
/// assert!(NonNegative::new(VolumeRate::new::<liter_per_second>(0.0)).is_ok());
/// assert!(NonNegative::new(VolumeRate::new::<liter_per_second>(-1.0)).is_err());
/// assert!(NonNegative::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Wraps `value` if it is zero or positive.
    ///
    /// # Errors
    ///
    /// Fails with [`ConstraintError::Negative`] or [`ConstraintError::NotANumber`].
    pub fn new<T: PartialOrd + Zero>(value: T) -> ConstraintResult<Constrained<T, Self>> {
        Constrained::new(value)
    }

    /// Zero, which needs no check.
    #[must_use]
    pub fn zero<T: PartialOrd + Zero>() -> Constrained<T, Self> {
        Constrained::accepted(T::zero())
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match Sign::of(value)? {
            Sign::Negative => Err(ConstraintError::Negative),
            Sign::Zero | Sign::Positive => Ok(()),
        }
    }
}
