use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError, ConstraintResult, Sign};

/// Admits values greater than zero.
///
/// Used for pipe diameters and roughness coefficients.
///
/// ```
/// use sewer_models::support::constraint::StrictlyPositive;
/// use uom::si::{f64::Length, length::meter};
///
/// assert!(StrictlyPositive::new(Length::new::<meter>(0.2)).is_ok());
/// assert!(StrictlyPositive::new(Length::new::<meter>(0.0)).is_err());
/// assert!(StrictlyPositive::new(0.013).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Wraps `value` if it is greater than zero.
    ///
    /// # Errors
    ///
    /// Fails for zero, negative and NaN values.
    pub fn new<T: PartialOrd + Zero>(value: T) -> ConstraintResult<Constrained<T, Self>> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match Sign::of(value)? {
            Sign::Positive => Ok(()),
            Sign::Zero => Err(ConstraintError::Zero),
            Sign::Negative => Err(ConstraintError::Negative),
        }
    }
}
