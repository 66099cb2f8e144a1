use thiserror::Error;
use uom::si::{
    f64::Length,
    length::meter,
    ratio::{per_mille, ratio},
};

use super::{CatalogError, GeometryError, PipeGeometry, Slope, VelocityClass, nominal_pipe};

/// Filling ratio `h / d` from which the minimum slope depends on diameter only.
const SELF_CLEANSING_FILLING: f64 = 0.3;

/// Errors raised while evaluating slope limits.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SlopeError {
    /// The filling height and diameter do not describe a pipe.
    #[error("invalid geometry")]
    Geometry(#[from] GeometryError),

    /// A dry pipe has no self-cleansing slope.
    #[error("minimum slope is undefined for a dry pipe")]
    DryPipe,

    /// The diameter is missing from the pipe catalog.
    #[error("catalog lookup failed")]
    Catalog(#[from] CatalogError),
}

/// Permissible range of bottom slopes for a pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeBounds {
    /// Self-cleansing minimum slope.
    pub minimum: Slope,

    /// Velocity-limited maximum slope.
    pub maximum: Slope,
}

impl SlopeBounds {
    /// Returns `true` if `slope` lies within the bounds, inclusive.
    #[must_use]
    pub fn contains(&self, slope: Slope) -> bool {
        self.minimum <= slope && slope <= self.maximum
    }
}

/// Minimum bottom slope that keeps the pipe self-cleansing.
///
/// From a filling ratio of 0.3 upwards the minimum slope is `1/d` ‰ with `d`
/// in metres. Below it, the slope is `0.25/Rh` ‰ with the hydraulic radius in
/// metres. The rule is discontinuous at `h/d = 0.3`.
///
/// # Errors
///
/// Returns [`SlopeError::DryPipe`] for an empty pipe, whose hydraulic radius is zero.
pub fn minimum_slope(geometry: &PipeGeometry) -> Result<Slope, SlopeError> {
    if geometry.filling_ratio().get::<ratio>() >= SELF_CLEANSING_FILLING {
        return Ok(Slope::from_per_mille_unchecked(
            1.0 / geometry.diameter().get::<meter>(),
        ));
    }

    let rh = geometry.cross_section().hydraulic_radius.get::<meter>();
    if rh <= 0.0 {
        return Err(SlopeError::DryPipe);
    }
    Ok(Slope::from_per_mille_unchecked(0.25 / rh))
}

/// Maximum bottom slope for a nominal diameter and velocity class.
///
/// The values are tabulated, not computed, so only catalog diameters are accepted.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownDiameter`] if `diameter` is not in the catalog.
pub fn maximum_slope(diameter: Length, class: VelocityClass) -> Result<Slope, CatalogError> {
    Ok(nominal_pipe(diameter)?.max_slope(class))
}

/// Minimum and maximum slope for a filled pipe.
///
/// # Errors
///
/// Returns a [`SlopeError`] if either limit cannot be determined.
pub fn slope_bounds(geometry: &PipeGeometry, class: VelocityClass) -> Result<SlopeBounds, SlopeError> {
    let minimum = minimum_slope(geometry)?;
    let maximum = maximum_slope(geometry.diameter(), class)?;
    tracing::trace!(
        minimum = minimum.get::<per_mille>(),
        maximum = maximum.get::<per_mille>(),
        "slope bounds"
    );
    Ok(SlopeBounds { minimum, maximum })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn geometry(d: f64, h: f64) -> PipeGeometry {
        PipeGeometry::new(Length::new::<meter>(d), Length::new::<meter>(h)).unwrap()
    }

    #[test]
    fn upper_branch_depends_on_diameter() {
        let slope = minimum_slope(&geometry(0.2, 0.1)).unwrap();
        assert_relative_eq!(slope.get::<per_mille>(), 5.0, max_relative = 1e-12);

        let slope = minimum_slope(&geometry(0.5, 0.5)).unwrap();
        assert_relative_eq!(slope.get::<per_mille>(), 2.0, max_relative = 1e-12);
    }

    #[test]
    fn lower_branch_uses_hydraulic_radius() {
        let pipe = geometry(0.2, 0.04);
        let rh = pipe.cross_section().hydraulic_radius.get::<meter>();

        let slope = minimum_slope(&pipe).unwrap();
        assert_relative_eq!(slope.get::<per_mille>(), 0.25 / rh, max_relative = 1e-12);
    }

    #[test]
    fn discontinuity_at_threshold() {
        let d = 0.2;
        let below = minimum_slope(&geometry(d, 0.299 * d)).unwrap();
        let at = minimum_slope(&geometry(d, 0.3 * d)).unwrap();

        assert_relative_eq!(at.get::<per_mille>(), 1.0 / d, max_relative = 1e-12);
        assert!(below.get::<per_mille>() > 7.0, "got {:?}", below);
        assert!(below.get::<per_mille>() - at.get::<per_mille>() > 2.0);
    }

    #[test]
    fn dry_pipe_has_no_minimum() {
        assert_eq!(minimum_slope(&geometry(0.3, 0.0)), Err(SlopeError::DryPipe));
    }

    #[test]
    fn maximum_from_catalog() {
        let max = maximum_slope(Length::new::<meter>(0.2), VelocityClass::ConcreteOrCeramic);
        assert_relative_eq!(max.unwrap().get::<per_mille>(), 82.8, max_relative = 1e-12);

        let max = maximum_slope(
            Length::new::<meter>(0.5),
            VelocityClass::ReinforcedConcreteOrCastIron,
        );
        assert_relative_eq!(max.unwrap().get::<per_mille>(), 67.5, max_relative = 1e-12);

        assert!(matches!(
            maximum_slope(Length::new::<meter>(0.45), VelocityClass::StormOrCombined),
            Err(CatalogError::UnknownDiameter(_))
        ));
    }

    #[test]
    fn bounds() {
        let bounds = slope_bounds(&geometry(0.3, 0.15), VelocityClass::ConcreteOrCeramic).unwrap();

        assert_relative_eq!(bounds.minimum.get::<per_mille>(), 1.0 / 0.3, max_relative = 1e-12);
        assert_relative_eq!(bounds.maximum.get::<per_mille>(), 47.7, max_relative = 1e-12);
        assert!(bounds.contains(Slope::per_mille(10.0).unwrap()));
        assert!(!bounds.contains(Slope::per_mille(2.0).unwrap()));
        assert!(!bounds.contains(Slope::per_mille(50.0).unwrap()));

        assert!(matches!(
            slope_bounds(&geometry(0.35, 0.2), VelocityClass::ConcreteOrCeramic),
            Err(SlopeError::Catalog(_))
        ));
    }
}
