use std::f64::consts::PI;

use thiserror::Error;
use uom::{
    ConstZero,
    si::{
        f64::{Area, Length, Ratio},
        area::square_meter,
        length::meter,
        ratio::ratio,
    },
};

use crate::support::constraint::{ConstraintError, NonNegative, StrictlyPositive, ensure_finite};

/// Errors raised when a filling height and diameter do not describe a pipe.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// The diameter is zero, negative, or not a number.
    #[error("invalid pipe diameter {diameter:?}")]
    InvalidDiameter {
        diameter: Length,
        #[source]
        source: ConstraintError,
    },

    /// The filling height is negative or not a number.
    #[error("invalid filling height {filling:?}")]
    InvalidFilling {
        filling: Length,
        #[source]
        source: ConstraintError,
    },

    /// The filling height is greater than the diameter.
    #[error("filling {filling:?} exceeds pipe diameter {diameter:?}")]
    Overfilled { filling: Length, diameter: Length },
}

/// A circular pipe cross-section filled with water up to a given height.
///
/// The filling is measured from the pipe invert and always lies in
/// `0 ≤ filling ≤ diameter`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeGeometry {
    diameter: Length,
    filling: Length,
}

impl PipeGeometry {
    /// Creates a validated pipe geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if the diameter is not strictly positive
    /// and finite, the filling is negative or infinite, or the filling exceeds
    /// the diameter.
    pub fn new(diameter: Length, filling: Length) -> Result<Self, GeometryError> {
        let invalid_diameter = |source| GeometryError::InvalidDiameter { diameter, source };
        StrictlyPositive::new(diameter).map_err(invalid_diameter)?;
        ensure_finite(diameter.get::<meter>()).map_err(invalid_diameter)?;

        let invalid_filling = |source| GeometryError::InvalidFilling { filling, source };
        NonNegative::new(filling).map_err(invalid_filling)?;
        ensure_finite(filling.get::<meter>()).map_err(invalid_filling)?;

        if filling > diameter {
            return Err(GeometryError::Overfilled { filling, diameter });
        }

        Ok(Self { diameter, filling })
    }

    /// Creates a dry pipe.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if the diameter is not strictly positive.
    pub fn empty(diameter: Length) -> Result<Self, GeometryError> {
        Self::new(diameter, Length::ZERO)
    }

    /// Creates a pipe running completely full.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if the diameter is not strictly positive.
    pub fn full(diameter: Length) -> Result<Self, GeometryError> {
        Self::new(diameter, diameter)
    }

    /// Creates a geometry without validation.
    ///
    /// The caller must ensure `0 ≤ filling ≤ diameter` and `diameter > 0`.
    pub(crate) fn new_unchecked(diameter: Length, filling: Length) -> Self {
        Self { diameter, filling }
    }

    /// Returns the inner pipe diameter.
    #[must_use]
    pub fn diameter(&self) -> Length {
        self.diameter
    }

    /// Returns the filling height above the invert.
    #[must_use]
    pub fn filling(&self) -> Length {
        self.filling
    }

    /// Returns the pipe radius.
    #[must_use]
    pub fn radius(&self) -> Length {
        self.diameter / 2.0
    }

    /// Returns the height-based filling ratio `h / d`.
    #[must_use]
    pub fn filling_ratio(&self) -> Ratio {
        Ratio::new::<ratio>(self.filling.get::<meter>() / self.diameter.get::<meter>())
    }

    /// Returns the area of the full circular cross-section.
    #[must_use]
    pub fn full_area(&self) -> Area {
        let r = self.radius().get::<meter>();
        Area::new::<square_meter>(PI * r * r)
    }

    /// Returns the wetted area as a fraction of the full cross-section.
    ///
    /// This is area-based, so a pipe filled to 30 % of its height reports
    /// roughly 25 %. Read it with [`percent`](uom::si::ratio::percent).
    #[must_use]
    pub fn filling_percentage(&self) -> Ratio {
        let wetted = self.cross_section().wetted_area.get::<square_meter>();
        let full = self.full_area().get::<square_meter>();
        Ratio::new::<ratio>(wetted / full)
    }

    /// Computes the wetted cross-section using the circular-segment method.
    ///
    /// The water surface is a chord of the circle. The angle `alpha` that the
    /// chord subtends at the center follows from the law of cosines and always
    /// lies in `[0, π]`. Below the horizontal diameter the wetted part is the
    /// minor segment under the chord; above it the wetted part is the full
    /// circle minus the dry minor segment over the chord.
    #[must_use]
    pub fn cross_section(&self) -> CrossSection {
        let d = self.diameter.get::<meter>();
        let h = self.filling.get::<meter>();
        let r = d / 2.0;
        let y = h - r;

        // Round-off can push `r² - y²` slightly below zero at the invert and crown.
        let chord = 2.0 * (r * r - y * y).max(0.0).sqrt();
        let cos_alpha = (2.0 * r * r - chord * chord) / (2.0 * r * r);
        let alpha = cos_alpha.clamp(-1.0, 1.0).acos();

        let minor_segment = 0.5 * (alpha - alpha.sin()) * r * r;
        let circle = PI * r * r;

        let area = if h < r {
            minor_segment
        } else if h == r {
            circle / 2.0
        } else {
            circle - minor_segment
        };

        let perimeter = if h <= r {
            alpha * r
        } else {
            2.0 * PI * r - alpha * r
        };

        let hydraulic_radius = if perimeter > 0.0 {
            area / perimeter
        } else {
            0.0
        };

        CrossSection {
            wetted_area: Area::new::<square_meter>(area),
            wetted_perimeter: Length::new::<meter>(perimeter),
            hydraulic_radius: Length::new::<meter>(hydraulic_radius),
            surface_width: Length::new::<meter>(chord),
        }
    }
}

/// Wetted properties of a partially filled circular pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
    /// Cross-sectional area occupied by water.
    pub wetted_area: Area,

    /// Length of pipe wall in contact with water.
    pub wetted_perimeter: Length,

    /// Wetted area divided by wetted perimeter, zero for a dry pipe.
    pub hydraulic_radius: Length,

    /// Width of the free water surface (the chord at the filling height).
    pub surface_width: Length,
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{length::millimeter, ratio::percent};

    fn geometry(d: f64, h: f64) -> PipeGeometry {
        PipeGeometry::new(Length::new::<meter>(d), Length::new::<meter>(h)).unwrap()
    }

    #[test]
    fn empty_pipe_is_dry() {
        let section = PipeGeometry::empty(Length::new::<meter>(0.3))
            .unwrap()
            .cross_section();

        assert_eq!(section.wetted_area.get::<square_meter>(), 0.0);
        assert_eq!(section.wetted_perimeter.get::<meter>(), 0.0);
        assert_eq!(section.hydraulic_radius.get::<meter>(), 0.0);
        assert_eq!(section.surface_width.get::<meter>(), 0.0);
    }

    #[test]
    fn full_pipe_matches_circle() {
        for d in [0.2, 0.25, 0.5, 1.0, 2.0] {
            let pipe = PipeGeometry::full(Length::new::<meter>(d)).unwrap();
            let section = pipe.cross_section();

            assert_relative_eq!(
                section.wetted_area.get::<square_meter>(),
                PI * (d / 2.0).powi(2),
                max_relative = 1e-12
            );
            assert_relative_eq!(
                section.wetted_perimeter.get::<meter>(),
                PI * d,
                max_relative = 1e-12
            );
            assert_relative_eq!(
                section.hydraulic_radius.get::<meter>(),
                d / 4.0,
                max_relative = 1e-12
            );
            assert_relative_eq!(
                pipe.filling_percentage().get::<percent>(),
                100.0,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn half_full_is_exactly_half() {
        let pipe = geometry(0.4, 0.2);
        let section = pipe.cross_section();

        assert_eq!(pipe.filling_percentage().get::<ratio>(), 0.5);
        assert_relative_eq!(
            section.wetted_perimeter.get::<meter>(),
            PI * 0.2,
            max_relative = 1e-12
        );
        assert_relative_eq!(section.surface_width.get::<meter>(), 0.4, max_relative = 1e-12);
        assert_relative_eq!(section.hydraulic_radius.get::<meter>(), 0.1, max_relative = 1e-12);
    }

    #[test]
    fn golden_partial_filling() {
        // d = 0.2 m, h = 0.08 m: r = 0.1, y = -0.02, cos(alpha) = -0.92.
        let section = geometry(0.2, 0.08).cross_section();

        let alpha = (-0.92_f64).acos();
        let area = 0.5 * (alpha - alpha.sin()) * 0.01;
        let perimeter = alpha * 0.1;

        assert_relative_eq!(
            section.wetted_area.get::<square_meter>(),
            area,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            section.wetted_perimeter.get::<meter>(),
            perimeter,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            section.hydraulic_radius.get::<meter>(),
            area / perimeter,
            max_relative = 1e-12
        );

        assert_relative_eq!(
            section.wetted_area.get::<square_meter>(),
            0.011_734_792_265_819,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            section.hydraulic_radius.get::<meter>(),
            0.042_845_272_245_782,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            section.surface_width.get::<meter>(),
            2.0 * 0.0096_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn upper_half_is_complement_of_lower_segment() {
        let d = 0.5;
        let lower = geometry(d, 0.1).cross_section();
        let upper = geometry(d, d - 0.1).cross_section();

        assert_relative_eq!(
            lower.wetted_area.get::<square_meter>() + upper.wetted_area.get::<square_meter>(),
            PI * 0.25 * 0.25,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            lower.wetted_perimeter.get::<meter>() + upper.wetted_perimeter.get::<meter>(),
            PI * d,
            epsilon = 1e-12
        );
    }

    #[test]
    fn filling_percentage_is_area_based() {
        let pipe = geometry(1.0, 0.3);

        assert_relative_eq!(pipe.filling_ratio().get::<percent>(), 30.0, max_relative = 1e-12);
        let by_area = pipe.filling_percentage().get::<percent>();
        assert!(by_area > 24.0 && by_area < 26.0, "got {by_area}");
    }

    #[test]
    fn filling_continuous_at_crown() {
        let d = 0.8;
        let near_full = geometry(d, d - 1e-12).cross_section();
        let full = geometry(d, d).cross_section();

        assert_relative_eq!(
            near_full.wetted_area.get::<square_meter>(),
            full.wetted_area.get::<square_meter>(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn rejects_invalid_geometry() {
        let d = Length::new::<meter>(0.2);

        assert!(matches!(
            PipeGeometry::new(d, d + Length::new::<meter>(1e-9)),
            Err(GeometryError::Overfilled { .. })
        ));
        assert!(matches!(
            PipeGeometry::new(d, Length::new::<meter>(-1e-9)),
            Err(GeometryError::InvalidFilling {
                source: ConstraintError::Negative,
                ..
            })
        ));
        assert!(matches!(
            PipeGeometry::new(Length::new::<millimeter>(0.0), Length::ZERO),
            Err(GeometryError::InvalidDiameter {
                source: ConstraintError::Zero,
                ..
            })
        ));
        assert!(matches!(
            PipeGeometry::new(d, Length::new::<meter>(f64::NAN)),
            Err(GeometryError::InvalidFilling {
                source: ConstraintError::NotANumber,
                ..
            })
        ));
    }

    #[test]
    fn rejects_infinite_lengths() {
        let d = Length::new::<meter>(0.2);
        let inf = Length::new::<meter>(f64::INFINITY);

        assert!(matches!(
            PipeGeometry::new(inf, Length::new::<meter>(0.1)),
            Err(GeometryError::InvalidDiameter {
                source: ConstraintError::NotFinite,
                ..
            })
        ));
        assert!(matches!(
            PipeGeometry::new(inf, inf),
            Err(GeometryError::InvalidDiameter {
                source: ConstraintError::NotFinite,
                ..
            })
        ));
        assert!(matches!(
            PipeGeometry::new(d, inf),
            Err(GeometryError::InvalidFilling {
                source: ConstraintError::NotFinite,
                ..
            })
        ));
        assert!(matches!(
            PipeGeometry::new(Length::new::<meter>(f64::NEG_INFINITY), Length::ZERO),
            Err(GeometryError::InvalidDiameter {
                source: ConstraintError::Negative,
                ..
            })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn area_is_monotone_in_filling(
            d in 0.1_f64..2.5,
            a in 0.0_f64..=1.0,
            b in 0.0_f64..=1.0,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let diameter = Length::new::<meter>(d);
            let lower = PipeGeometry::new(diameter, diameter * lo).unwrap().cross_section();
            let upper = PipeGeometry::new(diameter, diameter * hi).unwrap().cross_section();

            let lower = lower.wetted_area.get::<square_meter>();
            let upper = upper.wetted_area.get::<square_meter>();
            prop_assert!(upper >= lower * (1.0 - 1e-12) - 1e-15);
        }

        #[test]
        fn wetted_area_never_exceeds_circle(d in 0.1_f64..2.5, f in 0.0_f64..=1.0) {
            let diameter = Length::new::<meter>(d);
            let pipe = PipeGeometry::new(diameter, diameter * f).unwrap();
            let percentage = pipe.filling_percentage().get::<ratio>();

            prop_assert!((0.0..=1.0 + 1e-12).contains(&percentage));
        }
    }
}
