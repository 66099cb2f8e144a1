use thiserror::Error;
use uom::si::{
    f64::{Length, Ratio, Velocity},
    length::{meter, millimeter},
    ratio::ratio,
    velocity::meter_per_second,
};

use super::Slope;

/// Errors raised by catalog lookups.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CatalogError {
    /// The diameter is not one of the nominal catalog diameters.
    #[error("no nominal pipe with diameter {0:?}")]
    UnknownDiameter(Length),

    /// The velocity is not one of the catalog velocity classes (3, 5 or 7 m/s).
    #[error("no velocity class for {0} m/s")]
    UnknownVelocityClass(f64),
}

/// Maximum permissible full-pipe velocity, which depends on pipe material and use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VelocityClass {
    /// 3.0 m/s: household and industrial sewers in concrete or ceramic pipes.
    ConcreteOrCeramic,

    /// 5.0 m/s: household and industrial sewers in reinforced concrete or cast iron pipes.
    ReinforcedConcreteOrCastIron,

    /// 7.0 m/s: rainwater and combined sewers regardless of material, which
    /// only run with significant filling periodically.
    StormOrCombined,
}

impl VelocityClass {
    /// All classes, slowest first.
    pub const ALL: [Self; 3] = [
        Self::ConcreteOrCeramic,
        Self::ReinforcedConcreteOrCastIron,
        Self::StormOrCombined,
    ];

    /// Returns the velocity limit of this class.
    #[must_use]
    pub fn max_velocity(self) -> Velocity {
        Velocity::new::<meter_per_second>(self.meters_per_second())
    }

    /// Finds the class whose velocity limit equals `velocity`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownVelocityClass`] if no class matches.
    pub fn from_max_velocity(velocity: Velocity) -> Result<Self, CatalogError> {
        let v = velocity.get::<meter_per_second>();
        Self::ALL
            .into_iter()
            .find(|class| (class.meters_per_second() - v).abs() < 1e-9)
            .ok_or(CatalogError::UnknownVelocityClass(v))
    }

    fn meters_per_second(self) -> f64 {
        match self {
            Self::ConcreteOrCeramic => 3.0,
            Self::ReinforcedConcreteOrCastIron => 5.0,
            Self::StormOrCombined => 7.0,
        }
    }

    fn column(self) -> usize {
        match self {
            Self::ConcreteOrCeramic => 0,
            Self::ReinforcedConcreteOrCastIron => 1,
            Self::StormOrCombined => 2,
        }
    }
}

/// Converts a velocity limit in m/s (3, 5 or 7).
impl TryFrom<u8> for VelocityClass {
    type Error = CatalogError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Self::ConcreteOrCeramic),
            5 => Ok(Self::ReinforcedConcreteOrCastIron),
            7 => Ok(Self::StormOrCombined),
            other => Err(CatalogError::UnknownVelocityClass(f64::from(other))),
        }
    }
}

/// Standard nominal sewer pipe diameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NominalDiameter {
    Dn200,
    Dn250,
    Dn300,
    Dn400,
    Dn500,
    Dn600,
    Dn800,
    Dn1000,
    Dn1500,
    Dn2000,
}

impl NominalDiameter {
    /// All nominal diameters, smallest first.
    pub const ALL: [Self; 10] = [
        Self::Dn200,
        Self::Dn250,
        Self::Dn300,
        Self::Dn400,
        Self::Dn500,
        Self::Dn600,
        Self::Dn800,
        Self::Dn1000,
        Self::Dn1500,
        Self::Dn2000,
    ];

    /// Returns the nominal size in millimetres.
    #[must_use]
    pub fn millimeters(self) -> u16 {
        match self {
            Self::Dn200 => 200,
            Self::Dn250 => 250,
            Self::Dn300 => 300,
            Self::Dn400 => 400,
            Self::Dn500 => 500,
            Self::Dn600 => 600,
            Self::Dn800 => 800,
            Self::Dn1000 => 1000,
            Self::Dn1500 => 1500,
            Self::Dn2000 => 2000,
        }
    }

    /// Returns the diameter as a length.
    #[must_use]
    pub fn diameter(self) -> Length {
        Length::new::<millimeter>(f64::from(self.millimeters()))
    }

    /// Finds the nominal diameter equal to `diameter`.
    ///
    /// The match is exact up to unit conversion round-off; there is no
    /// rounding to the nearest size.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownDiameter`] if `diameter` is not a nominal size.
    pub fn from_diameter(diameter: Length) -> Result<Self, CatalogError> {
        let mm = diameter.get::<millimeter>();
        Self::ALL
            .into_iter()
            .find(|dn| (f64::from(dn.millimeters()) - mm).abs() < 1e-6)
            .ok_or(CatalogError::UnknownDiameter(diameter))
    }
}

/// A catalog row: a nominal pipe and its design limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NominalPipe {
    nominal: NominalDiameter,
    max_slopes: [f64; 3],
}

impl NominalPipe {
    /// Returns the nominal diameter of this row.
    #[must_use]
    pub fn nominal(&self) -> NominalDiameter {
        self.nominal
    }

    /// Returns the pipe diameter.
    #[must_use]
    pub fn diameter(&self) -> Length {
        self.nominal.diameter()
    }

    /// Returns the maximum permissible bottom slope for a velocity class.
    ///
    /// At this slope a completely full pipe reaches the class velocity limit.
    #[must_use]
    pub fn max_slope(&self, class: VelocityClass) -> Slope {
        Slope::from_per_mille_unchecked(self.max_slopes[class.column()])
    }

    /// Returns the default maximum filling ratio `h / d` for this diameter.
    #[must_use]
    pub fn default_max_filling(&self) -> Ratio {
        max_filling_ratio(self.diameter())
    }

    /// Returns the default velocity limit, that of concrete and ceramic pipes.
    #[must_use]
    pub fn default_max_velocity(&self) -> Velocity {
        VelocityClass::ConcreteOrCeramic.max_velocity()
    }
}

/// Maximum bottom slopes in ‰ for the 3, 5 and 7 m/s velocity classes.
static CATALOG: [NominalPipe; 10] = [
    row(NominalDiameter::Dn200, [82.8, 230.0, 450.8]),
    row(NominalDiameter::Dn250, [60.3, 167.5, 328.3]),
    row(NominalDiameter::Dn300, [47.7, 132.5, 259.7]),
    row(NominalDiameter::Dn400, [32.4, 90.0, 176.4]),
    row(NominalDiameter::Dn500, [24.3, 67.5, 132.3]),
    row(NominalDiameter::Dn600, [18.9, 52.5, 102.9]),
    row(NominalDiameter::Dn800, [13.5, 37.5, 73.5]),
    row(NominalDiameter::Dn1000, [9.9, 27.5, 53.9]),
    row(NominalDiameter::Dn1500, [5.6, 15.6, 30.6]),
    row(NominalDiameter::Dn2000, [3.8, 10.6, 20.9]),
];

const fn row(nominal: NominalDiameter, max_slopes: [f64; 3]) -> NominalPipe {
    NominalPipe {
        nominal,
        max_slopes,
    }
}

/// Returns every row of the nominal pipe catalog, smallest diameter first.
#[must_use]
pub fn catalog() -> &'static [NominalPipe] {
    &CATALOG
}

/// Looks up the catalog row for a diameter.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownDiameter`] if `diameter` is not a nominal size.
pub fn nominal_pipe(diameter: Length) -> Result<&'static NominalPipe, CatalogError> {
    let nominal = NominalDiameter::from_diameter(diameter)?;
    CATALOG
        .iter()
        .find(|pipe| pipe.nominal == nominal)
        .ok_or(CatalogError::UnknownDiameter(diameter))
}

/// Default maximum filling ratio `h / d` for a pipe diameter.
///
/// Small pipes must keep more air above the water: 0.60 up to 0.3 m,
/// 0.70 up to 0.5 m, 0.75 up to 0.9 m and 0.80 for larger pipes.
#[must_use]
pub fn max_filling_ratio(diameter: Length) -> Ratio {
    // Nominal sizes sit exactly on the band edges; allow for unit round-off.
    let d = diameter.get::<meter>() - 1e-9;
    let value = if d <= 0.3 {
        0.6
    } else if d <= 0.5 {
        0.7
    } else if d <= 0.9 {
        0.75
    } else {
        0.8
    };
    Ratio::new::<ratio>(value)
}
