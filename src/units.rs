//! Linear units of drawing coordinates.

use crate::math::Real;

/// A linear unit, as declared by the `$INSUNITS` header variable of DXF drawings.
///
/// # Example
///
/// ```
/// use planar_topology::math::Point;
/// use planar_topology::topology::RawSegment;
/// use planar_topology::units::LinearUnit;
///
/// let unit = LinearUnit::from_insunits(4);
/// assert_eq!(unit, LinearUnit::Millimeters);
///
/// let wall = RawSegment::unlabeled(Point::new(0.0, 0.0), Point::new(2500.0, 0.0));
/// let wall = wall.scaled(unit.scale_to_meters());
/// assert_eq!(wall.segment.b, Point::new(2.5, 0.0));
/// ```
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LinearUnit {
    /// No unit declared. Coordinates are kept as they are.
    #[default]
    Unitless,
    /// Inches.
    Inches,
    /// Feet.
    Feet,
    /// Miles.
    Miles,
    /// Millimeters.
    Millimeters,
    /// Centimeters.
    Centimeters,
    /// Meters.
    Meters,
    /// Kilometers.
    Kilometers,
    /// Microinches.
    Microinches,
    /// Thousandths of an inch.
    Mils,
    /// Yards.
    Yards,
    /// Angstroms.
    Angstroms,
    /// Nanometers.
    Nanometers,
    /// Microns.
    Microns,
    /// Decimeters.
    Decimeters,
    /// Decameters.
    Decameters,
    /// Hectometers.
    Hectometers,
    /// Gigameters.
    Gigameters,
    /// Astronomical units.
    AstronomicalUnits,
    /// Light years.
    LightYears,
    /// Parsecs.
    Parsecs,
    /// US survey feet.
    UsSurveyFeet,
    /// US survey inches.
    UsSurveyInches,
    /// US survey yards.
    UsSurveyYards,
    /// US survey miles.
    UsSurveyMiles,
}

impl LinearUnit {
    /// The unit of an `$INSUNITS` code. Unknown codes are unitless.
    pub fn from_insunits(code: i32) -> Self {
        match code {
            1 => LinearUnit::Inches,
            2 => LinearUnit::Feet,
            3 => LinearUnit::Miles,
            4 => LinearUnit::Millimeters,
            5 => LinearUnit::Centimeters,
            6 => LinearUnit::Meters,
            7 => LinearUnit::Kilometers,
            8 => LinearUnit::Microinches,
            9 => LinearUnit::Mils,
            10 => LinearUnit::Yards,
            11 => LinearUnit::Angstroms,
            12 => LinearUnit::Nanometers,
            13 => LinearUnit::Microns,
            14 => LinearUnit::Decimeters,
            15 => LinearUnit::Decameters,
            16 => LinearUnit::Hectometers,
            17 => LinearUnit::Gigameters,
            18 => LinearUnit::AstronomicalUnits,
            19 => LinearUnit::LightYears,
            20 => LinearUnit::Parsecs,
            21 => LinearUnit::UsSurveyFeet,
            22 => LinearUnit::UsSurveyInches,
            23 => LinearUnit::UsSurveyYards,
            24 => LinearUnit::UsSurveyMiles,
            _ => LinearUnit::Unitless,
        }
    }

    /// The factor converting a length in this unit to meters.
    ///
    /// Unitless drawings are assumed to already be in meters.
    pub fn scale_to_meters(self) -> Real {
        match self {
            LinearUnit::Unitless => 1.0,
            LinearUnit::Inches => 0.0254,
            LinearUnit::Feet => 0.3048,
            LinearUnit::Miles => 1609.344,
            LinearUnit::Millimeters => 1.0e-3,
            LinearUnit::Centimeters => 1.0e-2,
            LinearUnit::Meters => 1.0,
            LinearUnit::Kilometers => 1.0e3,
            LinearUnit::Microinches => 2.54e-8,
            LinearUnit::Mils => 2.54e-5,
            LinearUnit::Yards => 0.9144,
            LinearUnit::Angstroms => 1.0e-10,
            LinearUnit::Nanometers => 1.0e-9,
            LinearUnit::Microns => 1.0e-6,
            LinearUnit::Decimeters => 0.1,
            LinearUnit::Decameters => 10.0,
            LinearUnit::Hectometers => 100.0,
            LinearUnit::Gigameters => 1.0e9,
            LinearUnit::AstronomicalUnits => 1.495_978_707e11,
            LinearUnit::LightYears => 9.460_730_472_580_8e15,
            LinearUnit::Parsecs => 3.085_677_581_49e16,
            LinearUnit::UsSurveyFeet => 1200.0 / 3937.0,
            LinearUnit::UsSurveyInches => 100.0 / 3937.0,
            LinearUnit::UsSurveyYards => 3600.0 / 3937.0,
            LinearUnit::UsSurveyMiles => 6_336_000.0 / 3937.0,
        }
    }
}
