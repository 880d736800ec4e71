//! Named scalar constants
//!
//! A constant scales a derived unit relative to its expansion, e.g. a
//! calorie is 4.184 joules. Constants carry no category and never take part
//! in dimensional matching.

use std::fmt;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constant {
    /// Standard gravity, kgf per N
    Kgf,
    /// Ounce-force per pound-force
    Ozf,
    /// Thermochemical calorie
    Cal,
    Cal15,
    Cal20,
    /// International Table BTU
    Btu,
    Erg,
    /// Metric horsepower
    Hp,
    /// Mechanical (brake) horsepower
    Bhp,
    /// Electrical horsepower
    Ehp,
    /// Boiler horsepower
    Shp,
    Acre,
    Barn,
    Hectare,
    Atm,
    /// Technical atmosphere
    At,
    Torr,
    MmHg,
    CmHg,
    InHg,
    FtHg,
    /// US liquid gallon in litres
    Gallon,
}

impl Constant {
    pub const ALL: [Constant; 22] = [
        Constant::Kgf,
        Constant::Ozf,
        Constant::Cal,
        Constant::Cal15,
        Constant::Cal20,
        Constant::Btu,
        Constant::Erg,
        Constant::Hp,
        Constant::Bhp,
        Constant::Ehp,
        Constant::Shp,
        Constant::Acre,
        Constant::Barn,
        Constant::Hectare,
        Constant::Atm,
        Constant::At,
        Constant::Torr,
        Constant::MmHg,
        Constant::CmHg,
        Constant::InHg,
        Constant::FtHg,
        Constant::Gallon,
    ];

    pub fn value(self) -> f64 {
        match self {
            Constant::Kgf => 9.80665,
            Constant::Ozf => 0.0625,
            Constant::Cal => 4.184,
            Constant::Cal15 => 4.1855,
            Constant::Cal20 => 4.182,
            Constant::Btu => 1055.05585262,
            Constant::Erg => 1e-7,
            Constant::Hp => 735.49875,
            Constant::Bhp => 745.69987,
            Constant::Ehp => 746.0,
            Constant::Shp => 9812.5,
            Constant::Acre => 4046.87261,
            Constant::Barn => 1e-28,
            Constant::Hectare => 1e4,
            Constant::Atm => 101325.0,
            Constant::At => 98066.5,
            Constant::Torr => 101325.0 / 760.0,
            Constant::MmHg => 133.322387415,
            Constant::CmHg => 1333.22387415,
            Constant::InHg => 3386.389,
            Constant::FtHg => 40636.66,
            Constant::Gallon => 3.785411784,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Constant::Kgf => "standard gravity",
            Constant::Ozf => "ounce per pound",
            Constant::Cal => "thermochemical calorie",
            Constant::Cal15 => "15 degree calorie",
            Constant::Cal20 => "20 degree calorie",
            Constant::Btu => "international BTU",
            Constant::Erg => "erg",
            Constant::Hp => "metric horsepower",
            Constant::Bhp => "mechanical horsepower",
            Constant::Ehp => "electrical horsepower",
            Constant::Shp => "boiler horsepower",
            Constant::Acre => "acre",
            Constant::Barn => "barn",
            Constant::Hectare => "hectare",
            Constant::Atm => "standard atmosphere",
            Constant::At => "technical atmosphere",
            Constant::Torr => "torr",
            Constant::MmHg => "millimetre of mercury",
            Constant::CmHg => "centimetre of mercury",
            Constant::InHg => "inch of mercury",
            Constant::FtHg => "foot of mercury",
            Constant::Gallon => "US gallon",
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.value())
    }
}
