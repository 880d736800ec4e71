//! Derived-unit dictionary
//!
//! Each derived symbol expands into a dot-expression over atomic units,
//! standalone prefixes and other derived symbols, optionally scaled by a
//! named constant. `kgf` is `9.80665 * N`, `N` is `k.g.m./s**2`.

use std::collections::HashMap;
use std::sync::LazyLock;
use serde::Serialize;
use crate::constant::Constant;

/// One dictionary entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedUnit {
    pub symbol: &'static str,
    pub name: &'static str,
    pub constant: Option<Constant>,
    pub expansion: &'static str,
}

impl DerivedUnit {
    const fn new(symbol: &'static str, name: &'static str, expansion: &'static str) -> Self {
        DerivedUnit { symbol, name, constant: None, expansion }
    }

    const fn scaled(
        symbol: &'static str,
        name: &'static str,
        constant: Constant,
        expansion: &'static str,
    ) -> Self {
        DerivedUnit { symbol, name, constant: Some(constant), expansion }
    }
}

const DEFINITIONS: &[DerivedUnit] = &[
    // Force
    DerivedUnit::new("N", "newton", "k.g.m./s**2"),
    DerivedUnit::new("lbf", "pound-force", "slug.ft./s**2"),
    DerivedUnit::new("kip", "kip", "k.lbf"),
    DerivedUnit::scaled("ozf", "ounce-force", Constant::Ozf, "lbf"),
    DerivedUnit::scaled("kgf", "kilogram-force", Constant::Kgf, "N"),
    // Energy
    DerivedUnit::new("J", "joule", "k.g.m**2./s**2"),
    DerivedUnit::scaled("cal", "calorie", Constant::Cal, "J"),
    DerivedUnit::scaled("cal15", "calorie (15 degC)", Constant::Cal15, "J"),
    DerivedUnit::scaled("cal20", "calorie (20 degC)", Constant::Cal20, "J"),
    DerivedUnit::scaled("BTU", "british thermal unit", Constant::Btu, "J"),
    DerivedUnit::scaled("erg", "erg", Constant::Erg, "J"),
    DerivedUnit::new("Wh", "watt-hour", "W.hr"),
    // Power
    DerivedUnit::new("W", "watt", "k.g.m**2./s**3"),
    DerivedUnit::scaled("hp", "metric horsepower", Constant::Hp, "W"),
    DerivedUnit::scaled("bhp", "mechanical horsepower", Constant::Bhp, "W"),
    DerivedUnit::scaled("ehp", "electrical horsepower", Constant::Ehp, "W"),
    DerivedUnit::scaled("shp", "boiler horsepower", Constant::Shp, "W"),
    // Pressure
    DerivedUnit::new("Pa", "pascal", "N./m**2"),
    DerivedUnit::new("psi", "pound per square inch", "lbf./in**2"),
    DerivedUnit::new("psf", "pound per square foot", "lbf./ft**2"),
    DerivedUnit::new("ksi", "kip per square inch", "k.psi"),
    DerivedUnit::new("ksf", "kip per square foot", "k.psf"),
    DerivedUnit::new("bar", "bar", "h.k.Pa"),
    DerivedUnit::scaled("atm", "standard atmosphere", Constant::Atm, "Pa"),
    DerivedUnit::scaled("at", "technical atmosphere", Constant::At, "Pa"),
    DerivedUnit::scaled("Torr", "torr", Constant::Torr, "Pa"),
    DerivedUnit::scaled("mmHg", "millimetre of mercury", Constant::MmHg, "Pa"),
    DerivedUnit::scaled("cmHg", "centimetre of mercury", Constant::CmHg, "Pa"),
    DerivedUnit::scaled("inHg", "inch of mercury", Constant::InHg, "Pa"),
    DerivedUnit::scaled("ftHg", "foot of mercury", Constant::FtHg, "Pa"),
    // Electrical
    DerivedUnit::new("V", "volt", "k.g.m**2./s**3./A"),
    DerivedUnit::new("ohm", "ohm", "k.g.m**2./s**3./A**2"),
    DerivedUnit::new("F", "farad", "/k./g./m**2.s**4.A**2"),
    DerivedUnit::new("C", "coulomb", "A.s"),
    DerivedUnit::new("H", "henry", "k.g.m**2./s**2./A**2"),
    DerivedUnit::new("S", "siemens", "/ohm"),
    // Frequency and velocity
    DerivedUnit::new("Hz", "hertz", "/s"),
    DerivedUnit::new("knot", "knot", "nmile./hr"),
    // Area, length and volume
    DerivedUnit::scaled("acre", "acre", Constant::Acre, "m**2"),
    DerivedUnit::scaled("barn", "barn", Constant::Barn, "m**2"),
    DerivedUnit::scaled("ha", "hectare", Constant::Hectare, "m**2"),
    DerivedUnit::new("angstrom", "angstrom", "h.p.m"),
    DerivedUnit::new("L", "litre", "d.m.d.m.d.m"),
    DerivedUnit::scaled("gal", "US gallon", Constant::Gallon, "L"),
];

static DICTIONARY: LazyLock<HashMap<&'static str, &'static DerivedUnit>> = LazyLock::new(|| {
    DEFINITIONS.iter().map(|unit| (unit.symbol, unit)).collect()
});

/// Look up a derived symbol
pub fn lookup(symbol: &str) -> Option<&'static DerivedUnit> {
    DICTIONARY.get(symbol).copied()
}

/// Every derived unit in definition order
pub fn all() -> &'static [DerivedUnit] {
    DEFINITIONS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Category;
    use crate::prefix::Prefix;

    #[test]
    fn test_lookup() {
        let n = lookup("N").unwrap();
        assert_eq!(n.expansion, "k.g.m./s**2");
        assert_eq!(n.constant, None);

        let btu = lookup("BTU").unwrap();
        assert_eq!(btu.constant, Some(Constant::Btu));
        assert!(lookup("m").is_none());
    }

    #[test]
    fn test_symbols_unique() {
        assert_eq!(DICTIONARY.len(), DEFINITIONS.len());
    }

    #[test]
    fn test_no_collision_with_atomic_or_prefix() {
        for unit in all() {
            assert!(Category::of(unit.symbol).is_none(), "{} is atomic", unit.symbol);
            assert!(Prefix::from_symbol(unit.symbol).is_none(), "{} is a prefix", unit.symbol);
        }
    }
}
