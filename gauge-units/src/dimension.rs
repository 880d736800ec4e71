//! Dimension categories and dimensional signatures
//!
//! Every atomic unit belongs to exactly one category. An expression's
//! dimension is the net exponent of each category:
//! [length, mass, time, temperature, charge, chemistry]

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::ratio;

/// Physical quantity measured by an atomic unit
///
/// The declaration order is the canonical sort precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Mass,
    Time,
    Temperature,
    Charge,
    /// Reserved, has no members
    Chemistry,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Length,
        Category::Mass,
        Category::Time,
        Category::Temperature,
        Category::Charge,
        Category::Chemistry,
    ];

    /// Classify an atomic symbol (no prefix, no inversion marker)
    pub fn of(symbol: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| ratio::members(*category).contains(&symbol))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Mass => "mass",
            Category::Time => "time",
            Category::Temperature => "temperature",
            Category::Charge => "charge",
            Category::Chemistry => "chemistry",
        }
    }

    /// Short symbol used in dimension signatures
    pub fn symbol(self) -> &'static str {
        match self {
            Category::Length => "L",
            Category::Mass => "M",
            Category::Time => "T",
            Category::Temperature => "Θ",
            Category::Charge => "I",
            Category::Chemistry => "N",
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Net category exponents of a unit expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    /// [length, mass, time, temperature, charge, chemistry]
    pub exponents: [i32; 6],
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension { exponents: [0, 0, 0, 0, 0, 0] };
    pub const LENGTH: Dimension = Dimension { exponents: [1, 0, 0, 0, 0, 0] };
    pub const MASS: Dimension = Dimension { exponents: [0, 1, 0, 0, 0, 0] };
    pub const TIME: Dimension = Dimension { exponents: [0, 0, 1, 0, 0, 0] };
    pub const TEMPERATURE: Dimension = Dimension { exponents: [0, 0, 0, 1, 0, 0] };
    pub const CHARGE: Dimension = Dimension { exponents: [0, 0, 0, 0, 1, 0] };

    /// Force [L M T^-2]
    pub const FORCE: Dimension = Dimension { exponents: [1, 1, -2, 0, 0, 0] };

    /// Energy [L^2 M T^-2]
    pub const ENERGY: Dimension = Dimension { exponents: [2, 1, -2, 0, 0, 0] };

    /// Power [L^2 M T^-3]
    pub const POWER: Dimension = Dimension { exponents: [2, 1, -3, 0, 0, 0] };

    /// Pressure [L^-1 M T^-2]
    pub const PRESSURE: Dimension = Dimension { exponents: [-1, 1, -2, 0, 0, 0] };

    pub fn new(exponents: [i32; 6]) -> Self {
        Dimension { exponents }
    }

    /// Dimension of a single atomic token
    pub fn of(category: Category, inverted: bool) -> Self {
        let mut exponents = [0i32; 6];
        exponents[category.index()] = if inverted { -1 } else { 1 };
        Dimension { exponents }
    }

    pub fn exponent(&self, category: Category) -> i32 {
        self.exponents[category.index()]
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        let mut result = self.exponents;
        for (r, o) in result.iter_mut().zip(other.exponents) {
            *r += o;
        }
        Dimension { exponents: result }
    }

    /// Invert dimensions (negate exponents)
    pub fn invert(&self) -> Dimension {
        Dimension { exponents: self.exponents.map(|e| -e) }
    }

    /// Name of a common quantity with this dimension
    pub fn name(&self) -> Option<&'static str> {
        match self.exponents {
            [0, 0, 0, 0, 0, 0] => Some("dimensionless"),
            [1, 0, 0, 0, 0, 0] => Some("length"),
            [0, 1, 0, 0, 0, 0] => Some("mass"),
            [0, 0, 1, 0, 0, 0] => Some("time"),
            [0, 0, 0, 1, 0, 0] => Some("temperature"),
            [0, 0, 0, 0, 1, 0] => Some("charge"),
            [2, 0, 0, 0, 0, 0] => Some("area"),
            [3, 0, 0, 0, 0, 0] => Some("volume"),
            [1, 0, -1, 0, 0, 0] => Some("velocity"),
            [1, 0, -2, 0, 0, 0] => Some("acceleration"),
            [0, 0, -1, 0, 0, 0] => Some("frequency"),
            [1, 1, -2, 0, 0, 0] => Some("force"),
            [2, 1, -2, 0, 0, 0] => Some("energy"),
            [2, 1, -3, 0, 0, 0] => Some("power"),
            [-1, 1, -2, 0, 0, 0] => Some("pressure"),
            [-3, 1, 0, 0, 0, 0] => Some("density"),
            [1, 1, -3, -1, 0, 0] => Some("thermal conductivity"),
            [0, 1, -3, -1, 0, 0] => Some("heat transfer coefficient"),
            [2, 0, -2, -1, 0, 0] => Some("specific heat"),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Category::ALL
            .into_iter()
            .filter_map(|category| match self.exponent(category) {
                0 => None,
                1 => Some(category.symbol().to_string()),
                exp => Some(format!("{}^{}", category.symbol(), exp)),
            })
            .collect();

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Category::of("m"), Some(Category::Length));
        assert_eq!(Category::of("nmile"), Some(Category::Length));
        assert_eq!(Category::of("slug"), Some(Category::Mass));
        assert_eq!(Category::of("hr"), Some(Category::Time));
        assert_eq!(Category::of("degF"), Some(Category::Temperature));
        assert_eq!(Category::of("el"), Some(Category::Charge));
        assert_eq!(Category::of("N"), None);
        assert_eq!(Category::of("kg"), None);
    }

    #[test]
    fn test_precedence() {
        let mut categories = vec![Category::Charge, Category::Time, Category::Length, Category::Temperature];
        categories.sort();
        assert_eq!(
            categories,
            vec![Category::Length, Category::Time, Category::Temperature, Category::Charge]
        );
    }

    #[test]
    fn test_force() {
        let force = Dimension::of(Category::Mass, false)
            .multiply(&Dimension::of(Category::Length, false))
            .multiply(&Dimension::of(Category::Time, true))
            .multiply(&Dimension::of(Category::Time, true));
        assert_eq!(force, Dimension::FORCE);
        assert_eq!(force.name(), Some("force"));
    }

    #[test]
    fn test_invert() {
        assert_eq!(Dimension::PRESSURE.invert().invert(), Dimension::PRESSURE);
        assert!(Dimension::LENGTH.multiply(&Dimension::LENGTH.invert()).is_dimensionless());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Dimension::DIMENSIONLESS), "1");
        assert_eq!(format!("{}", Dimension::LENGTH), "L");
        assert_eq!(format!("{}", Dimension::FORCE), "L M T^-2");
        assert_eq!(format!("{}", Dimension::new([0, 0, -1, -1, 0, 0])), "T^-1 Θ^-1");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Category::from_name("Length"), Some(Category::Length));
        assert_eq!(Category::from_name("charge"), Some(Category::Charge));
        assert_eq!(Category::from_name("volume"), None);
    }
}
