//! Per-category ratio tables and the affine temperature resolver
//!
//! Each table is a square matrix over the category's units where
//! `matrix[i][j]` converts a value in unit `i` into unit `j`. Tables are
//! built once from base factors, so `matrix[i][j] * matrix[j][i] == 1`
//! within rounding and the diagonal is exactly 1.

use std::sync::LazyLock;
use crate::dimension::Category;

/// Direct conversion factors between every pair of units in one category
#[derive(Debug)]
pub struct RatioTable {
    category: Category,
    symbols: Vec<&'static str>,
    matrix: Vec<Vec<f64>>,
}

impl RatioTable {
    /// Build from each unit's size in the category's base unit
    fn from_base(category: Category, base: &[(&'static str, f64)]) -> Self {
        let symbols = base.iter().map(|(symbol, _)| *symbol).collect();
        let matrix = base
            .iter()
            .enumerate()
            .map(|(i, (_, from))| {
                base.iter()
                    .enumerate()
                    .map(|(j, (_, to))| if i == j { 1.0 } else { from / to })
                    .collect()
            })
            .collect();

        RatioTable { category, symbols, matrix }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn symbols(&self) -> &[&'static str] {
        &self.symbols
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index_of(symbol).is_some()
    }

    fn index_of(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| *s == symbol)
    }

    /// Factor converting one `from` into `to`
    pub fn ratio(&self, from: &str, to: &str) -> Option<f64> {
        let i = self.index_of(from)?;
        let j = self.index_of(to)?;
        Some(self.matrix[i][j])
    }
}

static LENGTH: LazyLock<RatioTable> = LazyLock::new(|| {
    RatioTable::from_base(Category::Length, &[
        ("m", 1.0),
        ("in", 0.0254),
        ("ft", 0.3048),
        ("yd", 0.9144),
        ("mile", 1609.344),
        ("nmile", 1852.0),
    ])
});

static MASS: LazyLock<RatioTable> = LazyLock::new(|| {
    RatioTable::from_base(Category::Mass, &[
        ("g", 1.0),
        ("slug", 14593.90294),
        ("stone", 6350.29318),
        ("tone", 1e6),
        ("lb", 453.59237),
        ("oz", 28.349523125),
        ("ton", 907184.74),
        ("ukton", 1016046.9088),
    ])
});

static TIME: LazyLock<RatioTable> = LazyLock::new(|| {
    RatioTable::from_base(Category::Time, &[
        ("s", 1.0),
        ("min", 60.0),
        ("hr", 3600.0),
        ("day", 86400.0),
        ("week", 604800.0),
        // 30 days
        ("month", 2592000.0),
        // 365 days
        ("year", 31536000.0),
    ])
});

static CHARGE: LazyLock<RatioTable> = LazyLock::new(|| {
    RatioTable::from_base(Category::Charge, &[
        ("A", 1.0),
        ("el", 1.602176634e-19),
    ])
});

/// Slope-only table for temperature differences and rates
static TEMPERATURE_VARIANCE: LazyLock<RatioTable> = LazyLock::new(|| {
    RatioTable::from_base(Category::Temperature, &[
        ("K", 1.0),
        ("degC", 1.0),
        ("R", 5.0 / 9.0),
        ("degF", 5.0 / 9.0),
    ])
});

/// Ratio table of a category, `None` for the reserved chemistry category
pub fn table(category: Category) -> Option<&'static RatioTable> {
    match category {
        Category::Length => Some(&*LENGTH),
        Category::Mass => Some(&*MASS),
        Category::Time => Some(&*TIME),
        Category::Temperature => Some(&*TEMPERATURE_VARIANCE),
        Category::Charge => Some(&*CHARGE),
        Category::Chemistry => None,
    }
}

/// Atomic symbols belonging to a category
pub fn members(category: Category) -> &'static [&'static str] {
    table(category).map(|t| t.symbols()).unwrap_or(&[])
}

/// Convert an absolute temperature reading
///
/// Returns `None` when either symbol is not a temperature unit.
pub fn affine(value: f64, from: &str, to: &str) -> Option<f64> {
    if !TEMPERATURE_VARIANCE.contains(from) || !TEMPERATURE_VARIANCE.contains(to) {
        return None;
    }
    if from == to {
        return Some(value);
    }

    let v = value;
    let result = match (from, to) {
        ("degC", "K") => v + 273.15,
        ("degC", "degF") => v * 9.0 / 5.0 + 32.0,
        ("degC", "R") => (v + 273.15) * 9.0 / 5.0,
        ("K", "degC") => v - 273.15,
        ("K", "degF") => v * 9.0 / 5.0 - 459.67,
        ("K", "R") => v * 9.0 / 5.0,
        ("degF", "degC") => (v - 32.0) * 5.0 / 9.0,
        ("degF", "K") => (v + 459.67) * 5.0 / 9.0,
        ("degF", "R") => v + 459.67,
        ("R", "degC") => v * 5.0 / 9.0 - 273.15,
        ("R", "degF") => v - 459.67,
        ("R", "K") => v * 5.0 / 9.0,
        _ => return None,
    };
    Some(result)
}
