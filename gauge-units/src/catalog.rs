//! Vocabulary listing

use serde::Serialize;
use crate::constant::Constant;
use crate::derived;
use crate::dimension::Category;
use crate::expand::UnitExpression;
use crate::prefix::Prefix;
use crate::ratio;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomicEntry {
    pub symbol: &'static str,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedEntry {
    pub symbol: &'static str,
    pub name: &'static str,
    pub definition: String,
    pub dimension: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixEntry {
    pub symbol: &'static str,
    pub name: &'static str,
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantEntry {
    pub name: &'static str,
    pub value: f64,
}

/// Every unit, prefix and constant the engine understands
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    pub atomic: Vec<AtomicEntry>,
    pub derived: Vec<DerivedEntry>,
    pub prefixes: Vec<PrefixEntry>,
    pub constants: Vec<ConstantEntry>,
}

impl Catalog {
    /// Atomic units of one category
    pub fn atomic_in(&self, category: Category) -> impl Iterator<Item = &AtomicEntry> {
        self.atomic.iter().filter(move |entry| entry.category == category)
    }
}

fn derived_entry(unit: &derived::DerivedUnit) -> DerivedEntry {
    let definition = match unit.constant {
        Some(constant) => format!("{} {}", constant.value(), unit.expansion),
        None => unit.expansion.to_string(),
    };
    let dimension = UnitExpression::parse(unit.symbol)
        .and_then(|expr| expr.dimension())
        .ok()
        .map(|dim| dim.to_string());

    DerivedEntry { symbol: unit.symbol, name: unit.name, definition, dimension }
}

pub fn catalog() -> Catalog {
    let atomic = Category::ALL
        .into_iter()
        .flat_map(|category| {
            ratio::members(category)
                .iter()
                .map(move |symbol| AtomicEntry { symbol: *symbol, category })
        })
        .collect();

    let derived = derived::all().iter().map(derived_entry).collect();

    let prefixes = Prefix::ALL
        .into_iter()
        .map(|p| PrefixEntry { symbol: p.symbol(), name: p.name(), factor: p.factor() })
        .collect();

    let constants = Constant::ALL
        .into_iter()
        .map(|c| ConstantEntry { name: c.name(), value: c.value() })
        .collect();

    Catalog { atomic, derived, prefixes, constants }
}
