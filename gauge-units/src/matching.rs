//! Dimensional matching of two unit expressions
//!
//! Both sides are classified, self-inverse pairs are cancelled, and the
//! category signatures are rebalanced until the canonically sorted atom
//! lists line up position by position. Each aligned pair then contributes
//! one direct ratio.

use std::fmt;
use serde::Serialize;
use tracing::debug;
use crate::dimension::{Category, Dimension};
use crate::error::ConversionError;
use crate::expand::UnitExpression;
use crate::parse::Token;
use crate::ratio;

/// Classified atomic token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Atom {
    pub symbol: String,
    pub inverted: bool,
    pub category: Category,
}

impl Atom {
    fn classify(token: &Token) -> Result<Atom, ConversionError> {
        let category = Category::of(&token.symbol)
            .ok_or_else(|| ConversionError::UnknownUnit(token.symbol.clone()))?;
        Ok(Atom { symbol: token.symbol.clone(), inverted: token.inverted, category })
    }

    /// Canonical order: category precedence, numerators first, then symbol
    fn sort_key(&self) -> (Category, bool, &str) {
        (self.category, self.inverted, &self.symbol)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            write!(f, "/{}", self.symbol)
        } else {
            write!(f, "{}", self.symbol)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Input,
    Output,
}

/// One rebalancing step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Repair {
    /// A cancelled `X./X` pair put back
    Restore { side: Side, symbol: String },
    /// `numerator./denominator` folded into the side's scalar
    Swap { side: Side, numerator: String, denominator: String, factor: f64 },
}

/// Aligned input/output atoms and their direct ratio
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pair {
    pub input: Atom,
    pub output: Atom,
    pub factor: f64,
}

/// Result of matching two expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alignment {
    pub pairs: Vec<Pair>,
    pub repairs: Vec<Repair>,
    pub input_fold: f64,
    pub output_fold: f64,
}

impl Alignment {
    /// Pair ratios and folds combined, without prefixes or constants
    pub fn factor(&self) -> f64 {
        let pairs: f64 = self.pairs.iter().map(|p| p.factor).product();
        self.input_fold * pairs / self.output_fold
    }
}

/// Atoms of one side during rebalancing
struct Reduced {
    side: Side,
    atoms: Vec<Atom>,
    cancelled: Vec<Atom>,
    fold: f64,
}

impl Reduced {
    /// Remove every `X` / `/X` pair, keeping one numerator copy for restoration
    fn new(side: Side, atoms: Vec<Atom>) -> Self {
        let mut removed = vec![false; atoms.len()];
        let mut cancelled = Vec::new();

        for i in 0..atoms.len() {
            if removed[i] {
                continue;
            }
            let partner = (i + 1..atoms.len()).find(|&j| {
                !removed[j]
                    && atoms[j].symbol == atoms[i].symbol
                    && atoms[j].inverted != atoms[i].inverted
            });
            if let Some(j) = partner {
                removed[i] = true;
                removed[j] = true;
                cancelled.push(Atom { inverted: false, ..atoms[i].clone() });
            }
        }

        let atoms = atoms
            .into_iter()
            .zip(removed)
            .filter(|(_, removed)| !removed)
            .map(|(atom, _)| atom)
            .collect();

        Reduced { side, atoms, cancelled, fold: 1.0 }
    }

    fn sort(&mut self) {
        self.atoms.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    }

    /// (numerators, denominators) in a category
    fn counts(&self, category: Category) -> (usize, usize) {
        self.atoms
            .iter()
            .filter(|a| a.category == category)
            .fold((0, 0), |(num, den), a| if a.inverted { (num, den + 1) } else { (num + 1, den) })
    }

    /// Put back one cancelled pair of a category
    fn restore(&mut self, category: Category) -> Option<Repair> {
        let index = self.cancelled.iter().position(|a| a.category == category)?;
        let atom = self.cancelled.remove(index);
        let symbol = atom.symbol.clone();

        self.atoms.push(Atom { inverted: true, ..atom.clone() });
        self.atoms.push(atom);

        Some(Repair::Restore { side: self.side, symbol })
    }

    /// Fold the first `/X` and the first `Y != X` of a category into the scalar
    ///
    /// Expects the atoms in canonical order.
    fn swap(&mut self, category: Category) -> Option<Repair> {
        let x = self.atoms.iter().position(|a| a.category == category && a.inverted)?;
        let y = self.atoms.iter().position(|a| {
            a.category == category && !a.inverted && a.symbol != self.atoms[x].symbol
        })?;

        let denominator = self.atoms[x].symbol.clone();
        let numerator = self.atoms[y].symbol.clone();
        let factor = ratio::table(category)?.ratio(&numerator, &denominator)?;
        self.fold *= factor;

        // remove the later index first so the earlier one stays valid
        self.atoms.remove(x.max(y));
        self.atoms.remove(x.min(y));

        Some(Repair::Swap { side: self.side, numerator, denominator, factor })
    }
}

fn classify(tokens: &[Token]) -> Result<Vec<Atom>, ConversionError> {
    tokens.iter().map(Atom::classify).collect()
}

fn incompatible(
    input: &UnitExpression,
    output: &UnitExpression,
    from_dim: Dimension,
    to_dim: Dimension,
) -> ConversionError {
    ConversionError::IncompatibleUnits {
        from: input.source.clone(),
        to: output.source.clone(),
        from_dim,
        to_dim,
    }
}

/// Ratio converting one `input` atom into the aligned `output` atom
fn pair_factor(input: &Atom, output: &Atom) -> Result<f64, ConversionError> {
    let factor = ratio::table(input.category)
        .and_then(|table| table.ratio(&input.symbol, &output.symbol))
        .ok_or_else(|| ConversionError::UnknownUnit(input.symbol.clone()))?;

    Ok(if input.inverted { 1.0 / factor } else { factor })
}

/// Align the atoms of two expressions with equal dimensions
pub fn align(input: &UnitExpression, output: &UnitExpression) -> Result<Alignment, ConversionError> {
    let from_dim = input.dimension()?;
    let to_dim = output.dimension()?;
    if from_dim != to_dim {
        return Err(incompatible(input, output, from_dim, to_dim));
    }

    let mut sides = [
        Reduced::new(Side::Input, classify(&input.tokens)?),
        Reduced::new(Side::Output, classify(&output.tokens)?),
    ];
    let mut repairs = Vec::new();

    // Each step closes the gap in one category by one, so this terminates
    loop {
        for side in sides.iter_mut() {
            side.sort();
        }

        let mismatch = Category::ALL
            .into_iter()
            .find(|c| sides[0].counts(*c) != sides[1].counts(*c));
        let Some(category) = mismatch else {
            break;
        };

        // Net exponents agree, so the side with more numerators also has
        // more denominators in this category
        let surplus = if sides[0].counts(category).0 > sides[1].counts(category).0 { 0 } else { 1 };
        let short = 1 - surplus;

        let repair = match sides[short].restore(category) {
            Some(repair) => repair,
            None => sides[surplus]
                .swap(category)
                .ok_or_else(|| incompatible(input, output, from_dim, to_dim))?,
        };
        debug!("{} -> {}: {:?}", input.source, output.source, repair);
        repairs.push(repair);
    }

    let [input_side, output_side] = sides;

    if input_side.atoms.len() != output_side.atoms.len() {
        return Err(incompatible(input, output, from_dim, to_dim));
    }

    let mut pairs = Vec::with_capacity(input_side.atoms.len());
    for (a, b) in input_side.atoms.into_iter().zip(output_side.atoms) {
        if a.category != b.category || a.inverted != b.inverted {
            return Err(incompatible(input, output, from_dim, to_dim));
        }
        let factor = pair_factor(&a, &b)?;
        pairs.push(Pair { input: a, output: b, factor });
    }

    Ok(Alignment {
        pairs,
        repairs,
        input_fold: input_side.fold,
        output_fold: output_side.fold,
    })
}
