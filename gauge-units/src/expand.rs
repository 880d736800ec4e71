//! Derived-unit expansion and prefix extraction
//!
//! Turns a unit string into a [`UnitExpression`]: atomic tokens ready for
//! dimensional matching plus the prefixes and constants that only scale
//! the result.

use serde::Serialize;
use tracing::trace;
use crate::constant::Constant;
use crate::derived;
use crate::dimension::{Category, Dimension};
use crate::error::ConversionError;
use crate::parse::{join, tokenize, Token};
use crate::prefix::Prefix;

/// Number of substitution passes before leftovers are treated as atomic
pub const EXPANSION_PASSES: usize = 5;

/// One side of a conversion after full expansion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitExpression {
    pub source: String,
    /// Atomic tokens in expansion order
    pub tokens: Vec<Token>,
    /// Prefixes with their sign (true = denominator)
    pub prefixes: Vec<(Prefix, bool)>,
    /// Constants with their sign (true = denominator)
    pub constants: Vec<(Constant, bool)>,
}

impl UnitExpression {
    /// Tokenize, expand derived units and split off prefixes
    pub fn parse(source: &str) -> Result<Self, ConversionError> {
        let mut tokens = tokenize(source)?;
        let mut constants = Vec::new();

        for pass in 1..=EXPANSION_PASSES {
            let (expanded, changed) = expand_pass(&tokens, &mut constants)?;
            tokens = expanded;
            if !changed {
                break;
            }
            trace!("{}: pass {} -> {}", source, pass, join(&tokens));
        }

        let (standalone, tokens): (Vec<Token>, Vec<Token>) = tokens
            .into_iter()
            .partition(|t| Prefix::from_symbol(&t.symbol).is_some());

        let prefixes = standalone
            .iter()
            .filter_map(|t| Prefix::from_symbol(&t.symbol).map(|p| (p, t.inverted)))
            .collect();

        Ok(UnitExpression {
            source: source.to_string(),
            tokens,
            prefixes,
            constants,
        })
    }

    /// Combined factor of all prefixes and constants
    pub fn scale(&self) -> f64 {
        let prefixes = self.prefixes.iter().map(|(p, inv)| signed(p.factor(), *inv));
        let constants = self.constants.iter().map(|(c, inv)| signed(c.value(), *inv));
        prefixes.chain(constants).product()
    }

    /// Exactly one numerator token with no prefix or constant
    pub fn is_simple(&self) -> bool {
        self.prefixes.is_empty()
            && self.constants.is_empty()
            && matches!(self.tokens.as_slice(), [token] if !token.inverted)
    }

    /// Net category exponents
    pub fn dimension(&self) -> Result<Dimension, ConversionError> {
        self.tokens.iter().try_fold(Dimension::DIMENSIONLESS, |acc, token| {
            let category = Category::of(&token.symbol)
                .ok_or_else(|| ConversionError::UnknownUnit(token.symbol.clone()))?;
            Ok(acc.multiply(&Dimension::of(category, token.inverted)))
        })
    }
}

fn signed(factor: f64, inverted: bool) -> f64 {
    if inverted { 1.0 / factor } else { factor }
}

/// Expand every token one level; reports whether anything changed
fn expand_pass(
    tokens: &[Token],
    constants: &mut Vec<(Constant, bool)>,
) -> Result<(Vec<Token>, bool), ConversionError> {
    let mut expanded = Vec::with_capacity(tokens.len());
    let mut changed = false;

    for token in tokens {
        if is_terminal(&token.symbol) {
            expanded.push(token.clone());
            continue;
        }

        if let Some(unit) = derived::lookup(&token.symbol) {
            if let Some(constant) = unit.constant {
                constants.push((constant, token.inverted));
            }
            let parts = tokenize(unit.expansion)?;
            expanded.extend(parts.into_iter().map(|t| if token.inverted { t.inverse() } else { t }));
            changed = true;
            continue;
        }

        if let Some((prefix, rest)) = split_prefix(&token.symbol)? {
            expanded.push(Token::new(prefix.symbol(), token.inverted));
            expanded.push(Token::new(rest, token.inverted));
            changed = true;
            continue;
        }

        // Unknown symbols stay and fail at classification
        expanded.push(token.clone());
    }

    Ok((expanded, changed))
}

/// Atomic unit or standalone prefix
fn is_terminal(symbol: &str) -> bool {
    Category::of(symbol).is_some() || Prefix::from_symbol(symbol).is_some()
}

/// Atomic or derived unit
fn is_known(symbol: &str) -> bool {
    Category::of(symbol).is_some() || derived::lookup(symbol).is_some()
}

/// Split an attached prefix off a symbol like `kJ` or `mm`
fn split_prefix(symbol: &str) -> Result<Option<(Prefix, &str)>, ConversionError> {
    if let Some(split) = Prefix::splits(symbol).find(|(_, rest)| is_known(rest)) {
        return Ok(Some(split));
    }

    let stacked = Prefix::splits(symbol)
        .any(|(_, rest)| Prefix::splits(rest).any(|(_, inner)| is_known(inner)));
    if stacked {
        return Err(ConversionError::AmbiguousPrefix(symbol.to_string()));
    }

    Ok(None)
}
