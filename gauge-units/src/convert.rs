//! Conversion entry points
//!
//! Wires tokenizing, expansion, matching and the ratio tables together.
//! Absolute temperatures between single units take the affine path; every
//! other conversion is a pure multiplier.

use serde::Serialize;
use tracing::debug;
use crate::dimension::{Category, Dimension};
use crate::error::ConversionError;
use crate::expand::UnitExpression;
use crate::matching::{align, Alignment, Pair, Repair};
use crate::parse::parse_conversion;
use crate::ratio::affine;

/// Longest accepted unit expression, in characters
pub const MAX_EXPRESSION_LEN: usize = 64;

fn check_length(expression: &str) -> Result<(), ConversionError> {
    if expression.chars().count() > MAX_EXPRESSION_LEN {
        return Err(ConversionError::ExpressionTooLong {
            expression: expression.to_string(),
            limit: MAX_EXPRESSION_LEN,
        });
    }
    Ok(())
}

fn parse_expression(expression: &str) -> Result<UnitExpression, ConversionError> {
    check_length(expression)?;
    UnitExpression::parse(expression)
}

fn parse_pair(input_unit: &str, output_unit: &str) -> Result<(UnitExpression, UnitExpression), ConversionError> {
    Ok((parse_expression(input_unit)?, parse_expression(output_unit)?))
}

/// Symbol of a lone temperature unit eligible for the affine path
fn affine_symbol(expr: &UnitExpression) -> Option<&str> {
    if !expr.is_simple() {
        return None;
    }
    let symbol = expr.tokens.first()?.symbol.as_str();
    (Category::of(symbol) == Some(Category::Temperature)).then_some(symbol)
}

/// Both sides as single absolute temperatures
fn affine_pair<'a>(input: &'a UnitExpression, output: &'a UnitExpression) -> Option<(&'a str, &'a str)> {
    Some((affine_symbol(input)?, affine_symbol(output)?))
}

fn linear(input: &UnitExpression, output: &UnitExpression) -> Result<(Alignment, f64), ConversionError> {
    let alignment = align(input, output)?;
    let ratio = input.scale() * alignment.factor() / output.scale();
    debug!("{} -> {}: ratio {}", input.source, output.source, ratio);
    Ok((alignment, ratio))
}

/// Convert `value` from `input_unit` into `output_unit`
///
/// # Examples
///
/// ```
/// use gauge_units::convert;
///
/// assert_eq!(convert(20.0, "degC", "degF").unwrap(), 68.0);
/// assert_eq!(convert(2.0, "k.g", "g").unwrap(), 2000.0);
/// assert!(convert(1.0, "m", "kg").is_err());
/// ```
pub fn convert(value: f64, input_unit: &str, output_unit: &str) -> Result<f64, ConversionError> {
    let (input, output) = parse_pair(input_unit, output_unit)?;

    if let Some((from, to)) = affine_pair(&input, &output) {
        if let Some(result) = affine(value, from, to) {
            debug!("{} -> {}: affine", from, to);
            return Ok(result);
        }
    }

    let (_, ratio) = linear(&input, &output)?;
    Ok(value * ratio)
}

/// The multiplier converting `input_unit` into `output_unit`
///
/// Temperatures are treated as differences, so `ratio("degC", "degF")` is 1.8.
pub fn ratio(input_unit: &str, output_unit: &str) -> Result<f64, ConversionError> {
    let (input, output) = parse_pair(input_unit, output_unit)?;
    linear(&input, &output).map(|(_, ratio)| ratio)
}

/// Whether the two expressions measure the same quantity
///
/// Parse errors and unknown units are still reported as errors.
pub fn compatible(input_unit: &str, output_unit: &str) -> Result<bool, ConversionError> {
    let (input, output) = parse_pair(input_unit, output_unit)?;
    match align(&input, &output) {
        Ok(_) => Ok(true),
        Err(ConversionError::IncompatibleUnits { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Net category exponents of an expression
pub fn dimension(expression: &str) -> Result<Dimension, ConversionError> {
    parse_expression(expression)?.dimension()
}

/// Convert with a `"from -> to"` string
pub fn in_units(value: f64, conversion: &str) -> Result<f64, ConversionError> {
    let (from, to) = parse_conversion(conversion)?;
    convert(value, from, to)
}

/// Step-by-step breakdown of a conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub input: UnitExpression,
    pub output: UnitExpression,
    /// Shared dimension signature, like `L M T^-2`
    pub dimension: String,
    pub pairs: Vec<Pair>,
    pub repairs: Vec<Repair>,
    pub input_scale: f64,
    pub output_scale: f64,
    pub input_fold: f64,
    pub output_fold: f64,
    /// Multiplier for differences; absolute temperatures use the offset formula
    pub ratio: f64,
    /// Absolute temperature conversion with offsets
    pub affine: bool,
}

pub fn explain(input_unit: &str, output_unit: &str) -> Result<Explanation, ConversionError> {
    let (input, output) = parse_pair(input_unit, output_unit)?;
    let affine = affine_pair(&input, &output).is_some();
    let (alignment, ratio) = linear(&input, &output)?;
    let dimension = input.dimension()?.to_string();

    Ok(Explanation {
        dimension,
        input_scale: input.scale(),
        output_scale: output.scale(),
        input_fold: alignment.input_fold,
        output_fold: alignment.output_fold,
        pairs: alignment.pairs,
        repairs: alignment.repairs,
        input,
        output,
        ratio,
        affine,
    })
}
