//! Unit expression tokenizer
//!
//! Expressions are dot-separated products: `m.m./s`, `BTU./lb`, `k.g.m./s**2`.
//! A token led by `/` sits in the denominator and `symbol**N` repeats the
//! symbol N times with the same sign.

use std::fmt;
use serde::Serialize;
use crate::error::ConversionError;

/// Largest exponent accepted in `symbol**N`
pub const MAX_EXPONENT: u32 = 10;

/// One signed unit symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub symbol: String,
    /// True when the token is in the denominator
    pub inverted: bool,
}

impl Token {
    pub fn new(symbol: impl Into<String>, inverted: bool) -> Self {
        Token { symbol: symbol.into(), inverted }
    }

    /// Same symbol with the opposite sign
    pub fn inverse(&self) -> Token {
        Token { symbol: self.symbol.clone(), inverted: !self.inverted }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            write!(f, "/{}", self.symbol)
        } else {
            write!(f, "{}", self.symbol)
        }
    }
}

/// Render tokens back into dot notation
pub fn join(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(".")
}

/// Split a unit expression into signed tokens, expanding exponents
///
/// Empty segments are skipped, so `./degC` is the reciprocal of `degC`.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, ConversionError> {
    let mut tokens = Vec::new();

    for segment in expression.split('.').map(str::trim).filter(|s| !s.is_empty()) {
        tokens.extend(parse_token(segment)?);
    }

    if tokens.is_empty() {
        return Err(ConversionError::malformed(expression, "empty unit expression"));
    }

    Ok(tokens)
}

/// Parse one dot-separated segment like `m`, `/s` or `/s**2`
fn parse_token(segment: &str) -> Result<Vec<Token>, ConversionError> {
    let (inverted, body) = match segment.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, segment),
    };

    if body.contains('/') {
        let reason = if segment.matches('/').count() > 1 {
            "more than one '/'"
        } else {
            "'/' must lead the token"
        };
        return Err(ConversionError::malformed(segment, reason));
    }

    let (symbol, count) = match body.split_once("**") {
        Some((symbol, exponent)) => (symbol, parse_exponent(segment, exponent)?),
        None => (body, 1),
    };

    if symbol.is_empty() {
        return Err(ConversionError::malformed(segment, "missing unit symbol"));
    }

    Ok(vec![Token::new(symbol, inverted); count])
}

fn parse_exponent(segment: &str, text: &str) -> Result<usize, ConversionError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConversionError::malformed(segment, "exponent must be a positive integer"));
    }

    // All digits, so parsing only fails on overflow
    let exponent: u64 = text.parse().unwrap_or(u64::MAX);

    if exponent == 0 {
        return Err(ConversionError::malformed(segment, "exponent must be a positive integer"));
    }
    if exponent > u64::from(MAX_EXPONENT) {
        return Err(ConversionError::ExponentTooLarge {
            token: segment.to_string(),
            exponent,
            limit: MAX_EXPONENT,
        });
    }

    Ok(exponent as usize)
}

/// Split a conversion string like `"kg -> lb"` into its two sides
///
/// Accepts `->`, `→`, ` to ` and ` in ` as separators.
pub fn parse_conversion(s: &str) -> Result<(&str, &str), ConversionError> {
    let separator = ["->", "→", " to ", " in "]
        .into_iter()
        .find(|sep| s.contains(*sep))
        .ok_or_else(|| ConversionError::InvalidConversion(s.to_string()))?;

    let parts: Vec<&str> = s.split(separator).map(str::trim).collect();

    match parts.as_slice() {
        [from, to] if !from.is_empty() && !to.is_empty() => Ok((*from, *to)),
        _ => Err(ConversionError::InvalidConversion(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(tokens: &[Token]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_simple() {
        let tokens = tokenize("m").unwrap();
        assert_eq!(tokens, vec![Token::new("m", false)]);
    }

    #[test]
    fn test_product_and_quotient() {
        let tokens = tokenize("m.m./s").unwrap();
        assert_eq!(symbols(&tokens), vec!["m", "m", "/s"]);

        let tokens = tokenize("BTU./lb").unwrap();
        assert_eq!(symbols(&tokens), vec!["BTU", "/lb"]);
    }

    #[test]
    fn test_exponent_expansion() {
        let tokens = tokenize("k.g.m./s**2").unwrap();
        assert_eq!(symbols(&tokens), vec!["k", "g", "m", "/s", "/s"]);

        let tokens = tokenize("m**10").unwrap();
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn test_leading_dot_is_reciprocal() {
        let tokens = tokenize("./degC").unwrap();
        assert_eq!(tokens, vec![Token::new("degC", true)]);
    }

    #[test]
    fn test_exponent_too_large() {
        let err = tokenize("m**11").unwrap_err();
        assert_eq!(
            err,
            ConversionError::ExponentTooLarge { token: "m**11".to_string(), exponent: 11, limit: 10 }
        );

        let err = tokenize("m**99999999999999999999999").unwrap_err();
        assert_eq!(err.code(), "EXPONENT_TOO_LARGE");
    }

    #[test]
    fn test_bad_exponent() {
        assert_eq!(tokenize("m**0").unwrap_err().code(), "MALFORMED_TOKEN");
        assert_eq!(tokenize("m**-2").unwrap_err().code(), "MALFORMED_TOKEN");
        assert_eq!(tokenize("m**x").unwrap_err().code(), "MALFORMED_TOKEN");
        assert_eq!(tokenize("m**").unwrap_err().code(), "MALFORMED_TOKEN");
    }

    #[test]
    fn test_slashes() {
        let err = tokenize("//m").unwrap_err();
        assert_eq!(err, ConversionError::malformed("//m", "more than one '/'"));

        let err = tokenize("m/s").unwrap_err();
        assert_eq!(err, ConversionError::malformed("m/s", "'/' must lead the token"));
    }

    #[test]
    fn test_missing_symbol() {
        assert_eq!(tokenize("/").unwrap_err().code(), "MALFORMED_TOKEN");
        assert_eq!(tokenize("**2").unwrap_err().code(), "MALFORMED_TOKEN");
        assert_eq!(tokenize("").unwrap_err().code(), "MALFORMED_TOKEN");
        assert_eq!(tokenize("..").unwrap_err().code(), "MALFORMED_TOKEN");
    }

    #[test]
    fn test_join() {
        let tokens = tokenize("W./m./K").unwrap();
        assert_eq!(join(&tokens), "W./m./K");
    }

    #[test]
    fn test_parse_conversion() {
        assert_eq!(parse_conversion("km->mile").unwrap(), ("km", "mile"));
        assert_eq!(parse_conversion("degC → degF").unwrap(), ("degC", "degF"));
        assert_eq!(parse_conversion("BTU./lb to kJ./kg").unwrap(), ("BTU./lb", "kJ./kg"));
        assert_eq!(parse_conversion("psi in Pa").unwrap(), ("psi", "Pa"));
    }

    #[test]
    fn test_parse_conversion_invalid() {
        assert_eq!(parse_conversion("kg lb").unwrap_err().code(), "INVALID_CONVERSION");
        assert_eq!(parse_conversion("a->b->c").unwrap_err().code(), "INVALID_CONVERSION");
        assert_eq!(parse_conversion("->lb").unwrap_err().code(), "INVALID_CONVERSION");
    }
}
