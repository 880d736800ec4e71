//! Conversion errors
//!
//! Every failure is a typed value carrying the offending token or expression.
//! Nothing is retried: the engine is deterministic, so a retry would fail the
//! same way.

use thiserror::Error;
use crate::Dimension;

/// Stable machine-readable error codes
pub mod codes {
    pub const MALFORMED_TOKEN: &str = "MALFORMED_TOKEN";
    pub const EXPONENT_TOO_LARGE: &str = "EXPONENT_TOO_LARGE";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INCOMPATIBLE_UNITS: &str = "INCOMPATIBLE_UNITS";
    pub const AMBIGUOUS_PREFIX: &str = "AMBIGUOUS_PREFIX";
    pub const EXPRESSION_TOO_LONG: &str = "EXPRESSION_TOO_LONG";
    pub const INVALID_CONVERSION: &str = "INVALID_CONVERSION";
}

/// Errors that can occur while parsing or converting unit expressions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Token with more than one `/`, a misplaced `/`, a bad exponent or no symbol
    #[error("malformed unit token '{token}': {reason}")]
    MalformedToken { token: String, reason: &'static str },

    /// Exponent above the expansion limit
    #[error("exponent {exponent} in '{token}' exceeds the limit of {limit}")]
    ExponentTooLarge { token: String, exponent: u64, limit: u32 },

    /// Symbol absent from every table after full expansion
    #[error("unit not listed: {0}")]
    UnknownUnit(String),

    /// Dimensions differ, or the expressions could not be aligned
    #[error("units not equivalent: cannot convert {from} ({from_dim}) to {to} ({to_dim})")]
    IncompatibleUnits {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },

    /// Symbol only readable as a stack of prefixes
    #[error("ambiguous prefix in unit '{0}'")]
    AmbiguousPrefix(String),

    /// Expression longer than the accepted bound
    #[error("unit expression '{expression}' is longer than {limit} characters")]
    ExpressionTooLong { expression: String, limit: usize },

    /// Conversion text without a recognised `from -> to` separator
    #[error("invalid conversion format: '{0}', expected 'unit1->unit2'")]
    InvalidConversion(String),
}

impl ConversionError {
    pub(crate) fn malformed(token: &str, reason: &'static str) -> Self {
        ConversionError::MalformedToken { token: token.to_string(), reason }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::MalformedToken { .. } => codes::MALFORMED_TOKEN,
            ConversionError::ExponentTooLarge { .. } => codes::EXPONENT_TOO_LARGE,
            ConversionError::UnknownUnit(_) => codes::UNKNOWN_UNIT,
            ConversionError::IncompatibleUnits { .. } => codes::INCOMPATIBLE_UNITS,
            ConversionError::AmbiguousPrefix(_) => codes::AMBIGUOUS_PREFIX,
            ConversionError::ExpressionTooLong { .. } => codes::EXPRESSION_TOO_LONG,
            ConversionError::InvalidConversion(_) => codes::INVALID_CONVERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = ConversionError::UnknownUnit("furlong".to_string());
        assert_eq!(err.code(), "UNKNOWN_UNIT");

        let err = ConversionError::malformed("//m", "more than one '/'");
        assert_eq!(err.code(), "MALFORMED_TOKEN");
    }

    #[test]
    fn test_display() {
        let err = ConversionError::IncompatibleUnits {
            from: "m".to_string(),
            to: "g".to_string(),
            from_dim: Dimension::LENGTH,
            to_dim: Dimension::MASS,
        };
        assert_eq!(
            format!("{}", err),
            "units not equivalent: cannot convert m (L) to g (M)"
        );

        let err = ConversionError::ExponentTooLarge {
            token: "m**11".to_string(),
            exponent: 11,
            limit: 10,
        };
        assert_eq!(format!("{}", err), "exponent 11 in 'm**11' exceeds the limit of 10");
    }
}
