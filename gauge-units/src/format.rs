//! Display formatting for converted values

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    /// Fixed point, six decimals
    #[default]
    Real,
    /// Scientific, two decimals
    Sci,
}

impl NumberFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            NumberFormat::Real => format!("{:.6}", value),
            NumberFormat::Sci => format!("{:.2e}", value),
        }
    }
}

impl FromStr for NumberFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "real" => Ok(NumberFormat::Real),
            "sci" => Ok(NumberFormat::Sci),
            other => Err(format!("unknown number format '{}', expected 'real' or 'sci'", other)),
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberFormat::Real => write!(f, "real"),
            NumberFormat::Sci => write!(f, "sci"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(NumberFormat::Real.format(68.0), "68.000000");
        assert_eq!(NumberFormat::Sci.format(6458.346), "6.46e3");
        assert_eq!(NumberFormat::Sci.format(0.00239), "2.39e-3");
    }

    #[test]
    fn test_parse() {
        assert_eq!("sci".parse::<NumberFormat>(), Ok(NumberFormat::Sci));
        assert_eq!(" REAL ".parse::<NumberFormat>(), Ok(NumberFormat::Real));
        assert!("hex".parse::<NumberFormat>().is_err());
    }
}
