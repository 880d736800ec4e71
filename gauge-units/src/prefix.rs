//! Metric prefixes
//!
//! A prefix is either a standalone token (`k.g`, `mi.m`) or attached to a
//! known symbol (`kg`, `mm`, `MPa`). Both forms end up in the expression's
//! prefix list as a power of ten.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Metric prefix, power of ten from 10^24 down to 10^-24
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prefix {
    Yotta,
    Zetta,
    Exa,
    Peta,
    Tera,
    Giga,
    Mega,
    Kilo,
    Hecto,
    Deca,
    Deci,
    Centi,
    Milli,
    Micro,
    Nano,
    Pico,
    Femto,
    Atto,
    Zepto,
    Yocto,
}

/// Attached spellings, longest first so `da` wins over `d`
const ATTACHED: &[(&str, Prefix)] = &[
    ("da", Prefix::Deca),
    ("mi", Prefix::Milli),
    ("mc", Prefix::Micro),
    ("yo", Prefix::Yocto),
    ("μ", Prefix::Micro),
    ("Y", Prefix::Yotta),
    ("Z", Prefix::Zetta),
    ("E", Prefix::Exa),
    ("P", Prefix::Peta),
    ("T", Prefix::Tera),
    ("G", Prefix::Giga),
    ("M", Prefix::Mega),
    ("k", Prefix::Kilo),
    ("h", Prefix::Hecto),
    ("d", Prefix::Deci),
    ("c", Prefix::Centi),
    ("m", Prefix::Milli),
    ("u", Prefix::Micro),
    ("n", Prefix::Nano),
    ("p", Prefix::Pico),
    ("f", Prefix::Femto),
    ("a", Prefix::Atto),
    ("z", Prefix::Zepto),
];

impl Prefix {
    pub const ALL: [Prefix; 20] = [
        Prefix::Yotta,
        Prefix::Zetta,
        Prefix::Exa,
        Prefix::Peta,
        Prefix::Tera,
        Prefix::Giga,
        Prefix::Mega,
        Prefix::Kilo,
        Prefix::Hecto,
        Prefix::Deca,
        Prefix::Deci,
        Prefix::Centi,
        Prefix::Milli,
        Prefix::Micro,
        Prefix::Nano,
        Prefix::Pico,
        Prefix::Femto,
        Prefix::Atto,
        Prefix::Zepto,
        Prefix::Yocto,
    ];

    /// Standalone token symbol
    ///
    /// Milli is `mi` and micro is `mc` so they never collide with the metre
    /// or with `m` in a product.
    pub fn symbol(self) -> &'static str {
        match self {
            Prefix::Yotta => "Y",
            Prefix::Zetta => "Z",
            Prefix::Exa => "E",
            Prefix::Peta => "P",
            Prefix::Tera => "T",
            Prefix::Giga => "G",
            Prefix::Mega => "M",
            Prefix::Kilo => "k",
            Prefix::Hecto => "h",
            Prefix::Deca => "da",
            Prefix::Deci => "d",
            Prefix::Centi => "c",
            Prefix::Milli => "mi",
            Prefix::Micro => "mc",
            Prefix::Nano => "n",
            Prefix::Pico => "p",
            Prefix::Femto => "f",
            Prefix::Atto => "a",
            Prefix::Zepto => "z",
            Prefix::Yocto => "yo",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Prefix::Yotta => "yotta",
            Prefix::Zetta => "zetta",
            Prefix::Exa => "exa",
            Prefix::Peta => "peta",
            Prefix::Tera => "tera",
            Prefix::Giga => "giga",
            Prefix::Mega => "mega",
            Prefix::Kilo => "kilo",
            Prefix::Hecto => "hecto",
            Prefix::Deca => "deca",
            Prefix::Deci => "deci",
            Prefix::Centi => "centi",
            Prefix::Milli => "milli",
            Prefix::Micro => "micro",
            Prefix::Nano => "nano",
            Prefix::Pico => "pico",
            Prefix::Femto => "femto",
            Prefix::Atto => "atto",
            Prefix::Zepto => "zepto",
            Prefix::Yocto => "yocto",
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            Prefix::Yotta => 1e24,
            Prefix::Zetta => 1e21,
            Prefix::Exa => 1e18,
            Prefix::Peta => 1e15,
            Prefix::Tera => 1e12,
            Prefix::Giga => 1e9,
            Prefix::Mega => 1e6,
            Prefix::Kilo => 1e3,
            Prefix::Hecto => 1e2,
            Prefix::Deca => 1e1,
            Prefix::Deci => 1e-1,
            Prefix::Centi => 1e-2,
            Prefix::Milli => 1e-3,
            Prefix::Micro => 1e-6,
            Prefix::Nano => 1e-9,
            Prefix::Pico => 1e-12,
            Prefix::Femto => 1e-15,
            Prefix::Atto => 1e-18,
            Prefix::Zepto => 1e-21,
            Prefix::Yocto => 1e-24,
        }
    }

    /// Look up a standalone prefix token
    pub fn from_symbol(symbol: &str) -> Option<Prefix> {
        Prefix::ALL.into_iter().find(|p| p.symbol() == symbol)
    }

    /// Split a leading attached prefix off `symbol`
    ///
    /// Returns every candidate split in longest-first order; the caller
    /// decides which remainder is acceptable.
    pub fn splits(symbol: &str) -> impl Iterator<Item = (Prefix, &str)> {
        ATTACHED.iter().filter_map(move |(spelling, prefix)| {
            symbol
                .strip_prefix(spelling)
                .filter(|rest| !rest.is_empty())
                .map(|rest| (*prefix, rest))
        })
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone() {
        assert_eq!(Prefix::from_symbol("k"), Some(Prefix::Kilo));
        assert_eq!(Prefix::from_symbol("mi"), Some(Prefix::Milli));
        assert_eq!(Prefix::from_symbol("mc"), Some(Prefix::Micro));
        assert_eq!(Prefix::from_symbol("da"), Some(Prefix::Deca));
        assert_eq!(Prefix::from_symbol("yo"), Some(Prefix::Yocto));
        // attached-only spellings are not standalone tokens
        assert_eq!(Prefix::from_symbol("m"), None);
        assert_eq!(Prefix::from_symbol("u"), None);
    }

    #[test]
    fn test_factors() {
        assert_eq!(Prefix::Kilo.factor(), 1000.0);
        assert_eq!(Prefix::Milli.factor(), 0.001);
        assert_eq!(Prefix::Yotta.factor(), 1e24);
        assert_eq!(Prefix::Yocto.factor(), 1e-24);
    }

    #[test]
    fn test_splits_longest_first() {
        let splits: Vec<_> = Prefix::splits("dam").collect();
        assert_eq!(splits[0], (Prefix::Deca, "m"));
        assert_eq!(splits[1], (Prefix::Deci, "am"));

        let splits: Vec<_> = Prefix::splits("mm").collect();
        assert_eq!(splits, vec![(Prefix::Milli, "m")]);

        let splits: Vec<_> = Prefix::splits("μs").collect();
        assert_eq!(splits, vec![(Prefix::Micro, "s")]);
    }

    #[test]
    fn test_splits_need_remainder() {
        assert_eq!(Prefix::splits("k").count(), 0);
    }
}
