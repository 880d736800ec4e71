//! Gauge Units - Compound Unit Conversion
//!
//! Converts values between unit expressions written as dot-separated
//! products of atomic symbols: `m.m./s`, `BTU./lb`, `k.g.m./s**2`.
//! Derived units are expanded into base units, both sides are checked for
//! dimensional consistency, and the result is a single multiplier (or the
//! offset formula for absolute temperatures).
//!
//! Categories:
//! - Length (m, in, ft, yd, mile, nmile)
//! - Mass (g, slug, stone, tone, lb, oz, ton, ukton)
//! - Time (s, min, hr, day, week, month, year)
//! - Temperature (K, degC, R, degF)
//! - Charge (A, el)
//!
//! Derived:
//! - Force (N, lbf, kip, ozf, kgf)
//! - Energy (J, cal, cal15, cal20, BTU, erg, Wh)
//! - Power (W, hp, bhp, ehp, shp)
//! - Pressure (Pa, psi, psf, ksi, ksf, bar, atm, at, Torr, mmHg, cmHg, inHg, ftHg)
//! - Electrical (V, ohm, F, C, H, S)
//! - Other (Hz, knot, acre, barn, ha, angstrom, L, gal)
//!
//! Prefixes attach to any known symbol (`km`, `kJ`, `MPa`) or stand alone
//! as a token (`k.g`, `mi.m`).

mod catalog;
mod constant;
mod convert;
mod derived;
mod dimension;
mod error;
mod expand;
mod format;
mod matching;
mod parse;
mod prefix;
mod ratio;

pub use catalog::{catalog, AtomicEntry, Catalog, ConstantEntry, DerivedEntry, PrefixEntry};
pub use constant::Constant;
pub use convert::{compatible, convert, dimension, explain, in_units, ratio, Explanation, MAX_EXPRESSION_LEN};
pub use derived::DerivedUnit;
pub use dimension::{Category, Dimension};
pub use error::{codes, ConversionError};
pub use expand::{UnitExpression, EXPANSION_PASSES};
pub use format::NumberFormat;
pub use matching::{Alignment, Atom, Pair, Repair, Side};
pub use parse::{join, parse_conversion, tokenize, Token, MAX_EXPONENT};
pub use prefix::Prefix;
