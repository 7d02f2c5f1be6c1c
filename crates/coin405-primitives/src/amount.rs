//! Monetary amounts.

/// An amount in base units. Negative values are never valid on the wire but
/// the signed type keeps fee arithmetic honest.
pub type Amount = i64;

/// One coin in base units.
pub const COIN: Amount = 100_000_000;
