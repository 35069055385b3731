use rust_decimal::Decimal;
use std::{fmt, str::FromStr};

/// What a pass does when the RPC node fails to enumerate a program or account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnumerationFailurePolicy {
    /// Drop the failing program (or account) from this pass and keep going.
    #[default]
    Skip,
    /// Fail the whole pass.
    Abort,
}

impl FromStr for EnumerationFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "abort" => Ok(Self::Abort),
            other => Err(format!("unknown enumeration failure policy: {other}")),
        }
    }
}

impl fmt::Display for EnumerationFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => f.write_str("skip"),
            Self::Abort => f.write_str("abort"),
        }
    }
}

/// Outcome of a tolerant price lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceLookup {
    Found(Decimal),
    NotFound,
}

impl PriceLookup {
    /// Unknown prices value the asset at zero.
    pub fn or_zero(self) -> Decimal {
        match self {
            Self::Found(price) => price,
            Self::NotFound => Decimal::ZERO,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}
