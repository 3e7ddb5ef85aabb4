// Display denominations and plain-text amount formatting
//
// Amounts are integer base units (1 SKULL = 100,000,000). Formatting never
// goes through floats and never localises digits.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Longest digit string `parse` accepts; more would overflow 63 bits.
pub const MAX_PARSE_DIGITS: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Unit {
    #[serde(rename = "SKULL")]
    Skull,
    #[serde(rename = "mSKULL")]
    MilliSkull,
    #[serde(rename = "μSKULL")]
    MicroSkull,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    #[error("empty amount")]
    Empty,
    #[error("more than one decimal point")]
    MultipleDots,
    #[error("more than {0} decimal places")]
    ExcessPrecision(u32),
    #[error("amount has more than 18 digits")]
    TooManyDigits,
    #[error("invalid digit in amount")]
    InvalidDigit,
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

impl Unit {
    pub const ALL: [Unit; 3] = [Unit::Skull, Unit::MilliSkull, Unit::MicroSkull];

    pub fn name(self) -> &'static str {
        match self {
            Unit::Skull => "SKULL",
            Unit::MilliSkull => "mSKULL",
            Unit::MicroSkull => "μSKULL",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Unit::Skull => "SkullCashs",
            Unit::MilliSkull => "Milli-SkullCashs (1 / 1,000)",
            Unit::MicroSkull => "Micro-SkullCashs (1 / 1,000,000)",
        }
    }

    /// Base units per one of this unit.
    pub fn factor(self) -> i64 {
        match self {
            Unit::Skull => 100_000_000,
            Unit::MilliSkull => 100_000,
            Unit::MicroSkull => 100,
        }
    }

    pub fn decimals(self) -> u32 {
        match self {
            Unit::Skull => 8,
            Unit::MilliSkull => 5,
            Unit::MicroSkull => 2,
        }
    }

    /// Integer digits of the whole money supply in this unit, no separators.
    pub fn amount_digits(self) -> u32 {
        match self {
            Unit::Skull => 8,
            Unit::MilliSkull => 11,
            Unit::MicroSkull => 14,
        }
    }

    /// `123.45`-style text. Trailing zeros are trimmed but two decimals
    /// always remain. `plus` prefixes positive amounts with `+`.
    pub fn format(self, amount: i64, plus: bool) -> String {
        let coin = self.factor() as u64;
        let abs = amount.unsigned_abs();
        let quotient = abs / coin;
        let remainder = abs % coin;

        let mut frac = format!("{:0width$}", remainder, width = self.decimals() as usize);
        while frac.len() > 2 && frac.ends_with('0') {
            frac.pop();
        }

        let sign = if amount < 0 {
            "-"
        } else if plus && amount > 0 {
            "+"
        } else {
            ""
        };
        format!("{}{}.{}", sign, quotient, frac)
    }

    pub fn format_with_unit(self, amount: i64, plus: bool) -> String {
        format!("{} {}", self.format(amount, plus), self.name())
    }

    /// Parses user text into base units. Only digits and one optional dot.
    pub fn parse(self, text: &str) -> Result<i64, UnitError> {
        if text.is_empty() {
            return Err(UnitError::Empty);
        }
        let mut parts = text.split('.');
        let whole = parts.next().unwrap_or("");
        let frac = parts.next().unwrap_or("");
        if parts.next().is_some() {
            return Err(UnitError::MultipleDots);
        }

        let decimals = self.decimals();
        if frac.len() > decimals as usize {
            return Err(UnitError::ExcessPrecision(decimals));
        }

        let digits = format!("{}{:0<width$}", whole, frac, width = decimals as usize);
        if digits.len() > MAX_PARSE_DIGITS {
            return Err(UnitError::TooManyDigits);
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UnitError::InvalidDigit);
        }
        digits.parse::<i64>().map_err(|_| UnitError::InvalidDigit)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SKULL" | "skull" => Ok(Unit::Skull),
            "mSKULL" | "mskull" => Ok(Unit::MilliSkull),
            "μSKULL" | "uSKULL" | "uskull" => Ok(Unit::MicroSkull),
            other => Err(UnitError::UnknownUnit(other.to_string())),
        }
    }
}
