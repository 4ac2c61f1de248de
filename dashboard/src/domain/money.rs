//! Currency amounts typed by users and rendered back to them.
//!
//! Amounts are exact decimals end to end; nothing is accumulated in binary
//! floating point.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Validation errors returned by [`Amount::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountValidationError {
    /// Nothing was typed.
    Empty,
    /// The input is not a plain decimal number.
    NotANumber,
    /// The amount is zero.
    Zero,
    /// The amount is negative; direction is carried by the transaction kind.
    Negative,
}

impl fmt::Display for AmountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "amount must not be empty"),
            Self::NotANumber => write!(f, "amount must be a decimal number"),
            Self::Zero => write!(f, "amount must not be zero"),
            Self::Negative => write!(f, "amount must be positive"),
        }
    }
}

impl std::error::Error for AmountValidationError {}

/// Positive currency amount.
///
/// # Examples
/// ```
/// use dashboard::domain::Amount;
/// use rust_decimal::Decimal;
///
/// let amount = Amount::parse("10,50").unwrap();
/// assert_eq!(amount.value(), Decimal::new(1050, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Parse user input, accepting `.` or `,` as the decimal separator.
    pub fn parse(input: &str) -> Result<Self, AmountValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AmountValidationError::Empty);
        }
        let normalized = trimmed.replacen(',', ".", 1);
        let plain = normalized
            .chars()
            .enumerate()
            .all(|(index, ch)| ch.is_ascii_digit() || ch == '.' || (index == 0 && ch == '-'));
        if !plain {
            return Err(AmountValidationError::NotANumber);
        }
        let value =
            Decimal::from_str(&normalized).map_err(|_| AmountValidationError::NotANumber)?;
        Self::try_from(value)
    }

    /// Exact decimal value.
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.is_zero() {
            return Err(AmountValidationError::Zero);
        }
        if value.is_sign_negative() {
            return Err(AmountValidationError::Negative);
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Render a value as Brazilian reais, e.g. `R$ 1.234,56`.
///
/// The separator after the symbol is a no-break space, matching what
/// browsers produce for the `pt-BR` locale.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let fixed = format!("{:.2}", rounded.abs());
    let (integer, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}R$\u{a0}{},{cents}", group_thousands(integer))
}

fn group_thousands(digits: &str) -> String {
    let reversed: Vec<char> = digits.chars().rev().collect();
    let groups: Vec<String> = reversed
        .chunks(3)
        .map(|chunk| chunk.iter().rev().collect())
        .collect();
    groups.into_iter().rev().collect::<Vec<_>>().join(".")
}
