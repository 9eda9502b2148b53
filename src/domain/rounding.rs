use crate::error::{Result, TaxError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// How a calculated tax amount is converted into whole minor currency units.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum RoundingPolicy {
    /// Half away from zero: 0.5 becomes 1, -0.5 becomes -1.
    #[default]
    HalfUp,
    /// Banker's rounding: 0.5 becomes 0, 1.5 becomes 2.
    HalfEven,
    /// Drops the fraction, rounding toward zero.
    Truncate,
}

impl RoundingPolicy {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingPolicy::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingPolicy::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingPolicy::Truncate => RoundingStrategy::ToZero,
        }
    }

    /// Rounds `amount` to an integer number of minor units.
    pub fn to_minor_units(self, amount: Decimal) -> Result<i64> {
        amount
            .round_dp_with_strategy(0, self.strategy())
            .to_i64()
            .ok_or(TaxError::AmountOverflow(amount))
    }
}

impl FromStr for RoundingPolicy {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "half-up" => Ok(RoundingPolicy::HalfUp),
            "half-even" => Ok(RoundingPolicy::HalfEven),
            "truncate" => Ok(RoundingPolicy::Truncate),
            other => Err(TaxError::ValidationError(format!(
                "Unknown rounding policy '{other}', expected half-up, half-even or truncate"
            ))),
        }
    }
}
