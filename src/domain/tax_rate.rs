use super::order::Zone;
use crate::error::{Result, TaxError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects the calculation policy applied to a rate.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorKind {
    /// Percentage of the base, rounded to whole minor units.
    #[default]
    Default,
    /// Percentage of the base, left unrounded.
    Decimal,
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculatorKind::Default => f.write_str("default"),
            CalculatorKind::Decimal => f.write_str("decimal"),
        }
    }
}

/// A named rule describing how tax is computed for one category in one zone.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TaxRate {
    pub code: String,
    pub label: String,
    pub category: String,
    pub zone: Zone,
    /// Rate as a fraction of the base (0.23 for 23%).
    pub amount: Decimal,
    /// Whether the tax is already part of the displayed unit price.
    pub included_in_price: bool,
    pub calculator: CalculatorKind,
}

impl TaxRate {
    pub fn new(
        code: impl Into<String>,
        label: impl Into<String>,
        category: impl Into<String>,
        zone: Zone,
        amount: Decimal,
    ) -> Result<Self> {
        if amount < Decimal::ZERO {
            return Err(TaxError::ValidationError(
                "Tax rate amount cannot be negative".to_string(),
            ));
        }
        Ok(Self {
            code: code.into(),
            label: label.into(),
            category: category.into(),
            zone,
            amount,
            included_in_price: false,
            calculator: CalculatorKind::Default,
        })
    }

    pub fn included_in_price(mut self, included: bool) -> Self {
        self.included_in_price = included;
        self
    }

    pub fn with_calculator(mut self, calculator: CalculatorKind) -> Self {
        self.calculator = calculator;
        self
    }
}

/// Context handed to a rate resolver alongside the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionContext<'a> {
    pub zone: &'a Zone,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(zone: &'a Zone) -> Self {
        Self { zone }
    }
}
