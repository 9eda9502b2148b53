use crate::domain::ports::{TaxCalculator, TaxCalculatorBox};
use crate::domain::tax_rate::{CalculatorKind, TaxRate};
use crate::error::{Result, TaxError};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

/// Tax owed on `base` under `rate`, before any rounding.
///
/// For rates included in the price the base already contains the tax, so the
/// tax part is extracted from it instead of added on top.
fn raw_tax(base: i64, rate: &TaxRate) -> Result<Decimal> {
    let base = Decimal::from(base);
    let tax = if rate.included_in_price {
        base.checked_div(Decimal::ONE + rate.amount)
            .map(|net| base - net)
    } else {
        base.checked_mul(rate.amount)
    };
    tax.ok_or_else(|| {
        TaxError::ValidationError(format!("Cannot apply rate '{}' to {}", rate.code, base))
    })
}

/// Percentage calculator rounding half away from zero to whole minor units.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCalculator;

impl TaxCalculator for DefaultCalculator {
    fn calculate(&self, base: i64, rate: &TaxRate) -> Result<Decimal> {
        let tax = raw_tax(base, rate)?;
        Ok(tax.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    }
}

/// Percentage calculator that leaves rounding to the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecimalCalculator;

impl TaxCalculator for DecimalCalculator {
    fn calculate(&self, base: i64, rate: &TaxRate) -> Result<Decimal> {
        raw_tax(base, rate)
    }
}

/// Dispatches to the calculator registered for the rate's calculator kind.
pub struct DelegatingCalculator {
    calculators: HashMap<CalculatorKind, TaxCalculatorBox>,
}

impl DelegatingCalculator {
    /// Creates an empty registry. Every calculation fails until a calculator
    /// is registered for the rate's kind.
    pub fn empty() -> Self {
        Self {
            calculators: HashMap::new(),
        }
    }

    pub fn register(mut self, kind: CalculatorKind, calculator: TaxCalculatorBox) -> Self {
        self.calculators.insert(kind, calculator);
        self
    }
}

impl Default for DelegatingCalculator {
    fn default() -> Self {
        Self::empty()
            .register(CalculatorKind::Default, Box::new(DefaultCalculator))
            .register(CalculatorKind::Decimal, Box::new(DecimalCalculator))
    }
}

impl TaxCalculator for DelegatingCalculator {
    fn calculate(&self, base: i64, rate: &TaxRate) -> Result<Decimal> {
        self.calculators
            .get(&rate.calculator)
            .ok_or(TaxError::UnsupportedCalculator(rate.calculator))?
            .calculate(base, rate)
    }
}
