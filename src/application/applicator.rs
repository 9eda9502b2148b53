use crate::domain::adjustment::AdjustmentKind;
use crate::domain::order::{Order, OrderItemUnit, Zone};
use crate::domain::ports::{SharedAdjustmentFactory, SharedTaxCalculator, SharedTaxRateResolver};
use crate::domain::rounding::RoundingPolicy;
use crate::domain::tax_rate::{ResolutionContext, TaxRate};
use crate::error::Result;
use tracing::debug;

/// Attaches a tax adjustment to every unit whose item has a non-zero tax.
///
/// Items whose variant resolves to no rate are skipped, as are units whose
/// tax rounds to zero. Applying twice to the same order adds a second set of
/// adjustments; callers that re-process orders clear tax adjustments first
/// (see `OrderTaxesProcessor`).
pub struct OrderItemUnitsTaxesApplicator {
    calculator: SharedTaxCalculator,
    adjustment_factory: SharedAdjustmentFactory,
    tax_rate_resolver: SharedTaxRateResolver,
    rounding: RoundingPolicy,
}

impl OrderItemUnitsTaxesApplicator {
    pub fn new(
        calculator: SharedTaxCalculator,
        adjustment_factory: SharedAdjustmentFactory,
        tax_rate_resolver: SharedTaxRateResolver,
    ) -> Self {
        Self {
            calculator,
            adjustment_factory,
            tax_rate_resolver,
            rounding: RoundingPolicy::default(),
        }
    }

    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    /// Applies taxes for `zone` to every unit of `order`.
    ///
    /// Calculator errors and unit totals that overflow are returned as-is. Units handled before the failing
    /// one keep the adjustments they received.
    pub fn apply(&self, order: &mut Order, zone: &Zone) -> Result<()> {
        let context = ResolutionContext::new(zone);

        for item in order.items_mut() {
            let Some(tax_rate) = self.tax_rate_resolver.resolve(item.variant(), &context) else {
                debug!(variant = %item.variant().code, %zone, "no tax rate resolved");
                continue;
            };

            for unit in item.units_mut() {
                let raw = self.calculator.calculate(unit.total()?, &tax_rate)?;
                let tax_amount = self.rounding.to_minor_units(raw)?;
                if tax_amount == 0 {
                    debug!(amount = %raw, "tax rounds to zero");
                    continue;
                }

                self.add_tax_adjustment(unit, tax_amount, &tax_rate);
            }
        }

        Ok(())
    }

    fn add_tax_adjustment(&self, unit: &mut OrderItemUnit, tax_amount: i64, tax_rate: &TaxRate) {
        let adjustment = self.adjustment_factory.create_with_data(
            AdjustmentKind::Tax,
            &tax_rate.label,
            tax_amount,
            tax_rate.included_in_price,
        );
        unit.add_adjustment(adjustment);
    }
}
