use super::applicator::OrderItemUnitsTaxesApplicator;
use crate::domain::adjustment::AdjustmentKind;
use crate::domain::order::{Order, Zone};
use crate::error::Result;
use tracing::debug;

/// Recomputes the taxes of an order from scratch.
///
/// Previous tax adjustments are removed before the applicator runs, so
/// processing the same order repeatedly yields the same result.
pub struct OrderTaxesProcessor {
    applicator: OrderItemUnitsTaxesApplicator,
    default_zone: Option<Zone>,
}

impl OrderTaxesProcessor {
    /// Creates a processor.
    ///
    /// # Arguments
    ///
    /// * `applicator` - Applies the per-unit tax adjustments.
    /// * `default_zone` - Zone used for orders without a tax zone of their own.
    pub fn new(applicator: OrderItemUnitsTaxesApplicator, default_zone: Option<Zone>) -> Self {
        Self {
            applicator,
            default_zone,
        }
    }

    pub fn process(&self, order: &mut Order) -> Result<()> {
        for unit in order.units_mut() {
            unit.remove_adjustments(AdjustmentKind::Tax);
        }

        if order.is_empty() {
            return Ok(());
        }

        let Some(zone) = order.tax_zone_or(self.default_zone.as_ref()) else {
            debug!(order = order.id, "no tax zone, skipping taxes");
            return Ok(());
        };

        self.applicator.apply(order, &zone)?;

        // Taxes must leave every total representable.
        order.total()?;
        Ok(())
    }
}
