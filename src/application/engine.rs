use super::applicator::OrderItemUnitsTaxesApplicator;
use super::processor::OrderTaxesProcessor;
use crate::domain::order::{Order, Zone};
use crate::domain::ports::{SharedAdjustmentFactory, SharedTaxCalculator, TaxRateStoreBox};
use crate::domain::rounding::RoundingPolicy;
use crate::domain::tax_rate::TaxRate;
use crate::error::Result;
use crate::infrastructure::adjustment_factory::DefaultAdjustmentFactory;
use crate::infrastructure::calculators::DelegatingCalculator;
use crate::infrastructure::resolver::ZoneTaxRateResolver;
use std::sync::Arc;
use tracing::debug;

/// The main entry point for taxing orders.
///
/// `TaxationEngine` owns the rate store and the calculation strategies.
/// Each order is taxed against a snapshot of the rates stored at the time
/// it is processed.
pub struct TaxationEngine {
    rate_store: TaxRateStoreBox,
    calculator: SharedTaxCalculator,
    adjustment_factory: SharedAdjustmentFactory,
    rounding: RoundingPolicy,
    default_zone: Option<Zone>,
}

impl TaxationEngine {
    /// Creates a new `TaxationEngine` using the delegating calculator and
    /// half-up rounding.
    ///
    /// # Arguments
    ///
    /// * `rate_store` - The store holding the configured tax rates.
    pub fn new(rate_store: TaxRateStoreBox) -> Self {
        Self {
            rate_store,
            calculator: Arc::new(DelegatingCalculator::default()),
            adjustment_factory: Arc::new(DefaultAdjustmentFactory),
            rounding: RoundingPolicy::default(),
            default_zone: None,
        }
    }

    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_default_zone(mut self, zone: Option<Zone>) -> Self {
        self.default_zone = zone;
        self
    }

    pub async fn register_rate(&self, rate: TaxRate) -> Result<()> {
        debug!(code = %rate.code, zone = %rate.zone, "registering tax rate");
        self.rate_store.store(rate).await
    }

    /// Recomputes the tax adjustments of `order` against the rates stored for
    /// its zone.
    pub async fn process_order(&self, order: &mut Order) -> Result<()> {
        let rates = match order.tax_zone_or(self.default_zone.as_ref()) {
            Some(zone) => self.rate_store.find_by_zone(&zone).await?,
            None => Vec::new(),
        };
        let applicator = OrderItemUnitsTaxesApplicator::new(
            self.calculator.clone(),
            self.adjustment_factory.clone(),
            Arc::new(ZoneTaxRateResolver::new(rates)),
        )
        .with_rounding(self.rounding);

        OrderTaxesProcessor::new(applicator, self.default_zone.clone()).process(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderItem, Variant};
    use crate::domain::tax_rate::CalculatorKind;
    use crate::infrastructure::in_memory::InMemoryTaxRateStore;
    use rust_decimal_macros::dec;

    fn order(zone: &str) -> Order {
        let mut order = Order::new(1).with_tax_zone(Zone::new(zone));
        order.add_item(OrderItem::new(
            Variant::new("BOOK", Some("reduced".to_string())),
            333,
            1,
        ));
        order
    }

    #[tokio::test]
    async fn test_engine_processes_with_stored_rates() {
        let engine = TaxationEngine::new(Box::new(InMemoryTaxRateStore::new()));
        engine
            .register_rate(
                TaxRate::new("pl_reduced", "VAT 23%", "reduced", Zone::new("PL"), dec!(0.23))
                    .unwrap(),
            )
            .await
            .unwrap();

        let mut order = order("PL");
        engine.process_order(&mut order).await.unwrap();

        assert_eq!(order.tax_total().unwrap(), 77);
    }

    #[tokio::test]
    async fn test_engine_picks_up_new_rates() {
        let engine = TaxationEngine::new(Box::new(InMemoryTaxRateStore::new()));
        let mut order = order("PL");

        engine.process_order(&mut order).await.unwrap();
        assert_eq!(order.tax_total().unwrap(), 0);

        engine
            .register_rate(
                TaxRate::new("pl_reduced", "VAT 8%", "reduced", Zone::new("PL"), dec!(0.08))
                    .unwrap(),
            )
            .await
            .unwrap();
        engine.process_order(&mut order).await.unwrap();
        assert_eq!(order.tax_total().unwrap(), 27);
    }

    #[tokio::test]
    async fn test_engine_rounding_with_decimal_calculator() {
        let engine = TaxationEngine::new(Box::new(InMemoryTaxRateStore::new()))
            .with_rounding(RoundingPolicy::Truncate);
        engine
            .register_rate(
                TaxRate::new("pl_reduced", "VAT 23%", "reduced", Zone::new("PL"), dec!(0.23))
                    .unwrap()
                    .with_calculator(CalculatorKind::Decimal),
            )
            .await
            .unwrap();

        let mut order = order("PL");
        engine.process_order(&mut order).await.unwrap();

        // 333 * 0.23 = 76.59, truncated
        assert_eq!(order.tax_total().unwrap(), 76);
    }

    #[tokio::test]
    async fn test_engine_loads_rates_of_the_order_zone() {
        let engine = TaxationEngine::new(Box::new(InMemoryTaxRateStore::new()))
            .with_default_zone(Some(Zone::new("DE")));
        let rates = [("de_reduced", "DE", dec!(0.07)), ("pl_reduced", "PL", dec!(0.23))];
        for (code, zone, amount) in rates {
            let rate = TaxRate::new(code, "VAT", "reduced", Zone::new(zone), amount).unwrap();
            engine.register_rate(rate).await.unwrap();
        }

        let mut pl = order("PL");
        engine.process_order(&mut pl).await.unwrap();
        assert_eq!(pl.tax_total().unwrap(), 77);

        let mut unzoned = order("PL");
        unzoned.tax_zone = None;
        engine.process_order(&mut unzoned).await.unwrap();
        assert_eq!(unzoned.tax_total().unwrap(), 23);
    }
}
