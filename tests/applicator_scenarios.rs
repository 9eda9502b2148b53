use order_taxes::application::applicator::OrderItemUnitsTaxesApplicator;
use order_taxes::domain::adjustment::{Adjustment, AdjustmentKind};
use order_taxes::domain::order::{Order, OrderItem, Variant, Zone};
use order_taxes::domain::ports::{TaxCalculator, TaxRateResolver};
use order_taxes::domain::tax_rate::{ResolutionContext, TaxRate};
use order_taxes::error::Result;
use order_taxes::infrastructure::adjustment_factory::DefaultAdjustmentFactory;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Resolves a rate only for variants in the "taxed" category.
struct CategoryResolver(TaxRate);

impl TaxRateResolver for CategoryResolver {
    fn resolve(&self, variant: &Variant, _context: &ResolutionContext<'_>) -> Option<TaxRate> {
        (variant.tax_category.as_deref() == Some("taxed")).then(|| self.0.clone())
    }
}

struct FixedCalculator(Decimal);

impl TaxCalculator for FixedCalculator {
    fn calculate(&self, _base: i64, _rate: &TaxRate) -> Result<Decimal> {
        Ok(self.0)
    }
}

fn applicator(amount: Decimal) -> OrderItemUnitsTaxesApplicator {
    let rate = TaxRate::new("vat", "VAT 20%", "taxed", Zone::new("Z"), dec!(0.20)).unwrap();
    OrderItemUnitsTaxesApplicator::new(
        Arc::new(FixedCalculator(amount)),
        Arc::new(DefaultAdjustmentFactory),
        Arc::new(CategoryResolver(rate)),
    )
}

fn item(category: Option<&str>, unit_price: i64, quantity: u32) -> OrderItem {
    OrderItem::new(
        Variant::new("SKU", category.map(str::to_string)),
        unit_price,
        quantity,
    )
}

#[test]
fn test_single_unit_scenario() {
    let mut order = Order::new(1);
    order.add_item(item(Some("taxed"), 1000, 1));

    applicator(dec!(200)).apply(&mut order, &Zone::new("Z")).unwrap();

    assert_eq!(
        order.items()[0].units()[0].adjustments(),
        &[Adjustment::new(AdjustmentKind::Tax, "VAT 20%", 200, false)]
    );
}

#[test]
fn test_zero_tax_scenario() {
    let mut order = Order::new(1);
    order.add_item(item(Some("taxed"), 1000, 1));

    applicator(dec!(0)).apply(&mut order, &Zone::new("Z")).unwrap();

    assert!(order.items()[0].units()[0].adjustments().is_empty());
}

#[test]
fn test_second_item_without_rate_scenario() {
    let mut order = Order::new(1);
    order.add_item(item(Some("taxed"), 1000, 2));
    order.add_item(item(None, 1000, 2));

    applicator(dec!(200)).apply(&mut order, &Zone::new("Z")).unwrap();

    let items = order.items();
    assert!(items[0].units().iter().all(|u| u.adjustments().len() == 1));
    assert!(items[1].units().iter().all(|u| u.adjustments().is_empty()));
}

#[test]
fn test_negative_tax_is_recorded() {
    let mut order = Order::new(1);
    order.add_item(item(Some("taxed"), 1000, 1));

    applicator(dec!(-50)).apply(&mut order, &Zone::new("Z")).unwrap();

    let adjustment = &order.items()[0].units()[0].adjustments()[0];
    assert_eq!(adjustment.amount(), -50);
    assert!(!adjustment.is_neutral());
}
