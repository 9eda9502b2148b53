use super::adjustment::{Adjustment, AdjustmentKind};
use crate::error::{Result, TaxError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Adds minor-unit amounts, failing instead of wrapping around.
fn checked_sum(amounts: impl IntoIterator<Item = Result<i64>>) -> Result<i64> {
    amounts.into_iter().try_fold(0i64, |acc, amount| {
        let amount = amount?;
        acc.checked_add(amount)
            .ok_or_else(|| TaxError::AmountOverflow(Decimal::from(acc) + Decimal::from(amount)))
    })
}

/// A geographic or jurisdictional grouping used to select tax rates.
///
/// Zones are opaque to this crate: two zones match when their codes are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Zone(String);

impl Zone {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A purchasable product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub code: String,
    /// Code of the tax category the variant is taxed under, if any.
    pub tax_category: Option<String>,
}

impl Variant {
    pub fn new(code: impl Into<String>, tax_category: Option<String>) -> Self {
        Self {
            code: code.into(),
            tax_category,
        }
    }
}

/// One quantity increment of an order item.
///
/// Carries its own price breakdown through the adjustments attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemUnit {
    unit_price: i64,
    adjustments: Vec<Adjustment>,
}

impl OrderItemUnit {
    pub fn new(unit_price: i64) -> Self {
        Self {
            unit_price,
            adjustments: Vec::new(),
        }
    }

    /// Unit price plus every adjustment that is not already included in it.
    pub fn total(&self) -> Result<i64> {
        let charges = self
            .adjustments
            .iter()
            .filter(|a| !a.is_neutral())
            .map(|a| Ok(a.amount()));
        checked_sum(std::iter::once(Ok(self.unit_price)).chain(charges))
    }

    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }

    pub fn adjustments_of(&self, kind: AdjustmentKind) -> impl Iterator<Item = &Adjustment> {
        self.adjustments.iter().filter(move |a| a.kind() == kind)
    }

    pub fn add_adjustment(&mut self, adjustment: Adjustment) {
        self.adjustments.push(adjustment);
    }

    pub fn remove_adjustments(&mut self, kind: AdjustmentKind) {
        self.adjustments.retain(|a| a.kind() != kind);
    }

    /// Sum of all tax adjustments, neutral ones included.
    pub fn tax_total(&self) -> Result<i64> {
        checked_sum(self.adjustments_of(AdjustmentKind::Tax).map(|a| Ok(a.amount())))
    }
}

/// A line item of an order: a variant bought in some quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    variant: Variant,
    units: Vec<OrderItemUnit>,
}

impl OrderItem {
    /// Creates an item with one unit per purchased quantity increment.
    pub fn new(variant: Variant, unit_price: i64, quantity: u32) -> Self {
        Self {
            variant,
            units: (0..quantity).map(|_| OrderItemUnit::new(unit_price)).collect(),
        }
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn units(&self) -> &[OrderItemUnit] {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut [OrderItemUnit] {
        &mut self.units
    }

    pub fn total(&self) -> Result<i64> {
        checked_sum(self.units.iter().map(OrderItemUnit::total))
    }
}

/// A customer order owning an ordered sequence of items.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: u32,
    /// Zone matched from the order's address, if any.
    pub tax_zone: Option<Zone>,
    items: Vec<OrderItem>,
}

impl Order {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            tax_zone: None,
            items: Vec::new(),
        }
    }

    pub fn with_tax_zone(mut self, zone: Zone) -> Self {
        self.tax_zone = Some(zone);
        self
    }

    /// The order's own tax zone, or `default` when it has none.
    pub fn tax_zone_or(&self, default: Option<&Zone>) -> Option<Zone> {
        self.tax_zone.as_ref().or(default).cloned()
    }

    pub fn add_item(&mut self, item: OrderItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [OrderItem] {
        &mut self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut OrderItemUnit> {
        self.items.iter_mut().flat_map(|item| item.units.iter_mut())
    }

    pub fn total(&self) -> Result<i64> {
        checked_sum(self.items.iter().map(OrderItem::total))
    }

    pub fn tax_total(&self) -> Result<i64> {
        checked_sum(
            self.items
                .iter()
                .flat_map(OrderItem::units)
                .map(OrderItemUnit::tax_total),
        )
    }
}
