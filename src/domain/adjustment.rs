use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Tax,
    OrderPromotion,
    OrderItemPromotion,
    Shipping,
}

/// An immutable monetary modifier attached to an order item unit.
///
/// Amounts are in minor currency units. A neutral adjustment is already
/// reflected in the unit price and does not change the unit total.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Adjustment {
    kind: AdjustmentKind,
    label: String,
    amount: i64,
    #[serde(rename = "included_in_price")]
    neutral: bool,
}

impl Adjustment {
    pub fn new(kind: AdjustmentKind, label: impl Into<String>, amount: i64, neutral: bool) -> Self {
        Self {
            kind,
            label: label.into(),
            amount,
            neutral,
        }
    }

    pub fn kind(&self) -> AdjustmentKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn is_neutral(&self) -> bool {
        self.neutral
    }
}
