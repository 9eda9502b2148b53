use super::adjustment::{Adjustment, AdjustmentKind};
use super::order::{Variant, Zone};
use super::tax_rate::{ResolutionContext, TaxRate};
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Picks the tax rate applicable to a variant in a given context.
pub trait TaxRateResolver: Send + Sync {
    fn resolve(&self, variant: &Variant, context: &ResolutionContext<'_>) -> Option<TaxRate>;
}

/// Computes the tax owed on a base amount (in minor units) under a rate.
pub trait TaxCalculator: Send + Sync {
    fn calculate(&self, base: i64, rate: &TaxRate) -> Result<Decimal>;
}

pub trait AdjustmentFactory: Send + Sync {
    fn create_with_data(
        &self,
        kind: AdjustmentKind,
        label: &str,
        amount: i64,
        neutral: bool,
    ) -> Adjustment;
}

#[async_trait]
pub trait TaxRateStore: Send + Sync {
    async fn store(&self, rate: TaxRate) -> Result<()>;
    /// Rates defined for `zone`, in registration order.
    async fn find_by_zone(&self, zone: &Zone) -> Result<Vec<TaxRate>>;
}

pub type TaxCalculatorBox = Box<dyn TaxCalculator>;
pub type TaxRateStoreBox = Box<dyn TaxRateStore>;

// Strategies are shared between the engine and the applicators it builds.
pub type SharedTaxRateResolver = Arc<dyn TaxRateResolver>;
pub type SharedTaxCalculator = Arc<dyn TaxCalculator>;
pub type SharedAdjustmentFactory = Arc<dyn AdjustmentFactory>;
