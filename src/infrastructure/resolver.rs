use crate::domain::order::Variant;
use crate::domain::ports::TaxRateResolver;
use crate::domain::tax_rate::{ResolutionContext, TaxRate};

/// Resolves rates by matching the variant's tax category and the context zone.
///
/// When several rates match, the one registered first wins.
#[derive(Debug, Default, Clone)]
pub struct ZoneTaxRateResolver {
    rates: Vec<TaxRate>,
}

impl ZoneTaxRateResolver {
    pub fn new(rates: Vec<TaxRate>) -> Self {
        Self { rates }
    }
}

impl TaxRateResolver for ZoneTaxRateResolver {
    fn resolve(&self, variant: &Variant, context: &ResolutionContext<'_>) -> Option<TaxRate> {
        let category = variant.tax_category.as_deref()?;
        self.rates
            .iter()
            .find(|rate| rate.zone == *context.zone && rate.category == category)
            .cloned()
    }
}
