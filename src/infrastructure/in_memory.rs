use crate::domain::order::Zone;
use crate::domain::ports::TaxRateStore;
use crate::domain::tax_rate::TaxRate;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for tax rates.
///
/// Keeps rates in registration order, since resolution picks the first match.
/// Storing a rate whose code already exists replaces it in place.
#[derive(Default, Clone)]
pub struct InMemoryTaxRateStore {
    rates: Arc<RwLock<Vec<TaxRate>>>,
}

impl InMemoryTaxRateStore {
    /// Creates a new, empty in-memory rate store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaxRateStore for InMemoryTaxRateStore {
    async fn store(&self, rate: TaxRate) -> Result<()> {
        let mut rates = self.rates.write().await;
        match rates.iter_mut().find(|r| r.code == rate.code) {
            Some(existing) => *existing = rate,
            None => rates.push(rate),
        }
        Ok(())
    }

    async fn find_by_zone(&self, zone: &Zone) -> Result<Vec<TaxRate>> {
        let rates = self.rates.read().await;
        Ok(rates.iter().filter(|r| r.zone == *zone).cloned().collect())
    }
}
