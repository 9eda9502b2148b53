use crate::domain::adjustment::{Adjustment, AdjustmentKind};
use crate::domain::ports::AdjustmentFactory;

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAdjustmentFactory;

impl AdjustmentFactory for DefaultAdjustmentFactory {
    fn create_with_data(
        &self,
        kind: AdjustmentKind,
        label: &str,
        amount: i64,
        neutral: bool,
    ) -> Adjustment {
        Adjustment::new(kind, label, amount, neutral)
    }
}
