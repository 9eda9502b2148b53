use crate::domain::tax_rate::CalculatorKind;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("No calculator registered for '{0}'")]
    UnsupportedCalculator(CalculatorKind),
    #[error("Tax amount {0} does not fit into minor currency units")]
    AmountOverflow(Decimal),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, TaxError>;
