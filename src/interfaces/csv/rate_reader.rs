use crate::domain::order::Zone;
use crate::domain::tax_rate::{CalculatorKind, TaxRate};
use crate::error::{Result, TaxError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct TaxRateRecord {
    code: String,
    label: String,
    category: String,
    zone: String,
    amount: Decimal,
    included_in_price: bool,
    #[serde(default)]
    calculator: Option<CalculatorKind>,
}

impl TryFrom<TaxRateRecord> for TaxRate {
    type Error = TaxError;

    fn try_from(record: TaxRateRecord) -> Result<Self> {
        Ok(TaxRate::new(
            record.code,
            record.label,
            record.category,
            Zone::new(record.zone),
            record.amount,
        )?
        .included_in_price(record.included_in_price)
        .with_calculator(record.calculator.unwrap_or_default()))
    }
}

/// Reads tax rates from a CSV source.
///
/// Expects the columns `code, label, category, zone, amount, included_in_price`
/// and an optional `calculator` column (`default` or `decimal`).
pub struct TaxRateReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TaxRateReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and validates rates.
    pub fn rates(self) -> impl Iterator<Item = Result<TaxRate>> {
        self.reader
            .into_deserialize::<TaxRateRecord>()
            .map(|result| result.map_err(TaxError::from).and_then(TaxRate::try_from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "code, label, category, zone, amount, included_in_price, calculator\n\
                    eu_std, VAT 20%, standard, EU, 0.20, false, default\n\
                    pl_red, VAT 8%, reduced, PL, 0.08, true, decimal\n\
                    us_std, Sales tax, standard, US, 0.07, false,";
        let reader = TaxRateReader::new(data.as_bytes());
        let results: Vec<Result<TaxRate>> = reader.rates().collect();

        assert_eq!(results.len(), 3);
        let eu = results[0].as_ref().unwrap();
        assert_eq!(eu.label, "VAT 20%");
        assert_eq!(eu.zone, Zone::new("EU"));
        assert_eq!(eu.amount, dec!(0.20));
        assert!(!eu.included_in_price);

        let pl = results[1].as_ref().unwrap();
        assert!(pl.included_in_price);
        assert_eq!(pl.calculator, CalculatorKind::Decimal);

        let us = results[2].as_ref().unwrap();
        assert_eq!(us.calculator, CalculatorKind::Default);
    }

    #[test]
    fn test_reader_rejects_negative_amount() {
        let data = "code, label, category, zone, amount, included_in_price\n\
                    bad, Bad, standard, EU, -0.1, false";
        let results: Vec<Result<TaxRate>> = TaxRateReader::new(data.as_bytes()).rates().collect();

        assert!(matches!(results[0], Err(TaxError::ValidationError(_))));
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "code, label, category, zone, amount, included_in_price\n\
                    vat, VAT, standard, EU, twenty, false";
        let results: Vec<Result<TaxRate>> = TaxRateReader::new(data.as_bytes()).rates().collect();

        assert!(matches!(results[0], Err(TaxError::CsvError(_))));
    }
}
