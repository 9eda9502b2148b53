use std::io::{Error, Write};
use tempfile::NamedTempFile;

pub fn rates_file(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        "code, label, category, zone, amount, included_in_price, calculator"
    )?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    Ok(file)
}

pub fn orders_file(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "order, variant, category, quantity, unit_price, zone")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    Ok(file)
}
