use crate::domain::adjustment::AdjustmentKind;
use crate::domain::order::Order;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One tax adjustment, flattened with the position of the unit it belongs to.
#[derive(Debug, Serialize, PartialEq)]
pub struct AdjustmentRow<'a> {
    pub order: u32,
    /// 1-based position of the item within the order.
    pub item: usize,
    /// 1-based position of the unit within the item.
    pub unit: usize,
    pub label: &'a str,
    pub amount: i64,
    pub included_in_price: bool,
    pub unit_total: i64,
}

/// Flattens the tax adjustments of an order into output rows.
///
/// A row fails when the total of its unit does not fit into minor units.
pub fn tax_rows(order: &Order) -> impl Iterator<Item = Result<AdjustmentRow<'_>>> {
    order.items().iter().enumerate().flat_map(move |(i, item)| {
        item.units().iter().enumerate().flat_map(move |(u, unit)| {
            unit.adjustments_of(AdjustmentKind::Tax)
                .map(move |adjustment| {
                    Ok(AdjustmentRow {
                        order: order.id,
                        item: i + 1,
                        unit: u + 1,
                        label: adjustment.label(),
                        amount: adjustment.amount(),
                        included_in_price: adjustment.is_neutral(),
                        unit_total: unit.total()?,
                    })
                })
        })
    })
}

enum Sink<W: Write> {
    Csv(csv::Writer<W>),
    JsonLines(W),
}

/// Writes tax adjustments either as CSV or as JSON lines.
pub struct AdjustmentWriter<W: Write> {
    sink: Sink<W>,
}

impl<W: Write> AdjustmentWriter<W> {
    pub fn csv(writer: W) -> Self {
        Self {
            sink: Sink::Csv(csv::Writer::from_writer(writer)),
        }
    }

    pub fn json_lines(writer: W) -> Self {
        Self {
            sink: Sink::JsonLines(writer),
        }
    }

    pub fn write_order(&mut self, order: &Order) -> Result<()> {
        for row in tax_rows(order) {
            let row = row?;
            match &mut self.sink {
                Sink::Csv(writer) => writer.serialize(&row)?,
                Sink::JsonLines(writer) => {
                    serde_json::to_writer(&mut *writer, &row)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        match &mut self.sink {
            Sink::Csv(writer) => writer.flush()?,
            Sink::JsonLines(writer) => writer.flush()?,
        }
        Ok(())
    }
}
