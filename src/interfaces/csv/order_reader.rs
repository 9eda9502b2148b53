use crate::domain::order::{Order, OrderItem, Variant, Zone};
use crate::error::{Result, TaxError};
use serde::Deserialize;
use std::io::Read;

/// Largest quantity accepted on a single order line. Every unit is
/// materialized, so larger lines are rejected instead of allocated.
pub const MAX_QUANTITY: u32 = 10_000;

#[derive(Debug, Deserialize)]
struct OrderLine {
    order: u32,
    variant: String,
    #[serde(default)]
    category: Option<String>,
    quantity: u32,
    unit_price: i64,
    #[serde(default)]
    zone: Option<String>,
}

/// Reads orders from a CSV source of order lines.
///
/// Each row is one item (`order, variant, category, quantity, unit_price, zone`).
/// Consecutive rows sharing an order id make up one order; the first non-empty
/// `zone` becomes the order's tax zone.
pub struct OrderReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OrderReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily assembles orders.
    ///
    /// A malformed row is reported as an error in place and does not end the
    /// order being assembled.
    pub fn orders(self) -> Orders<R> {
        Orders {
            lines: self.reader.into_deserialize(),
            current: None,
        }
    }
}

pub struct Orders<R: Read> {
    lines: csv::DeserializeRecordsIntoIter<R, OrderLine>,
    current: Option<Order>,
}

impl<R: Read> Orders<R> {
    fn start(line: OrderLine) -> Order {
        let mut order = Order::new(line.order);
        Self::push(&mut order, line);
        order
    }

    fn push(order: &mut Order, line: OrderLine) {
        if order.tax_zone.is_none() {
            order.tax_zone = line.zone.map(Zone::new);
        }
        order.add_item(OrderItem::new(
            Variant::new(line.variant, line.category),
            line.unit_price,
            line.quantity,
        ));
    }
}

impl<R: Read> Iterator for Orders<R> {
    type Item = Result<Order>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next() {
                None => return self.current.take().map(Ok),
                Some(Err(e)) => return Some(Err(TaxError::from(e))),
                Some(Ok(line)) => line,
            };

            if line.quantity > MAX_QUANTITY {
                return Some(Err(TaxError::ValidationError(format!(
                    "Quantity {} of {} in order {} exceeds the limit of {}",
                    line.quantity, line.variant, line.order, MAX_QUANTITY
                ))));
            }

            match self.current.as_mut() {
                Some(order) if order.id == line.order => Self::push(order, line),
                Some(_) => return self.current.replace(Self::start(line)).map(Ok),
                None => self.current = Some(Self::start(line)),
            }
        }
    }
}
