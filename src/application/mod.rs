//! Application layer orchestrating the taxation of orders.
//!
//! The applicator attaches per-unit tax adjustments, the processor makes that
//! repeatable per order, and `TaxationEngine` ties both to the rate store.

pub mod applicator;
pub mod engine;
pub mod processor;
