pub mod adjustment;
pub mod order;
pub mod ports;
pub mod rounding;
pub mod tax_rate;
