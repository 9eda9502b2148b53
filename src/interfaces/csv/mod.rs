pub mod adjustment_writer;
pub mod order_reader;
pub mod rate_reader;
