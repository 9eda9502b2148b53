pub mod adjustment_factory;
pub mod calculators;
pub mod in_memory;
pub mod resolver;
