//! Utility modules

pub mod csv_sink;
pub mod memory_sink;
pub mod money;
pub mod validation;

pub use csv_sink::*;
pub use memory_sink::*;
pub use money::*;
pub use validation::*;
