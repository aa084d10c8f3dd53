//! Reconciliation tree and the builder that populates it

pub mod builder;
pub mod core;
pub mod partition;

pub use builder::*;
pub use self::core::*;
pub use partition::*;
