//! Catalog and pricing records exchanged with the service.
//!
//! Field names follow the service's camelCase JSON so records round-trip into the
//! exporter's output unchanged.

pub mod catalog;
pub mod category;
pub mod pricing;

pub use catalog::*;
pub use category::*;
pub use pricing::*;
