//! Seller registry (`sellers.json`) lookups.

pub mod lookup;
pub mod model;

pub use lookup::{registry_url, RegistryLookup, RegistryOutcome};
pub use model::{parse_sellers_document, RegistryRecord};
