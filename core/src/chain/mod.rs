//! Supply-chain input: parsing and intake filtering.

pub mod model;
pub mod parser;

pub use model::{ResellerIdentity, SupplyChain, SupplyChainNode};
pub use parser::parse_supply_chain;
