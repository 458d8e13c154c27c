pub mod chain;
pub mod config;
pub mod disclosure;
pub mod export;
pub mod fetch;
pub mod registry;
pub mod report;
pub mod run_id;
pub mod store;
pub mod validator;

pub mod error;
