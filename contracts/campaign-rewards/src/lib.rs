pub mod claim;
pub mod contract;
pub mod error;
pub mod msg;
pub mod query;
pub mod state;
pub use crate::error::ContractError;
