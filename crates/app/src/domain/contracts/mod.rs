//! Thank-you Contracts

mod errors;
pub mod repository;
pub mod service;

pub use errors::{ContractStoreError, ContractsServiceError};
pub use repository::{ContractKey, ContractStore, InMemoryContractStore};
pub use service::*;
