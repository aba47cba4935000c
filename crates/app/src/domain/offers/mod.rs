//! Offers

mod errors;
pub mod file_store;
pub mod repository;
pub mod service;

pub use errors::{OfferStoreError, OffersServiceError};
pub use file_store::JsonFileOfferStore;
pub use repository::{InMemoryOfferStore, OfferStore};
pub use service::*;
