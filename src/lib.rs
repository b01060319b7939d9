pub mod config;
pub mod error;
pub mod fields;
pub mod manager;
pub mod models;
pub mod router;
pub mod sql;
pub mod template;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::BackendConfig;
pub use error::{BackendError, BackendResult, FieldError, FieldErrorKind, ValidationError};
pub use fields::SalesforceId;
pub use manager::{QueryResponse, SalesforceManager, Transport};
pub use models::{standard_schema, Account, Lead, SalesforceModel};
pub use router::ModelRouter;
