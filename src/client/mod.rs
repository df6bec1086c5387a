//! Data-access layer used by pricing editors.
//!
//! Editors talk to a [`PricingBackend`]; [`HttpBackend`] reaches a remote
//! pricing service and [`StoreBackend`] calls the in-process store.

pub mod backend;
pub mod error;
pub mod http;
pub mod session;
pub mod store_backend;

pub use backend::PricingBackend;
pub use error::ClientError;
pub use http::HttpBackend;
pub use session::Session;
pub use store_backend::StoreBackend;
