//! # Invoicer
//!
//! REST backend for a small invoicing application.
//!
//! ## Features
//!
//! - **Invoices with line items**: create, list, fetch, search, delete
//! - **Item management**: append one item or replace the whole list, with
//!   server-side re-validation of every item
//! - **Partial payments**: payments accumulate against the balance; an
//!   invoice settles once the remaining balance reaches zero, after which it
//!   is immutable
//! - **Typed errors**: validation / not-found / conflict / storage, each
//!   mapped to a stable HTTP status and error code
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoicer::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     ServerBuilder::new()
//!         .with_config(ServerConfig::default())
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::config::ServerConfig;
    pub use crate::core::{
        ErrorResponse, Invoice, InvoiceError, InvoiceResult, InvoiceService, ItemInput, LineItem,
        Payment, PaymentInput, StorageError, ValidationError,
    };
    pub use crate::server::{AppState, ServerBuilder, build_router};
    pub use crate::storage::{InMemoryInvoiceRepository, InvoiceRepository};
}
