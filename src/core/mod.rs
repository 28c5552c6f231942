//! Core domain types: model, validation, service and errors

pub mod error;
pub mod model;
pub mod service;
pub mod validation;

pub use error::{
    ErrorResponse, FieldValidationError, InvoiceError, InvoiceResult, StorageError,
    ValidationError,
};
pub use model::{Invoice, LineItem, Payment};
pub use service::{InvoiceService, ItemInput, PaymentInput};
