//! Storage backends for invoices
//!
//! The service layer only speaks to the [`InvoiceRepository`] trait; the
//! in-memory implementation is the default backend. A database-backed
//! implementation plugs in at the same seam.

pub mod in_memory;

pub use in_memory::InMemoryInvoiceRepository;

use crate::core::error::InvoiceError;
use crate::core::model::Invoice;
use async_trait::async_trait;
use uuid::Uuid;

/// A mutation applied to a single invoice under the repository's write lock.
///
/// Boxed so the trait stays object-safe behind `Arc<dyn InvoiceRepository>`.
pub type InvoiceMutation = Box<dyn FnOnce(&mut Invoice) -> Result<(), InvoiceError> + Send>;

/// Persistence contract for invoices
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Store a newly created invoice
    async fn insert(&self, invoice: Invoice) -> Result<Invoice, InvoiceError>;

    /// Look up a single invoice
    async fn find(&self, id: &Uuid) -> Result<Option<Invoice>, InvoiceError>;

    /// All invoices in creation order
    async fn list(&self) -> Result<Vec<Invoice>, InvoiceError>;

    /// Case-insensitive substring match on customer name, id, or item
    /// descriptions. A blank query returns the full list.
    async fn search(&self, query: &str) -> Result<Vec<Invoice>, InvoiceError>;

    /// Apply a mutation to one invoice atomically.
    ///
    /// The mutation runs while the invoice is exclusively held, and a failed
    /// mutation must leave the stored invoice untouched. Returns the updated
    /// invoice, or `NotFound` if the id is unknown.
    async fn update(&self, id: &Uuid, mutation: InvoiceMutation) -> Result<Invoice, InvoiceError>;

    /// Remove an invoice. Fails with `NotFound` if absent.
    async fn delete(&self, id: &Uuid) -> Result<(), InvoiceError>;
}
