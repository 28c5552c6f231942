//! Invoice service: orchestrates validation, domain rules and the repository
//!
//! This is the seam the HTTP layer talks to. All input re-validation lives
//! here (or in the model constructors it calls), so the backend never trusts
//! what a client pre-filtered.

use crate::core::error::{InvoiceError, InvoiceResult};
use crate::core::model::{Invoice, LineItem, Payment};
use crate::storage::InvoiceRepository;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Line item payload as sent by clients
#[derive(Debug, Clone, Deserialize)]
pub struct ItemInput {
    pub description: String,
    pub price: Decimal,
}

/// Payment payload as sent by clients
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentInput {
    pub amount: Decimal,
    pub method: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub reference: Option<String>,
}

/// Application service for invoice operations
#[derive(Clone)]
pub struct InvoiceService {
    repository: Arc<dyn InvoiceRepository>,
}

impl InvoiceService {
    pub fn new(repository: Arc<dyn InvoiceRepository>) -> Self {
        Self { repository }
    }

    /// Create an invoice, optionally with initial line items.
    ///
    /// Every item is validated before anything is stored.
    pub async fn create_invoice(
        &self,
        customer_name: &str,
        items: Vec<ItemInput>,
    ) -> InvoiceResult<Invoice> {
        let mut invoice = Invoice::new(customer_name)?;
        for item in validate_items(items)? {
            invoice.add_item(item)?;
        }

        let created = self.repository.insert(invoice).await?;
        tracing::info!(invoice_id = %created.id, customer = %created.customer_name, "invoice created");
        Ok(created)
    }

    /// Fetch a single invoice
    pub async fn get_invoice(&self, id: &Uuid) -> InvoiceResult<Invoice> {
        self.repository
            .find(id)
            .await?
            .ok_or(InvoiceError::NotFound { id: *id })
    }

    /// All invoices in creation order
    pub async fn list_invoices(&self) -> InvoiceResult<Vec<Invoice>> {
        self.repository.list().await
    }

    /// Filter invoices by a text query; blank query returns everything
    pub async fn search_invoices(&self, query: &str) -> InvoiceResult<Vec<Invoice>> {
        self.repository.search(query).await
    }

    /// Append one line item to an unpaid invoice
    pub async fn add_item(&self, id: &Uuid, item: ItemInput) -> InvoiceResult<Invoice> {
        let item = LineItem::new(&item.description, item.price)?;
        self.repository
            .update(id, Box::new(move |invoice| invoice.add_item(item)))
            .await
    }

    /// Replace the whole item list of an unpaid invoice.
    ///
    /// Any invalid item rejects the request before the invoice is touched.
    pub async fn replace_items(&self, id: &Uuid, items: Vec<ItemInput>) -> InvoiceResult<Invoice> {
        let items = validate_items(items)?;
        self.repository
            .update(id, Box::new(move |invoice| invoice.replace_items(items)))
            .await
    }

    /// Record a payment; partial payments accumulate until the balance
    /// reaches zero
    pub async fn record_payment(&self, id: &Uuid, input: PaymentInput) -> InvoiceResult<Invoice> {
        let payment = Payment::new(input.amount, &input.method, input.date, input.reference)?;
        let updated = self
            .repository
            .update(id, Box::new(move |invoice| invoice.record_payment(payment)))
            .await?;
        tracing::info!(
            invoice_id = %updated.id,
            paid = updated.is_paid(),
            remaining = %updated.remaining_balance(),
            "payment recorded"
        );
        Ok(updated)
    }

    /// Payment history for an invoice, sorted by payment date
    pub async fn payment_history(&self, id: &Uuid) -> InvoiceResult<Vec<Payment>> {
        Ok(self.get_invoice(id).await?.payment_history())
    }

    /// Delete an invoice
    pub async fn delete_invoice(&self, id: &Uuid) -> InvoiceResult<()> {
        self.repository.delete(id).await?;
        tracing::info!(invoice_id = %id, "invoice deleted");
        Ok(())
    }
}

fn validate_items(items: Vec<ItemInput>) -> Result<Vec<LineItem>, InvoiceError> {
    items
        .into_iter()
        .map(|item| LineItem::new(&item.description, item.price).map_err(Into::into))
        .collect()
}
