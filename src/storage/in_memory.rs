//! In-memory implementation of InvoiceRepository for testing and development

use crate::core::error::{InvoiceError, StorageError};
use crate::core::model::Invoice;
use crate::storage::{InvoiceMutation, InvoiceRepository};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory invoice repository
///
/// Uses RwLock for thread-safe access; an IndexMap keeps invoices in
/// creation order so `list()` is stable.
#[derive(Clone)]
pub struct InMemoryInvoiceRepository {
    invoices: Arc<RwLock<IndexMap<Uuid, Invoice>>>,
}

impl InMemoryInvoiceRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            invoices: Arc::new(RwLock::new(IndexMap::new())),
        }
    }
}

impl Default for InMemoryInvoiceRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_poisoned(e: impl std::fmt::Display) -> InvoiceError {
    StorageError::LockPoisoned {
        message: e.to_string(),
    }
    .into()
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn insert(&self, invoice: Invoice) -> Result<Invoice, InvoiceError> {
        let mut invoices = self.invoices.write().map_err(lock_poisoned)?;
        invoices.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    async fn find(&self, id: &Uuid) -> Result<Option<Invoice>, InvoiceError> {
        let invoices = self.invoices.read().map_err(lock_poisoned)?;
        Ok(invoices.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Invoice>, InvoiceError> {
        let invoices = self.invoices.read().map_err(lock_poisoned)?;
        Ok(invoices.values().cloned().collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Invoice>, InvoiceError> {
        let query = query.trim();
        if query.is_empty() {
            return self.list().await;
        }
        let needle = query.to_lowercase();

        let invoices = self.invoices.read().map_err(lock_poisoned)?;
        Ok(invoices
            .values()
            .filter(|invoice| {
                invoice.customer_name.to_lowercase().contains(&needle)
                    || invoice.id.to_string().contains(&needle)
                    || invoice
                        .items
                        .iter()
                        .any(|item| item.description.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }

    async fn update(&self, id: &Uuid, mutation: InvoiceMutation) -> Result<Invoice, InvoiceError> {
        let mut invoices = self.invoices.write().map_err(lock_poisoned)?;

        let current = invoices
            .get(id)
            .ok_or(InvoiceError::NotFound { id: *id })?;

        // Mutate a copy and commit only on success, so a rejected mutation
        // leaves the stored invoice untouched.
        let mut updated = current.clone();
        mutation(&mut updated)?;
        invoices.insert(*id, updated.clone());

        Ok(updated)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), InvoiceError> {
        let mut invoices = self.invoices.write().map_err(lock_poisoned)?;
        invoices
            .shift_remove(id)
            .map(|_| ())
            .ok_or(InvoiceError::NotFound { id: *id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{LineItem, Payment};
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn sample_invoice(customer: &str, item: &str, price: &str) -> Invoice {
        let mut invoice = Invoice::new(customer).unwrap();
        invoice
            .add_item(LineItem::new(item, dec(price)).unwrap())
            .unwrap();
        invoice
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryInvoiceRepository::new();
        let invoice = sample_invoice("Acme", "Widget", "9.99");

        let stored = repo.insert(invoice.clone()).await.unwrap();
        assert_eq!(stored.id, invoice.id);

        let found = repo.find(&invoice.id).await.unwrap();
        assert_eq!(found.unwrap().customer_name, "Acme");
    }

    #[tokio::test]
    async fn test_find_unknown_returns_none() {
        let repo = InMemoryInvoiceRepository::new();
        assert!(repo.find(&Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_preserves_creation_order() {
        let repo = InMemoryInvoiceRepository::new();
        for name in ["First", "Second", "Third"] {
            repo.insert(Invoice::new(name).unwrap()).await.unwrap();
        }

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.customer_name)
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_search_matches_customer_name_case_insensitive() {
        let repo = InMemoryInvoiceRepository::new();
        repo.insert(sample_invoice("Acme Corp", "Widget", "1"))
            .await
            .unwrap();
        repo.insert(sample_invoice("Globex", "Gadget", "2"))
            .await
            .unwrap();

        let results = repo.search("acme").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].customer_name, "Acme Corp");
    }

    #[tokio::test]
    async fn test_search_matches_item_description() {
        let repo = InMemoryInvoiceRepository::new();
        repo.insert(sample_invoice("Acme", "Titanium Widget", "1"))
            .await
            .unwrap();
        repo.insert(sample_invoice("Globex", "Gadget", "2"))
            .await
            .unwrap();

        let results = repo.search("titanium").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].customer_name, "Acme");
    }

    #[tokio::test]
    async fn test_search_matches_id_substring() {
        let repo = InMemoryInvoiceRepository::new();
        let invoice = sample_invoice("Acme", "Widget", "1");
        let id_fragment = invoice.id.to_string()[..8].to_string();
        repo.insert(invoice.clone()).await.unwrap();

        let results = repo.search(&id_fragment).await.unwrap();
        assert!(results.iter().any(|i| i.id == invoice.id));
    }

    #[tokio::test]
    async fn test_blank_search_returns_full_list() {
        let repo = InMemoryInvoiceRepository::new();
        repo.insert(sample_invoice("Acme", "Widget", "1"))
            .await
            .unwrap();
        repo.insert(sample_invoice("Globex", "Gadget", "2"))
            .await
            .unwrap();

        assert_eq!(repo.search("").await.unwrap().len(), 2);
        assert_eq!(repo.search("   ").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_applies_mutation() {
        let repo = InMemoryInvoiceRepository::new();
        let invoice = sample_invoice("Acme", "Widget", "9.99");
        let id = invoice.id;
        repo.insert(invoice).await.unwrap();

        let updated = repo
            .update(
                &id,
                Box::new(|invoice| invoice.add_item(LineItem::new("Bolt", dec("0.5")).unwrap())),
            )
            .await
            .unwrap();

        assert_eq!(updated.total(), dec("10.49"));
        assert_eq!(repo.find(&id).await.unwrap().unwrap().items.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_invoice_unchanged() {
        let repo = InMemoryInvoiceRepository::new();
        let invoice = sample_invoice("Acme", "Widget", "10");
        let id = invoice.id;
        repo.insert(invoice).await.unwrap();

        let err = repo
            .update(
                &id,
                Box::new(|invoice| {
                    invoice.add_item(LineItem::new("Bolt", dec("1")).unwrap())?;
                    // Over-payment fails after the item was added to the copy
                    invoice.record_payment(Payment::new(dec("999"), "CARD", None, None).unwrap())
                }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, InvoiceError::Validation(_)));

        let stored = repo.find(&id).await.unwrap().unwrap();
        assert_eq!(stored.items.len(), 1);
        assert_eq!(stored.amount_paid(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_update_unknown_invoice_not_found() {
        let repo = InMemoryInvoiceRepository::new();
        let err = repo
            .update(&Uuid::new_v4(), Box::new(|_| Ok(())))
            .await
            .unwrap_err();
        assert!(matches!(err, InvoiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_from_list() {
        let repo = InMemoryInvoiceRepository::new();
        let invoice = sample_invoice("Acme", "Widget", "1");
        let id = invoice.id;
        repo.insert(invoice).await.unwrap();

        repo.delete(&id).await.unwrap();
        assert!(repo.find(&id).await.unwrap().is_none());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_invoice_not_found() {
        let repo = InMemoryInvoiceRepository::new();
        let err = repo.delete(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, InvoiceError::NotFound { .. }));
    }
}
