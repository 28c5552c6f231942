//! Invoice domain model
//!
//! An [`Invoice`] owns its line items and its full payment history. All
//! monetary figures (`total`, `amount_paid`, `remaining_balance`) are
//! derived from those lists on every read, so they can never drift from
//! the underlying data.
//!
//! Payment policy: partial payments are accepted and accumulated; a payment
//! may never exceed the remaining balance. An invoice counts as paid once at
//! least one payment has been recorded and the remaining balance reaches
//! zero, after which item and payment mutations are rejected.

use crate::core::error::{InvoiceError, ValidationError};
use crate::core::validation;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A priced, described unit contributing to an invoice's total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub price: Decimal,
}

impl LineItem {
    /// Create a line item, trimming the description.
    ///
    /// Fails if the description is blank or the price is negative.
    pub fn new(description: &str, price: Decimal) -> Result<Self, ValidationError> {
        Ok(Self {
            description: validation::non_blank("description", description)?,
            price: validation::non_negative("price", price)?,
        })
    }
}

/// A recorded payment against an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: Decimal,
    pub method: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub reference: String,
}

impl Payment {
    /// Create a payment record.
    ///
    /// The method is an open enumeration (the UI suggests CASH, CARD and
    /// BANK_TRANSFER but any non-blank text is accepted). When `date` is
    /// omitted the payment is dated today; `reference` defaults to empty.
    pub fn new(
        amount: Decimal,
        method: &str,
        date: Option<NaiveDate>,
        reference: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            amount: validation::positive("amount", amount)?,
            method: validation::non_blank("method", method)?,
            date: date.unwrap_or_else(|| Utc::now().date_naive()),
            reference: reference.unwrap_or_default(),
        })
    }
}

/// Billable record for a customer with line items and payment history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_name: String,
    pub date: NaiveDate,
    pub items: Vec<LineItem>,
    pub payments: Vec<Payment>,
}

impl Invoice {
    /// Create a new unpaid invoice dated today.
    ///
    /// Fails if the customer name is blank.
    pub fn new(customer_name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            customer_name: validation::non_blank("customerName", customer_name)?,
            date: Utc::now().date_naive(),
            items: Vec::new(),
            payments: Vec::new(),
        })
    }

    /// Sum of all item prices
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.price).sum()
    }

    /// Sum of all recorded payments
    pub fn amount_paid(&self) -> Decimal {
        self.payments.iter().map(|payment| payment.amount).sum()
    }

    /// Outstanding balance (total minus payments)
    pub fn remaining_balance(&self) -> Decimal {
        self.total() - self.amount_paid()
    }

    /// Whether the invoice is settled.
    ///
    /// Requires at least one recorded payment: a freshly created invoice
    /// with no items (total zero) is not considered paid.
    pub fn is_paid(&self) -> bool {
        !self.payments.is_empty() && self.remaining_balance() <= Decimal::ZERO
    }

    /// Payment history sorted by payment date (stable for same-day payments)
    pub fn payment_history(&self) -> Vec<Payment> {
        let mut sorted = self.payments.clone();
        sorted.sort_by_key(|payment| payment.date);
        sorted
    }

    /// Method of the most recently recorded payment, if any
    pub fn payment_method(&self) -> Option<&str> {
        self.payments.last().map(|payment| payment.method.as_str())
    }

    /// Append a line item. Rejected once the invoice is paid.
    pub fn add_item(&mut self, item: LineItem) -> Result<(), InvoiceError> {
        self.ensure_unpaid()?;
        self.items.push(item);
        Ok(())
    }

    /// Replace the whole item list. Rejected once the invoice is paid.
    ///
    /// Callers validate every item before calling, so this either applies
    /// the full list or nothing.
    pub fn replace_items(&mut self, items: Vec<LineItem>) -> Result<(), InvoiceError> {
        self.ensure_unpaid()?;
        self.items = items;
        Ok(())
    }

    /// Record a payment against the invoice.
    ///
    /// Rejected once the invoice is paid, and when the amount would exceed
    /// the remaining balance.
    pub fn record_payment(&mut self, payment: Payment) -> Result<(), InvoiceError> {
        self.ensure_unpaid()?;
        if payment.amount > self.remaining_balance() {
            return Err(ValidationError::FieldError {
                field: "amount".to_string(),
                message: format!(
                    "payment of {} exceeds remaining balance of {}",
                    payment.amount,
                    self.remaining_balance()
                ),
            }
            .into());
        }
        self.payments.push(payment);
        Ok(())
    }

    fn ensure_unpaid(&self) -> Result<(), InvoiceError> {
        if self.is_paid() {
            Err(InvoiceError::AlreadyPaid { id: self.id })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn invoice_with_items(items: &[(&str, &str)]) -> Invoice {
        let mut invoice = Invoice::new("Acme").unwrap();
        for (description, price) in items {
            invoice
                .add_item(LineItem::new(description, dec(price)).unwrap())
                .unwrap();
        }
        invoice
    }

    #[test]
    fn test_new_invoice_is_empty_and_unpaid() {
        let invoice = Invoice::new("Acme").unwrap();
        assert_eq!(invoice.total(), Decimal::ZERO);
        assert_eq!(invoice.amount_paid(), Decimal::ZERO);
        assert!(!invoice.is_paid());
        assert!(invoice.items.is_empty());
    }

    #[test]
    fn test_new_invoice_trims_customer_name() {
        let invoice = Invoice::new("  Acme  ").unwrap();
        assert_eq!(invoice.customer_name, "Acme");
    }

    #[test]
    fn test_blank_customer_name_rejected() {
        assert!(Invoice::new("").is_err());
        assert!(Invoice::new("   ").is_err());
    }

    #[test]
    fn test_total_sums_item_prices() {
        let invoice = invoice_with_items(&[("Widget", "9.99"), ("Bolt", "0.5")]);
        assert_eq!(invoice.total(), dec("10.49"));
    }

    #[test]
    fn test_line_item_validation() {
        assert!(LineItem::new("", dec("1")).is_err());
        assert!(LineItem::new("   ", dec("1")).is_err());
        assert!(LineItem::new("Widget", dec("-1")).is_err());
        assert!(LineItem::new("Widget", Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_partial_payment_keeps_invoice_open() {
        let mut invoice = invoice_with_items(&[("Widget", "100")]);
        let payment = Payment::new(dec("40"), "CASH", None, None).unwrap();
        invoice.record_payment(payment).unwrap();

        assert!(!invoice.is_paid());
        assert_eq!(invoice.amount_paid(), dec("40"));
        assert_eq!(invoice.remaining_balance(), dec("60"));
    }

    #[test]
    fn test_full_payment_settles_invoice() {
        let mut invoice = invoice_with_items(&[("Widget", "9.99"), ("Bolt", "0.5")]);
        let payment = Payment::new(dec("10.49"), "CARD", None, None).unwrap();
        invoice.record_payment(payment).unwrap();

        assert!(invoice.is_paid());
        assert_eq!(invoice.amount_paid(), dec("10.49"));
        assert_eq!(invoice.remaining_balance(), Decimal::ZERO);
        assert_eq!(invoice.payment_method(), Some("CARD"));
    }

    #[test]
    fn test_payment_on_paid_invoice_conflicts() {
        let mut invoice = invoice_with_items(&[("Widget", "10")]);
        invoice
            .record_payment(Payment::new(dec("10"), "CARD", None, None).unwrap())
            .unwrap();

        let err = invoice
            .record_payment(Payment::new(dec("1"), "CASH", None, None).unwrap())
            .unwrap_err();
        assert!(matches!(err, InvoiceError::AlreadyPaid { .. }));
    }

    #[test]
    fn test_overpayment_rejected_and_leaves_state() {
        let mut invoice = invoice_with_items(&[("Widget", "10")]);
        let err = invoice
            .record_payment(Payment::new(dec("10.01"), "CARD", None, None).unwrap())
            .unwrap_err();
        assert!(matches!(err, InvoiceError::Validation(_)));
        assert_eq!(invoice.amount_paid(), Decimal::ZERO);
        assert!(!invoice.is_paid());
    }

    #[test]
    fn test_item_mutation_on_paid_invoice_conflicts() {
        let mut invoice = invoice_with_items(&[("Widget", "10")]);
        invoice
            .record_payment(Payment::new(dec("10"), "CARD", None, None).unwrap())
            .unwrap();

        let item = LineItem::new("Bolt", dec("1")).unwrap();
        assert!(matches!(
            invoice.add_item(item.clone()).unwrap_err(),
            InvoiceError::AlreadyPaid { .. }
        ));
        assert!(matches!(
            invoice.replace_items(vec![item]).unwrap_err(),
            InvoiceError::AlreadyPaid { .. }
        ));
        assert_eq!(invoice.items.len(), 1);
    }

    #[test]
    fn test_payment_history_sorted_by_date() {
        let mut invoice = invoice_with_items(&[("Widget", "100")]);
        let later = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        invoice
            .record_payment(Payment::new(dec("30"), "CASH", Some(later), None).unwrap())
            .unwrap();
        invoice
            .record_payment(Payment::new(dec("20"), "CARD", Some(earlier), None).unwrap())
            .unwrap();

        let history = invoice.payment_history();
        assert_eq!(history[0].date, earlier);
        assert_eq!(history[1].date, later);
        // Most recent by insertion, not by date
        assert_eq!(invoice.payment_method(), Some("CARD"));
    }

    #[test]
    fn test_payment_defaults() {
        let payment = Payment::new(dec("5"), " CARD ", None, None).unwrap();
        assert_eq!(payment.method, "CARD");
        assert_eq!(payment.reference, "");
        assert_eq!(payment.date, Utc::now().date_naive());
    }

    #[test]
    fn test_payment_validation() {
        assert!(Payment::new(Decimal::ZERO, "CARD", None, None).is_err());
        assert!(Payment::new(dec("-5"), "CARD", None, None).is_err());
        assert!(Payment::new(dec("5"), "  ", None, None).is_err());
    }

    #[test]
    fn test_empty_invoice_cannot_be_paid() {
        let mut invoice = Invoice::new("Acme").unwrap();
        // Remaining balance is zero, so any positive amount overshoots
        let err = invoice
            .record_payment(Payment::new(dec("1"), "CASH", None, None).unwrap())
            .unwrap_err();
        assert!(matches!(err, InvoiceError::Validation(_)));
        assert!(!invoice.is_paid());
    }
}
