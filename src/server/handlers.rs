//! HTTP handlers for invoice operations
//!
//! Handlers translate between the wire format the browser UI speaks
//! (camelCase JSON, decimals as strings) and the service layer. No domain
//! rule lives here.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::core::error::{InvoiceError, ValidationError};
use crate::core::model::{Invoice, LineItem, Payment};
use crate::core::service::{InvoiceService, ItemInput, PaymentInput};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: InvoiceService,
}

// =============================================================================
// Wire types
// =============================================================================

/// Invoice as serialized to clients: stored fields plus the derived figures
/// the UI renders directly
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub customer_name: String,
    pub date: NaiveDate,
    pub items: Vec<LineItem>,
    pub total: Decimal,
    pub paid: bool,
    pub amount_paid: Decimal,
    pub remaining_balance: Decimal,
    /// Method of the most recent payment; null until one is recorded
    pub payment_method: Option<String>,
    pub payment_history: Vec<Payment>,
}

impl From<&Invoice> for InvoiceResponse {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            customer_name: invoice.customer_name.clone(),
            date: invoice.date,
            items: invoice.items.clone(),
            total: invoice.total(),
            paid: invoice.is_paid(),
            amount_paid: invoice.amount_paid(),
            remaining_balance: invoice.remaining_balance(),
            payment_method: invoice.payment_method().map(String::from),
            payment_history: invoice.payment_history(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub customer_name: String,
    #[serde(default)]
    pub items: Vec<ItemInput>,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceItemsRequest {
    #[serde(default)]
    pub items: Vec<ItemInput>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

fn parse_id(id: &str) -> Result<Uuid, InvoiceError> {
    Uuid::parse_str(id).map_err(|_| {
        ValidationError::InvalidId {
            value: id.to_string(),
        }
        .into()
    })
}

fn to_response(invoice: &Invoice) -> Json<InvoiceResponse> {
    Json(InvoiceResponse::from(invoice))
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoicer"
    }))
}

pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<Vec<InvoiceResponse>>, InvoiceError> {
    let invoices = state.service.list_invoices().await?;
    Ok(Json(invoices.iter().map(InvoiceResponse::from).collect()))
}

pub async fn search_invoices(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<InvoiceResponse>>, InvoiceError> {
    let invoices = state.service.search_invoices(&params.q).await?;
    Ok(Json(invoices.iter().map(InvoiceResponse::from).collect()))
}

pub async fn create_invoice(
    State(state): State<AppState>,
    Json(payload): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), InvoiceError> {
    let invoice = state
        .service
        .create_invoice(&payload.customer_name, payload.items)
        .await?;
    Ok((StatusCode::CREATED, to_response(&invoice)))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceResponse>, InvoiceError> {
    let id = parse_id(&id)?;
    let invoice = state.service.get_invoice(&id).await?;
    Ok(to_response(&invoice))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, InvoiceError> {
    let id = parse_id(&id)?;
    state.service.delete_invoice(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ItemInput>,
) -> Result<Json<InvoiceResponse>, InvoiceError> {
    let id = parse_id(&id)?;
    let invoice = state.service.add_item(&id, payload).await?;
    Ok(to_response(&invoice))
}

pub async fn replace_items(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ReplaceItemsRequest>,
) -> Result<Json<InvoiceResponse>, InvoiceError> {
    let id = parse_id(&id)?;
    let invoice = state.service.replace_items(&id, payload.items).await?;
    Ok(to_response(&invoice))
}

pub async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PaymentInput>,
) -> Result<Json<InvoiceResponse>, InvoiceError> {
    let id = parse_id(&id)?;
    let invoice = state.service.record_payment(&id, payload).await?;
    Ok(to_response(&invoice))
}

pub async fn payment_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Payment>>, InvoiceError> {
    let id = parse_id(&id)?;
    let payments = state.service.payment_history(&id).await?;
    Ok(Json(payments))
}
