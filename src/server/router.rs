//! Router builder for the invoice REST surface

use crate::server::handlers::{
    AppState, add_item, create_invoice, delete_invoice, get_invoice, health, list_invoices,
    payment_history, record_payment, replace_items, search_invoices,
};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full application router
///
/// - GET    /health                    - Health check
/// - GET    /invoices                  - List all invoices
/// - POST   /invoices                  - Create an invoice
/// - GET    /invoices/{id}             - Get a specific invoice
/// - DELETE /invoices/{id}             - Delete an invoice
/// - POST   /invoices/{id}/items       - Append one line item
/// - PUT    /invoices/{id}/items       - Replace the item list
/// - GET    /invoices/{id}/payments    - Payment history
/// - POST   /invoices/{id}/payments    - Record a payment
/// - GET    /search?q=                 - Search invoices
pub fn build_router(state: AppState) -> Router {
    // Permissive CORS: the browser UI is served from a different origin.
    Router::new()
        .route("/health", get(health))
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route(
            "/invoices/{id}",
            get(get_invoice).delete(delete_invoice),
        )
        .route("/invoices/{id}/items", post(add_item).put(replace_items))
        .route(
            "/invoices/{id}/payments",
            get(payment_history).post(record_payment),
        )
        .route("/search", get(search_invoices))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
