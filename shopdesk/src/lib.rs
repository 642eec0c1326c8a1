//! # Shopdesk: retail dashboard API client
//!
//! Rust client for the shopdesk inventory/sales backend. It wraps the
//! `/auth/*` session endpoints and the dashboard resources (stock, stock
//! movements, sales, quotes) behind one [`ApiClient`] that handles token
//! attachment and expiry for you:
//!
//! - every request carries the current access token;
//! - on a `401`, a single refresh runs no matter how many requests are in
//!   flight, the rest wait in a queue and replay with the new token;
//! - token pairs are persisted through a [`SessionStore`] so a session
//!   survives process restarts.
//!
//! ## Quick Start
//!
//! ```ignore
//! use shopdesk::{ApiClient, ClientConfig, FileStore, StockQuery};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> shopdesk::Result<()> {
//!     let config = ClientConfig::from_env()?;
//!     let store = Arc::new(FileStore::open("session.json"));
//!     let client = ApiClient::with_store(config, store);
//!
//!     if !client.can_request() {
//!         client.login("ana@example.com", "hunter2").await?;
//!     }
//!
//!     let low = StockQuery::new().with_search("charcoal");
//!     for product in &client.stock(&low).await?.data {
//!         println!("{}: {} {}", product.name, product.quantity, product.unit);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The workspace is split into focused crates:
//!
//! - [`shopdesk_core`] - error taxonomy, session and resource wire types
//! - [`shopdesk_client`] - HTTP client, refresh coordination, session stores

#![warn(missing_docs)]
#![deny(unsafe_code)]

/// Core types, wire payloads, and error handling.
pub use shopdesk_core as core;

/// HTTP client, refresh coordination, and session stores.
pub use shopdesk_client as client;

// Errors
pub use shopdesk_core::{ApiError, AuthError, Result, TransportError};

// Session
pub use shopdesk_core::{Session, User, ValidateResponse};

// Resources
pub use shopdesk_core::{
    Category, Installment, InstallmentType, MovementKind, NewMovement, NewProduct, NewQuote,
    NewSale, Page, PaymentCondition, Product, ProductPatch, Quote, QuoteItem, Sale, SaleItem,
    StockMovement, StockStats,
};

// Client
pub use shopdesk_client::{ApiClient, ClientConfig, DEFAULT_REFRESH_TIMEOUT};

// Queries
pub use shopdesk_client::{MovementQuery, QuoteQuery, SaleQuery, StockQuery};

// Session stores
pub use shopdesk_client::{keys, FileStore, MemoryStore, SessionStore};

/// Commonly used imports, for glob import.
pub mod prelude {
    pub use crate::{
        ApiClient, ApiError, AuthError, ClientConfig, FileStore, MemoryStore, MovementQuery,
        QuoteQuery, Result, SaleQuery, Session, SessionStore, StockQuery, User,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // End-to-end smoke test through the facade re-exports.
    #[tokio::test]
    async fn test_login_then_list_stock() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(serde_json::json!({
                "email": "ana@example.com",
                "password": "hunter2",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": {"id": 1, "email": "ana@example.com", "name": "Ana"},
                "access_token": "A1",
                "refresh_token": "R1",
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/stock"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{
                    "id": 1,
                    "name": "Charcoal 5kg",
                    "category": "Supplies",
                    "quantity": 3,
                    "minQuantity": 5,
                    "price": 29.9,
                    "unit": "bag",
                }],
                "total": 1,
                "page": 1,
                "limit": 20,
            })))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::new());
        let client = ApiClient::with_store(ClientConfig::new(server.uri()), store);
        let session = client.login("ana@example.com", "hunter2").await.unwrap();
        assert_eq!(session.user.name, "Ana");

        let page = client.stock(&StockQuery::new()).await.unwrap();
        assert_eq!(page.total, 1);
        assert!(page.data[0].is_low_stock());
    }
}
