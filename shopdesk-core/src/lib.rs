//! Core types for the shopdesk API client.
//!
//! This crate holds everything the client crate and its consumers share:
//! the error taxonomy, the `/auth/*` session wire types, and the typed
//! payloads of the dashboard's resource endpoints (catalog, stock
//! movements, sales, quotes).
//!
//! It deliberately has no HTTP dependency; transport concerns live in
//! `shopdesk-client`.

pub mod domain;
pub mod errors;
pub mod session;

pub use domain::{
    Category, Installment, InstallmentType, MovementKind, NewMovement, NewProduct, NewQuote,
    NewSale, Page, PaymentCondition, Product, ProductPatch, Quote, QuoteItem, Sale, SaleItem,
    StockMovement, StockStats,
};
pub use errors::{ApiError, AuthError, Result, TransportError};
pub use session::{Session, User, ValidateResponse};
