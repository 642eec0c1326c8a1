//! Typed payloads for the dashboard's resource endpoints.
//!
//! Domain payloads are camelCase on the wire; every struct pins that with
//! an explicit `rename_all` so the Rust field names stay idiomatic.

mod movement;
mod page;
mod product;
mod quote;
mod sale;

pub use movement::{MovementKind, NewMovement, StockMovement};
pub use page::Page;
pub use product::{Category, NewProduct, Product, ProductPatch, StockStats};
pub use quote::{NewQuote, PaymentCondition, Quote, QuoteItem};
pub use sale::{Installment, InstallmentType, NewSale, Sale, SaleItem};
