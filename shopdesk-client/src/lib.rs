//! Authenticated HTTP client for the shopdesk backend.
//!
//! The centerpiece is [`ApiClient`]: a cloneable handle that attaches the
//! current access token to every request and transparently recovers from
//! expiry. When a request comes back `401`, exactly one caller runs the
//! `/auth/refresh` exchange while concurrent callers park on a wait queue;
//! once the new token pair lands, every parked request replays with it. A
//! failed refresh rejects the whole queue and ends the session.
//!
//! Tokens survive restarts through a [`SessionStore`]; [`FileStore`] gives
//! file-backed persistence and [`MemoryStore`] keeps everything in-process.
//!
//! ```no_run
//! use shopdesk_client::{ApiClient, ClientConfig, StockQuery};
//!
//! # async fn run() -> shopdesk_core::Result<()> {
//! let client = ApiClient::new(ClientConfig::new("https://api.example.com"));
//! let session = client.login("ana@example.com", "hunter2").await?;
//! println!("signed in as {}", session.user.email);
//!
//! let page = client.stock(&StockQuery::new().with_limit(20)).await?;
//! for product in &page.data {
//!     println!("{} x{}", product.name, product.quantity);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod resources;
pub mod store;

pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_REFRESH_TIMEOUT};
pub use resources::{MovementQuery, QuoteQuery, SaleQuery, StockQuery};
pub use store::{keys, FileStore, MemoryStore, SessionStore};
