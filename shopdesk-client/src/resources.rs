//! Typed wrappers over the dashboard's resource endpoints.
//!
//! These are thin consumers of [`ApiClient::request`]: they build query
//! strings and bodies, and leave authentication entirely to the client.
//! Export calls return the raw file bytes; what the caller does with them
//! (save, stream, hand to a download) is out of scope here.

use crate::client::ApiClient;
use bytes::Bytes;
use reqwest::Method;
use shopdesk_core::{
    Category, InstallmentType, MovementKind, NewMovement, NewProduct, NewQuote, NewSale, Page,
    Product, ProductPatch, Quote, Result, Sale, StockMovement, StockStats,
};

fn push(params: &mut Vec<(String, String)>, key: &str, value: Option<String>) {
    if let Some(value) = value {
        params.push((key.to_owned(), value));
    }
}

fn paging(params: &mut Vec<(String, String)>, page: Option<u32>, limit: Option<u32>) {
    push(params, "page", page.map(|p| p.to_string()));
    push(params, "limit", limit.map(|l| l.to_string()));
}

/// Filters for stock listings and exports.
#[derive(Debug, Clone, Default)]
pub struct StockQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl StockQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    fn filters(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push(&mut params, "category", self.category.clone());
        push(&mut params, "search", self.search.clone());
        params
    }

    fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        paging(&mut params, self.page, self.limit);
        params.extend(self.filters());
        params
    }
}

/// Filters for movement listings and exports.
#[derive(Debug, Clone, Default)]
pub struct MovementQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub kind: Option<MovementKind>,
    pub product_name: Option<String>,
}

impl MovementQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: MovementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    fn filters(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push(&mut params, "type", self.kind.map(|k| k.as_str().to_owned()));
        push(&mut params, "productName", self.product_name.clone());
        params
    }

    fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        paging(&mut params, self.page, self.limit);
        params.extend(self.filters());
        params
    }
}

/// Filters for sale listings and exports.
#[derive(Debug, Clone, Default)]
pub struct SaleQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub payment_method: Option<String>,
    pub installment_type: Option<InstallmentType>,
    pub customer: Option<String>,
    pub product_name: Option<String>,
}

impl SaleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = Some(payment_method.into());
        self
    }

    #[must_use]
    pub fn with_installment_type(mut self, installment_type: InstallmentType) -> Self {
        self.installment_type = Some(installment_type);
        self
    }

    #[must_use]
    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    #[must_use]
    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    fn filters(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push(&mut params, "paymentMethod", self.payment_method.clone());
        push(
            &mut params,
            "installmentType",
            self.installment_type.map(|t| t.as_str().to_owned()),
        );
        push(&mut params, "customer", self.customer.clone());
        push(&mut params, "productName", self.product_name.clone());
        params
    }

    fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        paging(&mut params, self.page, self.limit);
        params.extend(self.filters());
        params
    }
}

/// Filters for quote listings and exports.
#[derive(Debug, Clone, Default)]
pub struct QuoteQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub customer: Option<String>,
    pub product_name: Option<String>,
    pub payment_method: Option<String>,
    pub validity_status: Option<String>,
}

impl QuoteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    #[must_use]
    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = Some(payment_method.into());
        self
    }

    #[must_use]
    pub fn with_validity_status(mut self, status: impl Into<String>) -> Self {
        self.validity_status = Some(status.into());
        self
    }

    fn filters(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push(&mut params, "customer", self.customer.clone());
        push(&mut params, "productName", self.product_name.clone());
        push(&mut params, "paymentMethod", self.payment_method.clone());
        push(&mut params, "validityStatus", self.validity_status.clone());
        params
    }

    fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        paging(&mut params, self.page, self.limit);
        params.extend(self.filters());
        params
    }
}

impl ApiClient {
    /// List all product categories.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.request(Method::GET, "/categories", &[], None).await
    }

    /// List stock, paginated and filtered.
    pub async fn stock(&self, query: &StockQuery) -> Result<Page<Product>> {
        self.request(Method::GET, "/stock", &query.params(), None)
            .await
    }

    /// Fetch catalog-wide stock statistics.
    pub async fn stock_stats(&self) -> Result<StockStats> {
        self.request(Method::GET, "/stock/stats", &[], None).await
    }

    /// Create a product.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        let body = serde_json::to_value(product)?;
        self.request(Method::POST, "/stock", &[], Some(&body)).await
    }

    /// Apply a partial update to a product.
    pub async fn update_product(&self, id: i64, patch: &ProductPatch) -> Result<Product> {
        let body = serde_json::to_value(patch)?;
        self.request(Method::PATCH, &format!("/stock/{id}"), &[], Some(&body))
            .await
    }

    /// Delete a product.
    pub async fn delete_product(&self, id: i64) -> Result<()> {
        self.request_empty(Method::DELETE, &format!("/stock/{id}"), &[], None)
            .await
    }

    /// Download the stock export. Paging is not sent; only filters apply.
    pub async fn export_stock(&self, query: &StockQuery) -> Result<Bytes> {
        self.request_bytes(Method::GET, "/stock/export", &query.filters())
            .await
    }

    /// List stock movements, paginated and filtered.
    pub async fn movements(&self, query: &MovementQuery) -> Result<Page<StockMovement>> {
        self.request(Method::GET, "/stock_control", &query.params(), None)
            .await
    }

    /// Record a stock movement.
    pub async fn create_movement(&self, movement: &NewMovement) -> Result<StockMovement> {
        let body = serde_json::to_value(movement)?;
        self.request(Method::POST, "/stock_control", &[], Some(&body))
            .await
    }

    /// Download the movements export.
    pub async fn export_movements(&self, query: &MovementQuery) -> Result<Bytes> {
        self.request_bytes(Method::GET, "/stock_control/export", &query.filters())
            .await
    }

    /// List sales, paginated and filtered.
    pub async fn sales(&self, query: &SaleQuery) -> Result<Page<Sale>> {
        self.request(Method::GET, "/sales", &query.params(), None)
            .await
    }

    /// Register a sale.
    pub async fn create_sale(&self, sale: &NewSale) -> Result<Sale> {
        let body = serde_json::to_value(sale)?;
        self.request(Method::POST, "/sales", &[], Some(&body)).await
    }

    /// Download the sales export.
    pub async fn export_sales(&self, query: &SaleQuery) -> Result<Bytes> {
        self.request_bytes(Method::GET, "/sales/export", &query.filters())
            .await
    }

    /// List quotes, paginated and filtered.
    pub async fn quotes(&self, query: &QuoteQuery) -> Result<Page<Quote>> {
        self.request(Method::GET, "/quotes", &query.params(), None)
            .await
    }

    /// Create a quote.
    pub async fn create_quote(&self, quote: &NewQuote) -> Result<Quote> {
        let body = serde_json::to_value(quote)?;
        self.request(Method::POST, "/quotes", &[], Some(&body))
            .await
    }

    /// Download the quotes export.
    pub async fn export_quotes(&self, query: &QuoteQuery) -> Result<Bytes> {
        self.request_bytes(Method::GET, "/quotes/export", &query.filters())
            .await
    }
}
