//! Sale types, including installment plans.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a sale is paid out over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentType {
    /// Paid in full up front.
    #[serde(rename = "avista")]
    Upfront,
    /// Split into scheduled installments.
    #[serde(rename = "parcelado")]
    Installments,
    /// Custom terms negotiated with the customer.
    #[serde(rename = "negociado")]
    Negotiated,
}

impl InstallmentType {
    /// The wire value, as used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upfront => "avista",
            Self::Installments => "parcelado",
            Self::Negotiated => "negociado",
        }
    }
}

/// One line of a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

/// One scheduled installment payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub number: u32,
    pub value: f64,
    pub due_date: NaiveDate,
}

/// A registered sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub customer: String,
    pub date: NaiveDate,
    pub items: Vec<SaleItem>,
    pub payment_method: String,
    pub installment_type: InstallmentType,
    #[serde(default)]
    pub installments: Vec<Installment>,
    pub total: f64,
}

/// Payload for registering a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub customer: String,
    pub date: NaiveDate,
    pub items: Vec<SaleItem>,
    pub payment_method: String,
    pub installment_type: InstallmentType,
    #[serde(default)]
    pub installments: Vec<Installment>,
    pub total: f64,
}
