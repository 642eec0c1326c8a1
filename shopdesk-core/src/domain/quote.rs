//! Price quote types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One line of a quote, with the quoted price next to the list price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub original_price: f64,
    #[serde(default)]
    pub observation: String,
}

/// One offered payment condition on a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCondition {
    pub method: String,
    pub installments: u32,
    pub discount: f64,
    pub final_value: f64,
}

/// A price quote handed to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: i64,
    pub customer: String,
    pub date: NaiveDate,
    pub valid_until: NaiveDate,
    pub items: Vec<QuoteItem>,
    #[serde(default)]
    pub observation: String,
    pub payment_conditions: Vec<PaymentCondition>,
    pub subtotal: f64,
}

impl Quote {
    /// Whether the quote is still valid on the given day.
    pub fn is_valid_on(&self, day: NaiveDate) -> bool {
        day <= self.valid_until
    }
}

/// Payload for creating a quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    pub customer: String,
    pub date: NaiveDate,
    pub valid_until: NaiveDate,
    pub items: Vec<QuoteItem>,
    #[serde(default)]
    pub observation: String,
    pub payment_conditions: Vec<PaymentCondition>,
    pub subtotal: f64,
}
