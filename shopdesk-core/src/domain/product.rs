//! Catalog types: products, categories, stock statistics.

use serde::{Deserialize, Serialize};

/// A catalog product with its current stock level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub min_quantity: i64,
    pub price: f64,
    pub unit: String,
}

impl Product {
    /// Whether the stock level sits below the configured minimum.
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.min_quantity
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub min_quantity: i64,
    pub price: f64,
    pub unit: String,
}

/// Partial update payload for `PATCH /stock/{id}`; unset fields are
/// omitted from the body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Aggregates from `GET /stock/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockStats {
    pub total_products: u64,
    pub total_items: u64,
    pub total_value: f64,
    pub low_stock_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_product_wire_names_are_camel_case() {
        let json = serde_json::json!({
            "id": 3,
            "name": "Charcoal 5kg",
            "category": "Supplies",
            "quantity": 3,
            "minQuantity": 5,
            "price": 29.9,
            "unit": "bag",
        });
        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.min_quantity, 5);
        assert!(product.is_low_stock());

        let back = serde_json::to_value(&product).unwrap();
        assert!(back.get("minQuantity").is_some());
        assert!(back.get("min_quantity").is_none());
    }

    #[test]
    fn test_patch_omits_unset_fields() {
        let patch = ProductPatch {
            price: Some(31.5),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"price": 31.5}));
    }
}
