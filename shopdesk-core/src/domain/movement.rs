//! Stock movement types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a stock movement.
///
/// The backend speaks Portuguese on the wire (`entrada`/`saida`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(rename = "entrada")]
    Inbound,
    #[serde(rename = "saida")]
    Outbound,
}

impl MovementKind {
    /// The wire value, as used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inbound => "entrada",
            Self::Outbound => "saida",
        }
    }
}

/// A recorded stock movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

/// Payload for recording a movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovement {
    pub product_id: i64,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_kind_wire_values() {
        assert_eq!(
            serde_json::to_string(&MovementKind::Inbound).unwrap(),
            "\"entrada\""
        );
        assert_eq!(
            serde_json::to_string(&MovementKind::Outbound).unwrap(),
            "\"saida\""
        );
    }

    #[test]
    fn test_movement_type_field_name() {
        let json = serde_json::json!({
            "id": 1,
            "productId": 8,
            "productName": "Charcoal 5kg",
            "type": "saida",
            "quantity": 30,
            "date": "2026-01-27",
            "notes": "walk-in sale",
        });
        let movement: StockMovement = serde_json::from_value(json).unwrap();
        assert_eq!(movement.kind, MovementKind::Outbound);
        assert_eq!(movement.date.to_string(), "2026-01-27");
    }
}
