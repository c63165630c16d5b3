use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::Product;
use super::user::UserSummary;

/// Meeting location used when no cart line carries one.
pub const FALLBACK_MEETING_LOCATION: &str = "To be confirmed by seller";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    MeetingScheduled,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

/// One order line: a snapshot of the product and its seller at checkout
/// time, so the order survives later edits to the listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product: Product,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<UserSummary>,
    pub quantity: u32,
    pub price: f64,
}

/// A durable order as the server returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    #[serde(default)]
    pub meeting_location: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub buyer_confirmed: bool,
    /// Id of the buyer who placed the order.
    pub user: String,
    pub created_at: DateTime<Utc>,
}

/// The checkout snapshot staged between the cart and meeting
/// confirmation. Starts unconfirmed; confirmation flips `buyer_confirmed`
/// and turns it into a durable [`Order`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub buyer_confirmed: bool,
    pub status: OrderStatus,
    #[serde(default)]
    pub meeting_location: Option<String>,
}

impl Order {
    /// Short display id: the last eight characters of the id, uppercased.
    pub fn short_id(&self) -> String {
        let start = self.id.len().saturating_sub(8);
        self.id.get(start..).unwrap_or(&self.id).to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(id: &str) -> Order {
        serde_json::from_value(json!({
            "_id": id,
            "totalAmount": 450.0,
            "status": "meeting_scheduled",
            "user": "u1",
            "createdAt": "2025-08-14T08:00:00.000Z"
        }))
        .unwrap()
    }

    #[test]
    fn short_id_takes_the_last_eight_chars() {
        assert_eq!(order("68a1f00dc0ffee0001234567").short_id(), "01234567");
        assert_eq!(order("68a1beef").short_id(), "68A1BEEF");
    }

    #[test]
    fn short_id_of_a_short_id_is_the_whole_id() {
        assert_eq!(order("42").short_id(), "42");
    }

    #[test]
    fn statuses_decode_from_wire_names() {
        assert_eq!(order("x").status, OrderStatus::MeetingScheduled);
        let paid: PaymentStatus = serde_json::from_value(json!("paid")).unwrap();
        assert_eq!(paid, PaymentStatus::Paid);
    }
}
