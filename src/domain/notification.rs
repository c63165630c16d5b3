use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::order::OrderStatus;
use super::user::UserSummary;

/// What a notification is about. Unrecognized kinds decode to `Other`
/// rather than failing the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BookingRequest,
    SellerConfirmed,
    BuyerConfirmed,
    PaymentCompleted,
    #[serde(other)]
    Other,
}

/// Product snapshot the server embeds in a notification. Carries just
/// what the feed renders.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Order snapshot embedded in payment-related notifications.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub meeting_location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub product: Option<ProductSnapshot>,
    #[serde(default)]
    pub buyer: Option<UserSummary>,
    #[serde(default)]
    pub order: Option<OrderSnapshot>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Local echo of a confirmed meeting: the server rewrites the
    /// notification, the client mirrors it without refetching the list.
    #[allow(dead_code)]
    pub fn mark_meeting_confirmed(&mut self) {
        self.kind = NotificationKind::SellerConfirmed;
        self.is_read = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_kinds_decode_to_other() {
        let notification: Notification = serde_json::from_value(json!({
            "_id": "n1",
            "type": "price_drop",
            "title": "Price drop",
            "message": "A wishlisted item got cheaper",
            "createdAt": "2025-08-15T12:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(notification.kind, NotificationKind::Other);
        assert!(!notification.is_read);
    }

    #[test]
    fn populated_snapshots_decode() {
        let notification: Notification = serde_json::from_value(json!({
            "_id": "n3",
            "type": "payment_completed",
            "title": "Payment received",
            "message": "Rahul confirmed the payment",
            "isRead": false,
            "product": {
                "_id": "p1",
                "title": "Engineering Graphics Drafter",
                "price": 450.0,
                "images": ["/uploads/drafter-1.jpg"]
            },
            "buyer": { "_id": "u2", "name": "Rahul" },
            "order": {
                "_id": "68a1f00dc0ffee0001234567",
                "totalAmount": 450.0,
                "status": "meeting_scheduled",
                "meetingLocation": "Block 32 cafeteria"
            },
            "createdAt": "2025-08-15T12:00:00.000Z"
        }))
        .unwrap();

        let product = notification.product.unwrap();
        assert_eq!(product.title, "Engineering Graphics Drafter");
        assert_eq!(product.price, 450.0);
        assert_eq!(product.images, ["/uploads/drafter-1.jpg"]);

        let order = notification.order.unwrap();
        assert_eq!(order.total_amount, 450.0);
        assert_eq!(order.status, Some(OrderStatus::MeetingScheduled));
        assert_eq!(order.meeting_location.as_deref(), Some("Block 32 cafeteria"));

        assert_eq!(notification.buyer.unwrap().name, "Rahul");
    }

    #[test]
    fn confirming_a_meeting_rewrites_the_kind_and_reads_it() {
        let mut notification: Notification = serde_json::from_value(json!({
            "_id": "n2",
            "type": "booking_request",
            "createdAt": "2025-08-15T12:00:00.000Z"
        }))
        .unwrap();

        notification.mark_meeting_confirmed();

        assert_eq!(notification.kind, NotificationKind::SellerConfirmed);
        assert!(notification.is_read);
    }
}
