use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::Product;
use super::user::UserSummary;

/// Proposed time sent when the buyer leaves the field blank.
pub const DEFAULT_PROPOSED_TIME: &str = "To be decided";

/// State of a booking as the seller sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    PendingConfirmation,
    Confirmed,
    Cancelled,
}

/// Product-lifecycle stage attached to a buyer's booking. The server can
/// grow this set, so unknown values decode to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStage {
    PendingConfirmation,
    Confirmed,
    MeetingScheduled,
    Sold,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// Meeting negotiation state: what the buyer proposed and what the seller
/// locked in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_time: Option<String>,
}

/// A booking request as returned to the seller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub buyer: Option<UserSummary>,
    pub status: BookingStatus,
    #[serde(default)]
    pub meeting_details: MeetingDetails,
    #[serde(default)]
    pub payment_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

/// A booking as returned to the buyer. Carries the product's lifecycle
/// stage rather than the seller-side request status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerBooking {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub product: Option<Product>,
    pub product_status: BookingStage,
    #[serde(default)]
    pub meeting_details: MeetingDetails,
    #[serde(default)]
    pub payment_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

/// Buyer inputs for a new booking. Empty fields fall back to the
/// product's meeting location and [`DEFAULT_PROPOSED_TIME`].
#[derive(Debug, Clone, Default)]
pub struct BookingProposal {
    pub location: Option<String>,
    pub time: Option<String>,
}

/// Seller inputs when confirming a meeting. Empty fields fall back to
/// whatever the buyer proposed.
#[derive(Debug, Clone, Default)]
pub struct MeetingPlace {
    pub location: Option<String>,
    pub time: Option<String>,
}
