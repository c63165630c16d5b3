use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserSummary;

/// Minimum number of images a new listing must carry.
pub const MIN_LISTING_IMAGES: usize = 3;

/// Lifecycle of a listed product. The server owns the transitions; the
/// client only reflects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Available,
    PendingConfirmation,
    MeetingScheduled,
    Sold,
}

impl Default for ProductStatus {
    fn default() -> Self {
        ProductStatus::Available
    }
}

/// Represents a product listed on the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_location: Option<String>,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<UserSummary>,
    #[serde(default)]
    pub specifications: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for publishing a new listing.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub condition: String,
    pub meeting_location: String,
    pub specifications: HashMap<String, String>,
    pub images: Vec<ImageUpload>,
}

/// An image attached to a new listing.
#[derive(Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    #[allow(dead_code)]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

// Image payloads can run to megabytes; log the size, not the content.
impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The signed-in user's wishlist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wishlist {
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Wishlist {
    pub fn contains(&self, product_id: &str) -> bool {
        self.products.iter().any(|product| product.id == product_id)
    }
}
