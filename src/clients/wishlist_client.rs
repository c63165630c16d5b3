use serde_json::json;
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::domain::Wishlist;
use crate::error::ApiError;
use crate::impl_client_new;

/// Client for the wishlist endpoints.
#[derive(Clone)]
pub struct WishlistClient {
    inner: ApiClient,
}

impl_client_new!(WishlistClient);

impl WishlistClient {
    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn fetch_wishlist(&self) -> Result<Wishlist, ApiError> {
        debug!("Sending request");
        self.inner.get("/wishlist").await
    }

    #[instrument(skip(self))]
    pub async fn add(&self, product_id: &str) -> Result<(), ApiError> {
        debug!("Sending request");
        self.inner
            .post::<serde_json::Value>("/wishlist/add", json!({ "productId": product_id }))
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn remove(&self, product_id: &str) -> Result<(), ApiError> {
        debug!("Sending request");
        self.inner
            .delete::<serde_json::Value>(format!("/wishlist/remove/{product_id}"))
            .await?;
        Ok(())
    }

    /// Membership toggle: removes the product if wishlisted, adds it
    /// otherwise. Returns whether it is wishlisted afterwards.
    #[instrument(skip(self, wishlist))]
    #[allow(dead_code)]
    pub async fn toggle(&self, wishlist: &Wishlist, product_id: &str) -> Result<bool, ApiError> {
        if wishlist.contains(product_id) {
            self.remove(product_id).await?;
            Ok(false)
        } else {
            self.add(product_id).await?;
            Ok(true)
        }
    }
}
