use serde_json::json;
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::domain::Review;
use crate::error::ApiError;
use crate::impl_client_new;

/// Client for the review endpoints.
#[derive(Clone)]
pub struct ReviewClient {
    inner: ApiClient,
}

impl_client_new!(ReviewClient);

impl ReviewClient {
    #[instrument(skip(self))]
    pub async fn product_reviews(&self, product_id: &str) -> Result<Vec<Review>, ApiError> {
        debug!("Sending request");
        self.inner.get(format!("/reviews/product/{product_id}")).await
    }

    #[instrument(skip(self, text))]
    #[allow(dead_code)]
    pub async fn submit_review(
        &self,
        product_id: &str,
        rating: u8,
        text: &str,
    ) -> Result<(), ApiError> {
        debug!("Sending request");
        self.inner
            .post::<serde_json::Value>(
                "/reviews",
                json!({ "productId": product_id, "rating": rating, "review": text }),
            )
            .await?;
        Ok(())
    }
}
