use tracing::{debug, instrument};

use crate::api::{ApiClient, FormPart};
use crate::domain::{NewListing, Product, MIN_LISTING_IMAGES};
use crate::error::ProductError;
use crate::impl_basic_client;

/// Client for the product endpoints.
#[derive(Clone)]
pub struct ProductClient {
    inner: ApiClient,
}

impl_basic_client!(ProductClient, Product, ProductError, product, "/products");

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.inner.get("/products").await.map_err(ProductError::from)
    }

    /// The catalog restricted to one seller's listings.
    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn my_listings(&self, seller_id: &str) -> Result<Vec<Product>, ProductError> {
        let products = self.list_products().await?;
        Ok(products
            .into_iter()
            .filter(|product| {
                product
                    .seller
                    .as_ref()
                    .is_some_and(|seller| seller.id == seller_id)
            })
            .collect())
    }

    /// Publishes a new listing as a multipart upload. Validation runs
    /// before anything is sent, in the same order the listing form checks
    /// it: title, description, price, image count, session.
    #[instrument(skip(self, listing), fields(title = %listing.title))]
    #[allow(dead_code)]
    pub async fn publish_listing(&self, listing: NewListing) -> Result<Product, ProductError> {
        if listing.title.trim().is_empty() {
            return Err(ProductError::MissingTitle);
        }
        if listing.description.trim().is_empty() {
            return Err(ProductError::MissingDescription);
        }
        if !(listing.price > 0.0) {
            return Err(ProductError::InvalidPrice);
        }
        if listing.images.len() < MIN_LISTING_IMAGES {
            return Err(ProductError::NotEnoughImages(MIN_LISTING_IMAGES));
        }
        if !self.inner.is_logged_in() {
            return Err(ProductError::LoginRequired);
        }

        debug!(images = listing.images.len(), "Sending request");

        // Specifications travel as one JSON-encoded text field.
        let specifications = serde_json::Value::Object(
            listing
                .specifications
                .into_iter()
                .map(|(key, value)| (key, serde_json::Value::String(value)))
                .collect(),
        )
        .to_string();

        let mut parts = vec![
            FormPart::text("title", listing.title),
            FormPart::text("description", listing.description),
            FormPart::text("price", listing.price.to_string()),
            FormPart::text("category", listing.category),
            FormPart::text("condition", listing.condition),
            FormPart::text("meetingLocation", listing.meeting_location),
            FormPart::text("specifications", specifications),
        ];
        for image in listing.images {
            parts.push(FormPart::file("images", image.file_name, image.bytes));
        }

        self.inner
            .post_form("/products", parts)
            .await
            .map_err(ProductError::from)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use assert_matches::assert_matches;

    use super::*;
    use crate::api::{ApiRequest, ApiResponse, Transport};
    use crate::domain::ImageUpload;
    use crate::error::ApiError;
    use crate::session::SessionStore;

    /// Transport that fails the test if anything reaches it.
    struct NoTraffic;

    #[async_trait::async_trait]
    impl Transport for NoTraffic {
        async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            panic!("unexpected request: {} {}", request.method, request.path);
        }
    }

    fn client(session: &SessionStore) -> ProductClient {
        ProductClient::new(ApiClient::new(Arc::new(NoTraffic), session.clone()))
    }

    fn listing() -> NewListing {
        NewListing {
            title: "Drafter".to_string(),
            description: "Complete set".to_string(),
            price: 450.0,
            category: "Books".to_string(),
            condition: "Like New".to_string(),
            meeting_location: "Block 32".to_string(),
            specifications: HashMap::new(),
            images: vec![
                ImageUpload::new("a.jpg", vec![1]),
                ImageUpload::new("b.jpg", vec![2]),
                ImageUpload::new("c.jpg", vec![3]),
            ],
        }
    }

    #[tokio::test]
    async fn listing_validation_rejects_before_any_upload() {
        let session = SessionStore::new();
        session.set_token("jwt");
        let client = client(&session);

        let mut no_title = listing();
        no_title.title = "  ".to_string();
        assert_matches!(
            client.publish_listing(no_title).await,
            Err(ProductError::MissingTitle)
        );

        let mut bad_price = listing();
        bad_price.price = 0.0;
        assert_matches!(
            client.publish_listing(bad_price).await,
            Err(ProductError::InvalidPrice)
        );

        let mut two_images = listing();
        two_images.images.pop();
        assert_matches!(
            client.publish_listing(two_images).await,
            Err(ProductError::NotEnoughImages(3))
        );
    }

    #[tokio::test]
    async fn publishing_requires_a_session() {
        let session = SessionStore::new();
        let client = client(&session);

        assert_matches!(
            client.publish_listing(listing()).await,
            Err(ProductError::LoginRequired)
        );
    }
}
