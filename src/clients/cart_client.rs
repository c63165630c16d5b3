use serde_json::json;
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::domain::Cart;
use crate::error::ApiError;
use crate::session::SessionStore;

/// Client for the cart endpoints. Keeps the navbar badge in the session
/// store in step with every cart the server returns.
#[derive(Clone)]
pub struct CartClient {
    inner: ApiClient,
    session: SessionStore,
}

impl CartClient {
    pub fn new(inner: ApiClient, session: SessionStore) -> Self {
        Self { inner, session }
    }

    #[instrument(skip(self))]
    pub async fn fetch_cart(&self) -> Result<Cart, ApiError> {
        debug!("Sending request");
        let cart: Cart = self.inner.get("/cart").await?;
        self.session.set_cart_items(cart.items.len());
        Ok(cart)
    }

    /// Adds a product, then refetches the cart so the badge follows.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, product_id: &str, quantity: u32) -> Result<Cart, ApiError> {
        debug!("Sending request");
        self.inner
            .post::<serde_json::Value>(
                "/cart/add",
                json!({ "productId": product_id, "quantity": quantity }),
            )
            .await?;
        self.fetch_cart().await
    }

    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn set_quantity(&self, product_id: &str, quantity: u32) -> Result<Cart, ApiError> {
        debug!("Sending request");
        let cart: Cart = self
            .inner
            .put(
                format!("/cart/update/{product_id}"),
                json!({ "quantity": quantity }),
            )
            .await?;
        self.session.set_cart_items(cart.items.len());
        Ok(cart)
    }

    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn remove_item(&self, product_id: &str) -> Result<Cart, ApiError> {
        debug!("Sending request");
        let cart: Cart = self
            .inner
            .delete(format!("/cart/remove/{product_id}"))
            .await?;
        self.session.set_cart_items(cart.items.len());
        Ok(cart)
    }
}
