use serde_json::json;
use tracing::{debug, error, info, instrument};

use crate::api::ApiClient;
use crate::clients::ProductClient;
use crate::domain::{
    Cart, Order, OrderDraft, OrderItem, OrderStatus, FALLBACK_MEETING_LOCATION,
};
use crate::error::OrderError;
use crate::impl_client_methods;
use crate::session::SessionStore;

/// Client for the order endpoints.
///
/// This client handles the checkout orchestration: snapshotting the cart
/// with fresh seller details, staging the draft in the session, and
/// turning it into a durable order once the buyer confirms the meeting.
#[derive(Clone)]
pub struct OrderClient {
    inner: ApiClient,
    product_client: ProductClient,
    session: SessionStore,
}

impl OrderClient {
    pub fn new(inner: ApiClient, product_client: ProductClient, session: SessionStore) -> Self {
        Self {
            inner,
            product_client,
            session,
        }
    }

    /// Assembles the checkout snapshot from the cart and stages it for
    /// meeting confirmation. Returns `Ok(None)` when no valid items
    /// remain, in which case nothing is staged and nothing is sent.
    #[instrument(skip(self, cart))]
    pub async fn begin_checkout(&self, cart: &Cart) -> Result<Option<OrderDraft>, OrderError> {
        info!("Processing checkout request (Client Side)");

        // Step 1: Keep only lines whose product still exists
        let valid: Vec<_> = cart.valid_items().collect();
        if valid.is_empty() {
            info!("No valid items in cart, nothing to check out");
            return Ok(None);
        }

        // Step 2: Snapshot each line, refreshing the product for its
        // seller details; a failed refresh falls back to the cart copy
        // with no seller attached
        let mut items = Vec::with_capacity(valid.len());
        for line in &valid {
            let Some(product) = line.product.as_ref() else {
                continue;
            };
            let item = match self.product_client.get_product(&product.id).await {
                Ok(fresh) => OrderItem {
                    seller: fresh.seller.clone(),
                    product: fresh,
                    quantity: line.quantity,
                    price: product.price,
                },
                Err(e) => {
                    error!(error = %e, product_id = %product.id, "Product refresh failed, using cart copy");
                    OrderItem {
                        product: product.clone(),
                        seller: None,
                        quantity: line.quantity,
                        price: product.price,
                    }
                }
            };
            items.push(item);
        }

        // Step 3: Meeting location comes from the first valid line,
        // falling back to the seller-decides placeholder
        let meeting_location = valid
            .first()
            .and_then(|line| line.product.as_ref())
            .and_then(|product| product.meeting_location.clone())
            .unwrap_or_else(|| FALLBACK_MEETING_LOCATION.to_string());

        // Step 4: Stage the draft; it becomes durable only on confirmation
        let draft = OrderDraft {
            items,
            total_amount: cart.total(),
            buyer_confirmed: false,
            status: OrderStatus::Pending,
            meeting_location: Some(meeting_location),
        };
        self.session.stage_order(draft.clone());
        info!(total = draft.total_amount, "Checkout snapshot staged");

        Ok(Some(draft))
    }

    /// Turns the staged snapshot into a durable order. Requires a staged
    /// draft, the buyer's explicit acknowledgement, and a meeting
    /// location; the snapshot is discarded once the server accepts it.
    #[instrument(skip(self))]
    pub async fn confirm_meeting(&self, acknowledged: bool) -> Result<Order, OrderError> {
        // Step 1: The staged snapshot must still be there
        let Some(draft) = self.session.staged_order() else {
            error!("No staged order to confirm");
            return Err(OrderError::NothingToConfirm);
        };

        // Step 2: The buyer must have ticked the agreement checkbox
        if !acknowledged {
            return Err(OrderError::MeetingNotAcknowledged);
        }

        // Step 3: A meeting location must have survived checkout
        let location = draft
            .meeting_location
            .clone()
            .filter(|location| !location.is_empty());
        let Some(meeting_location) = location else {
            error!("Staged order carries no meeting location");
            return Err(OrderError::MissingMeetingLocation);
        };

        // Step 4: Create the durable order, then drop the snapshot
        debug!("Sending request");
        let order: Order = self
            .inner
            .post(
                "/orders",
                json!({
                    "items": draft.items,
                    "totalAmount": draft.total_amount,
                    "meetingLocation": meeting_location,
                    "buyerConfirmed": true,
                    "status": OrderStatus::MeetingScheduled,
                }),
            )
            .await?;

        self.session.discard_staged_order();
        info!(order_id = %order.id, "Order created");
        Ok(order)
    }

    /// The signed-in buyer's order history.
    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.inner.get("/orders").await.map_err(OrderError::from)
    }

    /// Buyer's manual "I have paid" assertion for an order.
    #[instrument(skip(self))]
    pub async fn confirm_payment(&self, order_id: &str) -> Result<(), OrderError> {
        debug!("Sending request");
        self.inner
            .put::<serde_json::Value>(format!("/orders/{order_id}/confirm-payment"), json!({}))
            .await
            .map_err(OrderError::from)?;
        info!("Payment confirmed");
        Ok(())
    }
}

impl_client_methods!(OrderClient, Order, OrderError, order, "/orders");
