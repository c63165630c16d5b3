use std::sync::Arc;

use tracing::{error, info};

use super::poller::{badge_refresher, refresh_badges};
use crate::api::{ApiClient, HttpTransport, Transport};
use crate::clients::{
    AuthClient, BookingClient, CartClient, NotificationClient, OrderClient, ProductClient,
    ReviewClient, WishlistClient,
};
use crate::config::ApiConfig;
use crate::session::SessionStore;

/// The main application system wiring every resource client over one
/// shared transport and one session store.
///
/// Responsible for building the clients, starting the badge poller, and
/// handling shutdown.
pub struct MarketSystem {
    pub auth_client: AuthClient,
    pub product_client: ProductClient,
    pub booking_client: BookingClient,
    pub cart_client: CartClient,
    pub order_client: OrderClient,
    pub notification_client: NotificationClient,
    pub wishlist_client: WishlistClient,
    pub review_client: ReviewClient,
    pub session: SessionStore,
    pub config: ApiConfig,
    poller: tokio::task::JoinHandle<()>,
}

impl MarketSystem {
    pub fn new(config: ApiConfig) -> Self {
        let transport = Arc::new(HttpTransport::new(config.base_url.clone()));
        Self::with_transport(config, transport)
    }

    /// Wires the system over any transport; tests inject a scripted one.
    pub fn with_transport(config: ApiConfig, transport: Arc<dyn Transport>) -> Self {
        // 1. Shared session store and API core
        let session = SessionStore::new();
        let api = ApiClient::new(transport, session.clone());

        // 2. Per-resource clients over the shared core
        let auth_client = AuthClient::new(api.clone(), session.clone());
        let product_client = ProductClient::new(api.clone());
        let booking_client = BookingClient::new(api.clone());
        let cart_client = CartClient::new(api.clone(), session.clone());
        let order_client = OrderClient::new(api.clone(), product_client.clone(), session.clone());
        let notification_client = NotificationClient::new(api.clone(), session.clone());
        let wishlist_client = WishlistClient::new(api.clone());
        let review_client = ReviewClient::new(api);

        // 3. Background badge poller
        let poller = tokio::spawn(badge_refresher(
            cart_client.clone(),
            notification_client.clone(),
            session.clone(),
            config.badge_poll_interval,
        ));

        Self {
            auth_client,
            product_client,
            booking_client,
            cart_client,
            order_client,
            notification_client,
            wishlist_client,
            review_client,
            session,
            config,
            poller,
        }
    }

    /// On-demand badge refresh, used right after sign-in rather than
    /// waiting out the first poll interval.
    pub async fn refresh_badges(&self) {
        refresh_badges(&self.cart_client, &self.notification_client, &self.session).await;
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // The poller loops forever; abort it and swallow the cancellation.
        self.poller.abort();
        if let Err(e) = self.poller.await {
            if !e.is_cancelled() {
                error!("Poller task failed: {:?}", e);
                return Err(format!("Poller task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
