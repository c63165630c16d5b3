//! Periodic refresh of the navbar badge counts.

use std::time::Duration;

use tokio::time::{interval_at, Instant};
use tracing::{debug, error};

use crate::clients::{CartClient, NotificationClient};
use crate::session::SessionStore;

/// Refreshes both badges once. Failures are logged and never fatal: a
/// failed cart fetch leaves the badge alone, a failed unread fetch zeroes
/// it so a stale count is not shown indefinitely.
pub async fn refresh_badges(
    cart_client: &CartClient,
    notification_client: &NotificationClient,
    session: &SessionStore,
) {
    if let Err(e) = cart_client.fetch_cart().await {
        error!(error = %e, "Cart badge refresh failed");
    }
    if let Err(e) = notification_client.unread_count().await {
        error!(error = %e, "Unread badge refresh failed");
        session.set_unread_notifications(0);
    }
}

/// Long-running badge refresher loop. The first tick lands one full
/// period after start; ticks while signed out are skipped.
pub async fn badge_refresher(
    cart_client: CartClient,
    notification_client: NotificationClient,
    session: SessionStore,
    period: Duration,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    loop {
        ticker.tick().await;
        if !session.is_logged_in() {
            debug!("Skipping badge refresh while signed out");
            continue;
        }
        refresh_badges(&cart_client, &notification_client, &session).await;
    }
}
