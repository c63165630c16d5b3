mod api;
mod app_system;
mod clients;
mod config;
mod domain;
mod error;
mod session;
mod views;

#[cfg(test)]
mod mock_framework;

use std::env;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, MarketSystem};
use crate::config::ApiConfig;
use crate::domain::{average_rating, Credentials};
use crate::views::{
    booking_progress, meeting_confirmation_view, notification_badge, payment_view, product_stage,
    AcknowledgeGate, CatalogFilter, SortKey,
};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting marketplace client");

    let config = ApiConfig::from_env();
    let system = MarketSystem::new(config);
    info!(api = %system.config.base_url, "Marketplace client ready");

    // Sign in with env-provided credentials
    let email = env::var("UNIMART_EMAIL").map_err(|_| "UNIMART_EMAIL is not set".to_string())?;
    let password =
        env::var("UNIMART_PASSWORD").map_err(|_| "UNIMART_PASSWORD is not set".to_string())?;

    let span = tracing::info_span!("sign_in");
    let user = async {
        info!("Signing in");
        system
            .auth_client
            .login(Credentials::new(email, password))
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(user_id = %user.id, user_name = %user.name, "Signed in successfully");

    // Badges straight away instead of waiting out the first poll tick
    system.refresh_badges().await;

    // Browse the catalog, cheapest first
    let span = tracing::info_span!("catalog");
    async {
        let products = match system.product_client.list_products().await {
            Ok(products) => products,
            Err(e) => {
                error!(error = %e, "Catalog fetch failed");
                return;
            }
        };

        let filter = CatalogFilter {
            sort: SortKey::PriceLow,
            ..CatalogFilter::default()
        };
        let listed = filter.apply(&products);
        info!(
            fetched = products.len(),
            listed = listed.len(),
            "Catalog loaded"
        );

        let Some(product) = listed.first() else {
            info!("Nothing available to buy right now");
            return;
        };

        let stage = product_stage(product.status, false);
        info!(
            title = %product.title,
            price = product.price,
            stage = stage.badge.label,
            can_book = stage.can_book,
            "Cheapest available listing"
        );

        match system.review_client.product_reviews(&product.id).await {
            Ok(reviews) => info!(
                rating = average_rating(&reviews),
                reviews = reviews.len(),
                "Product rating"
            ),
            Err(e) => error!(error = %e, "Reviews fetch failed"),
        }

        if let Err(e) = system.wishlist_client.add(&product.id).await {
            error!(error = %e, "Wishlist add failed");
        }

        if let Err(e) = system.cart_client.add_to_cart(&product.id, 1).await {
            error!(error = %e, "Adding to cart failed");
        }
    }
    .instrument(span)
    .await;

    // Checkout: stage the snapshot, acknowledge the meeting, create the
    // durable order, then gate payment on the seller's UPI details
    let span = tracing::info_span!("checkout");
    let order_result = async {
        info!("Running checkout");

        let cart = system
            .cart_client
            .fetch_cart()
            .await
            .map_err(|e| e.to_string())?;
        let draft = system
            .order_client
            .begin_checkout(&cart)
            .await
            .map_err(|e| e.to_string())?;
        if draft.is_none() {
            return Err("Cart has no valid items, checkout skipped".to_string());
        }

        // The buyer ticks the "I agree to meet" checkbox
        let mut gate = AcknowledgeGate::new();
        gate.set(true);
        let confirmation = meeting_confirmation_view(system.session.staged_order().as_ref(), gate);
        if let Some(message) = confirmation.error {
            return Err(message.to_string());
        }

        system
            .order_client
            .confirm_meeting(gate.is_armed())
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await;

    match order_result {
        Ok(order) => {
            info!(order_id = %order.short_id(), total = order.total_amount, "Order created");

            let payment = payment_view(&order, &user.id);
            match (&payment.seller_upi, payment.is_buyer) {
                (Some(upi), true) => {
                    info!(upi = %upi, amount = payment.amount, "Paying the seller directly");
                    if let Err(e) = system.order_client.confirm_payment(&order.id).await {
                        error!(error = %e, "Payment confirmation failed");
                    }
                }
                (None, _) => info!("Seller has not provided UPI details yet"),
                _ => info!("Viewer is not the buyer of this order"),
            }
        }
        Err(e) => error!(error = %e, "Checkout did not complete"),
    }

    // My bookings, as the buyer sees them
    match system.booking_client.my_bookings().await {
        Ok(bookings) => {
            for booking in &bookings {
                let view = booking_progress(booking.product_status, booking.payment_confirmed);
                info!(
                    booking_id = %booking.id,
                    stage = view.badge.label,
                    can_pay = view.can_confirm_payment,
                    "Booking"
                );
            }
        }
        Err(e) => error!(error = %e, "Bookings fetch failed"),
    }

    // Notification feed
    match system.notification_client.fetch_all().await {
        Ok(notifications) => {
            for notification in notifications.iter().filter(|n| !n.is_read) {
                let badge = notification_badge(notification.kind);
                info!(kind = badge.label, title = %notification.title, "Unread notification");
            }
        }
        Err(e) => error!(error = %e, "Notification fetch failed"),
    }

    info!(
        unread = system.session.unread_notifications(),
        cart_items = system.session.cart_items(),
        "Session badges"
    );

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
