mod macros;

mod auth_client;
mod booking_client;
mod cart_client;
mod notification_client;
mod order_client;
mod product_client;
mod review_client;
mod wishlist_client;

pub use auth_client::AuthClient;
pub use booking_client::BookingClient;
pub use cart_client::CartClient;
pub use notification_client::NotificationClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use review_client::ReviewClient;
pub use wishlist_client::WishlistClient;
