pub mod booking;
pub mod cart;
pub mod notification;
pub mod order;
pub mod product;
pub mod review;
pub mod user;

pub use booking::*;
pub use cart::*;
pub use notification::*;
pub use order::*;
pub use product::*;
pub use review::*;
pub use user::*;
