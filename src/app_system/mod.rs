//! System orchestration, startup, and shutdown logic.

pub mod market_system;
pub mod poller;
pub mod tracing;

pub use market_system::*;
pub use poller::*;
pub use self::tracing::*;
