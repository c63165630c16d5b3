pub mod catalog;
pub mod lifecycle;

pub use catalog::*;
pub use lifecycle::*;
