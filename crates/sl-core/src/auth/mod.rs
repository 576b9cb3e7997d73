//! Authentication domain types.

mod identity;

pub use identity::Identity;
