//! # sl-core
//!
//! Core domain models and port contracts for Shoplist.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: identities, list items, the list state machine, the
//! observable primitives controllers publish through, and the ports the
//! remote auth service and document store are reached by.

pub mod auth;
pub mod config;
pub mod errors;
pub mod ids;
pub mod item;
pub mod observable;
pub mod ports;

// Re-export commonly used types at the crate root
pub use auth::Identity;
pub use config::AppConfig;
pub use errors::{AuthError, StoreError};
pub use ids::{ItemId, UserId};
pub use item::{FilterCriterion, Item, ListState};
pub use observable::{Derived, Observable, ReadOnly};
