//! Port interfaces for the application layer
//!
//! Ports define the contract between the controllers and the remote
//! services they drive. Adapters live in `sl-infra`; the application layer
//! only ever sees these traits.
//!
//! Ports return `anyhow::Result`. Translating adapter failures into the
//! uniform [`AuthError`](crate::errors::AuthError) /
//! [`StoreError`](crate::errors::StoreError) kinds is the caller's job.

pub mod auth_session;
pub mod item_store;


pub use auth_session::AuthSessionPort;
pub use item_store::ItemStorePort;
