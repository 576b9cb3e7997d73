//! Stateful controllers.
//!
//! Each controller owns one observable state and is the only writer of it.

mod auth;
mod exception_channel;
mod item_list;

pub use auth::AuthController;
pub use exception_channel::{AppException, ExceptionChannel, ItemOperation};
pub use item_list::ItemListController;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the guard if a previous holder panicked.
///
/// The guarded values here are task handles and controller pointers; a
/// panic elsewhere never leaves them half-written.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
