use std::fmt;

use sl_core::errors::StoreError;
use sl_core::observable::{Observable, ReadOnly};
use thiserror::Error;

/// The list mutation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemOperation {
    Add,
    Update,
    Delete,
}

impl fmt::Display for ItemOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Add => "add item",
            Self::Update => "update item",
            Self::Delete => "delete item",
        };
        f.write_str(label)
    }
}

/// A non-fatal failure waiting to be shown as a transient notice.
///
/// 非致命错误，用于短暂提示。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {error}")]
pub struct AppException {
    pub operation: ItemOperation,
    pub error: StoreError,
}

/// Single-slot side channel for non-fatal errors.
///
/// 单槽异常通道：新错误覆盖旧错误，不排队。
///
/// Independent of the list state, so a failed write never hides data that
/// is still valid. The presentation layer shows the notice and calls
/// [`ExceptionChannel::clear`] once it has been acknowledged.
#[derive(Debug, Clone, Default)]
pub struct ExceptionChannel {
    slot: Observable<Option<AppException>>,
}

impl ExceptionChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with `exception`.
    pub fn report(&self, exception: AppException) {
        self.slot.set(Some(exception));
    }

    /// Acknowledge the current notice.
    pub fn clear(&self) {
        self.slot.update_if(|slot| slot.take().is_some());
    }

    pub fn current(&self) -> Option<AppException> {
        self.slot.get()
    }

    pub fn watch(&self) -> ReadOnly<Option<AppException>> {
        self.slot.read_only()
    }
}
