use sl_core::errors::{AuthError, StoreError};
use thiserror::Error;

/// Error returned by controller and facade operations.
///
/// 控制器与门面操作返回的错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Operation invoked in a state that does not allow it.
    #[error("precondition failure: {0}")]
    Precondition(&'static str),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}
