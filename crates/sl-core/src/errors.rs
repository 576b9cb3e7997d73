//! Uniform failure kinds surfaced by the core.
//!
//! Ports speak `anyhow`; the application layer folds whatever an adapter
//! returned into one of these kinds so that consumers only ever match on a
//! small, stable taxonomy.

use thiserror::Error;

/// An auth session operation (sign-in, sign-out, identity query) failed.
///
/// 认证会话操作失败。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("auth failure: {message}")]
    Failure { message: String },
}

impl AuthError {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Fold an adapter error into the uniform kind, keeping the root message.
    pub fn from_port(err: anyhow::Error) -> Self {
        Self::failure(format!("{err:#}"))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Failure { message } => message,
        }
    }
}

/// A remote item store operation failed.
///
/// 远端条目存储操作失败。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store failure: {message}")]
    Failure { message: String },
}

impl StoreError {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn from_port(err: anyhow::Error) -> Self {
        Self::failure(format!("{err:#}"))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Failure { message } => message,
        }
    }
}
