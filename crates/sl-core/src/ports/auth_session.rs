use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::auth::Identity;

/// Port to the remote authentication service.
///
/// 远端认证服务端口。
///
/// # Behavior / 行为
/// - `subscribe_identity()` yields the current identity first, then every
///   change in the order it happened. `None` means signed out.
/// - `sign_in_anonymously()` creates a new disposable anonymous session.
///
/// - `subscribe_identity()` 先推送当前身份，再按发生顺序推送每次变更。
#[async_trait]
pub trait AuthSessionPort: Send + Sync {
    /// Subscribe to identity changes.
    ///
    /// Every successful `sign_in_anonymously` and `sign_out` must be
    /// followed by an emission of the resulting identity while the stream
    /// is open. Callers wait on these emissions; an adapter that stays open
    /// without emitting leaves them waiting. Dropping the sender ends the
    /// stream and releases them.
    async fn subscribe_identity(&self) -> Result<mpsc::Receiver<Option<Identity>>>;

    /// Start an anonymous session.
    async fn sign_in_anonymously(&self) -> Result<Identity>;

    /// Point-in-time query of the signed-in identity.
    async fn current_identity(&self) -> Result<Option<Identity>>;

    /// End the current session.
    async fn sign_out(&self) -> Result<()>;
}
