use std::sync::{Arc, Mutex};

use sl_core::auth::Identity;
use sl_core::errors::AuthError;
use sl_core::observable::{Observable, ReadOnly};
use sl_core::ports::AuthSessionPort;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::lock;

/// Owns the current-user state.
///
/// 持有当前用户状态。
///
/// Subscribes to the auth session at construction and mirrors every
/// emission, last write wins. The product never renders an unauthenticated
/// state: [`bootstrap`](Self::bootstrap) signs in anonymously when nobody is
/// signed in, and [`sign_out`](Self::sign_out) immediately starts a fresh
/// anonymous session.
pub struct AuthController {
    session: Arc<dyn AuthSessionPort>,
    identity: Observable<Option<Identity>>,
    subscription: Mutex<Option<JoinHandle<()>>>,
    stream_closed: CancellationToken,
}

impl AuthController {
    /// Create the controller and subscribe to identity changes.
    ///
    /// A failed subscription is logged; the controller then stays detached
    /// with an absent identity and disposal is a no-op.
    pub async fn start(session: Arc<dyn AuthSessionPort>) -> Self {
        let identity = Observable::new(None);
        let stream_closed = CancellationToken::new();

        let subscription = match session.subscribe_identity().await {
            Ok(changes) => Some(tokio::spawn(forward_identity(
                changes,
                identity.clone(),
                stream_closed.clone(),
            ))),
            Err(err) => {
                warn!(error = %err, "Identity subscription failed; auth controller is detached");
                stream_closed.cancel();
                None
            }
        };

        Self {
            session,
            identity,
            subscription: Mutex::new(subscription),
            stream_closed,
        }
    }

    pub fn identity(&self) -> ReadOnly<Option<Identity>> {
        self.identity.read_only()
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.identity.get()
    }

    /// Make sure somebody is signed in.
    ///
    /// Signs in anonymously only when the session reports no identity, so
    /// repeated calls never stack sessions.
    #[tracing::instrument(name = "controller.auth.bootstrap", skip(self))]
    pub async fn bootstrap(&self) -> Result<(), AuthError> {
        let existing = self
            .session
            .current_identity()
            .await
            .map_err(AuthError::from_port)?;

        if let Some(identity) = existing {
            debug!(user_id = %identity.user_id, "Existing identity found; skipping sign-in");
            return Ok(());
        }

        let identity = self
            .session
            .sign_in_anonymously()
            .await
            .map_err(AuthError::from_port)?;
        info!(user_id = %identity.user_id, "Signed in anonymously");
        Ok(())
    }

    /// Sign out, then immediately sign back in anonymously.
    #[tracing::instrument(name = "controller.auth.sign_out", skip(self))]
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.session.sign_out().await.map_err(AuthError::from_port)?;

        let identity = self
            .session
            .sign_in_anonymously()
            .await
            .map_err(AuthError::from_port)?;
        info!(user_id = %identity.user_id, "Signed out; new anonymous session started");
        Ok(())
    }

    /// Cancel the identity subscription. Safe to call repeatedly.
    pub fn dispose(&self) {
        if let Some(task) = lock(&self.subscription).take() {
            task.abort();
            debug!("Auth controller disposed");
        }
        self.stream_closed.cancel();
    }

    /// Resolves once no further identity changes can arrive: the stream
    /// ended, the subscription failed, or the controller was disposed.
    pub async fn identity_closed(&self) {
        self.stream_closed.cancelled().await;
    }

    pub fn is_subscribed(&self) -> bool {
        lock(&self.subscription)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for AuthController {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn forward_identity(
    mut changes: mpsc::Receiver<Option<Identity>>,
    identity: Observable<Option<Identity>>,
    closed: CancellationToken,
) {
    while let Some(next) = changes.recv().await {
        debug!(
            user_id = ?next.as_ref().map(|i| i.user_id.as_str()),
            "Identity changed"
        );
        identity.set(next);
    }
    debug!("Identity stream closed");
    closed.cancel();
}
