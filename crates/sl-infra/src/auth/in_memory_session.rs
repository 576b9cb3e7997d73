use anyhow::Result;
use async_trait::async_trait;
use sl_core::auth::Identity;
use sl_core::ids::UserId;
use sl_core::ports::AuthSessionPort;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

const SUBSCRIBER_BUFFER: usize = 16;

/// In-memory anonymous auth session.
///
/// 内存版匿名认证会话。
///
/// Every sign-in mints a fresh anonymous user id. Subscribers receive the
/// current identity on subscription and then every change in order.
pub struct InMemoryAuthSession {
    inner: Mutex<SessionState>,
}

struct SessionState {
    current: Option<Identity>,
    subscribers: Vec<mpsc::Sender<Option<Identity>>>,
}

impl Default for InMemoryAuthSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuthSession {
    /// A session with nobody signed in.
    pub fn new() -> Self {
        Self::with_identity(None)
    }

    /// A session resuming `identity`, as if restored from a previous run.
    pub fn with_identity(identity: Option<Identity>) -> Self {
        Self {
            inner: Mutex::new(SessionState {
                current: identity,
                subscribers: Vec::new(),
            }),
        }
    }

    async fn publish(state: &mut SessionState, identity: Option<Identity>) {
        state.current = identity.clone();

        let before = state.subscribers.len();
        let mut alive = Vec::with_capacity(before);
        for subscriber in state.subscribers.drain(..) {
            if subscriber.send(identity.clone()).await.is_ok() {
                alive.push(subscriber);
            }
        }
        state.subscribers = alive;
        debug!(
            subscribers = state.subscribers.len(),
            pruned = before - state.subscribers.len(),
            "Identity published"
        );
    }
}

#[async_trait]
impl AuthSessionPort for InMemoryAuthSession {
    async fn subscribe_identity(&self) -> Result<mpsc::Receiver<Option<Identity>>> {
        let mut state = self.inner.lock().await;
        let (tx, rx) = mpsc::channel(SUBSCRIBER_BUFFER);
        tx.send(state.current.clone())
            .await
            .map_err(|_| anyhow::anyhow!("identity subscriber closed during subscription"))?;
        state.subscribers.push(tx);
        Ok(rx)
    }

    async fn sign_in_anonymously(&self) -> Result<Identity> {
        let identity = Identity::anonymous(UserId::new());
        let mut state = self.inner.lock().await;
        Self::publish(&mut state, Some(identity.clone())).await;
        Ok(identity)
    }

    async fn current_identity(&self) -> Result<Option<Identity>> {
        Ok(self.inner.lock().await.current.clone())
    }

    async fn sign_out(&self) -> Result<()> {
        let mut state = self.inner.lock().await;
        if state.current.is_none() {
            return Ok(());
        }
        Self::publish(&mut state, None).await;
        Ok(())
    }
}
