//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use mockall::mock;
use sl_core::auth::Identity;
use sl_core::ids::{ItemId, UserId};
use sl_core::item::Item;
use sl_core::ports::{AuthSessionPort, ItemStorePort};
use tokio::sync::{mpsc, Notify, Semaphore};

static TRACE_INIT: Once = Once::new();

/// Route controller logs to the test writer; `RUST_LOG` selects the level.
pub fn init_tracing() {
    TRACE_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ---------------------------------------------------------------------------
// Mock: AuthSessionPort (call-count expectations)
// ---------------------------------------------------------------------------

mock! {
    pub AuthSession {}

    #[async_trait]
    impl AuthSessionPort for AuthSession {
        async fn subscribe_identity(&self) -> anyhow::Result<mpsc::Receiver<Option<Identity>>>;
        async fn sign_in_anonymously(&self) -> anyhow::Result<Identity>;
        async fn current_identity(&self) -> anyhow::Result<Option<Identity>>;
        async fn sign_out(&self) -> anyhow::Result<()>;
    }
}

pub fn identity(user: &str) -> Identity {
    Identity::anonymous(UserId::from(user))
}

// ---------------------------------------------------------------------------
// Stub: AuthSessionPort whose identity stream is driven by the test
// ---------------------------------------------------------------------------

pub struct ScriptedAuthSession {
    stream: Mutex<Option<mpsc::Receiver<Option<Identity>>>>,
    emitter: mpsc::Sender<Option<Identity>>,
    signed_in: Mutex<Option<Identity>>,
    sign_in_calls: AtomicUsize,
    sign_out_calls: AtomicUsize,
}

impl ScriptedAuthSession {
    pub fn new() -> Arc<Self> {
        let (emitter, stream) = mpsc::channel(64);
        Arc::new(Self {
            stream: Mutex::new(Some(stream)),
            emitter,
            signed_in: Mutex::new(None),
            sign_in_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
        })
    }

    /// Push an emission onto the identity stream.
    ///
    /// Emissions after the subscriber went away are dropped.
    pub async fn emit(&self, identity: Option<Identity>) {
        *self.signed_in.lock().unwrap() = identity.clone();
        let _ = self.emitter.send(identity).await;
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthSessionPort for ScriptedAuthSession {
    async fn subscribe_identity(&self) -> anyhow::Result<mpsc::Receiver<Option<Identity>>> {
        self.stream
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| anyhow::anyhow!("already subscribed"))
    }

    async fn sign_in_anonymously(&self) -> anyhow::Result<Identity> {
        let n = self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        let identity = identity(&format!("anon-{n}"));
        self.emit(Some(identity.clone())).await;
        Ok(identity)
    }

    async fn current_identity(&self) -> anyhow::Result<Option<Identity>> {
        Ok(self.signed_in.lock().unwrap().clone())
    }

    async fn sign_out(&self) -> anyhow::Result<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.emit(None).await;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Stub: ItemStorePort with failure injection and a release gate
// ---------------------------------------------------------------------------

/// Holds every store call at its entry point until the test releases it.
pub struct Gate {
    enabled: AtomicBool,
    entered: Notify,
    release: Semaphore,
}

impl Default for Gate {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            entered: Notify::new(),
            release: Semaphore::new(0),
        }
    }
}

impl Gate {
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    /// Wait until a gated call is parked.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let one parked call through.
    pub fn release_one(&self) {
        self.release.add_permits(1);
    }

    async fn pass(&self) {
        if !self.enabled.load(Ordering::SeqCst) {
            return;
        }
        self.entered.notify_one();
        self.release.acquire().await.unwrap().forget();
    }
}

#[derive(Default)]
pub struct StubItemStore {
    items: Mutex<Vec<Item>>,
    assigned_ids: Mutex<VecDeque<ItemId>>,
    failure: Mutex<Option<String>>,
    pub gate: Gate,
    pub retrieve_calls: AtomicUsize,
    pub write_calls: AtomicUsize,
}

impl StubItemStore {
    pub fn with_items(items: Vec<Item>) -> Arc<Self> {
        let store = Self::default();
        *store.items.lock().unwrap() = items;
        Arc::new(store)
    }

    /// Ids handed out by subsequent `create` calls, in order.
    pub fn assign_ids(&self, ids: &[&str]) {
        self.assigned_ids
            .lock()
            .unwrap()
            .extend(ids.iter().map(|id| ItemId::from(*id)));
    }

    /// Make every following call fail with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn retrieve_calls(&self) -> usize {
        self.retrieve_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> anyhow::Result<()> {
        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(anyhow::anyhow!(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ItemStorePort for StubItemStore {
    async fn retrieve(&self, _user_id: &UserId) -> anyhow::Result<Vec<Item>> {
        self.retrieve_calls.fetch_add(1, Ordering::SeqCst);
        self.gate.pass().await;
        self.check()?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn create(&self, _user_id: &UserId, item: &Item) -> anyhow::Result<ItemId> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.gate.pass().await;
        self.check()?;
        let id = self
            .assigned_ids
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        self.items.lock().unwrap().push(item.clone().with_id(id.clone()));
        Ok(id)
    }

    async fn update(&self, _user_id: &UserId, _item: &Item) -> anyhow::Result<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.gate.pass().await;
        self.check()?;
        Ok(())
    }

    async fn delete(&self, _user_id: &UserId, _item_id: &ItemId) -> anyhow::Result<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.gate.pass().await;
        self.check()?;
        Ok(())
    }
}

pub fn stored(id: &str, name: &str, obtained: bool) -> Item {
    Item::new(name).with_obtained(obtained).with_id(ItemId::from(id))
}
