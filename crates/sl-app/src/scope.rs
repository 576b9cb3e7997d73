//! Per-identity controller scope.
//!
//! 按身份划分的控制器作用域。
//!
//! Keeps exactly one [`ItemListController`] alive for the current identity
//! and replaces it whenever the signed-in user changes. Successive
//! controllers publish through the same list-state subject, so consumers
//! subscribe once and keep receiving updates across sign-outs.

use std::sync::{Arc, Mutex};

use sl_core::auth::Identity;
use sl_core::ids::UserId;
use sl_core::item::ListState;
use sl_core::observable::{Observable, ReadOnly};
use sl_core::ports::ItemStorePort;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::controllers::{lock, ExceptionChannel, ItemListController};

pub struct ItemListScope {
    state: Observable<ListState>,
    active_user: Observable<Option<UserId>>,
    current: Arc<Mutex<Arc<ItemListController>>>,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl ItemListScope {
    /// Build the controller for the current identity and follow changes.
    ///
    /// Must be called within a Tokio runtime.
    pub fn start(
        store: Arc<dyn ItemStorePort>,
        exceptions: ExceptionChannel,
        mut identity: ReadOnly<Option<Identity>>,
    ) -> Self {
        let state = Observable::default();
        let first_user = user_of(&identity.get_and_mark_seen());
        let active_user = Observable::new(first_user.clone());

        let controller = ItemListController::attach(
            Arc::clone(&store),
            exceptions.clone(),
            state.clone(),
            first_user,
        );
        let current = Arc::new(Mutex::new(controller));

        let watcher = tokio::spawn(follow_identity(
            identity,
            Rebuild {
                store,
                exceptions,
                state: state.clone(),
                active_user: active_user.clone(),
                current: Arc::clone(&current),
            },
        ));

        Self {
            state,
            active_user,
            current,
            watcher: Mutex::new(Some(watcher)),
        }
    }

    /// The controller serving the current identity.
    pub fn controller(&self) -> Arc<ItemListController> {
        Arc::clone(&*lock(&self.current))
    }

    pub fn list_state(&self) -> ReadOnly<ListState> {
        self.state.read_only()
    }

    pub fn state(&self) -> ListState {
        self.state.get()
    }

    /// User id the active controller was built for.
    pub fn active_user(&self) -> ReadOnly<Option<UserId>> {
        self.active_user.read_only()
    }

    /// Wait until a controller for a signed-in user other than `previous`
    /// is active. With `previous` absent any signed-in user will do.
    pub async fn wait_for_user_other_than(&self, previous: Option<&UserId>) {
        let mut active = self.active_user.read_only();
        active
            .wait_for(|user| user.is_some() && user.as_ref() != previous)
            .await;
    }

    /// Stop following identity changes and dispose the active controller.
    /// Safe to call repeatedly.
    pub fn dispose(&self) {
        if let Some(watcher) = lock(&self.watcher).take() {
            watcher.abort();
        }
        lock(&self.current).dispose();
    }
}

impl Drop for ItemListScope {
    fn drop(&mut self) {
        self.dispose();
    }
}

struct Rebuild {
    store: Arc<dyn ItemStorePort>,
    exceptions: ExceptionChannel,
    state: Observable<ListState>,
    active_user: Observable<Option<UserId>>,
    current: Arc<Mutex<Arc<ItemListController>>>,
}

impl Rebuild {
    /// Swap in a controller for `user_id`.
    ///
    /// The previous controller is disposed before its successor resets the
    /// shared state, so none of its late completions can land afterwards.
    fn replace(&self, user_id: Option<UserId>) {
        let mut current = lock(&self.current);
        current.dispose();
        *current = ItemListController::attach(
            Arc::clone(&self.store),
            self.exceptions.clone(),
            self.state.clone(),
            user_id.clone(),
        );
        self.active_user.set(user_id);
    }
}

async fn follow_identity(mut identity: ReadOnly<Option<Identity>>, rebuild: Rebuild) {
    while identity.changed().await {
        let next_user = user_of(&identity.get_and_mark_seen());
        let active_user = rebuild.active_user.get();
        if next_user == active_user {
            continue;
        }

        info!(from = ?active_user, to = ?next_user, "Identity changed; rebuilding item list controller");
        rebuild.replace(next_user);
    }
    debug!("Identity source closed; scope stops following");
}

fn user_of(identity: &Option<Identity>) -> Option<UserId> {
    identity.as_ref().map(|i| i.user_id.clone())
}
