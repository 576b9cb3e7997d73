use std::sync::{Arc, Mutex};

use sl_core::errors::StoreError;
use sl_core::ids::{ItemId, UserId};
use sl_core::item::{Item, ListState};
use sl_core::observable::{Observable, ReadOnly};
use sl_core::ports::ItemStorePort;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{lock, AppException, ExceptionChannel, ItemOperation};
use crate::error::{AppError, AppResult};

/// Owns the list state of one identity.
///
/// 单个身份的列表状态控制器。
///
/// # Behavior / 行为
/// - Starts in `Loading` and fetches immediately when a user id is present.
///   Without one it stays in `Loading`; the owner is expected to build a new
///   controller once an identity shows up.
/// - Writes are confirmed before they are applied: the local list is patched
///   only after the store acknowledges.
/// - Write failures go to the [`ExceptionChannel`]; only retrieval failures
///   become `ListState::Error`.
/// - After [`dispose`](Self::dispose) every late completion is dropped. The
///   check happens at the completion point, under the state's write lock.
pub struct ItemListController {
    store: Arc<dyn ItemStorePort>,
    exceptions: ExceptionChannel,
    state: Observable<ListState>,
    user_id: Option<UserId>,
    disposed: CancellationToken,
    initial_fetch: Mutex<Option<JoinHandle<()>>>,
}

impl ItemListController {
    /// Build a controller with its own state subject.
    ///
    /// Must be called within a Tokio runtime when `user_id` is present.
    pub fn new(
        store: Arc<dyn ItemStorePort>,
        exceptions: ExceptionChannel,
        user_id: Option<UserId>,
    ) -> Arc<Self> {
        Self::attach(store, exceptions, Observable::default(), user_id)
    }

    /// Build a controller that takes over an existing state subject.
    ///
    /// The subject is reset to `Loading` before the initial fetch starts.
    pub fn attach(
        store: Arc<dyn ItemStorePort>,
        exceptions: ExceptionChannel,
        state: Observable<ListState>,
        user_id: Option<UserId>,
    ) -> Arc<Self> {
        state.set(ListState::Loading);

        let controller = Arc::new(Self {
            store,
            exceptions,
            state,
            user_id,
            disposed: CancellationToken::new(),
            initial_fetch: Mutex::new(None),
        });

        if controller.user_id.is_some() {
            let task = tokio::spawn({
                let controller = Arc::clone(&controller);
                async move {
                    if let Err(err) = controller.retrieve_items(false).await {
                        warn!(error = %err, "Initial item retrieval was not started");
                    }
                }
            });
            *lock(&controller.initial_fetch) = Some(task);
        } else {
            debug!("No identity yet; item list stays in Loading");
        }

        controller
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn list_state(&self) -> ReadOnly<ListState> {
        self.state.read_only()
    }

    pub fn state(&self) -> ListState {
        self.state.get()
    }

    /// Wait for the fetch started at construction, if any.
    pub async fn wait_initial_fetch(&self) {
        let task = lock(&self.initial_fetch).take();
        if let Some(task) = task {
            if let Err(err) = task.await {
                warn!(error = %err, "Initial item retrieval task did not complete");
            }
        }
    }

    /// Fetch the whole list.
    ///
    /// With `force_refresh` the state drops to `Loading` first, discarding
    /// whatever was displayed.
    #[tracing::instrument(
        name = "controller.item_list.retrieve",
        skip(self),
        fields(user_id = ?self.user_id)
    )]
    pub async fn retrieve_items(&self, force_refresh: bool) -> AppResult<()> {
        let user_id = self.require_user()?;

        if force_refresh {
            self.apply(|state| {
                *state = ListState::Loading;
                true
            });
        }

        match self.store.retrieve(user_id).await {
            Ok(items) => {
                let count = items.len();
                if self.apply(|state| {
                    *state = ListState::Data(items);
                    true
                }) {
                    info!(count, "Items retrieved");
                } else {
                    debug!("Controller disposed; discarding retrieved items");
                }
            }
            Err(err) => {
                let error = StoreError::from_port(err);
                warn!(error = %error, "Item retrieval failed");
                self.apply(|state| {
                    *state = ListState::Error(error);
                    true
                });
            }
        }

        Ok(())
    }

    /// Create an item and append it once the store has assigned its id.
    #[tracing::instrument(
        name = "controller.item_list.add_item",
        skip_all,
        fields(user_id = ?self.user_id)
    )]
    pub async fn add_item(&self, name: impl Into<String>, obtained: bool) -> AppResult<()> {
        let user_id = self.require_user()?;
        let item = Item::new(name).with_obtained(obtained);

        match self.store.create(user_id, &item).await {
            Ok(id) => {
                debug!(item_id = %id, "Item created");
                let item = item.with_id(id);
                self.apply(|state| state.append(item));
            }
            Err(err) => self.report(ItemOperation::Add, err),
        }

        Ok(())
    }

    /// Overwrite an item, keeping its position in the list.
    #[tracing::instrument(
        name = "controller.item_list.update_item",
        skip_all,
        fields(user_id = ?self.user_id, item_id = ?item.id)
    )]
    pub async fn update_item(&self, item: Item) -> AppResult<()> {
        let user_id = self.require_user()?;
        if item.id.is_none() {
            return Err(AppError::Precondition("update requires a persisted item"));
        }

        match self.store.update(user_id, &item).await {
            Ok(()) => {
                self.apply(|state| state.replace(item));
            }
            Err(err) => self.report(ItemOperation::Update, err),
        }

        Ok(())
    }

    #[tracing::instrument(
        name = "controller.item_list.delete_item",
        skip(self),
        fields(user_id = ?self.user_id)
    )]
    pub async fn delete_item(&self, item_id: &ItemId) -> AppResult<()> {
        let user_id = self.require_user()?;

        match self.store.delete(user_id, item_id).await {
            Ok(()) => {
                self.apply(|state| state.remove(item_id));
            }
            Err(err) => self.report(ItemOperation::Delete, err),
        }

        Ok(())
    }

    /// Stop applying effects of in-flight calls. Safe to call repeatedly.
    pub fn dispose(&self) {
        if !self.disposed.is_cancelled() {
            self.disposed.cancel();
            debug!(user_id = ?self.user_id, "Item list controller disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.is_cancelled()
    }

    fn require_user(&self) -> AppResult<&UserId> {
        self.user_id
            .as_ref()
            .ok_or(AppError::Precondition("no signed-in identity"))
    }

    /// Run a state transition unless the controller has been disposed.
    fn apply(&self, transition: impl FnOnce(&mut ListState) -> bool) -> bool {
        self.state
            .update_if(|state| !self.disposed.is_cancelled() && transition(state))
    }

    fn report(&self, operation: ItemOperation, err: anyhow::Error) {
        let error = StoreError::from_port(err);
        if self.is_disposed() {
            debug!(%operation, error = %error, "Controller disposed; suppressing failure");
            return;
        }
        warn!(%operation, error = %error, "Item mutation failed");
        self.exceptions.report(AppException { operation, error });
    }
}
