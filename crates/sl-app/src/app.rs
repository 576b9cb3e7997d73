//! Presentation-facing facade.
//!
//! 面向表现层的门面。
//!
//! Bundles the controllers into the surface a UI binds to: read-only
//! observables for identity, list state, notices and the filtered view,
//! plus the list mutations and sign-out.

use std::sync::Arc;

use sl_core::auth::Identity;
use sl_core::ids::{ItemId, UserId};
use sl_core::item::{FilterCriterion, Item, ListState};
use sl_core::observable::{Observable, ReadOnly};
use tracing::{info, warn};

use crate::controllers::{AppException, AuthController, ExceptionChannel, ItemListController};
use crate::deps::AppDeps;
use crate::error::{AppError, AppResult};
use crate::scope::ItemListScope;
use crate::views::FilteredItemsView;

pub struct ShoppingListApp {
    auth: AuthController,
    scope: ItemListScope,
    exceptions: ExceptionChannel,
    filter: Observable<FilterCriterion>,
}

impl ShoppingListApp {
    /// Wire the controllers and make sure somebody is signed in.
    ///
    /// Returns once the list controller for the signed-in user exists, so
    /// mutations issued right after never hit an identity-less controller.
    /// Stops waiting if the identity stream ends first.
    /// A bootstrap auth failure is returned as-is; nothing retries it.
    #[tracing::instrument(name = "app.start", skip(deps))]
    pub async fn start(deps: AppDeps, initial_filter: FilterCriterion) -> AppResult<Self> {
        let AppDeps {
            auth_session,
            item_store,
        } = deps;

        let auth = AuthController::start(auth_session).await;
        let exceptions = ExceptionChannel::new();
        let scope = ItemListScope::start(item_store, exceptions.clone(), auth.identity());

        let app = Self {
            auth,
            scope,
            exceptions,
            filter: Observable::new(initial_filter),
        };

        app.auth.bootstrap().await?;
        app.wait_for_next_user(None).await;
        info!("Shopping list app started");
        Ok(app)
    }

    pub fn identity(&self) -> ReadOnly<Option<Identity>> {
        self.auth.identity()
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.auth.current_identity()
    }

    pub fn list_state(&self) -> ReadOnly<ListState> {
        self.scope.list_state()
    }

    pub fn exceptions(&self) -> ReadOnly<Option<AppException>> {
        self.exceptions.watch()
    }

    /// Acknowledge the current notice.
    pub fn clear_exception(&self) {
        self.exceptions.clear();
    }

    pub fn visible_items(&self) -> FilteredItemsView {
        FilteredItemsView::new(&self.filter.read_only(), &self.scope.list_state())
    }

    pub fn filter(&self) -> ReadOnly<FilterCriterion> {
        self.filter.read_only()
    }

    pub fn set_filter(&self, criterion: FilterCriterion) {
        self.filter.update_if(|current| {
            let changed = *current != criterion;
            *current = criterion;
            changed
        });
    }

    /// Add an item named by user input. Blank names are rejected.
    pub async fn add_item(&self, name: &str, obtained: bool) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Precondition("item name must not be blank"));
        }
        self.controller().add_item(name, obtained).await
    }

    pub async fn update_item(&self, item: Item) -> AppResult<()> {
        self.controller().update_item(item).await
    }

    /// Flip the obtained flag of a listed item.
    pub async fn toggle_obtained(&self, item_id: &ItemId) -> AppResult<()> {
        let item = self
            .scope
            .state()
            .data()
            .and_then(|items| items.iter().find(|i| i.has_id(item_id)).cloned())
            .ok_or(AppError::Precondition("item is not in the current list"))?;

        let obtained = !item.obtained;
        self.update_item(item.with_obtained(obtained)).await
    }

    pub async fn delete_item(&self, item_id: &ItemId) -> AppResult<()> {
        self.controller().delete_item(item_id).await
    }

    /// Discard the displayed list and fetch it again.
    pub async fn refresh(&self) -> AppResult<()> {
        self.controller().retrieve_items(true).await
    }

    /// Sign out and land on a fresh anonymous session.
    ///
    /// Returns once the new user's list has been fetched, so mutations
    /// issued right after never reach the previous user's collection.
    pub async fn sign_out(&self) -> AppResult<()> {
        let previous = self.scope.active_user().get();
        self.auth.sign_out().await?;
        if self.wait_for_next_user(previous.as_ref()).await {
            self.controller().wait_initial_fetch().await;
        }
        Ok(())
    }

    /// Tear down subscriptions and controllers. Safe to call repeatedly.
    pub fn shutdown(&self) {
        self.scope.dispose();
        self.auth.dispose();
    }

    fn controller(&self) -> Arc<ItemListController> {
        self.scope.controller()
    }

    /// Wait for the scope to serve a signed-in user other than `previous`.
    ///
    /// Gives up, returning `false`, when the identity stream ends first.
    async fn wait_for_next_user(&self, previous: Option<&UserId>) -> bool {
        tokio::select! {
            biased;
            _ = self.scope.wait_for_user_other_than(previous) => true,
            _ = self.auth.identity_closed() => {
                warn!("Identity stream closed before a signed-in user became active");
                false
            }
        }
    }
}

impl Drop for ShoppingListApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}
