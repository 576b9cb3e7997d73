mod support;

use std::sync::Arc;

use sl_app::{ExceptionChannel, ItemListScope};
use sl_core::ids::UserId;
use sl_core::item::ListState;
use sl_core::observable::Observable;

use support::{identity, init_tracing, stored, StubItemStore};

#[tokio::test]
async fn stale_retrieval_cannot_overwrite_the_next_users_list() {
    init_tracing();
    let store = StubItemStore::with_items(vec![stored("a", "Milk", false)]);
    store.gate.enable();
    let source = Observable::new(Some(identity("u1")));
    let scope = ItemListScope::start(store.clone(), ExceptionChannel::new(), source.read_only());

    let first = scope.controller();
    store.gate.entered().await;

    source.set(Some(identity("u2")));
    assert!(
        scope
            .active_user()
            .wait_for(|user| *user == Some(UserId::from("u2")))
            .await
    );
    assert!(first.is_disposed());

    // u2's fetch is parked behind u1's; let u1 finish first.
    store.gate.entered().await;
    store.gate.release_one();
    first.wait_initial_fetch().await;
    assert_eq!(scope.state(), ListState::Loading);

    store.gate.release_one();
    let second = scope.controller();
    second.wait_initial_fetch().await;
    assert_eq!(second.user_id(), Some(&UserId::from("u2")));
    assert_eq!(
        scope.state(),
        ListState::Data(vec![stored("a", "Milk", false)])
    );
}

#[tokio::test]
async fn subscribers_keep_receiving_across_identity_changes() {
    init_tracing();
    let store = StubItemStore::with_items(vec![stored("a", "Milk", false)]);
    let source = Observable::new(Some(identity("u1")));
    let scope = ItemListScope::start(store.clone(), ExceptionChannel::new(), source.read_only());
    let mut list = scope.list_state();

    assert!(list.wait_for(|state| state.data().is_some()).await);

    source.set(None);
    assert!(scope.active_user().wait_for(Option::is_none).await);
    assert!(list.wait_for(ListState::is_loading).await);
    assert_eq!(scope.controller().user_id(), None);

    source.set(Some(identity("u3")));
    assert!(list.wait_for(|state| state.data().is_some()).await);
    assert_eq!(store.retrieve_calls(), 2);
}

#[tokio::test]
async fn same_user_emission_keeps_the_controller() {
    let store = StubItemStore::with_items(vec![]);
    let source = Observable::new(Some(identity("u1")));
    let scope = ItemListScope::start(store.clone(), ExceptionChannel::new(), source.read_only());
    let first = scope.controller();
    first.wait_initial_fetch().await;

    source.set(Some(identity("u1")));
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    assert!(Arc::ptr_eq(&first, &scope.controller()));
    assert!(!first.is_disposed());
    assert_eq!(store.retrieve_calls(), 1);
}

#[tokio::test]
async fn dispose_tears_down_the_active_controller() {
    let store = StubItemStore::with_items(vec![]);
    let source = Observable::new(Some(identity("u1")));
    let scope = ItemListScope::start(store.clone(), ExceptionChannel::new(), source.read_only());
    let controller = scope.controller();

    scope.dispose();
    scope.dispose();
    assert!(controller.is_disposed());

    source.set(Some(identity("u2")));
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert!(Arc::ptr_eq(&controller, &scope.controller()));
}
