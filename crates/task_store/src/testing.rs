//! Behaviour shared by every backend, exercised from each backend's tests.

use entities::TaskUpdate;

use crate::TaskStore;

pub(crate) async fn check_create_then_get(store: &dyn TaskStore) {
    let created = store.create_task("Test").await.unwrap();
    assert_eq!(created.title, "Test");
    assert!(!created.done);
    assert!(created.id > 0);

    let fetched = store.get_task(created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
}

pub(crate) async fn check_list_is_ordered_and_idempotent(store: &dyn TaskStore) {
    assert!(store.list_tasks().await.unwrap().is_empty());

    for title in ["one", "two", "three"] {
        store.create_task(title).await.unwrap();
    }

    let first = store.list_tasks().await.unwrap();
    let second = store.list_tasks().await.unwrap();
    assert_eq!(first, second);

    let titles: Vec<_> = first.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["one", "two", "three"]);
    assert!(first.windows(2).all(|w| w[0].id < w[1].id));
}

pub(crate) async fn check_ids_are_monotonic(store: &dyn TaskStore) {
    let a = store.create_task("a").await.unwrap();
    let b = store.create_task("b").await.unwrap();
    assert!(b.id > a.id);

    assert!(store.delete_task(b.id).await.unwrap());
    let c = store.create_task("c").await.unwrap();
    assert!(c.id > b.id);
}

pub(crate) async fn check_delete(store: &dyn TaskStore) {
    let task = store.create_task("To del").await.unwrap();

    assert!(store.delete_task(task.id).await.unwrap());
    assert_eq!(store.get_task(task.id).await.unwrap(), None);
    assert!(!store.delete_task(task.id).await.unwrap());
    assert!(store.list_tasks().await.unwrap().is_empty());
}

pub(crate) async fn check_partial_updates(store: &dyn TaskStore) {
    let task = store.create_task("A").await.unwrap();

    let unchanged = store
        .update_task(task.id, TaskUpdate::new())
        .await
        .unwrap();
    assert_eq!(unchanged.as_ref(), Some(&task));

    let toggled = store
        .update_task(task.id, TaskUpdate::new().with_done(true))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(toggled.title, "A");
    assert!(toggled.done);

    let renamed = store
        .update_task(task.id, TaskUpdate::new().with_title("B"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.title, "B");
    assert!(renamed.done);

    let both = store
        .update_task(task.id, TaskUpdate::new().with_title("C").with_done(false))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(both.title, "C");
    assert!(!both.done);

    assert_eq!(store.get_task(task.id).await.unwrap(), Some(both));
}

pub(crate) async fn check_missing_ids(store: &dyn TaskStore) {
    assert_eq!(store.get_task(42).await.unwrap(), None);
    assert_eq!(
        store
            .update_task(42, TaskUpdate::new().with_done(true))
            .await
            .unwrap(),
        None
    );
    assert_eq!(store.update_task(42, TaskUpdate::new()).await.unwrap(), None);
    assert!(!store.delete_task(42).await.unwrap());
}
