use jiff::{SignedDuration, Timestamp};
use resource::{
    EditOutcome, FALLBACK_MESSAGE, ManualClock, Resource, ResourceOptions, ResourceState,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::{LocalSet, spawn_local};

#[derive(Debug, Clone, Default, PartialEq)]
struct Brand {
    id: i64,
    name: String,
}

fn brand(id: i64, name: &str) -> Brand {
    Brand {
        id,
        name: name.to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
struct BrandKey {
    brand_id: i64,
}

fn key(brand_id: i64) -> Option<BrandKey> {
    Some(BrandKey { brand_id })
}

type Response = Result<Brand, Value>;

/// Fake backend whose responses are released by the test, in any order.
#[derive(Clone, Default)]
struct Backend {
    pending: Rc<RefCell<HashMap<i64, Vec<oneshot::Sender<Response>>>>>,
    saves: Rc<RefCell<Vec<(Brand, oneshot::Sender<Response>)>>>,
}

impl Backend {
    fn resource(&self) -> Resource<BrandKey, Brand, Value> {
        let backend = self.clone();
        Resource::new(move |key: BrandKey| {
            let (tx, rx) = oneshot::channel();
            backend
                .pending
                .borrow_mut()
                .entry(key.brand_id)
                .or_default()
                .push(tx);
            async move {
                rx.await.unwrap_or_else(|_| {
                    Err(json!({ "message": "response dropped" }))
                })
            }
        })
    }

    /// Releases the oldest outstanding request for `brand_id`.
    fn respond(&self, brand_id: i64, response: Response) -> anyhow::Result<()> {
        let tx = {
            let mut pending = self.pending.borrow_mut();
            let queue = pending
                .get_mut(&brand_id)
                .filter(|queue| !queue.is_empty())
                .ok_or_else(|| anyhow::anyhow!("no request for {brand_id}"))?;
            queue.remove(0)
        };
        tx.send(response)
            .map_err(|_| anyhow::anyhow!("request for {brand_id} was dropped"))
    }
}

impl Backend {
    /// Starts a save of `brand`, answered later through [`Backend::answer_save`].
    fn save(&self, brand: &Brand) -> impl Future<Output = Response> + use<> {
        let (tx, rx) = oneshot::channel();
        self.saves.borrow_mut().push((brand.clone(), tx));
        async move { rx.await.unwrap_or_else(|_| Err(json!({ "message": "save dropped" }))) }
    }

    fn saved(&self) -> Vec<Brand> {
        self.saves.borrow().iter().map(|(brand, _)| brand.clone()).collect()
    }

    /// Answers the oldest outstanding save.
    fn answer_save(&self, response: Response) -> anyhow::Result<()> {
        let tx = {
            let mut saves = self.saves.borrow_mut();
            if saves.is_empty() {
                anyhow::bail!("no save in flight");
            }
            saves.remove(0).1
        };
        tx.send(response)
            .map_err(|_| anyhow::anyhow!("save was dropped"))
    }

    /// A resource with brand 42 already fetched.
    async fn loaded(&self) -> anyhow::Result<Resource<BrandKey, Brand, Value>> {
        let resource = self.resource();
        let request = spawn_local(resource.set_key(key(42)).expect("fetches"));
        self.respond(42, Ok(brand(42, "Acme")))?;
        request.await?;
        Ok(resource)
    }
}

/// Lets spawned tasks run until they block again.
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

fn renamed(name: &'static str) -> impl FnOnce(&mut Brand) {
    move |brand| brand.name = name.to_string()
}

fn record_statuses(
    resource: &Resource<BrandKey, Brand, Value>,
) -> Rc<RefCell<Vec<&'static str>>> {
    let statuses = Rc::new(RefCell::new(vec![resource.state().status()]));
    let log = statuses.clone();
    resource.observe(move |snapshot| log.borrow_mut().push(snapshot.state.status()));
    statuses
}

#[tokio::test]
async fn absent_key_yields_empty_value_without_fetching() {
    let resource: Resource<i64, Vec<Brand>, Value> =
        Resource::new(|_user_id: i64| async { Ok(vec![brand(1, "Acme")]) });

    assert!(resource.set_key(None).is_none());

    assert_eq!(resource.fetch_count(), 0);
    assert_eq!(resource.state().data(), Some(&Vec::new()));
}

#[tokio::test]
async fn absent_key_uses_configured_empty_value() {
    let resource: Resource<i64, Brand, Value> = Resource::with_empty_value(
        |id: i64| async move { Ok(brand(id, "Fetched")) },
        brand(0, "Guest"),
    );

    resource.set_key(None);

    assert_eq!(resource.fetch_count(), 0);
    assert_eq!(resource.state().data(), Some(&brand(0, "Guest")));

    // an absent key again is not a change
    resource.set_key(None);
    assert_eq!(resource.fetch_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn successful_fetch_moves_idle_loading_success() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let resource: Resource<BrandKey, Brand, Value> =
                Resource::new(|key: BrandKey| async move {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok(brand(key.brand_id, "Acme"))
                });
            let statuses = record_statuses(&resource);

            let request = resource.set_key(key(42)).expect("new key fetches");
            let state = spawn_local(request).await?;

            assert_eq!(*statuses.borrow(), vec!["idle", "loading", "success"]);
            assert_eq!(state.data(), Some(&brand(42, "Acme")));
            assert_eq!(resource.state().data(), Some(&brand(42, "Acme")));
            assert_eq!(resource.fetch_count(), 1);
            Ok(())
        })
        .await
}

#[tokio::test]
async fn failed_fetch_captures_backend_message() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.resource();
            let statuses = record_statuses(&resource);

            let request = spawn_local(resource.set_key(key(42)).expect("fetches"));
            let cause = json!({ "response": { "data": { "message": "Not found" } } });
            backend.respond(42, Err(cause.clone()))?;
            request.await?;

            assert_eq!(*statuses.borrow(), vec!["idle", "loading", "error"]);
            let state = resource.state();
            let error = state.error().expect("error state");
            assert_eq!(error.message, "Not found");
            assert_eq!(*error.cause, cause);
            Ok(())
        })
        .await
}

#[tokio::test]
async fn unrecognized_failure_uses_fallback_message() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.resource();

            let request = spawn_local(resource.set_key(key(7)).expect("fetches"));
            backend.respond(7, Err(Value::Null))?;
            request.await?;

            assert_eq!(
                resource.state().error().map(|e| e.message.as_str()),
                Some(FALLBACK_MESSAGE)
            );
            Ok(())
        })
        .await
}

#[tokio::test]
async fn stale_response_never_overwrites_newer_key() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.resource();

            let a = spawn_local(resource.set_key(key(1)).expect("fetches"));
            let b = spawn_local(resource.set_key(key(2)).expect("fetches"));

            backend.respond(2, Ok(brand(2, "B")))?;
            b.await?;
            backend.respond(1, Ok(brand(1, "A")))?;
            let discarded = a.await?;

            // the superseded request resolves with the state it found
            assert_eq!(discarded.data(), Some(&brand(2, "B")));
            assert_eq!(resource.state().data(), Some(&brand(2, "B")));
            Ok(())
        })
        .await
}

#[tokio::test]
async fn only_last_of_many_keys_commits() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.resource();
            let statuses = record_statuses(&resource);

            let requests: Vec<_> = [1, 2, 3]
                .into_iter()
                .map(|id| spawn_local(resource.set_key(key(id)).expect("fetches")))
                .collect();

            // failures of superseded requests are not surfaced either
            backend.respond(1, Err(json!({ "message": "boom" })))?;
            backend.respond(3, Ok(brand(3, "C")))?;
            backend.respond(2, Ok(brand(2, "B")))?;
            for request in requests {
                request.await?;
            }

            assert_eq!(resource.state().data(), Some(&brand(3, "C")));
            assert!(!statuses.borrow().contains(&"error"));
            assert_eq!(resource.fetch_count(), 3);
            Ok(())
        })
        .await
}

#[tokio::test]
async fn equal_key_does_not_refetch() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.resource();

            let request = spawn_local(resource.set_key(key(42)).expect("fetches"));
            assert!(resource.set_key(key(42)).is_none());
            backend.respond(42, Ok(brand(42, "Acme")))?;
            request.await?;

            assert!(resource.set_key(key(42)).is_none());
            assert_eq!(resource.fetch_count(), 1);
            Ok(())
        })
        .await
}

#[tokio::test]
async fn clearing_key_discards_in_flight_request() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.resource();

            let request = spawn_local(resource.set_key(key(42)).expect("fetches"));
            resource.set_key(None);
            backend.respond(42, Ok(brand(42, "Acme")))?;
            request.await?;

            assert_eq!(resource.state().data(), Some(&Brand::default()));
            Ok(())
        })
        .await
}

#[tokio::test]
async fn refetch_without_stale_time_always_fetches() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.resource();

            let first = spawn_local(resource.set_key(key(42)).expect("fetches"));
            backend.respond(42, Ok(brand(42, "Acme")))?;
            first.await?;

            let a = spawn_local(resource.refetch());
            let b = spawn_local(resource.refetch());
            assert_eq!(resource.fetch_count(), 3);

            backend.respond(42, Ok(brand(42, "Acme v2")))?;
            backend.respond(42, Ok(brand(42, "Acme v3")))?;
            a.await?;
            b.await?;

            assert_eq!(resource.state().data(), Some(&brand(42, "Acme v3")));
            Ok(())
        })
        .await
}

#[tokio::test]
async fn refetch_within_stale_time_is_a_no_op() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let clock = ManualClock::new(Timestamp::UNIX_EPOCH);
            let backend = Backend::default();
            let resource = backend
                .resource()
                .with_clock(clock.clone())
                .with_options(
                    ResourceOptions::list().stale_time(SignedDuration::from_mins(5)),
                );

            let first = spawn_local(resource.set_key(key(42)).expect("fetches"));
            backend.respond(42, Ok(brand(42, "Acme")))?;
            first.await?;
            assert_eq!(resource.state().fetched_at(), Some(Timestamp::UNIX_EPOCH));

            clock.advance(SignedDuration::from_mins(1));
            let cached = resource.refetch().await;

            assert_eq!(cached.data(), Some(&brand(42, "Acme")));
            assert_eq!(resource.fetch_count(), 1);
            Ok(())
        })
        .await
}

#[tokio::test]
async fn immediate_double_refetch_fetches_once() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let clock = ManualClock::new(Timestamp::UNIX_EPOCH);
            let backend = Backend::default();
            let resource = backend
                .resource()
                .with_clock(clock.clone())
                .with_options(
                    ResourceOptions::list().stale_time(SignedDuration::from_mins(5)),
                );

            let first = spawn_local(resource.set_key(key(42)).expect("fetches"));
            backend.respond(42, Ok(brand(42, "Acme")))?;
            first.await?;

            clock.advance(SignedDuration::from_mins(10));
            let a = spawn_local(resource.refetch());
            let b = spawn_local(resource.refetch());
            assert_eq!(resource.fetch_count(), 2);

            backend.respond(42, Ok(brand(42, "Acme v2")))?;
            a.await?;
            b.await?;

            assert_eq!(resource.state().data(), Some(&brand(42, "Acme v2")));
            assert_eq!(resource.fetch_count(), 2);
            Ok(())
        })
        .await
}

#[tokio::test]
async fn list_refetch_keeps_previous_data() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.resource().with_options(ResourceOptions::list());

            let first = spawn_local(resource.set_key(key(42)).expect("fetches"));
            backend.respond(42, Ok(brand(42, "Acme")))?;
            first.await?;

            let refetch = spawn_local(resource.refetch());
            let snapshot = resource.snapshot();
            assert!(snapshot.is_refetching);
            assert_eq!(snapshot.state.data(), Some(&brand(42, "Acme")));

            backend.respond(42, Err(json!({ "message": "Service unavailable" })))?;
            refetch.await?;

            let snapshot = resource.snapshot();
            assert!(!snapshot.is_refetching);
            assert_eq!(
                snapshot.state.error().map(|e| e.message.as_str()),
                Some("Service unavailable")
            );
            Ok(())
        })
        .await
}

#[tokio::test]
async fn detail_refetch_shows_loading() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.resource().with_options(ResourceOptions::detail());

            let first = spawn_local(resource.set_key(key(42)).expect("fetches"));
            backend.respond(42, Ok(brand(42, "Acme")))?;
            first.await?;

            let refetch = spawn_local(resource.refetch());
            let snapshot = resource.snapshot();
            assert!(!snapshot.is_refetching);
            assert!(snapshot.state.is_loading());

            backend.respond(42, Ok(brand(42, "Acme")))?;
            refetch.await?;
            assert!(resource.state().is_success());
            Ok(())
        })
        .await
}

#[tokio::test]
async fn refetch_without_key_does_nothing() {
    let backend = Backend::default();
    let resource = backend.resource();

    let state = resource.refetch().await;
    assert!(state.is_idle());

    resource.set_key(None);
    let state = resource.refetch().await;
    assert!(state.is_success());
    assert_eq!(resource.fetch_count(), 0);
}

#[tokio::test]
async fn disposed_resource_ignores_responses() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.resource();
            let statuses = record_statuses(&resource);

            let request = spawn_local(resource.set_key(key(42)).expect("fetches"));
            resource.dispose();
            backend.respond(42, Ok(brand(42, "Acme")))?;
            request.await?;

            assert!(resource.state().is_loading());
            assert_eq!(*statuses.borrow(), vec!["idle", "loading"]);
            assert!(resource.set_key(key(43)).is_none());
            Ok(())
        })
        .await
}

#[tokio::test]
async fn mutate_edits_fetched_data_only() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.resource();

            let request = spawn_local(resource.set_key(key(42)).expect("fetches"));
            assert!(!resource.mutate(|b| b.name = "early".to_string()));
            backend.respond(42, Ok(brand(42, "Acme")))?;
            request.await?;

            assert!(resource.mutate(|b| b.name = "Acme Corp".to_string()));
            assert!(matches!(
                resource.state(),
                ResourceState::Success { data, .. } if data.name == "Acme Corp"
            ));
            Ok(())
        })
        .await
}

#[tokio::test]
async fn synced_edit_is_replaced_by_backend_copy() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.loaded().await?;

            let sync = spawn_local(resource.sync_edit(renamed("Acme Corp"), |b| backend.save(b)));

            // applied locally before the backend answers
            assert_eq!(resource.state().data(), Some(&brand(42, "Acme Corp")));
            assert_eq!(backend.saved(), vec![brand(42, "Acme Corp")]);

            backend.answer_save(Ok(brand(42, "ACME Corp")))?;
            assert!(sync.await?.is_confirmed());
            assert_eq!(resource.state().data(), Some(&brand(42, "ACME Corp")));
            assert_eq!(resource.fetch_count(), 1);
            Ok(())
        })
        .await
}

#[tokio::test]
async fn failed_sync_fetches_server_state_again() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.loaded().await?;

            let sync = spawn_local(resource.sync_edit(renamed("Acme Corp"), |b| backend.save(b)));
            backend.answer_save(Err(json!({ "message": "Name taken" })))?;
            settle().await;

            assert_eq!(resource.fetch_count(), 2);
            backend.respond(42, Ok(brand(42, "Acme")))?;

            match sync.await? {
                EditOutcome::Failed(error) => assert_eq!(error.message, "Name taken"),
                other => anyhow::bail!("expected failure, got {other:?}"),
            }
            assert_eq!(resource.state().data(), Some(&brand(42, "Acme")));
            Ok(())
        })
        .await
}

#[tokio::test]
async fn failed_sync_reloads_despite_fresh_data() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.resource();
            resource.set_options(ResourceOptions::list().stale_time(SignedDuration::from_mins(5)));
            let request = spawn_local(resource.set_key(key(42)).expect("fetches"));
            backend.respond(42, Ok(brand(42, "Acme")))?;
            request.await?;
            // fresh data: a plain refetch would be skipped
            resource.refetch().await;
            assert_eq!(resource.fetch_count(), 1);

            let sync = spawn_local(resource.sync_edit(renamed("Acme Corp"), |b| backend.save(b)));
            backend.answer_save(Err(json!({ "message": "Name taken" })))?;
            settle().await;
            backend.respond(42, Ok(brand(42, "Acme")))?;
            sync.await?;

            assert_eq!(resource.fetch_count(), 2);
            assert_eq!(resource.state().data(), Some(&brand(42, "Acme")));
            Ok(())
        })
        .await
}

#[tokio::test]
async fn answer_after_key_change_is_discarded() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.loaded().await?;

            let sync = spawn_local(resource.sync_edit(renamed("Acme Corp"), |b| backend.save(b)));
            // logged out while the save was in flight
            resource.set_key(None);
            backend.answer_save(Ok(brand(42, "Acme Corp")))?;

            assert!(matches!(sync.await?, EditOutcome::Superseded));
            assert_eq!(resource.state().data(), Some(&Brand::default()));

            // another user logs in; the first user's failure must not touch them
            let sync = spawn_local(resource.sync_edit(renamed("Guest"), |b| backend.save(b)));
            let request = spawn_local(resource.set_key(key(7)).expect("fetches"));
            backend.answer_save(Err(json!({ "message": "Unauthorized" })))?;
            backend.respond(7, Ok(brand(7, "Globex")))?;
            request.await?;

            assert!(matches!(sync.await?, EditOutcome::Failed(_)));
            assert_eq!(resource.state().data(), Some(&brand(7, "Globex")));
            assert_eq!(resource.fetch_count(), 2);
            Ok(())
        })
        .await
}

#[tokio::test]
async fn answer_to_older_edit_is_discarded() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.loaded().await?;

            let first = spawn_local(resource.sync_edit(renamed("One"), |b| backend.save(b)));
            let second = spawn_local(resource.sync_edit(renamed("Two"), |b| backend.save(b)));
            assert_eq!(backend.saved(), vec![brand(42, "One"), brand(42, "Two")]);

            backend.answer_save(Ok(brand(42, "One")))?;
            assert!(matches!(first.await?, EditOutcome::Superseded));
            assert_eq!(resource.state().data(), Some(&brand(42, "Two")));

            backend.answer_save(Ok(brand(42, "Two")))?;
            assert!(second.await?.is_confirmed());
            assert_eq!(resource.state().data(), Some(&brand(42, "Two")));
            Ok(())
        })
        .await
}

#[tokio::test]
async fn edit_supersedes_fetch_in_flight() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.loaded().await?;

            let refetch = spawn_local(resource.refetch());
            assert!(resource.edit(renamed("Acme Corp")).is_some());
            backend.respond(42, Ok(brand(42, "Acme")))?;
            refetch.await?;

            assert_eq!(resource.state().data(), Some(&brand(42, "Acme Corp")));
            assert!(!resource.snapshot().is_refetching);
            Ok(())
        })
        .await
}

#[tokio::test]
async fn edit_before_first_fetch_is_not_applied() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let backend = Backend::default();
            let resource = backend.resource();

            let request = spawn_local(resource.set_key(key(42)).expect("fetches"));
            let outcome = resource
                .sync_edit(renamed("Acme Corp"), |b| backend.save(b))
                .await;

            assert!(matches!(outcome, EditOutcome::NotApplied));
            assert!(backend.saved().is_empty());

            backend.respond(42, Ok(brand(42, "Acme")))?;
            request.await?;
            assert_eq!(resource.state().data(), Some(&brand(42, "Acme")));
            Ok(())
        })
        .await
}

/// A detail type with no sensible default, like a product.
#[derive(Debug, Clone, PartialEq)]
struct Product {
    id: i64,
    name: String,
}

#[tokio::test]
async fn detail_without_default_is_fetched_as_option() -> anyhow::Result<()> {
    LocalSet::new()
        .run_until(async {
            let resource: Resource<i64, Option<Product>, Value> =
                Resource::new(|id: i64| async move {
                    Ok(Some(Product {
                        id,
                        name: "Linen shirt".to_string(),
                    }))
                });

            let request = resource.set_key(Some(7)).expect("fetches");
            spawn_local(request).await?;

            let state = resource.state();
            let product = state.data().and_then(Option::as_ref).expect("fetched");
            assert_eq!(product.id, 7);
            assert_eq!(product.name, "Linen shirt");

            resource.set_key(None);
            assert_eq!(resource.state().data(), Some(&None));
            Ok(())
        })
        .await
}
