use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::{Rc, Weak};

use crate::clock::{Clock, SystemClock};
use crate::key::FetchKey;
use crate::message::ErrorShape;
use crate::options::ResourceOptions;
use crate::state::{ErrorInfo, ResourceState, Snapshot};

/// A started request. Resolves to the resource's state once the response has
/// been committed, or discarded because a newer request superseded it.
///
/// Futures are lazy: the request only makes progress once it is spawned or
/// awaited.
pub type Request<T, E> = LocalBoxFuture<'static, ResourceState<T, E>>;

/// Identifies the state an optimistic edit was applied to. The backend's
/// answer to that edit may only land while the token is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditToken {
    generation: u64,
}

/// How a synchronized edit ended.
#[derive(Debug)]
pub enum EditOutcome<E> {
    /// Nothing fetched yet, so nothing was edited or sent.
    NotApplied,
    /// The backend's copy replaced the local one.
    Confirmed,
    /// The backend answered, but a newer edit, key or fetch had taken over
    /// in the meantime; the answer was dropped.
    Superseded,
    /// The backend refused. If the edit was still current the resource has
    /// been fetched again to restore the server's view.
    Failed(ErrorInfo<E>),
}

impl<E> EditOutcome<E> {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

type Fetcher<K, T, E> = Rc<dyn Fn(K) -> LocalBoxFuture<'static, Result<T, E>>>;
type Observer<T, E> = Rc<dyn Fn(&Snapshot<T, E>)>;

/// Owns the state of one remote resource and the rules for changing it.
///
/// Every request gets a generation number; a response only commits if its
/// generation is still the latest when it arrives ("last request wins").
/// Superseded responses are dropped without surfacing anything.
///
/// Cloning yields another handle to the same resource.
pub struct Resource<K, T, E> {
    inner: Rc<RefCell<Inner<K, T, E>>>,
}

struct Inner<K, T, E> {
    fetcher: Fetcher<K, T, E>,
    options: ResourceOptions,
    clock: Rc<dyn Clock>,
    empty_value: T,
    key: Option<K>,
    /// `None` until the first key arrives; `Some(None)` for an absent key.
    fingerprint: Option<Option<FetchKey>>,
    generation: u64,
    in_flight: Option<u64>,
    state: ResourceState<T, E>,
    is_refetching: bool,
    observer: Option<Observer<T, E>>,
    fetch_count: u64,
    disposed: bool,
}

impl<K, T, E> Clone for Resource<K, T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, T, E> Resource<K, T, E>
where
    K: Clone + Serialize + fmt::Debug + 'static,
    T: Clone + 'static,
    E: ErrorShape + 'static,
{
    /// An absent key resolves to `T::default()`.
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        T: Default,
        F: Fn(K) -> Fut + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        Self::with_empty_value(fetch, T::default())
    }

    /// An absent key resolves to `empty_value` without fetching.
    pub fn with_empty_value<F, Fut>(fetch: F, empty_value: T) -> Self
    where
        F: Fn(K) -> Fut + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                fetcher: boxed_fetcher(fetch),
                options: ResourceOptions::default(),
                clock: Rc::new(SystemClock),
                empty_value,
                key: None,
                fingerprint: None,
                generation: 0,
                in_flight: None,
                state: ResourceState::Idle,
                is_refetching: false,
                observer: None,
                fetch_count: 0,
                disposed: false,
            })),
        }
    }

    pub fn with_options(self, options: ResourceOptions) -> Self {
        self.set_options(options);
        self
    }

    pub fn with_clock(self, clock: impl Clock + 'static) -> Self {
        self.inner.borrow_mut().clock = Rc::new(clock);
        self
    }

    pub fn set_options(&self, options: ResourceOptions) {
        self.inner.borrow_mut().options = options;
    }

    /// Replaces the fetch function used by future requests. Requests already
    /// started keep the function they were started with.
    pub fn set_fetcher<F, Fut>(&self, fetch: F)
    where
        F: Fn(K) -> Fut + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        self.inner.borrow_mut().fetcher = boxed_fetcher(fetch);
    }

    /// Registers the single observer called after every state change.
    pub fn observe(&self, observer: impl Fn(&Snapshot<T, E>) + 'static) {
        self.inner.borrow_mut().observer = Some(Rc::new(observer));
    }

    pub fn snapshot(&self) -> Snapshot<T, E> {
        let inner = self.inner.borrow();
        Snapshot {
            state: inner.state.clone(),
            is_refetching: inner.is_refetching,
        }
    }

    pub fn state(&self) -> ResourceState<T, E> {
        self.inner.borrow().state.clone()
    }

    pub fn key(&self) -> Option<K> {
        self.inner.borrow().key.clone()
    }

    /// Number of times the fetch function has been invoked.
    pub fn fetch_count(&self) -> u64 {
        self.inner.borrow().fetch_count
    }

    /// Points the resource at `key`.
    ///
    /// An absent key commits the empty value immediately. A key equal to the
    /// current one (by serialized form) does nothing. Any other key
    /// supersedes whatever is in flight, moves to `Loading` and returns the
    /// new request, which the caller must spawn.
    pub fn set_key(&self, key: Option<K>) -> Option<Request<T, E>> {
        let fingerprint = key.as_ref().map(FetchKey::of);
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed || inner.fingerprint.as_ref() == Some(&fingerprint)
            {
                return None;
            }
            inner.fingerprint = Some(fingerprint);
            inner.key = key.clone();
        }

        match key {
            Some(key) => Some(self.begin(key, true)),
            None => {
                {
                    let mut inner = self.inner.borrow_mut();
                    let data = inner.empty_value.clone();
                    let fetched_at = inner.clock.now();
                    inner.generation += 1;
                    inner.in_flight = None;
                    inner.is_refetching = false;
                    inner.state = ResourceState::Success { data, fetched_at };
                }
                tracing::debug!("No fetch key, using empty value");
                self.notify();
                None
            }
        }
    }

    /// Fetches the current key again.
    ///
    /// With a `stale_time` configured this is a no-op while a request is in
    /// flight or while the last success is still fresh; the returned future
    /// then resolves immediately with the current state. Without a key there
    /// is nothing to fetch and the current state is returned as well.
    pub fn refetch(&self) -> Request<T, E> {
        let (key, show_loading) = {
            let inner = self.inner.borrow();
            let current = || future::ready(inner.state.clone()).boxed_local();

            let Some(key) = inner.key.clone() else {
                return current();
            };
            if inner.disposed {
                return current();
            }

            if let Some(stale_time) = inner.options.stale_time {
                if inner.in_flight.is_some() {
                    tracing::debug!(
                        "Refetch skipped, request already in flight"
                    );
                    return current();
                }
                if let Some(fetched_at) = inner.state.fetched_at()
                    && inner.clock.now().duration_since(fetched_at) < stale_time
                {
                    tracing::debug!("Refetch skipped, data is still fresh");
                    return current();
                }
            }

            (key, !inner.options.keep_previous_data_while_refetching)
        };

        self.begin(key, show_loading)
    }

    /// Edits successfully fetched data in place, e.g. for optimistic
    /// updates. Returns false (and does nothing) in any other state.
    ///
    /// `edit` runs while the resource is borrowed and must not call back
    /// into it.
    pub fn mutate(&self, edit: impl FnOnce(&mut T)) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            match &mut inner.state {
                ResourceState::Success { data, .. } => edit(data),
                _ => return false,
            }
        }
        self.notify();
        true
    }

    /// Applies an optimistic edit to fetched data and returns the token its
    /// backend answer must present. `None` (and no edit) unless the state is
    /// `Success`.
    ///
    /// The edit supersedes any request in flight and any earlier edit still
    /// waiting for its answer.
    pub fn edit(&self, edit: impl FnOnce(&mut T)) -> Option<EditToken> {
        let token = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed || !inner.state.is_success() {
                return None;
            }
            inner.generation += 1;
            inner.in_flight = None;
            inner.is_refetching = false;
            if let ResourceState::Success { data, .. } = &mut inner.state {
                edit(data);
            }
            EditToken {
                generation: inner.generation,
            }
        };
        self.notify();
        Some(token)
    }

    /// Replaces the data with the backend's answer to the edit behind
    /// `token`, unless a newer edit, key or request has happened since.
    pub fn confirm_edit(&self, token: EditToken, data: T) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.generation != token.generation {
                tracing::debug!(
                    "Discarding answer to superseded edit {} (latest {})",
                    token.generation,
                    inner.generation
                );
                return false;
            }
            let fetched_at = inner.clock.now();
            inner.state = ResourceState::Success { data, fetched_at };
        }
        self.notify();
        true
    }

    /// Optimistic edit synchronized with the backend: `edit` applies
    /// locally, `send` receives the edited data and starts the backend call,
    /// whose answer then replaces the local copy. On failure a still current
    /// edit is rolled back by fetching the key again.
    pub fn sync_edit<S, Fut>(
        &self,
        edit: impl FnOnce(&mut T),
        send: S,
    ) -> LocalBoxFuture<'static, EditOutcome<E>>
    where
        S: FnOnce(&T) -> Fut,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        let Some(token) = self.edit(edit) else {
            return future::ready(EditOutcome::NotApplied).boxed_local();
        };
        let edited = self.inner.borrow().state.data().cloned();
        let Some(edited) = edited else {
            return future::ready(EditOutcome::NotApplied).boxed_local();
        };
        let response = send(&edited);

        let resource = self.clone();
        async move {
            match response.await {
                Ok(data) => {
                    if resource.confirm_edit(token, data) {
                        EditOutcome::Confirmed
                    } else {
                        EditOutcome::Superseded
                    }
                }
                Err(e) => {
                    let error = ErrorInfo::capture(e);
                    tracing::warn!("Edit {} failed: {}", token.generation, error.message);
                    if let Some(reload) = resource.reload_if_current(token) {
                        reload.await;
                    }
                    EditOutcome::Failed(error)
                }
            }
        }
        .boxed_local()
    }

    /// Fetches the current key again, ignoring staleness, if nothing has
    /// happened since the edit behind `token`.
    fn reload_if_current(&self, token: EditToken) -> Option<Request<T, E>> {
        let (key, show_loading) = {
            let inner = self.inner.borrow();
            if inner.disposed || inner.generation != token.generation {
                return None;
            }
            (
                inner.key.clone()?,
                !inner.options.keep_previous_data_while_refetching,
            )
        };
        Some(self.begin(key, show_loading))
    }

    /// Detaches the resource from its consumer: pending responses are
    /// discarded and the observer is released.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.disposed = true;
        inner.generation += 1;
        inner.in_flight = None;
        inner.observer = None;
    }

    fn begin(&self, key: K, show_loading: bool) -> Request<T, E> {
        let (generation, fetcher) = {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            inner.fetch_count += 1;
            inner.in_flight = Some(inner.generation);
            if show_loading || !inner.state.is_success() {
                inner.state = ResourceState::Loading;
                inner.is_refetching = false;
            } else {
                inner.is_refetching = true;
            }
            (inner.generation, inner.fetcher.clone())
        };
        tracing::debug!("Fetching {:?} (request {})", key, generation);
        self.notify();

        let response = fetcher(key);
        let resource = Rc::downgrade(&self.inner);
        async move {
            let result = response.await;
            commit(&resource, generation, result)
        }
        .boxed_local()
    }

    fn notify(&self) {
        notify(&self.inner);
    }
}

fn boxed_fetcher<K, T, E, F, Fut>(fetch: F) -> Fetcher<K, T, E>
where
    F: Fn(K) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    Rc::new(move |key| fetch(key).boxed_local())
}

fn commit<K, T, E>(
    resource: &Weak<RefCell<Inner<K, T, E>>>,
    generation: u64,
    result: Result<T, E>,
) -> ResourceState<T, E>
where
    T: Clone,
    E: ErrorShape,
{
    let Some(inner) = resource.upgrade() else {
        return ResourceState::Idle;
    };

    {
        let mut state = inner.borrow_mut();
        if state.generation != generation {
            tracing::debug!(
                "Discarding response for superseded request {} (latest {})",
                generation,
                state.generation
            );
            return state.state.clone();
        }

        let now = state.clock.now();
        state.in_flight = None;
        state.is_refetching = false;
        state.state = match result {
            Ok(data) => ResourceState::Success {
                data,
                fetched_at: now,
            },
            Err(e) => {
                let error = ErrorInfo::capture(e);
                tracing::warn!(
                    "Request {} failed: {}",
                    generation,
                    error.message
                );
                ResourceState::Error(error)
            }
        };
    }

    notify(&inner);
    let state = inner.borrow().state.clone();
    state
}

fn notify<K, T: Clone, E>(inner: &Rc<RefCell<Inner<K, T, E>>>) {
    let (observer, snapshot) = {
        let inner = inner.borrow();
        let Some(observer) = inner.observer.clone() else {
            return;
        };
        let snapshot = Snapshot {
            state: inner.state.clone(),
            is_refetching: inner.is_refetching,
        };
        (observer, snapshot)
    };
    observer(&snapshot);
}
