use payloads::ClientError;
use resource::{
    EditOutcome, ErrorShape, FetchKey, Resource, ResourceOptions, ResourceState, Snapshot,
};
use serde::Serialize;
use std::fmt::Debug;
use std::future::Future;
use yew::prelude::*;

use crate::contexts::toast::ToastHandle;

/// What a resource hook hands to its component.
pub struct ResourceHandle<K, T, E = ClientError> {
    pub state: ResourceState<T, E>,
    /// True while a refetch runs behind previously fetched data.
    pub is_refetching: bool,
    pub refetch: Callback<()>,
    resource: Resource<K, T, E>,
}

impl<K, T, E> ResourceHandle<K, T, E>
where
    K: Clone + Serialize + Debug + 'static,
    T: Clone + 'static,
    E: ErrorShape + 'static,
{
    pub fn data(&self) -> Option<&T> {
        self.state.data()
    }

    /// The underlying resource, for optimistic edits via
    /// [`Resource::sync_edit`] or [`Resource::mutate`].
    pub fn resource(&self) -> Resource<K, T, E> {
        self.resource.clone()
    }

    /// Reports loading while the key cannot be decided yet, e.g. before the
    /// session is known, instead of the empty value of an absent key.
    pub fn pending(mut self) -> Self {
        self.state = ResourceState::Loading;
        self.is_refetching = false;
        self
    }

    /// Render based on resource state with contextual loading/error
    /// messages.
    ///
    /// - Idle or loading: "Loading {context}..."
    /// - Error: "Error loading {context}: ..."
    /// - Success: `render_fn(data, is_refetching)`
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool) -> Html,
    {
        match &self.state {
            ResourceState::Idle | ResourceState::Loading => html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {format!("Loading {}...", context)}
                    </p>
                </div>
            },
            ResourceState::Error(error) => html! {
                <div class="p-4 rounded-md bg-red-50 \
                           dark:bg-red-900/20 border \
                           border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">
                        {format!("Error loading {}: {}", context, error.message)}
                    </p>
                </div>
            },
            ResourceState::Success { data, .. } => {
                render_fn(data, self.is_refetching)
            }
        }
    }
}

/// Generic resource hook.
///
/// Fetches whenever `key` changes by value (compared through its serialized
/// form) and keeps only the newest response. A `None` key skips the fetch
/// and yields `T::default()`, which is how guarded fetches ("only once the
/// user is known") are expressed. Types without a sensible default are
/// fetched as `Option<T>`. The fetch closure may capture values from
/// the current render; the latest closure is used for each new request.
///
/// # Example
///
/// ```rust
/// #[hook]
/// pub fn use_brand(brand_id: BrandId) -> ResourceHandle<BrandId, Option<Brand>> {
///     use_resource(Some(brand_id), ResourceOptions::detail(), |brand_id| async move {
///         get_api_client().get_brand(&brand_id).await.map(Some)
///     })
/// }
/// ```
#[hook]
pub fn use_resource<K, T, E, F, Fut>(
    key: Option<K>,
    options: ResourceOptions,
    fetch: F,
) -> ResourceHandle<K, T, E>
where
    K: Clone + Serialize + Debug + 'static,
    T: Clone + Default + 'static,
    E: ErrorShape + 'static,
    F: Fn(K) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let snapshot = use_state(|| Snapshot::<T, E> {
        state: ResourceState::Idle,
        is_refetching: false,
    });
    let cell = use_mut_ref(|| None::<Resource<K, T, E>>);

    let existing = cell.borrow().clone();
    let resource = match existing {
        Some(resource) => {
            resource.set_fetcher(fetch);
            resource
        }
        None => {
            let resource = Resource::new(fetch);
            let snapshot = snapshot.clone();
            resource.observe(move |latest| snapshot.set(latest.clone()));
            *cell.borrow_mut() = Some(resource.clone());
            resource
        }
    };
    resource.set_options(options);

    // Drop pending responses once the component unmounts
    {
        let resource = resource.clone();
        use_effect_with((), move |_| move || resource.dispose());
    }

    // Fetch on mount and whenever the key changes
    {
        let resource = resource.clone();
        let fingerprint = key.as_ref().map(FetchKey::of);
        use_effect_with(fingerprint, move |_| {
            if let Some(request) = resource.set_key(key) {
                yew::platform::spawn_local(async move {
                    request.await;
                });
            }
        });
    }

    let refetch = {
        let resource = resource.clone();
        Callback::from(move |_| {
            let request = resource.refetch();
            yew::platform::spawn_local(async move {
                request.await;
            });
        })
    };

    let Snapshot {
        state,
        is_refetching,
    } = (*snapshot).clone();

    ResourceHandle {
        state,
        is_refetching,
        refetch,
        resource,
    }
}

/// Tells the user how an optimistic edit of `what` ("cart", "wishlist")
/// ended. Superseded edits stay silent; a newer edit or fetch owns the data.
pub fn report_edit(outcome: EditOutcome<ClientError>, what: &str, toast: &ToastHandle) {
    match outcome {
        EditOutcome::Confirmed => {}
        EditOutcome::Superseded => {
            tracing::debug!("Dropped backend answer for an outdated {} edit", what);
        }
        EditOutcome::NotApplied => {
            tracing::debug!("Ignored {} edit before the first fetch", what);
            toast.error(format!("Your {what} is still loading, please try again"));
        }
        EditOutcome::Failed(error) => {
            toast.failure(&format!("update {what}"), &*error.cause);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_handle_reports_loading_over_empty_value() {
        let resource: Resource<u64, Vec<u64>, ClientError> =
            Resource::new(|_user_id: u64| async { Ok(vec![1, 2]) });
        resource.set_key(None);
        let handle = ResourceHandle {
            state: resource.state(),
            is_refetching: true,
            refetch: Callback::noop(),
            resource,
        };
        assert_eq!(handle.data(), Some(&Vec::new()));

        let handle = handle.pending();

        assert!(handle.state.is_loading());
        assert!(!handle.is_refetching);
        assert_eq!(handle.data(), None);
        assert_eq!(handle.resource().fetch_count(), 0);
    }
}
