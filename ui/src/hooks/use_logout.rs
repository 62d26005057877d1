use crate::{Route, contexts::use_session};
use yew::prelude::*;
use yew_router::prelude::*;

#[hook]
pub fn use_logout() -> Callback<MouseEvent> {
    let session = use_session();
    let navigator = use_navigator();

    Callback::from(move |_| {
        let session = session.clone();
        let navigator = navigator.clone();

        yew::platform::spawn_local(async move {
            let api_client = crate::get_api_client();
            if let Err(e) = api_client.logout().await {
                tracing::warn!("Logout request failed: {}", e);
            }

            session.clear();

            if let Some(navigator) = navigator {
                navigator.push(&Route::Login);
            }
        });
    })
}
