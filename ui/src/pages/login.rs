use payloads::responses;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::LoginForm;
use crate::contexts::use_session;
use crate::hooks::{use_push_route, use_title};

#[function_component]
pub fn LoginPage() -> Html {
    use_title("Sign in");
    let session = use_session();
    let push_route = use_push_route();

    // Redirect to home if already logged in
    {
        let push_route = push_route.clone();
        use_effect_with(session.is_authenticated(), move |is_auth| {
            if *is_auth {
                push_route.emit(Route::Home);
            }
        });
    }

    let on_success = Callback::from(move |profile: responses::UserProfile| {
        tracing::info!("Logged in as {}", profile.username);
        push_route.emit(Route::Home);
    });

    html! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] gap-4">
            <LoginForm title="Sign in to the Storefront" on_success={on_success} />
            <Link<Route> to={Route::Home}
                classes="text-sm text-neutral-600 dark:text-neutral-400 underline">
                {"Continue browsing"}
            </Link<Route>>
        </div>
    }
}
