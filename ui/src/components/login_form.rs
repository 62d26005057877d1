use payloads::{requests, responses};
use resource::extract_message;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::contexts::use_session;
use crate::utils::is_dev_mode;

pub const INPUT_CLASSES: &str = "w-full px-3 py-2 border border-neutral-300 \
    dark:border-neutral-600 rounded-md shadow-sm bg-white dark:bg-neutral-700 \
    text-neutral-900 dark:text-neutral-100 focus:outline-none focus:ring-2 \
    focus:ring-neutral-500 focus:border-neutral-500";

pub const LABEL_CLASSES: &str =
    "block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2";

pub const PRIMARY_BUTTON_CLASSES: &str = "w-full flex justify-center py-2 px-4 \
    rounded-md shadow-sm text-sm font-medium text-white bg-neutral-900 \
    hover:bg-neutral-800 dark:bg-neutral-100 dark:text-neutral-900 \
    dark:hover:bg-neutral-200 disabled:opacity-50 disabled:cursor-not-allowed \
    transition-colors duration-200";

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub title: AttrValue,
    pub on_success: Callback<responses::UserProfile>,
}

#[function_component]
pub fn LoginForm(props: &LoginFormProps) -> Html {
    let session = use_session();

    let username_ref = use_node_ref();
    let password_ref = use_node_ref();
    let error_message = use_state(|| None::<String>);
    let is_loading = use_state(|| false);

    let on_submit = {
        let username_ref = username_ref.clone();
        let password_ref = password_ref.clone();
        let error_message = error_message.clone();
        let is_loading = is_loading.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let value = |node: &NodeRef| {
                node.cast::<HtmlInputElement>()
                    .map(|input| input.value())
                    .unwrap_or_default()
            };
            let username = value(&username_ref);
            let password = value(&password_ref);

            if username.is_empty() || password.is_empty() {
                error_message.set(Some(
                    "Please enter both username and password".to_string(),
                ));
                return;
            }

            let credentials = requests::LoginCredentials { username, password };
            let error_message = error_message.clone();
            let is_loading = is_loading.clone();
            let on_success = on_success.clone();
            let session = session.clone();

            yew::platform::spawn_local(async move {
                is_loading.set(true);
                error_message.set(None);

                let api_client = crate::get_api_client();
                let result = match api_client.login(&credentials).await {
                    Ok(()) => api_client.user_profile().await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(profile) => {
                        session.set_user(profile.clone());
                        on_success.emit(profile);
                    }
                    Err(e) => {
                        tracing::debug!("Login failed: {}", e);
                        session.clear();
                        error_message.set(Some(extract_message(&e)));
                    }
                }

                is_loading.set(false);
            });
        })
    };

    html! {
        <div class="max-w-md w-full bg-white dark:bg-neutral-800 p-8 rounded-lg shadow-md">
            <h1 class="mb-8 text-center text-2xl font-bold text-neutral-900 dark:text-neutral-100">
                {&props.title}
            </h1>

            <form onsubmit={on_submit} class="space-y-6">
                if let Some(error) = &*error_message {
                    <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                        <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                    </div>
                }

                <div>
                    <label for="username" class={LABEL_CLASSES}>{"Username"}</label>
                    <input
                        ref={username_ref}
                        type="text"
                        id="username"
                        autocomplete="username"
                        required={true}
                        class={INPUT_CLASSES}
                    />
                </div>

                <div>
                    <label for="password" class={LABEL_CLASSES}>{"Password"}</label>
                    <input
                        ref={password_ref}
                        type="password"
                        id="password"
                        autocomplete="current-password"
                        required={true}
                        class={INPUT_CLASSES}
                    />
                </div>

                <button type="submit" disabled={*is_loading} class={PRIMARY_BUTTON_CLASSES}>
                    {if *is_loading { "Signing in..." } else { "Sign in" }}
                </button>
            </form>

            if is_dev_mode() {
                <p class="mt-6 text-center text-sm text-neutral-600 dark:text-neutral-400">
                    {"Development credentials: alice / supersecret"}
                </p>
            }
        </div>
    }
}
