use payloads::{Role, responses::UserProfile};
use yew::prelude::*;

use crate::components::LoginForm;
use crate::contexts::{session::SessionState, use_session};

/// Renders children only for a logged in user with at least `role`.
///
/// Wrapping pages this way keeps their resource hooks from running (and
/// fetching) for visitors who could not see the result anyway.
#[derive(Properties, PartialEq)]
pub struct RequireRoleProps {
    #[prop_or(Role::Customer)]
    pub role: Role,
    #[prop_or_default]
    pub children: Children,
    /// Render prop for children that need the profile.
    #[prop_or_default]
    pub render: Option<Callback<UserProfile, Html>>,
}

#[function_component]
pub fn RequireRole(props: &RequireRoleProps) -> Html {
    let session = use_session();

    let profile = match session.state() {
        SessionState::Unknown => {
            return html! {
                <div class="text-center py-8">
                    <div class="inline-block animate-spin rounded-full h-8 w-8 \
                                border-2 border-neutral-900 dark:border-neutral-100 \
                                border-t-transparent dark:border-t-transparent"></div>
                </div>
            };
        }
        SessionState::LoggedOut => {
            return html! {
                <div class="flex items-center justify-center min-h-[60vh]">
                    <LoginForm title="Sign in to continue" on_success={Callback::noop()} />
                </div>
            };
        }
        SessionState::LoggedIn(profile) => profile.clone(),
    };

    if profile.role < props.role {
        return html! {
            <div class="text-center py-12">
                <p class="text-neutral-600 dark:text-neutral-400">
                    {"You do not have access to this page."}
                </p>
            </div>
        };
    }

    match &props.render {
        Some(render) => render.emit(profile),
        None => html! { <>{for props.children.iter()}</> },
    }
}
