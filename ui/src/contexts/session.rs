//! Who is logged in.
//!
//! The session lives in a context provided by [`SessionProvider`] rather than
//! in global state. The provider resolves it once on mount by asking the
//! backend; components read and change it through [`SessionHandle`].

use payloads::{Role, UserId, responses::UserProfile};
use std::rc::Rc;
use yew::prelude::*;

use crate::get_api_client;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// The backend has not answered yet.
    #[default]
    Unknown,
    LoggedOut,
    LoggedIn(UserProfile),
}

pub enum SessionAction {
    SetUser(UserProfile),
    Clear,
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(match action {
            SessionAction::SetUser(profile) => Self::LoggedIn(profile),
            SessionAction::Clear => Self::LoggedOut,
        })
    }
}

impl SessionState {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::LoggedIn(profile) => Some(profile),
            Self::Unknown | Self::LoggedOut => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

pub type SessionContext = UseReducerHandle<SessionState>;

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component]
pub fn SessionProvider(props: &SessionProviderProps) -> Html {
    let session = use_reducer(SessionState::default);

    // Resolve the session once on mount
    {
        let session = session.clone();
        use_effect_with((), move |_| {
            yew::platform::spawn_local(async move {
                let action = resolve_session().await;
                session.dispatch(action);
            });
        });
    }

    html! {
        <ContextProvider<SessionContext> context={session}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}

async fn resolve_session() -> SessionAction {
    let api_client = get_api_client();
    match api_client.login_check().await {
        Ok(true) => match api_client.user_profile().await {
            Ok(profile) => {
                tracing::debug!("Session resolved for {}", profile.username);
                SessionAction::SetUser(profile)
            }
            Err(e) => {
                tracing::warn!("Valid session but no profile: {}", e);
                SessionAction::Clear
            }
        },
        Ok(false) => SessionAction::Clear,
        Err(e) => {
            // Network error or other issue, assume logged out
            tracing::warn!("Session check failed: {}", e);
            SessionAction::Clear
        }
    }
}

/// Read and write access to the session.
#[derive(Clone)]
pub struct SessionHandle {
    context: SessionContext,
}

impl SessionHandle {
    pub fn state(&self) -> &SessionState {
        &self.context
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.context.user()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user().map(|profile| profile.user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// Whether the logged in user has at least `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.user().is_some_and(|profile| profile.role >= role)
    }

    pub fn set_user(&self, profile: UserProfile) {
        self.context.dispatch(SessionAction::SetUser(profile));
    }

    pub fn clear(&self) {
        self.context.dispatch(SessionAction::Clear);
    }
}

#[hook]
pub fn use_session() -> SessionHandle {
    let context = use_context::<SessionContext>()
        .expect("use_session must be used within a SessionProvider");
    SessionHandle { context }
}
