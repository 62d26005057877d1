use resource::{ErrorShape, extract_message};
use std::collections::BTreeMap;
use std::rc::Rc;
use uuid::Uuid;
use yew::prelude::*;

/// Milliseconds a toast stays up unless dismissed.
const DEFAULT_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastType {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub toast_type: ToastType,
    pub duration: Option<u32>, // milliseconds, None for no auto-dismiss
}

impl Toast {
    pub fn new(message: String, toast_type: ToastType) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
            toast_type,
            duration: Some(DEFAULT_DURATION_MS),
        }
    }

    pub fn error(message: String) -> Self {
        Self::new(message, ToastType::Error)
    }

    pub fn success(message: String) -> Self {
        Self::new(message, ToastType::Success)
    }
}

/// Visible toasts in the order they were raised.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    toasts: BTreeMap<u64, Toast>,
    next_seq: u64,
}

impl ToastState {
    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.values()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

pub enum ToastAction {
    Add(Toast),
    Remove(Uuid),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = (*self).clone();

        match action {
            ToastAction::Add(toast) => {
                state.toasts.insert(state.next_seq, toast);
                state.next_seq += 1;
            }
            ToastAction::Remove(id) => {
                state.toasts.retain(|_, toast| toast.id != id);
            }
        }

        Rc::new(state)
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component]
pub fn ToastProvider(props: &ToastProviderProps) -> Html {
    let toast_state = use_reducer(ToastState::default);

    html! {
        <ContextProvider<ToastContext> context={toast_state}>
            {props.children.clone()}
        </ContextProvider<ToastContext>>
    }
}

#[derive(Clone)]
pub struct ToastHandle {
    context: ToastContext,
}

impl ToastHandle {
    pub fn new(context: ToastContext) -> Self {
        Self { context }
    }

    pub fn add(&self, toast: Toast) {
        let toast_id = toast.id;
        let duration = toast.duration;
        let context = self.context.clone();

        self.context.dispatch(ToastAction::Add(toast));

        if let Some(duration_ms) = duration {
            yew::platform::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(duration_ms).await;
                context.dispatch(ToastAction::Remove(toast_id));
            });
        }
    }

    pub fn error(&self, message: impl Into<String>) {
        self.add(Toast::error(message.into()));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.add(Toast::success(message.into()));
    }

    /// Error toast for a failed backend call, e.g.
    /// "Could not update cart: Product is out of stock".
    pub fn failure<E: ErrorShape + ?Sized>(&self, action: &str, err: &E) {
        self.error(format!("Could not {action}: {}", extract_message(err)));
    }

    pub fn remove(&self, id: Uuid) {
        self.context.dispatch(ToastAction::Remove(id));
    }
}

#[hook]
pub fn use_toast() -> ToastHandle {
    let context = use_context::<ToastContext>()
        .expect("use_toast must be used within a ToastProvider");
    ToastHandle::new(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_keep_insertion_order() {
        let first = Toast::error("first".to_string());
        let second = Toast::success("second".to_string());
        let first_id = first.id;

        let state = Rc::new(ToastState::default())
            .reduce(ToastAction::Add(first))
            .reduce(ToastAction::Add(second));
        let messages: Vec<_> =
            state.toasts().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);

        let state = state.reduce(ToastAction::Remove(first_id));
        let messages: Vec<_> =
            state.toasts().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["second"]);
    }
}
