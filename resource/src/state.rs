use jiff::Timestamp;
use std::fmt;
use std::rc::Rc;

use crate::message::{ErrorShape, extract_message};

/// A captured fetch failure: the message to show plus the original value for
/// diagnostics.
pub struct ErrorInfo<E> {
    pub message: String,
    pub cause: Rc<E>,
}

impl<E: ErrorShape> ErrorInfo<E> {
    pub fn capture(cause: E) -> Self {
        Self {
            message: extract_message(&cause),
            cause: Rc::new(cause),
        }
    }
}

impl<E> Clone for ErrorInfo<E> {
    fn clone(&self) -> Self {
        Self {
            message: self.message.clone(),
            cause: self.cause.clone(),
        }
    }
}

impl<E> PartialEq for ErrorInfo<E> {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message && Rc::ptr_eq(&self.cause, &other.cause)
    }
}

impl<E: fmt::Debug> fmt::Debug for ErrorInfo<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorInfo")
            .field("message", &self.message)
            .field("cause", &self.cause)
            .finish()
    }
}

impl<E> fmt::Display for ErrorInfo<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// State of one resource. Exactly one variant is observable at a time.
pub enum ResourceState<T, E> {
    Idle,
    Loading,
    Error(ErrorInfo<E>),
    Success { data: T, fetched_at: Timestamp },
}

impl<T, E> ResourceState<T, E> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo<E>> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }

    pub fn fetched_at(&self) -> Option<Timestamp> {
        match self {
            Self::Success { fetched_at, .. } => Some(*fetched_at),
            _ => None,
        }
    }

    /// Short name of the variant, for logs.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Error(_) => "error",
            Self::Success { .. } => "success",
        }
    }
}

impl<T: Clone, E> Clone for ResourceState<T, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Loading => Self::Loading,
            Self::Error(error) => Self::Error(error.clone()),
            Self::Success { data, fetched_at } => Self::Success {
                data: data.clone(),
                fetched_at: *fetched_at,
            },
        }
    }
}

impl<T: PartialEq, E> PartialEq for ResourceState<T, E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Idle, Self::Idle) | (Self::Loading, Self::Loading) => true,
            (Self::Error(a), Self::Error(b)) => a == b,
            (
                Self::Success {
                    data: a,
                    fetched_at: at_a,
                },
                Self::Success {
                    data: b,
                    fetched_at: at_b,
                },
            ) => a == b && at_a == at_b,
            _ => false,
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for ResourceState<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Loading => f.write_str("Loading"),
            Self::Error(error) => f.debug_tuple("Error").field(error).finish(),
            Self::Success { data, fetched_at } => f
                .debug_struct("Success")
                .field("data", data)
                .field("fetched_at", fetched_at)
                .finish(),
        }
    }
}

/// What a consumer renders from: the state plus whether a refetch is running
/// behind previously fetched data.
pub struct Snapshot<T, E> {
    pub state: ResourceState<T, E>,
    pub is_refetching: bool,
}

impl<T: Clone, E> Clone for Snapshot<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            is_refetching: self.is_refetching,
        }
    }
}

impl<T: PartialEq, E> PartialEq for Snapshot<T, E> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.is_refetching == other.is_refetching
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Snapshot<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("state", &self.state)
            .field("is_refetching", &self.is_refetching)
            .finish()
    }
}
