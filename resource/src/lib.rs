//! Asynchronous resource fetching with loading/error state.
//!
//! A [`Resource`] owns the [`ResourceState`] derived from a key and a fetch
//! function. Every key change or refetch starts a new request; only the most
//! recent request may commit its result. The crate does not spawn anything
//! itself: operations that start a request hand back a future and the caller
//! decides where to run it (`spawn_local` in the browser, a `LocalSet` in
//! tests).

mod clock;
mod key;
mod message;
mod options;
mod resource;
mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::FetchKey;
pub use message::{BackendPayload, ErrorShape, FALLBACK_MESSAGE, extract_message};
pub use options::ResourceOptions;
pub use resource::{EditOutcome, EditToken, Request, Resource};
pub use state::{ErrorInfo, ResourceState, Snapshot};
