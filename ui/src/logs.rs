//! Logging to the javascript console.

use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_web::MakeWebConsoleWriter;

const DEFAULT_FILTER: &str = "error,ui=debug,resource=debug";

/// Initialize logging. The filter can be replaced at build time with
/// `LOG_FILTER`, e.g. `LOG_FILTER=warn trunk build`.
pub fn init_logging() {
    let env_filter =
        EnvFilter::new(option_env!("LOG_FILTER").unwrap_or(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_ansi(false) // Only partially supported across browsers
        .without_time() // std::time is not available in browsers
        .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
        .with_level(false);

    // App re-renders call this again; only the first registration sticks.
    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        tracing::info!("Initialized logs");
    }
}
