//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging with optional quiet mode.
///
/// Events are emitted as JSON lines on stderr. When `quiet` is true only
/// error-level events pass; otherwise info and above. `RUST_LOG` directives
/// are honoured on top of that. Calling this more than once is a no-op.
pub fn init_logging(quiet: bool) {
    let directive = if quiet { "optodesk=error" } else { "optodesk=info" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("Invalid log directive")),
        )
        .try_init();
}
