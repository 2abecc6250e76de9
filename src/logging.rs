use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize diagnostic logging on stderr.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or everything
/// from traktshow down to debug level with `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "traktshow=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact();

    // try_init so repeated calls (tests) don't panic
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
