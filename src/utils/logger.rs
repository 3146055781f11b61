use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Diagnostics go to stderr so stdout keeps
/// only the operator-facing report lines. `RUST_LOG` wins over `verbose`.
pub fn init_cli_logger(verbose: bool) {
    let default_directives = if verbose {
        "pwa_devtools=debug,tower_http=debug"
    } else {
        "pwa_devtools=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let output = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry().with(filter).with(output).init();
}
