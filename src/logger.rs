// Logging setup. The console belongs to the interactive prompts, so the
// default filter only lets warnings through; failures the user already
// sees as prose are logged at debug and stay hidden unless asked for.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "menu_semanal_cli=debug"
    } else {
        "menu_semanal_cli=warn"
    }
}

/// `RUST_LOG` if present, otherwise the default for `verbose`.
pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Compact, timestamp-free subscriber writing to `writer`.
pub fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .without_time()
        .compact()
        .finish()
}

/// Install the stderr subscriber for the process.
pub fn init(verbose: bool) {
    if let Err(e) = tracing::subscriber::set_global_default(subscriber(env_filter(verbose), std::io::stderr)) {
        eprintln!("logging already initialised: {}", e);
    }
}
