use tracing_subscriber::EnvFilter;

/// Install the tracing output with a `RUST_LOG`-style filter and bridge
/// `log` records from dependencies. Safe to call more than once; later
/// calls leave the existing subscriber in place.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        let _ = tracing_log::LogTracer::init();
    }
}
