pub mod bridge;
pub mod host;
pub mod types;

uniffi::setup_scaffolding!();

/// Initialize the library with proper panic handling
/// Call this once at startup from the embedding host
#[uniffi::export]
pub fn init_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        eprintln!("=== RUST PANIC ===");
        eprintln!("{panic_info}");
        eprintln!("Backtrace:\n{backtrace}");
        eprintln!("=== END PANIC ===");
    }));
}

/// Install the tracing subscriber. Safe to call more than once; later calls
/// are ignored. Filtering follows `RUST_LOG`, defaulting to `info`.
#[uniffi::export]
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
