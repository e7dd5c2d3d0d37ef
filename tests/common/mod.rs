/// Shared test utilities for dbquick integration tests
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing once for the whole test binary.
///
/// Output is controlled with `RUST_LOG`, e.g. `RUST_LOG=dbquick=debug`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
