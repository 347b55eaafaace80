#![cfg(test)]

use std::sync::Once;

/// Install a stdout subscriber once per test binary, filtered by `RUST_LOG`.
///
/// Without `RUST_LOG` nothing is printed.
pub fn init_tracing_from_env() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer();
        let _ = subscriber.try_init();
    });
}
