//! Cross-crate integration flows.

pub mod flows;
pub mod session_restore;

/// Routes `tracing` output through the test harness's capture. Honors
/// `RUST_LOG`; safe to call from every test, only the first call wins.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
