pub mod fixtures;
pub mod invariants;
pub mod session;
pub mod store;

pub use invariants::check_invariants;
pub use session::TestSession;
pub use store::SessionStore;

/// Routes engine logs to the test writer. Honors `RUST_LOG`; safe to call
/// from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
