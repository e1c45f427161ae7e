/// Installs the global `tracing` subscriber.
///
/// Verbosity comes from `RUST_LOG`, e.g. `RUST_LOG=quickbite=debug`.
/// Output is compact and omits module targets; every store log line
/// carries an `entity_type` field instead.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
