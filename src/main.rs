/// Entry point for the cgroup memory exporter.
///
/// Serves the counters of the cgroup v1 memory controller on `/metrics` in the
/// Prometheus text format. Log verbosity is controlled with `RUST_LOG`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the listener cannot be
/// bound.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug LISTEN_ADDR=127.0.0.1:9417 cargo run
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    cgroup_memory_exporter::run().await?;
    Ok(())
}
