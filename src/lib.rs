/// cgroup memory exporter: exposes the counters of the Linux cgroup v1 memory
/// controller as Prometheus gauges.
///
/// Every scrape re-reads the kernel's pseudo-files under the memory controller
/// mount; counters that are unavailable on the running kernel are left out of
/// the response instead of failing it.
pub mod api;
pub mod cgroup;
pub mod config;
pub mod error;
pub mod fsutil;
pub mod metrics;

/// Runs the exporter.
///
/// Reads the [`config::Config`] from the environment, registers the memory
/// collector in a fresh Prometheus registry and serves it over HTTP until
/// Ctrl-C is received.
///
/// # Errors
///
/// Possible errors include:
/// - An invalid `LISTEN_ADDR`.
/// - Failure to register the collector.
/// - Failure to bind or serve the HTTP listener.
pub async fn run() -> error::Result<()> {
    let config = config::Config::from_env()?;
    log::debug!("Config: {:?}", config);

    if !config.memory_mount.is_dir() {
        log::warn!(
            "Memory controller mount `{}` not found, scrapes will be empty",
            config.memory_mount.display()
        );
    }

    let collector =
        cgroup::MemoryCollector::new(cgroup::Registry::with_mount(&config.memory_mount));
    log::debug!(
        "Exporting {} metrics from `{}`",
        collector.describe().len(),
        config.memory_mount.display()
    );

    let registry = prometheus::Registry::new();
    registry.register(Box::new(metrics::PrometheusCollector::new(collector)?))?;

    api::APIServer::new(registry).listen(config.listen_addr).await
}
