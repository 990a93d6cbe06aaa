//! The fixed catalog of metrics exported from the cgroup v1 memory controller.
//!
//! Every metric is declared as data in [`SINGLE_VALUE_FILES`] and [`STAT_KEYS`];
//! adding a counter is a table edit. Output names are derived from the source
//! file or stat key and prefixed with [`NAMESPACE`].

use std::path::{Path, PathBuf};

/// Default mount point of the cgroup v1 memory controller.
pub const DEFAULT_MEMORY_MOUNT: &str = "/sys/fs/cgroup/memory";

/// Name of the multi-value file under the memory controller mount.
pub const STAT_FILE_NAME: &str = "memory.stat";

/// Prefix of every exported metric name.
pub const NAMESPACE: &str = "cgroup";

/// Single-value files as `(name, help)`, read from `<mount>/memory.<name>`.
pub const SINGLE_VALUE_FILES: &[(&str, &str)] = &[
    ("usage_in_bytes", "Memory usage of the cgroup in bytes."),
    (
        "max_usage_in_bytes",
        "Maximum memory usage of the cgroup in bytes.",
    ),
    ("limit_in_bytes", "Memory limit of the cgroup in bytes."),
    ("failcnt", "Number of memory usage limit hits."),
    (
        "kmem.usage_in_bytes",
        "Kernel memory usage of the cgroup in bytes.",
    ),
    (
        "kmem.limit_in_bytes",
        "Kernel memory limit of the cgroup in bytes.",
    ),
    ("kmem.failcnt", "Number of kernel memory usage limit hits."),
    ("kmem.tcp.usage_in_bytes", "TCP buffer memory usage in bytes."),
    ("kmem.tcp.limit_in_bytes", "TCP buffer memory limit in bytes."),
    (
        "kmem.tcp.max_usage_in_bytes",
        "Maximum TCP buffer memory usage in bytes.",
    ),
    ("kmem.tcp.failcnt", "Number of TCP buffer memory limit hits."),
];

/// Keys looked up in `memory.stat`.
pub const STAT_KEYS: &[&str] = &[
    "rss",
    "cache",
    "shmem",
    "mapped_file",
    "total_rss",
    "total_cache",
    "total_shmem",
    "total_mapped_file",
];

/// Name and help text of one unlabeled gauge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricDescriptor {
    name: String,
    help: String,
}

impl MetricDescriptor {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }
}

/// A metric backed by a file holding exactly one numeric value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleValueSource {
    descriptor: MetricDescriptor,
    path: PathBuf,
}

impl SingleValueSource {
    pub fn descriptor(&self) -> &MetricDescriptor {
        &self.descriptor
    }

    /// Absolute path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A metric backed by one `<key> <value>` line of the shared stat file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiValueSource {
    descriptor: MetricDescriptor,
    key: String,
}

impl MultiValueSource {
    pub fn descriptor(&self) -> &MetricDescriptor {
        &self.descriptor
    }

    /// Key as it appears in the first column of the stat file.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Immutable catalog of every metric the collector can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    single_value_sources: Vec<SingleValueSource>,
    multi_value_sources: Vec<MultiValueSource>,
    stat_path: PathBuf,
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_mount(DEFAULT_MEMORY_MOUNT)
    }
}

impl Registry {
    /// Builds the catalog for the default memory controller mount.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the catalog with every source path rooted at `mount`.
    ///
    /// Metric names and help texts do not depend on the mount.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cgroup_memory_exporter::cgroup::Registry;
    /// let registry = Registry::with_mount("/sys/fs/cgroup/memory");
    /// let first = &registry.single_value_sources()[0];
    /// assert_eq!(first.descriptor().name(), "cgroup_usage_in_bytes");
    /// assert_eq!(
    ///     first.path(),
    ///     std::path::Path::new("/sys/fs/cgroup/memory/memory.usage_in_bytes")
    /// );
    /// ```
    pub fn with_mount(mount: impl AsRef<Path>) -> Self {
        let mount = mount.as_ref();
        let single_value_sources = SINGLE_VALUE_FILES
            .iter()
            .map(|(name, help)| SingleValueSource {
                descriptor: MetricDescriptor::new(metric_name(name), *help),
                path: mount.join(format!("memory.{name}")),
            })
            .collect();
        let multi_value_sources = STAT_KEYS
            .iter()
            .map(|key| MultiValueSource {
                descriptor: MetricDescriptor::new(
                    metric_name(&format!("memory.stat.{key}")),
                    format!("Value of `{key}` reported in {STAT_FILE_NAME}."),
                ),
                key: (*key).to_owned(),
            })
            .collect();

        Self {
            single_value_sources,
            multi_value_sources,
            stat_path: mount.join(STAT_FILE_NAME),
        }
    }

    pub fn single_value_sources(&self) -> &[SingleValueSource] {
        &self.single_value_sources
    }

    pub fn multi_value_sources(&self) -> &[MultiValueSource] {
        &self.multi_value_sources
    }

    /// Path of the shared `memory.stat` file.
    pub fn stat_path(&self) -> &Path {
        &self.stat_path
    }

    /// All descriptors, single-value sources first.
    pub fn descriptors(&self) -> impl Iterator<Item = &MetricDescriptor> {
        self.single_value_sources
            .iter()
            .map(SingleValueSource::descriptor)
            .chain(
                self.multi_value_sources
                    .iter()
                    .map(MultiValueSource::descriptor),
            )
    }
}

/// Derives an exported metric name from a dotted or slashed source name.
fn metric_name(source: &str) -> String {
    let suffix: String = source
        .chars()
        .map(|c| if c == '.' || c == '/' { '_' } else { c })
        .collect();
    format!("{NAMESPACE}_{suffix}")
}
