//! Collection of cgroup v1 memory controller counters.
//!
//! This module reads the memory accounting pseudo-files the kernel exposes
//! under the memory controller mount (by default `/sys/fs/cgroup/memory`) and
//! turns them into unlabeled gauge samples.
//!
//! # Key Components
//!
//! - [`Registry`] — The fixed catalog of metrics and the files they come from.
//! - [`MemoryCollector`] — Reads the catalog on every scrape and emits samples.
//! - [`MetricSink`] — Receiver of the emitted samples.
//!
//! # Supported Stats
//!
//! - `memory.usage_in_bytes`, `memory.max_usage_in_bytes`,
//!   `memory.limit_in_bytes`, `memory.failcnt`
//! - the `memory.kmem.*` and `memory.kmem.tcp.*` counterparts
//! - `rss`, `cache`, `shmem`, `mapped_file` and their `total_` variants from
//!   `memory.stat`
//!
//! # Platform Requirements
//!
//! - Linux with the cgroup v1 memory controller mounted. Anything missing is
//!   simply absent from the scrape.
mod collector;
mod registry;
pub mod stats;

pub use collector::{MemoryCollector, MetricSink, Sample};
pub use registry::{
    DEFAULT_MEMORY_MOUNT, MetricDescriptor, MultiValueSource, NAMESPACE, Registry,
    SINGLE_VALUE_FILES, STAT_FILE_NAME, STAT_KEYS, SingleValueSource,
};
