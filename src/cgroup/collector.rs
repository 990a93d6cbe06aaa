use std::collections::{HashMap, HashSet};

use crate::error::ResultOkLogExt;

use super::registry::{MetricDescriptor, Registry};
use super::stats;

/// Receives the gauge samples produced by one scrape.
pub trait MetricSink {
    fn emit(&mut self, descriptor: &MetricDescriptor, value: f64);
}

/// One observed gauge value.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub descriptor: MetricDescriptor,
    pub value: f64,
}

impl MetricSink for Vec<Sample> {
    fn emit(&mut self, descriptor: &MetricDescriptor, value: f64) {
        self.push(Sample {
            descriptor: descriptor.clone(),
            value,
        });
    }
}

/// Turns the [`Registry`] into gauge samples on every scrape.
///
/// Holds no state besides the registry, so a shared reference can be
/// collected from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollector {
    registry: Registry,
}

impl MemoryCollector {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns every descriptor this collector can emit.
    ///
    /// Does not touch the filesystem.
    pub fn describe(&self) -> Vec<&MetricDescriptor> {
        self.registry.descriptors().collect()
    }

    /// Reads the current value of every source and emits it into `sink`.
    ///
    /// Sources that are missing, unreadable or unparsable are skipped and
    /// logged at debug level. Emitting nothing is a valid outcome, e.g. when
    /// the memory controller is not mounted.
    pub fn collect<S: MetricSink + ?Sized>(&self, sink: &mut S) {
        self.collect_single_values(sink);
        self.collect_stat_values(sink);
    }

    fn collect_single_values<S: MetricSink + ?Sized>(&self, sink: &mut S) {
        for source in self.registry.single_value_sources() {
            if let Some(value) = stats::read_single_value(source.path()).ok_log(log::Level::Debug)
            {
                sink.emit(source.descriptor(), value);
            }
        }
    }

    fn collect_stat_values<S: MetricSink + ?Sized>(&self, sink: &mut S) {
        let sources = self.registry.multi_value_sources();
        if sources.is_empty() {
            return;
        }

        let mut by_key: HashMap<&str, Vec<&MetricDescriptor>> =
            HashMap::with_capacity(sources.len());
        for source in sources {
            by_key
                .entry(source.key())
                .or_default()
                .push(source.descriptor());
        }
        let mut emitted: HashSet<&str> = HashSet::with_capacity(by_key.len());

        let stat = stats::read_memory_stat(self.registry.stat_path(), |lineno, key, value| {
            let Some((&key, descriptors)) = by_key.get_key_value(key) else {
                return;
            };
            if emitted.contains(key) {
                log::debug!("ignoring repeated key '{key}' at line {lineno}");
                return;
            }
            if let Some(value) =
                stats::parse_stat_value(key, value, lineno).ok_log(log::Level::Debug)
            {
                emitted.insert(key);
                for descriptor in descriptors {
                    sink.emit(descriptor, value);
                }
            }
        });
        if let Err(err) = stat {
            log::debug!("skipping remaining memory.stat entries: {err}");
        }
    }
}
