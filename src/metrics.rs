//! Bridge between [`MemoryCollector`] and the `prometheus` crate.

use std::collections::HashMap;

use prometheus::core::{Collector, Desc};
use prometheus::proto::{Gauge, Metric, MetricFamily, MetricType};

use crate::cgroup::{MemoryCollector, MetricDescriptor, MetricSink};

/// Registers the cgroup memory gauges in a [`prometheus::Registry`].
///
/// # Examples
///
/// ```
/// # use cgroup_memory_exporter::cgroup::{MemoryCollector, Registry};
/// # use cgroup_memory_exporter::metrics::PrometheusCollector;
/// let collector = PrometheusCollector::new(MemoryCollector::new(Registry::new())).unwrap();
/// let registry = prometheus::Registry::new();
/// registry.register(Box::new(collector)).unwrap();
/// ```
#[derive(Debug)]
pub struct PrometheusCollector {
    inner: MemoryCollector,
    descs: Vec<Desc>,
}

impl PrometheusCollector {
    /// Wraps `inner` and builds a [`Desc`] for each of its descriptors.
    ///
    /// # Errors
    ///
    /// Returns an error if a descriptor is not a valid Prometheus metric.
    pub fn new(inner: MemoryCollector) -> prometheus::Result<Self> {
        let descs = inner
            .describe()
            .into_iter()
            .map(|descriptor| {
                Desc::new(
                    descriptor.name().to_owned(),
                    descriptor.help().to_owned(),
                    Vec::new(),
                    HashMap::new(),
                )
            })
            .collect::<prometheus::Result<Vec<_>>>()?;

        Ok(Self { inner, descs })
    }
}

impl Collector for PrometheusCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.descs.iter().collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let mut sink = GaugeFamilySink::default();
        self.inner.collect(&mut sink);
        sink.families
    }
}

/// Turns every emitted sample into a single-gauge [`MetricFamily`].
///
/// Names and help texts were validated when the [`Desc`]s were built, so the
/// families are assembled directly.
#[derive(Default)]
struct GaugeFamilySink {
    families: Vec<MetricFamily>,
}

impl MetricSink for GaugeFamilySink {
    fn emit(&mut self, descriptor: &MetricDescriptor, value: f64) {
        let mut gauge = Gauge::default();
        gauge.set_value(value);
        let mut metric = Metric::default();
        metric.set_gauge(gauge);

        let mut family = MetricFamily::default();
        family.set_name(descriptor.name().to_owned());
        family.set_help(descriptor.help().to_owned());
        family.set_field_type(MetricType::GAUGE);
        family.mut_metric().push(metric);
        self.families.push(family);
    }
}
