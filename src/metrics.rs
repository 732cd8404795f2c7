//! Prometheus metrics for lookup benchmarking
//!
//! Collects lookup outcomes and latencies per container kind, plus a few
//! counters for the domain layer. Rendered in Prometheus text format on demand.
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use prometheus_client::encoding::{EncodeLabelSet, text::encode};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::metrics::histogram::{Histogram, exponential_buckets};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::OrganizationOrder;

/// Global metrics registry instance
pub static METRICS: Lazy<Arc<MetricsCollector>> = Lazy::new(|| Arc::new(MetricsCollector::new()));

/// Labels for lookup outcome metrics
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct LookupLabels {
    /// Container kind (e.g., "organization_vec", "string_map_key")
    pub container: String,
    /// Lookup outcome ("found", "not_found")
    pub outcome: String,
}

/// Labels for per-container metrics
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ContainerLabels {
    pub container: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct SortLabels {
    pub order: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ErrorLabels {
    pub field: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct PhaseLabels {
    pub phase: String,
}

/// Central metrics collector with Prometheus registry
pub struct MetricsCollector {
    registry: RwLock<Registry>,

    /// Total lookups by container and outcome
    pub lab_lookups_total: Family<LookupLabels, Counter>,

    /// Lookup duration in seconds by container
    pub lab_lookup_duration_seconds: Family<ContainerLabels, Histogram>,

    /// Number of entities in the most recently built harness
    pub lab_collection_size: Gauge,

    /// Total collection sorts by order
    pub lab_sorts_total: Family<SortLabels, Counter>,

    /// Total domain validation errors by field
    pub lab_domain_errors_total: Family<ErrorLabels, Counter>,

    /// Driver phase duration in seconds
    pub lab_phase_duration_seconds: Family<PhaseLabels, Histogram>,
}

impl MetricsCollector {
    /// Create a new metrics collector with all metrics registered
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let lab_lookups_total = Family::<LookupLabels, Counter>::default();
        // Counters are registered without the suffix; encoding appends `_total`
        registry.register(
            "lab_lookups",
            "Total number of timed lookups",
            lab_lookups_total.clone(),
        );

        let lab_lookup_duration_seconds =
            Family::<ContainerLabels, Histogram>::new_with_constructor(|| {
                // Buckets: 100ns up to roughly 1.7s
                Histogram::new(exponential_buckets(1e-7, 4.0, 13))
            });
        registry.register(
            "lab_lookup_duration_seconds",
            "Lookup latency histogram in seconds",
            lab_lookup_duration_seconds.clone(),
        );

        let lab_collection_size = Gauge::default();
        registry.register(
            "lab_collection_size",
            "Number of entities in the benchmark containers",
            lab_collection_size.clone(),
        );

        let lab_sorts_total = Family::<SortLabels, Counter>::default();
        registry.register(
            "lab_sorts",
            "Total number of publisher collection sorts",
            lab_sorts_total.clone(),
        );

        let lab_domain_errors_total = Family::<ErrorLabels, Counter>::default();
        registry.register(
            "lab_domain_errors",
            "Total number of domain validation errors by field",
            lab_domain_errors_total.clone(),
        );

        let lab_phase_duration_seconds =
            Family::<PhaseLabels, Histogram>::new_with_constructor(|| {
                Histogram::new(exponential_buckets(0.0001, 4.0, 10))
            });
        registry.register(
            "lab_phase_duration_seconds",
            "Driver phase duration in seconds",
            lab_phase_duration_seconds.clone(),
        );

        Self {
            registry: RwLock::new(registry),
            lab_lookups_total,
            lab_lookup_duration_seconds,
            lab_collection_size,
            lab_sorts_total,
            lab_domain_errors_total,
            lab_phase_duration_seconds,
        }
    }

    /// Encode metrics in Prometheus text format
    pub fn encode(&self) -> String {
        let mut buffer = String::new();
        let registry = self.registry.read();
        if let Err(error) = encode(&mut buffer, &registry) {
            tracing::warn!(?error, "failed to encode metrics");
        }
        buffer
    }

    /// Record one timed lookup
    pub fn record_lookup(&self, container: &str, found: bool, elapsed: Duration) {
        self.lab_lookups_total
            .get_or_create(&LookupLabels {
                container: container.to_string(),
                outcome: if found { "found" } else { "not_found" }.to_string(),
            })
            .inc();

        self.lab_lookup_duration_seconds
            .get_or_create(&ContainerLabels {
                container: container.to_string(),
            })
            .observe(elapsed.as_secs_f64());
    }

    /// Update the benchmark container size
    pub fn set_collection_size(&self, size: usize) {
        self.lab_collection_size.set(size as i64);
    }

    pub fn record_sort(&self, order: OrganizationOrder) {
        self.lab_sorts_total
            .get_or_create(&SortLabels {
                order: order.to_string(),
            })
            .inc();
    }

    pub fn record_domain_error(&self, field: &str) {
        self.lab_domain_errors_total
            .get_or_create(&ErrorLabels {
                field: field.to_string(),
            })
            .inc();
    }

    pub fn record_phase(&self, phase: &str, duration: Duration) {
        self.lab_phase_duration_seconds
            .get_or_create(&PhaseLabels {
                phase: phase.to_string(),
            })
            .observe(duration.as_secs_f64());
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard that times a driver phase
///
/// The duration is recorded when `finish` is called or, failing that, when
/// the guard is dropped.
///
/// # Example
///
/// ```no_run
/// use publisher_lab::metrics::PhaseTimer;
///
/// let timer = PhaseTimer::new("harness_build");
/// // build the harness here
/// let elapsed = timer.finish();
/// ```
pub struct PhaseTimer {
    phase: String,
    start: Instant,
    completed: bool,
}

impl PhaseTimer {
    pub fn new(phase: &str) -> Self {
        Self {
            phase: phase.to_string(),
            start: Instant::now(),
            completed: false,
        }
    }

    /// Record the phase now and return its duration
    pub fn finish(mut self) -> Duration {
        let duration = self.start.elapsed();
        METRICS.record_phase(&self.phase, duration);
        self.completed = true;
        duration
    }
}

impl Drop for PhaseTimer {
    fn drop(&mut self) {
        if !self.completed {
            METRICS.record_phase(&self.phase, self.start.elapsed());
        }
    }
}
