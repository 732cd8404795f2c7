//! Destinations for benchmark measurements.

use super::harness::Measurement;
use super::probe::ProbeCase;
use super::report::{BenchmarkReport, ProbeReport};
use crate::domain::Organization;
use crate::metrics::METRICS;

/// Receives measurements as the harness produces them.
pub trait ResultSink {
    /// Called once per probe before its measurements.
    fn begin_probe(&mut self, _case: ProbeCase, _probe: &Organization) {}

    fn record(&mut self, case: ProbeCase, measurement: &Measurement);
}

impl<S: ResultSink + ?Sized> ResultSink for &mut S {
    fn begin_probe(&mut self, case: ProbeCase, probe: &Organization) {
        (**self).begin_probe(case, probe);
    }

    fn record(&mut self, case: ProbeCase, measurement: &Measurement) {
        (**self).record(case, measurement);
    }
}

impl<S: ResultSink + ?Sized> ResultSink for Box<S> {
    fn begin_probe(&mut self, case: ProbeCase, probe: &Organization) {
        (**self).begin_probe(case, probe);
    }

    fn record(&mut self, case: ProbeCase, measurement: &Measurement) {
        (**self).record(case, measurement);
    }
}

/// Collects measurements into a [`BenchmarkReport`].
#[derive(Debug, Default)]
pub struct ReportSink {
    report: BenchmarkReport,
}

impl ReportSink {
    pub fn new(collection_size: usize) -> Self {
        Self {
            report: BenchmarkReport::new(collection_size),
        }
    }

    pub fn report(&self) -> &BenchmarkReport {
        &self.report
    }

    pub fn into_report(self) -> BenchmarkReport {
        self.report
    }
}

impl ResultSink for ReportSink {
    fn begin_probe(&mut self, case: ProbeCase, probe: &Organization) {
        self.report.probes.push(ProbeReport::new(case, probe.clone()));
    }

    fn record(&mut self, case: ProbeCase, measurement: &Measurement) {
        match self.report.probes.last_mut() {
            Some(current) if current.case == case => current.measurements.push(*measurement),
            _ => tracing::warn!(
                case = %case,
                container = measurement.kind.metric_name(),
                "measurement recorded without a matching probe"
            ),
        }
    }
}

/// Feeds the global Prometheus collector.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsSink;

impl ResultSink for MetricsSink {
    fn record(&mut self, _case: ProbeCase, measurement: &Measurement) {
        METRICS.record_lookup(
            measurement.kind.metric_name(),
            measurement.found,
            measurement.elapsed,
        );
    }
}

/// Emits one debug event per measurement.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ResultSink for LogSink {
    fn begin_probe(&mut self, case: ProbeCase, probe: &Organization) {
        tracing::info!(case = %case, probe = %probe, "probe started");
    }

    fn record(&mut self, case: ProbeCase, measurement: &Measurement) {
        tracing::debug!(
            case = %case,
            container = measurement.kind.metric_name(),
            found = measurement.found,
            elapsed_ns = measurement.ticks() as u64,
            "lookup measured"
        );
    }
}

/// Forwards every call to each contained sink in order.
#[derive(Default)]
pub struct CompositeSink<'a> {
    sinks: Vec<Box<dyn ResultSink + 'a>>,
}

impl<'a> CompositeSink<'a> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add_sink(&mut self, sink: Box<dyn ResultSink + 'a>) {
        self.sinks.push(sink);
    }

    pub fn with_sink(mut self, sink: impl ResultSink + 'a) -> Self {
        self.add_sink(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl ResultSink for CompositeSink<'_> {
    fn begin_probe(&mut self, case: ProbeCase, probe: &Organization) {
        for sink in &mut self.sinks {
            sink.begin_probe(case, probe);
        }
    }

    fn record(&mut self, case: ProbeCase, measurement: &Measurement) {
        for sink in &mut self.sinks {
            sink.record(case, measurement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::harness::ContainerKind;
    use std::time::Duration;

    #[derive(Default)]
    struct CountingSink {
        probes: usize,
        records: usize,
    }

    impl ResultSink for CountingSink {
        fn begin_probe(&mut self, _case: ProbeCase, _probe: &Organization) {
            self.probes += 1;
        }

        fn record(&mut self, _case: ProbeCase, _measurement: &Measurement) {
            self.records += 1;
        }
    }

    fn measurement(found: bool) -> Measurement {
        Measurement {
            kind: ContainerKind::OrganizationVec,
            found,
            elapsed: Duration::from_nanos(10),
        }
    }

    #[test]
    fn test_report_sink_groups_by_probe() {
        let mut sink = ReportSink::new(3);
        let probe = Organization::new_unchecked("Publisher0", "Address0", 1900);

        sink.begin_probe(ProbeCase::First, &probe);
        sink.record(ProbeCase::First, &measurement(true));
        sink.record(ProbeCase::First, &measurement(true));
        sink.begin_probe(ProbeCase::Absent, &probe);
        sink.record(ProbeCase::Absent, &measurement(false));

        let report = sink.into_report();
        assert_eq!(report.collection_size, 3);
        assert_eq!(report.probes.len(), 2);
        assert_eq!(report.probes[0].measurements.len(), 2);
        assert_eq!(report.probes[1].measurements.len(), 1);
    }

    #[test]
    fn test_report_sink_ignores_orphan_records() {
        let mut sink = ReportSink::new(1);
        sink.record(ProbeCase::Middle, &measurement(true));
        assert!(sink.report().probes.is_empty());
    }

    #[test]
    fn test_composite_sink_fans_out() {
        let mut first = CountingSink::default();
        let mut second = CountingSink::default();
        let probe = Organization::default();

        {
            let mut composite = CompositeSink::new()
                .with_sink(&mut first)
                .with_sink(&mut second)
                .with_sink(LogSink);
            assert_eq!(composite.len(), 3);

            composite.begin_probe(ProbeCase::Last, &probe);
            composite.record(ProbeCase::Last, &measurement(true));
            composite.record(ProbeCase::Last, &measurement(true));
        }

        assert_eq!((first.probes, first.records), (1, 2));
        assert_eq!((second.probes, second.records), (1, 2));
    }
}
