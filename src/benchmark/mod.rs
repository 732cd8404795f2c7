//! Collection lookup benchmark.
//!
//! Builds four parallel containers over the same N generated organizations
//! and times a membership test in each one:
//!
//! | container | lookup | cost |
//! |---|---|---|
//! | `Vec<Organization>` | equality scan | O(N) |
//! | `Vec<String>` | equality scan on canonical strings | O(N) |
//! | `HashMap<Organization, Publisher>` | key lookup | O(1) expected |
//! | `HashMap<String, Publisher>` | key lookup | O(1) expected |
//! | `HashMap<Organization, Publisher>` | value scan | O(N) |
//!
//! Results are pushed into a [`ResultSink`] so the harness never prints.

pub mod harness;
pub mod probe;
pub mod report;
pub mod sink;

pub use harness::{ContainerKind, LookupHarness, Measurement};
pub use probe::{ProbeCase, absent_probe};
pub use report::{BenchmarkReport, ProbeReport};
pub use sink::{CompositeSink, LogSink, MetricsSink, ReportSink, ResultSink};
