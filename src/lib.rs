pub mod benchmark;
pub mod collection;
pub mod config;
pub mod demo;
pub mod domain;
pub mod error;
pub mod logging;
pub mod metrics;

pub use benchmark::{BenchmarkReport, ContainerKind, LookupHarness, Measurement, ProbeCase};
pub use collection::PublisherCollection;
pub use config::{CliArgs, LabConfig, OutputFormat};
pub use domain::{Book, Dated, Organization, OrganizationOrder, Person, Publisher, Size};
pub use error::{DomainError, DomainResult, ERROR_METRICS, ErrorMetrics};
pub use logging::{LoggingConfig, init_logging};

use anyhow::Result;
use std::io::{self, Write};

/// Run the demo and the lookup benchmark, writing the report to stdout.
pub fn run_lab(config: LabConfig) -> Result<()> {
    tracing::info!(
        count = config.count,
        format = %config.format,
        skip_demo = config.skip_demo,
        "starting publisher lab",
    );

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    demo::run(&config, &mut out)?;
    out.flush()?;

    let errors = ERROR_METRICS.get_stats();
    tracing::info!(
        domain_errors = errors.code_counts.values().sum::<u64>(),
        "publisher lab finished"
    );
    Ok(())
}
