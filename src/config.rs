use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use strum::Display;

const DEFAULT_COUNT: usize = 1000;
const MAX_COUNT: usize = 5_000_000;

/// Output format of the benchmark report.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, ValueEnum, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabConfig {
    /// Number of generated publishers per container.
    pub count: usize,
    pub format: OutputFormat,
    pub skip_demo: bool,
    pub dump_metrics: bool,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            format: OutputFormat::default(),
            skip_demo: false,
            dump_metrics: false,
        }
    }
}

impl LabConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            count,
            format,
            skip_demo,
            metrics,
        } = args;

        Ok(Self {
            count: count.unwrap_or(DEFAULT_COUNT),
            format: format.unwrap_or_default(),
            skip_demo,
            dump_metrics: metrics,
        })
    }

    /// Fail fast on settings the harness cannot run with.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.count >= 1, "count must be at least 1, got {}", self.count);
        anyhow::ensure!(
            self.count <= MAX_COUNT,
            "count {} exceeds the maximum of {}",
            self.count,
            MAX_COUNT
        );

        tracing::debug!(
            count = self.count,
            format = %self.format,
            skip_demo = self.skip_demo,
            dump_metrics = self.dump_metrics,
            "configuration validated"
        );
        Ok(())
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "publisher-lab",
    about = "Publisher domain demo and collection lookup benchmark",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        env = "PUBLISHER_LAB_COUNT",
        value_name = "N",
        help = "Number of generated publishers in each container",
        value_parser = clap::value_parser!(usize)
    )]
    pub count: Option<usize>,

    #[arg(
        long,
        env = "PUBLISHER_LAB_FORMAT",
        value_enum,
        value_name = "FORMAT",
        help = "Benchmark report format (text or json)"
    )]
    pub format: Option<OutputFormat>,

    #[arg(
        long,
        env = "PUBLISHER_LAB_SKIP_DEMO",
        help = "Run only the lookup benchmark"
    )]
    pub skip_demo: bool,

    #[arg(
        long,
        env = "PUBLISHER_LAB_METRICS",
        help = "Print Prometheus metrics after the report"
    )]
    pub metrics: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LabConfig::from_args(CliArgs::default()).unwrap();
        assert_eq!(config, LabConfig::default());
        assert_eq!(config.count, 1000);
        config.validate().unwrap();
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_zero_count_rejected() {
        let config = LabConfig {
            count: 0,
            ..LabConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_oversized_count_rejected() {
        let config = LabConfig {
            count: MAX_COUNT + 1,
            ..LabConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
