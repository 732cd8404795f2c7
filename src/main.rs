use clap::Parser;
use publisher_lab::{CliArgs, LabConfig, LoggingConfig, init_logging, run_lab};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr unless LOG_OUTPUT says otherwise
    let logging_config = LoggingConfig::from_env();
    let _guard = init_logging(logging_config)?;

    let cli = CliArgs::parse();
    let config = LabConfig::from_args(cli)?;

    // Validate configuration before building anything (fail-fast)
    config.validate()?;

    run_lab(config)
}
