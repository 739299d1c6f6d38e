mod config;
mod migrate;
mod output;
mod storage;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::Instrument;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    output::{format_report, OutputFormat},
    storage::{
        dynamodb::{create_client, AwsConfig},
        DynamoDbRepository,
    },
};

/// propman-migrate - Move legacy single-table records into tenant-scoped keys
#[derive(Parser, Debug)]
#[command(name = "propman-migrate")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,

    /// Report output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "propman_migrate=info,propman_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    cli.config.validate()?;

    let aws_config = AwsConfig::default();
    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!(
        "migration",
        run_id = %run_id,
        table = %cli.config.table_name,
    );

    let report = async {
        tracing::info!(endpoint = %aws_config.target_display(), "Connecting to DynamoDB");
        let client = create_client(&aws_config).await;
        let repository = DynamoDbRepository::new(client, cli.config.table_name.clone())
            .with_page_size(cli.config.page_size);
        tracing::info!(
            table = repository.table_name(),
            page_size = ?cli.config.page_size,
            "Scanning table"
        );

        migrate::run(repository, &cli.config).await
    }
    .instrument(span)
    .await?;

    println!("{}", format_report(&report, cli.format)?);

    if report.has_errors() {
        tracing::warn!(
            errors = report.errors.len(),
            "Migration finished with errors, re-run to retry failed records"
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
