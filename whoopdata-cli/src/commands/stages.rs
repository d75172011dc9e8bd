//! Stages command - sleep stage breakdown of the most recent sleep.

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::{debug, info};
use whoopdata_sync::{get_sleep_data, summarize_stages};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the stages command.
#[derive(Args, Default)]
pub struct StagesArgs {
    /// Output format (text or json).
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,
}

/// Runs the stages command.
pub async fn run(args: &StagesArgs, cli: &Cli) -> Result<()> {
    let settings = super::prepare(cli).await?;
    let api = super::connect(cli, &settings).await?;

    let report = get_sleep_data(&api, cli.from_date.as_deref(), cli.to_date.as_deref()).await?;
    info!(records = report.len(), "Retrieved sleep records");

    // The API lists the most recent cycle first.
    let Some(record) = report.records.first() else {
        bail!("No sleep data found for the specified date range");
    };
    debug!(activity_id = %record.activity_id, "Summarizing sleep");

    let summary = summarize_stages(&record.data)
        .with_context(|| format!("Could not read sleep stages of {}", record.activity_id))?;

    let rendered = match args.format {
        OutputFormat::Text => TextFormatter::new(!cli.no_color).format_stages(record, &summary),
        OutputFormat::Json => JsonFormatter::new(args.pretty).format_stages(record, &summary)?,
    };
    println!("{rendered}");

    Ok(())
}
