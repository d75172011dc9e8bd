//! Export command - fetch data and write JSON files.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use whoopdata_store::{ExportKind, Settings, with_kind_suffix, write_export, write_export_to};
use whoopdata_sync::{SkippedItem, WhoopApi, get_heart_rate_data, get_recovery_data, get_sleep_data};

use crate::Cli;
use crate::output::TextFormatter;

/// Which data to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum DataType {
    /// Sleep events.
    Sleep,
    /// Heart rate samples.
    #[value(name = "heart_rate")]
    HeartRate,
    /// Recovery vows.
    Recovery,
    /// Sleep and heart rate.
    #[default]
    All,
}

impl DataType {
    /// Export kinds covered by this selection, in export order.
    pub fn kinds(self) -> &'static [ExportKind] {
        match self {
            Self::Sleep => &[ExportKind::Sleep],
            Self::HeartRate => &[ExportKind::HeartRate],
            Self::Recovery => &[ExportKind::Recovery],
            Self::All => &[ExportKind::Sleep, ExportKind::HeartRate],
        }
    }
}

/// Arguments for the export command.
#[derive(Args, Default)]
pub struct ExportArgs {
    /// Output file path (defaults to a timestamped file in the output dir).
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Type of data to extract.
    #[arg(long = "data-type", short = 't', value_enum, default_value_t = DataType::All)]
    pub data_type: DataType,

    /// Time step for heart rate data in seconds (default: 600).
    #[arg(long)]
    pub step: Option<u32>,
}

/// Runs the export command.
pub async fn run(args: &ExportArgs, cli: &Cli) -> Result<()> {
    let settings = super::prepare(cli).await?;
    let api = super::connect(cli, &settings).await?;
    let formatter = TextFormatter::new(!cli.no_color);

    let kinds = args.data_type.kinds();
    info!(data_type = ?args.data_type, "Exporting");

    for &kind in kinds {
        let target = target_path(args.output.as_deref(), kind, kinds.len() > 1);
        let (count, skipped, written) =
            export_kind(&api, kind, args, cli, &settings, target.as_deref()).await?;

        if !cli.quiet {
            println!("{}", formatter.format_retrieved(kind, count));
            for item in &skipped {
                println!("{}", formatter.format_skipped(item));
            }
            if let Some(path) = written {
                println!("{}", formatter.format_saved(kind, &path));
            }
        }
    }

    Ok(())
}

/// Explicit output path for one kind, if `--output` was given.
fn target_path(output: Option<&Path>, kind: ExportKind, shared: bool) -> Option<PathBuf> {
    output.map(|path| {
        if shared {
            with_kind_suffix(path, kind)
        } else {
            path.to_path_buf()
        }
    })
}

async fn export_kind(
    api: &WhoopApi,
    kind: ExportKind,
    args: &ExportArgs,
    cli: &Cli,
    settings: &Settings,
    target: Option<&Path>,
) -> Result<(usize, Vec<SkippedItem>, Option<PathBuf>)> {
    let from = cli.from_date.as_deref();
    let to = cli.to_date.as_deref();

    match kind {
        ExportKind::Sleep => {
            let report = get_sleep_data(api, from, to).await?;
            let written = save(kind, &report.records, target, settings).await?;
            Ok((report.records.len(), report.skipped, written))
        }
        ExportKind::HeartRate => {
            let step = args.step.unwrap_or(settings.heart_rate_step);
            let points = get_heart_rate_data(api, from, to, step).await?;
            let written = save(kind, &points, target, settings).await?;
            Ok((points.len(), Vec::new(), written))
        }
        ExportKind::Recovery => {
            let report = get_recovery_data(api, from, to).await?;
            let written = save(kind, &report.records, target, settings).await?;
            Ok((report.records.len(), report.skipped, written))
        }
    }
}

async fn save<T: Serialize>(
    kind: ExportKind,
    records: &[T],
    target: Option<&Path>,
    settings: &Settings,
) -> Result<Option<PathBuf>> {
    let written = match target {
        Some(path) => write_export_to(path, kind, records).await?,
        None => write_export(&settings.output_dir, kind, records).await?,
    };
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_means_sleep_and_heart_rate() {
        assert_eq!(
            DataType::All.kinds(),
            &[ExportKind::Sleep, ExportKind::HeartRate]
        );
        assert_eq!(DataType::Recovery.kinds(), &[ExportKind::Recovery]);
    }

    #[test]
    fn test_target_path() {
        assert_eq!(target_path(None, ExportKind::Sleep, true), None);
        assert_eq!(
            target_path(Some(Path::new("out.json")), ExportKind::Sleep, false),
            Some(PathBuf::from("out.json"))
        );
        assert_eq!(
            target_path(Some(Path::new("out.json")), ExportKind::HeartRate, true),
            Some(PathBuf::from("out_heart_rate.json"))
        );
    }
}
