//! Text output formatting with bars and colors.

use std::path::Path;
use whoopdata_core::{SleepRecord, StageSummary, StageTotal};
use whoopdata_store::ExportKind;
use whoopdata_sync::SkippedItem;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

// Bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 20,
        }
    }

    /// Set the bar width.
    #[cfg(test)]
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    /// "Retrieved 12 sleep records"
    pub fn format_retrieved(&self, kind: ExportKind, count: usize) -> String {
        format!("Retrieved {} {kind} records", self.bold(&count.to_string()))
    }

    /// "Sleep data saved to output/sleep_data_....json"
    pub fn format_saved(&self, kind: ExportKind, path: &Path) -> String {
        let label = capitalize(&kind.to_string());
        format!("{label} data saved to {}", self.green(&path.display().to_string()))
    }

    /// One line per skipped cycle.
    pub fn format_skipped(&self, item: &SkippedItem) -> String {
        let cycle = item
            .cycle_id
            .as_ref()
            .map_or_else(|| "cycle without id".to_string(), |id| format!("cycle {id}"));
        let date = item
            .date
            .as_deref()
            .map(|d| format!(" ({d})"))
            .unwrap_or_default();

        self.yellow(&format!("  skipped {cycle}{date}: {}", item.reason))
    }

    /// Per-stage breakdown of one sleep.
    pub fn format_stages(&self, record: &SleepRecord, summary: &StageSummary) -> String {
        let mut lines = Vec::new();

        let date = record.date.as_deref().unwrap_or("unknown date");
        lines.push(format!(
            "{} {}",
            self.bold(&format!("Sleep {date}")),
            self.dim(&format!(
                "(cycle {}, activity {})",
                record.cycle_id, record.activity_id
            ))
        ));

        for stage in &summary.stages {
            lines.push(self.format_stage(stage));
        }

        lines.push(format!(
            "  {:<6} {:>7}",
            self.bold("Total"),
            summary.display_total()
        ));

        lines.join("\n")
    }

    fn format_stage(&self, stage: &StageTotal) -> String {
        format!(
            "  {:<6} {:>7}  {} {:>5.1}%",
            display_stage(&stage.stage),
            stage.display_duration(),
            self.stage_bar(&stage.stage, stage.percent),
            stage.percent
        )
    }

    /// Creates a bar for a share of 0-100.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn progress_bar(&self, percent: f64) -> String {
        let filled = ((percent.clamp(0.0, 100.0) / 100.0) * self.bar_width as f64).round() as usize;
        let empty = self.bar_width.saturating_sub(filled);

        format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        )
    }

    fn stage_bar(&self, stage: &str, percent: f64) -> String {
        let bar = self.progress_bar(percent);
        if !self.use_colors {
            return bar;
        }

        match stage {
            "SWS" => self.blue(&bar),
            "LIGHT" => self.cyan(&bar),
            "REM" => self.green(&bar),
            "WAKE" => self.yellow(&bar),
            _ => self.dim(&bar),
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn blue(&self, text: &str) -> String {
        self.paint(BLUE, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// WAKE reads better as AWAKE next to sleep stages.
fn display_stage(stage: &str) -> &str {
    if stage == "WAKE" { "AWAKE" } else { stage }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
