//! Shared components for CLI commands
//!
//! Logging setup, configuration layering, project selection, the
//! concurrent parse stage and summary reporting used by both `convert`
//! and `merge`.

use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::services::project_discovery::{ProjectFiles, discover_projects};
use crate::app::services::report_parser::{ParseResult, ReportParser};
use crate::app::services::report_writer::WrittenTables;
use crate::app::services::source_reader::read_report_lines;
use crate::cli::args::SharedArgs;
use crate::cli::input::{print_project_listing, prompt_confirmation};
use crate::config::{Config, SourceEncoding};
use crate::{Error, Result};

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of work orders discovered
    pub projects_found: usize,
    /// Number of reports parsed without a fatal error
    pub reports_parsed: usize,
    /// Number of work orders that failed to parse or write
    pub reports_failed: usize,
    pub materials_parsed: usize,
    pub labor_parsed: usize,
    /// Rows dropped as invalid or contradictory
    pub rows_rejected: usize,
    pub rows_contradictory: usize,
    /// Work orders with at least one contradictory row
    pub contradictory_reports: Vec<String>,
    /// Total processing time
    pub processing_time: std::time::Duration,
    /// Output file sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
}

impl ProcessingStats {
    /// Add the counters of one parsed report
    pub fn record_report(&mut self, result: &ParseResult) {
        self.reports_parsed += 1;
        self.materials_parsed += result.stats.materials_parsed;
        self.labor_parsed += result.stats.labor_parsed;
        self.rows_rejected += result.stats.rows_rejected();
        self.rows_contradictory += result.stats.rows_contradictory;

        debug!(
            "OT {}: {:.1}% of rows accepted",
            result.report.report_id(),
            result.stats.success_rate()
        );
        if result.stats.has_contradictions() {
            self.contradictory_reports
                .push(result.report.report_id().to_string());
        }
    }

    /// Remember the written tables and their sizes
    pub fn record_output(&mut self, tables: &WrittenTables) {
        for path in [&tables.materials, &tables.labor] {
            let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            self.output_sizes.push((display_name(path), size));
        }
    }

    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(log_level: &str) -> EnvFilter {
    EnvFilter::new(format!("cost_sheet_processor={}", log_level))
}

/// Set up structured logging
pub fn setup_logging(args: &SharedArgs) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(log_level));

    let initialised = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    initialised
        .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (defaults -> env -> args)
pub fn build_config(args: &SharedArgs) -> Result<Config> {
    args.validate()?;

    let config = args.apply_to(Config::from_env()?);
    config.validate()?;

    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Check if an error is critical enough to stop processing
pub fn is_critical_error(error: &Error) -> bool {
    matches!(
        error,
        Error::Configuration { .. } | Error::ProcessingInterrupted { .. }
    )
}

/// Discover the work orders to process and ask for confirmation
///
/// Returns `None` when there is nothing to do or the user declined.
pub fn select_projects(config: &Config, show_listing: bool) -> Result<Option<Vec<ProjectFiles>>> {
    let projects = discover_projects(&config.input_dir)?;

    if projects.is_empty() {
        warn!(
            "No NNNNNNcoste.txt or NNNNNNventa.txt exports found in {}",
            config.input_dir.display()
        );
        return Ok(None);
    }

    for project in projects.iter().filter(|p| !p.is_complete()) {
        info!(
            "OT {} only has its {} export",
            project.report_id,
            project.sides_label()
        );
    }

    if show_listing {
        print_project_listing(&projects);
    }

    if !config.assume_yes {
        let proceed = prompt_confirmation(
            &format!("Process {} work orders?", projects.len()),
            false,
        )
        .map_err(|e| Error::processing_interrupted(format!("{:#}", e)))?;

        if !proceed {
            info!("Cancelled by user");
            return Ok(None);
        }
    }

    Ok(Some(projects))
}

fn read_side(path: Option<&Path>, encoding: SourceEncoding) -> Result<Vec<String>> {
    match path {
        Some(path) => read_report_lines(path, encoding),
        None => Ok(Vec::new()),
    }
}

/// Read both sides of one work order and parse them
pub fn parse_project(
    parser: &ReportParser,
    project: &ProjectFiles,
    encoding: SourceEncoding,
) -> Result<ParseResult> {
    let cost = read_side(project.cost.as_deref(), encoding)?;
    let sell = read_side(project.sell.as_deref(), encoding)?;

    parser.parse(&project.report_id, &cost, &sell)
}

/// Parse every project on blocking tasks, at most `max_concurrent_reports` at a time
///
/// Outcomes are returned in work order order whatever order they finished in.
pub async fn parse_projects(
    config: &Config,
    projects: Vec<ProjectFiles>,
    show_progress: bool,
) -> Result<Vec<(ProjectFiles, Result<ParseResult>)>> {
    let parser = Arc::new(ReportParser::new(config.parse_options())?);
    let encoding = config.encoding;

    let progress_bar = show_progress
        .then(|| create_progress_bar(projects.len() as u64, "Parsing reports..."));

    info!(
        "Parsing {} reports with up to {} concurrent tasks",
        projects.len(),
        config.max_concurrent_reports
    );

    let mut outcomes = stream::iter(projects)
        .map(|project| {
            let parser = Arc::clone(&parser);
            async move {
                let task_project = project.clone();
                let result =
                    task::spawn_blocking(move || parse_project(&parser, &task_project, encoding))
                        .await
                        .unwrap_or_else(|e| {
                            Err(Error::processing_interrupted(format!(
                                "Parsing task for OT {} failed: {}",
                                project.report_id, e
                            )))
                        });
                (project, result)
            }
        })
        .buffer_unordered(config.max_concurrent_reports)
        .inspect(|_| {
            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
        })
        .collect::<Vec<_>>()
        .await;

    if let Some(pb) = progress_bar {
        pb.finish_with_message("Parsing complete");
    }

    outcomes.sort_by(|a, b| a.0.report_id.cmp(&b.0.report_id));
    Ok(outcomes)
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print the coloured end-of-run summary
pub fn print_summary(title: &str, stats: &ProcessingStats) {
    println!("\n{}", title.bright_green().bold());
    println!(
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(stats.processing_time).to_string().bright_white()
    );
    println!(
        "  {} {} of {}",
        "Reports parsed:".bright_cyan(),
        stats.reports_parsed.to_string().bright_white(),
        stats.projects_found
    );
    if stats.reports_failed > 0 {
        println!(
            "  {} {}",
            "Reports failed:".bright_red(),
            stats.reports_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Material rows:".bright_cyan(),
        stats.materials_parsed.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Labor rows:".bright_cyan(),
        stats.labor_parsed.to_string().bright_white().bold()
    );
    if stats.rows_rejected > 0 {
        println!(
            "  {} {} ({} contradictory)",
            "Rows dropped:".bright_yellow(),
            stats.rows_rejected.to_string().bright_yellow(),
            stats.rows_contradictory
        );
    }
    if !stats.contradictory_reports.is_empty() {
        println!(
            "  {} {}",
            "Check cost/sell copies of:".bright_red(),
            stats.contradictory_reports.join(", ").bright_red().bold()
        );
    }

    if !stats.output_sizes.is_empty() {
        println!(
            "  {} {}",
            "Output size:".bright_cyan(),
            ProcessingStats::format_size(stats.total_output_size()).bright_white()
        );
        for (filename, size) in &stats.output_sizes {
            println!(
                "    {} {}",
                filename,
                ProcessingStats::format_size(*size).bright_black()
            );
        }
    }
    println!();
}
