//! Merge command: all work orders concatenated into one pair of tables

use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::shared::{
    ProcessingStats, build_config, is_critical_error, parse_projects, print_summary,
    select_projects, setup_logging,
};
use crate::Result;
use crate::app::services::report_writer::ReportWriter;
use crate::cli::args::SharedArgs;
use crate::config::Config;

/// Merge command runner
pub async fn run_merge(args: SharedArgs) -> Result<ProcessingStats> {
    setup_logging(&args)?;

    info!("Starting cost sheet merge");
    debug!("Command line arguments: {:?}", args);

    let config = build_config(&args)?;
    let stats = merge(&config, args.show_progress()).await?;

    if args.show_progress() {
        print_summary("Merge Summary", &stats);
    }
    Ok(stats)
}

/// Parse every work order and write the accepted rows of all of them together
pub async fn merge(config: &Config, show_progress: bool) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    let Some(projects) = select_projects(config, show_progress)? else {
        return Ok(ProcessingStats {
            processing_time: start_time.elapsed(),
            ..Default::default()
        });
    };

    let mut stats = ProcessingStats {
        projects_found: projects.len(),
        ..Default::default()
    };
    let mut reports = Vec::with_capacity(projects.len());

    for (project, outcome) in parse_projects(config, projects, show_progress).await? {
        match outcome {
            Ok(parsed) => {
                stats.record_report(&parsed);
                reports.push(parsed.report);
            }
            Err(e) => {
                error!("Failed to parse OT {}: {}", project.report_id, e);
                stats.reports_failed += 1;

                if is_critical_error(&e) {
                    return Err(e);
                }
            }
        }
    }

    if reports.is_empty() {
        warn!("No report could be parsed, nothing to merge");
    } else {
        let writer = ReportWriter::new(&config.output_dir, config.output_format);
        let tables = writer.write_merged(&reports)?;
        stats.record_output(&tables);
    }

    stats.processing_time = start_time.elapsed();
    Ok(stats)
}
