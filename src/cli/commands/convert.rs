//! Convert command: one pair of output tables per work order

use std::time::Instant;
use tracing::{debug, error, info};

use super::shared::{
    ProcessingStats, build_config, is_critical_error, parse_projects, print_summary,
    select_projects, setup_logging,
};
use crate::Result;
use crate::app::services::report_writer::ReportWriter;
use crate::cli::args::SharedArgs;
use crate::config::Config;

/// Convert command runner
pub async fn run_convert(args: SharedArgs) -> Result<ProcessingStats> {
    setup_logging(&args)?;

    info!("Starting cost sheet conversion");
    debug!("Command line arguments: {:?}", args);

    let config = build_config(&args)?;
    let stats = convert(&config, args.show_progress()).await?;

    if args.show_progress() {
        print_summary("Conversion Summary", &stats);
    }
    Ok(stats)
}

/// Parse every work order in the input directory and write its tables
///
/// A work order that fails is logged and counted; the others still run.
pub async fn convert(config: &Config, show_progress: bool) -> Result<ProcessingStats> {
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
    let writer = ReportWriter::new(&config.output_dir, config.output_format);

    for (project, outcome) in parse_projects(config, projects, show_progress).await? {
        let written = outcome.and_then(|parsed| {
            stats.record_report(&parsed);
            writer.write_report(&parsed.report)
        });

        match written {
            Ok(tables) => {
                info!(
                    "OT {} written to {}",
                    project.report_id,
                    tables.materials.display()
                );
                stats.record_output(&tables);
            }
            Err(e) => {
                error!("Failed to convert OT {}: {}", project.report_id, e);
                stats.reports_failed += 1;

                if is_critical_error(&e) {
                    return Err(e);
                }
            }
        }
    }

    stats.processing_time = start_time.elapsed();
    Ok(stats)
}
