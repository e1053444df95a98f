//! Discovery of cost/sell export pairs in an input directory
//!
//! Exports are named after their work order: `240117coste.txt` holds the
//! cost copy and `240117venta.txt` the sell copy of OT 240117. Either copy
//! may be missing; other files in the directory are ignored.

use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::{COST_FILE_SUFFIX, EXPORT_FILE_NAME_PATTERN, SELL_FILE_SUFFIX};
use crate::{Error, Result};

/// The export files of one work order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFiles {
    /// Six-digit work order (OT) number
    pub report_id: String,
    pub cost: Option<PathBuf>,
    pub sell: Option<PathBuf>,
}

impl ProjectFiles {
    pub fn new(report_id: impl Into<String>) -> Self {
        Self {
            report_id: report_id.into(),
            cost: None,
            sell: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.cost.is_some() && self.sell.is_some()
    }

    /// Short label of the sides present, for listings
    pub fn sides_label(&self) -> &'static str {
        match (&self.cost, &self.sell) {
            (Some(_), Some(_)) => "coste + venta",
            (Some(_), None) => "coste",
            (None, Some(_)) => "venta",
            (None, None) => "-",
        }
    }
}

/// Find and pair all exports in `dir`, sorted by work order
pub fn discover_projects(dir: &Path) -> Result<Vec<ProjectFiles>> {
    if !dir.is_dir() {
        return Err(Error::discovery(format!(
            "Input directory {} does not exist",
            dir.display()
        )));
    }

    let name_pattern = Regex::new(EXPORT_FILE_NAME_PATTERN)
        .map_err(|e| Error::discovery(format!("Invalid export name pattern: {}", e)))?;

    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{}/*.txt", escaped_dir);

    let mut projects: BTreeMap<String, ProjectFiles> = BTreeMap::new();

    for entry in glob::glob(&pattern)? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                continue;
            }
        };

        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let Some(captures) = name_pattern.captures(file_name) else {
            debug!("Ignoring {}", path.display());
            continue;
        };

        let report_id = captures[1].to_string();
        let side = &captures[2];
        let project = projects
            .entry(report_id.clone())
            .or_insert_with(|| ProjectFiles::new(report_id));

        if side == COST_FILE_SUFFIX {
            project.cost = Some(path);
        } else if side == SELL_FILE_SUFFIX {
            project.sell = Some(path);
        }
    }

    let projects: Vec<ProjectFiles> = projects.into_values().collect();
    debug!(
        "Discovered {} projects in {}",
        projects.len(),
        dir.display()
    );

    Ok(projects)
}
