//! Report egress - writes the route report as pretty JSON

use crate::domain::RouteReport;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Writer for route reports
pub struct ReportWriter {
    file_path: String,
}

impl ReportWriter {
    pub fn new(file_path: &str) -> Self {
        Self { file_path: file_path.to_string() }
    }

    /// Write the report, replacing any previous file at the same path
    pub fn write(&self, report: &RouteReport) -> anyhow::Result<()> {
        let path = Path::new(&self.file_path);

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let json = report.to_json().context("Failed to serialize report")?;
        fs::write(path, &json).with_context(|| format!("Failed to write report {}", path.display()))?;
        debug!(file = %self.file_path, bytes = %json.len(), "report_written");

        info!(
            file = %self.file_path,
            run_id = %report.run_id,
            groups = %report.groups.len(),
            houses = %report.summary.total_houses,
            "report_egressed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Aggregation, Summary};
    use tempfile::tempdir;

    #[test]
    fn test_write_report_creates_parents() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("out").join("report.json");
        let writer = ReportWriter::new(file_path.to_str().unwrap());

        let summary = Summary { total_candidates: 3, not_found: 3, ..Default::default() };
        let report = RouteReport::new(Aggregation { groups: Vec::new(), summary }, Vec::new());
        writer.write(&report).unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["summary"]["totalCandidates"], 3);
        assert_eq!(parsed["summary"]["notFound"], 3);
        assert_eq!(parsed["runId"], report.run_id);
    }
}
