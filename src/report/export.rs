use crate::error::{MetricsError, Result};
use crate::types::report::AnalysisReport;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_FILE: &str = "report.json";

/// Writes the full report as pretty JSON into `out_dir`, creating it if needed.
pub fn write_report(out_dir: &Path, report: &AnalysisReport) -> Result<PathBuf> {
    fs::create_dir_all(out_dir).map_err(MetricsError::Io)?;
    let out_path = out_dir.join(REPORT_FILE);
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&out_path, json).map_err(MetricsError::Io)?;
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixture;
    use tempfile::TempDir;

    #[test]
    fn write_report_creates_directory_and_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let out = dir.path().join("nested/out");
        let path = write_report(&out, &fixture::report()).expect("export should succeed");

        assert_eq!(path, out.join(REPORT_FILE));
        let content = fs::read_to_string(&path).expect("report should be readable");
        let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
        assert_eq!(value["summary"]["total_projects"], 3);
    }
}
