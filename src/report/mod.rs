pub mod export;
pub mod json;
pub mod md;

use crate::error::MetricsError;
use crate::types::report::AnalysisReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

/// Part of the report a command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    All,
    Projects { top: Option<usize> },
    Languages,
    Technologies,
    Keywords { emerging: bool },
}

pub fn render(
    report: &AnalysisReport,
    format: OutputFormat,
    section: Section,
) -> Result<String, MetricsError> {
    match format {
        OutputFormat::Json => json::to_json(report, section).map_err(MetricsError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report, section)),
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    use crate::analyze::analyze;
    use crate::types::config::EngineConfig;
    use crate::types::project::{metric, ProjectRecord};
    use crate::types::report::AnalysisReport;
    use crate::types::series::MetricSeries;

    fn monthly(base: f64, step: f64) -> MetricSeries {
        (0..12)
            .map(|i| (format!("2023-{:02}", i + 1), base + step * i as f64))
            .collect()
    }

    pub fn report() -> AnalysisReport {
        let mut kube = ProjectRecord::new("kubernetes", "kubernetes")
            .with_language("Go")
            .with_metric(metric::OPENRANK, monthly(9.0, 0.05))
            .with_metric(metric::ACTIVITY, monthly(800.0, 10.0))
            .with_metric(metric::STARS, monthly(100_000.0, 500.0));
        kube.description = Some("container orchestration".to_string());
        let projects = vec![
            kube,
            ProjectRecord::new("rust-lang", "rust")
                .with_language("Rust")
                .with_metric(metric::OPENRANK, monthly(7.0, 0.0)),
            ProjectRecord::new("someone", "dotfiles"),
        ];
        analyze(&projects, &EngineConfig::default()).expect("fixture analysis should succeed")
    }
}
