use crate::types::series::MetricSeries;
use std::collections::BTreeMap;

pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Metric names as published per repository.
pub mod metric {
    pub const STARS: &str = "stars";
    pub const ACTIVITY: &str = "activity";
    pub const OPENRANK: &str = "openrank";
    pub const ATTENTION: &str = "attention";
    pub const BUS_FACTOR: &str = "bus_factor";
    pub const ISSUE_AGE: &str = "issue_age";
    pub const ISSUE_RESOLUTION_DURATION: &str = "issue_resolution_duration";
    pub const PARTICIPANTS: &str = "participants";
    pub const NEW_CONTRIBUTORS: &str = "new_contributors";
    pub const CODE_CHANGE_LINES_ADD: &str = "code_change_lines_add";
    pub const CODE_CHANGE_LINES_REMOVE: &str = "code_change_lines_remove";
    pub const CODE_CHANGE_LINES_SUM: &str = "code_change_lines_sum";
}

#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub org: String,
    pub repo: String,
    pub full_name: String,
    pub language: String,
    pub description: Option<String>,
    pub metrics: BTreeMap<String, MetricSeries>,
}

impl ProjectRecord {
    pub fn new(org: impl Into<String>, repo: impl Into<String>) -> Self {
        let org = org.into();
        let repo = repo.into();
        Self {
            full_name: format!("{org}/{repo}"),
            org,
            repo,
            language: UNKNOWN_LANGUAGE.to_string(),
            description: None,
            metrics: BTreeMap::new(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[cfg(test)]
    pub fn with_metric(mut self, name: impl Into<String>, series: MetricSeries) -> Self {
        self.metrics.insert(name.into(), series);
        self
    }

    /// Cleaned series for `name`; empty when the metric was never loaded.
    pub fn series(&self, name: &str) -> MetricSeries {
        self.metrics
            .get(name)
            .map(MetricSeries::clean)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_builds_canonical_name_and_unknown_language() {
        let project = ProjectRecord::new("apache", "spark");
        assert_eq!(project.full_name, "apache/spark");
        assert_eq!(project.language, UNKNOWN_LANGUAGE);
    }

    #[test]
    fn series_is_cleaned_and_missing_metrics_are_empty() {
        let project = ProjectRecord::new("a", "b").with_metric(
            metric::STARS,
            [("2023-01", 1.0), ("2023-01-raw", 5.0)].into_iter().collect(),
        );
        assert_eq!(project.series(metric::STARS).len(), 1);
        assert!(project.series(metric::OPENRANK).is_empty());
    }
}
