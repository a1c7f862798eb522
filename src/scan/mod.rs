pub mod filesystem;

use crate::error::{MetricsError, Result};
use crate::types::config::language_for;
use crate::types::project::ProjectRecord;
use crate::types::series::{is_rollup_key, MetricSeries};
use filesystem::{file_stem, list_metric_files, owner_and_repo};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Per-repository file carrying metadata rather than a metric.
pub const META_FILE_STEM: &str = "meta";

#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub projects: Vec<ProjectRecord>,
    pub skipped_files: usize,
}

/// Loads every `<org>/<repo>/<metric>.json` under `data_dir`.
///
/// Files that cannot be read or parsed are logged and counted in
/// `skipped_files`; with `strict` the first such file aborts the load.
pub fn load_projects(
    data_dir: &Path,
    languages: &HashMap<String, String>,
    strict: bool,
) -> Result<LoadOutcome> {
    if !data_dir.is_dir() {
        return Err(MetricsError::PathNotFound(data_dir.display().to_string()));
    }

    let mut grouped: BTreeMap<(String, String), Vec<PathBuf>> = BTreeMap::new();
    for path in list_metric_files(data_dir) {
        if let Some(key) = owner_and_repo(&path) {
            grouped.entry(key).or_default().push(path);
        }
    }

    let mut outcome = LoadOutcome::default();
    for ((org, repo), files) in grouped {
        let language = language_for(languages, &repo);
        let mut project = ProjectRecord::new(org, repo).with_language(language);

        for path in files {
            let Some(stem) = file_stem(&path) else {
                continue;
            };
            let parsed = std::fs::read_to_string(&path)
                .map_err(MetricsError::from)
                .and_then(|content| parse_json(&path, &content));
            let value = match parsed {
                Ok(value) => value,
                Err(err) if strict => return Err(err),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping metric file");
                    outcome.skipped_files += 1;
                    continue;
                }
            };

            if stem == META_FILE_STEM {
                project.description = description(&value);
                continue;
            }
            match series_from_value(&path, &value) {
                Ok(series) => {
                    debug!(project = %project.full_name, metric = stem, points = series.len(), "loaded series");
                    project.metrics.insert(stem.to_string(), series);
                }
                Err(err) if strict => return Err(err),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping metric file");
                    outcome.skipped_files += 1;
                }
            }
        }
        outcome.projects.push(project);
    }

    info!(
        projects = outcome.projects.len(),
        skipped = outcome.skipped_files,
        data_dir = %data_dir.display(),
        "loaded metric data"
    );
    Ok(outcome)
}

fn parse_json(path: &Path, content: &str) -> Result<Value> {
    serde_json::from_str(content).map_err(|e| MetricsError::MetricFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Date-keyed numbers from a metric document.
///
/// Duration metrics publish an object with an `avg` map; that map is used.
/// Roll-up keys and non-numeric values are dropped.
pub fn series_from_value(path: &Path, value: &Value) -> Result<MetricSeries> {
    let object = match value {
        Value::Object(map) => match map.get("avg") {
            Some(Value::Object(avg)) => avg,
            _ => map,
        },
        _ => {
            return Err(MetricsError::MetricFile {
                path: path.display().to_string(),
                reason: "expected a JSON object keyed by date".to_string(),
            })
        }
    };

    Ok(object
        .iter()
        .filter(|(key, _)| !is_rollup_key(key))
        .filter_map(|(key, value)| value.as_f64().map(|number| (key.as_str(), number)))
        .collect())
}

fn description(value: &Value) -> Option<String> {
    value
        .get("description")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::project::{metric, UNKNOWN_LANGUAGE};
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("dir should be created");
        fs::write(path, content).expect("file should write");
    }

    fn languages() -> HashMap<String, String> {
        HashMap::from([("tokio".to_string(), "Rust".to_string())])
    }

    #[test]
    fn loads_projects_series_and_metadata() {
        let dir = TempDir::new().expect("temp dir should be created");
        write(
            dir.path(),
            "tokio-rs/tokio/stars.json",
            r#"{"2022": 10, "2022Q4": 10, "2023-01": 1, "2023-02": 2, "2023-02-raw": 9}"#,
        );
        write(
            dir.path(),
            "tokio-rs/tokio/issue_age.json",
            r#"{"avg": {"2023-01": 12.5}, "levels": {"2023-01": [1, 2]}}"#,
        );
        write(dir.path(), "tokio-rs/tokio/meta.json", r#"{"description": " async runtime "}"#);
        write(dir.path(), "acme/widgets/activity.json", r#"{"2023-01": 4.0, "2023-02": null}"#);

        let outcome = load_projects(dir.path(), &languages(), false).expect("load should succeed");
        assert_eq!(outcome.skipped_files, 0);
        assert_eq!(outcome.projects.len(), 2);

        let widgets = &outcome.projects[0];
        assert_eq!(widgets.full_name, "acme/widgets");
        assert_eq!(widgets.language, UNKNOWN_LANGUAGE);
        assert_eq!(widgets.series(metric::ACTIVITY).len(), 1);

        let tokio = &outcome.projects[1];
        assert_eq!(tokio.language, "Rust");
        assert_eq!(tokio.description.as_deref(), Some("async runtime"));
        assert_eq!(tokio.metrics[metric::STARS].len(), 3);
        assert_eq!(tokio.series(metric::STARS).values(), vec![1.0, 2.0]);
        assert_eq!(tokio.series(metric::ISSUE_AGE).latest(), 12.5);
    }

    #[test]
    fn malformed_files_are_skipped_unless_strict() {
        let dir = TempDir::new().expect("temp dir should be created");
        write(dir.path(), "org/repo/stars.json", "{not json");
        write(dir.path(), "org/repo/activity.json", "[1, 2, 3]");
        write(dir.path(), "org/repo/openrank.json", r#"{"2023-01": 3.5}"#);

        let outcome = load_projects(dir.path(), &HashMap::new(), false).expect("lenient load");
        assert_eq!(outcome.skipped_files, 2);
        assert_eq!(outcome.projects[0].metrics.len(), 1);

        let err = load_projects(dir.path(), &HashMap::new(), true).expect_err("strict load fails");
        assert!(matches!(err, MetricsError::MetricFile { .. }));
    }

    #[test]
    fn missing_data_dir_is_reported() {
        let dir = TempDir::new().expect("temp dir should be created");
        let err = load_projects(&dir.path().join("absent"), &HashMap::new(), false)
            .expect_err("missing dir should fail");
        assert!(matches!(err, MetricsError::PathNotFound(_)));
    }

    #[test]
    fn dot_directories_do_not_become_projects() {
        let dir = TempDir::new().expect("temp dir should be created");
        write(dir.path(), ".cache/x/stars.json", r#"{"2023-01": 1}"#);
        write(dir.path(), "org/repo/stars.json", r#"{"2023-01": 2}"#);

        let outcome = load_projects(dir.path(), &HashMap::new(), false).expect("load");
        let names: Vec<&str> = outcome
            .projects
            .iter()
            .map(|project| project.full_name.as_str())
            .collect();
        assert_eq!(names, vec!["org/repo"]);
    }

    #[test]
    fn empty_data_dir_loads_nothing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let outcome = load_projects(dir.path(), &HashMap::new(), false).expect("load");
        assert!(outcome.projects.is_empty());
    }
}
