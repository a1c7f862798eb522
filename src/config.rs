use crate::error::{MetricsError, Result};
use crate::types::config::EngineConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "ossmetrics.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".ossmetrics/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/ossmetrics/config.toml";

/// Layered engine configuration for a data directory.
///
/// Layers merge global, then repo (or `explicit`), then local. With no files
/// at all the built-in defaults apply.
pub fn load_config(data_dir: &Path, explicit: Option<&Path>) -> Result<EngineConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(data_dir, explicit, global.as_deref())
}

pub(crate) fn load_config_with_global(
    data_dir: &Path,
    explicit: Option<&Path>,
    global_path: Option<&Path>,
) -> Result<EngineConfig> {
    let repo_path = match explicit {
        Some(path) if !path.exists() => {
            return Err(MetricsError::PathNotFound(path.display().to_string()))
        }
        Some(path) => path.to_path_buf(),
        None => data_dir.join(DEFAULT_CONFIG_FILE),
    };

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &repo_path)?;
    merge_file_if_exists(&mut merged, &data_dir.join(DEFAULT_LOCAL_FILE))?;

    merged
        .try_into()
        .map_err(|e: toml::de::Error| MetricsError::ConfigParse(e.to_string()))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    debug!(path = %path.display(), "merging config layer");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| MetricsError::ConfigParse(format!("{}: {}", path.display(), e)))
}

/// Tables merge key by key; any other value in `overlay` replaces the base.
fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None, None).expect("load should not fail");
        assert!(cfg.weights.is_none());
        assert_eq!(cfg.scoring_weights(), Default::default());
    }

    #[test]
    fn layers_merge_global_repo_and_local_in_order() {
        let data = TempDir::new().expect("data temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[ecosystem]
dominant_min_projects = 5
rising_growth = 0.3

[languages]
tokio = "Rust"
"#,
        )
        .expect("global config should write");

        fs::write(
            data.path().join(DEFAULT_CONFIG_FILE),
            r#"
[ecosystem]
rising_growth = 0.25

[keywords]
stopwords = ["the"]
"#,
        )
        .expect("repo config should write");

        fs::create_dir_all(data.path().join(".ossmetrics")).expect("local dir should create");
        fs::write(
            data.path().join(DEFAULT_LOCAL_FILE),
            r#"
[ecosystem]
declining_growth = -0.2
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(data.path(), None, Some(&global_path))
            .expect("load should succeed");

        let rules = cfg.ecosystem_rules();
        assert_eq!(rules.dominant_min_projects, 5);
        assert_eq!(rules.rising_growth, 0.25);
        assert_eq!(rules.declining_growth, -0.2);
        assert_eq!(cfg.language_table().get("tokio").map(String::as_str), Some("Rust"));
        assert_eq!(cfg.stopwords().len(), 1);
    }

    #[test]
    fn explicit_file_replaces_repo_layer() {
        let data = TempDir::new().expect("data temp dir should be created");
        fs::write(
            data.path().join(DEFAULT_CONFIG_FILE),
            "[ecosystem]\nrising_growth = 0.9\n",
        )
        .expect("repo config should write");
        let explicit = data.path().join("custom.toml");
        fs::write(&explicit, "[ecosystem]\ndominant_min_projects = 7\n")
            .expect("explicit config should write");

        let cfg = load_config_with_global(data.path(), Some(&explicit), None)
            .expect("load should succeed");
        let rules = cfg.ecosystem_rules();
        assert_eq!(rules.dominant_min_projects, 7);
        assert_eq!(rules.rising_growth, 0.15);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let data = TempDir::new().expect("data temp dir should be created");
        let err = load_config_with_global(data.path(), Some(&data.path().join("nope.toml")), None)
            .expect_err("missing explicit config should fail");
        assert!(matches!(err, MetricsError::PathNotFound(_)));
    }

    #[test]
    fn malformed_layer_reports_its_path() {
        let data = TempDir::new().expect("data temp dir should be created");
        fs::write(data.path().join(DEFAULT_CONFIG_FILE), "[weights\nopenrank = ")
            .expect("repo config should write");
        let err = load_config_with_global(data.path(), None, None).expect_err("should fail");
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }
}
