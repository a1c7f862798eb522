pub mod composite;
pub mod ecosystem;
pub mod keywords;
pub mod language;
pub mod maturity;
pub mod projects;
pub mod trend;

use crate::error::Result;
use crate::types::config::EngineConfig;
use crate::types::project::ProjectRecord;
use crate::types::report::AnalysisReport;
use chrono::Utc;
use rayon::prelude::*;
use tracing::info;

/// Runs every analysis over the loaded projects.
///
/// `config` is expected to have passed [`EngineConfig::validate`].
pub fn analyze(projects: &[ProjectRecord], config: &EngineConfig) -> Result<AnalysisReport> {
    let weights = config.scoring_weights();
    let rows = projects
        .par_iter()
        .map(|project| projects::project_row(project, &weights))
        .collect::<Result<Vec<_>>>()?;
    let rows = projects::rank_projects(rows);
    info!(projects = rows.len(), "scored projects");

    let languages = language::language_stats(&rows, &config.maturity_thresholds());
    let growth = config.growth_thresholds();
    let language_trends = language::language_trends(projects, &growth)?;

    let rules = config.technology_rules();
    let profiles = maturity::technology_profiles(rules.keys().map(String::as_str), &rows);
    let technologies = maturity::classify_technologies(profiles, &rules);
    info!(
        technologies = technologies.len(),
        rules = rules.len(),
        "classified technologies"
    );

    let stopwords = config.stopwords();
    let tech_keywords = config.tech_keywords();
    let keywords = keywords::KeywordWeighter::new(&stopwords, &tech_keywords)
        .score(&keywords::documents(projects));
    let emerging_keywords = keywords::emerging_keywords(&keywords);

    let ecosystem = ecosystem::analyze_ecosystem(&language_trends, &config.ecosystem_rules());
    let recommendations = ecosystem::recommendations(&language_trends, &growth);

    Ok(AnalysisReport {
        generated_at: Utc::now().to_rfc3339(),
        summary: projects::dashboard_summary(&rows),
        projects: rows,
        languages,
        language_trends,
        technologies,
        keywords,
        emerging_keywords,
        ecosystem,
        recommendations,
    })
}
