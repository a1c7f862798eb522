use crate::analyze::maturity::{classify_growth, classify_score, maturity_score, MaturityInput};
use crate::error::Result;
use crate::types::config::{GrowthThresholds, MaturityThresholds};
use crate::types::project::{metric, ProjectRecord};
use crate::types::report::{LanguageStats, LanguageTrend, ProjectRow};
use crate::types::series::{mean, month_bucket};
use std::collections::BTreeMap;
use tracing::debug;

/// Month-over-month growth values averaged into a language's growth rate.
pub const GROWTH_WINDOW: usize = 6;

pub fn language_stats(rows: &[ProjectRow], thresholds: &MaturityThresholds) -> Vec<LanguageStats> {
    let mut groups: BTreeMap<&str, Vec<&ProjectRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.language.as_str()).or_default().push(row);
    }

    let mut stats = groups
        .into_iter()
        .map(|(language, members)| {
            let avg_stars = average(&members, |row| row.stars.latest);
            let avg_influence_score = average(&members, |row| row.influence_score);
            let score = maturity_score(&MaturityInput {
                project_count: members.len(),
                avg_stars,
                avg_influence: avg_influence_score,
            });
            LanguageStats {
                language: language.to_string(),
                project_count: members.len(),
                avg_stars,
                avg_activity: average(&members, |row| row.activity.latest),
                avg_openrank: average(&members, |row| row.openrank.latest),
                avg_attention: average(&members, |row| row.attention.latest),
                avg_influence_score,
                maturity_score: score,
                stage: classify_score(score, thresholds),
            }
        })
        .collect::<Vec<_>>();

    stats.sort_by(|a, b| {
        b.project_count
            .cmp(&a.project_count)
            .then_with(|| a.language.cmp(&b.language))
    });
    stats
}

fn average(members: &[&ProjectRow], value: impl Fn(&ProjectRow) -> f64) -> f64 {
    mean(&members.iter().copied().map(value).collect::<Vec<_>>())
}

/// Per-language monthly activity trajectories, ordered by language name.
pub fn language_trends(
    projects: &[ProjectRecord],
    thresholds: &GrowthThresholds,
) -> Result<Vec<LanguageTrend>> {
    let mut groups: BTreeMap<&str, Vec<&ProjectRecord>> = BTreeMap::new();
    for project in projects {
        groups.entry(project.language.as_str()).or_default().push(project);
    }

    let mut trends = Vec::with_capacity(groups.len());
    for (language, members) in groups {
        let monthly = monthly_activity(&members)?;
        let growth_rate = recent_growth(&monthly);
        debug!(language, months = monthly.len(), growth_rate, "language trend");
        trends.push(LanguageTrend {
            language: language.to_string(),
            project_count: members.len(),
            total_stars: members
                .iter()
                .map(|project| project.series(metric::STARS).latest())
                .sum(),
            avg_activity: mean(&monthly),
            growth_rate,
            maturity_stage: classify_growth(growth_rate, thresholds),
        });
    }
    Ok(trends)
}

/// Mean activity per `YYYY-MM` bucket across projects, in month order.
fn monthly_activity(members: &[&ProjectRecord]) -> Result<Vec<f64>> {
    let mut buckets: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for project in members {
        let series = project.series(metric::ACTIVITY);
        series.validate_keys(metric::ACTIVITY)?;
        for (key, value) in series.iter() {
            if let Some(month) = month_bucket(key) {
                buckets.entry(month).or_default().push(value);
            }
        }
    }
    Ok(buckets.values().map(|values| mean(values)).collect())
}

/// Mean of the last [`GROWTH_WINDOW`] month-over-month changes; a zero month contributes 0.
pub fn recent_growth(monthly: &[f64]) -> f64 {
    let growth = monthly
        .windows(2)
        .map(|pair| {
            if pair[0] == 0.0 {
                0.0
            } else {
                (pair[1] - pair[0]) / pair[0]
            }
        })
        .collect::<Vec<_>>();
    let start = growth.len().saturating_sub(GROWTH_WINDOW);
    mean(&growth[start..])
}
