use crate::types::config::{GrowthThresholds, MaturityThresholds, TechnologyRule};
use crate::types::report::{ProjectRow, TechnologyRow};
use crate::types::series::mean;
use crate::types::scoring::{MaturityStage, RiskLevel};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaturityInput {
    pub project_count: usize,
    pub avg_stars: f64,
    pub avg_influence: f64,
}

/// Aggregate evidence about a named technology, gathered from related projects.
#[derive(Debug, Clone, PartialEq)]
pub struct TechnologyProfile {
    pub name: String,
    pub community_size: usize,
    pub avg_stars: f64,
    pub avg_activity: f64,
    pub avg_influence: f64,
}

pub fn maturity_score(input: &MaturityInput) -> f64 {
    0.3 * ratio(input.project_count as f64, 10.0)
        + 0.4 * ratio(input.avg_stars, 100_000.0)
        + 0.3 * ratio(input.avg_influence, 10.0)
}

/// Below the `emerging` cut-off still reports emerging; there is no lower band.
pub fn classify_score(score: f64, thresholds: &MaturityThresholds) -> MaturityStage {
    if score >= thresholds.mature {
        MaturityStage::Mature
    } else if score >= thresholds.growing {
        MaturityStage::Growing
    } else {
        MaturityStage::Emerging
    }
}

pub fn classify_growth(growth_rate: f64, thresholds: &GrowthThresholds) -> MaturityStage {
    if growth_rate > thresholds.emerging {
        MaturityStage::Emerging
    } else if growth_rate > thresholds.growing {
        MaturityStage::Growing
    } else if growth_rate > thresholds.mature {
        MaturityStage::Mature
    } else {
        MaturityStage::Declining
    }
}

/// Rule-table classification. Profiles without a rule are dropped.
pub fn classify_technologies(
    profiles: Vec<TechnologyProfile>,
    rules: &BTreeMap<String, TechnologyRule>,
) -> Vec<TechnologyRow> {
    profiles
        .into_iter()
        .filter_map(|profile| match rules.get(&profile.name) {
            Some(rule) => Some((profile, rule)),
            None => {
                debug!(technology = %profile.name, "no maturity rule, skipping");
                None
            }
        })
        .map(|(profile, rule)| technology_row(profile, rule))
        .collect()
}

fn technology_row(profile: TechnologyProfile, rule: &TechnologyRule) -> TechnologyRow {
    TechnologyRow {
        category: rule.category.clone().unwrap_or_else(|| "Other".to_string()),
        maturity_stage: rule.stage,
        risk_level: rule.risk_level,
        growth_rate: rule.growth_rate,
        adoption_rate: round3(profile.avg_activity / 1000.0),
        community_size: profile.community_size,
        avg_project_stars: profile.avg_stars,
        avg_influence_score: profile.avg_influence,
        recommendation: recommendation(rule.stage, rule.risk_level).to_string(),
        prediction_6m: if rule.growth_rate > 0.15 && rule.risk_level == RiskLevel::Low {
            "adopt"
        } else {
            "monitor"
        }
        .to_string(),
        prediction_12m: if rule.stage == MaturityStage::Emerging && rule.growth_rate > 0.3 {
            "critical"
        } else {
            "stable"
        }
        .to_string(),
        technology: profile.name,
    }
}

pub fn recommendation(stage: MaturityStage, risk: RiskLevel) -> &'static str {
    match (stage, risk) {
        (MaturityStage::Emerging, RiskLevel::High) => "careful_adoption",
        (MaturityStage::Emerging, RiskLevel::Medium) => "pilot_project",
        (MaturityStage::Growing, RiskLevel::Low) => "recommended",
        (MaturityStage::Mature, _) => "safe_choice",
        _ => "monitor",
    }
}

/// Evidence for each named technology from the projects that mention it.
///
/// A project relates to a technology when its repository name contains the
/// name (case-insensitive); failing any such match, projects written in a
/// language of that name are used. Technologies with no related project are
/// skipped.
pub fn technology_profiles<'a>(
    names: impl IntoIterator<Item = &'a str>,
    rows: &[ProjectRow],
) -> Vec<TechnologyProfile> {
    names
        .into_iter()
        .filter_map(|name| {
            let needle = name.to_lowercase();
            let mut related = rows
                .iter()
                .filter(|row| row.repo_name.to_lowercase().contains(&needle))
                .collect::<Vec<_>>();
            if related.is_empty() {
                related = rows
                    .iter()
                    .filter(|row| row.language.eq_ignore_ascii_case(name))
                    .collect();
            }
            if related.is_empty() {
                debug!(technology = name, "no related projects, skipping");
                return None;
            }
            let average = |value: fn(&ProjectRow) -> f64| {
                mean(&related.iter().map(|row| value(row)).collect::<Vec<_>>())
            };
            Some(TechnologyProfile {
                name: name.to_string(),
                community_size: related.len(),
                avg_stars: average(stars_of),
                avg_activity: average(activity_of),
                avg_influence: average(influence_of),
            })
        })
        .collect()
}

fn stars_of(row: &ProjectRow) -> f64 {
    row.stars.latest
}

fn activity_of(row: &ProjectRow) -> f64 {
    row.activity.latest
}

fn influence_of(row: &ProjectRow) -> f64 {
    row.influence_score
}

fn ratio(value: f64, scale: f64) -> f64 {
    (value / scale).clamp(0.0, 1.0)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
