use crate::analyze::composite::score_project;
use crate::analyze::trend::trend;
use crate::error::Result;
use crate::types::project::{metric, ProjectRecord, UNKNOWN_LANGUAGE};
use crate::types::report::{
    CommunityHealth, DashboardSummary, Direction, GrowthPotential, MarketPosition, MetricSummary,
    ProjectRow, Tier,
};
use crate::types::scoring::{Score, ScoringWeights};
use crate::types::series::mean;
use std::cmp::Ordering;
use std::collections::BTreeMap;

const INFLUENCE_TREND_BAND: f64 = 0.05;
const HIGH_IMPACT_INFLUENCE: Score = 7.0;

pub fn summarize(project: &ProjectRecord, name: &str) -> Result<MetricSummary> {
    let series = project.series(name);
    Ok(MetricSummary {
        latest: series.latest(),
        avg: series.mean(),
        trend: trend(name, &series)?,
        total: series.sum(),
    })
}

/// Unranked table row; `rank` stays 0 until [`rank_projects`] runs.
pub fn project_row(project: &ProjectRecord, weights: &ScoringWeights) -> Result<ProjectRow> {
    let stars = summarize(project, metric::STARS)?;
    let activity = summarize(project, metric::ACTIVITY)?;
    let openrank = summarize(project, metric::OPENRANK)?;
    let attention = summarize(project, metric::ATTENTION)?;
    let bus_factor = summarize(project, metric::BUS_FACTOR)?;

    let avg_issue_age = project.series(metric::ISSUE_AGE).mean();
    let new_contributors = project.series(metric::NEW_CONTRIBUTORS);
    let scores = score_project(project, weights)?;
    let influence_score = scores.overall;

    Ok(ProjectRow {
        rank: 0,
        repo_name: project.full_name.clone(),
        org: project.org.clone(),
        repo: project.repo.clone(),
        language: project.language.clone(),
        avg_issue_age,
        latest_participants: project.series(metric::PARTICIPANTS).latest(),
        new_contributors_trend: trend(metric::NEW_CONTRIBUTORS, &new_contributors)?,
        code_churn_ratio: code_churn_ratio(project),
        influence_tier: tier(influence_score),
        influence_trend: direction(openrank.trend),
        community_health: community_health(bus_factor.latest, avg_issue_age),
        growth_potential: growth_potential(stars.trend, openrank.trend),
        market_position: market_position(influence_score),
        influence_score,
        scores,
        stars,
        activity,
        openrank,
        attention,
        bus_factor,
    })
}

/// Sorts by influence (highest first, name breaks ties) and assigns 1-based ranks.
pub fn rank_projects(mut rows: Vec<ProjectRow>) -> Vec<ProjectRow> {
    rows.sort_by(|a, b| {
        b.influence_score
            .partial_cmp(&a.influence_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.repo_name.cmp(&b.repo_name))
    });
    for (index, row) in rows.iter_mut().enumerate() {
        row.rank = index + 1;
    }
    rows
}

pub fn code_churn_ratio(project: &ProjectRecord) -> f64 {
    let added = project.series(metric::CODE_CHANGE_LINES_ADD).last();
    let removed = project.series(metric::CODE_CHANGE_LINES_REMOVE).last();
    match (added, removed) {
        (Some(added), Some(removed)) => removed / added.max(1.0),
        _ => 0.0,
    }
}

pub fn tier(score: Score) -> Tier {
    if score >= 8.0 {
        Tier::S
    } else if score >= 6.0 {
        Tier::A
    } else if score >= 4.0 {
        Tier::B
    } else if score >= 2.0 {
        Tier::C
    } else {
        Tier::D
    }
}

pub fn direction(trend: f64) -> Direction {
    if trend > INFLUENCE_TREND_BAND {
        Direction::Rising
    } else if trend < -INFLUENCE_TREND_BAND {
        Direction::Declining
    } else {
        Direction::Stable
    }
}

pub fn community_health(bus_factor: f64, issue_age: f64) -> CommunityHealth {
    if bus_factor > 50.0 && issue_age < 30.0 {
        CommunityHealth::Excellent
    } else if bus_factor > 20.0 && issue_age < 60.0 {
        CommunityHealth::Good
    } else if bus_factor > 10.0 {
        CommunityHealth::Fair
    } else {
        CommunityHealth::Poor
    }
}

pub fn growth_potential(stars_trend: f64, openrank_trend: f64) -> GrowthPotential {
    if stars_trend > 0.1 && openrank_trend > 0.1 {
        GrowthPotential::High
    } else if stars_trend > 0.05 || openrank_trend > 0.05 {
        GrowthPotential::Medium
    } else {
        GrowthPotential::Low
    }
}

pub fn market_position(score: Score) -> MarketPosition {
    if score >= 8.0 {
        MarketPosition::Leader
    } else if score >= 6.0 {
        MarketPosition::Challenger
    } else if score >= 4.0 {
        MarketPosition::Follower
    } else {
        MarketPosition::Niche
    }
}

pub fn dashboard_summary(rows: &[ProjectRow]) -> DashboardSummary {
    if rows.is_empty() {
        return DashboardSummary::default();
    }
    let total = rows.len() as f64;

    let mut language_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        *language_counts.entry(row.language.as_str()).or_insert(0) += 1;
    }
    // ties go to the alphabetically first language
    let top = language_counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(language, count)| (language.to_string(), *count));

    let positive = rows.iter().filter(|row| row.stars.trend > 0.0).count() as f64;
    let negative = rows.iter().filter(|row| row.stars.trend < 0.0).count() as f64;

    DashboardSummary {
        total_projects: rows.len(),
        total_stars: rows.iter().map(|row| row.stars.latest).sum(),
        avg_influence_score: mean_of(rows, |row| row.influence_score),
        top_language_count: top.as_ref().map(|(_, count)| *count).unwrap_or(0),
        top_language: top.map(|(language, _)| language),
        positive_trend_ratio: positive / total * 100.0,
        negative_trend_ratio: negative / total * 100.0,
        high_impact_projects: rows
            .iter()
            .filter(|row| row.influence_score > HIGH_IMPACT_INFLUENCE)
            .count(),
        unknown_language_projects: rows
            .iter()
            .filter(|row| row.language == UNKNOWN_LANGUAGE)
            .count(),
        avg_bus_factor: mean_of(rows, |row| row.bus_factor.latest),
        activity_growth_rate: mean_of(rows, |row| row.activity.trend),
        star_growth_rate: mean_of(rows, |row| row.stars.trend),
    }
}

fn mean_of(rows: &[ProjectRow], value: impl Fn(&ProjectRow) -> f64) -> f64 {
    mean(&rows.iter().map(value).collect::<Vec<_>>())
}
