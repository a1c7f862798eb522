use crate::analyze::trend::trend;
use crate::error::Result;
use crate::types::project::{metric, ProjectRecord};
use crate::types::scoring::{ScoreCard, ScoringWeights};

pub const OPENRANK_SCALE: f64 = 10.0;
pub const ACTIVITY_SCALE: f64 = 1000.0;
pub const ATTENTION_SCALE: f64 = 1000.0;
pub const BUS_FACTOR_SCALE: f64 = 50.0;
pub const STARS_TREND_CAP: f64 = 2.0;
pub const CODE_CHANGE_SCALE: f64 = 10000.0;
/// Issue resolution (days) at or beyond which health bottoms out.
pub const RESOLUTION_DAYS_CAP: f64 = 30.0;
pub const NEUTRAL_CODE_HEALTH: f64 = 0.5;

/// Weighted influence score card for one project.
///
/// A missing metric scores zero in its slot rather than being dropped from
/// the weighting, so sparse projects rank below complete ones.
pub fn score_project(project: &ProjectRecord, weights: &ScoringWeights) -> Result<ScoreCard> {
    let openrank = normalized(project.series(metric::OPENRANK).latest(), OPENRANK_SCALE);
    let activity = normalized(project.series(metric::ACTIVITY).latest(), ACTIVITY_SCALE);
    let attention = normalized(project.series(metric::ATTENTION).latest(), ATTENTION_SCALE);
    let bus_factor = normalized(project.series(metric::BUS_FACTOR).latest(), BUS_FACTOR_SCALE);

    let stars_trend = trend(metric::STARS, &project.series(metric::STARS))?
        .clamp(0.0, STARS_TREND_CAP)
        / STARS_TREND_CAP;

    Ok(ScoreCard::new(
        openrank,
        activity,
        attention,
        bus_factor,
        stars_trend,
        code_health(project),
    )
    .finalize(weights))
}

/// Zero when neither input exists; the neutral start only applies once one does.
pub fn code_health(project: &ProjectRecord) -> f64 {
    let resolution = project.series(metric::ISSUE_RESOLUTION_DURATION);
    let volume = project.series(metric::CODE_CHANGE_LINES_SUM).last();
    if resolution.is_empty() && volume.is_none() {
        return 0.0;
    }

    let mut health = NEUTRAL_CODE_HEALTH;
    if !resolution.is_empty() {
        health = ((RESOLUTION_DAYS_CAP - resolution.mean()) / RESOLUTION_DAYS_CAP).clamp(0.0, 1.0);
    }
    if let Some(volume) = volume {
        health = (health + normalized(volume, CODE_CHANGE_SCALE)) / 2.0;
    }

    health
}

fn normalized(value: f64, scale: f64) -> f64 {
    if scale <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / scale).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scoring::MAX_INFLUENCE;
    use crate::types::series::MetricSeries;
    use proptest::prelude::*;

    fn single(value: f64) -> MetricSeries {
        [("2023-12", value)].into_iter().collect()
    }

    fn doubling_stars() -> MetricSeries {
        (1..=12)
            .map(|month| {
                let value = if month <= 6 { 100.0 } else { 300.0 };
                (format!("2023-{month:02}"), value)
            })
            .collect()
    }

    fn maximal_project() -> ProjectRecord {
        ProjectRecord::new("org", "repo")
            .with_metric(metric::OPENRANK, single(10.0))
            .with_metric(metric::ACTIVITY, single(1000.0))
            .with_metric(metric::ATTENTION, single(1000.0))
            .with_metric(metric::BUS_FACTOR, single(50.0))
            .with_metric(metric::STARS, doubling_stars())
            .with_metric(metric::ISSUE_RESOLUTION_DURATION, single(0.0))
            .with_metric(metric::CODE_CHANGE_LINES_SUM, single(10000.0))
    }

    #[test]
    fn maximal_project_scores_ten() {
        let card = score_project(&maximal_project(), &ScoringWeights::default())
            .expect("scoring should succeed");
        assert_eq!(card.stars_trend, 1.0);
        assert_eq!(card.code_health, 1.0);
        assert!((card.overall - MAX_INFLUENCE).abs() < 1e-9);
    }

    #[test]
    fn project_without_metrics_scores_zero() {
        let card = score_project(&ProjectRecord::new("org", "empty"), &ScoringWeights::default())
            .expect("scoring should succeed");
        assert_eq!(card.openrank, 0.0);
        assert_eq!(card.stars_trend, 0.0);
        assert_eq!(card.code_health, 0.0);
        assert_eq!(card.overall, 0.0);
    }

    #[test]
    fn all_zero_metrics_score_zero() {
        let project = ProjectRecord::new("org", "zero")
            .with_metric(metric::ISSUE_RESOLUTION_DURATION, single(45.0))
            .with_metric(metric::CODE_CHANGE_LINES_SUM, single(0.0));
        let card = score_project(&project, &ScoringWeights::default())
            .expect("scoring should succeed");
        assert_eq!(card.overall, 0.0);
    }

    #[test]
    fn slow_issue_resolution_lowers_code_health() {
        let project = ProjectRecord::new("org", "slow")
            .with_metric(metric::ISSUE_RESOLUTION_DURATION, single(15.0));
        assert_eq!(code_health(&project), 0.5);

        let fast = ProjectRecord::new("org", "fast")
            .with_metric(metric::ISSUE_RESOLUTION_DURATION, single(3.0));
        assert!((code_health(&fast) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn code_change_volume_is_averaged_into_health() {
        let project = ProjectRecord::new("org", "busy")
            .with_metric(metric::CODE_CHANGE_LINES_SUM, single(5000.0));
        assert_eq!(code_health(&project), 0.5);

        let huge = ProjectRecord::new("org", "huge")
            .with_metric(metric::CODE_CHANGE_LINES_SUM, single(50000.0));
        assert_eq!(code_health(&huge), 0.75);
    }

    #[test]
    fn malformed_star_keys_surface_as_errors() {
        let project = ProjectRecord::new("org", "bad").with_metric(
            metric::STARS,
            [("yesterday", 1.0)].into_iter().collect(),
        );
        assert!(score_project(&project, &ScoringWeights::default()).is_err());
    }

    proptest! {
        #[test]
        fn composite_stays_within_bounds(
            openrank in -10.0f64..1e4,
            activity in -10.0f64..1e6,
            attention in -10.0f64..1e6,
            bus_factor in -10.0f64..1e4,
            duration in -10.0f64..1e3,
            volume in -10.0f64..1e7,
            stars in proptest::collection::vec(0.0f64..1e6, 0..24),
        ) {
            let star_series: MetricSeries = stars
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("{}-{:02}", 2020 + i / 12, i % 12 + 1), *v))
                .collect();
            let project = ProjectRecord::new("org", "repo")
                .with_metric(metric::OPENRANK, single(openrank))
                .with_metric(metric::ACTIVITY, single(activity))
                .with_metric(metric::ATTENTION, single(attention))
                .with_metric(metric::BUS_FACTOR, single(bus_factor))
                .with_metric(metric::ISSUE_RESOLUTION_DURATION, single(duration))
                .with_metric(metric::CODE_CHANGE_LINES_SUM, single(volume))
                .with_metric(metric::STARS, star_series);
            let card = score_project(&project, &ScoringWeights::default()).unwrap();
            prop_assert!((0.0..=MAX_INFLUENCE).contains(&card.overall));
        }
    }
}
