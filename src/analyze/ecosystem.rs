use crate::types::config::{EcosystemRules, GrowthThresholds};
use crate::types::report::{
    DominantLanguage, EcosystemSummary, GrowthSignal, LanguageTrend, Priority, Recommendation,
    RecommendationKind,
};
use crate::types::scoring::MaturityStage;

pub fn analyze_ecosystem(trends: &[LanguageTrend], rules: &EcosystemRules) -> EcosystemSummary {
    let dominant_languages = trends
        .iter()
        .filter(|trend| {
            trend.project_count >= rules.dominant_min_projects
                && trend.avg_activity > rules.dominant_min_activity
                && trend.maturity_stage == MaturityStage::Mature
        })
        .map(|trend| DominantLanguage {
            language: trend.language.clone(),
            projects: trend.project_count,
            activity: trend.avg_activity,
        })
        .collect();

    let rising_stars = trends
        .iter()
        .filter(|trend| trend.growth_rate > rules.rising_growth)
        .map(growth_signal)
        .collect();

    let declining_technologies = trends
        .iter()
        .filter(|trend| trend.growth_rate < rules.declining_growth)
        .map(growth_signal)
        .collect();

    EcosystemSummary {
        dominant_languages,
        rising_stars,
        declining_technologies,
        balance_score: balance_score(trends),
    }
}

/// `1 - largest language share`; zero when there are no projects at all.
pub fn balance_score(trends: &[LanguageTrend]) -> f64 {
    let total: usize = trends.iter().map(|trend| trend.project_count).sum();
    if total == 0 {
        return 0.0;
    }
    let largest = trends
        .iter()
        .map(|trend| trend.project_count)
        .max()
        .unwrap_or(0);
    1.0 - largest as f64 / total as f64
}

pub fn recommendations(trends: &[LanguageTrend], thresholds: &GrowthThresholds) -> Vec<Recommendation> {
    trends
        .iter()
        .filter_map(|trend| match trend.maturity_stage {
            MaturityStage::Emerging if trend.growth_rate > thresholds.emerging => {
                Some(Recommendation {
                    kind: RecommendationKind::TechnologyAdoption,
                    technology: trend.language.clone(),
                    priority: Priority::High,
                    reason: format!(
                        "emerging technology growing {:.1}% over the last six months",
                        trend.growth_rate * 100.0
                    ),
                    action: "start learning or run a small pilot".to_string(),
                })
            }
            MaturityStage::Declining => Some(Recommendation {
                kind: RecommendationKind::TechnologyMigration,
                technology: trend.language.clone(),
                priority: Priority::Medium,
                reason: format!(
                    "declining technology, growth {:.1}%",
                    trend.growth_rate * 100.0
                ),
                action: "plan a migration path and evaluate alternatives".to_string(),
            }),
            _ => None,
        })
        .collect()
}

fn growth_signal(trend: &LanguageTrend) -> GrowthSignal {
    GrowthSignal {
        language: trend.language.clone(),
        growth_rate: trend.growth_rate,
        current_activity: trend.avg_activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(language: &str, project_count: usize, growth_rate: f64, stage: MaturityStage) -> LanguageTrend {
        LanguageTrend {
            language: language.to_string(),
            project_count,
            total_stars: 0.0,
            avg_activity: 12.5,
            growth_rate,
            maturity_stage: stage,
        }
    }

    #[test]
    fn balance_score_reflects_largest_share() {
        let trends = [
            trend("Java", 8, 0.0, MaturityStage::Mature),
            trend("Go", 1, 0.0, MaturityStage::Mature),
            trend("Rust", 1, 0.0, MaturityStage::Mature),
        ];
        assert!((balance_score(&trends) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn balance_score_is_zero_without_projects() {
        assert_eq!(balance_score(&[]), 0.0);
    }

    #[test]
    fn classifies_dominant_rising_and_declining_languages() {
        let mut small = trend("Lua", 1, 0.0, MaturityStage::Mature);
        small.avg_activity = 100.0;
        let mut idle = trend("Shell", 5, 0.0, MaturityStage::Mature);
        idle.avg_activity = 0.5;
        let trends = [
            trend("Java", 5, 0.0, MaturityStage::Mature),
            trend("TypeScript", 4, 0.3, MaturityStage::Emerging),
            trend("Scala", 3, -0.2, MaturityStage::Declining),
            small,
            idle,
        ];

        let summary = analyze_ecosystem(&trends, &EcosystemRules::default());
        let dominant = summary
            .dominant_languages
            .iter()
            .map(|d| d.language.as_str())
            .collect::<Vec<_>>();
        assert_eq!(dominant, vec!["Java"]);
        assert_eq!(summary.rising_stars.len(), 1);
        assert_eq!(summary.rising_stars[0].language, "TypeScript");
        assert_eq!(summary.declining_technologies.len(), 1);
        assert_eq!(summary.declining_technologies[0].growth_rate, -0.2);
    }

    #[test]
    fn growth_boundaries_are_exclusive() {
        let trends = [
            trend("A", 1, 0.15, MaturityStage::Growing),
            trend("B", 1, -0.10, MaturityStage::Mature),
        ];
        let summary = analyze_ecosystem(&trends, &EcosystemRules::default());
        assert!(summary.rising_stars.is_empty());
        assert!(summary.declining_technologies.is_empty());
    }

    #[test]
    fn recommendations_cover_adoption_and_migration() {
        let trends = [
            trend("Zig", 2, 0.4, MaturityStage::Emerging),
            trend("Perl", 2, -0.3, MaturityStage::Declining),
            trend("Java", 9, 0.01, MaturityStage::Mature),
        ];
        let recs = recommendations(&trends, &GrowthThresholds::default());
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].kind, RecommendationKind::TechnologyAdoption);
        assert_eq!(recs[0].priority, Priority::High);
        assert!(recs[0].reason.contains("40.0%"));
        assert_eq!(recs[1].kind, RecommendationKind::TechnologyMigration);
        assert_eq!(recs[1].technology, "Perl");
    }
}
