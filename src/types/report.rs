use crate::types::scoring::{MaturityStage, RiskLevel, Score, ScoreCard};
use serde::Serialize;

/// Latest/average/trend/total columns for one metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricSummary {
    pub latest: f64,
    pub avg: f64,
    pub trend: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    #[serde(rename = "S-Tier")]
    S,
    #[serde(rename = "A-Tier")]
    A,
    #[serde(rename = "B-Tier")]
    B,
    #[serde(rename = "C-Tier")]
    C,
    #[serde(rename = "D-Tier")]
    D,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::S => "S-Tier",
            Tier::A => "A-Tier",
            Tier::B => "B-Tier",
            Tier::C => "C-Tier",
            Tier::D => "D-Tier",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Rising,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunityHealth {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthPotential {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketPosition {
    Leader,
    Challenger,
    Follower,
    Niche,
}

impl MarketPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketPosition::Leader => "leader",
            MarketPosition::Challenger => "challenger",
            MarketPosition::Follower => "follower",
            MarketPosition::Niche => "niche",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectRow {
    pub rank: usize,
    pub repo_name: String,
    pub org: String,
    pub repo: String,
    pub language: String,
    pub stars: MetricSummary,
    pub activity: MetricSummary,
    pub openrank: MetricSummary,
    pub attention: MetricSummary,
    pub bus_factor: MetricSummary,
    pub avg_issue_age: f64,
    pub latest_participants: f64,
    pub new_contributors_trend: f64,
    pub code_churn_ratio: f64,
    pub scores: ScoreCard,
    pub influence_score: Score,
    pub influence_tier: Tier,
    pub influence_trend: Direction,
    pub community_health: CommunityHealth,
    pub growth_potential: GrowthPotential,
    pub market_position: MarketPosition,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageStats {
    pub language: String,
    pub project_count: usize,
    pub avg_stars: f64,
    pub avg_activity: f64,
    pub avg_openrank: f64,
    pub avg_attention: f64,
    pub avg_influence_score: f64,
    pub maturity_score: f64,
    pub stage: MaturityStage,
}

/// Per-language activity trajectory; the input of the ecosystem analysis.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageTrend {
    pub language: String,
    pub project_count: usize,
    pub total_stars: f64,
    pub avg_activity: f64,
    pub growth_rate: f64,
    pub maturity_stage: MaturityStage,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnologyRow {
    pub technology: String,
    pub category: String,
    pub maturity_stage: MaturityStage,
    pub risk_level: RiskLevel,
    pub growth_rate: f64,
    pub adoption_rate: f64,
    pub community_size: usize,
    pub avg_project_stars: f64,
    pub avg_influence_score: f64,
    pub recommendation: String,
    pub prediction_6m: String,
    pub prediction_12m: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordScore {
    pub keyword: String,
    pub tfidf_score: f64,
    pub frequency: usize,
    pub doc_frequency: usize,
    pub is_tech_keyword: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergingKeyword {
    pub keyword: String,
    pub tfidf_score: f64,
    pub frequency: usize,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DominantLanguage {
    pub language: String,
    pub projects: usize,
    pub activity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthSignal {
    pub language: String,
    pub growth_rate: f64,
    pub current_activity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EcosystemSummary {
    pub dominant_languages: Vec<DominantLanguage>,
    pub rising_stars: Vec<GrowthSignal>,
    pub declining_technologies: Vec<GrowthSignal>,
    pub balance_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    TechnologyAdoption,
    TechnologyMigration,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::TechnologyAdoption => "technology_adoption",
            RecommendationKind::TechnologyMigration => "technology_migration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub technology: String,
    pub priority: Priority,
    pub reason: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub total_stars: f64,
    pub avg_influence_score: f64,
    pub top_language: Option<String>,
    pub top_language_count: usize,
    pub positive_trend_ratio: f64,
    pub negative_trend_ratio: f64,
    pub high_impact_projects: usize,
    pub unknown_language_projects: usize,
    pub avg_bus_factor: f64,
    pub activity_growth_rate: f64,
    pub star_growth_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: String,
    pub summary: DashboardSummary,
    pub projects: Vec<ProjectRow>,
    pub languages: Vec<LanguageStats>,
    pub language_trends: Vec<LanguageTrend>,
    pub technologies: Vec<TechnologyRow>,
    pub keywords: Vec<KeywordScore>,
    pub emerging_keywords: Vec<EmergingKeyword>,
    pub ecosystem: EcosystemSummary,
    pub recommendations: Vec<Recommendation>,
}
