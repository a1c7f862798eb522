use serde::{Deserialize, Serialize};
use std::fmt;

pub type Score = f64;

/// Upper bound of the composite influence score.
pub const MAX_INFLUENCE: Score = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub openrank: f64,
    pub activity: f64,
    pub attention: f64,
    pub bus_factor: f64,
    pub stars_trend: f64,
    pub code_health: f64,
}

impl ScoringWeights {
    pub const KEYS: [&'static str; 6] = [
        "openrank",
        "activity",
        "attention",
        "bus_factor",
        "stars_trend",
        "code_health",
    ];

    pub fn as_array(&self) -> [f64; 6] {
        [
            self.openrank,
            self.activity,
            self.attention,
            self.bus_factor,
            self.stars_trend,
            self.code_health,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            openrank: 0.30,
            activity: 0.20,
            attention: 0.15,
            bus_factor: 0.15,
            stars_trend: 0.10,
            code_health: 0.10,
        }
    }
}

/// Normalized sub-scores (each in `[0, 1]`) and the weighted 0–10 total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub openrank: Score,
    pub activity: Score,
    pub attention: Score,
    pub bus_factor: Score,
    pub stars_trend: Score,
    pub code_health: Score,
    pub overall: Score,
}

impl ScoreCard {
    pub fn new(
        openrank: Score,
        activity: Score,
        attention: Score,
        bus_factor: Score,
        stars_trend: Score,
        code_health: Score,
    ) -> Self {
        Self {
            openrank: unit(openrank),
            activity: unit(activity),
            attention: unit(attention),
            bus_factor: unit(bus_factor),
            stars_trend: unit(stars_trend),
            code_health: unit(code_health),
            overall: 0.0,
        }
    }

    pub fn finalize(mut self, weights: &ScoringWeights) -> Self {
        let weighted = weights.openrank * self.openrank
            + weights.activity * self.activity
            + weights.attention * self.attention
            + weights.bus_factor * self.bus_factor
            + weights.stars_trend * self.stars_trend
            + weights.code_health * self.code_health;
        self.overall = (weighted * MAX_INFLUENCE).clamp(0.0, MAX_INFLUENCE);
        self
    }
}

fn unit(value: Score) -> Score {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaturityStage {
    Declining,
    Emerging,
    Growing,
    Mature,
}

impl MaturityStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaturityStage::Declining => "declining",
            MaturityStage::Emerging => "emerging",
            MaturityStage::Growing => "growing",
            MaturityStage::Mature => "mature",
        }
    }
}

impl fmt::Display for MaturityStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        })
    }
}
