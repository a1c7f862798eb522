use crate::error::MetricsError;
use crate::types::defaults;
use crate::types::project::UNKNOWN_LANGUAGE;
use crate::types::scoring::{MaturityStage, RiskLevel, ScoringWeights};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    pub weights: Option<HashMap<String, f64>>,
    pub maturity: Option<ThresholdConfig>,
    pub growth: Option<ThresholdConfig>,
    pub ecosystem: Option<EcosystemConfig>,
    pub keywords: Option<KeywordsConfig>,
    pub technologies: Option<BTreeMap<String, TechnologyRule>>,
    pub languages: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdConfig {
    pub thresholds: Option<HashMap<String, f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EcosystemConfig {
    pub dominant_min_projects: Option<usize>,
    pub dominant_min_activity: Option<f64>,
    pub rising_growth: Option<f64>,
    pub declining_growth: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordsConfig {
    pub stopwords: Option<Vec<String>>,
    pub tech_keywords: Option<Vec<String>>,
}

/// Fixed maturity assessment for a named technology.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TechnologyRule {
    pub stage: MaturityStage,
    pub growth_rate: f64,
    pub risk_level: RiskLevel,
    pub category: Option<String>,
}

/// Score cut-offs, checked from `mature` down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaturityThresholds {
    pub mature: f64,
    pub growing: f64,
    pub emerging: f64,
}

impl Default for MaturityThresholds {
    fn default() -> Self {
        Self {
            mature: 0.8,
            growing: 0.5,
            emerging: 0.2,
        }
    }
}

/// Growth-rate cut-offs for the language trend stage; below `mature` is declining.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthThresholds {
    pub emerging: f64,
    pub growing: f64,
    pub mature: f64,
}

impl Default for GrowthThresholds {
    fn default() -> Self {
        Self {
            emerging: 0.2,
            growing: 0.05,
            mature: -0.05,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EcosystemRules {
    pub dominant_min_projects: usize,
    pub dominant_min_activity: f64,
    pub rising_growth: f64,
    pub declining_growth: f64,
}

impl Default for EcosystemRules {
    fn default() -> Self {
        Self {
            dominant_min_projects: 3,
            dominant_min_activity: 0.6,
            rising_growth: 0.15,
            declining_growth: -0.10,
        }
    }
}

const THRESHOLD_BANDS: [&str; 3] = ["mature", "growing", "emerging"];

impl EngineConfig {
    pub fn scoring_weights(&self) -> ScoringWeights {
        let defaults = ScoringWeights::default();
        match &self.weights {
            Some(weights) => {
                let get = |key: &str, fallback: f64| *weights.get(key).unwrap_or(&fallback);
                ScoringWeights {
                    openrank: get("openrank", defaults.openrank),
                    activity: get("activity", defaults.activity),
                    attention: get("attention", defaults.attention),
                    bus_factor: get("bus_factor", defaults.bus_factor),
                    stars_trend: get("stars_trend", defaults.stars_trend),
                    code_health: get("code_health", defaults.code_health),
                }
            }
            None => defaults,
        }
    }

    pub fn maturity_thresholds(&self) -> MaturityThresholds {
        let defaults = MaturityThresholds::default();
        match self.maturity.as_ref().and_then(|m| m.thresholds.as_ref()) {
            Some(table) => MaturityThresholds {
                mature: *table.get("mature").unwrap_or(&defaults.mature),
                growing: *table.get("growing").unwrap_or(&defaults.growing),
                emerging: *table.get("emerging").unwrap_or(&defaults.emerging),
            },
            None => defaults,
        }
    }

    pub fn growth_thresholds(&self) -> GrowthThresholds {
        let defaults = GrowthThresholds::default();
        match self.growth.as_ref().and_then(|g| g.thresholds.as_ref()) {
            Some(table) => GrowthThresholds {
                emerging: *table.get("emerging").unwrap_or(&defaults.emerging),
                growing: *table.get("growing").unwrap_or(&defaults.growing),
                mature: *table.get("mature").unwrap_or(&defaults.mature),
            },
            None => defaults,
        }
    }

    pub fn ecosystem_rules(&self) -> EcosystemRules {
        let defaults = EcosystemRules::default();
        match &self.ecosystem {
            Some(ecosystem) => EcosystemRules {
                dominant_min_projects: ecosystem
                    .dominant_min_projects
                    .unwrap_or(defaults.dominant_min_projects),
                dominant_min_activity: ecosystem
                    .dominant_min_activity
                    .unwrap_or(defaults.dominant_min_activity),
                rising_growth: ecosystem.rising_growth.unwrap_or(defaults.rising_growth),
                declining_growth: ecosystem
                    .declining_growth
                    .unwrap_or(defaults.declining_growth),
            },
            None => defaults,
        }
    }

    pub fn stopwords(&self) -> HashSet<String> {
        match self.keywords.as_ref().and_then(|k| k.stopwords.as_ref()) {
            Some(words) => words.iter().map(|word| word.to_lowercase()).collect(),
            None => defaults::STOPWORDS.iter().map(|word| word.to_string()).collect(),
        }
    }

    pub fn tech_keywords(&self) -> BTreeSet<String> {
        match self.keywords.as_ref().and_then(|k| k.tech_keywords.as_ref()) {
            Some(words) => words.iter().map(|word| word.to_lowercase()).collect(),
            None => defaults::TECH_KEYWORDS
                .iter()
                .map(|word| word.to_string())
                .collect(),
        }
    }

    /// Configured table replaces the built-in one as a whole.
    pub fn technology_rules(&self) -> BTreeMap<String, TechnologyRule> {
        self.technologies
            .clone()
            .unwrap_or_else(defaults::technology_rules)
    }

    pub fn language_table(&self) -> HashMap<String, String> {
        match &self.languages {
            Some(table) => table
                .iter()
                .map(|(repo, language)| (repo.to_lowercase(), language.clone()))
                .collect(),
            None => defaults::languages(),
        }
    }

    pub fn validate(&self) -> Result<(), MetricsError> {
        if let Some(weights) = &self.weights {
            let unknown = weights
                .keys()
                .filter(|key| !ScoringWeights::KEYS.contains(&key.as_str()))
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                return Err(MetricsError::ConfigParse(format!(
                    "weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }
        }

        let weights = self.scoring_weights();
        if weights
            .as_array()
            .iter()
            .any(|weight| !(0.0..=1.0).contains(weight))
        {
            return Err(MetricsError::ConfigParse(
                "weights values must be between 0.0 and 1.0".to_string(),
            ));
        }
        let weight_sum = weights.sum();
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(MetricsError::ConfigParse(format!(
                "weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        if let Some(table) = self.maturity.as_ref().and_then(|m| m.thresholds.as_ref()) {
            validate_bands("maturity.thresholds", table)?;
            let thresholds = self.maturity_thresholds();
            if [thresholds.mature, thresholds.growing, thresholds.emerging]
                .iter()
                .any(|value| !(0.0..=1.0).contains(value))
            {
                return Err(MetricsError::ConfigParse(
                    "maturity.thresholds values must be between 0.0 and 1.0".to_string(),
                ));
            }
            if !(thresholds.mature >= thresholds.growing
                && thresholds.growing >= thresholds.emerging)
            {
                return Err(MetricsError::ConfigParse(
                    "maturity.thresholds must satisfy mature >= growing >= emerging".to_string(),
                ));
            }
        }

        if let Some(table) = self.growth.as_ref().and_then(|g| g.thresholds.as_ref()) {
            validate_bands("growth.thresholds", table)?;
            let thresholds = self.growth_thresholds();
            require_finite(
                "growth.thresholds",
                &[
                    ("emerging", thresholds.emerging),
                    ("growing", thresholds.growing),
                    ("mature", thresholds.mature),
                ],
            )?;
            if !(thresholds.emerging >= thresholds.growing && thresholds.growing >= thresholds.mature)
            {
                return Err(MetricsError::ConfigParse(
                    "growth.thresholds must satisfy emerging >= growing >= mature".to_string(),
                ));
            }
        }

        let ecosystem = self.ecosystem_rules();
        require_finite(
            "ecosystem",
            &[
                ("dominant_min_activity", ecosystem.dominant_min_activity),
                ("rising_growth", ecosystem.rising_growth),
                ("declining_growth", ecosystem.declining_growth),
            ],
        )?;
        if ecosystem.rising_growth <= ecosystem.declining_growth {
            return Err(MetricsError::ConfigParse(format!(
                "ecosystem.rising_growth ({}) must be greater than ecosystem.declining_growth ({})",
                ecosystem.rising_growth, ecosystem.declining_growth
            )));
        }

        if let Some(keywords) = &self.keywords {
            for (name, words) in [
                ("stopwords", &keywords.stopwords),
                ("tech_keywords", &keywords.tech_keywords),
            ] {
                if words
                    .as_ref()
                    .is_some_and(|words| words.iter().any(|word| word.trim().is_empty()))
                {
                    return Err(MetricsError::ConfigParse(format!(
                        "keywords.{name} entries must be non-empty"
                    )));
                }
            }
        }

        if let Some(technologies) = &self.technologies {
            if let Some((name, _)) = technologies
                .iter()
                .find(|(_, rule)| !rule.growth_rate.is_finite())
            {
                return Err(MetricsError::ConfigParse(format!(
                    "technologies.{name}.growth_rate must be a finite number"
                )));
            }
        }

        Ok(())
    }
}

fn validate_bands(section: &str, table: &HashMap<String, f64>) -> Result<(), MetricsError> {
    let missing = THRESHOLD_BANDS
        .iter()
        .filter(|band| !table.contains_key(**band))
        .copied()
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(MetricsError::ConfigParse(format!(
            "{section} is missing required band(s): {}",
            missing.join(", ")
        )));
    }
    let mut unknown = table
        .keys()
        .filter(|key| !THRESHOLD_BANDS.contains(&key.as_str()))
        .cloned()
        .collect::<Vec<_>>();
    if !unknown.is_empty() {
        unknown.sort();
        return Err(MetricsError::ConfigParse(format!(
            "{section} contains unknown band(s): {}",
            unknown.join(", ")
        )));
    }
    Ok(())
}

fn require_finite(section: &str, values: &[(&str, f64)]) -> Result<(), MetricsError> {
    match values.iter().find(|(_, value)| !value.is_finite()) {
        Some((key, _)) => Err(MetricsError::ConfigParse(format!(
            "{section}.{key} must be a finite number"
        ))),
        None => Ok(()),
    }
}

/// Language label for a repository name, `Unknown` when not listed.
pub fn language_for(table: &HashMap<String, String>, repo: &str) -> String {
    table
        .get(&repo.to_lowercase())
        .cloned()
        .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string())
}
