use crate::error::{MetricsError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Suffix marking an unprocessed variant of a data point.
pub const RAW_SUFFIX: &str = "-raw";

/// Date-keyed metric values.
///
/// Keys are `YYYY-MM` or `YYYY-MM-DD` strings, so lexicographic order in the
/// underlying `BTreeMap` is also chronological order. An empty series is a
/// valid value and means "no data".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSeries(BTreeMap<String, f64>);

impl MetricSeries {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    /// Copy of the series without `-raw` entries.
    pub fn clean(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(key, _)| !key.ends_with(RAW_SUFFIX))
                .map(|(key, value)| (key.clone(), *value))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Value at the last key, if any.
    pub fn last(&self) -> Option<f64> {
        self.0.values().next_back().copied()
    }

    pub fn latest(&self) -> f64 {
        self.last().unwrap_or(0.0)
    }

    pub fn values(&self) -> Vec<f64> {
        self.0.values().copied().collect()
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn mean(&self) -> f64 {
        mean(&self.values())
    }

    /// Fails on the first key that is not a `YYYY-MM` or `YYYY-MM-DD` date.
    pub fn validate_keys(&self, series: &str) -> Result<()> {
        match self.0.keys().find(|key| parse_date_key(key).is_none()) {
            Some(key) => Err(MetricsError::InvalidDateKey {
                series: series.to_string(),
                key: key.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MetricSeries {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    match key.len() {
        7 => NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d").ok(),
        10 => NaiveDate::parse_from_str(key, "%Y-%m-%d").ok(),
        _ => None,
    }
}

/// `YYYY-MM` bucket for a date key.
pub fn month_bucket(key: &str) -> Option<String> {
    parse_date_key(key).map(|date| date.format("%Y-%m").to_string())
}

/// Yearly (`2021`) and quarterly (`2021Q3`) roll-ups published next to monthly points.
pub fn is_rollup_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    match bytes.len() {
        4 => bytes.iter().all(u8::is_ascii_digit),
        6 => {
            bytes[..4].iter().all(u8::is_ascii_digit)
                && bytes[4] == b'Q'
                && (b'1'..=b'4').contains(&bytes[5])
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MetricSeries {
        [
            ("2023-02", 20.0),
            ("2023-01", 10.0),
            ("2023-01-raw", 999.0),
            ("2023-03", 30.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn clean_drops_raw_keys() {
        let cleaned = sample().clean();
        assert_eq!(cleaned.len(), 3);
        assert!(cleaned.iter().all(|(key, _)| !key.ends_with(RAW_SUFFIX)));
    }

    #[test]
    fn latest_reads_last_key_in_date_order() {
        assert_eq!(sample().clean().latest(), 30.0);
    }

    #[test]
    fn empty_series_degrades_to_zero() {
        let empty = MetricSeries::new();
        assert_eq!(empty.latest(), 0.0);
        assert_eq!(empty.mean(), 0.0);
        assert_eq!(empty.sum(), 0.0);
        assert!(empty.last().is_none());
    }

    #[test]
    fn aggregates_follow_key_order() {
        let cleaned = sample().clean();
        assert_eq!(cleaned.values(), vec![10.0, 20.0, 30.0]);
        assert_eq!(cleaned.sum(), 60.0);
        assert_eq!(cleaned.mean(), 20.0);
    }

    #[test]
    fn validate_keys_accepts_month_and_day_keys() {
        let series: MetricSeries = [("2023-01", 1.0), ("2023-02-15", 2.0)]
            .into_iter()
            .collect();
        assert!(series.validate_keys("stars").is_ok());
    }

    #[test]
    fn validate_keys_rejects_malformed_key() {
        let series: MetricSeries = [("2023-13", 1.0)].into_iter().collect();
        let err = series.validate_keys("stars").expect_err("month 13 is invalid");
        assert!(err.to_string().contains("2023-13"));
        assert!(err.to_string().contains("stars"));
    }

    #[test]
    fn month_bucket_truncates_days() {
        assert_eq!(month_bucket("2023-04-17").as_deref(), Some("2023-04"));
        assert_eq!(month_bucket("2023-04").as_deref(), Some("2023-04"));
        assert_eq!(month_bucket("2023"), None);
    }

    #[test]
    fn rollup_keys_are_recognised() {
        assert!(is_rollup_key("2021"));
        assert!(is_rollup_key("2021Q3"));
        assert!(!is_rollup_key("2021Q5"));
        assert!(!is_rollup_key("2021-03"));
    }
}
