use crate::types::project::ProjectRecord;
use crate::types::report::{EmergingKeyword, KeywordScore};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::info;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static HEX_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-f0-9]+$").expect("valid regex"));

pub const MIN_TOKEN_LEN: usize = 3;
pub const MIN_TFIDF: f64 = 0.1;
pub const EMERGING_MIN_FREQUENCY: usize = 10;
pub const EMERGING_MIN_DOC_FREQUENCY: usize = 2;
pub const EMERGING_MIN_TFIDF: f64 = 0.5;
pub const EMERGING_LIMIT: usize = 20;

/// TF-IDF style keyword ranking restricted to technology vocabulary.
pub struct KeywordWeighter<'a> {
    stopwords: &'a HashSet<String>,
    tech_keywords: &'a BTreeSet<String>,
}

#[derive(Default)]
struct TokenStats {
    frequency: usize,
    doc_frequency: usize,
}

impl<'a> KeywordWeighter<'a> {
    pub fn new(stopwords: &'a HashSet<String>, tech_keywords: &'a BTreeSet<String>) -> Self {
        Self {
            stopwords,
            tech_keywords,
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        NON_WORD
            .replace_all(&lowered, " ")
            .split_whitespace()
            .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
            .filter(|token| !self.stopwords.contains(*token))
            .filter(|token| !token.chars().all(|c| c.is_ascii_digit()))
            .filter(|token| !HEX_TOKEN.is_match(token))
            .map(str::to_string)
            .collect()
    }

    pub fn score<S: AsRef<str>>(&self, documents: &[S]) -> Vec<KeywordScore> {
        let total_docs = documents.len();
        let mut stats: BTreeMap<String, TokenStats> = BTreeMap::new();

        for document in documents {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for token in self.tokenize(document.as_ref()) {
                *counts.entry(token).or_insert(0) += 1;
            }
            for (token, count) in counts {
                let entry = stats.entry(token).or_default();
                entry.frequency += count;
                entry.doc_frequency += 1;
            }
        }

        let mut scores = stats
            .into_iter()
            .filter_map(|(token, stats)| {
                let idf = if stats.doc_frequency > 0 {
                    (total_docs as f64 / stats.doc_frequency as f64).ln()
                } else {
                    0.0
                };
                let mean_tf = stats.frequency as f64 / total_docs as f64;
                let tfidf = mean_tf * idf;
                if tfidf > MIN_TFIDF && self.is_tech_related(&token) {
                    Some(KeywordScore {
                        is_tech_keyword: self.tech_keywords.contains(&token),
                        keyword: token,
                        tfidf_score: tfidf,
                        frequency: stats.frequency,
                        doc_frequency: stats.doc_frequency,
                    })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        scores.sort_by(|a, b| by_tfidf_desc(a.tfidf_score, b.tfidf_score, &a.keyword, &b.keyword));
        info!(documents = total_docs, keywords = scores.len(), "keyword scoring complete");
        scores
    }

    fn is_tech_related(&self, token: &str) -> bool {
        self.tech_keywords.contains(token)
            || self
                .tech_keywords
                .iter()
                .any(|keyword| token.contains(keyword.as_str()) || keyword.contains(token))
    }
}

pub fn emerging_keywords(scores: &[KeywordScore]) -> Vec<EmergingKeyword> {
    let mut emerging = scores
        .iter()
        .filter(|score| {
            score.frequency > EMERGING_MIN_FREQUENCY
                && score.doc_frequency > EMERGING_MIN_DOC_FREQUENCY
                && score.tfidf_score > EMERGING_MIN_TFIDF
        })
        .map(|score| EmergingKeyword {
            keyword: score.keyword.clone(),
            tfidf_score: score.tfidf_score,
            frequency: score.frequency,
            confidence: (score.doc_frequency as f64 / 10.0).min(1.0),
        })
        .collect::<Vec<_>>();
    emerging.sort_by(|a, b| by_tfidf_desc(a.tfidf_score, b.tfidf_score, &a.keyword, &b.keyword));
    emerging.truncate(EMERGING_LIMIT);
    emerging
}

/// One document per project name/description plus one per name/language pair.
pub fn documents(projects: &[ProjectRecord]) -> Vec<String> {
    let described = projects.iter().map(|project| {
        format!(
            "{} {}",
            project.full_name,
            project.description.as_deref().unwrap_or_default()
        )
    });
    let labelled = projects
        .iter()
        .map(|project| format!("{} {}", project.full_name, project.language));
    described.chain(labelled).collect()
}

fn by_tfidf_desc(a: f64, b: f64, a_key: &str, b_key: &str) -> Ordering {
    b.partial_cmp(&a)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a_key.cmp(b_key))
}
