//! # Word Scorer
//! Maps a document's word count onto a bounded integer score.
//!
//! Score = min + (words / threshold) * (max - min), rounded half away from zero.
//! Empty documents get `min_score`; anything at or past the threshold saturates
//! at `max_score`.

use thiserror::Error;

pub const DEFAULT_MIN_SCORE: i64 = 20;
pub const DEFAULT_MAX_SCORE: i64 = 40;
pub const DEFAULT_THRESHOLD_WORDS: i64 = 50;

/// Errors raised while building a scorer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScorerError {
    #[error("invalid scorer config: {0}")]
    InvalidConfig(String),
}

/// Scoring bounds. The service always runs with `ScorerConfig::default()`;
/// other values exist for library callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScorerConfig {
    pub min_score: i64,
    pub max_score: i64,
    /// Word count at or above which the score saturates at `max_score`.
    pub threshold: i64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            max_score: DEFAULT_MAX_SCORE,
            threshold: DEFAULT_THRESHOLD_WORDS,
        }
    }
}

impl ScorerConfig {
    /// Check bounds in order; the first violation is reported.
    pub fn validate(&self) -> Result<(), ScorerError> {
        if self.min_score < 0 {
            return Err(ScorerError::InvalidConfig(
                "MinScore cannot be negative".to_string(),
            ));
        }
        if self.max_score < self.min_score {
            return Err(ScorerError::InvalidConfig(
                "MaxScore cannot be less than MinScore".to_string(),
            ));
        }
        if self.threshold <= 0 {
            return Err(ScorerError::InvalidConfig(
                "threshold must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Word count and score for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    pub word_count: usize,
    pub score: i64,
}

/// Immutable scorer; share it behind an `Arc` across requests.
#[derive(Debug, Clone)]
pub struct WordScorer {
    config: ScorerConfig,
}

impl WordScorer {
    pub fn new(config: ScorerConfig) -> Result<Self, ScorerError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Number of whitespace-separated tokens; runs of whitespace collapse.
    pub fn count_words(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }

    pub fn calculate_score(&self, text: &str) -> i64 {
        self.score_for_count(self.count_words(text))
    }

    /// Count once, score once.
    pub fn evaluate(&self, text: &str) -> ScoreResult {
        let word_count = self.count_words(text);
        ScoreResult {
            word_count,
            score: self.score_for_count(word_count),
        }
    }

    fn score_for_count(&self, word_count: usize) -> i64 {
        let ScorerConfig {
            min_score,
            max_score,
            threshold,
        } = self.config;

        if word_count == 0 {
            return min_score;
        }
        let words = i64::try_from(word_count).unwrap_or(i64::MAX);
        if words >= threshold {
            return max_score;
        }

        let range = (max_score - min_score) as f64;
        let progress = words as f64 / threshold as f64;
        let raw = min_score as f64 + progress * range;

        // Unreachable given the formula, kept so the bounds hold unconditionally.
        (raw.round() as i64).clamp(min_score, max_score)
    }
}
