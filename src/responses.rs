//! Ratings and Response Storage
//!
//! The maturity scale a respondent assigns per question, the structured
//! question identity, and the per-session response map the presentation
//! layer owns and passes (read-only) into the scorer.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Points available per scored question, independent of which five-point
/// value is chosen.
pub const MAX_WEIGHT: u32 = 4;

/// Maturity rating for a single question.
///
/// The first five variants carry weights 0-4. `NotApplicable` carries no
/// weight and removes the question from scoring entirely (it contributes to
/// neither earned nor maximum points).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "Not implemented")]
    NotImplemented,
    #[serde(rename = "Planned")]
    Planned,
    #[serde(rename = "Partially implemented")]
    PartiallyImplemented,
    #[serde(rename = "Mostly implemented")]
    MostlyImplemented,
    #[serde(rename = "Fully implemented")]
    FullyImplemented,
    #[serde(rename = "Not applicable")]
    NotApplicable,
}

/// Raised when a rating label from outside the crate does not match the
/// six-member scale. Policy: reject at the boundary, never default.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown rating label: '{0}'")]
pub struct ParseRatingError(pub String);

impl Rating {
    /// All ratings in survey display order.
    pub const CHOICES: [Rating; 6] = [
        Rating::NotImplemented,
        Rating::Planned,
        Rating::PartiallyImplemented,
        Rating::MostlyImplemented,
        Rating::FullyImplemented,
        Rating::NotApplicable,
    ];

    /// Numeric weight, or `None` for Not applicable.
    pub fn weight(self) -> Option<u32> {
        match self {
            Rating::NotImplemented => Some(0),
            Rating::Planned => Some(1),
            Rating::PartiallyImplemented => Some(2),
            Rating::MostlyImplemented => Some(3),
            Rating::FullyImplemented => Some(4),
            Rating::NotApplicable => None,
        }
    }

    /// Human label, as shown in the survey form.
    pub fn label(self) -> &'static str {
        match self {
            Rating::NotImplemented => "Not implemented",
            Rating::Planned => "Planned",
            Rating::PartiallyImplemented => "Partially implemented",
            Rating::MostlyImplemented => "Mostly implemented",
            Rating::FullyImplemented => "Fully implemented",
            Rating::NotApplicable => "Not applicable",
        }
    }

    /// True for ratings that mark a question as a gap (unmet or partial
    /// maturity): Not implemented, Planned, Partially implemented.
    pub fn is_gap(self) -> bool {
        matches!(
            self,
            Rating::NotImplemented | Rating::Planned | Rating::PartiallyImplemented
        )
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rating {
    type Err = ParseRatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rating::CHOICES
            .iter()
            .copied()
            .find(|r| r.label() == s)
            .ok_or_else(|| ParseRatingError(s.to_string()))
    }
}

/// Structured identity of a question: indices into the catalog, fixed at
/// catalog construction.
///
/// This is the key the [`ResponseMap`] is stored under. The string question
/// key (see [`crate::utils::slug::question_key`]) is a derived display name,
/// not an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId {
    pub framework: usize,
    pub section: usize,
    pub question: usize,
}

impl QuestionId {
    pub fn new(framework: usize, section: usize, question: usize) -> Self {
        Self {
            framework,
            section,
            question,
        }
    }
}

/// One survey session's responses.
///
/// Owned and mutated by the presentation layer; the scorer only ever reads
/// it. Entries are created lazily on first selection.
///
/// Default policy: a question with no entry scores as Not implemented
/// (weight 0, still counted toward the section maximum). This is the single
/// documented fallback for absent ratings; see [`ResponseMap::rating_or_default`].
#[derive(Debug, Clone, Default)]
pub struct ResponseMap {
    ratings: FxHashMap<QuestionId, Rating>,
}

impl ResponseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rating selected for a question, replacing any previous
    /// selection.
    pub fn set(&mut self, id: QuestionId, rating: Rating) {
        self.ratings.insert(id, rating);
    }

    /// The recorded rating, if one has been selected.
    pub fn rating(&self, id: QuestionId) -> Option<Rating> {
        self.ratings.get(&id).copied()
    }

    /// The rating used for scoring: the recorded selection, or Not
    /// implemented when the question has never been answered.
    pub fn rating_or_default(&self, id: QuestionId) -> Rating {
        self.rating(id).unwrap_or(Rating::NotImplemented)
    }

    /// Number of recorded selections (not the number of catalog questions).
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Drop every recorded selection, returning the survey to its initial
    /// state.
    pub fn clear(&mut self) {
        self.ratings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_match_scale() {
        assert_eq!(Rating::NotImplemented.weight(), Some(0));
        assert_eq!(Rating::Planned.weight(), Some(1));
        assert_eq!(Rating::PartiallyImplemented.weight(), Some(2));
        assert_eq!(Rating::MostlyImplemented.weight(), Some(3));
        assert_eq!(Rating::FullyImplemented.weight(), Some(4));
        assert_eq!(Rating::NotApplicable.weight(), None);
    }

    #[test]
    fn test_labels_round_trip() {
        for rating in Rating::CHOICES {
            assert_eq!(rating.label().parse::<Rating>(), Ok(rating));
        }
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = "Fully Implemented".parse::<Rating>().unwrap_err();
        assert_eq!(err, ParseRatingError("Fully Implemented".to_string()));
        assert!("".parse::<Rating>().is_err());
    }

    #[test]
    fn test_gap_ratings() {
        assert!(Rating::NotImplemented.is_gap());
        assert!(Rating::Planned.is_gap());
        assert!(Rating::PartiallyImplemented.is_gap());
        assert!(!Rating::MostlyImplemented.is_gap());
        assert!(!Rating::FullyImplemented.is_gap());
        assert!(!Rating::NotApplicable.is_gap());
    }

    #[test]
    fn test_missing_entry_defaults_to_not_implemented() {
        let mut responses = ResponseMap::new();
        let id = QuestionId::new(0, 0, 0);

        assert_eq!(responses.rating(id), None);
        assert_eq!(responses.rating_or_default(id), Rating::NotImplemented);

        responses.set(id, Rating::MostlyImplemented);
        assert_eq!(responses.rating_or_default(id), Rating::MostlyImplemented);

        responses.clear();
        assert!(responses.is_empty());
        assert_eq!(responses.rating_or_default(id), Rating::NotImplemented);
    }

    #[test]
    fn test_serde_uses_survey_labels() {
        let json = serde_json::to_string(&Rating::PartiallyImplemented).unwrap();
        assert_eq!(json, "\"Partially implemented\"");
        let back: Rating = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rating::PartiallyImplemented);
    }
}
