//! Survey Scorer
//!
//! Computes readiness metrics from the catalog and one session's responses.
//! Every function here is pure: in-memory arithmetic over a settled snapshot
//! of the response map, no I/O, no hidden state.
//!
//! Scoring rules:
//! - A missing entry scores as Not implemented (weight 0, counted toward max).
//! - Not applicable removes the question from both earned and max points.
//! - Every counted question contributes a fixed ceiling of 4 points to max.
//! - A section or framework where every question is Not applicable has
//!   max = 0 and scores 0%, not undefined.

use crate::catalog::{Catalog, Framework};
use crate::responses::{QuestionId, Rating, ResponseMap, MAX_WEIGHT};
use serde::Serialize;

/// Readiness of one section: points earned out of attainable, recomputed on
/// every scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionScore {
    pub section: String,
    pub earned: u32,
    pub max: u32,
    pub percent: f64,
}

/// Readiness of one framework, with section scores in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameworkScore {
    pub framework: String,
    pub overall_percent: f64,
    pub earned: u32,
    pub max: u32,
    pub sections: Vec<SectionScore>,
}

/// A question whose rating indicates unmet or partial maturity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapItem {
    pub framework: String,
    pub section: String,
    pub question: String,
    pub rating: Rating,
}

/// One full scoring pass: every framework in catalog order plus the
/// aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyResults {
    pub frameworks: Vec<FrameworkScore>,
    pub aggregate_percent: f64,
}

fn percent(earned: u32, max: u32) -> f64 {
    if max > 0 {
        f64::from(earned) / f64::from(max) * 100.0
    } else {
        0.0
    }
}

/// Score a single framework.
///
/// `framework_index` is the framework's position in the catalog, used to
/// address responses by their structured identity.
pub fn score_framework(
    framework: &Framework,
    framework_index: usize,
    responses: &ResponseMap,
) -> FrameworkScore {
    let mut earned = 0;
    let mut max = 0;
    let mut sections = Vec::with_capacity(framework.sections.len());

    for (s_idx, section) in framework.sections.iter().enumerate() {
        let mut section_earned = 0;
        let mut section_max = 0;

        for q_idx in 0..section.questions.len() {
            let id = QuestionId::new(framework_index, s_idx, q_idx);
            if let Some(weight) = responses.rating_or_default(id).weight() {
                section_max += MAX_WEIGHT;
                section_earned += weight;
            }
            // Not applicable: excluded from both sides of the ratio
        }

        earned += section_earned;
        max += section_max;
        sections.push(SectionScore {
            section: section.name.clone(),
            earned: section_earned,
            max: section_max,
            percent: percent(section_earned, section_max),
        });
    }

    FrameworkScore {
        framework: framework.name.clone(),
        overall_percent: percent(earned, max),
        earned,
        max,
        sections,
    }
}

/// Unweighted arithmetic mean of per-framework percentages.
///
/// Each framework contributes equally regardless of how many questions it
/// has; this is not a pooled points ratio. Empty input scores 0.
pub fn aggregate_score(scores: &[FrameworkScore]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|s| s.overall_percent).sum::<f64>() / scores.len() as f64
}

/// Score every framework in catalog order and compute the aggregate.
pub fn score_survey(catalog: &Catalog, responses: &ResponseMap) -> SurveyResults {
    let frameworks: Vec<FrameworkScore> = catalog
        .frameworks()
        .iter()
        .enumerate()
        .map(|(idx, framework)| score_framework(framework, idx, responses))
        .collect();
    let aggregate_percent = aggregate_score(&frameworks);

    SurveyResults {
        frameworks,
        aggregate_percent,
    }
}

/// Collect every question rated Not implemented, Planned, or Partially
/// implemented (unanswered questions count as Not implemented), in catalog
/// traversal order.
pub fn compute_gaps(catalog: &Catalog, responses: &ResponseMap) -> Vec<GapItem> {
    let mut gaps = Vec::new();

    for (f_idx, framework) in catalog.frameworks().iter().enumerate() {
        for (s_idx, section) in framework.sections.iter().enumerate() {
            for (q_idx, question) in section.questions.iter().enumerate() {
                let rating = responses.rating_or_default(QuestionId::new(f_idx, s_idx, q_idx));
                if rating.is_gap() {
                    gaps.push(GapItem {
                        framework: framework.name.clone(),
                        section: section.name.clone(),
                        question: question.clone(),
                        rating,
                    });
                }
            }
        }
    }

    gaps
}
