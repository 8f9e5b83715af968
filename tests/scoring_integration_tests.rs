// Scoring Integration Tests
//
// Purpose: end-to-end scenarios over the builtin catalog through the crate's
// public API, with hand-computed expected totals.

use approx::assert_relative_eq;
use readiness_scorer::{
    compute_gaps, question_key, score_survey, Catalog, QuestionId, Rating, ResponseMap,
};

/// Rate every question of one framework with a single rating.
fn rate_framework(catalog: &Catalog, responses: &mut ResponseMap, f_idx: usize, rating: Rating) {
    let fw = catalog.framework(f_idx).unwrap();
    for (s_idx, section) in fw.sections.iter().enumerate() {
        for q_idx in 0..section.questions.len() {
            responses.set(QuestionId::new(f_idx, s_idx, q_idx), rating);
        }
    }
}

#[test]
fn test_mixed_survey_hand_computed_totals() {
    let catalog = Catalog::builtin();
    let mut responses = ResponseMap::new();

    // NIST AI RMF
    //   Govern:  Fully (4), Mostly (3), Partially (2)   -> 9 / 12
    //   Map:     Planned (1), Not impl (0), N/A         -> 1 / 8
    //   Measure: Fully x3                               -> 12 / 12
    //   Manage:  unanswered                             -> 0 / 12
    responses.set(QuestionId::new(0, 0, 0), Rating::FullyImplemented);
    responses.set(QuestionId::new(0, 0, 1), Rating::MostlyImplemented);
    responses.set(QuestionId::new(0, 0, 2), Rating::PartiallyImplemented);
    responses.set(QuestionId::new(0, 1, 0), Rating::Planned);
    responses.set(QuestionId::new(0, 1, 1), Rating::NotImplemented);
    responses.set(QuestionId::new(0, 1, 2), Rating::NotApplicable);
    for q_idx in 0..3 {
        responses.set(QuestionId::new(0, 2, q_idx), Rating::FullyImplemented);
    }

    // COSO ERM: all 13 questions Mostly implemented -> 39 / 52 = 75%
    rate_framework(&catalog, &mut responses, 1, Rating::MostlyImplemented);

    // GRC: everything Not applicable -> 0 / 0 = 0%
    rate_framework(&catalog, &mut responses, 2, Rating::NotApplicable);

    let results = score_survey(&catalog, &responses);

    let nist = &results.frameworks[0];
    assert_eq!(nist.earned, 22);
    assert_eq!(nist.max, 44);
    assert_relative_eq!(nist.overall_percent, 50.0);
    assert_eq!(nist.sections[0].earned, 9);
    assert_eq!(nist.sections[0].max, 12);
    assert_eq!(nist.sections[1].earned, 1);
    assert_eq!(nist.sections[1].max, 8);
    assert_relative_eq!(nist.sections[2].percent, 100.0);
    assert_eq!(nist.sections[3].earned, 0);
    assert_eq!(nist.sections[3].max, 12);

    let coso = &results.frameworks[1];
    assert_eq!(coso.earned, 39);
    assert_eq!(coso.max, 52);
    assert_relative_eq!(coso.overall_percent, 75.0);

    let grc = &results.frameworks[2];
    assert_eq!(grc.max, 0);
    assert_relative_eq!(grc.overall_percent, 0.0);

    // Unweighted mean: (50 + 75 + 0) / 3
    assert_relative_eq!(results.aggregate_percent, 125.0 / 3.0, epsilon = 1e-9);

    // Gaps: Govern Partially (1), Map Planned + Not implemented (2),
    // Manage unanswered (3); nothing from COSO or GRC.
    let gaps = compute_gaps(&catalog, &responses);
    assert_eq!(gaps.len(), 6);
    assert!(gaps.iter().all(|g| g.framework == "NIST AI RMF"));
    assert_eq!(gaps[0].section, "Govern");
    assert_eq!(gaps[0].rating, Rating::PartiallyImplemented);
    assert_eq!(gaps[1].section, "Map");
    assert_eq!(gaps[3].section, "Manage");
}

#[test]
fn test_complete_survey_scores_full_marks() {
    let catalog = Catalog::builtin();
    let mut responses = ResponseMap::new();
    for f_idx in 0..catalog.frameworks().len() {
        rate_framework(&catalog, &mut responses, f_idx, Rating::FullyImplemented);
    }

    let results = score_survey(&catalog, &responses);
    assert_relative_eq!(results.aggregate_percent, 100.0);
    assert!(compute_gaps(&catalog, &responses).is_empty());

    // 35 questions, 4 points each
    let total_max: u32 = results.frameworks.iter().map(|f| f.max).sum();
    assert_eq!(total_max, 140);
}

#[test]
fn test_untouched_survey_is_all_gaps() {
    let catalog = Catalog::builtin();
    let responses = ResponseMap::new();

    let results = score_survey(&catalog, &responses);
    assert_relative_eq!(results.aggregate_percent, 0.0);

    let gaps = compute_gaps(&catalog, &responses);
    assert_eq!(gaps.len(), catalog.question_count());
}

#[test]
fn test_question_keys_resolve_for_whole_catalog() {
    let catalog = Catalog::builtin();

    for (f_idx, fw) in catalog.frameworks().iter().enumerate() {
        for (s_idx, section) in fw.sections.iter().enumerate() {
            for q_idx in 0..section.questions.len() {
                let key = question_key(&fw.name, &section.name, q_idx);
                let id = catalog.resolve_key(&key).expect("builtin key must resolve");
                assert_eq!(id, QuestionId::new(f_idx, s_idx, q_idx));
                assert_eq!(catalog.question(id), Some(section.questions[q_idx].as_str()));
            }
        }
    }

    assert_eq!(catalog.resolve_key("nist-ai-rmf-govern-99"), None);
    assert_eq!(catalog.resolve_key(""), None);
}
