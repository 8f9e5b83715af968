// Page handlers for HTML rendering with Askama

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_htmx::HxRequest;
use serde::Deserialize;

use crate::api_server::{read_responses, write_responses, AppError, AppState};
use crate::catalog::{Catalog, Framework};
use crate::responses::{ParseRatingError, QuestionId, Rating, ResponseMap};
use crate::scorer::{compute_gaps, score_framework, score_survey, FrameworkScore};
use crate::utils::slug::{question_key, slugify};

const SITE_TITLE: &str = "Risk and Evaluation Framework Survey";
const SITE_CAPTION: &str =
    "Assess NIST AI RMF, COSO ERM, and GRC practices with a structured questionnaire.";

// ============================================================================
// View Models
// ============================================================================

/// One entry in the tab navigation (frameworks + Summary).
pub struct NavTab {
    pub name: String,
    pub href: String,
    pub active: bool,
}

/// Framework overview card: readiness metric with earned/max detail.
pub struct FrameworkCard {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub percent_display: String,
    pub earned: u32,
    pub max: u32,
}

/// One radio choice for a question, with the current selection marked.
pub struct ChoiceView {
    pub label: &'static str,
    pub checked: bool,
}

pub struct QuestionView {
    pub key: String,
    pub text: String,
    pub choices: Vec<ChoiceView>,
}

pub struct SectionView {
    pub name: String,
    pub questions: Vec<QuestionView>,
}

/// Rendered framework scorecard: headline metric plus per-section rows.
pub struct ScorePanel {
    pub framework: String,
    pub percent_display: String,
    pub earned: u32,
    pub max: u32,
    pub sections: Vec<SectionRow>,
}

pub struct SectionRow {
    pub name: String,
    pub earned: u32,
    pub max: u32,
    pub percent_display: String,
}

pub struct GapRow {
    pub framework: String,
    pub section: String,
    pub question: String,
    pub rating: &'static str,
}

fn nav_tabs(catalog: &Catalog, active_framework: Option<usize>, summary_active: bool) -> Vec<NavTab> {
    let mut tabs: Vec<NavTab> = catalog
        .frameworks()
        .iter()
        .enumerate()
        .map(|(idx, fw)| NavTab {
            name: fw.name.clone(),
            href: format!("/survey/{}", slugify(&fw.name)),
            active: active_framework == Some(idx),
        })
        .collect();
    tabs.push(NavTab {
        name: "Summary".to_string(),
        href: "/summary".to_string(),
        active: summary_active,
    });
    tabs
}

fn score_panel(score: &FrameworkScore) -> ScorePanel {
    ScorePanel {
        framework: score.framework.clone(),
        percent_display: format!("{:.0}%", score.overall_percent),
        earned: score.earned,
        max: score.max,
        sections: score
            .sections
            .iter()
            .map(|s| SectionRow {
                name: s.section.clone(),
                earned: s.earned,
                max: s.max,
                percent_display: format!("{:.1}%", s.percent),
            })
            .collect(),
    }
}

fn section_views(framework: &Framework, framework_index: usize, responses: &ResponseMap) -> Vec<SectionView> {
    framework
        .sections
        .iter()
        .enumerate()
        .map(|(s_idx, section)| SectionView {
            name: section.name.clone(),
            questions: section
                .questions
                .iter()
                .enumerate()
                .map(|(q_idx, question)| {
                    let current =
                        responses.rating_or_default(QuestionId::new(framework_index, s_idx, q_idx));
                    QuestionView {
                        key: question_key(&framework.name, &section.name, q_idx),
                        text: question.clone(),
                        choices: Rating::CHOICES
                            .iter()
                            .map(|&r| ChoiceView {
                                label: r.label(),
                                checked: r == current,
                            })
                            .collect(),
                    }
                })
                .collect(),
        })
        .collect()
}

// ============================================================================
// Templates
// ============================================================================

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub site_title: String,
    pub caption: String,
    pub tabs: Vec<NavTab>,
    pub cards: Vec<FrameworkCard>,
    pub aggregate_display: String,
}

#[derive(Template)]
#[template(path = "pages/survey.html")]
pub struct SurveyTemplate {
    pub title: String,
    pub site_title: String,
    pub caption: String,
    pub tabs: Vec<NavTab>,
    pub slug: String,
    pub sections: Vec<SectionView>,
    pub panel: ScorePanel,
}

#[derive(Template)]
#[template(path = "pages/summary.html")]
pub struct SummaryTemplate {
    pub title: String,
    pub site_title: String,
    pub tabs: Vec<NavTab>,
    pub cards: Vec<FrameworkCard>,
    pub aggregate_display: String,
    pub show_details: bool,
    pub scorecards: Vec<ScorePanel>,
    pub show_gaps: bool,
    pub gaps: Vec<GapRow>,
}

#[derive(Template)]
#[template(path = "partials/score_panel.html")]
pub struct ScorePanelTemplate {
    pub panel: ScorePanel,
}

fn render<T: Template>(template: T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        format!("Template error: {}", e)
    }))
}

// ============================================================================
// Page Handlers
// ============================================================================

pub async fn home_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let responses = read_responses(&state)?;
    let results = score_survey(&state.catalog, &responses);

    let cards = results
        .frameworks
        .iter()
        .zip(state.catalog.frameworks())
        .map(|(score, fw)| FrameworkCard {
            name: fw.name.clone(),
            slug: slugify(&fw.name),
            description: fw.description.clone(),
            percent_display: format!("{:.0}%", score.overall_percent),
            earned: score.earned,
            max: score.max,
        })
        .collect();

    Ok(render(HomeTemplate {
        title: "Survey".to_string(),
        site_title: SITE_TITLE.to_string(),
        caption: SITE_CAPTION.to_string(),
        tabs: nav_tabs(&state.catalog, None, false),
        cards,
        aggregate_display: format!("{:.0}%", results.aggregate_percent),
    }))
}

pub async fn survey_page(
    Path(framework): Path<String>,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let (idx, fw) = state
        .catalog
        .framework_by_slug(&framework)
        .ok_or_else(|| AppError::NotFound(format!("Unknown framework: {}", framework)))?;

    let responses = read_responses(&state)?;
    let score = score_framework(fw, idx, &responses);

    Ok(render(SurveyTemplate {
        title: fw.name.clone(),
        site_title: SITE_TITLE.to_string(),
        caption: fw.description.clone(),
        tabs: nav_tabs(&state.catalog, Some(idx), false),
        slug: slugify(&fw.name),
        sections: section_views(fw, idx, &responses),
        panel: score_panel(&score),
    }))
}

#[derive(Deserialize, Debug)]
pub struct RespondForm {
    key: String,
    rating: String,
}

/// Record one rating. HTMX requests get the refreshed scorecard partial;
/// plain form posts are redirected back to the survey page.
pub async fn respond(
    Path(framework): Path<String>,
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    Form(form): Form<RespondForm>,
) -> Result<Response, AppError> {
    let (idx, fw) = state
        .catalog
        .framework_by_slug(&framework)
        .ok_or_else(|| AppError::NotFound(format!("Unknown framework: {}", framework)))?;

    let id = state
        .catalog
        .resolve_key(&form.key)
        .ok_or_else(|| AppError::NotFound(format!("Unknown question key: {}", form.key)))?;
    if id.framework != idx {
        return Err(AppError::Unprocessable(format!(
            "Question key '{}' does not belong to framework '{}'",
            form.key, fw.name
        )));
    }

    let rating: Rating = form
        .rating
        .parse()
        .map_err(|e: ParseRatingError| AppError::Unprocessable(e.to_string()))?;

    let mut responses = write_responses(&state)?;
    responses.set(id, rating);

    if is_htmx {
        let score = score_framework(fw, idx, &responses);
        Ok(render(ScorePanelTemplate {
            panel: score_panel(&score),
        })
        .into_response())
    } else {
        Ok(Redirect::to(&format!("/survey/{}", framework)).into_response())
    }
}

#[derive(Deserialize, Debug)]
pub struct SummaryQuery {
    #[serde(default = "default_true")]
    details: bool,
    #[serde(default = "default_true")]
    gaps: bool,
}

fn default_true() -> bool {
    true
}

pub async fn summary_page(
    Query(query): Query<SummaryQuery>,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let responses = read_responses(&state)?;
    let results = score_survey(&state.catalog, &responses);

    let cards = results
        .frameworks
        .iter()
        .map(|score| FrameworkCard {
            name: score.framework.clone(),
            slug: slugify(&score.framework),
            description: String::new(),
            percent_display: format!("{:.0}%", score.overall_percent),
            earned: score.earned,
            max: score.max,
        })
        .collect();

    let scorecards = results.frameworks.iter().map(score_panel).collect();

    let gaps = compute_gaps(&state.catalog, &responses)
        .into_iter()
        .map(|g| GapRow {
            framework: g.framework,
            section: g.section,
            question: g.question,
            rating: g.rating.label(),
        })
        .collect();

    Ok(render(SummaryTemplate {
        title: "Summary".to_string(),
        site_title: SITE_TITLE.to_string(),
        tabs: nav_tabs(&state.catalog, None, true),
        cards,
        aggregate_display: format!("{:.0}%", results.aggregate_percent),
        show_details: query.details,
        scorecards,
        show_gaps: query.gaps,
        gaps,
    }))
}
