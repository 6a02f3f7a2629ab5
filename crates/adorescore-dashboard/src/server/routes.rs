use crate::client::{AnalysisDigest, ClientError};
use crate::dataset::ReviewRecord;
use crate::filter::{Filter, FilterQuery};
use crate::state::DashboardState;
use crate::summary::{summarize, theme_snippets, Summary, ThemeSnippets};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::error;

// ============================================================================
// Health endpoints
// ============================================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================================
// Dataset endpoints
// ============================================================================

/// Values the emotion, theme and subtopic pickers can offer
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub emotions: Vec<String>,
    pub themes: Vec<String>,
    pub subtopics: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: Summary,
    pub options: FilterOptions,
}

/// Picker options come from the date range alone, before other filters
fn filter_options(state: &DashboardState, filter: &Filter) -> FilterOptions {
    let records: Vec<&ReviewRecord> = state
        .dataset
        .records()
        .iter()
        .filter(|r| filter.in_date_range(r))
        .collect();

    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        values
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    FilterOptions {
        emotions: distinct(records.iter().filter_map(|r| r.emotion.as_deref())),
        themes: distinct(records.iter().map(|r| r.main_topic.as_str())),
        subtopics: distinct(records.iter().map(|r| r.sub_topic.as_str())),
    }
}

pub async fn get_summary(
    State(state): State<DashboardState>,
    Query(query): Query<FilterQuery>,
) -> Json<SummaryResponse> {
    let filter = Filter::from(query);
    let records = filter.apply(&state.dataset);
    Json(SummaryResponse {
        summary: summarize(&records),
        options: filter_options(&state, &filter),
    })
}

pub async fn get_theme_snippets(
    State(state): State<DashboardState>,
    Path(theme): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Json<ThemeSnippets> {
    let filter = Filter::from(query);
    let records = filter.apply(&state.dataset);
    Json(theme_snippets(&records, &theme))
}

// ============================================================================
// Ad-hoc analysis
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
}

pub async fn analyze_text(
    State(state): State<DashboardState>,
    Json(req): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisDigest>, DashboardError> {
    if req.text.trim().is_empty() {
        return Err(DashboardError::EmptyText);
    }
    let digest = state.client.analyze(&req.text).await?;
    Ok(Json(digest))
}

#[derive(Debug)]
pub enum DashboardError {
    EmptyText,
    Upstream(ClientError),
}

impl From<ClientError> for DashboardError {
    fn from(err: ClientError) -> Self {
        DashboardError::Upstream(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            DashboardError::EmptyText => (
                StatusCode::BAD_REQUEST,
                "Please enter some text before analyzing.",
            ),
            DashboardError::Upstream(err) => {
                error!("Analysis request failed: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to analyze text. Please try again.",
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
