use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::Json;
use crate::models::{CreateSubmissionRequest, ListSubmissionsRequest, Page, Submission};
use crate::state::AppState;
use crate::utils::errors::Result;
use super::{json_rejection, path_rejection};

/// `POST /submissions`
pub async fn create_submission(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateSubmissionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Submission>)> {
    let Json(request) = payload.map_err(json_rejection)?;
    let submission = state.services.submission_service.create_submission(request).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// `GET /submissions`
///
/// Parsed from the raw query string so that `technologyIds` may repeat.
pub async fn list_submissions(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Page<Submission>>> {
    let request = ListSubmissionsRequest::from_query(query.as_deref().unwrap_or_default())?;
    let page = state.services.submission_service.list_submissions(request).await?;
    Ok(Json(page))
}

/// `GET /submissions/:id`
pub async fn get_submission(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Submission>> {
    let Path(id) = id.map_err(path_rejection)?;
    let submission = state.services.submission_service.get_submission(id).await?;
    Ok(Json(submission))
}
