use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use crate::models::{CreateTechnologyRequest, ListTechnologiesRequest, Page, SearchTechnologiesRequest, SearchTechnologiesResponse, Technology};
use crate::state::AppState;
use crate::utils::errors::Result;
use super::{json_rejection, query_rejection};

/// `POST /technologies`
pub async fn create_technology(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateTechnologyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Technology>)> {
    let Json(request) = payload.map_err(json_rejection)?;
    let technology = state.services.technology_service.create_technology(request).await?;
    Ok((StatusCode::CREATED, Json(technology)))
}

/// `GET /technologies/search`
pub async fn search_technologies(
    State(state): State<AppState>,
    query: std::result::Result<Query<SearchTechnologiesRequest>, QueryRejection>,
) -> Result<Json<SearchTechnologiesResponse>> {
    let Query(request) = query.map_err(query_rejection)?;
    let response = state.services.technology_service.search_technologies(request).await?;
    Ok(Json(response))
}

/// `GET /technologies`
pub async fn list_technologies(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListTechnologiesRequest>, QueryRejection>,
) -> Result<Json<Page<Technology>>> {
    let Query(request) = query.map_err(query_rejection)?;
    let page = state.services.technology_service.list_technologies(request).await?;
    Ok(Json(page))
}
