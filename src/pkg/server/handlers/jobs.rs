use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    pkg::{
        internal::adaptors::jobs::spec::{JobEntry, JobInput},
        server::state::AppState,
    },
    prelude::{Result, TrackerError},
};

fn body(payload: std::result::Result<Json<JobInput>, JsonRejection>) -> Result<JobInput> {
    payload
        .map(|Json(input)| input)
        .map_err(|e| TrackerError::Validation(e.body_text()))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<JobEntry>>> {
    let jobs = state.jobs.list().await?;
    tracing::debug!("listing {} jobs", jobs.len());
    Ok(Json(jobs))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobEntry>> {
    Ok(Json(state.jobs.get(&id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<JobInput>, JsonRejection>,
) -> Result<(StatusCode, Json<JobEntry>)> {
    let job = match body(payload) {
        Ok(input) => state.jobs.create(input).await,
        Err(e) => Err(e),
    }
    .map_err(|e| e.rejected("Failed to create job"))?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<JobInput>, JsonRejection>,
) -> Result<Json<JobEntry>> {
    let job = match body(payload) {
        Ok(input) => state.jobs.update(&id, input).await,
        Err(e) => Err(e),
    }
    .map_err(|e| e.rejected("Failed to update job"))?;
    Ok(Json(job))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state
        .jobs
        .remove(&id)
        .await
        .map_err(|e| e.rejected("Failed to delete job"))?;
    Ok(StatusCode::NO_CONTENT)
}
