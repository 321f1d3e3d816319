use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    CriticalPath, DayPlan, ExportFormat, Goal, PlanError, PlanRequest, PlanStats, Planner, TaskId,
    TaskStatus, export,
};

/// Shared between handlers: the planner and the current plan, if one was generated.
#[derive(Clone)]
pub struct AppState {
    planner: Arc<Planner>,
    goal: Arc<RwLock<Option<Goal>>>,
}

impl AppState {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(planner),
            goal: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_goal(planner: Planner, goal: Goal) -> Self {
        Self {
            planner: Arc::new(planner),
            goal: Arc::new(RwLock::new(Some(goal))),
        }
    }

    fn current_goal(&self) -> Result<Goal, ApiError> {
        self.goal
            .read()
            .clone()
            .ok_or_else(|| ApiError::not_found("no plan has been generated yet"))
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Conflict(String),
    Invalid(String),
    Internal(String),
}

#[derive(Debug, Deserialize)]
struct StatusPayload {
    status: String,
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl From<PlanError> for ApiError {
    fn from(value: PlanError) -> Self {
        match value {
            PlanError::TaskNotFound(_) => ApiError::NotFound(value.to_string()),
            PlanError::CyclicDependency { .. } => ApiError::Conflict(value.to_string()),
            PlanError::GraphConstruction | PlanError::InvalidSchedule(_) => {
                ApiError::Internal(value.to_string())
            }
        }
    }
}

impl From<export::ExportError> for ApiError {
    fn from(value: export::ExportError) -> Self {
        ApiError::Internal(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, "conflict", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Internal(message) => {
                tracing::error!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/plans", post(create_plan))
        .route("/plan", get(get_plan))
        .route("/plan/days", get(get_days))
        .route("/plan/critical-path", get(get_critical_path))
        .route("/plan/stats", get(get_stats))
        .route("/plan/tasks/:id/status", put(update_task_status))
        .route("/plan/export/:format", get(export_plan))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, planner: Planner) -> std::io::Result<()> {
    let app = router(AppState::new(planner));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn create_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<(StatusCode, Json<Goal>), ApiError> {
    if request.goal.trim().is_empty() {
        return Err(ApiError::invalid("goal must not be empty"));
    }
    let goal = state.planner.generate(&request).await?;
    *state.goal.write() = Some(goal.clone());
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn get_plan(State(state): State<AppState>) -> Result<Json<Goal>, ApiError> {
    Ok(Json(state.current_goal()?))
}

async fn get_days(State(state): State<AppState>) -> Result<Json<Vec<DayPlan>>, ApiError> {
    Ok(Json(state.current_goal()?.day_plans()))
}

async fn get_critical_path(State(state): State<AppState>) -> Result<Json<CriticalPath>, ApiError> {
    Ok(Json(state.current_goal()?.critical_path))
}

async fn get_stats(State(state): State<AppState>) -> Result<Json<PlanStats>, ApiError> {
    Ok(Json(state.current_goal()?.stats()))
}

async fn update_task_status(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> Result<Json<Goal>, ApiError> {
    let task_id: TaskId = task_id
        .parse()
        .map_err(|err: crate::UnknownVariant| ApiError::invalid(err.to_string()))?;
    let status: TaskStatus = payload
        .status
        .parse()
        .map_err(|err: crate::UnknownVariant| ApiError::invalid(err.to_string()))?;

    let mut guard = state.goal.write();
    let current = guard
        .as_ref()
        .ok_or_else(|| ApiError::not_found("no plan has been generated yet"))?;
    let updated = current.with_task_status(task_id, status)?;
    *guard = Some(updated.clone());
    Ok(Json(updated))
}

async fn export_plan(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = format
        .parse()
        .map_err(|err: crate::UnknownVariant| ApiError::invalid(err.to_string()))?;
    let goal = state.current_goal()?;
    let body = export::render(&goal, format)?;
    let file_name: String = format
        .file_name(&goal.title)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    let disposition = format!("attachment; filename=\"{file_name}\"");
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
