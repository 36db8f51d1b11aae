//! Handlers for the `/daily-reports` resource and its comments.
//!
//! Request bodies are shape-checked here; lifecycle rules, ownership and
//! reviewer scope are decided by [`reportflow_core::DailyReportWorkflow`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use reportflow_core::authorization::can_view_report;
use reportflow_core::comment::{Comment, CreateCommentInput};
use reportflow_core::error::CoreError;
use reportflow_core::report::{
    ApproveDailyReportInput, CreateDailyReportInput, DailyReport, RejectDailyReportInput,
    SubmitDailyReportInput, TaskInput, UpdateDailyReportInput,
};
use reportflow_core::search::DailyReportSearchCriteria;
use reportflow_core::summary::DailyReportSummary;
use reportflow_core::types::{CalendarDay, CommentId, DailyReportId, UserId};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /daily-reports`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportRequest {
    pub date: CalendarDay,
    #[validate(length(min = 1, message = "At least one task is required"))]
    pub tasks: Vec<TaskInput>,
    pub challenges: String,
    pub next_day_plan: String,
}

/// Request body for `PUT /daily-reports/{id}`. Omitted fields are kept.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReportRequest {
    #[validate(length(min = 1, message = "At least one task is required"))]
    pub tasks: Option<Vec<TaskInput>>,
    pub challenges: Option<String>,
    pub next_day_plan: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub feedback: Option<String>,
}

/// Blank feedback is rejected by the workflow, not here.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1))]
    pub content: String,
}

/// Query parameters for `GET /daily-reports/summary/{user_id}`.
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub date_from: Option<CalendarDay>,
    pub date_to: Option<CalendarDay>,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// POST /api/v1/daily-reports
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateReportRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<DailyReport>>)> {
    input.validate()?;

    let report = state
        .reports
        .create(CreateDailyReportInput {
            user_id: auth.user_id,
            date: input.date,
            tasks: input.tasks,
            challenges: input.challenges,
            next_day_plan: input.next_day_plan,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}

/// GET /api/v1/daily-reports
///
/// Filters are narrowed to what the caller may see; an employee only ever
/// gets their own reports.
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(criteria): Query<DailyReportSearchCriteria>,
) -> AppResult<Json<DataResponse<Vec<DailyReport>>>> {
    let reports = state.reports.search(&auth.user_id, criteria).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// GET /api/v1/daily-reports/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DailyReportId>,
) -> AppResult<Json<DataResponse<DailyReport>>> {
    let report = visible_report(&state, &auth, &id).await?;
    Ok(Json(DataResponse { data: report }))
}

/// PUT /api/v1/daily-reports/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DailyReportId>,
    Json(input): Json<UpdateReportRequest>,
) -> AppResult<Json<DataResponse<DailyReport>>> {
    input.validate()?;

    let report = state
        .reports
        .update(UpdateDailyReportInput {
            id,
            user_id: auth.user_id,
            tasks: input.tasks,
            challenges: input.challenges,
            next_day_plan: input.next_day_plan,
        })
        .await?;
    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/daily-reports/{id}/submit
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DailyReportId>,
) -> AppResult<Json<DataResponse<DailyReport>>> {
    let report = state
        .reports
        .submit(SubmitDailyReportInput {
            id,
            user_id: auth.user_id,
        })
        .await?;
    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/daily-reports/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    RequireManager(auth): RequireManager,
    Path(id): Path<DailyReportId>,
    Json(input): Json<ApproveRequest>,
) -> AppResult<Json<DataResponse<DailyReport>>> {
    let report = state
        .reports
        .approve(ApproveDailyReportInput {
            id,
            approver_id: auth.user_id,
            feedback: input.feedback,
        })
        .await?;
    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/daily-reports/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    RequireManager(auth): RequireManager,
    Path(id): Path<DailyReportId>,
    Json(input): Json<RejectRequest>,
) -> AppResult<Json<DataResponse<DailyReport>>> {
    let report = state
        .reports
        .reject(RejectDailyReportInput {
            id,
            rejector_id: auth.user_id,
            feedback: input.feedback,
        })
        .await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/daily-reports/summary/{user_id}?date_from=&date_to=
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<UserId>,
    Query(params): Query<SummaryParams>,
) -> AppResult<Json<DataResponse<DailyReportSummary>>> {
    let (Some(date_from), Some(date_to)) = (params.date_from, params.date_to) else {
        return Err(AppError::BadRequest(
            "date_from and date_to are required".into(),
        ));
    };

    let summary = state
        .reports
        .summary(&auth.user_id, &user_id, date_from, date_to)
        .await?;
    Ok(Json(DataResponse { data: summary }))
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// GET /api/v1/daily-reports/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DailyReportId>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    visible_report(&state, &auth, &id).await?;
    let comments = state.reports.list_comments(&id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/daily-reports/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DailyReportId>,
    Json(input): Json<CommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    input.validate()?;

    let comment = state
        .reports
        .create_comment(CreateCommentInput {
            daily_report_id: id,
            user_id: auth.user_id,
            content: input.content,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// PUT /api/v1/daily-reports/comments/{comment_id}/read
pub async fn mark_comment_read(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(comment_id): Path<CommentId>,
) -> AppResult<Json<DataResponse<Comment>>> {
    let comment = state.reports.mark_comment_read(&comment_id).await?;
    Ok(Json(DataResponse { data: comment }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a report the caller is allowed to read.
async fn visible_report(
    state: &AppState,
    auth: &AuthUser,
    id: &DailyReportId,
) -> AppResult<DailyReport> {
    let report = state.reports.get_report(id).await?;
    if !can_view_report(&report, &auth.user_id, auth.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to view this daily report".into(),
        )));
    }
    Ok(report)
}
