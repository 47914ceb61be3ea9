use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use common::ProjectPnlDto;
use compute::projects::project_pnl;
use model::MoneyRecord;
use model::categories::ProjectStatus;
use model::entities::{entrepreneurship_project, project_financial_record};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

use crate::helpers::converters::pnl_to_dto;
use crate::helpers::errors::{compute_error, database_error, invalid_input, not_found, ApiError};
use crate::schemas::{ApiResponse, AppState};

/// Request body for starting a project
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    /// `active` (default), `completed` or `paused`
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl From<entrepreneurship_project::Model> for ProjectResponse {
    fn from(model: entrepreneurship_project::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            start_date: model.start_date,
            status: model.status.as_str().to_string(),
            created_at: model.created_at,
        }
    }
}

fn parse_status(status: &str) -> Result<ProjectStatus, ApiError> {
    status.parse().map_err(|err| invalid_input(format!("{}", err)))
}

/// Loads a project only if it belongs to the current owner.
pub(crate) async fn find_owned_project(
    state: &AppState,
    project_id: i32,
) -> Result<entrepreneurship_project::Model, ApiError> {
    entrepreneurship_project::Entity::find_by_id(project_id)
        .filter(entrepreneurship_project::Column::OwnerId.eq(state.owner_id))
        .one(&state.db)
        .await
        .map_err(|err| database_error("Failed to load project", err))?
        .ok_or_else(|| not_found("Project", project_id))
}

/// List projects, most recently started first
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "projects",
    responses(
        (status = 200, description = "Projects retrieved successfully", body = ApiResponse<Vec<ProjectResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProjectResponse>>>, ApiError> {
    trace!("Entering list_projects function");
    let projects = entrepreneurship_project::Entity::find()
        .filter(entrepreneurship_project::Column::OwnerId.eq(state.owner_id))
        .order_by_desc(entrepreneurship_project::Column::StartDate)
        .order_by_desc(entrepreneurship_project::Column::Id)
        .all(&state.db)
        .await
        .map_err(|err| database_error("Failed to retrieve projects", err))?;

    info!("Retrieved {} projects", projects.len());
    Ok(Json(ApiResponse::ok(
        projects.into_iter().map(ProjectResponse::from).collect(),
        "Projects retrieved successfully",
    )))
}

/// Get a single project
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}",
    tag = "projects",
    params(("project_id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project retrieved successfully", body = ApiResponse<ProjectResponse>),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_project(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    trace!("Entering get_project function for project_id: {}", project_id);
    let project = find_owned_project(&state, project_id).await?;
    Ok(Json(ApiResponse::ok(
        ProjectResponse::from(project),
        "Project retrieved successfully",
    )))
}

/// Start a project
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    tag = "projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created successfully", body = ApiResponse<ProjectResponse>),
        (status = 400, description = "Invalid name or status", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_project(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateProjectRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<ProjectResponse>>), ApiError> {
    trace!("Entering create_project function");
    debug!("Creating project '{}' starting {}", request.name, request.start_date);

    let status = match request.status.as_deref() {
        Some(status) => parse_status(status)?,
        None => ProjectStatus::Active,
    };

    let project = entrepreneurship_project::ActiveModel {
        owner_id: Set(state.owner_id),
        name: Set(request.name),
        description: Set(request.description),
        start_date: Set(request.start_date),
        status: Set(status),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|err| database_error("Failed to create project", err))?;

    info!("Project created with ID: {}, name: {}", project.id, project.name);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            ProjectResponse::from(project),
            "Project created successfully",
        )),
    ))
}

/// Update a project
#[utoipa::path(
    put,
    path = "/api/v1/projects/{project_id}",
    tag = "projects",
    params(("project_id" = i32, Path, description = "Project ID")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated successfully", body = ApiResponse<ProjectResponse>),
        (status = 400, description = "Invalid name or status", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_project(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateProjectRequest>>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    trace!("Entering update_project function for project_id: {}", project_id);
    let existing = find_owned_project(&state, project_id).await?;
    let status = request.status.as_deref().map(parse_status).transpose()?;

    let mut active: entrepreneurship_project::ActiveModel = existing.into();
    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(description) = request.description {
        active.description = Set(Some(description));
    }
    if let Some(start_date) = request.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(status) = status {
        active.status = Set(status);
    }

    let project = active
        .update(&state.db)
        .await
        .map_err(|err| database_error("Failed to update project", err))?;

    info!("Project {} updated", project.id);
    Ok(Json(ApiResponse::ok(
        ProjectResponse::from(project),
        "Project updated successfully",
    )))
}

/// Delete a project together with its ledger
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}",
    tag = "projects",
    params(("project_id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project and its records deleted", body = ApiResponse<String>),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_project(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_project function for project_id: {}", project_id);
    let project = find_owned_project(&state, project_id).await?;

    // Ledger rows go in the same transaction; SQLite only cascades with
    // foreign keys switched on.
    let txn = state
        .db
        .begin()
        .await
        .map_err(|err| database_error("Failed to start transaction", err))?;
    let removed = project_financial_record::Entity::delete_many()
        .filter(project_financial_record::Column::ProjectId.eq(project.id))
        .exec(&txn)
        .await
        .map_err(|err| database_error("Failed to delete project records", err))?;
    project
        .delete(&txn)
        .await
        .map_err(|err| database_error("Failed to delete project", err))?;
    txn.commit()
        .await
        .map_err(|err| database_error("Failed to commit project deletion", err))?;

    info!(
        "Project {} deleted with {} ledger records",
        project_id, removed.rows_affected
    );
    Ok(Json(ApiResponse::ok(
        format!("Project {} deleted", project_id),
        "Project deleted successfully",
    )))
}

/// Plan-vs-actual income statement of a project
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/pnl",
    tag = "projects",
    params(("project_id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Profit and loss computed", body = ApiResponse<ProjectPnlDto>),
        (status = 400, description = "Ledger totals out of range", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_project_pnl(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProjectPnlDto>>, ApiError> {
    trace!("Entering get_project_pnl function for project_id: {}", project_id);
    let project = find_owned_project(&state, project_id).await?;
    let records: Vec<MoneyRecord> = project
        .find_related(project_financial_record::Entity)
        .all(&state.db)
        .await
        .map_err(|err| database_error("Failed to load project records", err))?
        .iter()
        .map(MoneyRecord::from)
        .collect();
    debug!("Computing P&L over {} records", records.len());

    let pnl = project_pnl(&records).map_err(compute_error)?;
    info!(
        "Project {} actual profit {} against planned {}",
        project.id, pnl.actual.profit, pnl.planned.profit
    );
    Ok(Json(ApiResponse::ok(
        pnl_to_dto(project.id, project.name, pnl),
        "Project P&L computed successfully",
    )))
}
