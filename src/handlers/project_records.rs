use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use common::labels::project_account_label;
use compute::money::parse_amount;
use model::categories::{ProjectAccount, ProjectRecordType};
use model::entities::{entrepreneurship_project, project_financial_record};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

use super::{period_condition, record_filter};
use super::projects::find_owned_project;
use crate::helpers::errors::{compute_error, database_error, invalid_input, not_found, ApiError};
use crate::schemas::{ApiResponse, AppState, DateRangeQuery};

/// Request body for adding a ledger line to a project
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateProjectRecordRequest {
    /// `revenue` or `expense`
    pub record_type: String,
    /// Account key valid under `record_type`, e.g. `sales_revenue`
    pub category: String,
    pub sub_category: Option<String>,
    pub amount: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub is_planned: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateProjectRecordRequest {
    pub record_type: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub is_planned: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectRecordResponse {
    pub id: i32,
    pub project_id: i32,
    pub record_type: String,
    pub category: String,
    pub category_label: String,
    pub sub_category: Option<String>,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub is_planned: bool,
    pub created_at: NaiveDateTime,
}

impl From<project_financial_record::Model> for ProjectRecordResponse {
    fn from(model: project_financial_record::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            record_type: model.record_type.as_str().to_string(),
            category_label: project_account_label(&model.category).to_string(),
            category: model.category,
            sub_category: model.sub_category,
            amount: model.amount,
            description: model.description,
            date: model.date,
            is_planned: model.is_planned,
            created_at: model.created_at,
        }
    }
}

fn parse_account(record_type: &str, category: &str) -> Result<ProjectAccount, ApiError> {
    let record_type: ProjectRecordType = record_type
        .parse()
        .map_err(|err| invalid_input(format!("{}", err)))?;
    ProjectAccount::parse(record_type, category).map_err(|err| invalid_input(format!("{}", err)))
}

/// Loads a ledger line whose project belongs to the current owner.
async fn find_owned_record(
    state: &AppState,
    record_id: i32,
) -> Result<project_financial_record::Model, ApiError> {
    project_financial_record::Entity::find_by_id(record_id)
        .inner_join(entrepreneurship_project::Entity)
        .filter(entrepreneurship_project::Column::OwnerId.eq(state.owner_id))
        .one(&state.db)
        .await
        .map_err(|err| database_error("Failed to load project record", err))?
        .ok_or_else(|| not_found("Project record", record_id))
}

/// List a project's ledger, newest first
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/records",
    tag = "projects",
    params(
        ("project_id" = i32, Path, description = "Project ID"),
        DateRangeQuery
    ),
    responses(
        (status = 200, description = "Project records retrieved successfully", body = ApiResponse<Vec<ProjectRecordResponse>>),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_project_records(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<ProjectRecordResponse>>>, ApiError> {
    trace!("Entering list_project_records function for project_id: {}", project_id);
    let filter = record_filter(&query)?;
    let project = find_owned_project(&state, project_id).await?;

    let records = project
        .find_related(project_financial_record::Entity)
        .filter(period_condition(
            &filter,
            project_financial_record::Column::Date,
            project_financial_record::Column::IsPlanned,
        ))
        .order_by_desc(project_financial_record::Column::Date)
        .order_by_desc(project_financial_record::Column::Id)
        .all(&state.db)
        .await
        .map_err(|err| database_error("Failed to retrieve project records", err))?;

    info!("Retrieved {} records of project {}", records.len(), project_id);
    Ok(Json(ApiResponse::ok(
        records.into_iter().map(ProjectRecordResponse::from).collect(),
        "Project records retrieved successfully",
    )))
}

/// Add a ledger line to a project
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/records",
    tag = "projects",
    params(("project_id" = i32, Path, description = "Project ID")),
    request_body = CreateProjectRecordRequest,
    responses(
        (status = 201, description = "Project record created successfully", body = ApiResponse<ProjectRecordResponse>),
        (status = 400, description = "Unknown account or invalid amount", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_project_record(
    Path(project_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRecordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProjectRecordResponse>>), ApiError> {
    trace!("Entering create_project_record function for project_id: {}", project_id);
    debug!(
        "Adding {} '{}' of {} to project {}",
        request.record_type, request.category, request.amount, project_id
    );

    let project = find_owned_project(&state, project_id).await?;
    let account = parse_account(&request.record_type, &request.category)?;
    let amount = parse_amount(&request.amount).map_err(compute_error)?;

    let record = project_financial_record::ActiveModel {
        project_id: Set(project.id),
        record_type: Set(account.record_type()),
        category: Set(account.as_str().to_string()),
        sub_category: Set(request.sub_category),
        amount: Set(amount),
        description: Set(request.description),
        date: Set(request.date),
        is_planned: Set(request.is_planned.unwrap_or(false)),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|err| database_error("Failed to create project record", err))?;

    info!("Project record created with ID: {}", record.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            ProjectRecordResponse::from(record),
            "Project record created successfully",
        )),
    ))
}

/// Update a ledger line
#[utoipa::path(
    put,
    path = "/api/v1/project-records/{record_id}",
    tag = "projects",
    params(("record_id" = i32, Path, description = "Project record ID")),
    request_body = UpdateProjectRecordRequest,
    responses(
        (status = 200, description = "Project record updated successfully", body = ApiResponse<ProjectRecordResponse>),
        (status = 400, description = "Unknown account or invalid amount", body = ErrorResponse),
        (status = 404, description = "Project record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_project_record(
    Path(record_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateProjectRecordRequest>,
) -> Result<Json<ApiResponse<ProjectRecordResponse>>, ApiError> {
    trace!("Entering update_project_record function for record_id: {}", record_id);
    let existing = find_owned_record(&state, record_id).await?;

    let record_type = request
        .record_type
        .as_deref()
        .unwrap_or(existing.record_type.as_str());
    let category = request.category.as_deref().unwrap_or(&existing.category);
    let account = parse_account(record_type, category)?;
    let amount = request
        .amount
        .as_deref()
        .map(parse_amount)
        .transpose()
        .map_err(compute_error)?;

    let mut active: project_financial_record::ActiveModel = existing.into();
    active.record_type = Set(account.record_type());
    active.category = Set(account.as_str().to_string());
    if let Some(sub_category) = request.sub_category {
        active.sub_category = Set(Some(sub_category));
    }
    if let Some(amount) = amount {
        active.amount = Set(amount);
    }
    if let Some(description) = request.description {
        active.description = Set(Some(description));
    }
    if let Some(date) = request.date {
        active.date = Set(date);
    }
    if let Some(is_planned) = request.is_planned {
        active.is_planned = Set(is_planned);
    }

    let record = active
        .update(&state.db)
        .await
        .map_err(|err| database_error("Failed to update project record", err))?;

    info!("Project record {} updated", record.id);
    Ok(Json(ApiResponse::ok(
        ProjectRecordResponse::from(record),
        "Project record updated successfully",
    )))
}

/// Delete a ledger line
#[utoipa::path(
    delete,
    path = "/api/v1/project-records/{record_id}",
    tag = "projects",
    params(("record_id" = i32, Path, description = "Project record ID")),
    responses(
        (status = 200, description = "Project record deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Project record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_project_record(
    Path(record_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_project_record function for record_id: {}", record_id);
    find_owned_record(&state, record_id)
        .await?
        .delete(&state.db)
        .await
        .map_err(|err| database_error("Failed to delete project record", err))?;

    info!("Project record {} deleted", record_id);
    Ok(Json(ApiResponse::ok(
        format!("Project record {} deleted", record_id),
        "Project record deleted successfully",
    )))
}
