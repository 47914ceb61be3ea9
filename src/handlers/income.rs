use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use compute::money::parse_amount;
use model::categories::{IncomeCategory, IncomeType};
use model::entities::income_record;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

use super::{period_condition, record_filter};
use crate::helpers::errors::{compute_error, database_error, invalid_input, not_found, ApiError};
use crate::schemas::{ApiResponse, AppState, DateRangeQuery};

/// Request body for recording income
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateIncomeRequest {
    /// `salary`, `investment` or `business`
    pub income_type: String,
    /// Category key valid under `income_type`, e.g. `bonus` for salary
    pub category: String,
    /// Non-negative decimal amount, thousands separators allowed
    pub amount: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub notes: Option<String>,
    /// Planned (forecast) entry, defaults to false
    pub is_planned: Option<bool>,
}

/// Request body for updating income; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateIncomeRequest {
    pub income_type: Option<String>,
    pub category: Option<String>,
    pub amount: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub is_planned: Option<bool>,
}

/// Income record response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IncomeResponse {
    pub id: i32,
    pub income_type: String,
    pub income_type_label: String,
    pub category: String,
    pub category_label: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub is_planned: bool,
    pub created_at: NaiveDateTime,
}

impl From<income_record::Model> for IncomeResponse {
    fn from(model: income_record::Model) -> Self {
        let income_type = model.income_type.as_str();
        Self {
            id: model.id,
            income_type: income_type.to_string(),
            income_type_label: common::labels::income_type_label(income_type).to_string(),
            category_label: common::labels::income_category_label(income_type, &model.category)
                .to_string(),
            category: model.category,
            amount: model.amount,
            date: model.date,
            description: model.description,
            notes: model.notes,
            is_planned: model.is_planned,
            created_at: model.created_at,
        }
    }
}

fn parse_category(income_type: &str, category: &str) -> Result<IncomeCategory, ApiError> {
    let income_type: IncomeType = income_type
        .parse()
        .map_err(|err| invalid_input(format!("{}", err)))?;
    IncomeCategory::parse(income_type, category).map_err(|err| invalid_input(format!("{}", err)))
}

async fn find_owned(state: &AppState, income_id: i32) -> Result<income_record::Model, ApiError> {
    income_record::Entity::find_by_id(income_id)
        .filter(income_record::Column::OwnerId.eq(state.owner_id))
        .one(&state.db)
        .await
        .map_err(|err| database_error("Failed to load income record", err))?
        .ok_or_else(|| not_found("Income record", income_id))
}

/// List income records, newest first
#[utoipa::path(
    get,
    path = "/api/v1/income",
    tag = "income",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Income records retrieved successfully", body = ApiResponse<Vec<IncomeResponse>>),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_income(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<IncomeResponse>>>, ApiError> {
    trace!("Entering list_income function");
    let filter = record_filter(&query)?;
    debug!("Listing income for owner {} with filter {:?}", state.owner_id, filter);

    let records = income_record::Entity::find()
        .filter(income_record::Column::OwnerId.eq(state.owner_id))
        .filter(period_condition(
            &filter,
            income_record::Column::Date,
            income_record::Column::IsPlanned,
        ))
        .order_by_desc(income_record::Column::Date)
        .order_by_desc(income_record::Column::Id)
        .all(&state.db)
        .await
        .map_err(|err| database_error("Failed to retrieve income records", err))?;

    info!("Retrieved {} income records", records.len());
    Ok(Json(ApiResponse::ok(
        records.into_iter().map(IncomeResponse::from).collect(),
        "Income records retrieved successfully",
    )))
}

/// Get a single income record
#[utoipa::path(
    get,
    path = "/api/v1/income/{income_id}",
    tag = "income",
    params(("income_id" = i32, Path, description = "Income record ID")),
    responses(
        (status = 200, description = "Income record retrieved successfully", body = ApiResponse<IncomeResponse>),
        (status = 404, description = "Income record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_income(
    Path(income_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<IncomeResponse>>, ApiError> {
    trace!("Entering get_income function for income_id: {}", income_id);
    let record = find_owned(&state, income_id).await?;
    info!("Retrieved income record {}", record.id);
    Ok(Json(ApiResponse::ok(
        IncomeResponse::from(record),
        "Income record retrieved successfully",
    )))
}

/// Record new income
#[utoipa::path(
    post,
    path = "/api/v1/income",
    tag = "income",
    request_body = CreateIncomeRequest,
    responses(
        (status = 201, description = "Income record created successfully", body = ApiResponse<IncomeResponse>),
        (status = 400, description = "Unknown category or invalid amount", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_income(
    State(state): State<AppState>,
    Json(request): Json<CreateIncomeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IncomeResponse>>), ApiError> {
    trace!("Entering create_income function");
    debug!(
        "Creating {} income '{}' of {} on {}",
        request.income_type, request.category, request.amount, request.date
    );

    let category = parse_category(&request.income_type, &request.category)?;
    let amount = parse_amount(&request.amount).map_err(compute_error)?;

    let record = income_record::ActiveModel {
        owner_id: Set(state.owner_id),
        income_type: Set(category.income_type()),
        category: Set(category.as_str().to_string()),
        amount: Set(amount),
        date: Set(request.date),
        description: Set(request.description),
        notes: Set(request.notes),
        is_planned: Set(request.is_planned.unwrap_or(false)),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|err| database_error("Failed to create income record", err))?;

    info!("Income record created with ID: {}", record.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            IncomeResponse::from(record),
            "Income record created successfully",
        )),
    ))
}

/// Update an income record
#[utoipa::path(
    put,
    path = "/api/v1/income/{income_id}",
    tag = "income",
    params(("income_id" = i32, Path, description = "Income record ID")),
    request_body = UpdateIncomeRequest,
    responses(
        (status = 200, description = "Income record updated successfully", body = ApiResponse<IncomeResponse>),
        (status = 400, description = "Unknown category or invalid amount", body = ErrorResponse),
        (status = 404, description = "Income record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_income(
    Path(income_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateIncomeRequest>,
) -> Result<Json<ApiResponse<IncomeResponse>>, ApiError> {
    trace!("Entering update_income function for income_id: {}", income_id);
    let existing = find_owned(&state, income_id).await?;

    // type and category are checked as a pair, falling back to stored values
    let income_type = request
        .income_type
        .as_deref()
        .unwrap_or(existing.income_type.as_str());
    let category = request.category.as_deref().unwrap_or(&existing.category);
    let category = parse_category(income_type, category)?;
    let amount = request
        .amount
        .as_deref()
        .map(parse_amount)
        .transpose()
        .map_err(compute_error)?;

    let mut active: income_record::ActiveModel = existing.into();
    active.income_type = Set(category.income_type());
    active.category = Set(category.as_str().to_string());
    if let Some(amount) = amount {
        active.amount = Set(amount);
    }
    if let Some(date) = request.date {
        active.date = Set(date);
    }
    if let Some(description) = request.description {
        active.description = Set(Some(description));
    }
    if let Some(notes) = request.notes {
        active.notes = Set(Some(notes));
    }
    if let Some(is_planned) = request.is_planned {
        active.is_planned = Set(is_planned);
    }

    let record = active
        .update(&state.db)
        .await
        .map_err(|err| database_error("Failed to update income record", err))?;

    info!("Income record {} updated", record.id);
    Ok(Json(ApiResponse::ok(
        IncomeResponse::from(record),
        "Income record updated successfully",
    )))
}

/// Delete an income record
#[utoipa::path(
    delete,
    path = "/api/v1/income/{income_id}",
    tag = "income",
    params(("income_id" = i32, Path, description = "Income record ID")),
    responses(
        (status = 200, description = "Income record deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Income record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_income(
    Path(income_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_income function for income_id: {}", income_id);
    let existing = find_owned(&state, income_id).await?;
    existing
        .delete(&state.db)
        .await
        .map_err(|err| database_error("Failed to delete income record", err))?;

    info!("Income record {} deleted", income_id);
    Ok(Json(ApiResponse::ok(
        format!("Income record {} deleted", income_id),
        "Income record deleted successfully",
    )))
}
