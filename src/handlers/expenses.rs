use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use common::labels::{expense_icon, expense_label};
use compute::money::parse_amount;
use model::categories::ExpenseCategory;
use model::entities::expense_record;
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

/// Request body for recording an expense
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateExpenseRequest {
    /// `living`, `loan`, `insurance`, `investment`, `entertainment` or `other`
    pub category: String,
    /// Non-negative decimal amount
    pub amount: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub is_planned: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateExpenseRequest {
    pub category: Option<String>,
    pub amount: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub is_planned: Option<bool>,
}

/// Expense record response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseResponse {
    pub id: i32,
    pub category: String,
    pub category_label: String,
    /// Font Awesome icon class for the category
    pub icon: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub is_planned: bool,
    pub created_at: NaiveDateTime,
}

impl From<expense_record::Model> for ExpenseResponse {
    fn from(model: expense_record::Model) -> Self {
        let category = model.category.as_str();
        Self {
            id: model.id,
            category: category.to_string(),
            category_label: expense_label(category).to_string(),
            icon: expense_icon(category).to_string(),
            amount: model.amount,
            date: model.date,
            description: model.description,
            notes: model.notes,
            is_planned: model.is_planned,
            created_at: model.created_at,
        }
    }
}

pub(crate) fn parse_expense_category(category: &str) -> Result<ExpenseCategory, ApiError> {
    category.parse().map_err(|err| invalid_input(format!("{}", err)))
}

async fn find_owned(state: &AppState, expense_id: i32) -> Result<expense_record::Model, ApiError> {
    expense_record::Entity::find_by_id(expense_id)
        .filter(expense_record::Column::OwnerId.eq(state.owner_id))
        .one(&state.db)
        .await
        .map_err(|err| database_error("Failed to load expense record", err))?
        .ok_or_else(|| not_found("Expense record", expense_id))
}

/// List expense records, newest first
#[utoipa::path(
    get,
    path = "/api/v1/expenses",
    tag = "expenses",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Expense records retrieved successfully", body = ApiResponse<Vec<ExpenseResponse>>),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<ExpenseResponse>>>, ApiError> {
    trace!("Entering list_expenses function");
    let filter = record_filter(&query)?;
    debug!("Listing expenses for owner {} with filter {:?}", state.owner_id, filter);

    let records = expense_record::Entity::find()
        .filter(expense_record::Column::OwnerId.eq(state.owner_id))
        .filter(period_condition(
            &filter,
            expense_record::Column::Date,
            expense_record::Column::IsPlanned,
        ))
        .order_by_desc(expense_record::Column::Date)
        .order_by_desc(expense_record::Column::Id)
        .all(&state.db)
        .await
        .map_err(|err| database_error("Failed to retrieve expense records", err))?;

    info!("Retrieved {} expense records", records.len());
    Ok(Json(ApiResponse::ok(
        records.into_iter().map(ExpenseResponse::from).collect(),
        "Expense records retrieved successfully",
    )))
}

/// Get a single expense record
#[utoipa::path(
    get,
    path = "/api/v1/expenses/{expense_id}",
    tag = "expenses",
    params(("expense_id" = i32, Path, description = "Expense record ID")),
    responses(
        (status = 200, description = "Expense record retrieved successfully", body = ApiResponse<ExpenseResponse>),
        (status = 404, description = "Expense record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_expense(
    Path(expense_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ExpenseResponse>>, ApiError> {
    trace!("Entering get_expense function for expense_id: {}", expense_id);
    let record = find_owned(&state, expense_id).await?;
    Ok(Json(ApiResponse::ok(
        ExpenseResponse::from(record),
        "Expense record retrieved successfully",
    )))
}

/// Record a new expense
#[utoipa::path(
    post,
    path = "/api/v1/expenses",
    tag = "expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense record created successfully", body = ApiResponse<ExpenseResponse>),
        (status = 400, description = "Unknown category or invalid amount", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseResponse>>), ApiError> {
    trace!("Entering create_expense function");
    debug!(
        "Creating '{}' expense of {} on {}",
        request.category, request.amount, request.date
    );

    let category = parse_expense_category(&request.category)?;
    let amount = parse_amount(&request.amount).map_err(compute_error)?;

    let record = expense_record::ActiveModel {
        owner_id: Set(state.owner_id),
        category: Set(category),
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
    .map_err(|err| database_error("Failed to create expense record", err))?;

    info!("Expense record created with ID: {}", record.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            ExpenseResponse::from(record),
            "Expense record created successfully",
        )),
    ))
}

/// Update an expense record
#[utoipa::path(
    put,
    path = "/api/v1/expenses/{expense_id}",
    tag = "expenses",
    params(("expense_id" = i32, Path, description = "Expense record ID")),
    request_body = UpdateExpenseRequest,
    responses(
        (status = 200, description = "Expense record updated successfully", body = ApiResponse<ExpenseResponse>),
        (status = 400, description = "Unknown category or invalid amount", body = ErrorResponse),
        (status = 404, description = "Expense record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_expense(
    Path(expense_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<Json<ApiResponse<ExpenseResponse>>, ApiError> {
    trace!("Entering update_expense function for expense_id: {}", expense_id);
    let existing = find_owned(&state, expense_id).await?;

    let category = request
        .category
        .as_deref()
        .map(parse_expense_category)
        .transpose()?;
    let amount = request
        .amount
        .as_deref()
        .map(parse_amount)
        .transpose()
        .map_err(compute_error)?;

    let mut active: expense_record::ActiveModel = existing.into();
    if let Some(category) = category {
        active.category = Set(category);
    }
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
        .map_err(|err| database_error("Failed to update expense record", err))?;

    info!("Expense record {} updated", record.id);
    Ok(Json(ApiResponse::ok(
        ExpenseResponse::from(record),
        "Expense record updated successfully",
    )))
}

/// Delete an expense record
#[utoipa::path(
    delete,
    path = "/api/v1/expenses/{expense_id}",
    tag = "expenses",
    params(("expense_id" = i32, Path, description = "Expense record ID")),
    responses(
        (status = 200, description = "Expense record deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Expense record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_expense(
    Path(expense_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_expense function for expense_id: {}", expense_id);
    let existing = find_owned(&state, expense_id).await?;
    existing
        .delete(&state.db)
        .await
        .map_err(|err| database_error("Failed to delete expense record", err))?;

    info!("Expense record {} deleted", expense_id);
    Ok(Json(ApiResponse::ok(
        format!("Expense record {} deleted", expense_id),
        "Expense record deleted successfully",
    )))
}
