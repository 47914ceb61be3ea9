use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDateTime, Utc};
use common::labels::expense_label;
use compute::money::parse_amount;
use model::categories::BudgetPeriod;
use model::entities::budget;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

use super::expenses::parse_expense_category;
use crate::helpers::errors::{compute_error, database_error, invalid_input, not_found, ApiError};
use crate::schemas::{ApiResponse, AppState};

/// Request body for setting a budget on an expense category
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateBudgetRequest {
    /// Expense category key
    pub category: String,
    /// Non-negative decimal amount
    pub amount: String,
    /// `monthly` (default) or `yearly`
    pub period: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateBudgetRequest {
    pub category: Option<String>,
    pub amount: Option<String>,
    pub period: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BudgetResponse {
    pub id: i32,
    pub category: String,
    pub category_label: String,
    pub amount: Decimal,
    pub period: String,
    pub created_at: NaiveDateTime,
}

impl From<budget::Model> for BudgetResponse {
    fn from(model: budget::Model) -> Self {
        Self {
            id: model.id,
            category: model.category.as_str().to_string(),
            category_label: expense_label(model.category.as_str()).to_string(),
            amount: model.amount,
            period: model.period.as_str().to_string(),
            created_at: model.created_at,
        }
    }
}

fn parse_period(period: &str) -> Result<BudgetPeriod, ApiError> {
    period.parse().map_err(|err| invalid_input(format!("{}", err)))
}

async fn find_owned(state: &AppState, budget_id: i32) -> Result<budget::Model, ApiError> {
    budget::Entity::find_by_id(budget_id)
        .filter(budget::Column::OwnerId.eq(state.owner_id))
        .one(&state.db)
        .await
        .map_err(|err| database_error("Failed to load budget", err))?
        .ok_or_else(|| not_found("Budget", budget_id))
}

/// List budgets in creation order
#[utoipa::path(
    get,
    path = "/api/v1/budgets",
    tag = "budgets",
    responses(
        (status = 200, description = "Budgets retrieved successfully", body = ApiResponse<Vec<BudgetResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_budgets(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BudgetResponse>>>, ApiError> {
    trace!("Entering list_budgets function");
    let budgets = budget::Entity::find()
        .filter(budget::Column::OwnerId.eq(state.owner_id))
        .order_by_asc(budget::Column::Id)
        .all(&state.db)
        .await
        .map_err(|err| database_error("Failed to retrieve budgets", err))?;

    info!("Retrieved {} budgets", budgets.len());
    Ok(Json(ApiResponse::ok(
        budgets.into_iter().map(BudgetResponse::from).collect(),
        "Budgets retrieved successfully",
    )))
}

/// Set a budget
#[utoipa::path(
    post,
    path = "/api/v1/budgets",
    tag = "budgets",
    request_body = CreateBudgetRequest,
    responses(
        (status = 201, description = "Budget created successfully", body = ApiResponse<BudgetResponse>),
        (status = 400, description = "Unknown category or period, or invalid amount", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_budget(
    State(state): State<AppState>,
    Json(request): Json<CreateBudgetRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BudgetResponse>>), ApiError> {
    trace!("Entering create_budget function");
    debug!("Creating budget of {} for '{}'", request.amount, request.category);

    let category = parse_expense_category(&request.category)?;
    let amount = parse_amount(&request.amount).map_err(compute_error)?;
    let period = match request.period.as_deref() {
        Some(period) => parse_period(period)?,
        None => BudgetPeriod::Monthly,
    };

    let budget = budget::ActiveModel {
        owner_id: Set(state.owner_id),
        category: Set(category),
        amount: Set(amount),
        period: Set(period),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|err| database_error("Failed to create budget", err))?;

    info!("Budget created with ID: {}", budget.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            BudgetResponse::from(budget),
            "Budget created successfully",
        )),
    ))
}

/// Update a budget
#[utoipa::path(
    put,
    path = "/api/v1/budgets/{budget_id}",
    tag = "budgets",
    params(("budget_id" = i32, Path, description = "Budget ID")),
    request_body = UpdateBudgetRequest,
    responses(
        (status = 200, description = "Budget updated successfully", body = ApiResponse<BudgetResponse>),
        (status = 400, description = "Unknown category or period, or invalid amount", body = ErrorResponse),
        (status = 404, description = "Budget not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_budget(
    Path(budget_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateBudgetRequest>,
) -> Result<Json<ApiResponse<BudgetResponse>>, ApiError> {
    trace!("Entering update_budget function for budget_id: {}", budget_id);
    let existing = find_owned(&state, budget_id).await?;

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
    let period = request.period.as_deref().map(parse_period).transpose()?;

    let mut active: budget::ActiveModel = existing.into();
    if let Some(category) = category {
        active.category = Set(category);
    }
    if let Some(amount) = amount {
        active.amount = Set(amount);
    }
    if let Some(period) = period {
        active.period = Set(period);
    }

    let budget = active
        .update(&state.db)
        .await
        .map_err(|err| database_error("Failed to update budget", err))?;

    info!("Budget {} updated", budget.id);
    Ok(Json(ApiResponse::ok(
        BudgetResponse::from(budget),
        "Budget updated successfully",
    )))
}

/// Delete a budget
#[utoipa::path(
    delete,
    path = "/api/v1/budgets/{budget_id}",
    tag = "budgets",
    params(("budget_id" = i32, Path, description = "Budget ID")),
    responses(
        (status = 200, description = "Budget deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Budget not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_budget(
    Path(budget_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_budget function for budget_id: {}", budget_id);
    find_owned(&state, budget_id)
        .await?
        .delete(&state.db)
        .await
        .map_err(|err| database_error("Failed to delete budget", err))?;

    info!("Budget {} deleted", budget_id);
    Ok(Json(ApiResponse::ok(
        format!("Budget {} deleted", budget_id),
        "Budget deleted successfully",
    )))
}
