//! Read-only analysis endpoints.
//!
//! Every handler loads the owner's records, narrows them with the request's
//! [`RecordFilter`] and hands them to the pure aggregators in
//! `compute::aggregate`.

use axum::{
    extract::{Query, State},
    response::Json,
};
use common::{
    BudgetProgressDto, CategoryTotalDto, FinancialSummaryDto, MonthlyCashFlowDto, MonthlyTotalsDto,
};
use compute::aggregate::{
    budget_progress, compute_summary, monthly_cash_flow, sum_by_category, sum_by_month,
    sum_by_type, BudgetLimit, RecordFilter,
};
use model::MoneyRecord;
use model::categories::ExpenseCategory;
use model::entities::{budget, expense_record, income_record};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, info, instrument, trace};

use super::expenses::parse_expense_category;
use super::record_filter;
use crate::helpers::converters::{
    budget_progress_to_dto, cash_flow_to_dto, expense_totals_to_dto, income_type_totals_to_dto,
    monthly_totals_to_dto, summary_to_dto,
};
use crate::helpers::errors::{compute_error, database_error, ApiError};
use crate::schemas::{ApiResponse, AppState, BudgetProgressQuery, DateRangeQuery};

async fn load_income(state: &AppState, filter: &RecordFilter) -> Result<Vec<MoneyRecord>, ApiError> {
    let records: Vec<MoneyRecord> = income_record::Entity::find()
        .filter(income_record::Column::OwnerId.eq(state.owner_id))
        .all(&state.db)
        .await
        .map_err(|err| database_error("Failed to load income records", err))?
        .iter()
        .map(MoneyRecord::from)
        .collect();
    let kept = filter.apply(&records);
    debug!("Kept {} of {} income records", kept.len(), records.len());
    Ok(kept)
}

async fn load_expenses(
    state: &AppState,
    filter: &RecordFilter,
) -> Result<Vec<MoneyRecord>, ApiError> {
    let records: Vec<MoneyRecord> = expense_record::Entity::find()
        .filter(expense_record::Column::OwnerId.eq(state.owner_id))
        .all(&state.db)
        .await
        .map_err(|err| database_error("Failed to load expense records", err))?
        .iter()
        .map(MoneyRecord::from)
        .collect();
    let kept = filter.apply(&records);
    debug!("Kept {} of {} expense records", kept.len(), records.len());
    Ok(kept)
}

/// Income, expenses, net income and savings rate for a period
#[utoipa::path(
    get,
    path = "/api/v1/analysis/summary",
    tag = "analysis",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Summary computed", body = ApiResponse<FinancialSummaryDto>),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<FinancialSummaryDto>>, ApiError> {
    trace!("Entering get_summary function");
    let filter = record_filter(&query)?;
    let income = load_income(&state, &filter).await?;
    let expenses = load_expenses(&state, &filter).await?;

    let summary = compute_summary(&income, &expenses).map_err(compute_error)?;
    info!(
        "Summary: income {}, expenses {}, net {}",
        summary.total_income, summary.total_expenses, summary.net_income
    );
    Ok(Json(ApiResponse::ok(
        summary_to_dto(summary, query.range()),
        "Summary computed successfully",
    )))
}

/// Expense totals per category
#[utoipa::path(
    get,
    path = "/api/v1/analysis/expenses-by-category",
    tag = "analysis",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Totals computed", body = ApiResponse<Vec<CategoryTotalDto>>),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_expenses_by_category(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryTotalDto>>>, ApiError> {
    trace!("Entering get_expenses_by_category function");
    let expenses = load_expenses(&state, &record_filter(&query)?).await?;
    let totals = sum_by_category(&expenses).map_err(compute_error)?;
    info!("Computed totals for {} expense categories", totals.len());
    Ok(Json(ApiResponse::ok(
        expense_totals_to_dto(totals),
        "Expense totals computed successfully",
    )))
}

/// Income totals per income type
#[utoipa::path(
    get,
    path = "/api/v1/analysis/income-by-type",
    tag = "analysis",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Totals computed", body = ApiResponse<Vec<CategoryTotalDto>>),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_income_by_type(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryTotalDto>>>, ApiError> {
    trace!("Entering get_income_by_type function");
    let income = load_income(&state, &record_filter(&query)?).await?;
    let totals = sum_by_type(&income).map_err(compute_error)?;
    info!("Computed totals for {} income types", totals.len());
    Ok(Json(ApiResponse::ok(
        income_type_totals_to_dto(totals),
        "Income totals computed successfully",
    )))
}

/// Income per calendar month, oldest month first
#[utoipa::path(
    get,
    path = "/api/v1/analysis/income-by-month",
    tag = "analysis",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Monthly totals computed", body = ApiResponse<Vec<MonthlyTotalsDto>>),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_income_by_month(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<MonthlyTotalsDto>>>, ApiError> {
    trace!("Entering get_income_by_month function");
    let income = load_income(&state, &record_filter(&query)?).await?;
    let months = sum_by_month(&income).map_err(compute_error)?;
    info!("Computed income for {} months", months.len());
    Ok(Json(ApiResponse::ok(
        monthly_totals_to_dto(months),
        "Monthly income computed successfully",
    )))
}

/// Income against expenses per calendar month
#[utoipa::path(
    get,
    path = "/api/v1/analysis/monthly-trend",
    tag = "analysis",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Monthly cash flow computed", body = ApiResponse<Vec<MonthlyCashFlowDto>>),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_monthly_trend(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<MonthlyCashFlowDto>>>, ApiError> {
    trace!("Entering get_monthly_trend function");
    let filter = record_filter(&query)?;
    let income = load_income(&state, &filter).await?;
    let expenses = load_expenses(&state, &filter).await?;
    let flow = monthly_cash_flow(&income, &expenses).map_err(compute_error)?;
    info!("Computed cash flow for {} months", flow.len());
    Ok(Json(ApiResponse::ok(
        cash_flow_to_dto(flow),
        "Monthly trend computed successfully",
    )))
}

/// Spending against budget, per expense category
#[utoipa::path(
    get,
    path = "/api/v1/analysis/budget-progress",
    tag = "analysis",
    params(BudgetProgressQuery),
    responses(
        (status = 200, description = "Budget progress computed", body = ApiResponse<Vec<BudgetProgressDto>>),
        (status = 400, description = "Unknown category or invalid date range", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_budget_progress(
    State(state): State<AppState>,
    Query(query): Query<BudgetProgressQuery>,
) -> Result<Json<ApiResponse<Vec<BudgetProgressDto>>>, ApiError> {
    trace!("Entering get_budget_progress function");
    let filter = record_filter(&query.window())?;
    let categories: Vec<ExpenseCategory> = match query.category.as_deref() {
        Some(category) => vec![parse_expense_category(category)?],
        None => ExpenseCategory::ALL.to_vec(),
    };

    let expenses = load_expenses(&state, &filter).await?;
    let budgets: Vec<BudgetLimit> = budget::Entity::find()
        .filter(budget::Column::OwnerId.eq(state.owner_id))
        .order_by_asc(budget::Column::Id)
        .all(&state.db)
        .await
        .map_err(|err| database_error("Failed to load budgets", err))?
        .iter()
        .map(BudgetLimit::from)
        .collect();
    debug!(
        "Checking {} categories against {} budgets",
        categories.len(),
        budgets.len()
    );

    let progress: Vec<BudgetProgressDto> = categories
        .iter()
        .map(|category| budget_progress(category.as_str(), &expenses, &budgets))
        .map(|progress| progress.map(budget_progress_to_dto))
        .collect::<Result<_, _>>()
        .map_err(compute_error)?;

    info!(
        "{} of {} categories over budget",
        progress.iter().filter(|p| p.overspent).count(),
        progress.len()
    );
    Ok(Json(ApiResponse::ok(
        progress,
        "Budget progress computed successfully",
    )))
}
