use crate::handlers::{
    analysis::{
        get_budget_progress, get_expenses_by_category, get_income_by_month, get_income_by_type,
        get_monthly_trend, get_summary,
    },
    budgets::{create_budget, delete_budget, list_budgets, update_budget},
    categories::get_categories,
    expenses::{create_expense, delete_expense, get_expense, list_expenses, update_expense},
    health::health_check,
    income::{create_income, delete_income, get_income, list_income, update_income},
    loan::{assess_loan, get_loan_schedule},
    project_records::{
        create_project_record, delete_project_record, list_project_records,
        update_project_record,
    },
    projects::{
        create_project, delete_project, get_project, get_project_pnl, list_projects,
        update_project,
    },
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.settings.request_timeout_secs);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Income CRUD routes
        .route("/api/v1/income", get(list_income))
        .route("/api/v1/income", post(create_income))
        .route("/api/v1/income/:income_id", get(get_income))
        .route("/api/v1/income/:income_id", put(update_income))
        .route("/api/v1/income/:income_id", delete(delete_income))
        // Expense CRUD routes
        .route("/api/v1/expenses", get(list_expenses))
        .route("/api/v1/expenses", post(create_expense))
        .route("/api/v1/expenses/:expense_id", get(get_expense))
        .route("/api/v1/expenses/:expense_id", put(update_expense))
        .route("/api/v1/expenses/:expense_id", delete(delete_expense))
        // Budget routes
        .route("/api/v1/budgets", get(list_budgets))
        .route("/api/v1/budgets", post(create_budget))
        .route("/api/v1/budgets/:budget_id", put(update_budget))
        .route("/api/v1/budgets/:budget_id", delete(delete_budget))
        // Project routes and their ledgers
        .route("/api/v1/projects", get(list_projects))
        .route("/api/v1/projects", post(create_project))
        .route("/api/v1/projects/:project_id", get(get_project))
        .route("/api/v1/projects/:project_id", put(update_project))
        .route("/api/v1/projects/:project_id", delete(delete_project))
        .route("/api/v1/projects/:project_id/records", get(list_project_records))
        .route("/api/v1/projects/:project_id/records", post(create_project_record))
        .route("/api/v1/projects/:project_id/pnl", get(get_project_pnl))
        .route("/api/v1/project-records/:record_id", put(update_project_record))
        .route("/api/v1/project-records/:record_id", delete(delete_project_record))
        // Analysis
        .route("/api/v1/analysis/summary", get(get_summary))
        .route(
            "/api/v1/analysis/expenses-by-category",
            get(get_expenses_by_category),
        )
        .route("/api/v1/analysis/income-by-type", get(get_income_by_type))
        .route("/api/v1/analysis/income-by-month", get(get_income_by_month))
        .route("/api/v1/analysis/monthly-trend", get(get_monthly_trend))
        .route(
            "/api/v1/analysis/budget-progress",
            get(get_budget_progress),
        )
        // Loan calculator
        .route("/api/v1/loan/assessment", post(assess_loan))
        .route("/api/v1/loan/schedule", post(get_loan_schedule))
        // Category tables
        .route("/api/v1/categories", get(get_categories))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
