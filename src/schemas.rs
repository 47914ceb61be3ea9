use chrono::NaiveDate;
use common::{
    AccountLineDto, BudgetProgressDto, CategoryCatalog, CategoryGroup, CategoryLabel,
    CategoryTotalDto, DateRange, FinancialSummaryDto, LoanAssessmentDto, MonthlyCashFlowDto,
    MonthlyTotalsDto, PnlTotalsDto, ProjectPnlDto, ScheduleEntryDto,
};
use compute::aggregate::RecordFilter;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::config::Settings;
use crate::handlers::{
    budgets::{BudgetResponse, CreateBudgetRequest, UpdateBudgetRequest},
    expenses::{CreateExpenseRequest, ExpenseResponse, UpdateExpenseRequest},
    income::{CreateIncomeRequest, IncomeResponse, UpdateIncomeRequest},
    loan::LoanRequest,
    project_records::{
        CreateProjectRecordRequest, ProjectRecordResponse, UpdateProjectRecordRequest,
    },
    projects::{CreateProjectRequest, ProjectResponse, UpdateProjectRequest},
};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// The user every record belongs to
    pub owner_id: i32,
    pub settings: Settings,
}

/// Date window and planned/actual filter shared by list and analysis
/// endpoints. Both bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// First day to include (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Last day to include (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
    /// Only planned (`true`) or only actual (`false`) records
    pub is_planned: Option<bool>,
}

/// Query parameters for budget progress
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BudgetProgressQuery {
    /// Single expense category; every category when omitted
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRangeQuery {
    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            start_date: self.start_date,
            end_date: self.end_date,
            is_planned: self.is_planned,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

impl BudgetProgressQuery {
    /// Budget progress counts planned and actual spending alike.
    pub fn window(&self) -> DateRangeQuery {
        DateRangeQuery {
            start_date: self.start_date,
            end_date: self.end_date,
            is_planned: None,
        }
    }
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Stable error code, e.g. `INVALID_INPUT` or `DATABASE_ERROR`
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::income::list_income,
        crate::handlers::income::get_income,
        crate::handlers::income::create_income,
        crate::handlers::income::update_income,
        crate::handlers::income::delete_income,
        crate::handlers::expenses::list_expenses,
        crate::handlers::expenses::get_expense,
        crate::handlers::expenses::create_expense,
        crate::handlers::expenses::update_expense,
        crate::handlers::expenses::delete_expense,
        crate::handlers::budgets::list_budgets,
        crate::handlers::budgets::create_budget,
        crate::handlers::budgets::update_budget,
        crate::handlers::budgets::delete_budget,
        crate::handlers::projects::list_projects,
        crate::handlers::projects::get_project,
        crate::handlers::projects::create_project,
        crate::handlers::projects::update_project,
        crate::handlers::projects::delete_project,
        crate::handlers::projects::get_project_pnl,
        crate::handlers::project_records::list_project_records,
        crate::handlers::project_records::create_project_record,
        crate::handlers::project_records::update_project_record,
        crate::handlers::project_records::delete_project_record,
        crate::handlers::analysis::get_summary,
        crate::handlers::analysis::get_expenses_by_category,
        crate::handlers::analysis::get_income_by_type,
        crate::handlers::analysis::get_income_by_month,
        crate::handlers::analysis::get_monthly_trend,
        crate::handlers::analysis::get_budget_progress,
        crate::handlers::loan::assess_loan,
        crate::handlers::loan::get_loan_schedule,
        crate::handlers::categories::get_categories,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            DateRangeQuery,
            BudgetProgressQuery,
            CreateIncomeRequest,
            UpdateIncomeRequest,
            IncomeResponse,
            CreateExpenseRequest,
            UpdateExpenseRequest,
            ExpenseResponse,
            CreateBudgetRequest,
            UpdateBudgetRequest,
            BudgetResponse,
            CreateProjectRequest,
            UpdateProjectRequest,
            ProjectResponse,
            CreateProjectRecordRequest,
            UpdateProjectRecordRequest,
            ProjectRecordResponse,
            LoanRequest,
            DateRange,
            FinancialSummaryDto,
            CategoryTotalDto,
            MonthlyTotalsDto,
            MonthlyCashFlowDto,
            BudgetProgressDto,
            LoanAssessmentDto,
            ScheduleEntryDto,
            ProjectPnlDto,
            PnlTotalsDto,
            AccountLineDto,
            CategoryCatalog,
            CategoryGroup,
            CategoryLabel,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "income", description = "Income records"),
        (name = "expenses", description = "Expense records"),
        (name = "budgets", description = "Budgets per expense category"),
        (name = "projects", description = "Entrepreneurship projects and their ledgers"),
        (name = "analysis", description = "Totals, trends and budget progress"),
        (name = "loan", description = "Loan affordability calculator"),
        (name = "categories", description = "Category labels and icons"),
    ),
    info(
        title = "fintrack API",
        description = "Personal and small-business finance tracker: income, expenses, budgets, side projects and loan affordability",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
