use axum::{extract::State, response::Json};
use common::{LoanAssessmentDto, ScheduleEntryDto};
use compute::loan::{amortization_schedule, compute_loan, LoanInput};
use compute::money::{parse_amount_for, parse_rate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

use crate::helpers::converters::{loan_to_dto, schedule_to_dto};
use crate::helpers::errors::{compute_error, invalid_input, ApiError};
use crate::schemas::{ApiResponse, AppState};

/// Loan parameters. Amounts are decimal strings, like every other amount
/// the API accepts.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoanRequest {
    /// Purchase price
    #[schema(example = "8000000")]
    pub loan_amount: String,
    #[schema(example = "2000000")]
    pub down_payment: String,
    /// At most 100 years
    #[schema(example = 30)]
    pub loan_term_years: i32,
    /// Annual rate in percent, e.g. `2.1`
    #[schema(example = "2.1")]
    pub annual_interest_rate: String,
    /// Gross monthly income; the configured default is used when omitted
    #[schema(example = "90000")]
    pub monthly_income: Option<String>,
}

const MAX_TERM_YEARS: i32 = 100;

impl LoanRequest {
    fn input(&self) -> Result<LoanInput, ApiError> {
        if self.loan_term_years > MAX_TERM_YEARS {
            return Err(invalid_input(format!(
                "loan_term_years must be at most {}",
                MAX_TERM_YEARS
            )));
        }
        Ok(LoanInput {
            loan_amount: parse_amount_for("loan_amount", &self.loan_amount)
                .map_err(compute_error)?,
            down_payment: parse_amount_for("down_payment", &self.down_payment)
                .map_err(compute_error)?,
            loan_term_years: self.loan_term_years,
            annual_interest_rate: parse_rate(&self.annual_interest_rate).map_err(compute_error)?,
        })
    }
}

/// Monthly payment and affordability of a mortgage
#[utoipa::path(
    post,
    path = "/api/v1/loan/assessment",
    tag = "loan",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Loan assessed", body = ApiResponse<LoanAssessmentDto>),
        (status = 400, description = "Invalid loan parameters", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn assess_loan(
    State(state): State<AppState>,
    Json(request): Json<LoanRequest>,
) -> Result<Json<ApiResponse<LoanAssessmentDto>>, ApiError> {
    trace!("Entering assess_loan function");
    let input = request.input()?;
    let monthly_income = match request.monthly_income.as_deref() {
        Some(raw) => parse_amount_for("monthly_income", raw).map_err(compute_error)?,
        None => state.settings.default_monthly_income,
    };
    debug!("Assessing {:?} against monthly income {}", input, monthly_income);

    let result = compute_loan(&input, monthly_income).map_err(compute_error)?;
    info!(
        "Monthly payment {} is {}% of income, affordable: {}",
        result.monthly_payment, result.mortgage_ratio, result.is_affordable
    );
    Ok(Json(ApiResponse::ok(
        loan_to_dto(result, monthly_income),
        "Loan assessed successfully",
    )))
}

/// Month-by-month amortization table
#[utoipa::path(
    post,
    path = "/api/v1/loan/schedule",
    tag = "loan",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Schedule computed", body = ApiResponse<Vec<ScheduleEntryDto>>),
        (status = 400, description = "Invalid loan parameters", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_loan_schedule(
    Json(request): Json<LoanRequest>,
) -> Result<Json<ApiResponse<Vec<ScheduleEntryDto>>>, ApiError> {
    trace!("Entering get_loan_schedule function");
    let schedule = amortization_schedule(&request.input()?).map_err(compute_error)?;
    info!("Computed {} scheduled payments", schedule.len());
    Ok(Json(ApiResponse::ok(
        schedule_to_dto(schedule),
        "Schedule computed successfully",
    )))
}
