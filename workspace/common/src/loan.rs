use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result of a loan affordability check, amounts rounded to cents and
/// ratios to hundredths of a percent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LoanAssessmentDto {
    pub principal: Decimal,
    pub number_of_payments: u32,
    pub monthly_payment: Decimal,
    pub principal_payment: Decimal,
    pub interest_payment: Decimal,
    pub total_payment: Decimal,
    pub total_interest: Decimal,
    pub monthly_income: Decimal,
    pub debt_ratio: Decimal,
    pub mortgage_ratio: Decimal,
    pub is_affordable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ScheduleEntryDto {
    pub period: u32,
    pub payment: Decimal,
    pub principal: Decimal,
    pub interest: Decimal,
    pub remaining_balance: Decimal,
}
