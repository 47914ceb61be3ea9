use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inclusive date window a computed view was restricted to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FinancialSummaryDto {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_income: Decimal,
    /// Percent of income kept, zero without income.
    pub savings_rate: Decimal,
    pub period: DateRange,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryTotalDto {
    pub category: String,
    /// Display label of the category, the key itself when unknown.
    pub label: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthlyTotalsDto {
    /// `YYYY-MM`
    pub month: String,
    pub total: Decimal,
    pub by_type: Vec<CategoryTotalDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MonthlyCashFlowDto {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net_income: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BudgetProgressDto {
    pub category: String,
    pub label: String,
    pub total: Decimal,
    pub budget_amount: Decimal,
    pub remaining: Decimal,
    pub percent_used: Decimal,
    pub transaction_count: usize,
    pub overspent: bool,
}
