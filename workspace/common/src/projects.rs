use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PnlTotalsDto {
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub profit: Decimal,
    pub margin: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AccountLineDto {
    pub record_type: String,
    pub category: String,
    pub label: String,
    pub planned: Decimal,
    pub actual: Decimal,
    pub variance: Decimal,
}

/// Plan-vs-actual income statement of one project.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProjectPnlDto {
    pub project_id: i32,
    pub project_name: String,
    pub planned: PnlTotalsDto,
    pub actual: PnlTotalsDto,
    pub variance: PnlTotalsDto,
    pub lines: Vec<AccountLineDto>,
}
