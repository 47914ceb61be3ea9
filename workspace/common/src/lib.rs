//! Common transport-layer types.
//!
//! These are the JSON shapes of the computed views (analysis, loan
//! assessment, project P&L) and the static presentation tables a dashboard
//! needs to render them. They carry no behaviour beyond formatting.

mod analysis;
pub mod format;
pub mod labels;
mod loan;
mod projects;

pub use analysis::{
    BudgetProgressDto, CategoryTotalDto, DateRange, FinancialSummaryDto, MonthlyCashFlowDto,
    MonthlyTotalsDto,
};
pub use labels::{CategoryCatalog, CategoryGroup, CategoryLabel};
pub use loan::{LoanAssessmentDto, ScheduleEntryDto};
pub use projects::{AccountLineDto, PnlTotalsDto, ProjectPnlDto};
