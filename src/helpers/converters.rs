//! Conversions from compute results to the transport DTOs in `common`.
//!
//! Money is rounded to cents and percentages to hundredths here, at the
//! edge; the compute layer itself keeps full precision.

use common::labels::{expense_label, income_type_label, project_account_label};
use common::{
    AccountLineDto, BudgetProgressDto, CategoryTotalDto, DateRange, FinancialSummaryDto,
    LoanAssessmentDto, MonthlyCashFlowDto, MonthlyTotalsDto, PnlTotalsDto, ProjectPnlDto,
    ScheduleEntryDto,
};
use compute::aggregate::{
    BudgetProgress, CategoryTotal, FinancialSummary, MonthlyCashFlow, MonthlyTotals,
};
use compute::loan::{LoanResult, ScheduleEntry};
use compute::projects::{PnlTotals, ProjectPnl};
use rust_decimal::{Decimal, RoundingStrategy};

fn cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn category_total(total: CategoryTotal, label: impl Fn(&str) -> &str) -> CategoryTotalDto {
    CategoryTotalDto {
        label: label(&total.category).to_string(),
        category: total.category,
        total: cents(total.total),
    }
}

pub fn summary_to_dto(summary: FinancialSummary, period: DateRange) -> FinancialSummaryDto {
    FinancialSummaryDto {
        total_income: cents(summary.total_income),
        total_expenses: cents(summary.total_expenses),
        net_income: cents(summary.net_income),
        savings_rate: cents(summary.savings_rate),
        period,
    }
}

pub fn expense_totals_to_dto(totals: Vec<CategoryTotal>) -> Vec<CategoryTotalDto> {
    totals
        .into_iter()
        .map(|t| category_total(t, expense_label))
        .collect()
}

pub fn income_type_totals_to_dto(totals: Vec<CategoryTotal>) -> Vec<CategoryTotalDto> {
    totals
        .into_iter()
        .map(|t| category_total(t, income_type_label))
        .collect()
}

pub fn monthly_totals_to_dto(months: Vec<MonthlyTotals>) -> Vec<MonthlyTotalsDto> {
    months
        .into_iter()
        .map(|m| MonthlyTotalsDto {
            month: m.month,
            total: cents(m.total),
            by_type: income_type_totals_to_dto(m.by_type),
        })
        .collect()
}

pub fn cash_flow_to_dto(flow: Vec<MonthlyCashFlow>) -> Vec<MonthlyCashFlowDto> {
    flow.into_iter()
        .map(|m| MonthlyCashFlowDto {
            month: m.month,
            income: cents(m.income),
            expenses: cents(m.expenses),
            net_income: cents(m.net_income),
        })
        .collect()
}

pub fn budget_progress_to_dto(progress: BudgetProgress) -> BudgetProgressDto {
    BudgetProgressDto {
        label: expense_label(&progress.category).to_string(),
        category: progress.category,
        total: cents(progress.total),
        budget_amount: cents(progress.budget_amount),
        remaining: cents(progress.remaining),
        percent_used: cents(progress.percent_used),
        transaction_count: progress.transaction_count,
        overspent: progress.overspent,
    }
}

pub fn loan_to_dto(result: LoanResult, monthly_income: Decimal) -> LoanAssessmentDto {
    LoanAssessmentDto {
        principal: cents(result.principal),
        number_of_payments: result.number_of_payments,
        monthly_payment: cents(result.monthly_payment),
        principal_payment: cents(result.principal_payment),
        interest_payment: cents(result.interest_payment),
        total_payment: cents(result.total_payment),
        total_interest: cents(result.total_interest),
        monthly_income: cents(monthly_income),
        debt_ratio: cents(result.debt_ratio),
        mortgage_ratio: cents(result.mortgage_ratio),
        is_affordable: result.is_affordable,
    }
}

pub fn schedule_to_dto(schedule: Vec<ScheduleEntry>) -> Vec<ScheduleEntryDto> {
    schedule
        .into_iter()
        .map(|e| ScheduleEntryDto {
            period: e.period,
            payment: cents(e.payment),
            principal: cents(e.principal),
            interest: cents(e.interest),
            remaining_balance: cents(e.remaining_balance),
        })
        .collect()
}

fn pnl_totals_to_dto(totals: PnlTotals) -> PnlTotalsDto {
    PnlTotalsDto {
        revenue: cents(totals.revenue),
        expenses: cents(totals.expenses),
        profit: cents(totals.profit),
        margin: cents(totals.margin),
    }
}

pub fn pnl_to_dto(project_id: i32, project_name: String, pnl: ProjectPnl) -> ProjectPnlDto {
    ProjectPnlDto {
        project_id,
        project_name,
        planned: pnl_totals_to_dto(pnl.planned),
        actual: pnl_totals_to_dto(pnl.actual),
        variance: pnl_totals_to_dto(pnl.variance),
        lines: pnl
            .lines
            .into_iter()
            .map(|line| AccountLineDto {
                label: project_account_label(&line.category).to_string(),
                record_type: line.record_type,
                category: line.category,
                planned: cents(line.planned),
                actual: cents(line.actual),
                variance: cents(line.variance),
            })
            .collect(),
    }
}
