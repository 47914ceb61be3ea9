//! Plan-vs-actual income statement of an entrepreneurship project.

use std::collections::HashMap;

use model::MoneyRecord;
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use crate::error::{ComputeError, Result};
use crate::money::{checked_total, percent_of};

const REVENUE: &str = "revenue";
const EXPENSE: &str = "expense";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PnlTotals {
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub profit: Decimal,
    /// Profit as a percentage of revenue, zero without revenue.
    pub margin: Decimal,
}

impl PnlTotals {
    fn new(revenue: Decimal, expenses: Decimal) -> Result<Self> {
        let profit = revenue - expenses;
        let margin = if revenue > Decimal::ZERO {
            percent_of("margin", profit, revenue)?
        } else {
            Decimal::ZERO
        };
        Ok(Self {
            revenue,
            expenses,
            profit,
            margin,
        })
    }

    /// `self - earlier`, entry by entry.
    fn minus(&self, earlier: &PnlTotals) -> Result<Self> {
        let diff = |field: &'static str, a: Decimal, b: Decimal| {
            a.checked_sub(b)
                .ok_or_else(|| ComputeError::invalid_input(field, "variance overflows"))
        };
        Ok(Self {
            revenue: diff("revenue", self.revenue, earlier.revenue)?,
            expenses: diff("expenses", self.expenses, earlier.expenses)?,
            profit: diff("profit", self.profit, earlier.profit)?,
            margin: diff("margin", self.margin, earlier.margin)?,
        })
    }
}

/// Planned and actual amounts booked on one ledger account.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountLine {
    pub record_type: String,
    pub category: String,
    pub planned: Decimal,
    pub actual: Decimal,
    /// `actual - planned`
    pub variance: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPnl {
    pub planned: PnlTotals,
    pub actual: PnlTotals,
    /// Actual minus planned, per total (the margin entry is in percentage
    /// points).
    pub variance: PnlTotals,
    pub lines: Vec<AccountLine>,
}

/// Builds the P&L from a project's ledger records. The record kind must be
/// `revenue` or `expense`; anything else is skipped.
#[instrument(skip(records), fields(num_records = records.len()))]
pub fn project_pnl(records: &[MoneyRecord]) -> Result<ProjectPnl> {
    let overflow = || ComputeError::invalid_input("amount", "account total overflows");
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut lines: Vec<AccountLine> = Vec::new();

    for record in records {
        let kind = match record.kind() {
            Some(kind @ (REVENUE | EXPENSE)) => kind,
            other => {
                warn!(id = record.id(), kind = ?other, "Skipping ledger record without a revenue/expense type");
                continue;
            }
        };

        let i = *index.entry((kind, record.category())).or_insert_with(|| {
            lines.push(AccountLine {
                record_type: kind.to_string(),
                category: record.category().to_string(),
                planned: Decimal::ZERO,
                actual: Decimal::ZERO,
                variance: Decimal::ZERO,
            });
            lines.len() - 1
        });

        let line = &mut lines[i];
        if record.is_planned() {
            line.planned = line.planned.checked_add(record.amount()).ok_or_else(overflow)?;
        } else {
            line.actual = line.actual.checked_add(record.amount()).ok_or_else(overflow)?;
        }
        line.variance = line.actual - line.planned;
    }

    let side = |kind: &str, pick: fn(&AccountLine) -> Decimal| -> Result<Decimal> {
        checked_total("amount", lines.iter().filter(|l| l.record_type == kind).map(pick))
    };
    let planned = PnlTotals::new(side(REVENUE, |l| l.planned)?, side(EXPENSE, |l| l.planned)?)?;
    let actual = PnlTotals::new(side(REVENUE, |l| l.actual)?, side(EXPENSE, |l| l.actual)?)?;
    let variance = actual.minus(&planned)?;

    debug!(accounts = lines.len(), actual_profit = %actual.profit, "Project P&L computed");
    Ok(ProjectPnl {
        planned,
        actual,
        variance,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn entry(id: i32, kind: &str, category: &str, amount: Decimal, planned: bool) -> MoneyRecord {
        MoneyRecord::new(id, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(), amount, category)
            .with_kind(kind)
            .with_planned(planned)
    }

    #[test]
    fn compares_plan_with_reality() {
        let records = vec![
            entry(1, "revenue", "sales_revenue", dec!(100000), true),
            entry(2, "expense", "rent_expense", dec!(20000), true),
            entry(3, "expense", "material_expense", dec!(30000), true),
            entry(4, "revenue", "sales_revenue", dec!(80000), false),
            entry(5, "expense", "rent_expense", dec!(20000), false),
            entry(6, "expense", "material_expense", dec!(35000), false),
        ];

        let pnl = project_pnl(&records).unwrap();
        assert_eq!(pnl.planned.profit, dec!(50000));
        assert_eq!(pnl.planned.margin, dec!(50));
        assert_eq!(pnl.actual.revenue, dec!(80000));
        assert_eq!(pnl.actual.expenses, dec!(55000));
        assert_eq!(pnl.actual.profit, dec!(25000));
        assert_eq!(pnl.variance.profit, dec!(-25000));
        assert_eq!(pnl.variance.revenue, dec!(-20000));

        assert_eq!(pnl.lines.len(), 3);
        let material = &pnl.lines[2];
        assert_eq!(material.category, "material_expense");
        assert_eq!(material.variance, dec!(5000));
    }

    #[test]
    fn empty_ledger_and_stray_records() {
        let empty = project_pnl(&[]).unwrap();
        assert_eq!(empty.actual, PnlTotals::default());
        assert!(empty.lines.is_empty());

        let stray = MoneyRecord::new(1, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), dec!(10), "x");
        let pnl = project_pnl(&[stray]).unwrap();
        assert!(pnl.lines.is_empty());
        assert_eq!(pnl.actual.margin, Decimal::ZERO);
    }

    #[test]
    fn tiny_revenue_against_huge_costs_is_an_error() {
        let records = vec![
            entry(1, "revenue", "sales_revenue", dec!(0.01), false),
            entry(2, "expense", "rent_expense", dec!(100000000000000000000000000), false),
        ];
        assert!(matches!(
            project_pnl(&records),
            Err(ComputeError::InvalidInput { field: "margin", .. })
        ));
    }
}
