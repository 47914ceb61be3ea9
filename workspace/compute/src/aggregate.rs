//! Financial aggregation over [`MoneyRecord`] slices.
//!
//! Every function here is pure: the same records always give the same
//! totals, and the input is never modified. Categories that never occur
//! simply have no total (or a zero total where one is asked for). Sums and
//! percentages that leave the `Decimal` range are `InvalidInput` errors.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use model::MoneyRecord;
use model::entities::budget;
use rust_decimal::Decimal;
use tracing::{debug, instrument, trace};

use crate::error::{ComputeError, Result};
use crate::money::{checked_total, percent_of};

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Totals of one calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotals {
    pub month: String,
    pub total: Decimal,
    /// Totals per record type, empty for untyped records.
    pub by_type: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyCashFlow {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net_income: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_income: Decimal,
    /// Net income as a percentage of total income, zero without income.
    pub savings_rate: Decimal,
}

/// A budget as the aggregator sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLimit {
    pub category: String,
    pub amount: Decimal,
}

impl From<&budget::Model> for BudgetLimit {
    fn from(model: &budget::Model) -> Self {
        Self {
            category: model.category.as_str().to_string(),
            amount: model.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgress {
    pub category: String,
    pub total: Decimal,
    pub budget_amount: Decimal,
    /// Budget minus spending; negative once overspent.
    pub remaining: Decimal,
    /// Share of the budget used, capped at 100.
    pub percent_used: Decimal,
    pub transaction_count: usize,
    pub overspent: bool,
}

/// Narrows a record set by inclusive date bounds and the planned flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_planned: Option<bool>,
}

impl RecordFilter {
    /// Fails when both bounds are set and `start_date` is after `end_date`.
    pub fn validate(&self) -> Result<()> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => Err(ComputeError::invalid_input(
                "start_date",
                format!("{} is after end_date {}", start, end),
            )),
            _ => Ok(()),
        }
    }

    pub fn matches(&self, record: &MoneyRecord) -> bool {
        self.start_date.is_none_or(|start| record.date() >= start)
            && self.end_date.is_none_or(|end| record.date() <= end)
            && self.is_planned.is_none_or(|planned| record.is_planned() == planned)
    }

    pub fn apply(&self, records: &[MoneyRecord]) -> Vec<MoneyRecord> {
        let kept: Vec<MoneyRecord> = records.iter().filter(|r| self.matches(r)).cloned().collect();
        trace!(before = records.len(), after = kept.len(), "Records filtered");
        kept
    }
}

/// Sums amounts per key, keeping keys in first-seen order.
fn totals_in_order<'a>(
    entries: impl Iterator<Item = (&'a str, Decimal)>,
) -> Result<Vec<CategoryTotal>> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for (key, amount) in entries {
        match index.get(key) {
            Some(&i) => {
                totals[i].total = totals[i]
                    .total
                    .checked_add(amount)
                    .ok_or_else(|| ComputeError::invalid_input("amount", "category total overflows"))?;
            }
            None => {
                index.insert(key, totals.len());
                totals.push(CategoryTotal {
                    category: key.to_string(),
                    total: amount,
                });
            }
        }
    }
    Ok(totals)
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

fn total(field: &'static str, records: &[MoneyRecord]) -> Result<Decimal> {
    checked_total(field, records.iter().map(MoneyRecord::amount))
}

/// Totals per category in first-seen order.
#[instrument(skip(records), fields(num_records = records.len()))]
pub fn sum_by_category(records: &[MoneyRecord]) -> Result<Vec<CategoryTotal>> {
    let totals = totals_in_order(records.iter().map(|r| (r.category(), r.amount())))?;
    debug!(categories = totals.len(), "Summed by category");
    Ok(totals)
}

/// Totals per record type in first-seen order; untyped records are skipped.
#[instrument(skip(records), fields(num_records = records.len()))]
pub fn sum_by_type(records: &[MoneyRecord]) -> Result<Vec<CategoryTotal>> {
    let totals = totals_in_order(
        records
            .iter()
            .filter_map(|r| r.kind().map(|kind| (kind, r.amount()))),
    )?;
    debug!(types = totals.len(), "Summed by type");
    Ok(totals)
}

/// Totals per calendar month, ascending by month.
#[instrument(skip(records), fields(num_records = records.len()))]
pub fn sum_by_month(records: &[MoneyRecord]) -> Result<Vec<MonthlyTotals>> {
    let mut months: BTreeMap<String, Vec<&MoneyRecord>> = BTreeMap::new();
    for record in records {
        months.entry(month_key(record.date())).or_default().push(record);
    }

    let totals = months
        .into_iter()
        .map(|(month, records)| {
            Ok(MonthlyTotals {
                month,
                total: checked_total("amount", records.iter().map(|r| r.amount()))?,
                by_type: totals_in_order(
                    records
                        .iter()
                        .filter_map(|r| r.kind().map(|kind| (kind, r.amount()))),
                )?,
            })
        })
        .collect::<Result<Vec<MonthlyTotals>>>()?;
    debug!(months = totals.len(), "Summed by month");
    Ok(totals)
}

/// Income, expenses and net income per calendar month, ascending by month.
#[instrument(skip(income, expenses), fields(num_income = income.len(), num_expenses = expenses.len()))]
pub fn monthly_cash_flow(
    income: &[MoneyRecord],
    expenses: &[MoneyRecord],
) -> Result<Vec<MonthlyCashFlow>> {
    let overflow = || ComputeError::invalid_input("amount", "monthly total overflows");
    let mut months: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for record in income {
        let entry = months.entry(month_key(record.date())).or_default();
        entry.0 = entry.0.checked_add(record.amount()).ok_or_else(overflow)?;
    }
    for record in expenses {
        let entry = months.entry(month_key(record.date())).or_default();
        entry.1 = entry.1.checked_add(record.amount()).ok_or_else(overflow)?;
    }

    Ok(months
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyCashFlow {
            month,
            income,
            expenses,
            net_income: income - expenses,
        })
        .collect())
}

#[instrument(skip(income, expenses), fields(num_income = income.len(), num_expenses = expenses.len()))]
pub fn compute_summary(income: &[MoneyRecord], expenses: &[MoneyRecord]) -> Result<FinancialSummary> {
    let total_income = total("income", income)?;
    let total_expenses = total("expenses", expenses)?;
    let net_income = total_income - total_expenses;
    let savings_rate = if total_income > Decimal::ZERO {
        percent_of("savings_rate", net_income, total_income)?
    } else {
        Decimal::ZERO
    };

    debug!(%total_income, %total_expenses, %savings_rate, "Summary computed");
    Ok(FinancialSummary {
        total_income,
        total_expenses,
        net_income,
        savings_rate,
    })
}

/// Spending of `category` against the first budget set for it.
///
/// A category without a budget has a zero budget and a zero usage
/// percentage.
#[instrument(skip(records, budgets), fields(num_records = records.len(), num_budgets = budgets.len()))]
pub fn budget_progress(
    category: &str,
    records: &[MoneyRecord],
    budgets: &[BudgetLimit],
) -> Result<BudgetProgress> {
    let matching: Vec<&MoneyRecord> = records.iter().filter(|r| r.category() == category).collect();
    let total = checked_total("amount", matching.iter().map(|r| r.amount()))?;
    let budget_amount = budgets
        .iter()
        .find(|b| b.category == category)
        .map(|b| b.amount)
        .unwrap_or(Decimal::ZERO);

    let percent_used = if budget_amount > Decimal::ZERO {
        percent_of("percent_used", total, budget_amount)?.min(Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    Ok(BudgetProgress {
        category: category.to_string(),
        total,
        budget_amount,
        remaining: budget_amount - total,
        percent_used,
        transaction_count: matching.len(),
        overspent: budget_amount > Decimal::ZERO && total > budget_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: i32, date: NaiveDate, amount: Decimal, category: &str) -> MoneyRecord {
        MoneyRecord::new(id, date, amount, category)
    }

    fn income(id: i32, date: NaiveDate, amount: Decimal, kind: &str, category: &str) -> MoneyRecord {
        MoneyRecord::new(id, date, amount, category).with_kind(kind)
    }

    fn budget(category: &str, amount: Decimal) -> BudgetLimit {
        BudgetLimit {
            category: category.to_string(),
            amount,
        }
    }

    #[test]
    fn empty_summary_is_all_zero() {
        let summary = compute_summary(&[], &[]).unwrap();
        assert_eq!(
            summary,
            FinancialSummary {
                total_income: Decimal::ZERO,
                total_expenses: Decimal::ZERO,
                net_income: Decimal::ZERO,
                savings_rate: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn summary_reports_savings_rate() {
        let income = vec![
            income(1, day(2025, 1, 5), dec!(90000), "salary", "base"),
            income(2, day(2025, 1, 20), dec!(10000), "investment", "dividend"),
        ];
        let expenses = vec![
            expense(1, day(2025, 1, 10), dec!(25000), "living"),
            expense(2, day(2025, 1, 11), dec!(35000), "loan"),
        ];

        let summary = compute_summary(&income, &expenses).unwrap();
        assert_eq!(summary.total_income, dec!(100000));
        assert_eq!(summary.total_expenses, dec!(60000));
        assert_eq!(summary.net_income, dec!(40000));
        assert_eq!(summary.savings_rate, dec!(40));

        // overspending gives a negative rate
        let summary = compute_summary(&income[1..], &expenses).unwrap();
        assert_eq!(summary.net_income, dec!(-50000));
        assert_eq!(summary.savings_rate, dec!(-500));
    }

    #[test]
    fn out_of_range_totals_are_errors() {
        let income = vec![income(1, day(2025, 1, 5), dec!(0.01), "salary", "base")];
        let expenses = vec![expense(1, day(2025, 1, 6), dec!(100000000000000000000000000), "living")];
        assert!(matches!(
            compute_summary(&income, &expenses),
            Err(ComputeError::InvalidInput { field: "savings_rate", .. })
        ));

        let piled = vec![
            expense(1, day(2025, 1, 1), Decimal::MAX, "living"),
            expense(2, day(2025, 1, 2), Decimal::MAX, "living"),
        ];
        assert!(sum_by_category(&piled).is_err());
        assert!(sum_by_month(&piled).is_err());
        assert!(monthly_cash_flow(&[], &piled).is_err());
        assert!(budget_progress("living", &piled, &[]).is_err());

        // a tiny budget is simply used up
        let progress = budget_progress("living", &expenses, &[budget("living", dec!(0.01))]).unwrap();
        assert_eq!(progress.percent_used, dec!(100));
        assert!(progress.overspent);
    }

    #[test]
    fn category_totals_ignore_record_order() {
        let records = vec![
            expense(1, day(2025, 1, 1), dec!(100), "living"),
            expense(2, day(2025, 1, 2), dec!(50), "entertainment"),
            expense(3, day(2025, 1, 3), dec!(25.5), "living"),
        ];
        let forward = sum_by_category(&records).unwrap();
        assert_eq!(forward[0].category, "living");
        assert_eq!(forward[0].total, dec!(125.5));
        assert_eq!(forward[1].total, dec!(50));

        let reversed: Vec<MoneyRecord> = records.iter().rev().cloned().collect();
        let as_map = |totals: Vec<CategoryTotal>| -> HashMap<String, Decimal> {
            totals.into_iter().map(|t| (t.category, t.total)).collect()
        };
        assert_eq!(as_map(sum_by_category(&reversed).unwrap()), as_map(forward));
    }

    #[test]
    fn aggregation_is_idempotent() {
        let records = vec![
            income(1, day(2025, 2, 1), dec!(1000), "salary", "base"),
            income(2, day(2025, 3, 1), dec!(500), "business", "side"),
        ];
        assert_eq!(sum_by_category(&records), sum_by_category(&records));
        assert_eq!(sum_by_month(&records), sum_by_month(&records));
        assert_eq!(compute_summary(&records, &[]), compute_summary(&records, &[]));
    }

    #[test]
    fn type_totals_skip_untyped_records() {
        let records = vec![
            income(1, day(2025, 1, 5), dec!(90000), "salary", "base"),
            income(2, day(2025, 1, 6), dec!(5000), "salary", "bonus"),
            income(3, day(2025, 1, 7), dec!(3000), "investment", "interest"),
            expense(4, day(2025, 1, 8), dec!(700), "living"),
        ];
        let totals = sum_by_type(&records).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category, "salary");
        assert_eq!(totals[0].total, dec!(95000));
        assert_eq!(totals[1].total, dec!(3000));
    }

    #[test]
    fn months_are_ascending_with_type_breakdown() {
        let records = vec![
            income(1, day(2025, 3, 5), dec!(100), "salary", "base"),
            income(2, day(2024, 12, 31), dec!(40), "business", "side"),
            income(3, day(2025, 3, 9), dec!(60), "business", "royalty"),
            expense(4, day(2025, 1, 1), dec!(7), "living"),
        ];
        let months = sum_by_month(&records).unwrap();
        let keys: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(keys, vec!["2024-12", "2025-01", "2025-03"]);

        assert_eq!(months[2].total, dec!(160));
        assert_eq!(months[2].by_type.len(), 2);
        assert_eq!(months[2].by_type[1].category, "business");
        assert_eq!(months[2].by_type[1].total, dec!(60));
        assert!(months[1].by_type.is_empty());
    }

    #[test]
    fn cash_flow_merges_both_sides() {
        let income = vec![income(1, day(2025, 1, 5), dec!(90000), "salary", "base")];
        let expenses = vec![
            expense(1, day(2025, 1, 10), dec!(30000), "living"),
            expense(2, day(2025, 2, 10), dec!(1000), "other"),
        ];
        let flow = monthly_cash_flow(&income, &expenses).unwrap();
        assert_eq!(flow.len(), 2);
        assert_eq!(flow[0].net_income, dec!(60000));
        assert_eq!(flow[1].income, Decimal::ZERO);
        assert_eq!(flow[1].net_income, dec!(-1000));
    }

    #[test]
    fn budget_progress_uses_first_matching_budget() {
        let records = vec![
            expense(1, day(2025, 1, 1), dec!(300), "living"),
            expense(2, day(2025, 1, 2), dec!(200), "living"),
            expense(3, day(2025, 1, 3), dec!(999), "loan"),
        ];
        let budgets = vec![budget("living", dec!(1000)), budget("living", dec!(50))];

        let progress = budget_progress("living", &records, &budgets).unwrap();
        assert_eq!(progress.total, dec!(500));
        assert_eq!(progress.budget_amount, dec!(1000));
        assert_eq!(progress.remaining, dec!(500));
        assert_eq!(progress.percent_used, dec!(50));
        assert_eq!(progress.transaction_count, 2);
        assert!(!progress.overspent);
    }

    #[test]
    fn overspending_caps_percentage() {
        let records = vec![expense(1, day(2025, 1, 1), dec!(1500), "entertainment")];
        let progress =
            budget_progress("entertainment", &records, &[budget("entertainment", dec!(1000))])
                .unwrap();
        assert_eq!(progress.percent_used, dec!(100));
        assert_eq!(progress.remaining, dec!(-500));
        assert!(progress.overspent);
    }

    #[test]
    fn missing_budget_and_unknown_category_degrade_to_zero() {
        let records = vec![expense(1, day(2025, 1, 1), dec!(80), "living")];

        let no_budget = budget_progress("living", &records, &[]).unwrap();
        assert_eq!(no_budget.budget_amount, Decimal::ZERO);
        assert_eq!(no_budget.percent_used, Decimal::ZERO);
        assert!(!no_budget.overspent);

        let zero_budget =
            budget_progress("living", &records, &[budget("living", Decimal::ZERO)]).unwrap();
        assert_eq!(zero_budget.percent_used, Decimal::ZERO);

        let unknown = budget_progress("travel", &records, &[]).unwrap();
        assert_eq!(unknown.total, Decimal::ZERO);
        assert_eq!(unknown.transaction_count, 0);
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let records = vec![
            expense(1, day(2025, 1, 1), dec!(1), "living"),
            expense(2, day(2025, 1, 15), dec!(2), "living").with_planned(true),
            expense(3, day(2025, 1, 31), dec!(3), "living"),
            expense(4, day(2025, 2, 1), dec!(4), "living"),
        ];
        let january = RecordFilter {
            start_date: Some(day(2025, 1, 1)),
            end_date: Some(day(2025, 1, 31)),
            is_planned: None,
        };
        let kept: Vec<i32> = january.apply(&records).iter().map(|r| r.id()).collect();
        assert_eq!(kept, vec![1, 2, 3]);

        let actual_only = RecordFilter {
            is_planned: Some(false),
            ..january
        };
        assert_eq!(actual_only.apply(&records).len(), 2);
        assert_eq!(RecordFilter::default().apply(&records).len(), 4);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let filter = RecordFilter {
            start_date: Some(day(2025, 2, 1)),
            end_date: Some(day(2025, 1, 1)),
            is_planned: None,
        };
        assert!(matches!(
            filter.validate(),
            Err(ComputeError::InvalidInput { field: "start_date", .. })
        ));
        assert!(RecordFilter::default().validate().is_ok());
    }
}
