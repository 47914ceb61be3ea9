use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::entities::{expense_record, income_record, project_financial_record};

/// A dated amount with a category, the common shape of income, expense and
/// project ledger rows.
///
/// The aggregation code only sees this view, so it never has to know which
/// table a row came from.
#[derive(Debug, Clone, PartialEq)]
pub struct MoneyRecord {
    id: i32,
    date: NaiveDate,
    amount: Decimal,
    category: String,
    kind: Option<String>,
    is_planned: bool,
}

impl MoneyRecord {
    /// Creates an untyped, actual (not planned) record.
    pub fn new(id: i32, date: NaiveDate, amount: Decimal, category: impl Into<String>) -> Self {
        Self {
            id,
            date,
            amount,
            category: category.into(),
            kind: None,
            is_planned: false,
        }
    }

    /// Sets the record type (income type or ledger side).
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_planned(mut self, is_planned: bool) -> Self {
        self.is_planned = is_planned;
        self
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn is_planned(&self) -> bool {
        self.is_planned
    }
}

impl From<&income_record::Model> for MoneyRecord {
    fn from(model: &income_record::Model) -> Self {
        MoneyRecord::new(model.id, model.date, model.amount, model.category.clone())
            .with_kind(model.income_type.as_str())
            .with_planned(model.is_planned)
    }
}

impl From<&expense_record::Model> for MoneyRecord {
    fn from(model: &expense_record::Model) -> Self {
        MoneyRecord::new(model.id, model.date, model.amount, model.category.as_str())
            .with_planned(model.is_planned)
    }
}

impl From<&project_financial_record::Model> for MoneyRecord {
    fn from(model: &project_financial_record::Model) -> Self {
        MoneyRecord::new(model.id, model.date, model.amount, model.category.clone())
            .with_kind(model.record_type.as_str())
            .with_planned(model.is_planned)
    }
}
