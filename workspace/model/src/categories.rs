//! Fixed category vocabularies.
//!
//! The stored discriminators (income type, expense category, budget period,
//! project status, project record type) are sea-orm active enums. The
//! income and project-ledger categories depend on their type, so they are
//! modelled as tagged variants that can only be built from a valid pair.

use std::str::FromStr;

use sea_orm::entity::prelude::*;
use thiserror::Error;

/// Returned when a string does not name a known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Implements `as_str`, `ALL` and `FromStr` over a fixed key table.
macro_rules! string_keys {
    ($name:ident, $kind:literal, { $($variant:ident => $key:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($key => Ok($name::$variant),)+
                    other => Err(UnknownVariant::new($kind, other)),
                }
            }
        }
    };
}

/// Declares a plain (not stored) category enum with its key table.
macro_rules! category_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        string_keys!($name, $kind, { $($variant => $key),+ });
    };
}

/// Source of an income record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum IncomeType {
    #[sea_orm(string_value = "salary")]
    Salary,
    #[sea_orm(string_value = "investment")]
    Investment,
    #[sea_orm(string_value = "business")]
    Business,
}

string_keys!(IncomeType, "income type", {
    Salary => "salary",
    Investment => "investment",
    Business => "business",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ExpenseCategory {
    #[sea_orm(string_value = "living")]
    Living,
    #[sea_orm(string_value = "loan")]
    Loan,
    #[sea_orm(string_value = "insurance")]
    Insurance,
    #[sea_orm(string_value = "investment")]
    Investment,
    #[sea_orm(string_value = "entertainment")]
    Entertainment,
    #[sea_orm(string_value = "other")]
    Other,
}

string_keys!(ExpenseCategory, "expense category", {
    Living => "living",
    Loan => "loan",
    Insurance => "insurance",
    Investment => "investment",
    Entertainment => "entertainment",
    Other => "other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum BudgetPeriod {
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "yearly")]
    Yearly,
}

string_keys!(BudgetPeriod, "budget period", {
    Monthly => "monthly",
    Yearly => "yearly",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ProjectStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "paused")]
    Paused,
}

string_keys!(ProjectStatus, "project status", {
    Active => "active",
    Completed => "completed",
    Paused => "paused",
});

/// Side of the project income statement a ledger entry lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ProjectRecordType {
    #[sea_orm(string_value = "revenue")]
    Revenue,
    #[sea_orm(string_value = "expense")]
    Expense,
}

string_keys!(ProjectRecordType, "project record type", {
    Revenue => "revenue",
    Expense => "expense",
});

category_enum!(SalaryCategory, "salary category", {
    Base => "base",
    Bonus => "bonus",
    Overtime => "overtime",
    Allowance => "allowance",
    Other => "other",
});

category_enum!(InvestmentCategory, "investment category", {
    Dividend => "dividend",
    Interest => "interest",
    Fund => "fund",
    Rent => "rent",
    Other => "other",
});

category_enum!(BusinessCategory, "business category", {
    Revenue => "revenue",
    Side => "side",
    Consulting => "consulting",
    Royalty => "royalty",
    Other => "other",
});

category_enum!(
    /// Revenue accounts of a project ledger.
    RevenueAccount, "revenue account", {
    SalesRevenue => "sales_revenue",
    ServiceRevenue => "service_revenue",
    OtherRevenue => "other_revenue",
});

category_enum!(
    /// Operating expense accounts of a project ledger.
    OperatingExpense, "expense account", {
    CostOfGoodsSold => "cost_of_goods_sold",
    MarketingExpense => "marketing_expense",
    AdminExpense => "admin_expense",
    ResearchDevelopment => "research_development",
    RentExpense => "rent_expense",
    SalaryExpense => "salary_expense",
    EquipmentExpense => "equipment_expense",
    MaterialExpense => "material_expense",
    OtherExpense => "other_expense",
});

/// An income category, valid only under its own income type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncomeCategory {
    Salary(SalaryCategory),
    Investment(InvestmentCategory),
    Business(BusinessCategory),
}

impl IncomeCategory {
    /// Builds the category for `income_type`, rejecting keys that belong to
    /// another type.
    pub fn parse(income_type: IncomeType, category: &str) -> Result<Self, UnknownVariant> {
        Ok(match income_type {
            IncomeType::Salary => Self::Salary(category.parse()?),
            IncomeType::Investment => Self::Investment(category.parse()?),
            IncomeType::Business => Self::Business(category.parse()?),
        })
    }

    pub fn income_type(&self) -> IncomeType {
        match self {
            Self::Salary(_) => IncomeType::Salary,
            Self::Investment(_) => IncomeType::Investment,
            Self::Business(_) => IncomeType::Business,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary(c) => c.as_str(),
            Self::Investment(c) => c.as_str(),
            Self::Business(c) => c.as_str(),
        }
    }

    /// Category keys allowed under `income_type`.
    pub fn keys_for(income_type: IncomeType) -> Vec<&'static str> {
        match income_type {
            IncomeType::Salary => SalaryCategory::ALL.iter().map(|c| c.as_str()).collect(),
            IncomeType::Investment => InvestmentCategory::ALL.iter().map(|c| c.as_str()).collect(),
            IncomeType::Business => BusinessCategory::ALL.iter().map(|c| c.as_str()).collect(),
        }
    }
}

/// A project ledger account, valid only under its own record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectAccount {
    Revenue(RevenueAccount),
    Expense(OperatingExpense),
}

impl ProjectAccount {
    pub fn parse(record_type: ProjectRecordType, category: &str) -> Result<Self, UnknownVariant> {
        Ok(match record_type {
            ProjectRecordType::Revenue => Self::Revenue(category.parse()?),
            ProjectRecordType::Expense => Self::Expense(category.parse()?),
        })
    }

    pub fn record_type(&self) -> ProjectRecordType {
        match self {
            Self::Revenue(_) => ProjectRecordType::Revenue,
            Self::Expense(_) => ProjectRecordType::Expense,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue(a) => a.as_str(),
            Self::Expense(a) => a.as_str(),
        }
    }

    pub fn keys_for(record_type: ProjectRecordType) -> Vec<&'static str> {
        match record_type {
            ProjectRecordType::Revenue => RevenueAccount::ALL.iter().map(|a| a.as_str()).collect(),
            ProjectRecordType::Expense => OperatingExpense::ALL.iter().map(|a| a.as_str()).collect(),
        }
    }
}
