//! Static presentation tables: display labels (zh-TW) and Font Awesome icon
//! classes for every category key. Unknown keys fall back to the key itself.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const FALLBACK_ICON: &str = "fas fa-circle";

const INCOME_TYPES: &[(&str, &str, &str)] = &[
    ("salary", "薪資收入", "fas fa-coins"),
    ("investment", "投資收入", "fas fa-chart-line"),
    ("business", "創業收入", "fas fa-briefcase"),
];

const SALARY_CATEGORIES: &[(&str, &str)] = &[
    ("base", "基本月薪"),
    ("bonus", "年終獎金"),
    ("overtime", "加班費"),
    ("allowance", "津貼補助"),
    ("other", "其他薪資"),
];

const INVESTMENT_CATEGORIES: &[(&str, &str)] = &[
    ("dividend", "股票股利"),
    ("interest", "債券利息"),
    ("fund", "基金收益"),
    ("rent", "房租收入"),
    ("other", "其他投資"),
];

const BUSINESS_CATEGORIES: &[(&str, &str)] = &[
    ("revenue", "營業收入"),
    ("side", "副業收入"),
    ("consulting", "顧問費用"),
    ("royalty", "版權收入"),
    ("other", "其他創業"),
];

const EXPENSE_CATEGORIES: &[(&str, &str, &str)] = &[
    ("living", "生活費用", "fas fa-utensils"),
    ("loan", "貸款支出", "fas fa-home"),
    ("insurance", "保險費用", "fas fa-shield-alt"),
    ("investment", "投資支出", "fas fa-chart-line"),
    ("entertainment", "娛樂支出", "fas fa-gamepad"),
    ("other", "其他支出", "fas fa-ellipsis-h"),
];

const BUDGET_PERIODS: &[(&str, &str)] = &[("monthly", "每月"), ("yearly", "每年")];

const PROJECT_STATUSES: &[(&str, &str)] = &[
    ("active", "進行中"),
    ("completed", "已完成"),
    ("paused", "暫停"),
];

const PROJECT_RECORD_TYPES: &[(&str, &str)] = &[("revenue", "營業收入"), ("expense", "營業費用")];

const REVENUE_ACCOUNTS: &[(&str, &str)] = &[
    ("sales_revenue", "銷貨收入"),
    ("service_revenue", "勞務收入"),
    ("other_revenue", "其他營業收入"),
];

const EXPENSE_ACCOUNTS: &[(&str, &str)] = &[
    ("cost_of_goods_sold", "銷貨成本"),
    ("marketing_expense", "行銷費用"),
    ("admin_expense", "管理費用"),
    ("research_development", "研發費用"),
    ("rent_expense", "租金費用"),
    ("salary_expense", "薪資費用"),
    ("equipment_expense", "設備費用"),
    ("material_expense", "材料費用"),
    ("other_expense", "其他營業費用"),
];

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryLabel {
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
}

/// A labelled group of categories, e.g. the salary categories.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryGroup {
    pub key: String,
    pub label: String,
    pub icon: Option<String>,
    pub categories: Vec<CategoryLabel>,
}

/// Every vocabulary a client needs to build its forms.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryCatalog {
    pub income: Vec<CategoryGroup>,
    pub expense: Vec<CategoryLabel>,
    pub budget_periods: Vec<CategoryLabel>,
    pub project_statuses: Vec<CategoryLabel>,
    pub project_accounts: Vec<CategoryGroup>,
}

fn lookup<'a>(table: &[(&'static str, &'static str)], key: &'a str) -> &'a str {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

fn labels(table: &[(&str, &str)]) -> Vec<CategoryLabel> {
    table
        .iter()
        .map(|(key, label)| CategoryLabel {
            key: key.to_string(),
            label: label.to_string(),
            icon: None,
        })
        .collect()
}

fn salary_like_table(income_type: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match income_type {
        "salary" => Some(SALARY_CATEGORIES),
        "investment" => Some(INVESTMENT_CATEGORIES),
        "business" => Some(BUSINESS_CATEGORIES),
        _ => None,
    }
}

pub fn income_type_label(income_type: &str) -> &str {
    INCOME_TYPES
        .iter()
        .find(|(k, _, _)| *k == income_type)
        .map(|(_, label, _)| *label)
        .unwrap_or(income_type)
}

/// Label of an income category; the same key reads differently per type
/// (`other` is "其他薪資" under salary but "其他投資" under investment).
pub fn income_category_label<'a>(income_type: &str, category: &'a str) -> &'a str {
    match salary_like_table(income_type) {
        Some(table) => lookup(table, category),
        None => category,
    }
}

pub fn expense_label(category: &str) -> &str {
    EXPENSE_CATEGORIES
        .iter()
        .find(|(k, _, _)| *k == category)
        .map(|(_, label, _)| *label)
        .unwrap_or(category)
}

pub fn expense_icon(category: &str) -> &'static str {
    EXPENSE_CATEGORIES
        .iter()
        .find(|(k, _, _)| *k == category)
        .map(|(_, _, icon)| *icon)
        .unwrap_or(FALLBACK_ICON)
}

/// Label of a project ledger account (keys are unique across both sides).
pub fn project_account_label(account: &str) -> &str {
    let label = lookup(REVENUE_ACCOUNTS, account);
    if label != account {
        return label;
    }
    lookup(EXPENSE_ACCOUNTS, account)
}

pub fn catalog() -> CategoryCatalog {
    let income = INCOME_TYPES
        .iter()
        .map(|(key, label, icon)| CategoryGroup {
            key: key.to_string(),
            label: label.to_string(),
            icon: Some(icon.to_string()),
            categories: labels(salary_like_table(key).unwrap_or(&[])),
        })
        .collect();

    let expense = EXPENSE_CATEGORIES
        .iter()
        .map(|(key, label, icon)| CategoryLabel {
            key: key.to_string(),
            label: label.to_string(),
            icon: Some(icon.to_string()),
        })
        .collect();

    let project_accounts = PROJECT_RECORD_TYPES
        .iter()
        .map(|(key, label)| CategoryGroup {
            key: key.to_string(),
            label: label.to_string(),
            icon: None,
            categories: labels(if *key == "revenue" {
                REVENUE_ACCOUNTS
            } else {
                EXPENSE_ACCOUNTS
            }),
        })
        .collect();

    CategoryCatalog {
        income,
        expense,
        budget_periods: labels(BUDGET_PERIODS),
        project_statuses: labels(PROJECT_STATUSES),
        project_accounts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_fall_back_to_the_key() {
        assert_eq!(expense_label("living"), "生活費用");
        assert_eq!(expense_label("travel"), "travel");
        assert_eq!(expense_icon("loan"), "fas fa-home");
        assert_eq!(expense_icon("travel"), FALLBACK_ICON);
        assert_eq!(income_type_label("investment"), "投資收入");
        assert_eq!(project_account_label("rent_expense"), "租金費用");
        assert_eq!(project_account_label("sales_revenue"), "銷貨收入");
    }

    #[test]
    fn other_depends_on_income_type() {
        assert_eq!(income_category_label("salary", "other"), "其他薪資");
        assert_eq!(income_category_label("business", "other"), "其他創業");
        assert_eq!(income_category_label("lottery", "other"), "other");
    }

    #[test]
    fn catalog_covers_every_vocabulary() {
        let catalog = catalog();
        assert_eq!(catalog.income.len(), 3);
        assert!(catalog.income.iter().all(|g| g.categories.len() == 5));
        assert_eq!(catalog.expense.len(), 6);
        assert_eq!(catalog.project_accounts[0].categories.len(), 3);
        assert_eq!(catalog.project_accounts[1].categories.len(), 9);

        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["expense"][0]["icon"], "fas fa-utensils");
    }
}
