use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::user;
use crate::categories::{IncomeCategory, IncomeType, UnknownVariant};

/// A single income entry. `category` is only meaningful together with
/// `income_type`, see [`IncomeCategory`].
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "income_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: i32,
    pub income_type: IncomeType,
    pub category: String,
    /// Non-negative amount in TWD.
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub notes: Option<String>,
    /// Planned (forecast) entries are kept apart from actual ones.
    #[sea_orm(default_value = "false")]
    pub is_planned: bool,
    pub created_at: NaiveDateTime,
}

impl Model {
    pub fn income_category(&self) -> Result<IncomeCategory, UnknownVariant> {
        IncomeCategory::parse(self.income_type, &self.category)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::OwnerId",
        to = "user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
