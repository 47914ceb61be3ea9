use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::entity::prelude::*;

use super::{project_financial_record, user};
use crate::categories::ProjectStatus;

/// A side business tracked with its own plan-vs-actual ledger.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "entrepreneurship_projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub status: ProjectStatus,
    pub created_at: NaiveDateTime,
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
    #[sea_orm(has_many = "project_financial_record::Entity")]
    FinancialRecord,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<project_financial_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
