use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::entrepreneurship_project;
use crate::categories::{ProjectAccount, ProjectRecordType, UnknownVariant};

/// One line of a project ledger, either planned or actual.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "project_financial_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub project_id: i32,
    pub record_type: ProjectRecordType,
    pub category: String,
    pub sub_category: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    #[sea_orm(default_value = "false")]
    pub is_planned: bool,
    pub created_at: NaiveDateTime,
}

impl Model {
    pub fn account(&self) -> Result<ProjectAccount, UnknownVariant> {
        ProjectAccount::parse(self.record_type, &self.category)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "entrepreneurship_project::Entity",
        from = "Column::ProjectId",
        to = "entrepreneurship_project::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
}

impl Related<entrepreneurship_project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
