use sea_orm::entity::prelude::*;

/// The owner of every record. A single demo user is provisioned on start-up.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::income_record::Entity")]
    IncomeRecord,
    #[sea_orm(has_many = "super::expense_record::Entity")]
    ExpenseRecord,
    #[sea_orm(has_many = "super::budget::Entity")]
    Budget,
    #[sea_orm(has_many = "super::entrepreneurship_project::Entity")]
    EntrepreneurshipProject,
}

impl ActiveModelBehavior for ActiveModel {}
