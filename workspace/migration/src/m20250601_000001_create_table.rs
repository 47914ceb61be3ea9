use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IncomeRecords::Table)
                    .if_not_exists()
                    .col(pk_auto(IncomeRecords::Id))
                    .col(integer(IncomeRecords::OwnerId))
                    .col(string_len(IncomeRecords::IncomeType, 20))
                    .col(string_len(IncomeRecords::Category, 40))
                    .col(decimal(IncomeRecords::Amount).decimal_len(12, 2))
                    .col(date(IncomeRecords::Date))
                    .col(string_null(IncomeRecords::Description))
                    .col(string_null(IncomeRecords::Notes))
                    .col(boolean(IncomeRecords::IsPlanned).default(false))
                    .col(date_time(IncomeRecords::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_income_records_owner")
                            .from(IncomeRecords::Table, IncomeRecords::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExpenseRecords::Table)
                    .if_not_exists()
                    .col(pk_auto(ExpenseRecords::Id))
                    .col(integer(ExpenseRecords::OwnerId))
                    .col(string_len(ExpenseRecords::Category, 20))
                    .col(decimal(ExpenseRecords::Amount).decimal_len(12, 2))
                    .col(date(ExpenseRecords::Date))
                    .col(string_null(ExpenseRecords::Description))
                    .col(string_null(ExpenseRecords::Notes))
                    .col(boolean(ExpenseRecords::IsPlanned).default(false))
                    .col(date_time(ExpenseRecords::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_records_owner")
                            .from(ExpenseRecords::Table, ExpenseRecords::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(pk_auto(Budgets::Id))
                    .col(integer(Budgets::OwnerId))
                    .col(string_len(Budgets::Category, 20))
                    .col(decimal(Budgets::Amount).decimal_len(12, 2))
                    .col(string_len(Budgets::Period, 20))
                    .col(date_time(Budgets::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_budgets_owner")
                            .from(Budgets::Table, Budgets::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EntrepreneurshipProjects::Table)
                    .if_not_exists()
                    .col(pk_auto(EntrepreneurshipProjects::Id))
                    .col(integer(EntrepreneurshipProjects::OwnerId))
                    .col(string(EntrepreneurshipProjects::Name))
                    .col(string_null(EntrepreneurshipProjects::Description))
                    .col(date(EntrepreneurshipProjects::StartDate))
                    .col(string_len(EntrepreneurshipProjects::Status, 20))
                    .col(date_time(EntrepreneurshipProjects::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entrepreneurship_projects_owner")
                            .from(EntrepreneurshipProjects::Table, EntrepreneurshipProjects::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectFinancialRecords::Table)
                    .if_not_exists()
                    .col(pk_auto(ProjectFinancialRecords::Id))
                    .col(integer(ProjectFinancialRecords::ProjectId))
                    .col(string_len(ProjectFinancialRecords::RecordType, 20))
                    .col(string_len(ProjectFinancialRecords::Category, 40))
                    .col(string_null(ProjectFinancialRecords::SubCategory))
                    .col(decimal(ProjectFinancialRecords::Amount).decimal_len(12, 2))
                    .col(string_null(ProjectFinancialRecords::Description))
                    .col(date(ProjectFinancialRecords::Date))
                    .col(boolean(ProjectFinancialRecords::IsPlanned).default(false))
                    .col(date_time(ProjectFinancialRecords::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_financial_records_project")
                            .from(ProjectFinancialRecords::Table, ProjectFinancialRecords::ProjectId)
                            .to(EntrepreneurshipProjects::Table, EntrepreneurshipProjects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing endpoints filter by owner and sort by date
        manager
            .create_index(
                Index::create()
                    .name("idx_income_records_owner_date")
                    .table(IncomeRecords::Table)
                    .col(IncomeRecords::OwnerId)
                    .col(IncomeRecords::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expense_records_owner_date")
                    .table(ExpenseRecords::Table)
                    .col(ExpenseRecords::OwnerId)
                    .col(ExpenseRecords::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children first
        manager
            .drop_table(Table::drop().table(ProjectFinancialRecords::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(EntrepreneurshipProjects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ExpenseRecords::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(IncomeRecords::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
}

#[derive(DeriveIden)]
enum IncomeRecords {
    Table,
    Id,
    OwnerId,
    IncomeType,
    Category,
    Amount,
    Date,
    Description,
    Notes,
    IsPlanned,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ExpenseRecords {
    Table,
    Id,
    OwnerId,
    Category,
    Amount,
    Date,
    Description,
    Notes,
    IsPlanned,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Budgets {
    Table,
    Id,
    OwnerId,
    Category,
    Amount,
    Period,
    CreatedAt,
}

#[derive(DeriveIden)]
enum EntrepreneurshipProjects {
    Table,
    Id,
    OwnerId,
    Name,
    Description,
    StartDate,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ProjectFinancialRecords {
    Table,
    Id,
    ProjectId,
    RecordType,
    Category,
    SubCategory,
    Amount,
    Description,
    Date,
    IsPlanned,
    CreatedAt,
}
