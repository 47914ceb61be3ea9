//! SeaORM entities for every persisted record.

pub mod budget;
pub mod entrepreneurship_project;
pub mod expense_record;
pub mod income_record;
pub mod project_financial_record;
pub mod user;

pub mod prelude {
    pub use super::budget::Entity as Budget;
    pub use super::entrepreneurship_project::Entity as EntrepreneurshipProject;
    pub use super::expense_record::Entity as ExpenseRecord;
    pub use super::income_record::Entity as IncomeRecord;
    pub use super::project_financial_record::Entity as ProjectFinancialRecord;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use chrono::{NaiveDate, Utc};
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, Set,
    };

    use super::*;
    use crate::categories::{
        BudgetPeriod, ExpenseCategory, IncomeCategory, IncomeType, ProjectRecordType,
        ProjectStatus, SalaryCategory,
    };
    use crate::record::MoneyRecord;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let now = Utc::now().naive_utc();

        let owner = user::ActiveModel {
            username: Set("demo".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let salary = income_record::ActiveModel {
            owner_id: Set(owner.id),
            income_type: Set(IncomeType::Salary),
            category: Set("base".to_string()),
            amount: Set(Decimal::new(9000000, 2)),
            date: Set(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()),
            description: Set(Some("January salary".to_string())),
            notes: Set(None),
            is_planned: Set(false),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        assert_eq!(
            salary.income_category().unwrap(),
            IncomeCategory::Salary(SalaryCategory::Base)
        );

        let rent = expense_record::ActiveModel {
            owner_id: Set(owner.id),
            category: Set(ExpenseCategory::Living),
            amount: Set(Decimal::new(2500000, 2)),
            date: Set(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()),
            description: Set(None),
            notes: Set(None),
            is_planned: Set(false),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        budget::ActiveModel {
            owner_id: Set(owner.id),
            category: Set(ExpenseCategory::Living),
            amount: Set(Decimal::new(3000000, 2)),
            period: Set(BudgetPeriod::Monthly),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let living = ExpenseRecord::find()
            .filter(expense_record::Column::Category.eq(ExpenseCategory::Living))
            .all(&db)
            .await?;
        assert_eq!(living.len(), 1);
        assert_eq!(living[0].amount, Decimal::new(2500000, 2));

        let view = MoneyRecord::from(&rent);
        assert_eq!(view.category(), "living");
        assert_eq!(view.kind(), None);
        let view = MoneyRecord::from(&salary);
        assert_eq!(view.kind(), Some("salary"));

        let budgets = Budget::find().all(&db).await?;
        assert_eq!(budgets[0].period, BudgetPeriod::Monthly);

        Ok(())
    }

    #[tokio::test]
    async fn deleting_a_project_removes_its_ledger() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let now = Utc::now().naive_utc();

        let owner = user::ActiveModel {
            username: Set("demo".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let project = entrepreneurship_project::ActiveModel {
            owner_id: Set(owner.id),
            name: Set("Coffee stand".to_string()),
            description: Set(None),
            start_date: Set(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
            status: Set(ProjectStatus::Active),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        for (record_type, category) in [
            (ProjectRecordType::Revenue, "sales_revenue"),
            (ProjectRecordType::Expense, "rent_expense"),
        ] {
            project_financial_record::ActiveModel {
                project_id: Set(project.id),
                record_type: Set(record_type),
                category: Set(category.to_string()),
                sub_category: Set(None),
                amount: Set(Decimal::new(100000, 2)),
                description: Set(None),
                date: Set(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()),
                is_planned: Set(true),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&db)
            .await?;
        }

        let ledger = project
            .find_related(ProjectFinancialRecord)
            .all(&db)
            .await?;
        assert_eq!(ledger.len(), 2);
        assert!(ledger.iter().all(|r| r.account().is_ok()));

        project.delete(&db).await?;
        assert_eq!(ProjectFinancialRecord::find().count(&db).await?, 0);

        Ok(())
    }
}
