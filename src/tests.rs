#[cfg(test)]
mod integration_tests {
    use crate::handlers::budgets::CreateBudgetRequest;
    use crate::handlers::expenses::CreateExpenseRequest;
    use crate::handlers::income::{CreateIncomeRequest, UpdateIncomeRequest};
    use crate::handlers::project_records::CreateProjectRecordRequest;
    use crate::handlers::projects::CreateProjectRequest;
    use crate::schemas::{ApiResponse, ErrorResponse};
    use crate::test_utils::test_utils::setup_test_server;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use std::str::FromStr;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn money(value: &Value) -> Decimal {
        Decimal::from_str(value.as_str().expect("decimals are serialized as strings")).unwrap()
    }

    fn income(income_type: &str, category: &str, amount: &str, date: NaiveDate) -> CreateIncomeRequest {
        CreateIncomeRequest {
            income_type: income_type.to_string(),
            category: category.to_string(),
            amount: amount.to_string(),
            date,
            description: None,
            notes: None,
            is_planned: None,
        }
    }

    fn expense(category: &str, amount: &str, date: NaiveDate) -> CreateExpenseRequest {
        CreateExpenseRequest {
            category: category.to_string(),
            amount: amount.to_string(),
            date,
            description: None,
            notes: None,
            is_planned: None,
        }
    }

    async fn post_ok(server: &TestServer, path: &str, body: &impl serde::Serialize) -> Value {
        let response = server.post(path).json(body).await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = response.json();
        assert!(body.success);
        body.data
    }

    async fn get_data(server: &TestServer, path: &str) -> Value {
        let response = server.get(path).await;
        response.assert_status_ok();
        response.json::<ApiResponse<Value>>().data
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = setup_test_server().await;

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_income_lifecycle() {
        let server = setup_test_server().await;

        let created = post_ok(
            &server,
            "/api/v1/income",
            &income("salary", "base", "52,000", day(2024, 3, 5)),
        )
        .await;
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["income_type_label"], "薪資收入");
        assert_eq!(money(&created["amount"]), dec!(52000));
        assert_eq!(created["is_planned"], false);

        let fetched = get_data(&server, &format!("/api/v1/income/{}", id)).await;
        assert_eq!(fetched["category"], "base");

        let update = UpdateIncomeRequest {
            amount: Some("55000".to_string()),
            notes: Some("raise".to_string()),
            ..Default::default()
        };
        let response = server.put(&format!("/api/v1/income/{}", id)).json(&update).await;
        response.assert_status_ok();
        let updated = response.json::<ApiResponse<Value>>().data;
        assert_eq!(money(&updated["amount"]), dec!(55000));
        assert_eq!(updated["notes"], "raise");
        assert_eq!(updated["category"], "base");

        server
            .delete(&format!("/api/v1/income/{}", id))
            .await
            .assert_status_ok();
        let response = server.get(&format!("/api/v1/income/{}", id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<ErrorResponse>().code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_income_category_must_match_type() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/v1/income")
            .json(&income("salary", "dividend", "100", day(2024, 1, 1)))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert_eq!(error.code, "INVALID_INPUT");
        assert!(!error.success);

        // switching the type alone leaves a category the new type lacks
        let created = post_ok(
            &server,
            "/api/v1/income",
            &income("salary", "bonus", "100", day(2024, 1, 1)),
        )
        .await;
        let update = UpdateIncomeRequest {
            income_type: Some("investment".to_string()),
            ..Default::default()
        };
        server
            .put(&format!("/api/v1/income/{}", created["id"]))
            .json(&update)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_amounts_are_validated() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/v1/expenses")
            .json(&expense("living", "lots", day(2024, 1, 1)))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().code, "INVALID_AMOUNT");

        let response = server
            .post("/api/v1/expenses")
            .json(&expense("living", "-20", day(2024, 1, 1)))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().code, "INVALID_INPUT");

        let response = server
            .post("/api/v1/expenses")
            .json(&expense("groceries", "20", day(2024, 1, 1)))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_expense_list_is_newest_first_and_filtered() {
        let server = setup_test_server().await;
        for (amount, date) in [
            ("100", day(2024, 1, 10)),
            ("200", day(2024, 3, 1)),
            ("300", day(2024, 2, 15)),
        ] {
            post_ok(&server, "/api/v1/expenses", &expense("living", amount, date)).await;
        }
        let mut planned = expense("loan", "400", day(2024, 2, 20));
        planned.is_planned = Some(true);
        post_ok(&server, "/api/v1/expenses", &planned).await;

        let all = get_data(&server, "/api/v1/expenses").await;
        let dates: Vec<&str> = all
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-20", "2024-02-15", "2024-01-10"]);
        assert_eq!(all[0]["icon"], "fas fa-utensils");

        let february = get_data(
            &server,
            "/api/v1/expenses?start_date=2024-02-01&end_date=2024-02-29&is_planned=false",
        )
        .await;
        assert_eq!(february.as_array().unwrap().len(), 1);
        assert_eq!(money(&february[0]["amount"]), dec!(300));
    }

    #[tokio::test]
    async fn test_reversed_date_range_is_rejected() {
        let server = setup_test_server().await;

        for path in [
            "/api/v1/analysis/summary?start_date=2024-05-01&end_date=2024-04-01",
            "/api/v1/analysis/budget-progress?start_date=2024-05-01&end_date=2024-04-01",
            "/api/v1/income?start_date=2024-05-01&end_date=2024-04-01",
        ] {
            let response = server.get(path).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            let error: ErrorResponse = response.json();
            assert_eq!(error.code, "INVALID_INPUT");
            assert!(!error.success);
        }
    }

    #[tokio::test]
    async fn test_amounts_must_fit_two_decimal_places() {
        let server = setup_test_server().await;

        for amount in ["0.001", "100000000000000000000000000"] {
            let response = server
                .post("/api/v1/income")
                .json(&income("salary", "base", amount, day(2024, 1, 1)))
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
            assert_eq!(response.json::<ErrorResponse>().code, "INVALID_INPUT");
        }

        // nothing was stored, so the summary still computes
        let summary = get_data(&server, "/api/v1/analysis/summary").await;
        assert_eq!(money(&summary["total_income"]), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_summary_and_breakdowns() {
        let server = setup_test_server().await;
        post_ok(&server, "/api/v1/income", &income("salary", "base", "50000", day(2024, 1, 5))).await;
        post_ok(&server, "/api/v1/income", &income("investment", "dividend", "2000", day(2024, 2, 5))).await;
        post_ok(&server, "/api/v1/income", &income("salary", "bonus", "8000", day(2024, 2, 20))).await;
        post_ok(&server, "/api/v1/expenses", &expense("living", "12000", day(2024, 1, 9))).await;
        post_ok(&server, "/api/v1/expenses", &expense("insurance", "3000", day(2024, 2, 9))).await;

        let summary = get_data(&server, "/api/v1/analysis/summary").await;
        assert_eq!(money(&summary["total_income"]), dec!(60000));
        assert_eq!(money(&summary["total_expenses"]), dec!(15000));
        assert_eq!(money(&summary["net_income"]), dec!(45000));
        assert_eq!(money(&summary["savings_rate"]), dec!(75));

        let january = get_data(
            &server,
            "/api/v1/analysis/summary?start_date=2024-01-01&end_date=2024-01-31",
        )
        .await;
        assert_eq!(money(&january["total_income"]), dec!(50000));
        assert_eq!(january["period"]["start_date"], "2024-01-01");

        let by_type = get_data(&server, "/api/v1/analysis/income-by-type").await;
        let salary = by_type
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["category"] == "salary")
            .unwrap();
        assert_eq!(money(&salary["total"]), dec!(58000));

        let by_category = get_data(&server, "/api/v1/analysis/expenses-by-category").await;
        assert_eq!(by_category.as_array().unwrap().len(), 2);

        let by_month = get_data(&server, "/api/v1/analysis/income-by-month").await;
        assert_eq!(by_month[0]["month"], "2024-01");
        assert_eq!(by_month[1]["month"], "2024-02");
        assert_eq!(money(&by_month[1]["total"]), dec!(10000));

        let trend = get_data(&server, "/api/v1/analysis/monthly-trend").await;
        assert_eq!(trend.as_array().unwrap().len(), 2);
        assert_eq!(money(&trend[0]["net_income"]), dec!(38000));
        assert_eq!(money(&trend[1]["net_income"]), dec!(7000));
    }

    #[tokio::test]
    async fn test_empty_summary_is_all_zero() {
        let server = setup_test_server().await;

        let summary = get_data(&server, "/api/v1/analysis/summary").await;
        assert_eq!(money(&summary["total_income"]), Decimal::ZERO);
        assert_eq!(money(&summary["savings_rate"]), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_budget_progress() {
        let server = setup_test_server().await;
        let budget = CreateBudgetRequest {
            category: "living".to_string(),
            amount: "10000".to_string(),
            period: None,
        };
        let created = post_ok(&server, "/api/v1/budgets", &budget).await;
        assert_eq!(created["period"], "monthly");

        post_ok(&server, "/api/v1/expenses", &expense("living", "4000", day(2024, 4, 2))).await;
        post_ok(&server, "/api/v1/expenses", &expense("living", "8000", day(2024, 4, 20))).await;

        let all = get_data(&server, "/api/v1/analysis/budget-progress").await;
        assert_eq!(all.as_array().unwrap().len(), 6);

        let living = get_data(&server, "/api/v1/analysis/budget-progress?category=living").await;
        let living = &living[0];
        assert_eq!(money(&living["total"]), dec!(12000));
        assert_eq!(money(&living["remaining"]), dec!(-2000));
        assert_eq!(money(&living["percent_used"]), dec!(100));
        assert_eq!(living["transaction_count"], 2);
        assert_eq!(living["overspent"], true);

        // no budget for loan: zero usage instead of an error
        let loan = get_data(&server, "/api/v1/analysis/budget-progress?category=loan").await;
        assert_eq!(money(&loan[0]["percent_used"]), Decimal::ZERO);
        assert_eq!(loan[0]["overspent"], false);

        server
            .get("/api/v1/analysis/budget-progress?category=travel")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_project_ledger_and_pnl() {
        let server = setup_test_server().await;
        let project = post_ok(
            &server,
            "/api/v1/projects",
            &CreateProjectRequest {
                name: "Coffee cart".to_string(),
                description: None,
                start_date: day(2024, 1, 1),
                status: None,
            },
        )
        .await;
        let project_id = project["id"].as_i64().unwrap();
        assert_eq!(project["status"], "active");

        let record = |record_type: &str, category: &str, amount: &str, planned: bool| {
            CreateProjectRecordRequest {
                record_type: record_type.to_string(),
                category: category.to_string(),
                sub_category: None,
                amount: amount.to_string(),
                description: None,
                date: day(2024, 2, 1),
                is_planned: Some(planned),
            }
        };
        let records_path = format!("/api/v1/projects/{}/records", project_id);
        post_ok(&server, &records_path, &record("revenue", "sales_revenue", "10000", true)).await;
        post_ok(&server, &records_path, &record("revenue", "sales_revenue", "12000", false)).await;
        post_ok(&server, &records_path, &record("expense", "rent_expense", "4000", true)).await;
        let rent = post_ok(&server, &records_path, &record("expense", "rent_expense", "5000", false)).await;

        server
            .post(&records_path)
            .json(&record("revenue", "rent_expense", "1", false))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let listed = get_data(&server, &records_path).await;
        assert_eq!(listed.as_array().unwrap().len(), 4);

        let pnl = get_data(&server, &format!("/api/v1/projects/{}/pnl", project_id)).await;
        assert_eq!(pnl["project_name"], "Coffee cart");
        assert_eq!(money(&pnl["planned"]["profit"]), dec!(6000));
        assert_eq!(money(&pnl["actual"]["profit"]), dec!(7000));
        assert_eq!(money(&pnl["variance"]["profit"]), dec!(1000));

        let response = server
            .put(&format!("/api/v1/project-records/{}", rent["id"]))
            .json(&json!({ "amount": "4500" }))
            .await;
        response.assert_status_ok();

        server
            .delete(&format!("/api/v1/projects/{}", project_id))
            .await
            .assert_status_ok();
        server
            .get(&records_path)
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&format!("/api/v1/project-records/{}", rent["id"]))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_loan_assessment_uses_configured_income() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/v1/loan/assessment")
            .json(&json!({
                "loan_amount": "8000000",
                "down_payment": "2000000",
                "loan_term_years": 30,
                "annual_interest_rate": "2.1"
            }))
            .await;
        response.assert_status_ok();
        let loan = response.json::<ApiResponse<Value>>().data;
        assert_eq!(money(&loan["principal"]), dec!(6000000));
        assert_eq!(loan["number_of_payments"], 360);
        assert_eq!(money(&loan["monthly_payment"]), dec!(22478.41));
        assert_eq!(money(&loan["interest_payment"]), dec!(10500));
        assert_eq!(money(&loan["monthly_income"]), dec!(90000));
        assert_eq!(money(&loan["mortgage_ratio"]), dec!(24.98));
        assert_eq!(loan["is_affordable"], true);

        let response = server
            .post("/api/v1/loan/assessment")
            .json(&json!({
                "loan_amount": "8000000",
                "down_payment": "2000000",
                "loan_term_years": 30,
                "annual_interest_rate": "2.1",
                "monthly_income": "50000"
            }))
            .await;
        let loan = response.json::<ApiResponse<Value>>().data;
        assert_eq!(loan["is_affordable"], false);
    }

    #[tokio::test]
    async fn test_loan_errors() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/v1/loan/assessment")
            .json(&json!({
                "loan_amount": "1000000",
                "down_payment": "0",
                "loan_term_years": 0,
                "annual_interest_rate": "2"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().code, "DIVISION_BY_ZERO");

        let response = server
            .post("/api/v1/loan/assessment")
            .json(&json!({
                "loan_amount": "1000000",
                "down_payment": "2000000",
                "loan_term_years": 20,
                "annual_interest_rate": "2"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().code, "INVALID_INPUT");

        let response = server
            .post("/api/v1/loan/assessment")
            .json(&json!({
                "loan_amount": "1000000",
                "down_payment": "0",
                "loan_term_years": 150,
                "annual_interest_rate": "2"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().code, "INVALID_INPUT");

        let response = server
            .post("/api/v1/loan/assessment")
            .json(&json!({
                "loan_amount": "abc",
                "down_payment": "0",
                "loan_term_years": 30,
                "annual_interest_rate": "2"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert_eq!(error.code, "INVALID_AMOUNT");
        assert!(!error.success);

        let response = server
            .post("/api/v1/loan/assessment")
            .json(&json!({
                "loan_amount": "8000000",
                "down_payment": "2000000",
                "loan_term_years": 30,
                "annual_interest_rate": "2.1",
                "monthly_income": "0.0000000000000000000000001"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().code, "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_loan_schedule_closes_at_zero() {
        let server = setup_test_server().await;

        let schedule = server
            .post("/api/v1/loan/schedule")
            .json(&json!({
                "loan_amount": "1000000",
                "down_payment": "0",
                "loan_term_years": 10,
                "annual_interest_rate": "0"
            }))
            .await
            .json::<ApiResponse<Value>>()
            .data;
        let entries = schedule.as_array().unwrap();
        assert_eq!(entries.len(), 120);
        assert_eq!(money(&entries[0]["payment"]), dec!(8333.33));
        assert_eq!(money(&entries[119]["remaining_balance"]), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_categories_catalog() {
        let server = setup_test_server().await;

        let catalog = get_data(&server, "/api/v1/categories").await;
        assert_eq!(catalog["income"].as_array().unwrap().len(), 3);
        assert_eq!(catalog["expense"].as_array().unwrap().len(), 6);
        assert_eq!(catalog["project_accounts"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_swagger_document_is_served() {
        let server = setup_test_server().await;

        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status_ok();
        let doc: Value = response.json();
        assert!(doc["paths"]["/api/v1/loan/assessment"].is_object());
    }
}
