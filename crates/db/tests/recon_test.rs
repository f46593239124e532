//! Integration tests for the reconciliation repository views.

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use ledgerline_core::recon::LineItemFilter;
use ledgerline_db::migration::Migrator;
use ledgerline_db::repositories::account::{AccountRepository, CreateAccountInput};
use ledgerline_db::repositories::actual_item::{ActualItemRepository, CreateActualItemInput};
use ledgerline_db::repositories::budget_item::{BudgetItemRepository, CreateBudgetItemInput};
use ledgerline_db::repositories::recon::ReconRepository;

async fn setup() -> DatabaseConnection {
    let db = ledgerline_db::connect_with_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}

async fn seed(db: &DatabaseConnection) {
    let accounts = AccountRepository::new(db.clone());
    let budget = BudgetItemRepository::new(db.clone());
    let actuals = ActualItemRepository::new(db.clone());

    accounts
        .create(CreateAccountInput {
            id: None,
            key: "100-01".to_string(),
            description: "travel".to_string(),
            manager_id: Some("mgr-a".to_string()),
        })
        .await
        .expect("account");
    accounts
        .create(CreateAccountInput {
            id: None,
            key: "200-01".to_string(),
            description: "supplies".to_string(),
            manager_id: Some("mgr-b".to_string()),
        })
        .await
        .expect("account");

    budget
        .create(CreateBudgetItemInput {
            id: None,
            acct5: "100-01".to_string(),
            line: "01".to_string(),
            description: "travel budget".to_string(),
            amount: 500.0,
            datefrom: None,
            dateto: None,
        })
        .await
        .expect("budget");

    actuals
        .create(CreateActualItemInput {
            id: None,
            acct5: "100-01".to_string(),
            line: "01".to_string(),
            description: "airfare".to_string(),
            amount: 100.0,
            seq: None,
            tr_date: None,
            vendor_name: Some("Acme Travel".to_string()),
            vouchno: None,
        })
        .await
        .expect("actual");
    actuals
        .create(CreateActualItemInput {
            id: None,
            acct5: "100-01".to_string(),
            line: "01".to_string(),
            description: "hotel".to_string(),
            amount: 50.0,
            seq: None,
            tr_date: None,
            vendor_name: None,
            vouchno: None,
        })
        .await
        .expect("actual");
    actuals
        .create(CreateActualItemInput {
            id: None,
            acct5: "200-01".to_string(),
            line: "03".to_string(),
            description: "paper".to_string(),
            amount: 25.0,
            seq: None,
            tr_date: None,
            vendor_name: Some("Globex".to_string()),
            vouchno: None,
        })
        .await
        .expect("actual");
}

#[tokio::test]
async fn test_line_items_join_and_variance() {
    let db = setup().await;
    seed(&db).await;
    let repo = ReconRepository::new(db);

    let rows = repo
        .line_items(&LineItemFilter::default())
        .await
        .expect("line items");

    assert_eq!(rows.len(), 2);

    // Budgeted key accumulates both actuals, last description wins.
    assert_eq!(rows[0].acct5, "100-01");
    assert!((rows[0].budget - 500.0).abs() < f64::EPSILON);
    assert!((rows[0].actual - 150.0).abs() < f64::EPSILON);
    assert!((rows[0].variance - 350.0).abs() < f64::EPSILON);
    assert_eq!(rows[0].actual_desc.as_deref(), Some("hotel"));

    // Actual-only key gets budget 0 and no budget description.
    assert_eq!(rows[1].acct5, "200-01");
    assert!(rows[1].budget.abs() < f64::EPSILON);
    assert_eq!(rows[1].budget_desc, None);
    assert!((rows[1].variance + 25.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_line_items_manager_filter() {
    let db = setup().await;
    seed(&db).await;
    let repo = ReconRepository::new(db);

    let rows = repo
        .line_items(&LineItemFilter {
            manager_id: Some("mgr-b".to_string()),
            ..LineItemFilter::default()
        })
        .await
        .expect("line items");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].acct5, "200-01");
}

#[tokio::test]
async fn test_budget_view_description_filter() {
    let db = setup().await;
    seed(&db).await;
    let repo = ReconRepository::new(db);

    let rows = repo
        .budget_view(&LineItemFilter {
            description: Some("TRAVEL".to_string()),
            ..LineItemFilter::default()
        })
        .await
        .expect("budget view");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "travel budget");

    let none = repo
        .budget_view(&LineItemFilter {
            description: Some("missing".to_string()),
            ..LineItemFilter::default()
        })
        .await
        .expect("budget view");
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_actuals_view_vendor_filter() {
    let db = setup().await;
    seed(&db).await;
    let repo = ReconRepository::new(db);

    let rows = repo
        .actuals_view(&LineItemFilter::default(), Some("acme"))
        .await
        .expect("actuals view");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "airfare");

    let all = repo
        .actuals_view(&LineItemFilter::default(), None)
        .await
        .expect("actuals view");
    assert_eq!(all.len(), 3);
}
