//! Integration tests for the budget-item repository and bulk import.

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use ledgerline_core::import::RawBudgetRow;
use ledgerline_db::migration::Migrator;
use ledgerline_db::repositories::budget_item::{
    BudgetItemError, BudgetItemRepository, CreateBudgetItemInput, UpdateBudgetItemInput,
};

async fn setup() -> DatabaseConnection {
    let db = ledgerline_db::connect_with_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}

fn input(acct5: &str, line: &str, amount: f64) -> CreateBudgetItemInput {
    CreateBudgetItemInput {
        id: None,
        acct5: acct5.to_string(),
        line: line.to_string(),
        description: format!("budget {acct5}/{line}"),
        amount,
        datefrom: None,
        dateto: None,
    }
}

fn raw(key: &str, amount: f64) -> RawBudgetRow {
    RawBudgetRow {
        formattedglacctno: key.to_string(),
        budgetamt: amount,
        description: "dept budget".to_string(),
    }
}

#[tokio::test]
async fn test_crud_round_trip() {
    let repo = BudgetItemRepository::new(setup().await);

    let created = repo.create(input("100-01", "01", 500.0)).await.expect("create");

    let updated = repo
        .update(
            &created.id,
            UpdateBudgetItemInput {
                amount: Some(750.0),
                datefrom: Some(Some("2023-01-01".to_string())),
                ..UpdateBudgetItemInput::default()
            },
        )
        .await
        .expect("update");
    assert!((updated.amount - 750.0).abs() < f64::EPSILON);
    assert_eq!(updated.datefrom.as_deref(), Some("2023-01-01"));

    repo.delete(&created.id).await.expect("delete");
    let err = repo.get(&created.id).await.unwrap_err();
    assert!(matches!(err, BudgetItemError::NotFound(_)));
}

#[tokio::test]
async fn test_list_ordered_by_string_key() {
    let repo = BudgetItemRepository::new(setup().await);

    repo.create(input("100-01", "2", 1.0)).await.expect("create");
    repo.create(input("100-01", "10", 1.0)).await.expect("create");

    let rows = repo.list().await.expect("list");
    assert_eq!(rows[0].line, "10");
    assert_eq!(rows[1].line, "2");
}

#[tokio::test]
async fn test_next_line() {
    let repo = BudgetItemRepository::new(setup().await);

    assert_eq!(repo.next_line("100-01").await.expect("next"), "01");

    repo.create(input("100-01", "01", 1.0)).await.expect("create");
    repo.create(input("100-01", "04", 1.0)).await.expect("create");
    repo.create(input("200-01", "09", 1.0)).await.expect("create");

    // Only the requested account's lines count.
    assert_eq!(repo.next_line("100-01").await.expect("next"), "05");
    assert_eq!(repo.next_line("200-01").await.expect("next"), "10");
}

#[tokio::test]
async fn test_import_skips_placeholder_suffix() {
    let repo = BudgetItemRepository::new(setup().await);

    let rows = vec![
        raw("52100-00-00-00-00-00", 100.0),
        raw("52100-00-00-00-00-01", 200.0),
    ];
    let report = repo.import_rows(&rows).await;

    assert_eq!(report.total, 2);
    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped, 1);
    assert!(report.error.is_none());

    let items = repo.list().await.expect("list");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].acct5, "52100-00-00-00-00-01");
    assert_eq!(items[0].line, "00");
    assert!((items[0].amount - 200.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_import_all_rows_get_line_zero_zero() {
    let repo = BudgetItemRepository::new(setup().await);

    let rows = vec![raw("100-01", 10.0), raw("200-01", 20.0)];
    let report = repo.import_rows(&rows).await;

    assert_eq!(report.imported, 2);
    assert!(repo.list().await.expect("list").iter().all(|b| b.line == "00"));
}
