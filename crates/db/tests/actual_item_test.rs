//! Integration tests for the actual-item repository: sequence
//! assignment, duplicate detection, and bulk import.

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use ledgerline_core::import::RawActualRow;
use ledgerline_db::migration::Migrator;
use ledgerline_db::repositories::actual_item::{
    ActualItemRepository, CreateActualItemInput, UpdateActualItemInput,
};

async fn setup() -> DatabaseConnection {
    let db = ledgerline_db::connect_with_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}

fn input(acct5: &str, line: &str, amount: f64) -> CreateActualItemInput {
    CreateActualItemInput {
        id: None,
        acct5: acct5.to_string(),
        line: line.to_string(),
        description: format!("actual {acct5}/{line}"),
        amount,
        seq: None,
        tr_date: None,
        vendor_name: None,
        vouchno: None,
    }
}

fn raw(gl: &str, line: &str, desc: &str, amount: f64) -> RawActualRow {
    RawActualRow {
        gl: gl.to_string(),
        line: line.to_string(),
        description: desc.to_string(),
        amount,
        ..RawActualRow::default()
    }
}

#[tokio::test]
async fn test_seq_starts_at_one() {
    let repo = ActualItemRepository::new(setup().await);

    let first = repo.create(input("100-01", "01", 10.0)).await.expect("create");
    assert!((first.seq.expect("seq") - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_seq_increments_by_five_from_max() {
    let repo = ActualItemRepository::new(setup().await);

    repo.create(CreateActualItemInput {
        seq: Some(20.0),
        ..input("100-01", "01", 10.0)
    })
    .await
    .expect("create");

    let next = repo.create(input("100-01", "02", 5.0)).await.expect("create");
    assert!((next.seq.expect("seq") - 25.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_explicit_seq_kept_and_update_preserves_seq() {
    let repo = ActualItemRepository::new(setup().await);

    let item = repo
        .create(CreateActualItemInput {
            seq: Some(12.5),
            ..input("100-01", "01", 10.0)
        })
        .await
        .expect("create");
    assert!((item.seq.expect("seq") - 12.5).abs() < f64::EPSILON);

    // An update without a sequence keeps the stored one.
    let updated = repo
        .update(
            &item.id,
            UpdateActualItemInput {
                amount: Some(20.0),
                ..UpdateActualItemInput::default()
            },
        )
        .await
        .expect("update");
    assert!((updated.seq.expect("seq") - 12.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_import_assigns_sequence_and_normalizes() {
    let repo = ActualItemRepository::new(setup().await);

    let rows = vec![
        raw("100-01", "1", "first", 10.0),
        raw("100-01", "2", "second", 20.0),
        raw("", "03", "blank key", 5.0),
        raw("100-01", "04", "zero amount", 0.0),
    ];
    let report = repo.import_rows(&rows).await;

    assert_eq!(report.total, 4);
    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 2);
    assert!(report.error.is_none());

    let items = repo.list().await.expect("list");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].line, "01");
    assert_eq!(items[1].line, "02");
    // Sequences were auto-assigned in import order: 1.0 then 6.0.
    assert!((items[0].seq.expect("seq") - 1.0).abs() < f64::EPSILON);
    assert!((items[1].seq.expect("seq") - 6.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_reimport_is_idempotent_regardless_of_line() {
    let repo = ActualItemRepository::new(setup().await);

    let mut first = raw("100-01", "01", "invoice 42", 99.99);
    first.tr_date = Some("2023-03-15".to_string());
    first.vendor_name = Some("Acme".to_string());

    let report = repo.import_rows(std::slice::from_ref(&first)).await;
    assert_eq!(report.imported, 1);

    // Same posting again, this time under a different line and with an
    // amount inside the half-cent tolerance.
    let mut again = first.clone();
    again.line = "07".to_string();
    again.amount = 99.994;

    let report = repo.import_rows(&[again]).await;
    assert_eq!(report.imported, 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(repo.list().await.expect("list").len(), 1);
}

#[tokio::test]
async fn test_import_batch_internal_duplicates_collapse() {
    let repo = ActualItemRepository::new(setup().await);

    let row = raw("100-01", "01", "same posting", 10.0);
    let report = repo.import_rows(&[row.clone(), row]).await;

    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped, 1);
}

#[tokio::test]
async fn test_exists_duplicate() {
    let repo = ActualItemRepository::new(setup().await);

    repo.create(CreateActualItemInput {
        tr_date: Some("2023-03-15".to_string()),
        ..input("100-01", "01", 10.0)
    })
    .await
    .expect("create");

    let stored = &repo.list().await.expect("list")[0];
    let mut fingerprint = ledgerline_core::import::ActualFingerprint {
        acct5: stored.acct5.clone(),
        description: stored.description.clone(),
        amount: stored.amount + 0.004,
        tr_date: stored.tr_date.clone(),
        vendor_name: None,
    };
    assert!(repo.exists_duplicate(&fingerprint).await.expect("dup"));

    fingerprint.amount += 1.0;
    assert!(!repo.exists_duplicate(&fingerprint).await.expect("dup"));
}

#[tokio::test]
async fn test_next_line_per_account() {
    let repo = ActualItemRepository::new(setup().await);

    assert_eq!(repo.next_line("100-01").await.expect("next"), "01");

    repo.create(input("100-01", "02", 1.0)).await.expect("create");
    repo.create(input("100-01", "07", 1.0)).await.expect("create");

    assert_eq!(repo.next_line("100-01").await.expect("next"), "08");
}
