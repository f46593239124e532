//! Initial schema migration.
//!
//! Creates the four entity tables plus the account-manager association
//! table. No cascading deletes anywhere: deleting a manager leaves
//! account references dangling on purpose.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS actual_items;
             DROP TABLE IF EXISTS budget_items;
             DROP TABLE IF EXISTS account_managers;
             DROP TABLE IF EXISTS accounts;
             DROP TABLE IF EXISTS managers;",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- Managers: at most one row has is_default = 'on' (enforced in the repository)
CREATE TABLE managers (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    is_default TEXT NOT NULL DEFAULT 'off',
    is_admin TEXT NOT NULL DEFAULT 'No'
);

-- Accounts: one GL key per account; manager reference is NOT a foreign key
CREATE TABLE accounts (
    id TEXT PRIMARY KEY,
    key TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL,
    manager_id TEXT
);

CREATE INDEX idx_accounts_key ON accounts(key);

-- Many-to-many association, independent of accounts.manager_id
CREATE TABLE account_managers (
    id TEXT PRIMARY KEY,
    key TEXT NOT NULL,
    manager_id TEXT NOT NULL,
    UNIQUE (key, manager_id)
);

-- Budget line items keyed by (acct5, line); acct5 references accounts.key informally
CREATE TABLE budget_items (
    id TEXT PRIMARY KEY,
    acct5 TEXT NOT NULL,
    line TEXT NOT NULL,
    description TEXT NOT NULL,
    amount REAL NOT NULL DEFAULT 0,
    datefrom TEXT,
    dateto TEXT,
    CONSTRAINT uq_budget_acct5_line_from UNIQUE (acct5, line, datefrom)
);

CREATE INDEX idx_budget_items_acct5 ON budget_items(acct5);

-- Actual transaction items; seq orders entries in increments of 5
CREATE TABLE actual_items (
    id TEXT PRIMARY KEY,
    acct5 TEXT NOT NULL,
    line TEXT NOT NULL,
    tr_date TEXT,
    description TEXT NOT NULL,
    amount REAL NOT NULL DEFAULT 0,
    seq REAL,
    vendor_name TEXT,
    vouchno TEXT
);

CREATE INDEX idx_actual_items_acct5 ON actual_items(acct5);
";
