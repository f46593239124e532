//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod account;
pub mod actual_item;
pub mod budget_item;
pub mod manager;
pub mod recon;

pub use account::{AccountError, AccountRepository, CreateAccountInput, UpdateAccountInput};
pub use actual_item::{
    ActualItemError, ActualItemRepository, CreateActualItemInput, UpdateActualItemInput,
};
pub use budget_item::{
    BudgetItemError, BudgetItemRepository, CreateBudgetItemInput, UpdateBudgetItemInput,
};
pub use manager::{CreateManagerInput, ManagerError, ManagerRepository, UpdateManagerInput};
pub use recon::ReconRepository;
