//! # Settle Core
//!
//! Shared expense settlement: who owes whom, and how much.
//!
//! ## Features
//!
//! - **Balance aggregation**: fold expenses into one net balance per user
//! - **Debt simplification**: greedy largest-creditor/largest-debtor matching
//!   that clears every balance in at most `creditors + debtors - 1` payments
//! - **Settlement reports**: per-user views, trip filtering and totals
//! - **Expense helpers**: builder, equal splits and caller-side validation
//! - **Currency display**: en-US style formatting for settlement amounts
//!
//! ## Quick Start
//!
//! ```rust
//! use settle_core::{compute_balances, simplify_debts, Expense, Participant};
//! use bigdecimal::BigDecimal;
//!
//! let expense = Expense::new(
//!     "e1",
//!     BigDecimal::from(100),
//!     "u1",
//!     Participant::equal_split(["u1", "u2"]),
//! );
//!
//! let balances = compute_balances(&[expense]);
//! let transactions = simplify_debts(&balances);
//!
//! assert_eq!(transactions.len(), 1);
//! assert_eq!(transactions[0].from_user_id, "u2");
//! assert_eq!(transactions[0].amount, BigDecimal::from(50));
//! ```

pub mod config;
pub mod currency;
pub mod expense;
pub mod settlement;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use currency::*;
pub use expense::*;
pub use settlement::*;
pub use traits::*;
pub use types::*;
