//! Settlement module containing balance aggregation and debt simplification

pub mod balance;
pub mod core;
pub mod simplify;

pub use balance::*;
pub use core::*;
pub use simplify::*;

/// The greedy largest-creditor/largest-debtor strategy
pub type GreedySettlement = DebtSimplifier;
