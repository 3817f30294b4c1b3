//! Expense construction and snapshot helpers

pub mod builder;

pub use builder::*;

use bigdecimal::BigDecimal;

use crate::types::Expense;

/// Expenses recorded against `trip_id`, in their original order
pub fn expenses_for_trip<'a>(expenses: &'a [Expense], trip_id: &str) -> Vec<&'a Expense> {
    expenses
        .iter()
        .filter(|e| e.trip_id.as_deref() == Some(trip_id))
        .collect()
}

/// Sum of expense amounts
pub fn total_spent<'a, I>(expenses: I) -> BigDecimal
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses.into_iter().map(|e| &e.amount).sum()
}
