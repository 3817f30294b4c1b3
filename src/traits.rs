//! Traits for pluggable settlement strategies and expense validation

use bigdecimal::BigDecimal;

use crate::types::*;

/// Turns net balances into a list of payments that clears them.
///
/// The default implementation is the greedy
/// [`DebtSimplifier`](crate::settlement::DebtSimplifier). An exact
/// minimum-transaction solver belongs in its own implementation rather than
/// replacing the greedy one.
pub trait SettlementStrategy: Send + Sync {
    /// Produce settlement transactions for `balances`
    fn settle(&self, balances: &[UserBalance]) -> Vec<SettlementTransaction>;

    /// Short identifier used in logs
    fn name(&self) -> &'static str;
}

/// Trait for implementing expense validation rules.
///
/// The settlement core never calls a validator; callers run one before
/// handing expenses over.
pub trait ExpenseValidator: Send + Sync {
    /// Validate an expense before it is recorded
    fn validate_expense(&self, expense: &Expense) -> SettleResult<()>;
}

/// Default expense validator with basic rules
pub struct DefaultExpenseValidator;

impl ExpenseValidator for DefaultExpenseValidator {
    fn validate_expense(&self, expense: &Expense) -> SettleResult<()> {
        if expense.id.trim().is_empty() {
            return Err(SettleError::Validation(
                "Expense ID cannot be empty".to_string(),
            ));
        }

        if expense.payor_id.trim().is_empty() {
            return Err(SettleError::Validation(
                "Payor ID cannot be empty".to_string(),
            ));
        }

        if expense.amount <= BigDecimal::from(0) {
            return Err(SettleError::Validation(
                "Expense amount must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
