//! Validation utilities for callers preparing expenses

use bigdecimal::BigDecimal;
use std::collections::HashSet;

use crate::config::{default_share_tolerance, SettlementConfig};
use crate::traits::*;
use crate::types::*;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> SettleResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(SettleError::Validation(
            "Amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a user ID is usable
pub fn validate_user_id(user_id: &str) -> SettleResult<()> {
    if user_id.trim().is_empty() {
        return Err(SettleError::Validation(
            "User ID cannot be empty".to_string(),
        ));
    }

    if user_id.trim() != user_id {
        return Err(SettleError::Validation(format!(
            "User ID '{}' has surrounding whitespace",
            user_id
        )));
    }

    Ok(())
}

/// Validate that a share lies in (0, 1]
pub fn validate_share(share: &BigDecimal) -> SettleResult<()> {
    if *share <= BigDecimal::from(0) || *share > BigDecimal::from(1) {
        return Err(SettleError::Validation(format!(
            "Share must be greater than 0 and at most 1, got {}",
            share
        )));
    }
    Ok(())
}

/// Validate that participant shares add up to 1 within `tolerance`
pub fn validate_share_total(
    participants: &[Participant],
    tolerance: &BigDecimal,
) -> SettleResult<()> {
    let total: BigDecimal = participants.iter().map(|p| &p.share).sum();
    if (&total - BigDecimal::from(1)).abs() > *tolerance {
        return Err(SettleError::Validation(format!(
            "Participant shares must sum to 1, got {}",
            total
        )));
    }
    Ok(())
}

/// Validate that no user appears twice among the participants
pub fn validate_unique_participants(participants: &[Participant]) -> SettleResult<()> {
    let mut seen = HashSet::new();
    for participant in participants {
        if !seen.insert(participant.user_id.as_str()) {
            return Err(SettleError::Validation(format!(
                "User '{}' appears more than once in the expense",
                participant.user_id
            )));
        }
    }
    Ok(())
}

/// Validate that an expense title is valid
pub fn validate_expense_title(title: &str) -> SettleResult<()> {
    if title.trim().is_empty() {
        return Err(SettleError::Validation(
            "Expense title cannot be empty".to_string(),
        ));
    }

    if title.chars().count() > 200 {
        return Err(SettleError::Validation(
            "Expense title cannot exceed 200 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced expense validator enforcing every settlement precondition
#[derive(Debug, Clone)]
pub struct EnhancedExpenseValidator {
    share_tolerance: BigDecimal,
}

impl Default for EnhancedExpenseValidator {
    fn default() -> Self {
        Self {
            share_tolerance: default_share_tolerance(),
        }
    }
}

impl EnhancedExpenseValidator {
    pub fn new(share_tolerance: BigDecimal) -> Self {
        Self { share_tolerance }
    }

    pub fn from_config(config: &SettlementConfig) -> Self {
        Self::new(config.share_tolerance.clone())
    }
}

impl ExpenseValidator for EnhancedExpenseValidator {
    fn validate_expense(&self, expense: &Expense) -> SettleResult<()> {
        // Basic validation
        DefaultExpenseValidator.validate_expense(expense)?;

        validate_expense_title(&expense.title)?;
        validate_positive_amount(&expense.amount)?;
        validate_user_id(&expense.payor_id)?;

        if expense.participants.is_empty() {
            return Err(SettleError::Validation(
                "Expense must have at least one participant".to_string(),
            ));
        }

        for participant in &expense.participants {
            validate_user_id(&participant.user_id)?;
            validate_share(&participant.share)?;
        }

        validate_unique_participants(&expense.participants)?;
        validate_share_total(&expense.participants, &self.share_tolerance)?;

        Ok(())
    }
}
