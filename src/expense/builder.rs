//! Builder for expense records

use bigdecimal::BigDecimal;
use chrono::Utc;

use crate::traits::*;
use crate::types::*;

/// Expense builder for assembling an expense before handing it to storage
#[derive(Debug)]
pub struct ExpenseBuilder {
    expense: Expense,
    explicit_id: bool,
}

impl ExpenseBuilder {
    /// Create a new expense builder
    pub fn new(title: impl Into<String>, amount: BigDecimal, payor_id: impl Into<String>) -> Self {
        let mut expense = Expense::new(String::new(), amount, payor_id, Vec::new());
        expense.title = title.into();
        Self {
            expense,
            explicit_id: false,
        }
    }

    /// Use a known identifier instead of generating one
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.expense.id = id.into();
        self.explicit_id = true;
        self
    }

    /// Add a participant with an explicit share
    pub fn participant(mut self, user_id: impl Into<String>, share: BigDecimal) -> Self {
        self.expense.participants.push(Participant::new(user_id, share));
        self
    }

    /// Replace participants with an even split across the payor and `others`.
    ///
    /// The payor always comes first; blank ids are dropped.
    pub fn split_equally<I, S>(mut self, others: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids = vec![self.expense.payor_id.clone()];
        ids.extend(others.into_iter().map(|id| id.as_ref().to_string()));
        self.expense.participants = Participant::equal_split(ids);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.expense.tag = Some(tag.into());
        self
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.expense.category = Some(category);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.expense.location = Some(location.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.expense.description = Some(description.into());
        self
    }

    /// Attach the expense to a trip (group)
    pub fn trip(mut self, trip_id: impl Into<String>) -> Self {
        self.expense.trip_id = Some(trip_id.into());
        self
    }

    /// Record who entered the expense; defaults to the payor
    pub fn owner(mut self, owner_id: impl Into<String>) -> Self {
        self.expense.owner_id = owner_id.into();
        self
    }

    /// Build the expense, checking it with the default validator
    pub fn build(self) -> SettleResult<Expense> {
        self.build_with(&DefaultExpenseValidator)
    }

    /// Build the expense, checking it with `validator`
    pub fn build_with(mut self, validator: &dyn ExpenseValidator) -> SettleResult<Expense> {
        if !self.explicit_id {
            self.expense.id = uuid::Uuid::new_v4().to_string();
        }
        self.expense.created_at = Utc::now();
        validator.validate_expense(&self.expense)?;
        Ok(self.expense)
    }
}
