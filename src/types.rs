//! Core types and data structures for expense settlement

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Spending categories recognised by the expense resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Accommodation,
    Entertainment,
    Utilities,
    Shopping,
    Health,
    Other,
}

/// A user's fractional stake in one expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// User owing part of the expense
    pub user_id: String,
    /// Fraction of the expense amount, expected in (0, 1]
    #[serde(deserialize_with = "decimal_input::deserialize")]
    pub share: BigDecimal,
}

impl Participant {
    /// Create a new participant
    pub fn new(user_id: impl Into<String>, share: BigDecimal) -> Self {
        Self {
            user_id: user_id.into(),
            share,
        }
    }

    /// Split evenly across `user_ids`, skipping blank ids.
    ///
    /// Each share is `1/n` rounded to 6 decimal places, so three people get
    /// `0.333333` each and the total falls just short of 1.
    pub fn equal_split<I, S>(user_ids: I) -> Vec<Participant>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<String> = user_ids
            .into_iter()
            .map(|id| id.as_ref().trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();

        if ids.is_empty() {
            return Vec::new();
        }

        let share = (BigDecimal::from(1) / BigDecimal::from(ids.len() as u64))
            .with_scale_round(6, bigdecimal::RoundingMode::HalfUp);

        ids.into_iter()
            .map(|id| Participant::new(id, share.clone()))
            .collect()
    }
}

/// A shared expense: paid in full by one user, owed fractionally by participants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier for the expense
    pub id: String,
    /// Short human-readable title
    #[serde(default)]
    pub title: String,
    /// Total amount paid
    #[serde(deserialize_with = "decimal_input::deserialize")]
    pub amount: BigDecimal,
    /// Free-form tag
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub category: Option<ExpenseCategory>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// User who fronted the cash
    pub payor_id: String,
    /// Users owing a share of the amount, in entry order
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Trip (group) this expense belongs to
    #[serde(default)]
    pub trip_id: Option<String>,
    /// When the expense was recorded
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// User who recorded the expense
    #[serde(default)]
    pub owner_id: String,
}

impl Expense {
    /// Create a new expense paid by `payor_id`
    pub fn new(
        id: impl Into<String>,
        amount: BigDecimal,
        payor_id: impl Into<String>,
        participants: Vec<Participant>,
    ) -> Self {
        let payor_id = payor_id.into();
        Self {
            id: id.into(),
            title: String::new(),
            amount,
            tag: None,
            category: None,
            location: None,
            description: None,
            owner_id: payor_id.clone(),
            payor_id,
            participants,
            trip_id: None,
            created_at: Utc::now(),
        }
    }

    /// Share assigned to `user_id`, or zero when they are not a participant
    pub fn share_of(&self, user_id: &str) -> BigDecimal {
        self.participants
            .iter()
            .find(|p| p.user_id == user_id)
            .map(|p| p.share.clone())
            .unwrap_or_else(|| BigDecimal::from(0))
    }

    /// Portion of the amount attributable to `user_id`
    pub fn amount_owed_by(&self, user_id: &str) -> BigDecimal {
        &self.amount * self.share_of(user_id)
    }

    /// What the payor fronted on behalf of everyone else; zero for non-payors
    pub fn amount_lent_by(&self, user_id: &str) -> BigDecimal {
        if self.payor_id == user_id {
            &self.amount - self.amount_owed_by(user_id)
        } else {
            BigDecimal::from(0)
        }
    }

    /// Sum of all participant shares
    pub fn total_share(&self) -> BigDecimal {
        self.participants.iter().map(|p| &p.share).sum()
    }
}

/// Net position of one user across a set of expenses.
///
/// Positive means the user is owed money, negative means they owe money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBalance {
    pub user_id: String,
    pub net: BigDecimal,
}

impl UserBalance {
    pub fn new(user_id: impl Into<String>, net: BigDecimal) -> Self {
        Self {
            user_id: user_id.into(),
            net,
        }
    }

    /// Whether the balance lies within `epsilon` of zero
    pub fn is_settled(&self, epsilon: &BigDecimal) -> bool {
        self.net.abs() <= *epsilon
    }
}

/// A recommended payment from a debtor to a creditor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementTransaction {
    pub from_user_id: String,
    pub to_user_id: String,
    /// Positive amount rounded to cents
    pub amount: BigDecimal,
}

impl SettlementTransaction {
    /// Whether `user_id` pays or receives in this transaction
    pub fn involves(&self, user_id: &str) -> bool {
        self.from_user_id == user_id || self.to_user_id == user_id
    }
}

/// Errors raised outside the settlement core: validation, formatting and configuration
#[derive(Debug, thiserror::Error)]
pub enum SettleError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for fallible settlement operations
pub type SettleResult<T> = Result<T, SettleError>;

/// Serde helper accepting decimals as strings or JSON numbers.
///
/// Floats go through their shortest round-trip text, so `0.1` reads as
/// `0.1` rather than its binary expansion.
pub(crate) mod decimal_input {
    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Deserializer};
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDecimal {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawDecimal::deserialize(deserializer)? {
            RawDecimal::Text(text) => {
                BigDecimal::from_str(text.trim()).map_err(serde::de::Error::custom)
            }
            RawDecimal::Integer(value) => Ok(BigDecimal::from(value)),
            RawDecimal::Float(value) if value.is_finite() => {
                BigDecimal::from_str(&value.to_string()).map_err(serde::de::Error::custom)
            }
            RawDecimal::Float(value) => Err(serde::de::Error::custom(format!(
                "expected a finite decimal, got {}",
                value
            ))),
        }
    }
}
