//! Settlement engine that runs aggregation and simplification over a snapshot

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::config::SettlementConfig;
use crate::currency::format_currency;
use crate::expense::{expenses_for_trip, total_spent};
use crate::settlement::{BalanceAggregator, DebtSimplifier};
use crate::traits::*;
use crate::types::*;

/// How a net balance reads to the person it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceStatus {
    /// Others owe this user money
    Owed,
    /// This user owes money
    Owes,
    /// Nothing outstanding
    Settled,
}

impl BalanceStatus {
    /// Classify `net` against a display threshold
    pub fn of(net: &BigDecimal, threshold: &BigDecimal) -> Self {
        if net > threshold {
            BalanceStatus::Owed
        } else if *net < -threshold.clone() {
            BalanceStatus::Owes
        } else {
            BalanceStatus::Settled
        }
    }
}

/// Main settlement engine that orchestrates aggregation and simplification
pub struct SettlementEngine {
    config: SettlementConfig,
    aggregator: BalanceAggregator,
    strategy: Box<dyn SettlementStrategy>,
}

impl SettlementEngine {
    /// Create an engine using greedy simplification with the configured epsilon
    pub fn new(config: SettlementConfig) -> Self {
        let strategy = Box::new(DebtSimplifier::new(config.epsilon.clone()));
        Self::with_strategy(config, strategy)
    }

    /// Create an engine with a custom settlement strategy
    pub fn with_strategy(config: SettlementConfig, strategy: Box<dyn SettlementStrategy>) -> Self {
        Self {
            config,
            aggregator: BalanceAggregator,
            strategy,
        }
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Compute balances and settlement transactions for `expenses`
    pub fn settle(&self, expenses: &[Expense]) -> SettlementReport {
        let balances = self.aggregator.compute_balances(expenses);
        let transactions = self.strategy.settle(&balances);

        tracing::debug!(
            strategy = self.strategy.name(),
            expenses = expenses.len(),
            users = balances.len(),
            transactions = transactions.len(),
            "settled expenses"
        );

        SettlementReport {
            balances,
            transactions,
            total_spent: total_spent(expenses),
            currency: self.config.currency.clone(),
            display_threshold: self.config.display_threshold.clone(),
            epsilon: self.config.epsilon.clone(),
        }
    }

    /// Settle only the expenses recorded against `trip_id`
    pub fn settle_trip(&self, expenses: &[Expense], trip_id: &str) -> SettlementReport {
        let trip_expenses: Vec<Expense> = expenses_for_trip(expenses, trip_id)
            .into_iter()
            .cloned()
            .collect();
        tracing::debug!(trip_id, expenses = trip_expenses.len(), "settling trip");
        self.settle(&trip_expenses)
    }
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self::new(SettlementConfig::default())
    }
}

/// Result of settling one snapshot of expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementReport {
    pub balances: Vec<UserBalance>,
    pub transactions: Vec<SettlementTransaction>,
    /// Sum of all expense amounts in the snapshot
    pub total_spent: BigDecimal,
    pub currency: String,
    pub display_threshold: BigDecimal,
    pub epsilon: BigDecimal,
}

impl SettlementReport {
    /// Net balance of `user_id`, zero when they do not appear
    pub fn balance_of(&self, user_id: &str) -> BigDecimal {
        self.balances
            .iter()
            .find(|b| b.user_id == user_id)
            .map(|b| b.net.clone())
            .unwrap_or_else(|| BigDecimal::from(0))
    }

    /// Total of transactions paying `user_id`
    pub fn total_owed_to(&self, user_id: &str) -> BigDecimal {
        self.transactions
            .iter()
            .filter(|t| t.to_user_id == user_id)
            .map(|t| &t.amount)
            .sum()
    }

    /// Total of transactions paid by `user_id`
    pub fn total_owed_by(&self, user_id: &str) -> BigDecimal {
        self.transactions
            .iter()
            .filter(|t| t.from_user_id == user_id)
            .map(|t| &t.amount)
            .sum()
    }

    /// Sum of every net balance; zero up to arithmetic error
    pub fn residual(&self) -> BigDecimal {
        self.balances.iter().map(|b| &b.net).sum()
    }

    /// Whether credits and debits cancel to within epsilon
    pub fn is_conserved(&self) -> bool {
        self.residual().abs() <= self.epsilon
    }

    /// Whether there is nothing left to pay
    pub fn is_settled(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Split the report into what concerns `user_id` and everything else
    pub fn view_for(&self, user_id: &str) -> UserSettlementView {
        let net = self.balance_of(user_id);
        let status = BalanceStatus::of(&net, &self.display_threshold);
        let (own_transactions, other_transactions) = self
            .transactions
            .iter()
            .cloned()
            .partition(|t| t.involves(user_id));

        UserSettlementView {
            user_id: user_id.to_string(),
            net,
            status,
            own_transactions,
            other_transactions,
        }
    }

    /// Format an amount in the report currency
    pub fn format_amount(&self, amount: &BigDecimal) -> SettleResult<String> {
        format_currency(amount, &self.currency)
    }
}

/// One user's perspective on a settlement report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettlementView {
    pub user_id: String,
    pub net: BigDecimal,
    pub status: BalanceStatus,
    /// Transactions where the user pays or is paid
    pub own_transactions: Vec<SettlementTransaction>,
    /// Transactions between other users
    pub other_transactions: Vec<SettlementTransaction>,
}

impl UserSettlementView {
    /// Transactions the user has to pay
    pub fn payments_due(&self) -> impl Iterator<Item = &SettlementTransaction> {
        self.own_transactions
            .iter()
            .filter(move |t| t.from_user_id == self.user_id)
    }

    /// Transactions the user should receive
    pub fn payments_expected(&self) -> impl Iterator<Item = &SettlementTransaction> {
        self.own_transactions
            .iter()
            .filter(move |t| t.to_user_id == self.user_id)
    }
}
