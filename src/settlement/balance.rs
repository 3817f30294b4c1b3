//! Folding expenses into per-user net balances

use bigdecimal::BigDecimal;
use std::collections::HashMap;

use crate::types::*;

/// Aggregates expenses into one net balance per user.
///
/// Each expense credits its payor with the full amount and debits every
/// participant by `amount * share`. A payor who is also a participant gets
/// both adjustments, which nets down to "paid for everyone else".
///
/// Nothing is validated here. Shares that do not sum to 1, negative amounts
/// and duplicate participants all produce skewed but well-defined balances.
/// An expense with no participants is a pure credit to its payor.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceAggregator;

impl BalanceAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Compute one balance per user seen as payor or participant.
    ///
    /// Balances come back in first-appearance order. The result does not
    /// depend on the order of `expenses` beyond that ordering.
    pub fn compute_balances(&self, expenses: &[Expense]) -> Vec<UserBalance> {
        let tally = expenses.iter().fold(Tally::default(), |tally, expense| {
            let tally = tally.adjust(&expense.payor_id, expense.amount.clone());
            expense.participants.iter().fold(tally, |tally, p| {
                tally.adjust(&p.user_id, -(&expense.amount * &p.share))
            })
        });

        tracing::trace!(
            expenses = expenses.len(),
            users = tally.balances.len(),
            "computed balances"
        );

        tally.balances
    }
}

/// Running per-user totals, scoped to a single aggregation call
#[derive(Default)]
struct Tally {
    balances: Vec<UserBalance>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn adjust(mut self, user_id: &str, delta: BigDecimal) -> Self {
        let slot = self.index.get(user_id).copied();
        match slot {
            Some(slot) => self.balances[slot].net += delta,
            None => {
                self.index.insert(user_id.to_string(), self.balances.len());
                self.balances.push(UserBalance::new(user_id, delta));
            }
        }
        self
    }
}

/// Compute net balances with the default aggregator
pub fn compute_balances(expenses: &[Expense]) -> Vec<UserBalance> {
    BalanceAggregator.compute_balances(expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn close_to(actual: &BigDecimal, expected: i64) -> bool {
        (actual - BigDecimal::from(expected)).abs() < dec("0.000001")
    }

    fn net_of(balances: &[UserBalance], user_id: &str) -> BigDecimal {
        balances
            .iter()
            .find(|b| b.user_id == user_id)
            .map(|b| b.net.clone())
            .unwrap()
    }

    fn even_split(id: &str, amount: i64, payor: &str) -> Expense {
        Expense::new(
            id,
            BigDecimal::from(amount),
            payor,
            vec![
                Participant::new("u1", dec("0.5")),
                Participant::new("u2", dec("0.5")),
            ],
        )
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_balances(&[]).is_empty());
    }

    #[test]
    fn test_two_party_split() {
        let balances = compute_balances(&[even_split("e1", 100, "u1")]);

        assert_eq!(balances.len(), 2);
        assert!(close_to(&net_of(&balances, "u1"), 50));
        assert!(close_to(&net_of(&balances, "u2"), -50));
    }

    #[test]
    fn test_three_way_split() {
        let third = BigDecimal::from(1) / BigDecimal::from(3);
        let expense = Expense::new(
            "e1",
            BigDecimal::from(90),
            "u1",
            vec![
                Participant::new("u1", third.clone()),
                Participant::new("u2", third.clone()),
                Participant::new("u3", third),
            ],
        );

        let balances = compute_balances(&[expense]);

        assert!(close_to(&net_of(&balances, "u1"), 60));
        assert!(close_to(&net_of(&balances, "u2"), -30));
        assert!(close_to(&net_of(&balances, "u3"), -30));
    }

    #[test]
    fn test_balanced_payers() {
        let balances =
            compute_balances(&[even_split("e1", 100, "u1"), even_split("e2", 100, "u2")]);

        for balance in &balances {
            assert!(close_to(&balance.net, 0));
        }
    }

    #[test]
    fn test_first_appearance_order() {
        let expense = Expense::new(
            "e1",
            BigDecimal::from(30),
            "u3",
            vec![
                Participant::new("u1", dec("0.5")),
                Participant::new("u2", dec("0.5")),
            ],
        );
        let ids: Vec<String> = compute_balances(&[expense])
            .into_iter()
            .map(|b| b.user_id)
            .collect();
        assert_eq!(ids, vec!["u3", "u1", "u2"]);
    }

    #[test]
    fn test_empty_participants_credit_payor() {
        let expense = Expense::new("e1", BigDecimal::from(40), "u1", Vec::new());
        let balances = compute_balances(&[expense]);

        assert_eq!(balances, vec![UserBalance::new("u1", BigDecimal::from(40))]);
    }

    #[test]
    fn test_payor_outside_participants() {
        let expense = Expense::new(
            "e1",
            BigDecimal::from(60),
            "u1",
            vec![
                Participant::new("u2", dec("0.5")),
                Participant::new("u3", dec("0.5")),
            ],
        );
        let balances = compute_balances(&[expense]);

        assert!(close_to(&net_of(&balances, "u1"), 60));
        assert!(close_to(&net_of(&balances, "u2"), -30));
        assert!(close_to(&net_of(&balances, "u3"), -30));
    }

    #[test]
    fn test_order_independent() {
        let mut expenses = vec![
            even_split("e1", 100, "u1"),
            even_split("e2", 40, "u2"),
            Expense::new(
                "e3",
                BigDecimal::from(75),
                "u3",
                vec![
                    Participant::new("u1", dec("0.2")),
                    Participant::new("u3", dec("0.8")),
                ],
            ),
        ];
        let forward = compute_balances(&expenses);
        expenses.reverse();
        let backward = compute_balances(&expenses);

        assert_eq!(forward.len(), backward.len());
        for balance in &forward {
            assert_eq!(balance.net, net_of(&backward, &balance.user_id));
        }
    }

    #[test]
    fn test_invalid_shares_pass_through() {
        let expense = Expense::new(
            "e1",
            BigDecimal::from(100),
            "u1",
            vec![
                Participant::new("u1", dec("0.5")),
                Participant::new("u2", dec("0.8")),
            ],
        );
        let balances = compute_balances(&[expense]);

        assert!(close_to(&net_of(&balances, "u1"), 50));
        assert!(close_to(&net_of(&balances, "u2"), -80));
    }
}
