//! Greedy debt simplification

use bigdecimal::{BigDecimal, RoundingMode};

use crate::config::default_epsilon;
use crate::traits::SettlementStrategy;
use crate::types::*;

/// Matches the largest remaining creditor against the largest remaining
/// debtor until one side runs out.
///
/// Produces at most `creditors + debtors - 1` transactions. That is optimal
/// for two parties only; finding the true minimum is NP-hard and is not
/// attempted here.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtSimplifier {
    epsilon: BigDecimal,
}

impl Default for DebtSimplifier {
    fn default() -> Self {
        Self::new(default_epsilon())
    }
}

impl DebtSimplifier {
    /// Create a simplifier treating balances within `epsilon` of zero as settled
    pub fn new(epsilon: BigDecimal) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> &BigDecimal {
        &self.epsilon
    }

    /// Produce payments from debtors to creditors that clear `balances`.
    ///
    /// Each emitted amount is rounded to cents; the unrounded amount is what
    /// gets subtracted from both parties. A step that rounds to zero still
    /// reduces both sides but is not emitted.
    pub fn simplify_debts(&self, balances: &[UserBalance]) -> Vec<SettlementTransaction> {
        let neg_epsilon = -self.epsilon.clone();
        let zero = BigDecimal::from(0);

        let mut creditors: Vec<UserBalance> = balances
            .iter()
            .filter(|b| b.net > self.epsilon)
            .cloned()
            .collect();
        creditors.sort_by(|a, b| b.net.cmp(&a.net));

        let mut debtors: Vec<UserBalance> = balances
            .iter()
            .filter(|b| b.net < neg_epsilon)
            .cloned()
            .collect();
        debtors.sort_by(|a, b| a.net.cmp(&b.net));

        let mut transactions = Vec::with_capacity(creditors.len() + debtors.len());
        let (mut i, mut j) = (0, 0);

        while i < creditors.len() && j < debtors.len() {
            let credit = &mut creditors[i];
            let debt = &mut debtors[j];
            let amount = std::cmp::min(credit.net.clone(), -debt.net.clone());
            let rounded = round_to_cents(&amount);

            if rounded > zero {
                transactions.push(SettlementTransaction {
                    from_user_id: debt.user_id.clone(),
                    to_user_id: credit.user_id.clone(),
                    amount: rounded,
                });
            } else {
                tracing::trace!(
                    from = %debt.user_id,
                    to = %credit.user_id,
                    %amount,
                    "skipping sub-cent transfer"
                );
            }

            credit.net -= &amount;
            debt.net += &amount;

            // The smaller side always lands on exactly zero, so at least one
            // pointer moves even when epsilon is zero or negative.
            if credit.net < self.epsilon || credit.net == zero {
                i += 1;
            }
            if debt.net > neg_epsilon || debt.net == zero {
                j += 1;
            }
        }

        tracing::debug!(
            creditors = creditors.len(),
            debtors = debtors.len(),
            transactions = transactions.len(),
            "simplified debts"
        );

        transactions
    }
}

impl SettlementStrategy for DebtSimplifier {
    fn settle(&self, balances: &[UserBalance]) -> Vec<SettlementTransaction> {
        self.simplify_debts(balances)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Round half away from zero to two decimal places
pub fn round_to_cents(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(2, RoundingMode::HalfUp)
}

/// Simplify debts with the default epsilon
pub fn simplify_debts(balances: &[UserBalance]) -> Vec<SettlementTransaction> {
    DebtSimplifier::default().simplify_debts(balances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn balances(entries: &[(&str, &str)]) -> Vec<UserBalance> {
        entries
            .iter()
            .map(|(id, net)| UserBalance::new(*id, dec(net)))
            .collect()
    }

    fn total(transactions: &[SettlementTransaction]) -> BigDecimal {
        transactions.iter().map(|t| &t.amount).sum()
    }

    #[test]
    fn test_two_party_settlement() {
        let txns = simplify_debts(&balances(&[("u1", "50"), ("u2", "-50")]));

        assert_eq!(
            txns,
            vec![SettlementTransaction {
                from_user_id: "u2".to_string(),
                to_user_id: "u1".to_string(),
                amount: BigDecimal::from(50),
            }]
        );
    }

    #[test]
    fn test_multiple_creditors() {
        let txns = simplify_debts(&balances(&[("u1", "30"), ("u2", "20"), ("u3", "-50")]));

        assert_eq!(total(&txns), BigDecimal::from(50));
        assert!(txns.iter().all(|t| t.from_user_id == "u3"));
        assert_eq!(txns[0].to_user_id, "u1");
        assert_eq!(txns[0].amount, BigDecimal::from(30));
        assert_eq!(txns[1].to_user_id, "u2");
        assert_eq!(txns[1].amount, BigDecimal::from(20));
    }

    #[test]
    fn test_largest_matched_first() {
        let txns = simplify_debts(&balances(&[
            ("a", "10"),
            ("b", "-25"),
            ("c", "40"),
            ("d", "-25"),
        ]));

        assert_eq!(txns.len(), 3);
        assert_eq!(txns[0].from_user_id, "b");
        assert_eq!(txns[0].to_user_id, "c");
        assert_eq!(txns[0].amount, BigDecimal::from(25));
        assert_eq!(txns[1].from_user_id, "d");
        assert_eq!(txns[1].to_user_id, "c");
        assert_eq!(txns[1].amount, BigDecimal::from(15));
        assert_eq!(txns[2].from_user_id, "d");
        assert_eq!(txns[2].to_user_id, "a");
        assert_eq!(txns[2].amount, BigDecimal::from(10));
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::all_zero(vec![("u1", "0"), ("u2", "0")])]
    #[case::within_epsilon(vec![("u1", "0.0009"), ("u2", "-0.0009")])]
    #[case::only_creditors(vec![("u1", "10"), ("u2", "5")])]
    #[case::only_debtors(vec![("u1", "-10")])]
    fn test_nothing_to_settle(#[case] entries: Vec<(&'static str, &'static str)>) {
        assert!(simplify_debts(&balances(&entries)).is_empty());
    }

    #[test]
    fn test_tie_resolves_both_sides() {
        let txns = simplify_debts(&balances(&[
            ("u1", "40"),
            ("u2", "-40"),
            ("u3", "10"),
            ("u4", "-10"),
        ]));

        assert_eq!(txns.len(), 2);
        assert_eq!((txns[0].from_user_id.as_str(), txns[0].to_user_id.as_str()), ("u2", "u1"));
        assert_eq!((txns[1].from_user_id.as_str(), txns[1].to_user_id.as_str()), ("u4", "u3"));
    }

    #[test]
    fn test_amounts_rounded_to_cents() {
        let third = BigDecimal::from(100) / BigDecimal::from(3);
        let input = vec![
            UserBalance::new("u1", third.clone() * BigDecimal::from(2)),
            UserBalance::new("u2", -third.clone()),
            UserBalance::new("u3", -third),
        ];
        let txns = simplify_debts(&input);

        assert_eq!(txns.len(), 2);
        for txn in &txns {
            assert_eq!(txn.amount, txn.amount.with_scale(2));
            assert_eq!(txn.amount, dec("33.33"));
        }
    }

    #[test]
    fn test_transaction_count_bound() {
        let input = balances(&[
            ("a", "17.35"),
            ("b", "4.10"),
            ("c", "61.00"),
            ("d", "-22.45"),
            ("e", "-30"),
            ("f", "-30"),
        ]);
        let txns = simplify_debts(&input);

        assert!(txns.len() <= 3 + 3 - 1);
        assert_eq!(total(&txns), dec("82.45"));
    }

    #[test]
    fn test_custom_epsilon_drops_small_balances() {
        let input = balances(&[("u1", "0.4"), ("u2", "-0.4"), ("u3", "5"), ("u4", "-5")]);

        assert_eq!(simplify_debts(&input).len(), 2);

        let coarse = DebtSimplifier::new(dec("0.5"));
        let txns = coarse.simplify_debts(&input);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, BigDecimal::from(5));
    }

    #[test]
    fn test_zero_epsilon_still_terminates() {
        let exact = DebtSimplifier::new(BigDecimal::from(0));

        let txns = exact.simplify_debts(&balances(&[("u1", "50"), ("u2", "-50")]));
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, BigDecimal::from(50));

        let txns = exact.simplify_debts(&balances(&[
            ("a", "30"),
            ("b", "-10"),
            ("c", "-20"),
            ("d", "10"),
            ("e", "-10"),
        ]));
        assert_eq!(txns.len(), 3);
        assert_eq!(total(&txns), BigDecimal::from(40));
    }

    #[test]
    fn test_negative_epsilon_still_terminates() {
        let txns = DebtSimplifier::new(dec("-0.5"))
            .simplify_debts(&balances(&[("u1", "0"), ("u2", "25"), ("u3", "-25")]));

        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].from_user_id, "u3");
        assert_eq!(txns[0].to_user_id, "u2");
        assert_eq!(txns[0].amount, BigDecimal::from(25));
    }

    #[test]
    fn test_input_left_untouched() {
        let input = balances(&[("u1", "50"), ("u2", "-50")]);
        let before = input.clone();
        let _ = simplify_debts(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(&dec("1.005")), dec("1.01"));
        assert_eq!(round_to_cents(&dec("1.004")), dec("1.00"));
        assert_eq!(round_to_cents(&dec("2")), dec("2.00"));
    }

    #[test]
    fn test_strategy_name() {
        assert_eq!(DebtSimplifier::default().name(), "greedy");
    }
}
