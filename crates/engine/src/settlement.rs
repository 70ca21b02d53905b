//! Settlement transfer planning.
//!
//! [`plan`] converts the balances produced by the allocation engine into an
//! ordered list of suggested payments. Like the allocation engine it is pure:
//! same balances in, same transfers out.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AttendeeBalance;

/// Balances closer to zero than this are treated as settled.
pub const SETTLE_TOLERANCE: f64 = 0.01;

/// How transfers are matched between debtors and creditors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStrategy {
    /// Match every debtor against the single largest creditor, without
    /// decrementing the creditor's capacity between debtors. This mirrors the
    /// historical suggestion list: with several debtors the same creditor can
    /// be suggested for more money than they are owed, so the result is a
    /// display hint, not a ledger clearing.
    #[default]
    SingleCreditorSuggestion,
    /// Two-pointer greedy that decrements both sides and advances past
    /// exhausted parties. Whenever the balances sum to zero, applying every
    /// emitted transfer drives all balances to within [`SETTLE_TOLERANCE`] of
    /// zero.
    MinimalTransferCount,
}

/// A suggested payment from a debtor to a creditor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettlementTransfer {
    pub from_attendee_id: Uuid,
    pub to_attendee_id: Uuid,
    pub amount: f64,
}

/// Returns `true` when every balance is within [`SETTLE_TOLERANCE`] of zero.
pub fn is_fully_settled(balances: &HashMap<Uuid, AttendeeBalance>) -> bool {
    balances
        .values()
        .all(|balance| balance.balance.abs() < SETTLE_TOLERANCE)
}

/// Plans the transfers that settle the given balances.
///
/// Debtors are processed most indebted first, creditors largest first, with
/// attendee ids breaking ties so the plan is stable across calls. Balances
/// within tolerance of zero are excluded up front. With no creditors at all
/// the plan is empty even if debtors remain; callers that need a strict
/// "fully balanced" guarantee must check the balance sum themselves.
pub fn plan(
    balances: &HashMap<Uuid, AttendeeBalance>,
    strategy: SettlementStrategy,
) -> Vec<SettlementTransfer> {
    let mut debtors: Vec<(Uuid, f64)> = balances
        .values()
        .filter(|b| b.balance < -SETTLE_TOLERANCE)
        .map(|b| (b.attendee_id, -b.balance))
        .collect();
    let mut creditors: Vec<(Uuid, f64)> = balances
        .values()
        .filter(|b| b.balance > SETTLE_TOLERANCE)
        .map(|b| (b.attendee_id, b.balance))
        .collect();

    debtors.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    creditors.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    if debtors.is_empty() || creditors.is_empty() {
        return Vec::new();
    }

    match strategy {
        SettlementStrategy::SingleCreditorSuggestion => {
            let (creditor_id, creditor_balance) = creditors[0];
            debtors
                .iter()
                .map(|&(debtor_id, owed)| SettlementTransfer {
                    from_attendee_id: debtor_id,
                    to_attendee_id: creditor_id,
                    amount: owed.min(creditor_balance),
                })
                .collect()
        }
        SettlementStrategy::MinimalTransferCount => {
            let mut transfers = Vec::new();
            let (mut debtor_idx, mut creditor_idx) = (0, 0);

            while debtor_idx < debtors.len() && creditor_idx < creditors.len() {
                let debtor = &mut debtors[debtor_idx];
                let creditor = &mut creditors[creditor_idx];
                let amount = debtor.1.min(creditor.1);

                transfers.push(SettlementTransfer {
                    from_attendee_id: debtor.0,
                    to_attendee_id: creditor.0,
                    amount,
                });

                debtor.1 -= amount;
                creditor.1 -= amount;
                if debtors[debtor_idx].1 < SETTLE_TOLERANCE {
                    debtor_idx += 1;
                }
                if creditors[creditor_idx].1 < SETTLE_TOLERANCE {
                    creditor_idx += 1;
                }
            }

            transfers
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balances(entries: &[(&str, f64)]) -> (HashMap<Uuid, AttendeeBalance>, HashMap<String, Uuid>) {
        let mut map = HashMap::new();
        let mut ids = HashMap::new();
        for (name, balance) in entries {
            let id = Uuid::new_v4();
            ids.insert((*name).to_string(), id);
            map.insert(
                id,
                AttendeeBalance {
                    attendee_id: id,
                    name: (*name).to_string(),
                    contribution: balance.max(0.0),
                    category_expenses: HashMap::new(),
                    total_expense: 0.0,
                    balance: *balance,
                },
            );
        }
        (map, ids)
    }

    fn remaining_after(
        balances: &HashMap<Uuid, AttendeeBalance>,
        transfers: &[SettlementTransfer],
    ) -> HashMap<Uuid, f64> {
        let mut remaining: HashMap<Uuid, f64> =
            balances.values().map(|b| (b.attendee_id, b.balance)).collect();
        for transfer in transfers {
            *remaining.get_mut(&transfer.from_attendee_id).unwrap() += transfer.amount;
            *remaining.get_mut(&transfer.to_attendee_id).unwrap() -= transfer.amount;
        }
        remaining
    }

    #[test]
    fn single_debtor_pays_single_creditor() {
        let (map, ids) = balances(&[("Anna", 100.0), ("Bruno", -100.0)]);

        let transfers = plan(&map, SettlementStrategy::SingleCreditorSuggestion);

        assert_eq!(
            transfers,
            vec![SettlementTransfer {
                from_attendee_id: ids["Bruno"],
                to_attendee_id: ids["Anna"],
                amount: 100.0,
            }]
        );
    }

    #[test]
    fn no_creditor_yields_no_transfers() {
        // A fully spent pool: one attendee at zero, one in debt.
        let (map, _) = balances(&[("Anna", 0.0), ("Bruno", -100.0)]);

        assert!(plan(&map, SettlementStrategy::SingleCreditorSuggestion).is_empty());
        assert!(plan(&map, SettlementStrategy::MinimalTransferCount).is_empty());
    }

    #[test]
    fn settled_balances_produce_empty_plan() {
        let (map, _) = balances(&[("Anna", 0.004), ("Bruno", -0.004)]);

        assert!(is_fully_settled(&map));
        assert!(plan(&map, SettlementStrategy::SingleCreditorSuggestion).is_empty());
    }

    #[test]
    fn suggestion_does_not_decrement_the_creditor() {
        let (map, ids) = balances(&[("Anna", 60.0), ("Bruno", -40.0), ("Carla", -20.0)]);

        let transfers = plan(&map, SettlementStrategy::SingleCreditorSuggestion);

        // Both debtors are pointed at Anna, each capped only by her full
        // balance, so the suggestions overshoot what she is owed in total.
        assert_eq!(transfers.len(), 2);
        assert!(transfers.iter().all(|t| t.to_attendee_id == ids["Anna"]));
        assert_eq!(transfers[0].from_attendee_id, ids["Bruno"]);
        assert_eq!(transfers[0].amount, 40.0);
        assert_eq!(transfers[1].from_attendee_id, ids["Carla"]);
        assert_eq!(transfers[1].amount, 20.0);
    }

    #[test]
    fn suggestion_caps_at_the_creditor_balance() {
        let (map, ids) = balances(&[("Anna", 30.0), ("Bruno", -100.0), ("Carla", 70.0)]);

        let transfers = plan(&map, SettlementStrategy::SingleCreditorSuggestion);

        // Carla is the largest creditor and caps the suggestion at 70.
        assert_eq!(
            transfers,
            vec![SettlementTransfer {
                from_attendee_id: ids["Bruno"],
                to_attendee_id: ids["Carla"],
                amount: 70.0,
            }]
        );
    }

    #[test]
    fn minimal_transfers_zero_out_all_balances() {
        let (map, _) = balances(&[
            ("Anna", 90.0),
            ("Bruno", -40.0),
            ("Carla", -20.0),
            ("Dario", 30.0),
            ("Elena", -60.0),
        ]);

        let transfers = plan(&map, SettlementStrategy::MinimalTransferCount);

        for (_, remaining) in remaining_after(&map, &transfers) {
            assert!(remaining.abs() < SETTLE_TOLERANCE, "left over {remaining}");
        }
        assert!(transfers.iter().all(|t| t.amount > 0.0));
    }

    #[test]
    fn minimal_transfers_split_one_debt_across_creditors() {
        let (map, ids) = balances(&[("Anna", 30.0), ("Bruno", -100.0), ("Carla", 70.0)]);

        let transfers = plan(&map, SettlementStrategy::MinimalTransferCount);

        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].to_attendee_id, ids["Carla"]);
        assert_eq!(transfers[0].amount, 70.0);
        assert_eq!(transfers[1].to_attendee_id, ids["Anna"]);
        assert_eq!(transfers[1].amount, 30.0);
        assert!(transfers.iter().all(|t| t.from_attendee_id == ids["Bruno"]));
    }

    #[test]
    fn plan_is_stable_across_calls() {
        let (map, _) = balances(&[
            ("Anna", 25.0),
            ("Bruno", -10.0),
            ("Carla", -15.0),
        ]);

        let first = plan(&map, SettlementStrategy::MinimalTransferCount);
        let second = plan(&map, SettlementStrategy::MinimalTransferCount);

        assert_eq!(first, second);
    }
}
