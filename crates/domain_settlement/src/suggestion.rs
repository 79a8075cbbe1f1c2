//! Settle-up suggestions
//!
//! [`SettlementSuggester`] turns net balances into point-to-point transfers
//! with a greedy two-pointer walk over debtors and creditors. The walk is not
//! guaranteed to find the fewest possible transfers (that is a subset-sum
//! problem); it is deterministic, runs in O(n log n), and every transfer goes
//! from a real debtor to a real creditor.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use core_kernel::{MemberId, Money};
use crate::balance::Balance;

/// A directed transfer that reduces `from`'s debt and `to`'s credit
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

impl Suggestion {
    pub fn new(from: impl Into<MemberId>, to: impl Into<MemberId>, amount: Money) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

/// One side of the walk: a member and what is still left to move
struct Party<'a> {
    member_id: &'a MemberId,
    remaining: Money,
}

impl<'a> Party<'a> {
    /// Member ID ascending, larger magnitude first on ties
    fn ordered(mut parties: Vec<Party<'a>>) -> Vec<Party<'a>> {
        parties.sort_by(|a, b| {
            a.member_id
                .cmp(b.member_id)
                .then_with(|| b.remaining.cmp(&a.remaining))
        });
        parties
    }
}

/// Produces transfers that bring every balance to zero
#[derive(Debug, Clone)]
pub struct SettlementSuggester {
    tolerance: Money,
}

impl Default for SettlementSuggester {
    fn default() -> Self {
        Self::new(Money::TOLERANCE)
    }
}

impl SettlementSuggester {
    pub fn new(tolerance: Money) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> Money {
        self.tolerance
    }

    /// Suggests transfers for the given balances
    ///
    /// Members within tolerance of zero take no part. The result is sorted by
    /// `(from, to, amount)` and does not depend on the order of `balances`.
    pub fn suggest(&self, balances: &[Balance]) -> Vec<Suggestion> {
        let tolerance = self.tolerance;

        let mut debtors = Party::ordered(
            balances
                .iter()
                .filter(|b| b.net < -tolerance)
                .map(|b| Party {
                    member_id: &b.member_id,
                    remaining: b.net.abs(),
                })
                .collect(),
        );
        let mut creditors = Party::ordered(
            balances
                .iter()
                .filter(|b| b.net > tolerance)
                .map(|b| Party {
                    member_id: &b.member_id,
                    remaining: b.net,
                })
                .collect(),
        );

        let mut suggestions = Vec::with_capacity(debtors.len() + creditors.len());
        let (mut d, mut c) = (0, 0);

        while d < debtors.len() && c < creditors.len() {
            let debtor = &mut debtors[d];
            let creditor = &mut creditors[c];

            if debtor.remaining.is_within(tolerance) {
                d += 1;
                continue;
            }
            if creditor.remaining.is_within(tolerance) {
                c += 1;
                continue;
            }

            let amount = debtor.remaining.min(creditor.remaining);
            if amount < tolerance {
                break;
            }

            suggestions.push(Suggestion {
                from: debtor.member_id.clone(),
                to: creditor.member_id.clone(),
                amount,
            });
            debtor.remaining -= amount;
            creditor.remaining -= amount;
        }

        let unmatched_debt: Money = debtors.iter().map(|p| p.remaining).sum();
        let unmatched_credit: Money = creditors.iter().map(|p| p.remaining).sum();
        if !unmatched_debt.is_within(tolerance) || !unmatched_credit.is_within(tolerance) {
            warn!(
                unmatched_debt = %unmatched_debt,
                unmatched_credit = %unmatched_credit,
                "Balances left unsettled; input does not sum to zero"
            );
        }

        suggestions.sort();
        debug!(
            debtors = debtors.len(),
            creditors = creditors.len(),
            transfers = suggestions.len(),
            "Settlement suggested"
        );
        suggestions
    }
}

/// Balances after the given transfers are carried out
///
/// Each suggestion raises `from`'s net and lowers `to`'s net by its amount.
/// Suggestions naming members absent from `balances` are skipped. Order of
/// the returned balances follows `balances`.
pub fn apply_suggestions(balances: &[Balance], suggestions: &[Suggestion]) -> Vec<Balance> {
    let mut settled = balances.to_vec();
    let index: HashMap<MemberId, usize> = settled
        .iter()
        .enumerate()
        .map(|(i, b)| (b.member_id.clone(), i))
        .collect();

    for suggestion in suggestions {
        if let (Some(&from), Some(&to)) = (index.get(&suggestion.from), index.get(&suggestion.to)) {
            settled[from].net += suggestion.amount;
            settled[to].net -= suggestion.amount;
        }
    }

    settled
}
