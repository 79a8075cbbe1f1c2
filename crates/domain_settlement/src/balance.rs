//! Net balances per member
//!
//! [`BalanceCalculator`] reduces a pot snapshot to one net position per
//! member: everything the member paid minus everything the member owes.
//! Amounts are integer micro-units, so accumulation is exact; the only
//! rounding is the per-person share of an equally split expense.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

use core_kernel::{MemberId, Money, MoneyError};
use domain_pot::{Pot, ReferenceRole};
use crate::config::{SettlementConfig, UnknownMemberPolicy};
use crate::error::SettlementError;

/// A member's aggregate position across all expenses
///
/// Positive `net` means the member is owed money, negative means the member
/// owes money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub member_id: MemberId,
    pub net: Money,
}

/// Which way a balance points once tolerance is taken into account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Owed money by the pot
    Creditor,
    /// Owes money to the pot
    Debtor,
    Settled,
}

impl Balance {
    pub fn new(member_id: impl Into<MemberId>, net: Money) -> Self {
        Self {
            member_id: member_id.into(),
            net,
        }
    }

    pub fn position(&self, tolerance: Money) -> Position {
        if self.net > tolerance {
            Position::Creditor
        } else if self.net < -tolerance {
            Position::Debtor
        } else {
            Position::Settled
        }
    }
}

/// Sum of every net balance, clamped to the `Money` range
pub fn balances_total(balances: &[Balance]) -> Money {
    let total = exact_total(balances);
    let clamped = total.clamp(i128::from(i64::MIN), i128::from(i64::MAX));
    Money::from_micros(i64::try_from(clamped).unwrap_or_default())
}

/// True when the balances sum to zero within `tolerance` per member
pub fn is_zero_sum(balances: &[Balance], tolerance: Money) -> bool {
    let count = i128::try_from(balances.len()).unwrap_or(i128::MAX);
    let bound = i128::from(tolerance.micros()).saturating_mul(count);
    exact_total(balances).unsigned_abs() <= bound.unsigned_abs()
}

/// Sum in i128 so that large opposing balances cannot wrap
fn exact_total(balances: &[Balance]) -> i128 {
    balances.iter().map(|b| i128::from(b.net.micros())).sum()
}

#[derive(Debug, Default, Clone, Copy)]
struct LedgerEntry {
    paid: Money,
    owed: Money,
}

/// Reduces a pot snapshot into per-member net balances
#[derive(Debug, Clone, Default)]
pub struct BalanceCalculator {
    config: SettlementConfig,
}

impl BalanceCalculator {
    pub fn new(config: SettlementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Computes one balance per member, sorted by member ID
    ///
    /// Expenses without an explicit split are shared equally by every member
    /// of the pot. The result does not depend on the order of `pot.members`.
    ///
    /// # Errors
    ///
    /// - `UnknownMember` / `DuplicateMember` under `UnknownMemberPolicy::Reject`
    /// - `Money` if an amount overflows the micro-unit range
    #[instrument(
        skip_all,
        fields(pot_id = %pot.id, members = pot.members.len(), expenses = pot.expenses.len())
    )]
    pub fn compute(&self, pot: &Pot) -> Result<Vec<Balance>, SettlementError> {
        self.check_references(pot)?;

        let mut ledger: BTreeMap<MemberId, LedgerEntry> = pot
            .member_ids()
            .into_iter()
            .map(|id| (id, LedgerEntry::default()))
            .collect();
        let member_count = u32::try_from(ledger.len()).map_err(|_| MoneyError::Overflow)?;

        for (index, expense) in pot.expenses.iter().enumerate() {
            match ledger.get_mut(&expense.paid_by) {
                Some(entry) => entry.paid = entry.paid.checked_add(&expense.amount)?,
                None => self.skip_dangling(index, &expense.paid_by, ReferenceRole::Payer),
            }

            if expense.has_explicit_split() {
                for share in &expense.split {
                    match ledger.get_mut(&share.member_id) {
                        Some(entry) => entry.owed = entry.owed.checked_add(&share.amount)?,
                        None => self.skip_dangling(index, &share.member_id, ReferenceRole::Split),
                    }
                }
            } else if member_count > 0 {
                let per_person = expense.amount.divide_evenly(member_count)?;
                for entry in ledger.values_mut() {
                    entry.owed = entry.owed.checked_add(&per_person)?;
                }
            }
        }

        let balances = ledger
            .into_iter()
            .map(|(member_id, entry)| {
                entry
                    .paid
                    .checked_sub(&entry.owed)
                    .map(|net| Balance { member_id, net })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.check_zero_sum(&balances);
        debug!(
            creditors = balances
                .iter()
                .filter(|b| b.position(self.config.tolerance) == Position::Creditor)
                .count(),
            debtors = balances
                .iter()
                .filter(|b| b.position(self.config.tolerance) == Position::Debtor)
                .count(),
            "Balances computed"
        );

        Ok(balances)
    }

    fn check_references(&self, pot: &Pot) -> Result<(), SettlementError> {
        let duplicates = pot.duplicate_member_ids();
        let dangling = pot.dangling_references();

        match self.config.unknown_member_policy {
            UnknownMemberPolicy::Reject => {
                if let Some(id) = duplicates.into_iter().next() {
                    return Err(SettlementError::DuplicateMember(id));
                }
                if let Some(reference) = dangling.into_iter().next() {
                    return Err(reference.into());
                }
            }
            UnknownMemberPolicy::Ignore => {
                for id in duplicates {
                    warn!(member_id = %id, "Duplicate member collapsed into one balance");
                }
            }
        }
        Ok(())
    }

    fn skip_dangling(&self, expense_index: usize, member_id: &MemberId, role: ReferenceRole) {
        warn!(
            expense_index,
            member_id = %member_id,
            role = %role,
            "Ignoring amount for member outside the pot"
        );
    }

    /// Logs when the balances drift from zero by more than rounding allows.
    ///
    /// Callers still receive the balances; the suggester's tolerance absorbs
    /// the drift.
    fn check_zero_sum(&self, balances: &[Balance]) {
        if !is_zero_sum(balances, self.config.tolerance) {
            warn!(
                total = %balances_total(balances),
                tolerance = %self.config.tolerance,
                members = balances.len(),
                "Balances do not sum to zero within tolerance"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_pot::{Expense, Member, SplitEntry};

    fn pot(members: &[&str], expenses: Vec<Expense>) -> Pot {
        let mut pot = Pot::new("unit", "DOT");
        pot.members = members.iter().map(|id| Member::new(*id)).collect();
        pot.expenses = expenses;
        pot
    }

    fn nets(balances: &[Balance]) -> Vec<(&str, i64)> {
        balances
            .iter()
            .map(|b| (b.member_id.as_str(), b.net.micros()))
            .collect()
    }

    #[test]
    fn test_equal_split_default() {
        let pot = pot(&["A", "B", "C"], vec![Expense::new(Money::from_units(30), "A")]);
        let balances = BalanceCalculator::default().compute(&pot).unwrap();

        assert_eq!(
            nets(&balances),
            [("A", 20_000_000), ("B", -10_000_000), ("C", -10_000_000)]
        );
    }

    #[test]
    fn test_explicit_split_overrides_equal_split() {
        let expense = Expense::new(Money::from_units(10), "A")
            .with_split(vec![SplitEntry::new("B", Money::from_units(10))]);
        let pot = pot(&["A", "B", "C"], vec![expense]);
        let balances = BalanceCalculator::default().compute(&pot).unwrap();

        assert_eq!(nets(&balances), [("A", 10_000_000), ("B", -10_000_000), ("C", 0)]);
    }

    #[test]
    fn test_zero_amount_expense_is_noop() {
        let pot = pot(&["A", "B", "C"], vec![Expense::new(Money::ZERO, "B")]);
        let balances = BalanceCalculator::default().compute(&pot).unwrap();

        assert!(balances.iter().all(|b| b.net.is_zero()));
    }

    #[test]
    fn test_ignore_policy_drops_unknown_payer() {
        let config = SettlementConfig::default()
            .with_unknown_member_policy(UnknownMemberPolicy::Ignore);
        let pot = pot(&["A", "B"], vec![Expense::new(Money::from_units(10), "Z")]);
        let balances = BalanceCalculator::new(config).compute(&pot).unwrap();

        assert_eq!(nets(&balances), [("A", -5_000_000), ("B", -5_000_000)]);
        assert!(!is_zero_sum(&balances, Money::TOLERANCE));
    }

    #[test]
    fn test_total_does_not_wrap() {
        let max = Money::from_micros(i64::MAX);
        let balances = [
            Balance::new("A", max),
            Balance::new("B", max),
            Balance::new("C", Money::from_micros(i64::MIN)),
        ];

        assert_eq!(balances_total(&balances), Money::from_micros(i64::MAX - 1));
        assert!(!is_zero_sum(&balances, Money::TOLERANCE));
    }

    #[test]
    fn test_position_respects_tolerance() {
        let tolerance = Money::TOLERANCE;
        assert_eq!(Balance::new("A", Money::from_micros(2)).position(tolerance), Position::Creditor);
        assert_eq!(Balance::new("A", Money::from_micros(-2)).position(tolerance), Position::Debtor);
        assert_eq!(Balance::new("A", Money::from_micros(1)).position(tolerance), Position::Settled);
    }
}
