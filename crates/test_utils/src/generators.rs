//! Property-Based Test Generators
//!
//! Proptest strategies for pots, expenses and balance lists. Member lists
//! come out in shuffled order so order-independence is exercised for free.

use core_kernel::{MemberId, Money};
use domain_pot::{Expense, Member, Pot, SplitEntry};
use domain_settlement::Balance;
use proptest::prelude::*;
use proptest::sample::subsequence;

/// Member IDs the generators draw from
pub const MEMBER_NAMES: &[&str] = &[
    "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi",
];

/// Strategy for generating 1..=max distinct member IDs in random order
pub fn member_ids_strategy(max: usize) -> impl Strategy<Value = Vec<&'static str>> {
    let max = max.clamp(1, MEMBER_NAMES.len());
    subsequence(MEMBER_NAMES, 1..=max).prop_shuffle()
}

/// Strategy for amounts with cent precision (0.01 to 50,000)
pub fn cent_amount_strategy() -> impl Strategy<Value = Money> {
    (1i64..=5_000_000i64).prop_map(|cents| Money::from_micros(cents * 10_000))
}

/// Strategy for amounts with full micro-unit precision (up to 10,000)
pub fn micro_amount_strategy() -> impl Strategy<Value = Money> {
    (1i64..=10_000_000_000i64).prop_map(Money::from_micros)
}

/// Strategy for positive expense amounts of either precision
pub fn amount_strategy() -> impl Strategy<Value = Money> {
    prop_oneof![cent_amount_strategy(), micro_amount_strategy()]
}

/// Splits `amount` by weights; the last entry absorbs the remainder
pub fn split_by_weights(amount: Money, members: &[MemberId], weights: &[(usize, u32)]) -> Vec<SplitEntry> {
    let total_weight: i128 = weights.iter().map(|(_, w)| i128::from(*w)).sum();
    let total = i128::from(amount.micros());
    let mut assigned: i128 = 0;

    weights
        .iter()
        .enumerate()
        .map(|(i, (member, weight))| {
            let share = if i + 1 == weights.len() {
                total - assigned
            } else {
                total * i128::from(*weight) / total_weight
            };
            assigned += share;
            let micros = i64::try_from(share).unwrap_or(i64::MAX);
            SplitEntry::new(members[*member].clone(), Money::from_micros(micros))
        })
        .collect()
}

/// Strategy for an expense among `members`, equal or explicit split
///
/// `members` must not be empty.
pub fn expense_strategy(members: Vec<MemberId>) -> impl Strategy<Value = Expense> {
    let count = members.len();
    (
        0..count,
        amount_strategy(),
        proptest::collection::vec((0..count, 1u32..10u32), 0..=count),
    )
        .prop_map(move |(payer, amount, weights)| {
            let expense = Expense::new(amount, members[payer].clone());
            if weights.is_empty() {
                expense
            } else {
                let split = split_by_weights(amount, &members, &weights);
                expense.with_split(split)
            }
        })
}

/// Strategy for a pot with consistent member references
pub fn pot_strategy(max_members: usize, max_expenses: usize) -> impl Strategy<Value = Pot> {
    member_ids_strategy(max_members).prop_flat_map(move |ids| {
        let members: Vec<MemberId> = ids.iter().map(|id| MemberId::from(*id)).collect();
        proptest::collection::vec(expense_strategy(members.clone()), 0..=max_expenses).prop_map(
            move |expenses| {
                let mut pot = Pot::new("Generated pot", "DOT");
                pot.members = members.iter().cloned().map(Member::new).collect();
                pot.expenses = expenses;
                pot
            },
        )
    })
}

/// Strategy for balances in whole cents that sum to exactly zero
pub fn zero_sum_balances_strategy(max_members: usize) -> impl Strategy<Value = Vec<Balance>> {
    member_ids_strategy(max_members)
        .prop_flat_map(|ids| {
            let n = ids.len();
            (Just(ids), proptest::collection::vec(-500_000i64..=500_000i64, n))
        })
        .prop_map(|(ids, cents)| {
            let mut balances: Vec<Balance> = ids
                .iter()
                .zip(&cents)
                .map(|(id, c)| Balance::new(*id, Money::from_micros(c * 10_000)))
                .collect();
            let total: Money = balances.iter().map(|b| b.net).sum();
            if let Some(last) = balances.last_mut() {
                last.net -= total;
            }
            balances
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn explicit_splits_add_up(expense in expense_strategy(vec![
            MemberId::from("a"), MemberId::from("b"), MemberId::from("c"),
        ])) {
            if expense.has_explicit_split() {
                prop_assert_eq!(expense.split_total(), expense.amount);
            }
        }

        #[test]
        fn generated_pots_have_no_dangling_references(pot in pot_strategy(5, 10)) {
            prop_assert!(pot.dangling_references().is_empty());
            prop_assert!(pot.duplicate_member_ids().is_empty());
        }

        #[test]
        fn generated_balances_sum_to_zero(balances in zero_sum_balances_strategy(6)) {
            let total: Money = balances.iter().map(|b| b.net).sum();
            prop_assert!(total.is_zero());
        }
    }
}
