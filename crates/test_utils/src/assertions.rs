//! Custom Test Assertions
//!
//! Assertion helpers for money, balances and settlement suggestions with
//! failure messages that name the member involved.

use core_kernel::{MemberId, Money};
use domain_settlement::{apply_suggestions, balances_total, Balance, Suggestion};
use std::collections::HashMap;

/// Asserts that two amounts differ by at most `tolerance`
pub fn assert_money_approx_eq(actual: Money, expected: Money, tolerance: Money) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that balances sum to zero within `tolerance` per member
pub fn assert_zero_sum(balances: &[Balance], tolerance: Money) {
    let total = balances_total(balances);
    let members = i64::try_from(balances.len()).unwrap_or(i64::MAX);
    let bound = Money::from_micros(tolerance.micros().saturating_mul(members));
    assert!(
        total.abs() <= bound,
        "Balances sum to {} which exceeds the bound {} for {} members",
        total,
        bound,
        balances.len()
    );
}

/// Asserts that balances are listed in ascending member order
pub fn assert_sorted_by_member(balances: &[Balance]) {
    for pair in balances.windows(2) {
        assert!(
            pair[0].member_id < pair[1].member_id,
            "Balances out of order: {} before {}",
            pair[0].member_id,
            pair[1].member_id
        );
    }
}

/// Asserts the net balance of one member
pub fn assert_net(balances: &[Balance], member: &str, expected: Money) {
    let balance = balances
        .iter()
        .find(|b| b.member_id.as_str() == member)
        .unwrap_or_else(|| panic!("No balance for member {member}"));
    assert_eq!(
        balance.net, expected,
        "Net balance of {} is {}, expected {}",
        member, balance.net, expected
    );
}

/// Asserts that carrying out `suggestions` leaves every member within
/// `tolerance` of zero
pub fn assert_settles(balances: &[Balance], suggestions: &[Suggestion], tolerance: Money) {
    for balance in apply_suggestions(balances, suggestions) {
        assert!(
            balance.net.is_within(tolerance),
            "Member {} left with {} after settlement (tolerance {})",
            balance.member_id,
            balance.net,
            tolerance
        );
    }
}

/// Asserts that every suggestion moves a positive amount from an original
/// debtor to an original creditor
pub fn assert_valid_suggestions(balances: &[Balance], suggestions: &[Suggestion]) {
    let nets: HashMap<&MemberId, Money> = balances.iter().map(|b| (&b.member_id, b.net)).collect();

    for suggestion in suggestions {
        assert!(
            suggestion.amount.is_positive(),
            "Non-positive transfer {} from {} to {}",
            suggestion.amount,
            suggestion.from,
            suggestion.to
        );
        let from = nets.get(&suggestion.from).copied().unwrap_or_default();
        let to = nets.get(&suggestion.to).copied().unwrap_or_default();
        assert!(from.is_negative(), "Payer {} is not a debtor (net {})", suggestion.from, from);
        assert!(to.is_positive(), "Payee {} is not a creditor (net {})", suggestion.to, to);
    }
}
