//! Pre-built Test Fixtures
//!
//! Ready-to-use pots for the scenarios the settlement suite keeps coming
//! back to. Every fixture uses single-letter member IDs so expected
//! balances read naturally in assertions.

use chrono::NaiveDate;
use core_kernel::{MemberId, Money};
use domain_pot::{Expense, Member, Pot, SplitEntry};
use fake::faker::name::en::FirstName;
use fake::Fake;

/// Fixture for member data
pub struct MemberFixtures;

impl MemberFixtures {
    /// A member with a generated display name
    pub fn named(id: &str) -> Member {
        let name: String = FirstName().fake();
        Member::new(id).with_name(name)
    }

    /// A member with a wallet address for payout tests
    pub fn with_wallet(id: &str) -> Member {
        Member::new(id).with_address(format!("5{}Wallet{}", id, "x".repeat(40)))
    }

    pub fn ids(ids: &[&str]) -> Vec<MemberId> {
        ids.iter().map(|id| MemberId::from(*id)).collect()
    }
}

/// Fixture for pot snapshots
pub struct PotFixtures;

impl PotFixtures {
    fn with_members(ids: &[&str]) -> Pot {
        let mut pot = Pot::new("Fixture pot", "DOT");
        pot.members = ids.iter().map(|id| MemberFixtures::named(id)).collect();
        pot
    }

    /// A, B and C with no expenses yet
    pub fn three_members() -> Pot {
        Self::with_members(&["A", "B", "C"])
    }

    /// A pays 30, shared equally by A, B and C
    pub fn dinner_for_three() -> Pot {
        let mut pot = Self::three_members();
        pot.expenses.push(
            Expense::new(Money::from_units(30), "A")
                .with_memo("Dinner")
                .with_date(Self::trip_day()),
        );
        pot
    }

    /// A pays 100, shared equally by A, B and C
    pub fn repeating_decimal() -> Pot {
        let mut pot = Self::three_members();
        pot.expenses.push(Expense::new(Money::from_units(100), "A"));
        pot
    }

    /// A pays 10 for B, B pays 10 for C, C pays 10 for A
    pub fn circular_debt() -> Pot {
        let mut pot = Self::three_members();
        for (payer, beneficiary) in [("A", "B"), ("B", "C"), ("C", "A")] {
            pot.expenses.push(
                Expense::new(Money::from_units(10), payer)
                    .with_split(vec![SplitEntry::new(beneficiary, Money::from_units(10))]),
            );
        }
        pot
    }

    /// One member paying for everything
    pub fn single_member() -> Pot {
        let mut pot = Self::with_members(&["solo"]);
        pot.expenses.push(Expense::new(Money::from_units(42), "solo"));
        pot.expenses.push(
            Expense::new(Money::from_units(8), "solo")
                .with_split(vec![SplitEntry::new("solo", Money::from_units(8))]),
        );
        pot
    }

    /// A weekend trip with mixed equal and explicit splits across four members
    pub fn weekend_trip() -> Pot {
        let mut pot = Self::with_members(&["A", "B", "C", "D"]);
        pot.name = "Weekend trip".to_string();
        pot.expenses = vec![
            Expense::new(Money::from_units(120), "A").with_memo("Cabin"),
            Expense::new(Money::from_units(45), "B").with_split(vec![
                SplitEntry::new("B", Money::from_units(15)),
                SplitEntry::new("C", Money::from_units(15)),
                SplitEntry::new("D", Money::from_units(15)),
            ]),
            Expense::new(Money::from_units(20), "C")
                .with_split(vec![SplitEntry::new("A", Money::from_units(20))]),
        ];
        pot
    }

    /// Members but no expenses
    pub fn no_expenses() -> Pot {
        Self::with_members(&["A", "B", "C", "D"])
    }

    pub fn trip_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 17).unwrap()
    }
}
