//! Test Data Builders
//!
//! Builder for pot snapshots. Tests list the members and expenses they care
//! about; amounts can be given in whole units or as `Money`.

use core_kernel::Money;
use domain_pot::{Expense, Member, Pot, PotError, SplitEntry};

/// Builder for constructing test pots
///
/// `build` produces the raw snapshot without checks, so tests can feed
/// dangling references or duplicate members to the engine. `build_checked`
/// goes through the pot's own validation.
pub struct TestPotBuilder {
    name: String,
    base_currency: String,
    members: Vec<Member>,
    expenses: Vec<Expense>,
}

impl Default for TestPotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPotBuilder {
    pub fn new() -> Self {
        Self {
            name: "Test pot".to_string(),
            base_currency: "DOT".to_string(),
            members: Vec::new(),
            expenses: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_base_currency(mut self, currency: impl Into<String>) -> Self {
        self.base_currency = currency.into();
        self
    }

    /// Adds members by ID, in the given order
    pub fn with_members(mut self, ids: &[&str]) -> Self {
        self.members.extend(ids.iter().map(|id| Member::new(*id)));
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// `payer` pays `units`, shared equally by every member
    pub fn paid(self, payer: &str, units: i64) -> Self {
        self.paid_money(payer, Money::from_units(units))
    }

    /// `payer` pays `amount`, shared equally by every member
    pub fn paid_money(mut self, payer: &str, amount: Money) -> Self {
        self.expenses.push(Expense::new(amount, payer));
        self
    }

    /// `payer` pays the sum of `shares`, split explicitly in whole units
    pub fn paid_for(mut self, payer: &str, shares: &[(&str, i64)]) -> Self {
        let split: Vec<SplitEntry> = shares
            .iter()
            .map(|(member, units)| SplitEntry::new(*member, Money::from_units(*units)))
            .collect();
        let amount = split.iter().map(|entry| entry.amount).sum();
        self.expenses.push(Expense::new(amount, payer).with_split(split));
        self
    }

    pub fn with_expense(mut self, expense: Expense) -> Self {
        self.expenses.push(expense);
        self
    }

    /// Builds the raw snapshot
    pub fn build(self) -> Pot {
        let mut pot = Pot::new(self.name, self.base_currency);
        pot.members = self.members;
        pot.expenses = self.expenses;
        pot
    }

    /// Builds through `Pot::add_member` / `Pot::add_expense`
    pub fn build_checked(self) -> Result<Pot, PotError> {
        let mut pot = Pot::new(self.name, self.base_currency);
        for member in self.members {
            pot.add_member(member)?;
        }
        for expense in self.expenses {
            pot.add_expense(expense)?;
        }
        Ok(pot)
    }
}
