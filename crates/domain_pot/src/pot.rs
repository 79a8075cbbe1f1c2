//! The pot snapshot handed to settlement
//!
//! A `Pot` is an immutable-by-convention snapshot of members and expenses as
//! the application last loaded them. Nothing here touches storage; the
//! snapshot can be built in code or deserialized from the application's JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use core_kernel::{MemberId, PotId};
use crate::error::PotError;
use crate::expense::Expense;
use crate::member::Member;

/// Where in an expense a member reference appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceRole {
    /// The expense's `paidBy`
    Payer,
    /// A `split[].memberId` entry
    Split,
}

impl fmt::Display for ReferenceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceRole::Payer => f.write_str("payer"),
            ReferenceRole::Split => f.write_str("split"),
        }
    }
}

/// A member reference in an expense that names no member of the pot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub expense_index: usize,
    pub member_id: MemberId,
    pub role: ReferenceRole,
}

impl From<DanglingReference> for PotError {
    fn from(reference: DanglingReference) -> Self {
        PotError::UnknownMember {
            member_id: reference.member_id,
            expense_index: reference.expense_index,
            role: reference.role,
        }
    }
}

/// A shared ledger of expenses among a fixed set of members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pot {
    #[serde(default)]
    pub id: PotId,
    #[serde(default)]
    pub name: String,
    /// Currency or unit every amount in the pot is denominated in
    #[serde(default)]
    pub base_currency: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Pot {
    /// Creates an empty pot
    pub fn new(name: impl Into<String>, base_currency: impl Into<String>) -> Self {
        Self {
            id: PotId::new_v7(),
            name: name.into(),
            base_currency: base_currency.into(),
            members: Vec::new(),
            expenses: Vec::new(),
        }
    }

    /// Adds a member
    ///
    /// # Errors
    ///
    /// Returns `PotError::DuplicateMember` if the ID is already taken
    pub fn add_member(&mut self, member: Member) -> Result<(), PotError> {
        if self.has_member(&member.id) {
            return Err(PotError::DuplicateMember(member.id));
        }
        self.members.push(member);
        Ok(())
    }

    /// Adds an expense, checking that every member it names belongs to the pot
    ///
    /// # Errors
    ///
    /// Returns `PotError::UnknownMember` for the first unknown reference
    pub fn add_expense(&mut self, expense: Expense) -> Result<(), PotError> {
        let expense_index = self.expenses.len();
        let known = self.member_set();
        if let Some(reference) = check_expense(&known, expense_index, &expense).next() {
            return Err(reference.into());
        }
        self.expenses.push(expense);
        Ok(())
    }

    pub fn has_member(&self, id: &MemberId) -> bool {
        self.members.iter().any(|m| &m.id == id)
    }

    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    /// Member IDs sorted ascending
    pub fn member_ids(&self) -> Vec<MemberId> {
        let mut ids: Vec<MemberId> = self.members.iter().map(|m| m.id.clone()).collect();
        ids.sort();
        ids
    }

    /// IDs that appear more than once in the member list, sorted
    pub fn duplicate_member_ids(&self) -> Vec<MemberId> {
        let ids = self.member_ids();
        let duplicates: BTreeSet<MemberId> = ids
            .windows(2)
            .filter(|pair| pair[0] == pair[1])
            .map(|pair| pair[0].clone())
            .collect();
        duplicates.into_iter().collect()
    }

    /// Every expense reference to a member outside the pot, in expense order
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let known = self.member_set();
        self.expenses
            .iter()
            .enumerate()
            .flat_map(|(index, expense)| check_expense(&known, index, expense))
            .collect()
    }

    fn member_set(&self) -> BTreeSet<&MemberId> {
        self.members.iter().map(|m| &m.id).collect()
    }
}

/// References in one expense that are missing from `known`
fn check_expense<'a>(
    known: &'a BTreeSet<&'a MemberId>,
    expense_index: usize,
    expense: &'a Expense,
) -> impl Iterator<Item = DanglingReference> + 'a {
    let payer = std::iter::once((&expense.paid_by, ReferenceRole::Payer));
    let split = expense
        .split
        .iter()
        .map(|entry| (&entry.member_id, ReferenceRole::Split));

    payer
        .chain(split)
        .filter(move |(member_id, _)| !known.contains(member_id))
        .map(move |(member_id, role)| DanglingReference {
            expense_index,
            member_id: (*member_id).clone(),
            role,
        })
}
