//! Shared expenses and their explicit splits

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{ExpenseId, MemberId, Money};

/// One member's share of an expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitEntry {
    pub member_id: MemberId,
    pub amount: Money,
}

impl SplitEntry {
    pub fn new(member_id: impl Into<MemberId>, amount: Money) -> Self {
        Self {
            member_id: member_id.into(),
            amount,
        }
    }
}

/// A single payment made by one member on behalf of the pot
///
/// When `split` is empty the expense is shared equally by every member of
/// the pot, not only by the members who took part in it. When it is present
/// its amounts are expected to add up to `amount`; that is the caller's
/// responsibility and is not re-checked during settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default)]
    pub id: ExpenseId,
    pub amount: Money,
    pub paid_by: MemberId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub split: Vec<SplitEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Expense {
    /// Creates an equally-split expense
    pub fn new(amount: Money, paid_by: impl Into<MemberId>) -> Self {
        Self {
            id: ExpenseId::new_v7(),
            amount,
            paid_by: paid_by.into(),
            split: Vec::new(),
            memo: None,
            date: None,
        }
    }

    pub fn with_split(mut self, split: Vec<SplitEntry>) -> Self {
        self.split = split;
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn has_explicit_split(&self) -> bool {
        !self.split.is_empty()
    }

    /// Sum of the explicit split amounts (zero for an equal split)
    pub fn split_total(&self) -> Money {
        self.split.iter().map(|entry| entry.amount).sum()
    }

    /// Every member this expense names, payer first
    pub fn referenced_members(&self) -> impl Iterator<Item = &MemberId> + '_ {
        std::iter::once(&self.paid_by).chain(self.split.iter().map(|entry| &entry.member_id))
    }
}
