//! Pot Domain - Snapshot Model for Shared Expenses
//!
//! A pot is a shared ledger of expenses among a fixed set of members,
//! denominated in a single base currency. This crate holds the snapshot
//! types that the settlement engine consumes:
//!
//! - **Member**: a participant, identified by a stable string ID
//! - **Expense**: one payment by one member, optionally with an explicit split
//! - **SplitEntry**: a member's share of an expense
//! - **Pot**: members plus expenses
//!
//! Persistence, import/export and wallet concerns live outside this crate.
//!
//! # Example
//!
//! ```rust
//! use core_kernel::Money;
//! use domain_pot::{Expense, Member, Pot, SplitEntry};
//!
//! let mut pot = Pot::new("Weekend trip", "DOT");
//! pot.add_member(Member::new("alice").with_name("Alice")).unwrap();
//! pot.add_member(Member::new("bob")).unwrap();
//!
//! pot.add_expense(Expense::new(Money::from_units(30), "alice").with_memo("Groceries"))
//!     .unwrap();
//! pot.add_expense(
//!     Expense::new(Money::from_units(10), "bob")
//!         .with_split(vec![SplitEntry::new("alice", Money::from_units(10))]),
//! )
//! .unwrap();
//!
//! assert!(pot.dangling_references().is_empty());
//! ```

pub mod member;
pub mod expense;
pub mod pot;
pub mod error;

pub use member::Member;
pub use expense::{Expense, SplitEntry};
pub use pot::{DanglingReference, Pot, ReferenceRole};
pub use error::PotError;
