//! Settlement Domain - Balances and Settle-Up Transfers
//!
//! This crate turns a pot snapshot into net balances and a short list of
//! transfers that settle them. Both steps are pure and deterministic: the
//! same snapshot always yields the same output, whatever the order of its
//! member list.
//!
//! # Pipeline
//!
//! 1. [`BalanceCalculator`] sums what each member paid and owes. Expenses
//!    without an explicit split are shared equally by all pot members.
//! 2. [`SettlementSuggester`] matches debtors against creditors with a greedy
//!    two-pointer walk and returns transfers sorted by `(from, to, amount)`.
//!
//! [`SettlementEngine`] runs both with one [`SettlementConfig`].
//!
//! # Precision
//!
//! Amounts are integer micro-units (1e-6 of the base currency). The only
//! rounding is the per-person share of an equal split, so balances may sum to
//! a few micro-units instead of exactly zero. That drift is bounded by the
//! tolerance times the member count and is logged, never raised.
//!
//! # Example
//!
//! ```rust
//! use core_kernel::Money;
//! use domain_pot::{Expense, Member, Pot};
//! use domain_settlement::{SettlementConfig, SettlementEngine, Suggestion};
//!
//! let mut pot = Pot::new("Dinner", "DOT");
//! for id in ["A", "B", "C"] {
//!     pot.add_member(Member::new(id)).unwrap();
//! }
//! pot.add_expense(Expense::new(Money::from_units(30), "A")).unwrap();
//!
//! let plan = SettlementEngine::new(SettlementConfig::default()).plan(&pot).unwrap();
//!
//! assert_eq!(
//!     plan.suggestions,
//!     vec![
//!         Suggestion::new("B", "A", Money::from_units(10)),
//!         Suggestion::new("C", "A", Money::from_units(10)),
//!     ]
//! );
//! ```

pub mod balance;
pub mod suggestion;
pub mod engine;
pub mod config;
pub mod error;

pub use balance::{balances_total, is_zero_sum, Balance, BalanceCalculator, Position};
pub use suggestion::{apply_suggestions, SettlementSuggester, Suggestion};
pub use engine::{SettlementEngine, SettlementPlan};
pub use config::{SettlementConfig, UnknownMemberPolicy};
pub use error::SettlementError;
