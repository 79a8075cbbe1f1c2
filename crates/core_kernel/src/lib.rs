//! Core Kernel - Foundational types for pot settlement
//!
//! This crate provides the building blocks shared by the domain crates:
//! - Money held as exact integer micro-units
//! - Identifiers for pots, expenses and members
//! - Common error types

pub mod money;
pub mod identifiers;
pub mod error;

pub use money::{Money, MoneyError, round_to_micro, MICROS_PER_UNIT, MICRO_SCALE};
pub use identifiers::{PotId, ExpenseId, MemberId};
pub use error::CoreError;
