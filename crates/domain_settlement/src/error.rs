//! Settlement domain errors

use thiserror::Error;

use core_kernel::{MemberId, MoneyError};
use domain_pot::{DanglingReference, PotError, ReferenceRole};

/// Errors that can occur while computing balances
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettlementError {
    /// An expense names a member that is not in the pot
    #[error("Unknown member reference: {role} {member_id} in expense #{expense_index}")]
    UnknownMember {
        member_id: MemberId,
        expense_index: usize,
        role: ReferenceRole,
    },

    /// The pot lists the same member ID more than once
    #[error("Duplicate member: {0}")]
    DuplicateMember(MemberId),

    /// Configuration could not be loaded or is out of range
    #[error("Invalid settlement configuration: {0}")]
    InvalidConfig(String),

    /// Arithmetic failure on an amount
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl From<DanglingReference> for SettlementError {
    fn from(reference: DanglingReference) -> Self {
        SettlementError::UnknownMember {
            member_id: reference.member_id,
            expense_index: reference.expense_index,
            role: reference.role,
        }
    }
}

impl From<PotError> for SettlementError {
    fn from(error: PotError) -> Self {
        match error {
            PotError::DuplicateMember(id) => SettlementError::DuplicateMember(id),
            PotError::UnknownMember {
                member_id,
                expense_index,
                role,
            } => SettlementError::UnknownMember {
                member_id,
                expense_index,
                role,
            },
        }
    }
}
