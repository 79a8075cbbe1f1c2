//! Pot domain errors

use thiserror::Error;

use core_kernel::MemberId;
use crate::pot::ReferenceRole;

/// Errors that can occur while assembling a pot snapshot
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PotError {
    /// A member with this ID is already in the pot
    #[error("Duplicate member: {0}")]
    DuplicateMember(MemberId),

    /// An expense names a member that is not in the pot
    #[error("Unknown member reference: {role} {member_id} in expense #{expense_index}")]
    UnknownMember {
        member_id: MemberId,
        expense_index: usize,
        role: ReferenceRole,
    },
}
