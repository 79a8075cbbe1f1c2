//! Pot members

use serde::{Deserialize, Serialize};

use core_kernel::MemberId;

/// A participant in a pot
///
/// Only `id` takes part in settlement. The display name and wallet address
/// are carried for the UI and for whoever executes a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// On-chain address used when a settlement is paid out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Member {
    pub fn new(id: impl Into<MemberId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            address: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Name to show in the UI, falling back to the member ID
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}
