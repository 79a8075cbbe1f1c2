//! Settlement configuration

use serde::{Deserialize, Serialize};

use core_kernel::Money;
use crate::error::SettlementError;

/// Environment prefix for settlement settings
pub const ENV_PREFIX: &str = "SETTLEMENT";

/// What to do with an expense that names a member outside the pot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownMemberPolicy {
    /// Fail the whole computation with a descriptive error
    #[default]
    Reject,
    /// Drop the dangling amount and log it
    Ignore,
}

/// Settlement engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Amounts whose magnitude is at or below this are treated as settled
    pub tolerance: Money,
    /// Handling of dangling member references
    pub unknown_member_policy: UnknownMemberPolicy,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            tolerance: Money::TOLERANCE,
            unknown_member_policy: UnknownMemberPolicy::Reject,
        }
    }
}

impl SettlementConfig {
    /// Loads configuration from `SETTLEMENT_*` environment variables
    ///
    /// * `SETTLEMENT_TOLERANCE` - decimal amount, default 0.000001
    /// * `SETTLEMENT_UNKNOWN_MEMBER_POLICY` - `reject` or `ignore`, default `reject`
    pub fn from_env() -> Result<Self, SettlementError> {
        Self::load(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration from the given environment source
    pub fn load(environment: config::Environment) -> Result<Self, SettlementError> {
        let settings: Self = config::Config::builder()
            .add_source(environment)
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| SettlementError::InvalidConfig(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Checks that values are in range
    pub fn validate(&self) -> Result<(), SettlementError> {
        if self.tolerance.is_negative() {
            return Err(SettlementError::InvalidConfig(format!(
                "tolerance must not be negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    pub fn with_tolerance(mut self, tolerance: Money) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_unknown_member_policy(mut self, policy: UnknownMemberPolicy) -> Self {
        self.unknown_member_policy = policy;
        self
    }
}
