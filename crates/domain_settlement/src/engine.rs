//! Balance computation and settle-up suggestions in one call

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::{MemberId, Money};
use domain_pot::Pot;
use crate::balance::{Balance, BalanceCalculator};
use crate::config::SettlementConfig;
use crate::error::SettlementError;
use crate::suggestion::{SettlementSuggester, Suggestion};

/// Balances of a pot together with the transfers that settle them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    pub balances: Vec<Balance>,
    pub suggestions: Vec<Suggestion>,
}

impl SettlementPlan {
    /// Sum of every suggested transfer
    pub fn total_transferred(&self) -> Money {
        self.suggestions.iter().map(|s| s.amount).sum()
    }

    /// True when nobody needs to pay anybody
    pub fn is_settled(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn balance_of(&self, member_id: &MemberId) -> Option<&Balance> {
        self.balances.iter().find(|b| &b.member_id == member_id)
    }

    /// Transfers the given member has to make
    pub fn payments_from<'a>(&'a self, member_id: &'a MemberId) -> impl Iterator<Item = &'a Suggestion> {
        self.suggestions.iter().filter(move |s| &s.from == member_id)
    }

    /// Transfers the given member should receive
    pub fn payments_to<'a>(&'a self, member_id: &'a MemberId) -> impl Iterator<Item = &'a Suggestion> {
        self.suggestions.iter().filter(move |s| &s.to == member_id)
    }
}

/// Runs the balance calculator and the suggester with one configuration
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    calculator: BalanceCalculator,
    suggester: SettlementSuggester,
}

impl SettlementEngine {
    pub fn new(config: SettlementConfig) -> Self {
        let suggester = SettlementSuggester::new(config.tolerance);
        Self {
            calculator: BalanceCalculator::new(config),
            suggester,
        }
    }

    pub fn config(&self) -> &SettlementConfig {
        self.calculator.config()
    }

    /// Computes balances for the pot
    pub fn balances(&self, pot: &Pot) -> Result<Vec<Balance>, SettlementError> {
        self.calculator.compute(pot)
    }

    /// Suggests transfers for already computed balances
    pub fn suggest(&self, balances: &[Balance]) -> Vec<Suggestion> {
        self.suggester.suggest(balances)
    }

    /// Computes balances and the transfers that settle them
    #[instrument(skip_all, fields(pot_id = %pot.id, currency = %pot.base_currency))]
    pub fn plan(&self, pot: &Pot) -> Result<SettlementPlan, SettlementError> {
        let balances = self.calculator.compute(pot)?;
        let suggestions = self.suggester.suggest(&balances);

        let plan = SettlementPlan {
            balances,
            suggestions,
        };
        debug!(
            transfers = plan.suggestions.len(),
            total = %plan.total_transferred(),
            "Settlement plan ready"
        );
        Ok(plan)
    }
}
