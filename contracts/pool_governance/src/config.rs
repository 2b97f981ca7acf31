use common::quarantine::Quarantine;
use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

use crate::ContractError;

const CONFIG: Symbol = symbol_short!("CONFIG");

pub const DEFAULT_GOVERNOR_QUARANTINE: u64 = 86_400;
pub const DEFAULT_SUDO_QUARANTINE: u64 = 86_400;

/// Quarantine durations, fixed at initialisation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernanceConfig {
    /// Minimum distance, in seconds, between `prepare_governance_migration`
    /// and the announced maturity time.
    pub governor_quarantine: u64,
    /// Seconds a freshly assigned sudoer must wait before sudo operations.
    pub sudo_quarantine: u64,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            governor_quarantine: DEFAULT_GOVERNOR_QUARANTINE,
            sudo_quarantine: DEFAULT_SUDO_QUARANTINE,
        }
    }
}

impl GovernanceConfig {
    pub fn governor_timer(&self) -> Quarantine {
        Quarantine::proposed(self.governor_quarantine)
    }

    pub fn sudo_timer(&self) -> Quarantine {
        Quarantine::armed(self.sudo_quarantine)
    }
}

pub fn exists(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load(env: &Env) -> Result<GovernanceConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn store(env: &Env, config: &GovernanceConfig) {
    env.storage().instance().set(&CONFIG, config);
}
