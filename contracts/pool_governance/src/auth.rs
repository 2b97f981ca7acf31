//! Authorization guard.
//!
//! Every operation names exactly one [`Requirement`]. The guard compares the
//! authenticated sender against the single role holder it requires; there is
//! no fallback to another role and no hierarchy.

use soroban_sdk::Address;

use crate::{
    config::GovernanceConfig,
    roles::Role,
    state::PoolState,
    ContractError,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Requirement {
    /// Open to any authenticated sender.
    Anyone,
    /// Sender must be the current holder of the role.
    Holder(Role),
    /// Sender must be the sudoer, and the sudo quarantine must have passed.
    MaturedSudoer,
}

/// Fails with `WrongSender` on identity mismatch, and with `SudoerQuarantine`
/// when the true sudoer acts before `sudoer_set_at + sudo_quarantine`.
pub fn authorize(
    state: &PoolState,
    config: &GovernanceConfig,
    sender: &Address,
    requirement: Requirement,
    now: u64,
) -> Result<(), ContractError> {
    match requirement {
        Requirement::Anyone => Ok(()),
        Requirement::Holder(role) => require_holder(state, role, sender),
        Requirement::MaturedSudoer => {
            require_holder(state, Role::Sudoer, sender)?;
            config
                .sudo_timer()
                .ensure_matured(now, state.sudoer_set_at)
                .map_err(|_| ContractError::SudoerQuarantine)
        }
    }
}

fn require_holder(state: &PoolState, role: Role, sender: &Address) -> Result<(), ContractError> {
    if !state.roles.holds(role, sender) {
        return Err(ContractError::WrongSender);
    }
    Ok(())
}
