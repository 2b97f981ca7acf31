//! Halt state machine.
//!
//! Three orthogonal flags: full halt, optimistic deposit/withdrawal
//! processing, and deposit acceptance. Full halt gates the pool's economic
//! requests only; governance stays available so a halted pool can be repaired
//! and unhalted.

use soroban_sdk::contracttype;

use crate::{state::PoolState, ContractError};

/// Read-only snapshot of the three halt axes.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HaltStatus {
    pub halted: bool,
    pub optimistic_deposit_withdrawals: bool,
    pub deposits_open: bool,
}

impl HaltStatus {
    pub fn of(state: &PoolState) -> Self {
        Self {
            halted: state.halted,
            optimistic_deposit_withdrawals: state.optimistic_deposit_withdrawals,
            deposits_open: state.deposits_open,
        }
    }
}

pub fn ensure_running(state: &PoolState) -> Result<(), ContractError> {
    if state.halted {
        return Err(ContractError::Halted);
    }
    Ok(())
}

pub fn ensure_deposits_open(state: &PoolState) -> Result<(), ContractError> {
    if !state.deposits_open {
        return Err(ContractError::DepositsAreClosed);
    }
    Ok(())
}

pub fn halt(state: &mut PoolState) {
    state.halted = true;
}

pub fn unhalt(state: &mut PoolState) {
    state.halted = false;
}

/// Restrict-only: a `true` flag switches the matching feature off, a `false`
/// flag leaves it as it is. Full halt is not touched.
pub fn partial_halt(state: &mut PoolState, disable_optimistic: bool, close_deposits: bool) {
    if disable_optimistic {
        state.optimistic_deposit_withdrawals = false;
    }
    if close_deposits {
        state.deposits_open = false;
    }
}
