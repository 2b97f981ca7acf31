use common::quarantine::UNSET;
use soroban_sdk::{contracttype, symbol_short, BytesN, Env, Symbol};

use crate::{roles::Roles, ContractError};

const STATE: Symbol = symbol_short!("STATE");
const CODE: Symbol = symbol_short!("CODE");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Root record of the pool's governance state: the pool's data.
///
/// Handlers receive it by `&mut`, and it is written back once per successful
/// operation. A data upgrade replaces it wholesale. Round and loan accounting
/// live with the loan subsystem and are not part of this record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    pub roles: Roles,
    /// Announced governor maturity, or [`UNSET`] when no change is pending.
    pub governor_update_after: u64,
    /// Ledger time of the last sudoer assignment.
    pub sudoer_set_at: u64,
    pub halted: bool,
    pub optimistic_deposit_withdrawals: bool,
    pub deposits_open: bool,
    /// Smallest accepted deposit.
    pub min_msg_value: i128,
    /// Numerators over 2^24.
    pub governance_fee: u32,
    pub interest_rate: u32,
    pub instant_withdrawal_fee: u32,
}

impl PoolState {
    pub fn new(roles: Roles) -> Self {
        Self {
            roles,
            governor_update_after: UNSET,
            sudoer_set_at: 0,
            halted: false,
            optimistic_deposit_withdrawals: false,
            deposits_open: true,
            min_msg_value: 0,
            governance_fee: 0,
            interest_rate: 0,
            instant_withdrawal_fee: 0,
        }
    }
}

pub fn load(env: &Env) -> Result<PoolState, ContractError> {
    env.storage()
        .instance()
        .get(&STATE)
        .ok_or(ContractError::NotInitialized)
}

pub fn save(env: &Env, state: &PoolState) {
    env.storage().instance().set(&STATE, state);
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Logic version handle (Wasm hash) the host runs for this pool.
pub fn load_code(env: &Env) -> Result<BytesN<32>, ContractError> {
    env.storage()
        .instance()
        .get(&CODE)
        .ok_or(ContractError::NotInitialized)
}

pub fn save_code(env: &Env, code: &BytesN<32>) {
    env.storage().instance().set(&CODE, code);
}
