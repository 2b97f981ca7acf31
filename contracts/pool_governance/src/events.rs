#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

use crate::{
    config::GovernanceConfig,
    dispatch::PoolRequestKind,
    halt::HaltStatus,
    roles::{RoleUpdate, Roles},
    upgrade::{RelayedMessage, UpgradeOutcome},
};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is bootstrapped.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub roles: Roles,
    pub config: GovernanceConfig,
    pub code: BytesN<32>,
    pub timestamp: u64,
}

/// Fired when the governor announces a succession maturity time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigrationPreparedEvent {
    pub governor: Address,
    pub update_after: u64,
    pub timestamp: u64,
}

/// Fired on every successful `set_roles`; the token subsystem follows it
/// for admin changes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RolesSetEvent {
    pub sender: Address,
    pub update: RoleUpdate,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SudoerSetEvent {
    pub previous: Address,
    pub sudoer: Address,
    pub matures_after: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositSettingsSetEvent {
    pub min_msg_value: i128,
    pub optimistic: bool,
    pub deposits_open: bool,
    pub instant_withdrawal_fee: u32,
    pub timestamp: u64,
}

/// Fired on halt, unhalt and partial halt with the resulting axes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HaltChangedEvent {
    pub sender: Address,
    pub status: HaltStatus,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FractionSetEvent {
    pub sender: Address,
    pub value: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MessageRelayedEvent {
    pub seq: u64,
    pub relayed: RelayedMessage,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradedEvent {
    pub sudoer: Address,
    pub data_replaced: bool,
    pub code_replaced: bool,
    pub continuation_steps: u32,
    pub timestamp: u64,
}

/// Handed to the loan/round subsystem once a pool request passed the gates.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRequestEvent {
    pub kind: PoolRequestKind,
    pub sender: Address,
    pub amount: i128,
    pub aux: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DispatchedEvent {
    pub op: u32,
    pub query_id: u64,
    pub sender: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, roles: Roles, config: GovernanceConfig, code: BytesN<32>) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            roles,
            config,
            code,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_migration_prepared(env: &Env, governor: Address, update_after: u64) {
    env.events().publish(
        (symbol_short!("GOV_PREP"), governor.clone()),
        MigrationPreparedEvent {
            governor,
            update_after,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_roles_set(env: &Env, sender: Address, update: RoleUpdate) {
    env.events().publish(
        (symbol_short!("ROLES"), sender.clone()),
        RolesSetEvent {
            sender,
            update,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_sudoer_set(env: &Env, previous: Address, sudoer: Address, matures_after: u64) {
    env.events().publish(
        (symbol_short!("SUDOER"), sudoer.clone()),
        SudoerSetEvent {
            previous,
            sudoer,
            matures_after,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit_settings_set(
    env: &Env,
    min_msg_value: i128,
    optimistic: bool,
    deposits_open: bool,
    instant_withdrawal_fee: u32,
) {
    env.events().publish(
        (symbol_short!("DEP_SET"),),
        DepositSettingsSetEvent {
            min_msg_value,
            optimistic,
            deposits_open,
            instant_withdrawal_fee,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_halted(env: &Env, sender: Address, status: HaltStatus) {
    publish_halt_changed(env, symbol_short!("HALT"), sender, status);
}

pub fn publish_unhalted(env: &Env, sender: Address, status: HaltStatus) {
    publish_halt_changed(env, symbol_short!("UNHALT"), sender, status);
}

pub fn publish_partial_halt(env: &Env, sender: Address, status: HaltStatus) {
    publish_halt_changed(env, symbol_short!("P_HALT"), sender, status);
}

fn publish_halt_changed(env: &Env, tag: soroban_sdk::Symbol, sender: Address, status: HaltStatus) {
    env.events().publish(
        (tag, sender.clone()),
        HaltChangedEvent {
            sender,
            status,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_governance_fee_set(env: &Env, sender: Address, value: u32) {
    env.events().publish(
        (symbol_short!("GOV_FEE"),),
        FractionSetEvent {
            sender,
            value,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_interest_set(env: &Env, sender: Address, value: u32) {
    env.events().publish(
        (symbol_short!("INTEREST"),),
        FractionSetEvent {
            sender,
            value,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_message_relayed(env: &Env, seq: u64, relayed: RelayedMessage) {
    env.events().publish(
        (symbol_short!("SUDO_MSG"), relayed.message.to.clone()),
        MessageRelayedEvent {
            seq,
            relayed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_upgraded(env: &Env, sudoer: Address, outcome: UpgradeOutcome) {
    env.events().publish(
        (symbol_short!("UPGRADE"),),
        UpgradedEvent {
            sudoer,
            data_replaced: outcome.data_replaced,
            code_replaced: outcome.code_replaced,
            continuation_steps: outcome.continuation_steps,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_request(
    env: &Env,
    kind: PoolRequestKind,
    sender: Address,
    amount: i128,
    aux: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_REQ"), sender.clone()),
        PoolRequestEvent {
            kind,
            sender,
            amount,
            aux,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_dispatched(env: &Env, op: u32, query_id: u64, sender: Address) {
    env.events().publish(
        (symbol_short!("DISPATCH"), op),
        DispatchedEvent {
            op,
            query_id,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}
