//! Upgrade executor and continuation runner.
//!
//! An upgrade carries up to three independent payloads. A data payload
//! replaces the pool's governed record wholesale and a code payload repoints
//! the logic handle; neither is shape-checked, that is the sudoer's
//! responsibility. The continuation runs afterwards, once the new state has
//! been committed, and only sees what its steps carry.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, Address, Bytes, BytesN, Env, Symbol, Val, Vec};

use crate::{
    outbox,
    state::{self, PoolState},
};

// ── Send modes ───────────────────────────────────────────────────────────────

/// Fees are deducted from the message value.
pub const SEND_MODE_ORDINARY: u32 = 0;
/// Fees are paid from the pool balance on top of the message value.
pub const SEND_MODE_PAY_FEES_SEPARATELY: u32 = 1;
pub const SEND_MODE_IGNORE_ERRORS: u32 = 2;
pub const SEND_MODE_CARRY_REMAINING_VALUE: u32 = 64;
pub const SEND_MODE_CARRY_ALL_BALANCE: u32 = 128;

// ── Payload types ────────────────────────────────────────────────────────────

/// Outgoing message as handed to the substrate. Neither destination nor body
/// is interpreted by the pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutboundMessage {
    pub to: Address,
    pub value: i128,
    pub body: Bytes,
}

/// Outbound message plus its send-mode bit set.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelayedMessage {
    pub mode: u32,
    pub message: OutboundMessage,
}

/// Arbitrary cross-contract call.
#[contracttype]
#[derive(Clone, Debug)]
pub struct InvokeCall {
    pub contract: Address,
    pub func: Symbol,
    pub args: Vec<Val>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawEvent {
    pub topics: Vec<Symbol>,
    pub data: Bytes,
}

#[contracttype]
#[derive(Clone, Debug)]
pub enum Instruction {
    Send(RelayedMessage),
    Invoke(InvokeCall),
    Emit(RawEvent),
}

/// Freestanding instruction sequence run after an upgrade.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Continuation {
    pub steps: Vec<Instruction>,
}

#[derive(Clone, Debug)]
pub struct UpgradeRequest {
    pub data: Option<PoolState>,
    pub code: Option<BytesN<32>>,
    pub continuation: Option<Continuation>,
}

/// Which payloads an upgrade actually carried.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UpgradeOutcome {
    pub data_replaced: bool,
    pub code_replaced: bool,
    pub continuation_steps: u32,
}

// ── Execution ────────────────────────────────────────────────────────────────

/// Swaps in the new record and repoints the logic handle, each only if
/// present. The record is written back by the caller.
pub fn replace(env: &Env, state: &mut PoolState, request: &UpgradeRequest) -> UpgradeOutcome {
    let mut outcome = UpgradeOutcome::default();
    if let Some(data) = &request.data {
        *state = data.clone();
        outcome.data_replaced = true;
    }
    if let Some(code) = &request.code {
        state::save_code(env, code);
        outcome.code_replaced = true;
    }
    if let Some(continuation) = &request.continuation {
        outcome.continuation_steps = continuation.steps.len();
    }
    outcome
}

pub fn run(env: &Env, continuation: &Continuation) {
    for step in continuation.steps.iter() {
        match step {
            Instruction::Send(relayed) => outbox::relay(env, &relayed),
            Instruction::Invoke(call) => {
                let _: Val = env.invoke_contract(&call.contract, &call.func, call.args);
            }
            Instruction::Emit(event) => env.events().publish(event.topics, event.data),
        }
    }
}
