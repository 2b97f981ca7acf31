use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

use crate::{events, upgrade::RelayedMessage};

const OUTBOX: Symbol = symbol_short!("OUTBOX");
const OUTBOX_SEQ: Symbol = symbol_short!("OUT_SEQ");

/// Newest entries kept; older ones are dropped first.
pub const MAX_OUTBOX_SIZE: u32 = 50;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutboxEntry {
    pub seq: u64,
    pub relayed: RelayedMessage,
    pub timestamp: u64,
}

/// Hands a message to the substrate: event plus bounded outbox log.
pub fn relay(env: &Env, relayed: &RelayedMessage) {
    let seq: u64 = env
        .storage()
        .instance()
        .get(&OUTBOX_SEQ)
        .unwrap_or(0u64)
        .saturating_add(1);
    env.storage().instance().set(&OUTBOX_SEQ, &seq);

    let mut entries = list(env);
    if entries.len() >= MAX_OUTBOX_SIZE {
        entries.pop_front();
    }
    entries.push_back(OutboxEntry {
        seq,
        relayed: relayed.clone(),
        timestamp: env.ledger().timestamp(),
    });
    env.storage().instance().set(&OUTBOX, &entries);

    events::publish_message_relayed(env, seq, relayed.clone());
}

pub fn list(env: &Env) -> Vec<OutboxEntry> {
    env.storage()
        .instance()
        .get(&OUTBOX)
        .unwrap_or(Vec::new(env))
}

pub fn last(env: &Env) -> Option<OutboxEntry> {
    list(env).last()
}
