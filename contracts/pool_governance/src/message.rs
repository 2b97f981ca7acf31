//! Wire format of raw inbound bodies.
//!
//! ```text
//! body := op:uint32 query_id:uint64 payload   (completion-tagged, see common::bits)
//! ```
//!
//! | op | payload |
//! |----|---------|
//! | `prepare_governance_migration` | `after:uint48` |
//! | `set_roles` | `governor:Maybe ^Address interest_manager:Maybe ^Address halter:Maybe ^Address approver:Maybe ^Address treasury:Maybe ^Address` |
//! | `set_deposit_settings` | `min_msg_value:Coins optimistic:bit deposits_open:bit fee:Maybe uint32` |
//! | `halt`, `unhalt`, `touch` | empty |
//! | `partial_halt` | `disable_optimistic:bit close_deposits:bit` |
//! | `set_governance_fee`, `set_interest` | `value:uint32` |
//! | `set_sudoer` | `^Address` |
//! | `sudo_message` | `Relayed` |
//! | `upgrade` | `data:Maybe ^State code:Maybe bits256 continuation:Maybe ^Continuation` |
//! | `deposit`, `withdraw`, `loan_repayment`, `donate` | `amount:Coins` |
//! | `loan_request` | `min_loan:Coins max_loan:Coins max_interest:uint24` |
//! | `request_controller_deploy` | `controller_id:uint32` |
//!
//! ```text
//! Relayed      := mode:uint8 to:^Address value:Coins body:^Bytes
//! State        := roles:^Address{6} governor_update_after:uint64 sudoer_set_at:uint64
//!                 halted:bit optimistic:bit deposits_open:bit min_msg_value:Coins
//!                 governance_fee:uint32 interest_rate:uint32 instant_withdrawal_fee:uint32
//! Continuation := count:uint8 Step{count}
//! Step         := 0:uint2 Relayed
//!               | 1:uint2 contract:^Address func:^Symbol argc:uint8 Arg{argc}
//!               | 2:uint2 count:uint8 topic:^Symbol{count} data:^Bytes
//! Arg          := tag:uint4 value     (bool, u32, i32, u64, i64, u128, i128, ^Address, ^Bytes, ^Symbol)
//! ```
//!
//! `^Address` holds the XDR of an account or contract address and is checked
//! against its fixed layout before the host parses it. `^Symbol` holds the
//! raw name. `^State` and `^Continuation` are themselves completion-tagged
//! bodies. Every body is parsed to the last bit; anything left over is
//! `MalformedInput`.

use common::{bits::BitsError, BitReader, BitWriter};
use soroban_sdk::{
    xdr::{FromXdr, ToXdr},
    Address, Bytes, Env, IntoVal, Symbol, TryFromVal, Val, Vec,
};

use crate::{
    dispatch::{DepositSettings, LoanRequest, Operation},
    roles::{RoleUpdate, Roles},
    state::PoolState,
    upgrade::{
        Continuation, Instruction, InvokeCall, OutboundMessage, RawEvent, RelayedMessage,
        UpgradeRequest,
    },
    ContractError,
};

// ── Op codes ─────────────────────────────────────────────────────────────────

pub const OP_PREPARE_GOVERNANCE_MIGRATION: u32 = 0x9971_881c;
pub const OP_SET_ROLES: u32 = 0x5e51_7f36;
pub const OP_SET_DEPOSIT_SETTINGS: u32 = 0x2233_ff55;
pub const OP_HALT: u32 = 0x139a_1b4e;
pub const OP_UNHALT: u32 = 0x7247_e7a5;
pub const OP_PARTIAL_HALT: u32 = 0x0a2d_7ef4;
pub const OP_SET_GOVERNANCE_FEE: u32 = 0x2aaa_96a0;
pub const OP_SET_INTEREST: u32 = 0xc9f0_4485;
pub const OP_SET_SUDOER: u32 = 0x79e7_c016;
pub const OP_SUDO_MESSAGE: u32 = 0x2706_95fb;
pub const OP_UPGRADE: u32 = 0x96e7_f528;
pub const OP_DEPOSIT: u32 = 0x47d5_4391;
pub const OP_WITHDRAW: u32 = 0x319b_0cdc;
pub const OP_LOAN_REQUEST: u32 = 0xe642_c965;
pub const OP_LOAN_REPAYMENT: u32 = 0xdfdc_a27b;
pub const OP_TOUCH: u32 = 0x4bc7_c2df;
pub const OP_CONTROLLER_DEPLOY_REQUEST: u32 = 0xdf10_8122;
pub const OP_DONATE: u32 = 0x73af_fe21;

const TIMESTAMP_BITS: u32 = 48;
const SEND_MODE_BITS: u32 = 8;
const INTEREST_BITS: u32 = 24;
const COUNT_BITS: u32 = 8;
const STEP_TAG_BITS: u32 = 2;
const ARG_TAG_BITS: u32 = 4;

const STEP_SEND: u32 = 0;
const STEP_INVOKE: u32 = 1;
const STEP_EMIT: u32 = 2;

const ARG_BOOL: u32 = 0;
const ARG_U32: u32 = 1;
const ARG_I32: u32 = 2;
const ARG_U64: u32 = 3;
const ARG_I64: u32 = 4;
const ARG_U128: u32 = 5;
const ARG_I128: u32 = 6;
const ARG_ADDRESS: u32 = 7;
const ARG_BYTES: u32 = 8;
const ARG_SYMBOL: u32 = 9;

// ScVal / ScAddress XDR layout of an address.
const SCV_ADDRESS: u32 = 18;
const SC_ADDRESS_ACCOUNT: u32 = 0;
const SC_ADDRESS_CONTRACT: u32 = 1;
const PUBLIC_KEY_ED25519: u32 = 0;
const ACCOUNT_XDR_LEN: u32 = 44;
const CONTRACT_XDR_LEN: u32 = 40;

const MAX_SYMBOL_LEN: usize = 32;

impl From<BitsError> for ContractError {
    fn from(_: BitsError) -> Self {
        ContractError::MalformedInput
    }
}

/// A decoded inbound body.
#[derive(Clone, Debug)]
pub struct Inbound {
    pub op: u32,
    pub query_id: u64,
    pub operation: Operation,
}

pub fn op_code(operation: &Operation) -> u32 {
    match operation {
        Operation::PrepareGovernanceMigration { .. } => OP_PREPARE_GOVERNANCE_MIGRATION,
        Operation::SetRoles(_) => OP_SET_ROLES,
        Operation::SetDepositSettings(_) => OP_SET_DEPOSIT_SETTINGS,
        Operation::Halt => OP_HALT,
        Operation::Unhalt => OP_UNHALT,
        Operation::PartialHalt { .. } => OP_PARTIAL_HALT,
        Operation::SetGovernanceFee(_) => OP_SET_GOVERNANCE_FEE,
        Operation::SetInterest(_) => OP_SET_INTEREST,
        Operation::SetSudoer(_) => OP_SET_SUDOER,
        Operation::SudoMessage(_) => OP_SUDO_MESSAGE,
        Operation::Upgrade(_) => OP_UPGRADE,
        Operation::Deposit(_) => OP_DEPOSIT,
        Operation::Withdraw(_) => OP_WITHDRAW,
        Operation::LoanRequest(_) => OP_LOAN_REQUEST,
        Operation::LoanRepayment(_) => OP_LOAN_REPAYMENT,
        Operation::Touch => OP_TOUCH,
        Operation::ControllerDeployRequest(_) => OP_CONTROLLER_DEPLOY_REQUEST,
        Operation::Donate(_) => OP_DONATE,
    }
}

// ── Decoding ─────────────────────────────────────────────────────────────────

pub fn decode(env: &Env, body: Bytes) -> Result<Inbound, ContractError> {
    let mut r = BitReader::new(env, body)?;
    let op = r.load_u32(32)?;
    let query_id = r.load_u64(64)?;

    let operation = match op {
        OP_PREPARE_GOVERNANCE_MIGRATION => Operation::PrepareGovernanceMigration {
            after: r.load_u64(TIMESTAMP_BITS)?,
        },
        OP_SET_ROLES => Operation::SetRoles(RoleUpdate {
            governor: load_maybe_address(env, &mut r)?,
            interest_manager: load_maybe_address(env, &mut r)?,
            halter: load_maybe_address(env, &mut r)?,
            approver: load_maybe_address(env, &mut r)?,
            treasury: load_maybe_address(env, &mut r)?,
        }),
        OP_SET_DEPOSIT_SETTINGS => Operation::SetDepositSettings(DepositSettings {
            min_msg_value: load_amount(&mut r)?,
            optimistic: r.load_bit()?,
            deposits_open: r.load_bit()?,
            instant_withdrawal_fee: if r.load_bit()? {
                Some(r.load_u32(32)?)
            } else {
                None
            },
        }),
        OP_HALT => Operation::Halt,
        OP_UNHALT => Operation::Unhalt,
        OP_PARTIAL_HALT => Operation::PartialHalt {
            disable_optimistic: r.load_bit()?,
            close_deposits: r.load_bit()?,
        },
        OP_SET_GOVERNANCE_FEE => Operation::SetGovernanceFee(r.load_u32(32)?),
        OP_SET_INTEREST => Operation::SetInterest(r.load_u32(32)?),
        OP_SET_SUDOER => Operation::SetSudoer(load_address(env, &mut r)?),
        OP_SUDO_MESSAGE => Operation::SudoMessage(load_relayed(env, &mut r)?),
        OP_UPGRADE => {
            let data = r
                .load_maybe_ref()?
                .map(|blob| load_state(env, blob))
                .transpose()?;
            let code = if r.load_bit()? {
                Some(r.load_bytes_n::<32>()?)
            } else {
                None
            };
            let continuation = r
                .load_maybe_ref()?
                .map(|blob| load_continuation(env, blob))
                .transpose()?;
            Operation::Upgrade(UpgradeRequest {
                data,
                code,
                continuation,
            })
        }
        OP_DEPOSIT => Operation::Deposit(load_amount(&mut r)?),
        OP_WITHDRAW => Operation::Withdraw(load_amount(&mut r)?),
        OP_LOAN_REQUEST => Operation::LoanRequest(LoanRequest {
            min_loan: load_amount(&mut r)?,
            max_loan: load_amount(&mut r)?,
            max_interest: r.load_u32(INTEREST_BITS)?,
        }),
        OP_LOAN_REPAYMENT => Operation::LoanRepayment(load_amount(&mut r)?),
        OP_TOUCH => Operation::Touch,
        OP_CONTROLLER_DEPLOY_REQUEST => Operation::ControllerDeployRequest(r.load_u32(32)?),
        OP_DONATE => Operation::Donate(load_amount(&mut r)?),
        _ => return Err(ContractError::UnknownOperation),
    };
    r.end_parse()?;

    Ok(Inbound {
        op,
        query_id,
        operation,
    })
}

fn load_amount(r: &mut BitReader) -> Result<i128, ContractError> {
    i128::try_from(r.load_coins()?).map_err(|_| ContractError::MalformedInput)
}

fn load_relayed(env: &Env, r: &mut BitReader) -> Result<RelayedMessage, ContractError> {
    let mode = r.load_u32(SEND_MODE_BITS)?;
    let message = OutboundMessage {
        to: load_address(env, r)?,
        value: load_amount(r)?,
        body: r.load_ref()?,
    };
    Ok(RelayedMessage { mode, message })
}

fn load_state(env: &Env, blob: Bytes) -> Result<PoolState, ContractError> {
    let mut r = BitReader::new(env, blob)?;
    let state = PoolState {
        roles: Roles {
            governor: load_address(env, &mut r)?,
            halter: load_address(env, &mut r)?,
            interest_manager: load_address(env, &mut r)?,
            approver: load_address(env, &mut r)?,
            treasury: load_address(env, &mut r)?,
            sudoer: load_address(env, &mut r)?,
        },
        governor_update_after: r.load_u64(64)?,
        sudoer_set_at: r.load_u64(64)?,
        halted: r.load_bit()?,
        optimistic_deposit_withdrawals: r.load_bit()?,
        deposits_open: r.load_bit()?,
        min_msg_value: load_amount(&mut r)?,
        governance_fee: r.load_u32(32)?,
        interest_rate: r.load_u32(32)?,
        instant_withdrawal_fee: r.load_u32(32)?,
    };
    r.end_parse()?;
    Ok(state)
}

fn load_continuation(env: &Env, blob: Bytes) -> Result<Continuation, ContractError> {
    let mut r = BitReader::new(env, blob)?;
    let count = r.load_u32(COUNT_BITS)?;
    let mut steps = Vec::new(env);
    for _ in 0..count {
        let step = match r.load_u32(STEP_TAG_BITS)? {
            STEP_SEND => Instruction::Send(load_relayed(env, &mut r)?),
            STEP_INVOKE => {
                let contract = load_address(env, &mut r)?;
                let func = load_symbol(env, &mut r)?;
                let argc = r.load_u32(COUNT_BITS)?;
                let mut args = Vec::new(env);
                for _ in 0..argc {
                    args.push_back(load_arg(env, &mut r)?);
                }
                Instruction::Invoke(InvokeCall {
                    contract,
                    func,
                    args,
                })
            }
            STEP_EMIT => {
                let n = r.load_u32(COUNT_BITS)?;
                let mut topics = Vec::new(env);
                for _ in 0..n {
                    topics.push_back(load_symbol(env, &mut r)?);
                }
                Instruction::Emit(RawEvent {
                    topics,
                    data: r.load_ref()?,
                })
            }
            _ => return Err(ContractError::MalformedInput),
        };
        steps.push_back(step);
    }
    r.end_parse()?;
    Ok(Continuation { steps })
}

fn load_arg(env: &Env, r: &mut BitReader) -> Result<Val, ContractError> {
    let val: Val = match r.load_u32(ARG_TAG_BITS)? {
        ARG_BOOL => r.load_bit()?.into_val(env),
        ARG_U32 => r.load_u32(32)?.into_val(env),
        ARG_I32 => (r.load_u32(32)? as i32).into_val(env),
        ARG_U64 => r.load_u64(64)?.into_val(env),
        ARG_I64 => (r.load_u64(64)? as i64).into_val(env),
        ARG_U128 => r.load_uint(128)?.into_val(env),
        ARG_I128 => (r.load_uint(128)? as i128).into_val(env),
        ARG_ADDRESS => load_address(env, r)?.into_val(env),
        ARG_BYTES => r.load_ref()?.into_val(env),
        ARG_SYMBOL => load_symbol(env, r)?.into_val(env),
        _ => return Err(ContractError::MalformedInput),
    };
    Ok(val)
}

fn load_address(env: &Env, r: &mut BitReader) -> Result<Address, ContractError> {
    address_from_xdr(env, &r.load_ref()?)
}

fn load_maybe_address(env: &Env, r: &mut BitReader) -> Result<Option<Address>, ContractError> {
    r.load_maybe_ref()?
        .map(|blob| address_from_xdr(env, &blob))
        .transpose()
}

/// Only blobs with the exact account or contract layout reach the host
/// parser, which aborts the call on anything it cannot read.
fn address_from_xdr(env: &Env, blob: &Bytes) -> Result<Address, ContractError> {
    let well_formed = match (be_word(blob, 0), be_word(blob, 4)) {
        (Some(SCV_ADDRESS), Some(SC_ADDRESS_CONTRACT)) => blob.len() == CONTRACT_XDR_LEN,
        (Some(SCV_ADDRESS), Some(SC_ADDRESS_ACCOUNT)) => {
            blob.len() == ACCOUNT_XDR_LEN && be_word(blob, 8) == Some(PUBLIC_KEY_ED25519)
        }
        _ => false,
    };
    if !well_formed {
        return Err(ContractError::MalformedInput);
    }
    Address::from_xdr(env, blob).map_err(|_| ContractError::MalformedInput)
}

fn load_symbol(env: &Env, r: &mut BitReader) -> Result<Symbol, ContractError> {
    let blob = r.load_ref()?;
    let len = blob.len() as usize;
    if len > MAX_SYMBOL_LEN {
        return Err(ContractError::MalformedInput);
    }
    let mut buf = [0u8; MAX_SYMBOL_LEN];
    blob.copy_into_slice(&mut buf[..len]);
    let name = &buf[..len];
    if !name.iter().all(|c| c.is_ascii_alphanumeric() || *c == b'_') {
        return Err(ContractError::MalformedInput);
    }
    let name = core::str::from_utf8(name).map_err(|_| ContractError::MalformedInput)?;
    Ok(Symbol::new(env, name))
}

fn be_word(blob: &Bytes, at: u32) -> Option<u32> {
    let mut word = 0u32;
    for i in at..at + 4 {
        word = (word << 8) | u32::from(blob.get(i)?);
    }
    Some(word)
}

// ── Encoding ─────────────────────────────────────────────────────────────────

/// Writes the `op | query_id` header every body starts with.
pub fn write_header(w: &mut BitWriter, op: u32, query_id: u64) -> Result<(), BitsError> {
    w.store_uint(u128::from(op), 32)?;
    w.store_uint(u128::from(query_id), 64)?;
    Ok(())
}

/// Encodes `operation` the way [`decode`] reads it.
pub fn encode(env: &Env, query_id: u64, operation: &Operation) -> Result<Bytes, BitsError> {
    let mut w = BitWriter::new(env);
    write_header(&mut w, op_code(operation), query_id)?;

    match operation {
        Operation::PrepareGovernanceMigration { after } => {
            w.store_uint(u128::from(*after), TIMESTAMP_BITS)?;
        }
        Operation::SetRoles(update) => {
            for identity in [
                &update.governor,
                &update.interest_manager,
                &update.halter,
                &update.approver,
                &update.treasury,
            ] {
                let blob = identity.as_ref().map(|a| a.clone().to_xdr(env));
                w.store_maybe_ref(blob.as_ref())?;
            }
        }
        Operation::SetDepositSettings(settings) => {
            store_amount(&mut w, settings.min_msg_value)?;
            w.store_bit(settings.optimistic);
            w.store_bit(settings.deposits_open);
            match settings.instant_withdrawal_fee {
                Some(fee) => {
                    w.store_bit(true);
                    w.store_uint(u128::from(fee), 32)?;
                }
                None => {
                    w.store_bit(false);
                }
            }
        }
        Operation::Halt | Operation::Unhalt | Operation::Touch => {}
        Operation::PartialHalt {
            disable_optimistic,
            close_deposits,
        } => {
            w.store_bit(*disable_optimistic);
            w.store_bit(*close_deposits);
        }
        Operation::SetGovernanceFee(value) | Operation::SetInterest(value) => {
            w.store_uint(u128::from(*value), 32)?;
        }
        Operation::SetSudoer(sudoer) => {
            store_address(env, &mut w, sudoer)?;
        }
        Operation::SudoMessage(relayed) => {
            store_relayed(env, &mut w, relayed)?;
        }
        Operation::Upgrade(request) => {
            let data = request
                .data
                .as_ref()
                .map(|state| encode_state(env, state))
                .transpose()?;
            w.store_maybe_ref(data.as_ref())?;
            match &request.code {
                Some(code) => {
                    w.store_bit(true);
                    w.store_raw(&Bytes::from_array(env, &code.to_array()));
                }
                None => {
                    w.store_bit(false);
                }
            }
            let continuation = request
                .continuation
                .as_ref()
                .map(|c| encode_continuation(env, c))
                .transpose()?;
            w.store_maybe_ref(continuation.as_ref())?;
        }
        Operation::Deposit(amount)
        | Operation::Withdraw(amount)
        | Operation::LoanRepayment(amount)
        | Operation::Donate(amount) => {
            store_amount(&mut w, *amount)?;
        }
        Operation::LoanRequest(request) => {
            store_amount(&mut w, request.min_loan)?;
            store_amount(&mut w, request.max_loan)?;
            w.store_uint(u128::from(request.max_interest), INTEREST_BITS)?;
        }
        Operation::ControllerDeployRequest(controller_id) => {
            w.store_uint(u128::from(*controller_id), 32)?;
        }
    }
    Ok(w.finish())
}

fn store_amount(w: &mut BitWriter, amount: i128) -> Result<(), BitsError> {
    let amount = u128::try_from(amount).map_err(|_| BitsError::Overflow)?;
    w.store_coins(amount)?;
    Ok(())
}

fn store_address(env: &Env, w: &mut BitWriter, address: &Address) -> Result<(), BitsError> {
    w.store_ref(&address.clone().to_xdr(env))?;
    Ok(())
}

fn store_symbol(env: &Env, w: &mut BitWriter, symbol: &Symbol) -> Result<(), BitsError> {
    // ScVal::Symbol XDR: tag, length, name.
    let xdr = symbol.clone().to_xdr(env);
    let len = be_word(&xdr, 4).ok_or(BitsError::Unsupported)?;
    w.store_ref(&xdr.slice(8..8 + len))?;
    Ok(())
}

fn store_relayed(env: &Env, w: &mut BitWriter, relayed: &RelayedMessage) -> Result<(), BitsError> {
    w.store_uint(u128::from(relayed.mode), SEND_MODE_BITS)?;
    store_address(env, w, &relayed.message.to)?;
    store_amount(w, relayed.message.value)?;
    w.store_ref(&relayed.message.body)?;
    Ok(())
}

fn encode_state(env: &Env, state: &PoolState) -> Result<Bytes, BitsError> {
    let mut w = BitWriter::new(env);
    let roles = &state.roles;
    for holder in [
        &roles.governor,
        &roles.halter,
        &roles.interest_manager,
        &roles.approver,
        &roles.treasury,
        &roles.sudoer,
    ] {
        store_address(env, &mut w, holder)?;
    }
    w.store_uint(u128::from(state.governor_update_after), 64)?;
    w.store_uint(u128::from(state.sudoer_set_at), 64)?;
    w.store_bit(state.halted);
    w.store_bit(state.optimistic_deposit_withdrawals);
    w.store_bit(state.deposits_open);
    store_amount(&mut w, state.min_msg_value)?;
    w.store_uint(u128::from(state.governance_fee), 32)?;
    w.store_uint(u128::from(state.interest_rate), 32)?;
    w.store_uint(u128::from(state.instant_withdrawal_fee), 32)?;
    Ok(w.finish())
}

fn encode_continuation(env: &Env, continuation: &Continuation) -> Result<Bytes, BitsError> {
    let mut w = BitWriter::new(env);
    w.store_uint(u128::from(continuation.steps.len()), COUNT_BITS)?;
    for step in continuation.steps.iter() {
        match step {
            Instruction::Send(relayed) => {
                w.store_uint(u128::from(STEP_SEND), STEP_TAG_BITS)?;
                store_relayed(env, &mut w, &relayed)?;
            }
            Instruction::Invoke(call) => {
                w.store_uint(u128::from(STEP_INVOKE), STEP_TAG_BITS)?;
                store_address(env, &mut w, &call.contract)?;
                store_symbol(env, &mut w, &call.func)?;
                w.store_uint(u128::from(call.args.len()), COUNT_BITS)?;
                for arg in call.args.iter() {
                    store_arg(env, &mut w, &arg)?;
                }
            }
            Instruction::Emit(event) => {
                w.store_uint(u128::from(STEP_EMIT), STEP_TAG_BITS)?;
                w.store_uint(u128::from(event.topics.len()), COUNT_BITS)?;
                for topic in event.topics.iter() {
                    store_symbol(env, &mut w, &topic)?;
                }
                w.store_ref(&event.data)?;
            }
        }
    }
    Ok(w.finish())
}

fn store_arg(env: &Env, w: &mut BitWriter, arg: &Val) -> Result<(), BitsError> {
    if let Ok(v) = bool::try_from_val(env, arg) {
        w.store_uint(u128::from(ARG_BOOL), ARG_TAG_BITS)?;
        w.store_bit(v);
    } else if let Ok(v) = u32::try_from_val(env, arg) {
        w.store_uint(u128::from(ARG_U32), ARG_TAG_BITS)?;
        w.store_uint(u128::from(v), 32)?;
    } else if let Ok(v) = i32::try_from_val(env, arg) {
        w.store_uint(u128::from(ARG_I32), ARG_TAG_BITS)?;
        w.store_uint(u128::from(v as u32), 32)?;
    } else if let Ok(v) = u64::try_from_val(env, arg) {
        w.store_uint(u128::from(ARG_U64), ARG_TAG_BITS)?;
        w.store_uint(u128::from(v), 64)?;
    } else if let Ok(v) = i64::try_from_val(env, arg) {
        w.store_uint(u128::from(ARG_I64), ARG_TAG_BITS)?;
        w.store_uint(u128::from(v as u64), 64)?;
    } else if let Ok(v) = u128::try_from_val(env, arg) {
        w.store_uint(u128::from(ARG_U128), ARG_TAG_BITS)?;
        w.store_uint(v, 128)?;
    } else if let Ok(v) = i128::try_from_val(env, arg) {
        w.store_uint(u128::from(ARG_I128), ARG_TAG_BITS)?;
        w.store_uint(v as u128, 128)?;
    } else if let Ok(v) = Address::try_from_val(env, arg) {
        w.store_uint(u128::from(ARG_ADDRESS), ARG_TAG_BITS)?;
        store_address(env, w, &v)?;
    } else if let Ok(v) = Bytes::try_from_val(env, arg) {
        w.store_uint(u128::from(ARG_BYTES), ARG_TAG_BITS)?;
        w.store_ref(&v)?;
    } else if let Ok(v) = Symbol::try_from_val(env, arg) {
        w.store_uint(u128::from(ARG_SYMBOL), ARG_TAG_BITS)?;
        store_symbol(env, w, &v)?;
    } else {
        return Err(BitsError::Unsupported);
    }
    Ok(())
}
