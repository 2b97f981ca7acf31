//! Operation dispatcher.
//!
//! Typed entry points and the raw `dispatch` body both end up here as an
//! [`Operation`]. Execution order is fixed: authorization guard, halt gate
//! for pool requests, mutation of an owned copy of the state, one save, and
//! only then outbound effects.

use common::{fraction, QuarantineError};
use soroban_sdk::{contracttype, Address, Env};

use crate::{
    auth::{self, Requirement},
    config::{self, GovernanceConfig},
    events,
    halt::{self, HaltStatus},
    outbox,
    roles::{Role, RoleUpdate},
    state::{self, PoolState},
    upgrade::{self, Continuation, RelayedMessage, UpgradeRequest},
    ContractError,
};

// ── Payload types ────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositSettings {
    pub min_msg_value: i128,
    pub optimistic: bool,
    pub deposits_open: bool,
    /// Absent keeps the current fee.
    pub instant_withdrawal_fee: Option<u32>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanRequest {
    pub min_loan: i128,
    pub max_loan: i128,
    pub max_interest: u32,
}

/// Pool requests forwarded to the loan/round subsystem.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PoolRequestKind {
    Deposit = 1,
    Withdraw = 2,
    LoanRequest = 3,
    LoanRepayment = 4,
    Touch = 5,
    ControllerDeploy = 6,
    Donate = 7,
}

#[derive(Clone, Debug)]
pub enum Operation {
    PrepareGovernanceMigration { after: u64 },
    SetRoles(RoleUpdate),
    SetDepositSettings(DepositSettings),
    Halt,
    Unhalt,
    PartialHalt { disable_optimistic: bool, close_deposits: bool },
    SetGovernanceFee(u32),
    SetInterest(u32),
    SetSudoer(Address),
    SudoMessage(RelayedMessage),
    Upgrade(UpgradeRequest),
    Deposit(i128),
    Withdraw(i128),
    LoanRequest(LoanRequest),
    LoanRepayment(i128),
    Touch,
    ControllerDeployRequest(u32),
    Donate(i128),
}

impl Operation {
    pub fn requirement(&self) -> Requirement {
        match self {
            Operation::PrepareGovernanceMigration { .. }
            | Operation::SetRoles(_)
            | Operation::SetDepositSettings(_)
            | Operation::Unhalt
            | Operation::SetGovernanceFee(_)
            | Operation::SetSudoer(_) => Requirement::Holder(Role::Governor),
            Operation::Halt | Operation::PartialHalt { .. } => Requirement::Holder(Role::Halter),
            Operation::SetInterest(_) => Requirement::Holder(Role::InterestManager),
            Operation::SudoMessage(_) | Operation::Upgrade(_) => Requirement::MaturedSudoer,
            Operation::Deposit(_)
            | Operation::Withdraw(_)
            | Operation::LoanRequest(_)
            | Operation::LoanRepayment(_)
            | Operation::Touch
            | Operation::ControllerDeployRequest(_)
            | Operation::Donate(_) => Requirement::Anyone,
        }
    }

    /// Economic requests refused while fully halted. Withdrawal stays open so
    /// burned pool jettons can always be redeemed.
    pub fn is_halt_gated(&self) -> bool {
        matches!(
            self,
            Operation::Deposit(_)
                | Operation::LoanRequest(_)
                | Operation::LoanRepayment(_)
                | Operation::Touch
                | Operation::ControllerDeployRequest(_)
                | Operation::Donate(_)
        )
    }
}

/// Follow-up work performed after the state has been saved.
enum Effect {
    Nothing,
    Relay(RelayedMessage),
    Continue(Continuation),
    Forward {
        kind: PoolRequestKind,
        amount: i128,
        aux: u64,
    },
}

// ── Execution ────────────────────────────────────────────────────────────────

pub fn execute(env: &Env, sender: &Address, op: Operation) -> Result<(), ContractError> {
    let config = config::load(env)?;
    let mut state = state::load(env)?;
    let now = env.ledger().timestamp();

    auth::authorize(&state, &config, sender, op.requirement(), now)?;
    if op.is_halt_gated() {
        halt::ensure_running(&state)?;
    }

    let effect = apply(env, &mut state, &config, sender, op, now)?;
    state::save(env, &state);

    match effect {
        Effect::Nothing => {}
        Effect::Relay(relayed) => outbox::relay(env, &relayed),
        Effect::Continue(continuation) => upgrade::run(env, &continuation),
        Effect::Forward { kind, amount, aux } => {
            events::publish_pool_request(env, kind, sender.clone(), amount, aux)
        }
    }
    Ok(())
}

fn apply(
    env: &Env,
    state: &mut PoolState,
    config: &GovernanceConfig,
    sender: &Address,
    op: Operation,
    now: u64,
) -> Result<Effect, ContractError> {
    match op {
        Operation::PrepareGovernanceMigration { after } => {
            state.governor_update_after = config
                .governor_timer()
                .propose(now, after)
                .map_err(governor_timer_error)?;
            events::publish_migration_prepared(env, sender.clone(), after);
        }
        Operation::SetRoles(update) => {
            let timer = config.governor_timer();
            if update.touches_governor() {
                timer
                    .ensure_matured(now, state.governor_update_after)
                    .map_err(governor_timer_error)?;
            }
            state.roles.apply(&update);
            if update.touches_governor() {
                state.governor_update_after = timer.reset();
            }
            events::publish_roles_set(env, sender.clone(), update);
        }
        Operation::SetDepositSettings(settings) => {
            if settings.min_msg_value < 0 {
                return Err(ContractError::InvalidAmount);
            }
            if let Some(fee) = settings.instant_withdrawal_fee {
                require_fraction(fee)?;
                state.instant_withdrawal_fee = fee;
            }
            state.min_msg_value = settings.min_msg_value;
            state.optimistic_deposit_withdrawals = settings.optimistic;
            state.deposits_open = settings.deposits_open;
            events::publish_deposit_settings_set(
                env,
                state.min_msg_value,
                state.optimistic_deposit_withdrawals,
                state.deposits_open,
                state.instant_withdrawal_fee,
            );
        }
        Operation::Halt => {
            halt::halt(state);
            events::publish_halted(env, sender.clone(), HaltStatus::of(state));
        }
        Operation::Unhalt => {
            halt::unhalt(state);
            events::publish_unhalted(env, sender.clone(), HaltStatus::of(state));
        }
        Operation::PartialHalt {
            disable_optimistic,
            close_deposits,
        } => {
            halt::partial_halt(state, disable_optimistic, close_deposits);
            events::publish_partial_halt(env, sender.clone(), HaltStatus::of(state));
        }
        Operation::SetGovernanceFee(fee) => {
            require_fraction(fee)?;
            state.governance_fee = fee;
            events::publish_governance_fee_set(env, sender.clone(), fee);
        }
        Operation::SetInterest(rate) => {
            require_fraction(rate)?;
            state.interest_rate = rate;
            events::publish_interest_set(env, sender.clone(), rate);
        }
        Operation::SetSudoer(sudoer) => {
            let timer = config.sudo_timer();
            let previous = state.roles.get(Role::Sudoer).clone();
            state.roles.set(Role::Sudoer, sudoer.clone());
            state.sudoer_set_at = timer.arm(now);
            events::publish_sudoer_set(
                env,
                previous,
                sudoer,
                timer.threshold(state.sudoer_set_at),
            );
        }
        Operation::SudoMessage(relayed) => return Ok(Effect::Relay(relayed)),
        Operation::Upgrade(request) => {
            let outcome = upgrade::replace(env, state, &request);
            events::publish_upgraded(env, sender.clone(), outcome);
            if let Some(continuation) = request.continuation {
                return Ok(Effect::Continue(continuation));
            }
        }
        Operation::Deposit(amount) => {
            halt::ensure_deposits_open(state)?;
            require_positive(amount)?;
            if amount < state.min_msg_value {
                return Err(ContractError::DepositTooSmall);
            }
            return Ok(forward(PoolRequestKind::Deposit, amount, 0));
        }
        Operation::Withdraw(amount) => {
            require_positive(amount)?;
            return Ok(forward(PoolRequestKind::Withdraw, amount, 0));
        }
        Operation::LoanRequest(request) => {
            require_fraction(request.max_interest)?;
            require_positive(request.min_loan)?;
            if request.max_loan < request.min_loan {
                return Err(ContractError::InvalidAmount);
            }
            return Ok(forward(
                PoolRequestKind::LoanRequest,
                request.max_loan,
                u64::from(request.max_interest),
            ));
        }
        Operation::LoanRepayment(amount) => {
            require_positive(amount)?;
            return Ok(forward(PoolRequestKind::LoanRepayment, amount, 0));
        }
        Operation::Touch => return Ok(forward(PoolRequestKind::Touch, 0, 0)),
        Operation::ControllerDeployRequest(controller_id) => {
            return Ok(forward(
                PoolRequestKind::ControllerDeploy,
                0,
                u64::from(controller_id),
            ));
        }
        Operation::Donate(amount) => {
            require_positive(amount)?;
            return Ok(forward(PoolRequestKind::Donate, amount, 0));
        }
    }
    Ok(Effect::Nothing)
}

fn forward(kind: PoolRequestKind, amount: i128, aux: u64) -> Effect {
    Effect::Forward { kind, amount, aux }
}

fn governor_timer_error(err: QuarantineError) -> ContractError {
    match err {
        QuarantineError::TooSoon => ContractError::GovernorUpdateTooSoon,
        QuarantineError::NotMatured => ContractError::GovernorUpdateNotMatured,
    }
}

fn require_fraction(value: u32) -> Result<(), ContractError> {
    if !fraction::is_valid(value) {
        return Err(ContractError::FractionOutOfRange);
    }
    Ok(())
}

fn require_positive(amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}
