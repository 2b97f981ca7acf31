#![no_std]

pub mod auth;
pub mod config;
pub mod dispatch;
pub mod events;
pub mod halt;
pub mod message;
pub mod outbox;
pub mod roles;
pub mod state;
pub mod upgrade;

use common::ErrorClass;
use soroban_sdk::{contract, contractimpl, Address, Bytes, BytesN, Env, Vec};

pub use config::GovernanceConfig;
pub use dispatch::{DepositSettings, LoanRequest, Operation, PoolRequestKind};
pub use halt::HaltStatus;
pub use outbox::OutboxEntry;
pub use roles::{Role, RoleUpdate, Roles};
pub use state::PoolState;
pub use upgrade::{
    Continuation, Instruction, InvokeCall, OutboundMessage, RawEvent, RelayedMessage,
    UpgradeRequest,
};

// ── Contract errors ──────────────────────────────────────────────────────────

/// Stable exit codes. Ranges follow [`common::ErrorClass`].
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Sender is not the holder of the role the operation requires.
    WrongSender = 10,
    /// Announced governor maturity does not exceed `now + governor_quarantine`.
    GovernorUpdateTooSoon = 20,
    /// Governor change attempted at or before the announced maturity.
    GovernorUpdateNotMatured = 21,
    /// True sudoer, but still inside the sudo quarantine.
    SudoerQuarantine = 22,
    /// Body could not be parsed or carried trailing bits.
    MalformedInput = 30,
    /// Fraction numerator is not below 2^24.
    FractionOutOfRange = 31,
    UnknownOperation = 32,
    InvalidAmount = 33,
    Halted = 40,
    DepositsAreClosed = 41,
    DepositTooSmall = 42,
}

impl ContractError {
    pub fn class(&self) -> ErrorClass {
        ErrorClass::of_code(*self as u32).unwrap_or(ErrorClass::Lifecycle)
    }
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct PoolGovernanceContract;

#[contractimpl]
impl PoolGovernanceContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `roles`  – initial holder of every role.
    /// * `code`   – handle of the logic version being deployed.
    /// * `config` – quarantine durations; defaults to one day each.
    pub fn initialize(
        env: Env,
        roles: Roles,
        code: BytesN<32>,
        config: Option<GovernanceConfig>,
    ) -> Result<(), ContractError> {
        if config::exists(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        let config = config.unwrap_or_default();

        config::store(&env, &config);
        state::save(&env, &PoolState::new(roles.clone()));
        state::save_code(&env, &code);

        events::publish_initialized(&env, roles, config, code);

        Ok(())
    }

    // ── Raw dispatch ────────────────────────────────────────────────────────

    /// Decode a tagged body and route it like the matching typed entry point.
    pub fn dispatch(env: Env, sender: Address, body: Bytes) -> Result<(), ContractError> {
        sender.require_auth();
        let inbound = message::decode(&env, body)?;
        dispatch::execute(&env, &sender, inbound.operation)?;
        events::publish_dispatched(&env, inbound.op, inbound.query_id, sender);
        Ok(())
    }

    // ── Governor ────────────────────────────────────────────────────────────

    /// Announce that the governor may be replaced strictly after `after`.
    /// `after` must exceed `now + governor_quarantine`.
    pub fn prepare_governance_migration(
        env: Env,
        sender: Address,
        after: u64,
    ) -> Result<(), ContractError> {
        Self::run(&env, sender, Operation::PrepareGovernanceMigration { after })
    }

    /// Reassign any subset of governor, interest manager, halter, approver
    /// and treasury. A governor change additionally needs a matured
    /// migration and re-arms the protocol.
    pub fn set_roles(env: Env, sender: Address, update: RoleUpdate) -> Result<(), ContractError> {
        Self::run(&env, sender, Operation::SetRoles(update))
    }

    pub fn set_deposit_settings(
        env: Env,
        sender: Address,
        min_msg_value: i128,
        optimistic: bool,
        deposits_open: bool,
        instant_withdrawal_fee: Option<u32>,
    ) -> Result<(), ContractError> {
        Self::run(
            &env,
            sender,
            Operation::SetDepositSettings(DepositSettings {
                min_msg_value,
                optimistic,
                deposits_open,
                instant_withdrawal_fee,
            }),
        )
    }

    pub fn set_governance_fee(env: Env, sender: Address, fee: u32) -> Result<(), ContractError> {
        Self::run(&env, sender, Operation::SetGovernanceFee(fee))
    }

    /// Assign a new sudoer. Its quarantine starts now.
    pub fn set_sudoer(env: Env, sender: Address, sudoer: Address) -> Result<(), ContractError> {
        Self::run(&env, sender, Operation::SetSudoer(sudoer))
    }

    pub fn unhalt(env: Env, sender: Address) -> Result<(), ContractError> {
        Self::run(&env, sender, Operation::Unhalt)
    }

    // ── Interest manager ────────────────────────────────────────────────────

    pub fn set_interest(env: Env, sender: Address, rate: u32) -> Result<(), ContractError> {
        Self::run(&env, sender, Operation::SetInterest(rate))
    }

    // ── Halter ──────────────────────────────────────────────────────────────

    pub fn halt(env: Env, sender: Address) -> Result<(), ContractError> {
        Self::run(&env, sender, Operation::Halt)
    }

    pub fn partial_halt(
        env: Env,
        sender: Address,
        disable_optimistic: bool,
        close_deposits: bool,
    ) -> Result<(), ContractError> {
        Self::run(
            &env,
            sender,
            Operation::PartialHalt {
                disable_optimistic,
                close_deposits,
            },
        )
    }

    // ── Sudoer ──────────────────────────────────────────────────────────────

    /// Relay `message` unchanged with the given send mode.
    pub fn sudo_message(
        env: Env,
        sender: Address,
        mode: u32,
        message: OutboundMessage,
    ) -> Result<(), ContractError> {
        Self::run(
            &env,
            sender,
            Operation::SudoMessage(RelayedMessage { mode, message }),
        )
    }

    /// Replace the governed record, the logic handle and/or run a
    /// continuation. Each payload is applied only when present.
    pub fn upgrade(
        env: Env,
        sender: Address,
        data: Option<PoolState>,
        code: Option<BytesN<32>>,
        continuation: Option<Continuation>,
    ) -> Result<(), ContractError> {
        Self::run(
            &env,
            sender,
            Operation::Upgrade(UpgradeRequest {
                data,
                code,
                continuation,
            }),
        )
    }

    // ── Pool requests ───────────────────────────────────────────────────────

    pub fn deposit(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        Self::run(&env, sender, Operation::Deposit(amount))
    }

    /// Not gated by halt.
    pub fn withdraw(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        Self::run(&env, sender, Operation::Withdraw(amount))
    }

    pub fn loan_request(
        env: Env,
        controller: Address,
        min_loan: i128,
        max_loan: i128,
        max_interest: u32,
    ) -> Result<(), ContractError> {
        Self::run(
            &env,
            controller,
            Operation::LoanRequest(LoanRequest {
                min_loan,
                max_loan,
                max_interest,
            }),
        )
    }

    pub fn loan_repayment(env: Env, controller: Address, amount: i128) -> Result<(), ContractError> {
        Self::run(&env, controller, Operation::LoanRepayment(amount))
    }

    pub fn touch(env: Env, sender: Address) -> Result<(), ContractError> {
        Self::run(&env, sender, Operation::Touch)
    }

    pub fn request_controller_deploy(
        env: Env,
        sender: Address,
        controller_id: u32,
    ) -> Result<(), ContractError> {
        Self::run(&env, sender, Operation::ControllerDeployRequest(controller_id))
    }

    pub fn donate(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        Self::run(&env, sender, Operation::Donate(amount))
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn is_initialized(env: Env) -> bool {
        config::exists(&env)
    }

    pub fn get_state(env: Env) -> Result<PoolState, ContractError> {
        state::load(&env)
    }

    pub fn get_config(env: Env) -> Result<GovernanceConfig, ContractError> {
        config::load(&env)
    }

    pub fn get_roles(env: Env) -> Result<Roles, ContractError> {
        Ok(state::load(&env)?.roles)
    }

    pub fn get_role(env: Env, role: Role) -> Result<Address, ContractError> {
        Ok(state::load(&env)?.roles.get(role).clone())
    }

    /// Read-only gate consumed by the loan/round subsystem.
    pub fn is_halted(env: Env) -> Result<bool, ContractError> {
        Ok(state::load(&env)?.halted)
    }

    pub fn get_halt_status(env: Env) -> Result<HaltStatus, ContractError> {
        Ok(HaltStatus::of(&state::load(&env)?))
    }

    pub fn get_governor_update_after(env: Env) -> Result<u64, ContractError> {
        Ok(state::load(&env)?.governor_update_after)
    }

    pub fn get_sudoer_set_at(env: Env) -> Result<u64, ContractError> {
        Ok(state::load(&env)?.sudoer_set_at)
    }

    pub fn get_code(env: Env) -> Result<BytesN<32>, ContractError> {
        state::load_code(&env)
    }

    /// Most recent relayed messages, oldest first.
    pub fn get_outbox(env: Env) -> Vec<OutboxEntry> {
        outbox::list(&env)
    }

    pub fn get_last_relayed(env: Env) -> Option<OutboxEntry> {
        outbox::last(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn run(env: &Env, sender: Address, op: Operation) -> Result<(), ContractError> {
        sender.require_auth();
        dispatch::execute(env, &sender, op)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────





#[cfg(test)]
mod test_dispatch;
