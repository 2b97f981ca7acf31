use soroban_sdk::{contracttype, Address};

/// Privileged roles of the pool. Roles are flat: holding one never implies
/// another, and the same address may hold several.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Governor = 1,
    Halter = 2,
    InterestManager = 3,
    Approver = 4,
    Treasury = 5,
    Sudoer = 6,
}

/// Current holder of every role. All fields are mandatory, so a role can
/// never be vacant.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Roles {
    pub governor: Address,
    pub halter: Address,
    pub interest_manager: Address,
    pub approver: Address,
    pub treasury: Address,
    pub sudoer: Address,
}

/// Batch of role reassignments for `set_roles`. Absent fields are untouched.
///
/// The sudoer is not part of a batch: it has its own `set_sudoer` operation
/// that re-arms the sudo quarantine.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoleUpdate {
    pub governor: Option<Address>,
    pub interest_manager: Option<Address>,
    pub halter: Option<Address>,
    pub approver: Option<Address>,
    pub treasury: Option<Address>,
}

impl Roles {
    /// Same address in every role; convenient for single-multisig deployments.
    pub fn uniform(holder: &Address) -> Self {
        Self {
            governor: holder.clone(),
            halter: holder.clone(),
            interest_manager: holder.clone(),
            approver: holder.clone(),
            treasury: holder.clone(),
            sudoer: holder.clone(),
        }
    }

    pub fn get(&self, role: Role) -> &Address {
        match role {
            Role::Governor => &self.governor,
            Role::Halter => &self.halter,
            Role::InterestManager => &self.interest_manager,
            Role::Approver => &self.approver,
            Role::Treasury => &self.treasury,
            Role::Sudoer => &self.sudoer,
        }
    }

    pub fn set(&mut self, role: Role, identity: Address) {
        let slot = match role {
            Role::Governor => &mut self.governor,
            Role::Halter => &mut self.halter,
            Role::InterestManager => &mut self.interest_manager,
            Role::Approver => &mut self.approver,
            Role::Treasury => &mut self.treasury,
            Role::Sudoer => &mut self.sudoer,
        };
        *slot = identity;
    }

    /// Strict identity check, no inheritance between roles.
    pub fn holds(&self, role: Role, who: &Address) -> bool {
        self.get(role) == who
    }

    /// Applies every present entry of `update`.
    ///
    /// Infallible: callers run all checks for the batch first, so the batch
    /// lands completely or not at all.
    pub fn apply(&mut self, update: &RoleUpdate) {
        for (role, identity) in update.entries() {
            self.set(role, identity.clone());
        }
    }
}

impl RoleUpdate {
    pub fn entries(&self) -> impl Iterator<Item = (Role, &Address)> + '_ {
        [
            (Role::Governor, &self.governor),
            (Role::InterestManager, &self.interest_manager),
            (Role::Halter, &self.halter),
            (Role::Approver, &self.approver),
            (Role::Treasury, &self.treasury),
        ]
        .into_iter()
        .filter_map(|(role, identity)| identity.as_ref().map(|id| (role, id)))
    }

    pub fn touches_governor(&self) -> bool {
        self.governor.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}
