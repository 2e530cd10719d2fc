use alloy::primitives::{keccak256, map::HashMap, Address, FixedBytes};
use std::collections::BTreeSet;

pub const TIMELOCK_ADMIN_ROLE: &str = "TIMELOCK_ADMIN_ROLE";
pub const PROPOSER_ROLE: &str = "PROPOSER_ROLE";
pub const EXECUTOR_ROLE: &str = "EXECUTOR_ROLE";
pub const CANCELLER_ROLE: &str = "CANCELLER_ROLE";
pub const MANAGER_ROLE: &str = "MANAGER_ROLE";

/// Role identifiers are the keccak hash of the role name, as emitted by the
/// timelock controller itself.
pub fn role_id(name: &str) -> FixedBytes<32> {
    keccak256(name.as_bytes())
}

/// A role together with the role that administers it. The admin pointers
/// form a tree rooted at `TIMELOCK_ADMIN_ROLE`, which administers itself.
pub struct RoleDescriptor {
    pub name: &'static str,
    pub id: FixedBytes<32>,
    pub admin_id: FixedBytes<32>,
}

pub fn known_roles() -> Vec<RoleDescriptor> {
    let admin = role_id(TIMELOCK_ADMIN_ROLE);
    [
        TIMELOCK_ADMIN_ROLE,
        PROPOSER_ROLE,
        EXECUTOR_ROLE,
        CANCELLER_ROLE,
        MANAGER_ROLE,
    ]
    .into_iter()
    .map(|name| RoleDescriptor {
        name,
        id: role_id(name),
        admin_id: admin,
    })
    .collect()
}

pub fn role_label(id: &FixedBytes<32>) -> String {
    for role in known_roles() {
        if role.id == *id {
            return role.name.to_string();
        }
    }
    format!("{}", id)
}

/// A single historical `RoleGranted` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGrant {
    pub role: FixedBytes<32>,
    pub account: Address,
    pub block: u64,
}

/// The intended account -> roles mapping, built once per run from the
/// resolved configuration and immutable afterwards. An account appearing in
/// several lists accumulates the union of its roles.
pub struct ExpectedTopology {
    roles_by_account: HashMap<Address, BTreeSet<FixedBytes<32>>>,
}

impl ExpectedTopology {
    pub fn build(
        governance: Address,
        timelock: Address,
        executors: &[Address],
        managers: &[Address],
    ) -> Self {
        let mut topology = Self {
            roles_by_account: HashMap::default(),
        };
        topology.grant(governance, PROPOSER_ROLE);
        topology.grant(governance, CANCELLER_ROLE);
        topology.grant(timelock, TIMELOCK_ADMIN_ROLE);
        for executor in executors {
            topology.grant(*executor, EXECUTOR_ROLE);
        }
        for manager in managers {
            topology.grant(*manager, MANAGER_ROLE);
        }
        topology
    }

    fn grant(&mut self, account: Address, role_name: &str) {
        self.roles_by_account
            .entry(account)
            .or_default()
            .insert(role_id(role_name));
    }

    pub fn allows(&self, account: &Address, role: &FixedBytes<32>) -> bool {
        self.roles_by_account
            .get(account)
            .map(|roles| roles.contains(role))
            .unwrap_or(false)
    }

    pub fn roles_of(&self, account: &Address) -> Option<&BTreeSet<FixedBytes<32>>> {
        self.roles_by_account.get(account)
    }
}

/// The constructor of the timelock controller grants three fixed roles
/// (self-admin plus the two governance grants) and one role per configured
/// executor and manager. The count is over resolved list lengths, without
/// deduplicating accounts across lists.
pub fn expected_grant_count(executors: usize, managers: usize) -> u64 {
    3 + executors as u64 + managers as u64
}
