//! Names the verifier uses to address deployment records.

pub const HAT_TIMELOCK_CONTROLLER: &str = "hat_timelock_controller";
pub const HAT_VAULTS_REGISTRY: &str = "hat_vaults_registry";
pub const HAT_VAULT_IMPLEMENTATION: &str = "hat_vault_implementation";
pub const HAT_CLAIMS_MANAGER_IMPLEMENTATION: &str = "hat_claims_manager_implementation";
pub const REWARD_CONTROLLER: &str = "reward_controller";
pub const TOKEN_LOCK_FACTORY: &str = "token_lock_factory";
pub const HAT_TOKEN_LOCK: &str = "hat_token_lock";
pub const HAT_GOVERNANCE_ARBITRATOR: &str = "hat_governance_arbitrator";
pub const HAT_ARBITRATOR: &str = "hat_arbitrator";
pub const HAT_KLEROS_CONNECTOR: &str = "hat_kleros_connector";
