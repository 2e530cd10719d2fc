//! In-memory chain state for checker tests.

use alloy::primitives::{Address, U256};
use anyhow::Context;
use std::collections::HashMap;

use crate::checks::sig;
use crate::config::{
    DeployedContracts, HatArbitratorConf, HatKlerosConnectorConf, HatVaultsRegistryConf, Numeric,
    ResolvedConfig,
};
use crate::contracts;
use crate::roles::{self, RoleGrant};
use crate::utils::network_reader::{CallArg, ChainReader, ChainValue, ValueKind};

pub fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

fn field_key(contract: &str, method_sig: &str, args: &[CallArg]) -> String {
    let mut key = format!("{}.{}", contract, method_sig);
    for arg in args {
        key.push(':');
        key.push_str(&format!("{:x}", arg.as_word()));
    }
    key
}

#[derive(Default)]
pub struct FakeChain {
    pub addresses: HashMap<String, Address>,
    pub deployment_blocks: HashMap<String, u64>,
    pub latest: u64,
    pub fields: HashMap<String, ChainValue>,
    pub grants: Vec<RoleGrant>,
}

impl FakeChain {
    pub fn set_field(
        &mut self,
        contract: &str,
        method_sig: &str,
        args: &[CallArg],
        value: ChainValue,
    ) {
        self.fields.insert(field_key(contract, method_sig, args), value);
    }

    fn set_has_role(&mut self, role_name: &str, account: Address, outcome: bool) {
        self.set_field(
            contracts::HAT_TIMELOCK_CONTROLLER,
            sig::HAS_ROLE,
            &[
                CallArg::Bytes32(roles::role_id(role_name)),
                CallArg::Address(account),
            ],
            ChainValue::Bool(outcome),
        );
    }
}

impl ChainReader for FakeChain {
    fn deployed_address(&self, contract: &str) -> anyhow::Result<Address> {
        self.addresses
            .get(contract)
            .copied()
            .with_context(|| format!("fake chain has no address for {}", contract))
    }

    fn deployment_block(&self, contract: &str) -> anyhow::Result<u64> {
        self.deployment_blocks
            .get(contract)
            .copied()
            .with_context(|| format!("fake chain has no deployment block for {}", contract))
    }

    async fn latest_block(&self) -> anyhow::Result<u64> {
        Ok(self.latest)
    }

    async fn read_field(
        &self,
        contract: &str,
        method_sig: &str,
        args: &[CallArg],
        _kind: ValueKind,
    ) -> anyhow::Result<ChainValue> {
        let key = field_key(contract, method_sig, args);
        self.fields
            .get(&key)
            .cloned()
            .with_context(|| format!("fake chain has no value for {}", key))
    }

    async fn role_grants(
        &self,
        _contract: &str,
        from_block: u64,
        to_block: u64,
    ) -> anyhow::Result<Vec<RoleGrant>> {
        Ok(self
            .grants
            .iter()
            .filter(|grant| grant.block >= from_block && grant.block <= to_block)
            .copied()
            .collect())
    }
}

/// A deployment in the exact state the deploy pipeline leaves behind:
/// governance 0xaa, one extra executor 0xbb, one extra manager 0xcc, Kleros
/// disabled. Every check against this fixture passes.
pub fn healthy_fixture() -> (ResolvedConfig, FakeChain) {
    let deployer = addr(0xdd);
    let governance = addr(0xaa);
    let executor = addr(0xbb);
    let manager = addr(0xcc);
    let timelock = addr(0x11);

    let config = ResolvedConfig {
        network: "hardhat".to_string(),
        rpc: "http://localhost:8545".to_string(),
        deployer,
        governance,
        executors: vec![executor, governance],
        managers: vec![manager, governance],
        timelock_delay: Numeric::from(600),
        registry: HatVaultsRegistryConf {
            use_kleros: false,
            bounty_governance_hat: Numeric::from(1000),
            bounty_hacker_hat_vested: Numeric::from(0),
            swap_token: addr(0x70),
        },
        arbitrator: None,
        kleros_connector: None,
        deployed: DeployedContracts {
            hat_timelock_controller: timelock,
            hat_timelock_controller_deploy_block: 100,
            hat_vaults_registry: addr(0x22),
            hat_vault_implementation: addr(0x33),
            hat_claims_manager_implementation: addr(0x44),
            reward_controller: addr(0x55),
            token_lock_factory: addr(0x66),
            hat_token_lock: addr(0x77),
            hat_governance_arbitrator: addr(0x88),
            hat_arbitrator: None,
            hat_kleros_connector: None,
        },
    };

    let mut chain = FakeChain {
        latest: 200,
        ..Default::default()
    };
    for (name, address) in [
        (contracts::HAT_TIMELOCK_CONTROLLER, timelock),
        (contracts::HAT_VAULTS_REGISTRY, addr(0x22)),
        (contracts::HAT_VAULT_IMPLEMENTATION, addr(0x33)),
        (contracts::HAT_CLAIMS_MANAGER_IMPLEMENTATION, addr(0x44)),
        (contracts::REWARD_CONTROLLER, addr(0x55)),
        (contracts::TOKEN_LOCK_FACTORY, addr(0x66)),
        (contracts::HAT_TOKEN_LOCK, addr(0x77)),
        (contracts::HAT_GOVERNANCE_ARBITRATOR, addr(0x88)),
    ] {
        chain.addresses.insert(name.to_string(), address);
    }
    chain
        .deployment_blocks
        .insert(contracts::HAT_TIMELOCK_CONTROLLER.to_string(), 100);

    // Timelock access control.
    chain.set_has_role(roles::TIMELOCK_ADMIN_ROLE, deployer, false);
    chain.set_has_role(roles::TIMELOCK_ADMIN_ROLE, timelock, true);
    chain.set_has_role(roles::PROPOSER_ROLE, governance, true);
    chain.set_has_role(roles::CANCELLER_ROLE, governance, true);
    chain.set_has_role(roles::EXECUTOR_ROLE, executor, true);
    chain.set_has_role(roles::EXECUTOR_ROLE, governance, true);
    chain.set_has_role(roles::MANAGER_ROLE, manager, true);
    chain.set_has_role(roles::MANAGER_ROLE, governance, true);
    for role in roles::known_roles() {
        chain.set_field(
            contracts::HAT_TIMELOCK_CONTROLLER,
            sig::GET_ROLE_ADMIN,
            &[CallArg::Bytes32(role.id)],
            ChainValue::Bytes32(role.admin_id),
        );
    }
    chain.set_field(
        contracts::HAT_TIMELOCK_CONTROLLER,
        sig::GET_MIN_DELAY,
        &[],
        ChainValue::Uint(U256::from(600u64)),
    );

    // Registry wiring.
    chain.set_field(
        contracts::HAT_VAULTS_REGISTRY,
        sig::OWNER,
        &[],
        ChainValue::Address(timelock),
    );
    chain.set_field(
        contracts::HAT_VAULTS_REGISTRY,
        sig::DEFAULT_ARBITRATOR,
        &[],
        ChainValue::Address(addr(0x88)),
    );
    chain.set_field(
        contracts::HAT_VAULTS_REGISTRY,
        sig::HAT_VAULT_IMPLEMENTATION,
        &[],
        ChainValue::Address(addr(0x33)),
    );
    chain.set_field(
        contracts::HAT_VAULTS_REGISTRY,
        sig::HAT_CLAIMS_MANAGER_IMPLEMENTATION,
        &[],
        ChainValue::Address(addr(0x44)),
    );
    chain.set_field(
        contracts::HAT_VAULTS_REGISTRY,
        sig::DEFAULT_BOUNTY_GOVERNANCE_HAT,
        &[],
        ChainValue::Uint(U256::from(1000u64)),
    );
    chain.set_field(
        contracts::HAT_VAULTS_REGISTRY,
        sig::DEFAULT_BOUNTY_HACKER_HAT_VESTED,
        &[],
        ChainValue::Uint(U256::ZERO),
    );
    chain.set_field(
        contracts::HAT_VAULTS_REGISTRY,
        sig::SWAP_TOKEN,
        &[],
        ChainValue::Address(addr(0x70)),
    );

    // Dependent contract owners and the token lock master copy.
    for contract in [
        contracts::REWARD_CONTROLLER,
        contracts::TOKEN_LOCK_FACTORY,
        contracts::HAT_GOVERNANCE_ARBITRATOR,
    ] {
        chain.set_field(contract, sig::OWNER, &[], ChainValue::Address(timelock));
    }
    chain.set_field(
        contracts::TOKEN_LOCK_FACTORY,
        sig::MASTER_COPY,
        &[],
        ChainValue::Address(addr(0x77)),
    );

    // The grant history the constructor produced: 3 fixed grants plus one
    // per executor and manager list entry.
    for (role_name, account) in [
        (roles::TIMELOCK_ADMIN_ROLE, timelock),
        (roles::PROPOSER_ROLE, governance),
        (roles::CANCELLER_ROLE, governance),
        (roles::EXECUTOR_ROLE, executor),
        (roles::EXECUTOR_ROLE, governance),
        (roles::MANAGER_ROLE, manager),
        (roles::MANAGER_ROLE, governance),
    ] {
        chain.grants.push(RoleGrant {
            role: roles::role_id(role_name),
            account,
            block: 100,
        });
    }

    (config, chain)
}

/// The healthy fixture with the Kleros arbitration subsystem deployed and
/// enabled.
pub fn kleros_fixture() -> (ResolvedConfig, FakeChain) {
    let (mut config, mut chain) = healthy_fixture();
    let timelock = config.deployed.hat_timelock_controller;
    let arbitrator = addr(0x91);
    let connector = addr(0x92);

    config.registry.use_kleros = true;
    config.arbitrator = Some(HatArbitratorConf {
        expert_committee: addr(0xec),
        token: addr(0x7a),
        bonds_needed_to_start_dispute: Numeric::from(1_000_000),
        min_bond_amount: Numeric::from(500),
    });
    config.kleros_connector = Some(HatKlerosConnectorConf {
        kleros_arbitrator: addr(0x4b),
        winner_multiplier: Numeric::from(3000),
        loser_multiplier: Numeric::from(7000),
    });
    config.deployed.hat_arbitrator = Some(arbitrator);
    config.deployed.hat_kleros_connector = Some(connector);

    chain
        .addresses
        .insert(contracts::HAT_ARBITRATOR.to_string(), arbitrator);
    chain
        .addresses
        .insert(contracts::HAT_KLEROS_CONNECTOR.to_string(), connector);

    chain.set_field(
        contracts::HAT_VAULTS_REGISTRY,
        sig::DEFAULT_ARBITRATOR,
        &[],
        ChainValue::Address(arbitrator),
    );
    chain.set_field(
        contracts::HAT_ARBITRATOR,
        sig::OWNER,
        &[],
        ChainValue::Address(timelock),
    );
    chain.set_field(
        contracts::HAT_ARBITRATOR,
        sig::COURT,
        &[],
        ChainValue::Address(connector),
    );
    chain.set_field(
        contracts::HAT_ARBITRATOR,
        sig::EXPERT_COMMITTEE,
        &[],
        ChainValue::Address(addr(0xec)),
    );
    chain.set_field(
        contracts::HAT_ARBITRATOR,
        sig::TOKEN,
        &[],
        ChainValue::Address(addr(0x7a)),
    );
    chain.set_field(
        contracts::HAT_ARBITRATOR,
        sig::BONDS_NEEDED_TO_START_DISPUTE,
        &[],
        ChainValue::Uint(U256::from(1_000_000u64)),
    );
    chain.set_field(
        contracts::HAT_ARBITRATOR,
        sig::MIN_BOND_AMOUNT,
        &[],
        ChainValue::Uint(U256::from(500u64)),
    );
    chain.set_field(
        contracts::HAT_KLEROS_CONNECTOR,
        sig::KLEROS_ARBITRATOR,
        &[],
        ChainValue::Address(addr(0x4b)),
    );
    chain.set_field(
        contracts::HAT_KLEROS_CONNECTOR,
        sig::WINNER_MULTIPLIER,
        &[],
        ChainValue::Uint(U256::from(3000u64)),
    );
    chain.set_field(
        contracts::HAT_KLEROS_CONNECTOR,
        sig::LOSER_MULTIPLIER,
        &[],
        ChainValue::Uint(U256::from(7000u64)),
    );

    (config, chain)
}
