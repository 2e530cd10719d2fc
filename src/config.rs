use alloy::primitives::{Address, U256};
use anyhow::Context;
use serde::Deserialize;
use std::fs;

use crate::contracts;
use crate::utils::address_book::AddressBook;

/// A numeric configuration value. Deployment files write these either as
/// plain integers or as (possibly hex) strings; both normalize to the same
/// decimal representation used by every numeric check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numeric(U256);

impl Numeric {
    pub fn normalized(&self) -> String {
        self.0.to_string()
    }
}

impl From<u64> for Numeric {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(value) => Ok(Numeric(U256::from(value))),
            Raw::Text(text) => parse_numeric(&text)
                .map(Numeric)
                .map_err(serde::de::Error::custom),
        }
    }
}

fn parse_numeric(text: &str) -> anyhow::Result<U256> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16),
        None => U256::from_str_radix(text, 10),
    };
    parsed.with_context(|| format!("cannot parse {:?} as a numeric value", text))
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub network: String,
    pub rpc: String,
    pub deployer: Address,
    pub governance: Option<Address>,
    #[serde(default)]
    pub executors: Vec<Address>,
    #[serde(default)]
    pub managers: Vec<Address>,
    pub timelock_delay: Numeric,
    pub hat_vaults_registry_conf: HatVaultsRegistryConf,
    pub hat_arbitrator_conf: Option<HatArbitratorConf>,
    pub hat_kleros_connector_conf: Option<HatKlerosConnectorConf>,
    pub deployed: DeployedContracts,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HatVaultsRegistryConf {
    #[serde(default)]
    pub use_kleros: bool,
    pub bounty_governance_hat: Numeric,
    pub bounty_hacker_hat_vested: Numeric,
    pub swap_token: Address,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HatArbitratorConf {
    pub expert_committee: Address,
    pub token: Address,
    pub bonds_needed_to_start_dispute: Numeric,
    pub min_bond_amount: Numeric,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HatKlerosConnectorConf {
    pub kleros_arbitrator: Address,
    pub winner_multiplier: Numeric,
    pub loser_multiplier: Numeric,
}

#[derive(Debug, Deserialize)]
pub struct DeployedContracts {
    pub hat_timelock_controller: Address,
    pub hat_timelock_controller_deploy_block: u64,
    pub hat_vaults_registry: Address,
    pub hat_vault_implementation: Address,
    pub hat_claims_manager_implementation: Address,
    pub reward_controller: Address,
    pub token_lock_factory: Address,
    pub hat_token_lock: Address,
    pub hat_governance_arbitrator: Address,
    pub hat_arbitrator: Option<Address>,
    pub hat_kleros_connector: Option<Address>,
}

impl DeployedContracts {
    pub fn address_book(&self) -> AddressBook {
        let mut book = AddressBook::default();
        book.add_address(contracts::HAT_TIMELOCK_CONTROLLER, self.hat_timelock_controller);
        book.add_deployment_block(
            contracts::HAT_TIMELOCK_CONTROLLER,
            self.hat_timelock_controller_deploy_block,
        );
        book.add_address(contracts::HAT_VAULTS_REGISTRY, self.hat_vaults_registry);
        book.add_address(
            contracts::HAT_VAULT_IMPLEMENTATION,
            self.hat_vault_implementation,
        );
        book.add_address(
            contracts::HAT_CLAIMS_MANAGER_IMPLEMENTATION,
            self.hat_claims_manager_implementation,
        );
        book.add_address(contracts::REWARD_CONTROLLER, self.reward_controller);
        book.add_address(contracts::TOKEN_LOCK_FACTORY, self.token_lock_factory);
        book.add_address(contracts::HAT_TOKEN_LOCK, self.hat_token_lock);
        book.add_address(
            contracts::HAT_GOVERNANCE_ARBITRATOR,
            self.hat_governance_arbitrator,
        );
        if let Some(address) = self.hat_arbitrator {
            book.add_address(contracts::HAT_ARBITRATOR, address);
        }
        if let Some(address) = self.hat_kleros_connector {
            book.add_address(contracts::HAT_KLEROS_CONNECTOR, address);
        }
        book
    }
}

/// Configuration after defaulting; all checks read from this, never from the
/// raw file contents.
pub struct ResolvedConfig {
    pub network: String,
    pub rpc: String,
    pub deployer: Address,
    pub governance: Address,
    pub executors: Vec<Address>,
    pub managers: Vec<Address>,
    pub timelock_delay: Numeric,
    pub registry: HatVaultsRegistryConf,
    pub arbitrator: Option<HatArbitratorConf>,
    pub kleros_connector: Option<HatKlerosConnectorConf>,
    pub deployed: DeployedContracts,
}

fn is_local_network(network: &str) -> bool {
    matches!(network, "hardhat" | "localhost")
}

/// Empty list -> `[governance]`; otherwise governance is appended if absent.
fn with_governance(mut list: Vec<Address>, governance: Address) -> Vec<Address> {
    if list.is_empty() {
        return vec![governance];
    }
    if !list.contains(&governance) {
        list.push(governance);
    }
    list
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("cannot read deployment config {}", path))?;
        toml::from_str(&contents).with_context(|| format!("cannot parse {}", path))
    }

    pub fn resolve(self) -> anyhow::Result<ResolvedConfig> {
        let governance = match self.governance {
            Some(governance) => governance,
            None if is_local_network(&self.network) => self.deployer,
            None => anyhow::bail!(
                "no governance address configured for network {}",
                self.network
            ),
        };

        if self.hat_vaults_registry_conf.use_kleros {
            anyhow::ensure!(
                self.hat_arbitrator_conf.is_some(),
                "use_kleros is set but hat_arbitrator_conf is missing"
            );
            anyhow::ensure!(
                self.hat_kleros_connector_conf.is_some(),
                "use_kleros is set but hat_kleros_connector_conf is missing"
            );
            anyhow::ensure!(
                self.deployed.hat_arbitrator.is_some()
                    && self.deployed.hat_kleros_connector.is_some(),
                "use_kleros is set but the arbitration contracts are not in the deployment record"
            );
        }

        Ok(ResolvedConfig {
            network: self.network,
            rpc: self.rpc,
            deployer: self.deployer,
            governance,
            executors: with_governance(self.executors, governance),
            managers: with_governance(self.managers, governance),
            timelock_delay: self.timelock_delay,
            registry: self.hat_vaults_registry_conf,
            arbitrator: self.hat_arbitrator_conf,
            kleros_connector: self.hat_kleros_connector_conf,
            deployed: self.deployed,
        })
    }
}
