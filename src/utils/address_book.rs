use alloy::primitives::{map::HashMap, Address};
use anyhow::Context;

/// Deployment record: which contract lives at which address, and (where the
/// run needs it) the block the contract was deployed in.
#[derive(Default)]
pub struct AddressBook {
    name_to_address: HashMap<String, Address>,
    deployment_blocks: HashMap<String, u64>,
}

impl AddressBook {
    pub fn add_address(&mut self, name: &str, address: Address) {
        self.name_to_address.insert(name.to_string(), address);
    }

    pub fn add_deployment_block(&mut self, name: &str, block: u64) {
        self.deployment_blocks.insert(name.to_string(), block);
    }

    pub fn address(&self, name: &str) -> anyhow::Result<Address> {
        self.name_to_address
            .get(name)
            .copied()
            .with_context(|| format!("no deployment record for contract {}", name))
    }

    pub fn deployment_block(&self, name: &str) -> anyhow::Result<u64> {
        self.deployment_blocks
            .get(name)
            .copied()
            .with_context(|| format!("no deployment block recorded for contract {}", name))
    }
}
