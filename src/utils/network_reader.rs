use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, FixedBytes, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{Filter, TransactionRequest};
use anyhow::Context;

use crate::roles::RoleGrant;
use crate::utils::{address_book::AddressBook, selector};

const ROLE_GRANTED_EVENT: &str = "RoleGranted(bytes32,address,address)";

/// A value read back from the chain, tagged with how it was decoded.
/// Comparisons between config values and chain values always go through
/// `normalized()` so that `600`, `"600"` and a 32-byte big-endian word all
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainValue {
    Address(Address),
    Uint(U256),
    Bool(bool),
    Bytes32(FixedBytes<32>),
}

impl ChainValue {
    pub fn normalized(&self) -> String {
        match self {
            ChainValue::Address(address) => {
                format!("{:x}", address)
            }
            ChainValue::Uint(value) => value.to_string(),
            ChainValue::Bool(value) => value.to_string(),
            ChainValue::Bytes32(value) => format!("{:x}", value),
        }
    }

    pub fn as_bool(&self) -> anyhow::Result<bool> {
        match self {
            ChainValue::Bool(value) => Ok(*value),
            other => anyhow::bail!("expected a boolean chain value, got {:?}", other),
        }
    }
}

/// How to decode the single return word of a getter call.
#[derive(Debug, Clone, Copy)]
pub enum ValueKind {
    Address,
    Uint,
    Bool,
    Bytes32,
}

/// A static call argument. Every getter this verifier touches takes
/// word-sized arguments only, so encoding is one 32-byte word per argument.
#[derive(Debug, Clone, Copy)]
pub enum CallArg {
    Address(Address),
    Bytes32(FixedBytes<32>),
}

impl CallArg {
    pub fn as_word(&self) -> FixedBytes<32> {
        match self {
            CallArg::Address(address) => address.into_word(),
            CallArg::Bytes32(word) => *word,
        }
    }
}

/// Read-only view of the deployed system. Every method is side-effect free
/// and idempotent at a fixed block height. Any failure here is an
/// environment error: it aborts the whole run rather than turning into a
/// false check outcome.
pub trait ChainReader {
    fn deployed_address(&self, contract: &str) -> anyhow::Result<Address>;

    fn deployment_block(&self, contract: &str) -> anyhow::Result<u64>;

    async fn latest_block(&self) -> anyhow::Result<u64>;

    async fn read_field(
        &self,
        contract: &str,
        method_sig: &str,
        args: &[CallArg],
        kind: ValueKind,
    ) -> anyhow::Result<ChainValue>;

    async fn role_grants(
        &self,
        contract: &str,
        from_block: u64,
        to_block: u64,
    ) -> anyhow::Result<Vec<RoleGrant>>;
}

/// Chain reader backed by a JSON-RPC node over HTTP.
pub struct NetworkReader {
    rpc: String,
    book: AddressBook,
}

impl NetworkReader {
    pub fn new(rpc: String, book: AddressBook) -> Self {
        Self { rpc, book }
    }

    fn parse_rpc_url<T: std::str::FromStr>(&self) -> anyhow::Result<T>
    where
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.rpc
            .parse()
            .with_context(|| format!("invalid rpc url {}", self.rpc))
    }
}

fn decode_return_word(data: &[u8], kind: ValueKind) -> anyhow::Result<ChainValue> {
    let word: [u8; 32] = data
        .get(0..32)
        .context("call returned less than one word of data")?
        .try_into()
        .expect("slice of length 32");

    Ok(match kind {
        ValueKind::Address => ChainValue::Address(Address::from_slice(&word[12..])),
        ValueKind::Uint => ChainValue::Uint(U256::from_be_bytes(word)),
        ValueKind::Bool => ChainValue::Bool(word[31] != 0),
        ValueKind::Bytes32 => ChainValue::Bytes32(FixedBytes::from(word)),
    })
}

impl ChainReader for NetworkReader {
    fn deployed_address(&self, contract: &str) -> anyhow::Result<Address> {
        self.book.address(contract)
    }

    fn deployment_block(&self, contract: &str) -> anyhow::Result<u64> {
        self.book.deployment_block(contract)
    }

    async fn latest_block(&self) -> anyhow::Result<u64> {
        let provider = ProviderBuilder::new().on_http(self.parse_rpc_url()?);
        provider
            .get_block_number()
            .await
            .context("failed to fetch the latest block number")
    }

    async fn read_field(
        &self,
        contract: &str,
        method_sig: &str,
        args: &[CallArg],
        kind: ValueKind,
    ) -> anyhow::Result<ChainValue> {
        let address = self.deployed_address(contract)?;
        let provider = ProviderBuilder::new().on_http(self.parse_rpc_url()?);

        let mut input = selector(method_sig).to_vec();
        for arg in args {
            input.extend_from_slice(arg.as_word().as_slice());
        }

        let tx = TransactionRequest::default()
            .with_to(address)
            .with_input(Bytes::from(input));

        let output = provider
            .call(&tx)
            .await
            .with_context(|| format!("eth_call {} on {} failed", method_sig, contract))?;

        decode_return_word(&output, kind)
            .with_context(|| format!("cannot decode return of {} on {}", method_sig, contract))
    }

    async fn role_grants(
        &self,
        contract: &str,
        from_block: u64,
        to_block: u64,
    ) -> anyhow::Result<Vec<RoleGrant>> {
        let address = self.deployed_address(contract)?;
        let provider = ProviderBuilder::new().on_http(self.parse_rpc_url()?);

        let filter = Filter::new()
            .address(address)
            .event(ROLE_GRANTED_EVENT)
            .from_block(from_block)
            .to_block(to_block);

        let logs = provider
            .get_logs(&filter)
            .await
            .with_context(|| format!("eth_getLogs for RoleGranted on {} failed", contract))?;

        let mut grants = Vec::with_capacity(logs.len());
        for log in logs {
            let topics = log.inner.data.topics();
            let role = *topics
                .get(1)
                .context("RoleGranted log missing the role topic")?;
            let account = Address::from_word(
                *topics
                    .get(2)
                    .context("RoleGranted log missing the account topic")?,
            );
            grants.push(RoleGrant {
                role,
                account,
                block: log.block_number.unwrap_or_default(),
            });
        }
        Ok(grants)
    }
}
