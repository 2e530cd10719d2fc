use alloy::primitives::keccak256;

pub mod address_book;
pub mod network_reader;

/// First four bytes of the keccak hash of a solidity method signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}
