pub mod arbitration;
pub mod registry;
pub mod timelock;
pub mod wiring;

#[cfg(test)]
pub(crate) mod testing;

/// Getter signatures shared between the checks and the test fixtures.
pub(crate) mod sig {
    pub const HAS_ROLE: &str = "hasRole(bytes32,address)";
    pub const GET_ROLE_ADMIN: &str = "getRoleAdmin(bytes32)";
    pub const GET_MIN_DELAY: &str = "getMinDelay()";
    pub const OWNER: &str = "owner()";
    pub const DEFAULT_ARBITRATOR: &str = "defaultArbitrator()";
    pub const HAT_VAULT_IMPLEMENTATION: &str = "hatVaultImplementation()";
    pub const HAT_CLAIMS_MANAGER_IMPLEMENTATION: &str = "hatClaimsManagerImplementation()";
    pub const DEFAULT_BOUNTY_GOVERNANCE_HAT: &str = "defaultBountyGovernanceHAT()";
    pub const DEFAULT_BOUNTY_HACKER_HAT_VESTED: &str = "defaultBountyHackerHATVested()";
    pub const SWAP_TOKEN: &str = "swapToken()";
    pub const MASTER_COPY: &str = "masterCopy()";
    pub const COURT: &str = "court()";
    pub const EXPERT_COMMITTEE: &str = "expertCommittee()";
    pub const TOKEN: &str = "token()";
    pub const BONDS_NEEDED_TO_START_DISPUTE: &str = "bondsNeededToStartDispute()";
    pub const MIN_BOND_AMOUNT: &str = "minBondAmount()";
    pub const KLEROS_ARBITRATOR: &str = "klerosArbitrator()";
    pub const WINNER_MULTIPLIER: &str = "winnerMultiplier()";
    pub const LOSER_MULTIPLIER: &str = "loserMultiplier()";
}
