use crate::checks::sig;
use crate::config::ResolvedConfig;
use crate::contracts;
use crate::utils::network_reader::{ChainReader, ChainValue, ValueKind};
use crate::verifiers::VerificationReport;

/// Wiring of the vaults registry: ownership, arbitrator pointer,
/// implementation pointers and default bounty parameters.
pub struct RegistryChecks;

impl RegistryChecks {
    pub async fn verify(
        config: &ResolvedConfig,
        reader: &impl ChainReader,
        report: &mut VerificationReport,
    ) -> anyhow::Result<()> {
        report.print_info("=== HATVaultsRegistry ===");

        let timelock = reader.deployed_address(contracts::HAT_TIMELOCK_CONTROLLER)?;

        let owner = reader
            .read_field(
                contracts::HAT_VAULTS_REGISTRY,
                sig::OWNER,
                &[],
                ValueKind::Address,
            )
            .await?;
        report.check(
            "registry is owned by the timelock controller",
            owner == ChainValue::Address(timelock),
        );

        // With Kleros enabled disputes go through the HAT arbitrator;
        // otherwise governance arbitrates directly.
        let expected_arbitrator = if config.registry.use_kleros {
            reader.deployed_address(contracts::HAT_ARBITRATOR)?
        } else {
            reader.deployed_address(contracts::HAT_GOVERNANCE_ARBITRATOR)?
        };
        let arbitrator = reader
            .read_field(
                contracts::HAT_VAULTS_REGISTRY,
                sig::DEFAULT_ARBITRATOR,
                &[],
                ValueKind::Address,
            )
            .await?;
        report.check(
            "registry default arbitrator matches the configuration",
            arbitrator.normalized() == ChainValue::Address(expected_arbitrator).normalized(),
        );

        for (label, getter, contract) in [
            (
                "registry vault implementation pointer",
                sig::HAT_VAULT_IMPLEMENTATION,
                contracts::HAT_VAULT_IMPLEMENTATION,
            ),
            (
                "registry claims manager implementation pointer",
                sig::HAT_CLAIMS_MANAGER_IMPLEMENTATION,
                contracts::HAT_CLAIMS_MANAGER_IMPLEMENTATION,
            ),
        ] {
            let expected = reader.deployed_address(contract)?;
            let actual = reader
                .read_field(
                    contracts::HAT_VAULTS_REGISTRY,
                    getter,
                    &[],
                    ValueKind::Address,
                )
                .await?;
            report.check(label, actual == ChainValue::Address(expected));
        }

        let bounty_governance = reader
            .read_field(
                contracts::HAT_VAULTS_REGISTRY,
                sig::DEFAULT_BOUNTY_GOVERNANCE_HAT,
                &[],
                ValueKind::Uint,
            )
            .await?;
        report.check(
            "registry default bounty governance HAT",
            bounty_governance.normalized() == config.registry.bounty_governance_hat.normalized(),
        );

        let bounty_vested = reader
            .read_field(
                contracts::HAT_VAULTS_REGISTRY,
                sig::DEFAULT_BOUNTY_HACKER_HAT_VESTED,
                &[],
                ValueKind::Uint,
            )
            .await?;
        report.check(
            "registry default bounty hacker HAT vested",
            bounty_vested.normalized() == config.registry.bounty_hacker_hat_vested.normalized(),
        );

        let swap_token = reader
            .read_field(
                contracts::HAT_VAULTS_REGISTRY,
                sig::SWAP_TOKEN,
                &[],
                ValueKind::Address,
            )
            .await?;
        report.check(
            "registry swap token",
            swap_token == ChainValue::Address(config.registry.swap_token),
        );

        Ok(())
    }
}
