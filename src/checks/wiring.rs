use crate::checks::sig;
use crate::config::ResolvedConfig;
use crate::contracts;
use crate::utils::network_reader::{ChainReader, ChainValue, ValueKind};
use crate::verifiers::VerificationReport;

/// Cross-contract ownership: every dependent contract answers to the
/// timelock controller, and the token-lock factory clones the deployed
/// master copy.
pub struct WiringChecks;

impl WiringChecks {
    pub async fn verify(
        _config: &ResolvedConfig,
        reader: &impl ChainReader,
        report: &mut VerificationReport,
    ) -> anyhow::Result<()> {
        report.print_info("=== ownership & wiring ===");

        let timelock = reader.deployed_address(contracts::HAT_TIMELOCK_CONTROLLER)?;

        for (label, contract) in [
            (
                "reward controller is owned by the timelock controller",
                contracts::REWARD_CONTROLLER,
            ),
            (
                "token lock factory is owned by the timelock controller",
                contracts::TOKEN_LOCK_FACTORY,
            ),
            (
                "governance arbitrator is owned by the timelock controller",
                contracts::HAT_GOVERNANCE_ARBITRATOR,
            ),
        ] {
            let owner = reader
                .read_field(contract, sig::OWNER, &[], ValueKind::Address)
                .await?;
            report.check(label, owner == ChainValue::Address(timelock));
        }

        let expected_master_copy = reader.deployed_address(contracts::HAT_TOKEN_LOCK)?;
        let master_copy = reader
            .read_field(
                contracts::TOKEN_LOCK_FACTORY,
                sig::MASTER_COPY,
                &[],
                ValueKind::Address,
            )
            .await?;
        report.check(
            "token lock factory master copy is the deployed token lock",
            master_copy.normalized() == ChainValue::Address(expected_master_copy).normalized(),
        );

        Ok(())
    }
}
