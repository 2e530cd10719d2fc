use alloy::primitives::{Address, FixedBytes};

use crate::checks::sig;
use crate::config::ResolvedConfig;
use crate::contracts;
use crate::roles::{self, ExpectedTopology};
use crate::utils::network_reader::{CallArg, ChainReader, ChainValue, ValueKind};
use crate::verifiers::VerificationReport;

/// Access-control topology of the timelock controller, plus reconciliation
/// of the full `RoleGranted` history against the expected grant set.
pub struct TimelockChecks;

async fn has_role(
    reader: &impl ChainReader,
    role: FixedBytes<32>,
    account: Address,
) -> anyhow::Result<bool> {
    reader
        .read_field(
            contracts::HAT_TIMELOCK_CONTROLLER,
            sig::HAS_ROLE,
            &[CallArg::Bytes32(role), CallArg::Address(account)],
            ValueKind::Bool,
        )
        .await?
        .as_bool()
}

impl TimelockChecks {
    pub async fn verify(
        config: &ResolvedConfig,
        reader: &impl ChainReader,
        report: &mut VerificationReport,
    ) -> anyhow::Result<()> {
        report.print_info("=== HATTimelockController ===");

        let timelock = reader.deployed_address(contracts::HAT_TIMELOCK_CONTROLLER)?;
        let admin = roles::role_id(roles::TIMELOCK_ADMIN_ROLE);

        report.check(
            "deployer does not hold the timelock admin role",
            !has_role(reader, admin, config.deployer).await?,
        );
        report.check(
            "timelock controller administers itself",
            has_role(reader, admin, timelock).await?,
        );

        for role in roles::known_roles() {
            let actual = reader
                .read_field(
                    contracts::HAT_TIMELOCK_CONTROLLER,
                    sig::GET_ROLE_ADMIN,
                    &[CallArg::Bytes32(role.id)],
                    ValueKind::Bytes32,
                )
                .await?;
            report.check(
                &format!("admin of {} is TIMELOCK_ADMIN_ROLE", role.name),
                actual == ChainValue::Bytes32(role.admin_id),
            );
        }

        report.check(
            "governance holds the proposer role",
            has_role(reader, roles::role_id(roles::PROPOSER_ROLE), config.governance).await?,
        );
        report.check(
            "governance holds the canceller role",
            has_role(reader, roles::role_id(roles::CANCELLER_ROLE), config.governance).await?,
        );

        for executor in &config.executors {
            report.check(
                &format!("executor {} holds the executor role", executor),
                has_role(reader, roles::role_id(roles::EXECUTOR_ROLE), *executor).await?,
            );
        }
        for manager in &config.managers {
            report.check(
                &format!("manager {} holds the manager role", manager),
                has_role(reader, roles::role_id(roles::MANAGER_ROLE), *manager).await?,
            );
        }

        let delay = reader
            .read_field(
                contracts::HAT_TIMELOCK_CONTROLLER,
                sig::GET_MIN_DELAY,
                &[],
                ValueKind::Uint,
            )
            .await?;
        report.check(
            "timelock min delay matches the configured delay",
            delay.normalized() == config.timelock_delay.normalized(),
        );

        Self::verify_grant_history(config, reader, report, timelock).await
    }

    async fn verify_grant_history(
        config: &ResolvedConfig,
        reader: &impl ChainReader,
        report: &mut VerificationReport,
        timelock: Address,
    ) -> anyhow::Result<()> {
        let from = reader.deployment_block(contracts::HAT_TIMELOCK_CONTROLLER)?;
        let to = reader.latest_block().await?;
        let grants = reader
            .role_grants(contracts::HAT_TIMELOCK_CONTROLLER, from, to)
            .await?;

        let expected = roles::expected_grant_count(config.executors.len(), config.managers.len());
        let actual = grants.len() as u64;
        report.check(
            "number of RoleGranted events matches the deployment",
            actual == expected,
        );

        if actual > expected {
            let topology = ExpectedTopology::build(
                config.governance,
                timelock,
                &config.executors,
                &config.managers,
            );
            for grant in &grants {
                if !topology.allows(&grant.account, &grant.role) {
                    report.record_unexpected_grant(grant.account, grant.role);
                }
            }
        }
        Ok(())
    }
}
