use anyhow::Context;

use crate::checks::sig;
use crate::config::ResolvedConfig;
use crate::contracts;
use crate::utils::network_reader::{ChainReader, ChainValue, ValueKind};
use crate::verifiers::VerificationReport;

/// Kleros-backed arbitration subsystem. Only evaluated when `use_kleros` is
/// set; with Kleros disabled none of these checks run.
pub struct ArbitrationChecks;

impl ArbitrationChecks {
    pub async fn verify(
        config: &ResolvedConfig,
        reader: &impl ChainReader,
        report: &mut VerificationReport,
    ) -> anyhow::Result<()> {
        if !config.registry.use_kleros {
            return Ok(());
        }
        let arbitrator_conf = config
            .arbitrator
            .as_ref()
            .context("use_kleros is set but hat_arbitrator_conf is missing")?;
        let connector_conf = config
            .kleros_connector
            .as_ref()
            .context("use_kleros is set but hat_kleros_connector_conf is missing")?;

        report.print_info("=== HATArbitrator / Kleros connector ===");

        let timelock = reader.deployed_address(contracts::HAT_TIMELOCK_CONTROLLER)?;
        let connector = reader.deployed_address(contracts::HAT_KLEROS_CONNECTOR)?;

        let owner = reader
            .read_field(contracts::HAT_ARBITRATOR, sig::OWNER, &[], ValueKind::Address)
            .await?;
        report.check(
            "arbitrator is owned by the timelock controller",
            owner == ChainValue::Address(timelock),
        );

        let court = reader
            .read_field(contracts::HAT_ARBITRATOR, sig::COURT, &[], ValueKind::Address)
            .await?;
        report.check(
            "arbitrator court is the Kleros connector",
            court == ChainValue::Address(connector),
        );

        let address_fields = [
            (
                "arbitrator expert committee",
                contracts::HAT_ARBITRATOR,
                sig::EXPERT_COMMITTEE,
                arbitrator_conf.expert_committee,
            ),
            (
                "arbitrator bond token",
                contracts::HAT_ARBITRATOR,
                sig::TOKEN,
                arbitrator_conf.token,
            ),
            (
                "connector Kleros arbitrator",
                contracts::HAT_KLEROS_CONNECTOR,
                sig::KLEROS_ARBITRATOR,
                connector_conf.kleros_arbitrator,
            ),
        ];
        for (label, contract, getter, expected) in address_fields {
            let actual = reader
                .read_field(contract, getter, &[], ValueKind::Address)
                .await?;
            report.check(
                label,
                actual.normalized() == ChainValue::Address(expected).normalized(),
            );
        }

        let numeric_fields = [
            (
                "arbitrator bonds needed to start a dispute",
                contracts::HAT_ARBITRATOR,
                sig::BONDS_NEEDED_TO_START_DISPUTE,
                arbitrator_conf.bonds_needed_to_start_dispute.normalized(),
            ),
            (
                "arbitrator minimal bond amount",
                contracts::HAT_ARBITRATOR,
                sig::MIN_BOND_AMOUNT,
                arbitrator_conf.min_bond_amount.normalized(),
            ),
            (
                "connector winner multiplier",
                contracts::HAT_KLEROS_CONNECTOR,
                sig::WINNER_MULTIPLIER,
                connector_conf.winner_multiplier.normalized(),
            ),
            (
                "connector loser multiplier",
                contracts::HAT_KLEROS_CONNECTOR,
                sig::LOSER_MULTIPLIER,
                connector_conf.loser_multiplier.normalized(),
            ),
        ];
        for (label, contract, getter, expected) in numeric_fields {
            let actual = reader
                .read_field(contract, getter, &[], ValueKind::Uint)
                .await?;
            report.check(label, actual.normalized() == expected);
        }

        Ok(())
    }
}
