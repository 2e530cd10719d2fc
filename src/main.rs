mod checks;
mod config;
mod contracts;
mod roles;
mod utils;
mod verifiers;

use checks::{
    arbitration::ArbitrationChecks, registry::RegistryChecks, timelock::TimelockChecks,
    wiring::WiringChecks,
};
use config::Config;
use utils::network_reader::NetworkReader;
use verifiers::VerificationReport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/deployment.toml".to_string());

    let config = Config::load(&path)?.resolve()?;
    let reader = NetworkReader::new(config.rpc.clone(), config.deployed.address_book());
    let mut report = VerificationReport::default();

    report.print_info(&format!(
        "Verifying HATS deployment on {} via {}",
        config.network, config.rpc
    ));

    // Strictly sequential: each check reads fresh state, and every check
    // runs even after earlier ones failed.
    TimelockChecks::verify(&config, &reader, &mut report).await?;
    RegistryChecks::verify(&config, &reader, &mut report).await?;
    WiringChecks::verify(&config, &reader, &mut report).await?;
    ArbitrationChecks::verify(&config, &reader, &mut report).await?;

    println!("{}", report);
    if report.errors > 0 {
        anyhow::bail!("{} checks failed", report.errors);
    }
    Ok(())
}
