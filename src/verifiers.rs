use alloy::primitives::{Address, FixedBytes};
use colored::Colorize;
use std::fmt::Display;

use crate::roles;

/// Accumulates check outcomes for one verification run. Every check is
/// printed as it is evaluated; nothing short-circuits, so the console always
/// carries the full picture before the run fails.
#[derive(Default)]
pub struct VerificationReport {
    pub checks: u64,
    pub errors: u64,
    pub unexpected_grants: Vec<(Address, FixedBytes<32>)>,
}

impl VerificationReport {
    pub fn print_info(&self, info: &str) {
        println!("{}", info);
    }

    /// Records and prints one check outcome, returning it unchanged.
    pub fn check(&mut self, label: &str, outcome: bool) -> bool {
        self.checks += 1;
        let line = format!("{}: {}", label, outcome);
        if outcome {
            println!("{}", line.green());
        } else {
            self.errors += 1;
            println!("{}", line.red());
        }
        outcome
    }

    /// Diagnostic only: surfaces a grant absent from the expected topology
    /// without changing any check's pass/fail.
    pub fn record_unexpected_grant(&mut self, account: Address, role: FixedBytes<32>) {
        println!(
            "The account {} should not have role {}",
            account,
            roles::role_label(&role)
        );
        self.unexpected_grants.push((account, role));
    }
}

impl Display for VerificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors > 0 {
            write!(
                f,
                "{} {} of {} checks failed",
                "ERROR".red(),
                self.errors,
                self.checks
            )
        } else {
            write!(f, "{} all {} checks passed", "OK".green(), self.checks)
        }
    }
}
