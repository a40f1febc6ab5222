//! Trust command.
//!
//! Runs the trust walk over the configured store and shows the outcome.
//! Needs no passphrase: only public keys are involved.

use std::path::Path;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::primitives::OpenPgp;
use crate::core::trust::TrustGraph;
use crate::error::Result;

/// Show admitted and rejected keys.
pub fn execute(config: &Path, json: bool) -> Result<()> {
    let config = Config::load(config)?;
    let report = TrustGraph::from_config(&OpenPgp, &config)?
        .resolve(&OpenPgp)
        .report();

    if json {
        output::data(&serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::section("Trusted");
    if report.admitted.is_empty() {
        output::dimmed("no trusted keys");
    }
    for entry in &report.admitted {
        output::kv(&entry.name, &entry.fingerprint);
        if entry.path.len() > 1 {
            output::list_item(&entry.path.join(" -> "));
        }
    }

    if !report.rejected.is_empty() {
        output::section("Rejected");
        for entry in &report.rejected {
            output::kv(&entry.name, &entry.reason);
        }
    }

    Ok(())
}
