//! Distribute command - one fan-out run, or a scheduled loop.

use std::path::Path;

use tracing::warn;

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::distribute::Distributor;
use crate::core::domain::DistributionSummary;
use crate::error::Result;

/// Run a single distribution.
pub fn execute(config: Option<&Path>, json: bool) -> Result<()> {
    let ctx = Context::load(config)?;
    let store = ctx.store();
    let directory = ctx.directory();
    let distributor = Distributor::new(&store, &directory, ctx.config.distribution.clone())
        .with_policy(ctx.config.policy);

    let summary = distributor.distribute_all()?;
    print_summary(&summary, json)
}

/// Run distributions on the configured interval.
///
/// A failed run is reported and the loop carries on.
pub fn watch(config: Option<&Path>, runs: Option<usize>, json: bool) -> Result<()> {
    let ctx = Context::load(config)?;
    let store = ctx.store();
    let directory = ctx.directory();
    let distributor = Distributor::new(&store, &directory, ctx.config.distribution.clone())
        .with_policy(ctx.config.policy);

    if !json {
        output::dimmed(&format!(
            "distributing every {}s",
            ctx.config.distribution.interval_secs
        ));
    }

    distributor.watch(runs, |run, result| match result {
        Ok(summary) => {
            if let Err(e) = print_summary(summary, json) {
                warn!(run, error = %e, "failed to print run summary");
            }
        }
        Err(_) => output::error(&format!("run {} failed, see log for details", run)),
    });
    Ok(())
}

fn print_summary(summary: &DistributionSummary, json: bool) -> Result<()> {
    if json {
        output::data(&serde_json::to_string(summary)?);
        return Ok(());
    }

    output::header(&format!(
        "distribution run at {}",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output::kv("secrets:", output::count(summary.secrets));
    output::kv("pages:  ", output::count(summary.pages));
    output::kv("devices:", output::count(summary.devices_seen));
    output::kv("updated:", output::count(summary.devices_updated));

    for name in &summary.skipped_secrets {
        output::warn(&format!("secret {} skipped: not valid base64", output::name(name)));
    }
    for id in &summary.invalid_key {
        output::warn(&format!(
            "device {} skipped: invalid id or public key",
            output::name(id)
        ));
    }
    for id in &summary.conflicts {
        output::warn(&format!("device {} skipped: changed during run", output::name(id)));
    }
    for id in &summary.failed {
        output::warn(&format!("device {} skipped: update failed", output::name(id)));
    }

    if summary.is_clean() {
        output::success("all devices updated");
    }
    Ok(())
}
