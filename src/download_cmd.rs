//! Download command: one archive retrieval per (experiment, variable).

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use clima_fetch::{CdsClient, Credentials, DownloadPlan, DownloadReport, download_all};

use crate::cli::DownloadArgs;
use crate::config::ClimaConfig;
use crate::convert;

/// Run the acquisition pipeline.
pub fn run(args: DownloadArgs, config: &ClimaConfig) -> Result<()> {
    let _cmd = info_span!("download").entered();

    // 1. Credentials first, so a missing key fails before any planning
    let credentials = Credentials::load().context("failed to load CDS credentials")?;

    // 2. Plan
    let settings = convert::build_download_settings(&config.download, &args)?;
    let poll = convert::build_poll_settings(&config.download)?;
    let policy = convert::failure_policy(args.fail_fast || config.download.fail_fast);
    let plan = DownloadPlan::new(&settings).context("invalid download settings")?;
    info!(
        dataset = plan.dataset(),
        model = %settings.model,
        area = %settings.area,
        n_requests = plan.descriptors().len(),
        ?policy,
        "download plan ready"
    );

    // 3. Retrieve
    let client = CdsClient::new(credentials, poll).context("failed to build CDS client")?;
    let report = download_all(&client, plan.dataset(), plan.descriptors(), policy)
        .context("download aborted")?;

    check_report(&report)
}

/// Log the outcome; any failed item makes the command fail.
fn check_report(report: &DownloadReport) -> Result<()> {
    let total = report.succeeded.len() + report.failed.len();
    for f in &report.failed {
        warn!(
            experiment = %f.experiment,
            variable = %f.variable,
            target = %f.target.display(),
            error = %f.error,
            "not downloaded"
        );
    }
    if !report.is_complete() {
        let items: Vec<String> = report
            .failed
            .iter()
            .map(|f| format!("{}/{}", f.experiment, f.variable))
            .collect();
        bail!(
            "{} of {total} downloads failed: {}",
            report.failed.len(),
            items.join(", ")
        );
    }
    info!(n_files = total, "all downloads complete");
    Ok(())
}
