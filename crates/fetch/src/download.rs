//! Sequential batch retrieval.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::client::Archive;
use crate::error::FetchError;
use crate::request::RequestDescriptor;

/// What to do when one retrieval fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the failure and move on to the next request.
    #[default]
    Continue,
    /// Stop at the first failure.
    Abort,
}

/// One failed retrieval.
#[derive(Debug)]
pub struct DownloadFailure {
    pub experiment: String,
    pub variable: String,
    pub target: PathBuf,
    pub error: FetchError,
}

/// Outcome of [`download_all`].
#[derive(Debug, Default)]
pub struct DownloadReport {
    /// Files written, in request order.
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<DownloadFailure>,
}

impl DownloadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Retrieve every descriptor in order, creating target directories as needed.
///
/// # Errors
///
/// With [`FailurePolicy::Abort`], returns the first retrieval error. With
/// [`FailurePolicy::Continue`] this never fails; failures are in the report.
pub fn download_all(
    archive: &dyn Archive,
    dataset: &str,
    descriptors: &[RequestDescriptor],
    policy: FailurePolicy,
) -> Result<DownloadReport, FetchError> {
    let mut report = DownloadReport::default();

    for (i, d) in descriptors.iter().enumerate() {
        info!(
            item = i + 1,
            total = descriptors.len(),
            experiment = %d.experiment,
            variable = %d.variable,
            target = %d.target.display(),
            "retrieving"
        );

        match retrieve_one(archive, dataset, d) {
            Ok(()) => {
                info!(target = %d.target.display(), "saved");
                report.succeeded.push(d.target.clone());
            }
            Err(error) => {
                warn!(
                    experiment = %d.experiment,
                    variable = %d.variable,
                    error = %error,
                    "retrieval failed"
                );
                if policy == FailurePolicy::Abort {
                    return Err(error);
                }
                report.failed.push(DownloadFailure {
                    experiment: d.experiment.clone(),
                    variable: d.variable.clone(),
                    target: d.target.clone(),
                    error,
                });
            }
        }
    }

    Ok(report)
}

fn retrieve_one(
    archive: &dyn Archive,
    dataset: &str,
    d: &RequestDescriptor,
) -> Result<(), FetchError> {
    if let Some(parent) = d.target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| FetchError::io(parent, &e))?;
    }
    archive.retrieve(dataset, &d.cds_request(), &d.target)
}
