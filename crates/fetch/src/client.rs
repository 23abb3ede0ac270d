//! Remote archive access.
//!
//! [`Archive`] is the seam between the download driver and the network.
//! [`CdsClient`] implements it over the CDS retrieve API: submit a job, poll
//! until it finishes, then stream the result asset to disk.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::credentials::Credentials;
use crate::error::FetchError;
use crate::request::CdsRequest;

/// Something that can retrieve one request into a local file.
pub trait Archive {
    /// Retrieve `request` from `dataset` and leave the result at `target`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on any transport, job, or file failure.
    fn retrieve(&self, dataset: &str, request: &CdsRequest, target: &Path) -> Result<(), FetchError>;
}

/// Job polling cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollSettings {
    /// First wait between status checks.
    pub interval: Duration,
    /// Upper bound the wait grows to.
    pub max_interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_interval: Duration::from_secs(60),
        }
    }
}

impl PollSettings {
    /// Wait after `current`: 1.5x, capped at `max_interval`.
    pub fn next(&self, current: Duration) -> Duration {
        current.mul_f64(1.5).min(self.max_interval)
    }
}

#[derive(Debug, Deserialize)]
struct JobStatus {
    #[serde(rename = "jobID")]
    job_id: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct JobResults {
    asset: Asset,
}

#[derive(Debug, Deserialize)]
struct Asset {
    value: AssetValue,
}

#[derive(Debug, Deserialize)]
struct AssetValue {
    href: String,
}

#[derive(Debug, serde::Serialize)]
struct Execute<'a> {
    inputs: &'a CdsRequest,
}

/// Deadline for one JSON call to the API (submit, status, results lookup).
pub const API_TIMEOUT: Duration = Duration::from_secs(60);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the CDS retrieve API.
///
/// Only the JSON calls carry a total deadline. The asset transfer can run for
/// as long as the server keeps sending.
pub struct CdsClient {
    http: reqwest::blocking::Client,
    credentials: Credentials,
    poll: PollSettings,
    api_timeout: Duration,
}

impl CdsClient {
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the HTTP client cannot be built.
    pub fn new(credentials: Credentials, poll: PollSettings) -> Result<Self, FetchError> {
        let http = http_builder().build()?;
        Ok(Self {
            http,
            credentials,
            poll,
            api_timeout: API_TIMEOUT,
        })
    }

    fn api(&self, request: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        request
            .header("PRIVATE-TOKEN", &self.credentials.key)
            .timeout(self.api_timeout)
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/retrieve/v1/{path}",
            self.credentials.url.trim_end_matches('/')
        )
    }

    fn submit(&self, dataset: &str, request: &CdsRequest) -> Result<JobStatus, FetchError> {
        let url = self.endpoint(&format!("processes/{dataset}/execution"));
        let job = self
            .api(self.http.post(url))
            .json(&Execute { inputs: request })
            .send()?
            .error_for_status()?
            .json::<JobStatus>()?;
        Ok(job)
    }

    fn status(&self, job_id: &str) -> Result<JobStatus, FetchError> {
        let url = self.endpoint(&format!("jobs/{job_id}"));
        Ok(self
            .api(self.http.get(url))
            .send()?
            .error_for_status()?
            .json::<JobStatus>()?)
    }

    /// Poll until the job succeeds; any terminal non-success is an error.
    fn wait(&self, mut job: JobStatus) -> Result<String, FetchError> {
        let mut delay = self.poll.interval;
        loop {
            match job.status.as_str() {
                "successful" => return Ok(job.job_id),
                "accepted" | "running" => {
                    debug!(job = %job.job_id, status = %job.status, ?delay, "waiting for job");
                    thread::sleep(delay);
                    delay = self.poll.next(delay);
                    job = self.status(&job.job_id)?;
                }
                other => {
                    return Err(FetchError::Job {
                        id: job.job_id.clone(),
                        reason: format!("status '{other}'"),
                    });
                }
            }
        }
    }

    fn download(&self, job_id: &str, part: &Path) -> Result<(), FetchError> {
        let url = self.endpoint(&format!("jobs/{job_id}/results"));
        let results = self
            .api(self.http.get(url))
            .send()?
            .error_for_status()?
            .json::<JobResults>()?;

        let mut response = self
            .http
            .get(&results.asset.value.href)
            .send()?
            .error_for_status()?;
        let mut file = fs::File::create(part).map_err(|e| FetchError::io(part, &e))?;
        let bytes = response.copy_to(&mut file)?;
        debug!(job = job_id, bytes, "downloaded result");
        Ok(())
    }
}

impl Archive for CdsClient {
    fn retrieve(&self, dataset: &str, request: &CdsRequest, target: &Path) -> Result<(), FetchError> {
        let job = self.submit(dataset, request)?;
        info!(job = %job.job_id, dataset, "submitted request");
        let job_id = self.wait(job)?;

        let part = part_path(target);
        let outcome = self
            .download(&job_id, &part)
            .and_then(|()| finalize_payload(&part, target));
        if outcome.is_err() {
            let _ = fs::remove_file(&part);
        }
        outcome
    }
}

// The blocking client defaults to a 30 s total deadline; drop it so the
// asset body is bounded only by the connect timeout.
fn http_builder() -> reqwest::blocking::ClientBuilder {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("clima/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(None)
}

/// `<target>.part`
pub fn part_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

const ZIP_MAGIC: [u8; 4] = *b"PK\x03\x04";

/// Move a finished download into place.
///
/// A zip payload has its first `.nc` member written to `target`; anything
/// else is renamed to `target`. `part` is gone afterwards on success.
///
/// # Errors
///
/// Returns [`FetchError::Archive`] for an unreadable zip or one without a
/// `.nc` member, and [`FetchError::Io`] for file failures.
pub fn finalize_payload(part: &Path, target: &Path) -> Result<(), FetchError> {
    let mut magic = [0u8; 4];
    let is_zip = {
        let mut f = fs::File::open(part).map_err(|e| FetchError::io(part, &e))?;
        f.read_exact(&mut magic).is_ok() && magic == ZIP_MAGIC
    };

    if !is_zip {
        fs::rename(part, target).map_err(|e| FetchError::io(target, &e))?;
        return Ok(());
    }

    let archive_error = |e: &dyn std::fmt::Display| FetchError::Archive {
        path: part.to_path_buf(),
        reason: e.to_string(),
    };
    let reader = fs::File::open(part).map_err(|e| FetchError::io(part, &e))?;
    let mut archive = zip::ZipArchive::new(reader).map_err(|e| archive_error(&e))?;
    let mut member = None;
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|e| archive_error(&e))?;
        if !entry.is_dir() && entry.name().ends_with(".nc") {
            member = Some(i);
            break;
        }
    }
    let index = member.ok_or_else(|| archive_error(&"no .nc member in payload"))?;

    let mut entry = archive.by_index(index).map_err(|e| archive_error(&e))?;
    debug!(member = entry.name(), target = %target.display(), "unpacking payload");
    let mut out = fs::File::create(target).map_err(|e| FetchError::io(target, &e))?;
    io::copy(&mut entry, &mut out).map_err(|e| FetchError::io(target, &e))?;
    drop(entry);

    fs::remove_file(part).map_err(|e| FetchError::io(part, &e))?;
    Ok(())
}
