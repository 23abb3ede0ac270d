//! # clima-fetch
//!
//! Turn download settings into one archive request per
//! (experiment, variable) pair and retrieve them from the Copernicus Climate
//! Data Store.
//!
//! ```mermaid
//! graph LR
//!     A["DownloadSettings"] -->|"DownloadPlan::new"| B["RequestDescriptor per (experiment, variable)"]
//!     B -->|"download_all(&dyn Archive, ..)"| C["DownloadReport"]
//!     D["Credentials::load"] --> E["CdsClient: Archive"]
//!     E --> C
//! ```
//!
//! Output files land at
//! `<base>/<historico|projecao>/<experiment>_<variable>_<start>-<end>_<model>.nc`.

mod client;
mod credentials;
mod download;
mod error;
mod plan;
mod request;
mod validate;

pub use client::{Archive, CdsClient, PollSettings, finalize_payload, part_path};
pub use credentials::{Credentials, DEFAULT_CDS_URL};
pub use download::{DownloadFailure, DownloadReport, FailurePolicy, download_all};
pub use error::FetchError;
pub use plan::{DownloadPlan, DownloadSettings};
pub use request::{BoundingBox, CdsRequest, ExperimentKind, RequestDescriptor, YearRange, output_path};
