//! CDS API credentials.

use std::fs;
use std::path::PathBuf;

use crate::error::FetchError;

/// Endpoint used when no URL is configured.
pub const DEFAULT_CDS_URL: &str = "https://cds.climate.copernicus.eu/api";

/// API endpoint and personal access token.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub url: String,
    pub key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Load from the process environment, falling back to the rc file.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingCredentials`] if no key is found.
    pub fn load() -> Result<Self, FetchError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve credentials using `env` for variable lookup.
    ///
    /// 1. `CDSAPI_KEY` (and optional `CDSAPI_URL`)
    /// 2. the file named by `CDSAPI_RC`, else `$HOME/.cdsapirc`
    pub fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Result<Self, FetchError> {
        let env_url = env("CDSAPI_URL").filter(|s| !s.trim().is_empty());
        if let Some(key) = env("CDSAPI_KEY").filter(|s| !s.trim().is_empty()) {
            return Ok(Self {
                url: env_url.unwrap_or_else(|| DEFAULT_CDS_URL.to_string()),
                key: key.trim().to_string(),
            });
        }

        let rc_path = env("CDSAPI_RC")
            .map(PathBuf::from)
            .or_else(|| env("HOME").map(|h| PathBuf::from(h).join(".cdsapirc")))
            .ok_or_else(|| FetchError::MissingCredentials {
                reason: "CDSAPI_KEY unset and no home directory for .cdsapirc".to_string(),
            })?;

        let text = fs::read_to_string(&rc_path).map_err(|e| FetchError::MissingCredentials {
            reason: format!("CDSAPI_KEY unset and cannot read {}: {e}", rc_path.display()),
        })?;
        let (rc_url, rc_key) = parse_rc(&text);
        let key = rc_key.ok_or_else(|| FetchError::MissingCredentials {
            reason: format!("no 'key:' line in {}", rc_path.display()),
        })?;

        Ok(Self {
            url: env_url
                .or(rc_url)
                .unwrap_or_else(|| DEFAULT_CDS_URL.to_string()),
            key,
        })
    }
}

/// `url:` and `key:` values from a `.cdsapirc` body.
fn parse_rc(text: &str) -> (Option<String>, Option<String>) {
    let mut url = None;
    let mut key = None;
    for line in text.lines() {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match name.trim() {
            "url" => url = Some(value.to_string()),
            "key" => key = Some(value.to_string()),
            _ => {}
        }
    }
    (url, key)
}
