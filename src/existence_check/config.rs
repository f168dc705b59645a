use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HTTPS_TIMEOUT_SEC: u64 = 3;
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/suppliers/cuit-exists";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HttpStatusCodeRange {
    pub start: u16,
    pub end: u16,
}

impl HttpStatusCodeRange {
    pub fn contains(&self, status: u16) -> bool {
        (self.start..self.end).contains(&status)
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ExistenceCheckConfigError {
    #[error("The existence check endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("Status code range {start}..{end} is empty")]
    EmptyStatusCodeRange { start: u16, end: u16 },

    #[error("At least one status code range must mark the lookup as successful")]
    NoValidStatusCode,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ExistenceCheckConfig {
    /// Backend endpoint answering whether a canonical CUIT is already registered.
    pub endpoint: String,
    /// Idle period waited before issuing a lookup. A newer check started during
    /// that period supersedes the pending one.
    pub debounce: Duration,
    pub timeout: Duration,
    pub request_headers: BTreeMap<String, String>,
    pub valid_http_status_code: Vec<HttpStatusCodeRange>,
}

impl Default for ExistenceCheckConfig {
    fn default() -> Self {
        ExistenceCheckConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            timeout: Duration::from_secs(DEFAULT_HTTPS_TIMEOUT_SEC),
            request_headers: BTreeMap::new(),
            valid_http_status_code: vec![HttpStatusCodeRange {
                start: 200,
                end: 300,
            }],
        }
    }
}

impl ExistenceCheckConfig {
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_request_headers(mut self, request_headers: BTreeMap<String, String>) -> Self {
        self.request_headers = request_headers;
        self
    }

    pub fn with_valid_http_status_code(
        mut self,
        valid_http_status_code: Vec<HttpStatusCodeRange>,
    ) -> Self {
        self.valid_http_status_code = valid_http_status_code;
        self
    }

    pub fn validate(&self) -> Result<(), ExistenceCheckConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ExistenceCheckConfigError::EmptyEndpoint);
        }
        if self.valid_http_status_code.is_empty() {
            return Err(ExistenceCheckConfigError::NoValidStatusCode);
        }
        for range in &self.valid_http_status_code {
            if range.start >= range.end {
                return Err(ExistenceCheckConfigError::EmptyStatusCodeRange {
                    start: range.start,
                    end: range.end,
                });
            }
        }
        Ok(())
    }

    pub fn is_valid_status(&self, status: u16) -> bool {
        self.valid_http_status_code
            .iter()
            .any(|range| range.contains(status))
    }
}
