//! LanguageTool HTTP client.

use std::time::Instant;

use tracing::{debug, warn};

use crate::config::LanguageToolConfig;
use crate::error::{EngineError, EngineResult};
use crate::wire::{CheckResponse, LanguageInfo};

/// Client for one LanguageTool server and one language.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct LanguageToolClient {
    config: LanguageToolConfig,
    http: reqwest::Client,
}

impl LanguageToolClient {
    /// Creates a client. No request is made until the first call.
    pub fn new(config: LanguageToolConfig) -> EngineResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "base_url cannot be empty".to_string(),
            });
        }
        if config.language.trim().is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "language cannot be empty".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("rsproof/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| EngineError::InvalidConfig {
                message: e.to_string(),
            })?;

        Ok(Self { config, http })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &LanguageToolConfig {
        &self.config
    }

    /// Checks `text` in the configured language.
    pub async fn check(&self, text: &str) -> EngineResult<CheckResponse> {
        let start = Instant::now();
        let response = self
            .http
            .post(self.config.endpoint("v2/check"))
            .form(&[("text", text), ("language", self.config.language.as_str())])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = Self::ensure_success(response).await?;
        let body: CheckResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.timeout_error()
            } else {
                EngineError::InvalidResponse {
                    message: e.to_string(),
                }
            }
        })?;

        debug!(
            matches = body.matches.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "engine check completed"
        );
        Ok(body)
    }

    /// Lists the languages the server supports.
    pub async fn languages(&self) -> EngineResult<Vec<LanguageInfo>> {
        let response = self
            .http
            .get(self.config.endpoint("v2/languages"))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = Self::ensure_success(response).await?;
        response
            .json()
            .await
            .map_err(|e| EngineError::InvalidResponse {
                message: e.to_string(),
            })
    }

    /// Succeeds when the server is up and supports the configured language.
    pub async fn health(&self) -> EngineResult<()> {
        let languages = self.languages().await?;
        let wanted = self.config.language.as_str();

        if languages
            .iter()
            .any(|l| l.long_code.eq_ignore_ascii_case(wanted) || l.code.eq_ignore_ascii_case(wanted))
        {
            Ok(())
        } else {
            Err(EngineError::InvalidConfig {
                message: format!("language '{wanted}' is not supported by the engine"),
            })
        }
    }

    async fn ensure_success(response: reqwest::Response) -> EngineResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "failed to read engine error body");
                format!("<unreadable body: {e}>")
            }
        };
        let status = status.as_u16();

        if is_text_rejection(status) {
            warn!(status, "engine rejected the submitted text");
            Err(EngineError::Rejected { status, body })
        } else {
            warn!(status, "engine rejected request");
            Err(EngineError::HttpStatus { status, body })
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> EngineError {
        if e.is_timeout() {
            self.timeout_error()
        } else {
            EngineError::Connection {
                message: e.to_string(),
            }
        }
    }

    fn timeout_error(&self) -> EngineError {
        EngineError::Timeout {
            timeout_ms: self.config.timeout.as_millis() as u64,
        }
    }
}

/// Statuses LanguageTool uses when the text itself cannot be checked.
fn is_text_rejection(status: u16) -> bool {
    matches!(status, 413 | 414 | 422)
}
