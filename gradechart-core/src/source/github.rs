//! GitHub contents API source.
//!
//! `GET /repos/{owner}/{repo}/contents/{path}` answers with a JSON envelope
//! whose `content` field holds the file base64-encoded, wrapped at 60
//! columns. We decode that back to the gradebook JSON text.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, error};
use serde::Deserialize;

use super::{parse_document, GradebookSource, SourceError};
use crate::config::SourceConfig;
use crate::record::RawRecord;

#[derive(Debug, Deserialize)]
struct ContentsEnvelope {
    content: Option<String>,
    encoding: Option<String>,
}

pub struct GithubContentsSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl GithubContentsSource {
    pub fn new(url: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| SourceError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self, SourceError> {
        Self::new(
            config.url.clone(),
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn fetch_body(&self) -> Result<String, SourceError> {
        let resp = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            error!("GET {} returned {status}", self.url);
            return Err(SourceError::Http {
                url: self.url.clone(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown status").to_string(),
            });
        }

        let body = resp.text().map_err(|e| SourceError::Network(e.to_string()))?;
        debug!("GET {} -> {} bytes", self.url, body.len());
        Ok(body)
    }
}

/// Extract the file text from a contents API response body.
pub fn decode_envelope(body: &str) -> Result<String, SourceError> {
    let envelope: ContentsEnvelope = serde_json::from_str(body)
        .map_err(|e| SourceError::Envelope(format!("not a contents API response: {e}")))?;

    match envelope.encoding.as_deref() {
        Some("base64") | None => {}
        Some(other) => {
            return Err(SourceError::Envelope(format!(
                "unsupported content encoding '{other}'"
            )))
        }
    }

    let content = envelope
        .content
        .ok_or_else(|| SourceError::Envelope("missing 'content' field".into()))?;

    // GitHub wraps the payload with newlines.
    let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

impl GradebookSource for GithubContentsSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        let body = self.fetch_body()?;
        let text = decode_envelope(&body)?;
        parse_document(&text)
    }
}
