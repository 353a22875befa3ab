//! HTTP transport gateway (feature `http`).
//!
//! Posts `{ timestamp, nonce, data }` envelopes to per-operation routes and
//! verifies the echoed nonce plus a bounded response-timestamp window before
//! handing the ciphertext back to the core. App-level outcomes stay inside
//! the encrypted envelope; this layer only reports transport conditions.

use crate::error::{ClientError, ClientResult};
use crate::transport::{Gateway, GatewayError, Operation};
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum accepted skew between now and the server's response timestamp.
const MAX_RESPONSE_SKEW_SECS: i64 = 300;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct WireRequest<'a> {
    timestamp: i64,
    nonce: &'a str,
    data: &'a str,
}

#[derive(Deserialize)]
struct WireResponse {
    nonce: String,
    timestamp: i64,
    data: String,
}

/// A [`Gateway`] over plain HTTP(S).
pub struct HttpGateway {
    base_url: String,
    http: reqwest::Client,
}

impl HttpGateway {
    /// Builds a gateway for the given server endpoint.
    pub fn new(server_url: &str) -> ClientResult<Self> {
        if !server_url.starts_with("http://") && !server_url.starts_with("https://") {
            return Err(ClientError::configuration(format!(
                "server_url must be an http(s) endpoint, got {server_url:?}"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: server_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn route(op: Operation) -> &'static str {
        match op {
            Operation::Login => "/api/auth/login",
            Operation::Heartbeat => "/api/auth/heartbeat",
            Operation::GetCloudVar => "/api/cloud-var/get",
            Operation::UpdateCustomData => "/api/card/custom-data",
            Operation::GetProjectInfo => "/api/project/info",
            Operation::UnbindDevice => "/api/card/unbind",
        }
    }

    fn fresh_nonce() -> String {
        let mut bytes = [0u8; 24];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn send(&self, op: Operation, ciphertext: &str) -> Result<String, GatewayError> {
        let nonce = Self::fresh_nonce();
        let request = WireRequest {
            timestamp: Utc::now().timestamp(),
            nonce: &nonce,
            data: ciphertext,
        };

        let url = format!("{}{}", self.base_url, Self::route(op));
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.to_string()
            } else {
                body
            };
            return Err(GatewayError {
                code: i32::from(status.as_u16()),
                message,
            });
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::bad_reply(format!("unparseable response: {e}")))?;

        if wire.nonce != nonce {
            return Err(GatewayError::bad_reply("response nonce mismatch"));
        }
        let skew = (Utc::now().timestamp() - wire.timestamp).abs();
        if skew > MAX_RESPONSE_SKEW_SECS {
            return Err(GatewayError::bad_reply(format!(
                "response timestamp outside the accepted window ({skew}s)"
            )));
        }

        Ok(wire.data)
    }
}
