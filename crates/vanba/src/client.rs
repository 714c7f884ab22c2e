use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use vanba_config::ApiSettings;

use crate::error::{Result, VanbaError, CALCULATION_FAILED};
use crate::model::{AstrologyResult, BirthInput};

pub const CALCULATE_PATH: &str = "/api/calculate";

/// Remote astrology calculation.
#[async_trait]
pub trait AstrologyService: Send + Sync {
    async fn calculate(&self, input: &BirthInput) -> Result<AstrologyResult>;
}

/// `reqwest` client for `POST {base_url}/api/calculate`.
///
/// One request per call: no retry and no backoff.
#[derive(Clone, Debug)]
pub struct HttpAstrologyClient {
    endpoint: String,
    client: Client,
}

impl HttpAstrologyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: endpoint_for(base_url),
            client: Client::new(),
        }
    }

    pub fn from_settings(api: &ApiSettings) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = api.timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            endpoint: endpoint_for(&api.base_url),
            client: builder.build().unwrap_or_else(|e| {
                log::warn!("HTTP client settings rejected ({e}), using defaults without timeout");
                Client::new()
            }),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint_for(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), CALCULATE_PATH)
}

#[async_trait]
impl AstrologyService for HttpAstrologyClient {
    async fn calculate(&self, input: &BirthInput) -> Result<AstrologyResult> {
        let request = input.to_request();
        log::info!(
            "POST {} ({}-{:02}-{:02} {:02}:{:02})",
            self.endpoint,
            request.year,
            request.month,
            request.day,
            request.hour,
            request.minute
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| VanbaError::network(format!("request to {} failed: {e}", self.endpoint)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VanbaError::network(format!("failed to read response body: {e}")))?;

        interpret_response(status.as_u16(), &body)
    }
}

/// Turn a status code and raw body into a result or a user-facing error.
///
/// Non-2xx statuses, `{"success": false}` and any body carrying `error` fail
/// with the server's `error` string when one is present. Successful bodies
/// are either the `{"success": true, "data": {...}}` envelope or a bare
/// result with at least `planets` or `houses`.
pub fn interpret_response(status: u16, body: &str) -> Result<AstrologyResult> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if !(200..300).contains(&status) {
        let message = parsed
            .as_ref()
            .and_then(server_error_message)
            .unwrap_or_else(|| CALCULATION_FAILED.to_string());
        return Err(VanbaError::Server { status, message });
    }

    let value = parsed.ok_or_else(|| VanbaError::network("response body is not JSON"))?;
    let has_error = value.get("error").is_some_and(|e| !e.is_null());
    if has_error || value.get("success").and_then(Value::as_bool) == Some(false) {
        let message = server_error_message(&value).unwrap_or_else(|| CALCULATION_FAILED.to_string());
        return Err(VanbaError::Server { status, message });
    }

    let payload = match value {
        // an explicit envelope must carry its data
        Value::Object(mut map) if map.contains_key("success") => map
            .remove("data")
            .filter(|data| !data.is_null())
            .ok_or_else(|| VanbaError::network("response envelope has no data"))?,
        Value::Object(mut map) => match map.remove("data") {
            Some(data) => data,
            None => Value::Object(map),
        },
        other => other,
    };
    let Some(fields) = payload.as_object() else {
        return Err(VanbaError::network("response payload is not an object"));
    };
    if !fields.contains_key("planets") && !fields.contains_key("houses") {
        return Err(VanbaError::network("response has neither planets nor houses"));
    }

    serde_json::from_value(payload)
        .map_err(|e| VanbaError::network(format!("unexpected response shape: {e}")))
}

/// `{"error": "..."}` or `{"error": {"message": "..."}}`.
fn server_error_message(value: &Value) -> Option<String> {
    let error = value.get("error")?;
    let message = error
        .as_str()
        .or_else(|| error.get("message").and_then(Value::as_str))?
        .trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}
