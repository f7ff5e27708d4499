use reqwest::header::HeaderMap;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::{FetchError, Result};

use super::decode::{kind_of, number_field, string_field, text_field};
use super::request::build_headers;
use super::FetchResult;

/// Normalized quote of a single real-estate fund. Every field is always
/// present; values the upstream omitted or mistyped are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundRow {
    pub stock: String,
    pub name: Option<String>,
    pub sector: Option<String>,
    #[serde(rename = "type")]
    pub fund_type: Option<String>,
    pub close: Option<f64>,
    pub change: Option<f64>,
    pub volume: Option<f64>,
    pub market_cap: Option<f64>,
    pub logo: Option<String>,
}

impl FundRow {
    fn from_entry(entry: &Value) -> Option<Self> {
        let stock = string_field(entry, "stock")?;
        Some(Self {
            stock,
            name: text_field(entry, "name"),
            sector: text_field(entry, "sector"),
            fund_type: text_field(entry, "type"),
            close: number_field(entry, "close"),
            change: number_field(entry, "change"),
            volume: number_field(entry, "volume"),
            market_cap: number_field(entry, "market_cap"),
            logo: text_field(entry, "logo"),
        })
    }
}

/// Issues the single GET against the fund list endpoint.
#[derive(Clone)]
pub struct FundFetcher {
    client: Client,
    endpoint: String,
    headers: HeaderMap,
}

impl FundFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        Self::from_builder(Client::builder(), config)
    }

    /// Finish `builder` with the configured timeout and headers.
    pub fn from_builder(builder: ClientBuilder, config: &Config) -> Result<Self> {
        let headers = build_headers(&config.headers)?;
        let client = builder.timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config.endpoint.clone(), headers))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            headers,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch and normalize the fund list, preserving upstream order.
    pub async fn fetch_funds(&self) -> FetchResult<Vec<FundRow>> {
        log::info!("Requesting fund list from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|err| transport_error("request failed", &err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|err| transport_error("failed to read response body", &err))?;

        let rows = parse_funds_payload(&body)?;
        log::info!("Received {} funds", rows.len());
        Ok(rows)
    }
}

fn transport_error(context: &str, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::unexpected(format!("{context}: timed out: {err}"))
    } else {
        FetchError::unexpected(format!("{context}: {err}"))
    }
}

/// Decode a `{ "stocks": [...] }` payload into fund rows.
pub fn parse_funds_payload(body: &str) -> FetchResult<Vec<FundRow>> {
    let json: Value = serde_json::from_str(body)
        .map_err(|err| FetchError::unexpected(format!("malformed JSON payload: {err}")))?;

    let object = json.as_object().ok_or_else(|| {
        FetchError::unexpected(format!(
            "expected a JSON object, got {}",
            kind_of(&json)
        ))
    })?;

    let entries: &[Value] = match object.get("stocks") {
        Some(Value::Array(entries)) => entries.as_slice(),
        Some(other) => {
            log::warn!("`stocks` is a {}, treating as empty", kind_of(other));
            &[]
        }
        None => &[],
    };

    let mut rows = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        match FundRow::from_entry(entry) {
            Some(row) => rows.push(row),
            None => log::warn!("Skipping fund entry {idx} without a string `stock` field"),
        }
    }
    Ok(rows)
}
