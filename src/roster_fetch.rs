use anyhow::{Context, Result};
use reqwest::header::USER_AGENT;
use serde_json::Value;

use crate::http_client::http_client;

const DEFAULT_ROSTER_URL: &str =
    "https://opensheet.elk.sh/1-mf5W0gjAusry7HTZRjy-GZBjTSBY31WVyGvy_6PaB0/1";

pub fn roster_url() -> String {
    std::env::var("ROSTER_URL")
        .ok()
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ROSTER_URL.to_string())
}

/// Single GET against the sheet endpoint. Returns the decoded rows untouched;
/// normalization is the caller's concern. Any non-success status or
/// undecodable body is an error, all surfaced the same way upstream.
pub fn fetch_roster_raw() -> Result<Vec<Value>> {
    let client = http_client()?;
    let url = roster_url();

    let resp = client
        .get(url.as_str())
        .header(USER_AGENT, "Mozilla/5.0")
        .send()
        .context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }
    parse_roster_json(&body)
}

/// The sheet API serves a JSON array of row objects; anything else is
/// malformed.
pub fn parse_roster_json(raw: &str) -> Result<Vec<Value>> {
    let body: Value = serde_json::from_str(raw.trim()).context("invalid roster json")?;
    let Value::Array(rows) = body else {
        return Err(anyhow::anyhow!("roster body is not a json array"));
    };
    if rows.iter().any(|row| !row.is_object()) {
        return Err(anyhow::anyhow!("roster array contains a non-object row"));
    }
    Ok(rows)
}
