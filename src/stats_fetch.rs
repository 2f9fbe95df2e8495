use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use reqwest::Url;
use serde_json::Value;

use crate::http_client::http_client;
use crate::state::{DashboardData, Filter};

pub const STATS_PATH: &str = "/api/stats";

/// Builds `{base}/api/stats?league=..&search=..`, form-encoded the way a
/// browser's `URLSearchParams` would encode it.
pub fn stats_url(base: &str, filter: &Filter) -> Result<String> {
    let raw = format!("{}{STATS_PATH}", base.trim().trim_end_matches('/'));
    let mut url = Url::parse(&raw).with_context(|| format!("invalid api base {base:?}"))?;
    url.query_pairs_mut()
        .append_pair("league", filter.league.wire_value())
        .append_pair("search", &filter.search);
    Ok(url.to_string())
}

pub fn fetch_stats(base: &str, timeout: Duration, filter: &Filter) -> Result<DashboardData> {
    let client = http_client(timeout)?;
    let url = stats_url(base, filter)?;

    let resp = client.get(&url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        let detail = server_error_message(&body).unwrap_or_else(|| truncate(&body, 120));
        return Err(anyhow!("http {}: {}", status, detail));
    }

    parse_stats_json(&body)
}

pub fn parse_stats_json(raw: &str) -> Result<DashboardData> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        bail!("empty stats response");
    }

    let root: Value = serde_json::from_str(trimmed).context("invalid stats json")?;
    if let Some(message) = root.get("error").and_then(Value::as_str) {
        bail!("server error: {message}");
    }
    if !root.is_object() {
        bail!("stats response is not a json object");
    }
    serde_json::from_value(root).context("unexpected stats payload shape")
}

fn server_error_message(body: &str) -> Option<String> {
    let root: Value = serde_json::from_str(body.trim()).ok()?;
    root.get("error")
        .and_then(Value::as_str)
        .map(|s| s.to_string())
}

fn truncate(raw: &str, max: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.chars().count() <= max {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(max).collect();
    out.push_str("...");
    out
}
