//! Yahoo Finance v8 chart API integration for benchmark index history.
//!
//! `GET /v8/finance/chart/{symbol}?range=max&interval=1d` returns parallel
//! arrays of epoch-second timestamps and nullable closes. The two are zipped
//! into [`RawQuote`] records here; null closes survive to normalization,
//! which drops and counts them.
//!
//! Benchmark unavailability is an explicit error. The caller decides how to
//! degrade (fund-only output with a notice); nothing here ever substitutes
//! synthetic benchmark data.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::RawQuote;
use crate::error::AppError;

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

// Yahoo rejects requests without a browser-ish user agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; navscope/0.1)";

pub struct YahooClient {
    client: Client,
}

impl YahooClient {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }

    pub fn fetch_chart(&self, symbol: &str) -> Result<Vec<RawQuote>, AppError> {
        let url = format!("{BASE_URL}/{}", urlencode(symbol));

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[("range", "max"), ("interval", "1d")])
            .send()
            .map_err(|e| AppError::data(format!("Benchmark request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::data(format!(
                "Benchmark request for '{symbol}' failed with status {}.",
                resp.status()
            )));
        }

        let body: ChartResponse = resp
            .json()
            .map_err(|e| AppError::data(format!("Failed to parse benchmark response: {e}")))?;

        let result = body
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| {
                AppError::data(format!("Benchmark response for '{symbol}' contained no series."))
            })?;

        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();

        let quotes: Vec<RawQuote> = result
            .timestamp
            .into_iter()
            .zip(closes)
            .map(|(timestamp, close)| RawQuote { timestamp, close })
            .collect();

        if quotes.is_empty() {
            return Err(AppError::data(format!(
                "Benchmark response for '{symbol}' contained no quotes."
            )));
        }

        Ok(quotes)
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Percent-encode the few characters index symbols actually use (`^`, spaces).
fn urlencode(symbol: &str) -> String {
    let mut out = String::with_capacity(symbol.len());
    for ch in symbol.chars() {
        match ch {
            '^' => out.push_str("%5E"),
            ' ' => out.push_str("%20"),
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_response_deserializes_with_null_closes() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704067200, 1704153600, 1704240000],
                    "indicators": {
                        "quote": [{"close": [21741.9, null, 21658.6]}]
                    }
                }],
                "error": null
            }
        }"#;

        let body: ChartResponse = serde_json::from_str(json).unwrap();
        let result = &body.chart.result.as_ref().unwrap()[0];
        assert_eq!(result.timestamp.len(), 3);
        assert_eq!(result.indicators.quote[0].close[1], None);
    }

    #[test]
    fn index_symbols_are_percent_encoded() {
        assert_eq!(urlencode("^NSEI"), "%5ENSEI");
        assert_eq!(urlencode("RELIANCE.NS"), "RELIANCE.NS");
    }
}
