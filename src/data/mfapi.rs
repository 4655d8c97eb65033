//! mfapi.in integration for mutual fund NAV history.
//!
//! `GET https://api.mfapi.in/mf/{scheme_code}` returns scheme metadata plus
//! the full NAV history, newest first, with dates as `DD-MM-YYYY` strings and
//! NAVs as decimal strings. Records are kept raw here; parsing and ordering
//! happen in [`crate::analysis::normalize_fund`].

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{FundMeta, RawFundRecord};
use crate::error::AppError;

const BASE_URL: &str = "https://api.mfapi.in/mf";

/// Raw fund fetch: scheme metadata plus unnormalized NAV records.
#[derive(Debug, Clone)]
pub struct FundFetch {
    pub meta: FundMeta,
    pub records: Vec<RawFundRecord>,
}

pub struct MfApiClient {
    client: Client,
}

impl MfApiClient {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }

    pub fn fetch_scheme(&self, scheme_code: u32) -> Result<FundFetch, AppError> {
        let url = format!("{BASE_URL}/{scheme_code}");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::data(format!("Fund API request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::data(format!(
                "Fund API request for scheme {scheme_code} failed with status {}.",
                resp.status()
            )));
        }

        let body: SchemeResponse = resp
            .json()
            .map_err(|e| AppError::data(format!("Failed to parse fund API response: {e}")))?;

        if body.data.is_empty() {
            return Err(AppError::data(format!(
                "Fund API returned no NAV history for scheme {scheme_code}."
            )));
        }

        Ok(FundFetch {
            meta: FundMeta {
                scheme_code: body.meta.scheme_code,
                scheme_name: body.meta.scheme_name,
                fund_house: body.meta.fund_house,
                scheme_category: body.meta.scheme_category,
            },
            records: body.data,
        })
    }
}

impl Default for MfApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct SchemeResponse {
    meta: SchemeMeta,
    data: Vec<RawFundRecord>,
}

#[derive(Debug, Deserialize)]
struct SchemeMeta {
    scheme_code: u32,
    scheme_name: String,
    fund_house: String,
    scheme_category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_response_deserializes() {
        let json = r#"{
            "meta": {
                "fund_house": "Example Mutual Fund",
                "scheme_type": "Open Ended Schemes",
                "scheme_category": "Equity Scheme - Large Cap Fund",
                "scheme_code": 125497,
                "scheme_name": "Example Large Cap Fund - Direct - Growth"
            },
            "data": [
                {"date": "27-08-2026", "nav": "104.39610"},
                {"date": "26-08-2026", "nav": "104.10020"}
            ],
            "status": "SUCCESS"
        }"#;

        let body: SchemeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.meta.scheme_code, 125497);
        assert_eq!(body.data.len(), 2);
        assert_eq!(body.data[0].date, "27-08-2026");
        assert_eq!(body.data[0].nav, "104.39610");
    }
}
