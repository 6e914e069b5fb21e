//! Catalog service HTTP client.
//!
//! Blocking reqwest client over the two endpoints the service exposes:
//! the list of terms with data, and class search by term + department.

use std::time::Duration;

use serde::Deserialize;

use gradcheck_core::Term;

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::offering::RawClass;

/// Catalog API client (blocking).
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TermsResponse {
    data: TermsData,
}

#[derive(Deserialize)]
struct TermsData {
    rosters: Vec<TermRecord>,
}

#[derive(Deserialize)]
struct TermRecord {
    slug: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    status: String,
    #[serde(default)]
    data: Option<SearchData>,
}

#[derive(Deserialize)]
struct SearchData {
    classes: Vec<RawClass>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        config.validate()?;

        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("gradcheck/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// All terms the service has data for, in the order the service lists
    /// them.
    pub fn terms(&self) -> Result<Vec<Term>, CatalogError> {
        let url = format!("{}/config/rosters.json", self.base_url);
        tracing::debug!(%url, "fetching term list");

        let response: TermsResponse = self.get_json(&url)?;

        response
            .data
            .rosters
            .iter()
            .map(|record| {
                Term::parse(&record.slug)
                    .map_err(|_| CatalogError::Malformed(format!("bad term slug '{}'", record.slug)))
            })
            .collect()
    }

    /// Class records for one (term, department) pair. `None` means the
    /// service status indicated the department had no offerings that term.
    pub fn search(&self, term: Term, dept: &str) -> Result<Option<Vec<RawClass>>, CatalogError> {
        let url = format!(
            "{}/search/classes.json?roster={term}&subject={dept}",
            self.base_url
        );
        tracing::debug!(%url, "searching classes");

        let response: SearchResponse = self.get_json(&url)?;

        if response.status != "success" {
            return Ok(None);
        }

        let data = response
            .data
            .ok_or_else(|| CatalogError::Malformed("success response without data".into()))?;

        Ok(Some(data.classes))
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(CatalogError::Network(format!("HTTP {status}: {body}")));
        }

        serde_json::from_str(&body).map_err(|e| CatalogError::Malformed(e.to_string()))
    }
}
