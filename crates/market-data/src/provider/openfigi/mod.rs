//! OpenFIGI identifier-mapping provider.
//!
//! Maps CUSIPs to instrument records through the public v3 mapping endpoint.
//! The first record's `name` is used as the issuer name after suffix cleanup
//! (`N/B`, `CORP`, `INC`, `CO`, `LTD`, `MTN`, `SR`).
//!
//! Without an API key OpenFIGI allows 25 mapping requests per minute; with a
//! key the limit is 250.

mod models;


use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use reqwest::{Client, StatusCode};

use crate::errors::MarketDataError;
use crate::models::{Cusip, IdentifierMapping};
use crate::provider::{IdentifierProvider, RateLimit, RateLimiter};

use models::{FigiRecord, MappingJob, MappingJobResult};

/// Provider ID constant
const PROVIDER_ID: &str = "OPENFIGI";

const DEFAULT_BASE_URL: &str = "https://api.openfigi.com/v3/mapping";

/// Environment variable holding the optional API key.
pub const API_KEY_ENV: &str = "OPENFIGI_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

lazy_static! {
    /// Ordered suffix cleanups applied to provider issuer names.
    static ref NAME_CLEANUPS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)\s+N/B\s*$").expect("Invalid regex pattern"), ""),
        (Regex::new(r"(?i)\s+MTN\s*$").expect("Invalid regex pattern"), ""),
        (Regex::new(r"(?i)\s+SR\s*$").expect("Invalid regex pattern"), ""),
        (Regex::new(r"(?i)\s+CORP\s*$").expect("Invalid regex pattern"), " Corporation"),
        (Regex::new(r"(?i)\s+INC\s*$").expect("Invalid regex pattern"), " Inc"),
        (Regex::new(r"(?i)\s+CO\s*$").expect("Invalid regex pattern"), " Company"),
        (Regex::new(r"(?i)\s+LLC\s*$").expect("Invalid regex pattern"), " LLC"),
        (Regex::new(r"(?i)\s+LP\s*$").expect("Invalid regex pattern"), " LP"),
        (Regex::new(r"(?i)\s+LTD\s*$").expect("Invalid regex pattern"), " Limited"),
    ];
}

/// Connection settings for the OpenFIGI provider.
#[derive(Clone, Debug)]
pub struct OpenFigiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Exchange code filter sent with every job; `None` searches all venues.
    pub exch_code: Option<String>,
    pub timeout: Duration,
}

impl Default for OpenFigiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            exch_code: Some("US".to_string()),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl OpenFigiConfig {
    /// Default configuration with the API key taken from `OPENFIGI_API_KEY`.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Self {
            api_key,
            ..Self::default()
        }
    }
}

/// OpenFIGI mapping provider.
///
/// # Example
///
/// ```ignore
/// use aurum_market_data::provider::openfigi::{OpenFigiConfig, OpenFigiProvider};
///
/// let provider = OpenFigiProvider::new(OpenFigiConfig::from_env());
/// let mapping = provider.lookup_cusip(&Cusip::parse("037833AK6")?).await?;
/// ```
pub struct OpenFigiProvider {
    client: Client,
    config: OpenFigiConfig,
    limiter: RateLimiter,
}

impl OpenFigiProvider {
    pub fn new(config: OpenFigiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        let limiter = RateLimiter::new(PROVIDER_ID, &Self::limit_for(&config));

        Self {
            client,
            config,
            limiter,
        }
    }

    fn limit_for(config: &OpenFigiConfig) -> RateLimit {
        let requests_per_minute = if config.api_key.is_some() { 250 } else { 25 };
        RateLimit {
            requests_per_minute,
            burst_capacity: 5,
            request_timeout: config.timeout,
        }
    }

    /// Pick the issuer name out of a mapping response for one job.
    fn select_record(
        cusip: &Cusip,
        results: Vec<MappingJobResult>,
    ) -> Result<FigiRecord, MarketDataError> {
        let first = results
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::IdentifierNotFound(cusip.to_string()))?;

        if let Some(error) = first.error {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: error,
            });
        }

        if let Some(warning) = &first.warning {
            debug!("OpenFIGI warning for {}: {}", cusip, warning);
        }

        first
            .data
            .unwrap_or_default()
            .into_iter()
            .find(|record| {
                record
                    .name
                    .as_deref()
                    .map(|name| !name.trim().is_empty())
                    .unwrap_or(false)
            })
            .ok_or_else(|| MarketDataError::IdentifierNotFound(cusip.to_string()))
    }

    fn request_error(error: reqwest::Error) -> MarketDataError {
        if error.is_timeout() {
            MarketDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else {
            MarketDataError::Network(error)
        }
    }

    fn into_mapping(record: FigiRecord) -> IdentifierMapping {
        let raw_name = record.name.unwrap_or_default();
        IdentifierMapping {
            figi: record.figi,
            name: clean_issuer_name(&raw_name),
            ticker: record.ticker,
            security_type: record.security_type,
            market_sector: record.market_sector,
            exch_code: record.exch_code,
        }
    }
}

/// Normalize suffixes on an issuer name returned by OpenFIGI.
pub fn clean_issuer_name(raw_name: &str) -> String {
    let mut cleaned = raw_name.trim().to_string();
    for (pattern, replacement) in NAME_CLEANUPS.iter() {
        cleaned = pattern.replace(&cleaned, *replacement).into_owned();
    }
    cleaned.trim().to_string()
}

#[async_trait]
impl IdentifierProvider for OpenFigiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn rate_limit(&self) -> RateLimit {
        Self::limit_for(&self.config)
    }

    async fn lookup_cusip(&self, cusip: &Cusip) -> Result<IdentifierMapping, MarketDataError> {
        self.limiter.acquire().await;

        let jobs = [MappingJob {
            id_type: "ID_CUSIP",
            id_value: cusip.as_str(),
            exch_code: self.config.exch_code.as_deref(),
        }];

        let mut request = self.client.post(&self.config.base_url).json(&jobs);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("X-OPENFIGI-APIKEY", api_key);
        }

        let response = request.send().await.map_err(Self::request_error)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("OpenFIGI rate limited lookup for {}", cusip);
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let results: Vec<MappingJobResult> = response.json().await.map_err(|e| {
            if e.is_decode() {
                MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                }
            } else {
                Self::request_error(e)
            }
        })?;

        let record = Self::select_record(cusip, results)?;
        let mapping = Self::into_mapping(record);
        debug!("OpenFIGI mapped {} to '{}'", cusip, mapping.name);
        Ok(mapping)
    }
}
