//! OpenFIGI mapping API request and response models.

use serde::{Deserialize, Serialize};

/// One mapping job in the request body array.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingJob<'a> {
    pub id_type: &'a str,
    pub id_value: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exch_code: Option<&'a str>,
}

/// Result of one mapping job. Exactly one of the fields is normally present.
#[derive(Debug, Deserialize)]
pub struct MappingJobResult {
    pub data: Option<Vec<FigiRecord>>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

/// Instrument record returned by the mapping API.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FigiRecord {
    pub figi: Option<String>,
    pub name: Option<String>,
    pub ticker: Option<String>,
    pub exch_code: Option<String>,
    pub security_type: Option<String>,
    pub market_sector: Option<String>,
}
