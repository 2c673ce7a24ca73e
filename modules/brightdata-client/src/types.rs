use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single URL entry in a trigger request body.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerUrl {
    pub url: String,
}

/// Response to a dataset trigger call.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerResponse {
    pub snapshot_id: Option<String>,
}

/// A single scraped LinkedIn profile from a dataset snapshot.
/// Bright Data returns far more fields than the pipeline models; the
/// remainder lands in `extra` so downstream prompts can embed the full
/// payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: Option<String>,
    pub url: Option<String>,
    pub headline: Option<String>,
    pub about: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Status envelope returned while a snapshot is not yet a record stream.
/// On `ready` the service must attach the records here; on `failed` it
/// attaches the error message.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotEnvelope {
    pub status: String,
    pub error: Option<String>,
    pub records: Option<Vec<ProfileRecord>>,
}

/// A snapshot endpoint response, decoded by shape at the boundary.
///
/// The endpoint speaks two encodings depending on job phase: a completed
/// snapshot is newline-delimited JSON (one record per line), anything
/// else is a single JSON status envelope.
#[derive(Debug, Clone)]
pub enum SnapshotResponse {
    Records(Vec<ProfileRecord>),
    Envelope(SnapshotEnvelope),
}

impl SnapshotResponse {
    /// Decode a raw snapshot body. A trimmed body that contains a newline
    /// and opens like a JSON object is the line-delimited record stream;
    /// the shape alone signals completed data, independent of any status
    /// field.
    pub fn classify(body: &str) -> Result<Self> {
        let trimmed = body.trim();
        if trimmed.contains('\n') && trimmed.starts_with("{\"") {
            let records = trimmed
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(serde_json::from_str)
                .collect::<std::result::Result<Vec<ProfileRecord>, _>>()?;
            return Ok(SnapshotResponse::Records(records));
        }
        let envelope: SnapshotEnvelope = serde_json::from_str(trimmed)?;
        Ok(SnapshotResponse::Envelope(envelope))
    }
}
