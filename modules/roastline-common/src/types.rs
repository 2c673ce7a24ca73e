use serde::{Deserialize, Serialize};

/// Number of profile URLs in one analysis batch. The pipeline refuses
/// anything else up front; the remote service may still return a
/// different number of records, which is accepted.
pub const BATCH_SIZE: usize = 3;

/// Analysis output for one scraped profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    pub profile_url: String,
    pub name: String,
    pub headline: String,
    pub funny_facts: Vec<String>,
}

/// Aggregated result for one analyzed batch, mirroring the order the
/// records came back in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub status: String,
    pub profiles_analyzed: usize,
    pub results: Vec<ProfileAnalysis>,
}
