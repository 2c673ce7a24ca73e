use std::sync::Arc;

use tracing::info;

use brightdata_client::ProfileRecord;
use roastline_common::{AnalysisReport, ProfileAnalysis, RoastlineError, BATCH_SIZE};

use crate::facts;
use crate::traits::{FactModel, ProfileScraper};

/// Shown when a profile has neither a headline nor about text.
const NO_HEADLINE: &str = "No headline available";

/// Max characters of about text borrowed as a headline.
const HEADLINE_FROM_ABOUT_CHARS: usize = 100;

/// Sequences the pipeline: scrape the batch once, then generate facts
/// per record in the order the records came back.
pub struct ProfileAnalyzer {
    scraper: Arc<dyn ProfileScraper>,
    model: Arc<dyn FactModel>,
}

impl ProfileAnalyzer {
    pub fn new(scraper: Arc<dyn ProfileScraper>, model: Arc<dyn FactModel>) -> Self {
        Self { scraper, model }
    }

    /// Run the full pipeline for a batch of exactly [`BATCH_SIZE`]
    /// profile URLs. The batch-size precondition is checked before any
    /// network call. A scrape failure aborts the whole batch; a
    /// generation failure never does.
    pub async fn analyze(&self, urls: &[String]) -> Result<AnalysisReport, RoastlineError> {
        if urls.len() != BATCH_SIZE {
            return Err(RoastlineError::Validation(format!(
                "expected exactly {BATCH_SIZE} profile URLs, got {}",
                urls.len()
            )));
        }

        info!(count = urls.len(), "Starting profile analysis batch");

        let records = self
            .scraper
            .scrape(urls)
            .await
            .map_err(|err| RoastlineError::Scraping(err.to_string()))?;

        let mut results = Vec::with_capacity(records.len());
        for record in &records {
            let funny_facts = facts::generate_facts(self.model.as_ref(), record).await;
            results.push(assemble_analysis(record, funny_facts));
        }

        info!(profiles_analyzed = results.len(), "Analysis batch complete");

        Ok(AnalysisReport {
            status: "success".to_string(),
            profiles_analyzed: results.len(),
            results,
        })
    }
}

fn assemble_analysis(record: &ProfileRecord, funny_facts: Vec<String>) -> ProfileAnalysis {
    ProfileAnalysis {
        profile_url: record.url.clone().unwrap_or_default(),
        name: record
            .name
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        headline: derive_headline(record),
        funny_facts,
    }
}

/// Headline fallback chain: explicit headline, else the first
/// [`HEADLINE_FROM_ABOUT_CHARS`] characters of the about text, else a
/// fixed placeholder.
fn derive_headline(record: &ProfileRecord) -> String {
    if let Some(headline) = record.headline.as_deref().filter(|h| !h.is_empty()) {
        return headline.to_string();
    }
    if let Some(about) = record.about.as_deref().filter(|a| !a.is_empty()) {
        return truncate_chars(about, HEADLINE_FROM_ABOUT_CHARS).to_string();
    }
    NO_HEADLINE.to_string()
}

/// First `max_chars` characters of `s` — characters, not bytes, so
/// multi-byte text never splits mid-codepoint.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
