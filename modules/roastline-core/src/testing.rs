// Test mocks for the analysis pipeline.
//
// Two mocks matching the two trait boundaries:
// - MockScraper (ProfileScraper) — canned record list, counts calls
// - MockModel (FactModel) — canned reply text or scripted failure
//
// Plus helpers for constructing ProfileRecord fixtures.

use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;

use brightdata_client::ProfileRecord;

use crate::traits::{FactModel, ProfileScraper};

// ---------------------------------------------------------------------------
// MockScraper
// ---------------------------------------------------------------------------

/// Canned-records scraper. Counts calls so tests can assert the
/// validation gate fires before any scrape happens.
pub struct MockScraper {
    records: Option<Vec<ProfileRecord>>,
    calls: AtomicU32,
}

impl MockScraper {
    pub fn returning(records: Vec<ProfileRecord>) -> Self {
        Self {
            records: Some(records),
            calls: AtomicU32::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            records: None,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileScraper for MockScraper {
    async fn scrape(&self, _urls: &[String]) -> Result<Vec<ProfileRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.records {
            Some(records) => Ok(records.clone()),
            None => bail!("MockScraper: scripted scrape failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// MockModel
// ---------------------------------------------------------------------------

/// Fixed-reply model. `failing()` always errors, for fallback-path tests.
pub struct MockModel {
    reply: Option<String>,
}

impl MockModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl FactModel for MockModel {
    async fn chat(&self, _prompt: &str, _temperature: f32) -> Result<String> {
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => bail!("MockModel: scripted generation failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn profile(name: &str, url: &str) -> ProfileRecord {
    ProfileRecord {
        name: Some(name.to_string()),
        url: Some(url.to_string()),
        headline: Some(format!("{name}'s headline")),
        about: None,
        extra: serde_json::Map::new(),
    }
}

pub fn bare_profile(name: &str) -> ProfileRecord {
    ProfileRecord {
        name: Some(name.to_string()),
        url: None,
        headline: None,
        about: None,
        extra: serde_json::Map::new(),
    }
}
