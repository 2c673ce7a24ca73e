use anyhow::Result;
use async_trait::async_trait;

use ai21_client::Ai21Client;
use brightdata_client::{BrightDataClient, ProfileRecord};

// --- ProfileScraper trait ---

/// Turns a batch of profile URLs into scraped records. Implemented by
/// the Bright Data client; mocked in chain tests.
#[async_trait]
pub trait ProfileScraper: Send + Sync {
    async fn scrape(&self, urls: &[String]) -> Result<Vec<ProfileRecord>>;
}

#[async_trait]
impl ProfileScraper for BrightDataClient {
    async fn scrape(&self, urls: &[String]) -> Result<Vec<ProfileRecord>> {
        Ok(self.scrape_profiles(urls).await?)
    }
}

// --- FactModel trait ---

/// One-shot text generation seam for the fact generator.
#[async_trait]
pub trait FactModel: Send + Sync {
    async fn chat(&self, prompt: &str, temperature: f32) -> Result<String>;
}

#[async_trait]
impl FactModel for Ai21Client {
    async fn chat(&self, prompt: &str, temperature: f32) -> Result<String> {
        Ok(self.chat_completion(prompt, temperature).await?)
    }
}
