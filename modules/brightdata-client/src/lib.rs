pub mod error;
pub mod types;

pub use error::{BrightDataError, Result};
pub use types::{
    ProfileRecord, SnapshotEnvelope, SnapshotResponse, TriggerResponse, TriggerUrl,
};

use std::time::Duration;

use async_trait::async_trait;

const BASE_URL: &str = "https://api.brightdata.com/datasets/v3";

/// Fixed delay between snapshot polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Poll attempt budget. 600 polls at 1s bounds a job to ten minutes.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 600;

/// Polling parameters for [`await_snapshot`].
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Fetches one status/result response for a snapshot. The polling state
/// machine is generic over this so tests can script the endpoint.
#[async_trait]
pub trait SnapshotFetch: Send + Sync {
    async fn fetch_snapshot(&self, snapshot_id: &str) -> Result<SnapshotResponse>;
}

pub struct BrightDataClient {
    client: reqwest::Client,
    token: String,
    dataset_id: String,
    base_url: String,
}

impl BrightDataClient {
    pub fn new(token: String, dataset_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            dataset_id,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Trigger a dataset collection for a batch of profile URLs.
    /// Returns immediately with the snapshot id identifying the job.
    /// No retries at this layer: a rejected or malformed submission has
    /// no partial state worth recovering.
    pub async fn trigger_collection(&self, urls: &[String]) -> Result<String> {
        let payload: Vec<TriggerUrl> = urls
            .iter()
            .map(|url| TriggerUrl { url: url.clone() })
            .collect();

        let url = format!("{}/trigger", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .query(&[
                ("dataset_id", self.dataset_id.as_str()),
                ("include_errors", "true"),
            ])
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BrightDataError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let trigger: TriggerResponse = resp.json().await?;
        trigger.snapshot_id.ok_or_else(|| {
            BrightDataError::Submission("no snapshot_id in trigger response".to_string())
        })
    }

    /// Scrape profiles end-to-end: trigger the job, poll until the
    /// snapshot lands, return its records.
    pub async fn scrape_profiles(&self, urls: &[String]) -> Result<Vec<ProfileRecord>> {
        tracing::info!(count = urls.len(), "Triggering Bright Data collection");

        let snapshot_id = self.trigger_collection(urls).await?;
        tracing::info!(snapshot_id = %snapshot_id, "Collection triggered, polling for snapshot");

        let records = await_snapshot(self, &snapshot_id, &PollConfig::default()).await?;
        tracing::info!(count = records.len(), "Snapshot records fetched");

        Ok(records)
    }
}

#[async_trait]
impl SnapshotFetch for BrightDataClient {
    async fn fetch_snapshot(&self, snapshot_id: &str) -> Result<SnapshotResponse> {
        let url = format!("{}/snapshot/{}", self.base_url, snapshot_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(BrightDataError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        SnapshotResponse::classify(&body)
    }
}

/// Poll until a snapshot reaches a terminal state.
///
/// One fetch per attempt, sleeping `interval` between attempts and never
/// before the first. A line-delimited body is terminal success whatever
/// the job status claims. Envelope dispatch: `running`/`building` keep
/// polling; `ready` must carry records; `failed` surfaces the service
/// error; any other status is treated as terminal rather than looping
/// forever. Transport failures sleep and retry within the same attempt
/// budget.
pub async fn await_snapshot<F: SnapshotFetch + ?Sized>(
    fetcher: &F,
    snapshot_id: &str,
    config: &PollConfig,
) -> Result<Vec<ProfileRecord>> {
    for attempt in 0..config.max_attempts {
        if attempt > 0 {
            tokio::time::sleep(config.interval).await;
        }
        if attempt % 10 == 0 {
            tracing::debug!(
                snapshot_id,
                attempt = attempt + 1,
                max_attempts = config.max_attempts,
                "Polling snapshot"
            );
        }

        let response = match fetcher.fetch_snapshot(snapshot_id).await {
            Ok(response) => response,
            Err(err @ (BrightDataError::Network(_) | BrightDataError::Api { .. })) => {
                tracing::warn!(
                    snapshot_id,
                    attempt = attempt + 1,
                    error = %err,
                    "Transient polling failure, retrying"
                );
                continue;
            }
            Err(other) => return Err(other),
        };

        match response {
            SnapshotResponse::Records(records) => {
                tracing::info!(
                    snapshot_id,
                    count = records.len(),
                    attempts = attempt + 1,
                    "Snapshot ready"
                );
                return Ok(records);
            }
            SnapshotResponse::Envelope(envelope) => match envelope.status.as_str() {
                "running" | "building" => {
                    tracing::debug!(snapshot_id, status = %envelope.status, "Job still in progress");
                }
                "ready" => {
                    return envelope.records.ok_or(BrightDataError::EmptySnapshot);
                }
                "failed" => {
                    let reason = envelope
                        .error
                        .unwrap_or_else(|| "Unknown error".to_string());
                    return Err(BrightDataError::JobFailed(reason));
                }
                other => {
                    tracing::warn!(
                        snapshot_id,
                        status = %other,
                        "Unexpected snapshot status, treating as terminal"
                    );
                    return Ok(envelope.records.unwrap_or_default());
                }
            },
        }
    }

    Err(BrightDataError::PollTimeout {
        attempts: config.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use tokio::time::Instant;

    /// Scripted snapshot endpoint: pops one canned response per poll and
    /// reports a still-running envelope once the script is exhausted.
    struct ScriptedFetch {
        script: Mutex<VecDeque<Result<SnapshotResponse>>>,
        calls: AtomicU32,
    }

    impl ScriptedFetch {
        fn new(script: Vec<Result<SnapshotResponse>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SnapshotFetch for ScriptedFetch {
        async fn fetch_snapshot(&self, _snapshot_id: &str) -> Result<SnapshotResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(envelope("running")))
        }
    }

    fn envelope(status: &str) -> SnapshotResponse {
        SnapshotResponse::Envelope(SnapshotEnvelope {
            status: status.to_string(),
            error: None,
            records: None,
        })
    }

    fn record(name: &str) -> ProfileRecord {
        ProfileRecord {
            name: Some(name.to_string()),
            url: None,
            headline: None,
            about: None,
            extra: serde_json::Map::new(),
        }
    }

    fn config(max_attempts: u32) -> PollConfig {
        PollConfig {
            interval: Duration::from_secs(1),
            max_attempts,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn record_stream_on_first_attempt_returns_without_sleeping() {
        let fetch = ScriptedFetch::new(vec![Ok(SnapshotResponse::Records(vec![record("Ada")]))]);

        let started = Instant::now();
        let records = await_snapshot(&fetch, "snap_1", &config(600)).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(fetch.calls(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn ready_after_two_running_polls_sleeps_exactly_twice() {
        let fetch = ScriptedFetch::new(vec![
            Ok(envelope("running")),
            Ok(envelope("running")),
            Ok(SnapshotResponse::Envelope(SnapshotEnvelope {
                status: "ready".to_string(),
                error: None,
                records: Some(vec![record("Ada")]),
            })),
        ]);

        let started = Instant::now();
        let records = await_snapshot(&fetch, "snap_1", &config(600)).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(fetch.calls(), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn building_status_keeps_polling_like_running() {
        let fetch = ScriptedFetch::new(vec![
            Ok(envelope("building")),
            Ok(SnapshotResponse::Records(vec![record("Ada"), record("Grace")])),
        ]);

        let records = await_snapshot(&fetch, "snap_1", &config(600)).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(fetch.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_status_surfaces_the_service_error() {
        let fetch = ScriptedFetch::new(vec![Ok(SnapshotResponse::Envelope(SnapshotEnvelope {
            status: "failed".to_string(),
            error: Some("quota exceeded".to_string()),
            records: None,
        }))]);

        let err = await_snapshot(&fetch, "snap_1", &config(600)).await.unwrap_err();

        match err {
            BrightDataError::JobFailed(reason) => assert_eq!(reason, "quota exceeded"),
            other => panic!("expected JobFailed, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_attempts_time_out_after_exactly_max_attempts() {
        let fetch = ScriptedFetch::new(vec![]);

        let err = await_snapshot(&fetch, "snap_1", &config(3)).await.unwrap_err();

        assert!(matches!(err, BrightDataError::PollTimeout { attempts: 3 }));
        assert_eq!(fetch.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_blips_are_retried_within_the_budget() {
        let fetch = ScriptedFetch::new(vec![
            Err(BrightDataError::Network("connection reset".to_string())),
            Err(BrightDataError::Api {
                status: 502,
                message: "bad gateway".to_string(),
            }),
            Ok(SnapshotResponse::Records(vec![record("Ada")])),
        ]);

        let records = await_snapshot(&fetch, "snap_1", &config(600)).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(fetch.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_transport_failure_times_out() {
        let fetch = ScriptedFetch::new(vec![
            Err(BrightDataError::Network("reset".to_string())),
            Err(BrightDataError::Network("reset".to_string())),
            Err(BrightDataError::Network("reset".to_string())),
        ]);

        let err = await_snapshot(&fetch, "snap_1", &config(3)).await.unwrap_err();

        assert!(matches!(err, BrightDataError::PollTimeout { attempts: 3 }));
        assert_eq!(fetch.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn ready_without_records_is_an_error() {
        let fetch = ScriptedFetch::new(vec![Ok(envelope("ready"))]);

        let err = await_snapshot(&fetch, "snap_1", &config(600)).await.unwrap_err();

        assert!(matches!(err, BrightDataError::EmptySnapshot));
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_status_is_terminal_not_an_infinite_loop() {
        let fetch = ScriptedFetch::new(vec![Ok(envelope("stalled"))]);

        let records = await_snapshot(&fetch, "snap_1", &config(600)).await.unwrap();

        assert!(records.is_empty());
        assert_eq!(fetch.calls(), 1);
    }

    #[test]
    fn client_base_url_override_trims_trailing_slash() {
        let client = BrightDataClient::new("token".to_string(), "gd_test".to_string())
            .with_base_url("http://localhost:9999/");
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
