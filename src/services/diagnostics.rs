use crate::{
    gate::ChannelGate,
    scraper::{self, ScraperError, USER_AGENT},
};
use chrono::{FixedOffset, Utc};
use futures::future::join_all;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

/// Asia/Dhaka has no daylight saving; a fixed UTC+06:00 offset is exact
const SERVER_TIME_OFFSET_SECS: i32 = 6 * 3600;

/// An upstream endpoint checked by the sources report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub name: String,
    pub url: String,
}

impl ProbeTarget {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Outcome of probing one target
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub name: String,
    pub latency: Option<Duration>,
    pub error: Option<String>,
}

impl ProbeReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Runtime status for the system report
#[derive(Debug, Clone)]
pub struct SystemStatus {
    /// Local server time, e.g. "09:41 PM"
    pub server_time: String,
    pub uptime: Duration,
    pub locked_channel: Option<u64>,
    /// Time to post a message to the chat platform
    pub platform_latency: Option<Duration>,
}

/// Read-only reachability and runtime checks for admins
pub struct Diagnostics {
    client: Client,
    targets: Vec<ProbeTarget>,
    started_at: Instant,
}

impl Diagnostics {
    pub fn new(targets: Vec<ProbeTarget>, timeout: Duration) -> scraper::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(ScraperError::Network)?;

        Ok(Self {
            client,
            targets,
            started_at: Instant::now(),
        })
    }

    /// Probe every target concurrently. Any HTTP response counts as reachable.
    pub async fn probe_sources(&self) -> Vec<ProbeReport> {
        join_all(self.targets.iter().map(|target| self.probe(target))).await
    }

    async fn probe(&self, target: &ProbeTarget) -> ProbeReport {
        let started = Instant::now();

        match self.client.get(&target.url).send().await {
            Ok(response) => {
                debug!("Probe {} answered {}", target.name, response.status());
                ProbeReport {
                    name: target.name.clone(),
                    latency: Some(started.elapsed()),
                    error: None,
                }
            }
            Err(e) => ProbeReport {
                name: target.name.clone(),
                latency: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// Snapshot of runtime state
    #[must_use]
    pub fn system_status(
        &self,
        gate: &ChannelGate,
        platform_latency: Option<Duration>,
    ) -> SystemStatus {
        SystemStatus {
            server_time: server_time(),
            uptime: self.started_at.elapsed(),
            locked_channel: gate.locked_channel(),
            platform_latency,
        }
    }
}

fn server_time() -> String {
    match FixedOffset::east_opt(SERVER_TIME_OFFSET_SECS) {
        Some(offset) => Utc::now()
            .with_timezone(&offset)
            .format("%I:%M %p")
            .to_string(),
        None => "Timezone Error".to_string(),
    }
}
