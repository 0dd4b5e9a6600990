// src/generate.rs
// =============================================================================
// One regeneration cycle, and the loop that repeats it.
//
// A cycle is:
//   1. fetch the contributors file (the only await point)
//   2. pull out the `contributors` list
//   3. pick up to MAX_CONTRIBUTORS of them at random
//   4. wrap them in the payload the page renderer consumes
//
// Any failure aborts the cycle. In watch mode the previous payload stays
// current until a later cycle succeeds.
// =============================================================================

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use rand::Rng;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tokio::time::{self, MissedTickBehavior};

use crate::config::ContentSource;
use crate::contributors::{extract_contributors, ContributorRecord};
use crate::errors::GenerationError;
use crate::github::fetch_json_file;
use crate::sampler;

/// How many contributors the page shows
pub const MAX_CONTRIBUTORS: usize = 30;

/// Seconds between regeneration cycles (30 minutes)
pub const REVALIDATE_SECS: u64 = 60 * 30;

/// Data handed to the page renderer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProps {
    pub random_contributors: Vec<ContributorRecord>,
}

/// Result of one cycle: the props plus when to regenerate
#[derive(Debug, Clone, Serialize)]
pub struct Generation {
    pub props: PageProps,
    pub revalidate: u64,
}

// Runs a full cycle against the remote API
#[tracing::instrument(skip_all, fields(count = count))]
pub async fn run_cycle<R: Rng + ?Sized>(
    client: &Client,
    source: &ContentSource,
    count: usize,
    revalidate: u64,
    rng: &mut R,
) -> Result<Generation, GenerationError> {
    let file = fetch_json_file(client, source).await?;
    generate_from_file(file, count, revalidate, rng)
}

// The synchronous half of a cycle: extract and sample an already decoded file
pub fn generate_from_file<R: Rng + ?Sized>(
    file: Value,
    count: usize,
    revalidate: u64,
    rng: &mut R,
) -> Result<Generation, GenerationError> {
    let contributors = extract_contributors(file)?;
    let random_contributors = sampler::sample(&contributors, count, rng)?;

    tracing::info!(
        available = contributors.len(),
        picked = random_contributors.len(),
        "sampled contributors"
    );

    Ok(Generation {
        props: PageProps { random_contributors },
        revalidate,
    })
}

// What the watch loop knows between cycles
#[derive(Debug, Default)]
struct WatchState {
    /// Last good payload; stays current while later cycles fail
    current: Option<Generation>,
    /// Failures since the last successful cycle
    consecutive_failures: usize,
}

impl WatchState {
    fn succeeded(&mut self, generation: Generation) {
        self.consecutive_failures = 0;
        self.current = Some(generation);
    }

    fn failed(&mut self, error: &GenerationError) {
        self.consecutive_failures += 1;
        tracing::warn!(
            error = %error,
            consecutive_failures = self.consecutive_failures,
            serving_stale = self.current.is_some(),
            "regeneration failed"
        );
    }
}

// Regenerates every `interval` until `shutdown` resolves
//
// `interval` is only the local cadence; every payload still advertises
// REVALIDATE_SECS to the hosting framework.
//
// The first cycle runs immediately. Each successful cycle is passed to
// `emit`; failed cycles are logged and skipped. Shutdown also interrupts
// a cycle that is still waiting on the network. Returns the last good
// payload, if any cycle ever succeeded.
pub async fn watch<R, F, S>(
    client: &Client,
    source: &ContentSource,
    count: usize,
    interval: Duration,
    rng: &mut R,
    mut emit: F,
    shutdown: S,
) -> Result<Option<Generation>>
where
    R: Rng + ?Sized,
    F: FnMut(&Generation) -> Result<()>,
    S: Future<Output = ()>,
{
    let mut ticker = time::interval(interval.max(Duration::from_millis(1)));
    // A slow cycle shouldn't cause a burst of catch-up cycles
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::pin!(shutdown);

    let mut state = WatchState::default();

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("shutting down");
                break;
            }
            _ = ticker.tick() => {
                let outcome = tokio::select! {
                    _ = &mut shutdown => {
                        tracing::info!("shutting down, abandoning cycle in flight");
                        break;
                    }
                    outcome = run_cycle(client, source, count, REVALIDATE_SECS, rng) => outcome,
                };

                match outcome {
                    Ok(generation) => {
                        emit(&generation)?;
                        state.succeeded(generation);
                    }
                    Err(e) => state.failed(&e),
                }
            }
        }
    }

    Ok(state.current)
}
