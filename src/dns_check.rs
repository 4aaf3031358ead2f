use crate::{
    records::RecordType,
    state::DiscoveryState,
    tracker::Tracker,
};
use std::{
    future::Future,
    time::Duration,
};
use tokio::time::MissedTickBehavior;

/// How a polling run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every record type was found and the summary was sent.
    AllFound,
    /// The shutdown future resolved first.
    Interrupted { missing: Vec<RecordType> },
    /// The optional deadline passed first.
    DeadlineExceeded { missing: Vec<RecordType> },
}

enum Stop {
    Shutdown,
    Deadline,
}

/// Polls until A, NS and MX were all found, `shutdown` resolves or `deadline` passes.
///
/// The first tick runs right away, then every `interval` measured from the start. Ticks that would have fired while a
/// previous one was still running are skipped.
pub async fn run(
    tracker: &Tracker<'_>,
    interval: Duration,
    deadline: Option<Duration>,
    shutdown: impl Future<Output = ()>,
) -> Outcome {
    let mut state = DiscoveryState::new();

    let mut timer = tokio::time::interval(interval);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let deadline = async move {
        match deadline {
            Some(deadline) => tokio::time::sleep(deadline).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(shutdown);
    tokio::pin!(deadline);

    info!(
        "Starting DNS propagation check for {}. Will check every {}.",
        tracker.domain(),
        humantime::format_duration(interval)
    );

    loop {
        let stop = tokio::select! {
            _ = &mut shutdown => Some(Stop::Shutdown),
            _ = &mut deadline => Some(Stop::Deadline),
            _ = timer.tick() => None,
        };

        let stop = match stop {
            Some(stop) => Some(stop),
            None => tokio::select! {
                _ = &mut shutdown => Some(Stop::Shutdown),
                _ = &mut deadline => Some(Stop::Deadline),
                found = tracker.tick(&mut state) => {
                    if !found.is_empty() {
                        debug!(found = %join(&found), "found new records");
                    }
                    None
                }
            },
        };

        match stop {
            Some(Stop::Shutdown) => {
                let missing = state.missing();
                warn!("Interrupted while still waiting for {}", join(&missing));
                return Outcome::Interrupted { missing };
            }
            Some(Stop::Deadline) => {
                let missing = state.missing();
                error!("Deadline passed while still waiting for {}", join(&missing));
                return Outcome::DeadlineExceeded { missing };
            }
            None => {}
        }

        if state.all_found() {
            info!("All DNS records found. Exiting.");
            tracker.send_summary().await;
            return Outcome::AllFound;
        }

        debug!(missing = %join(&state.missing()), "waiting for next check");
    }
}

/// A single pass over all record types with a fresh state. Returns the types that were not found.
pub async fn check_once(tracker: &Tracker<'_>) -> Vec<RecordType> {
    info!("Performing a single DNS check for {}...", tracker.domain());

    let mut state = DiscoveryState::new();
    let found = tracker.tick(&mut state).await;
    debug!(found = %join(&found), "single pass done");

    let missing = state.missing();
    for ty in &missing {
        info!("{ty} records not found.");
    }
    info!("DNS check complete. Exiting.");

    missing
}

fn join(types: &[RecordType]) -> String {
    types.iter().map(RecordType::as_str).collect::<Vec<_>>().join(", ")
}
