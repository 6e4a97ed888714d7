/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use connector::{ConnectorError, RequestConfig};
use connector::dashboard::{self, CompletionSlice, Stats};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// What the dashboard shows after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: Stats,
    pub completion: Vec<CompletionSlice>,
    /// Error of the latest tick. Earlier values are kept on failure.
    pub error: Option<String>,
    /// Number of finished ticks, zero before the first response.
    pub ticks: u64,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self {
            stats: Stats::default(),
            completion: dashboard::default_completion(),
            error: None,
            ticks: 0,
        }
    }
}

impl DashboardSnapshot {
    pub fn cards(&self) -> [(&'static str, u64); 6] {
        [
            ("Colleges", self.stats.colleges),
            ("Departments", self.stats.departments),
            ("Programmes", self.stats.programmes),
            ("Courses", self.stats.courses),
            ("Staff", self.stats.staff),
            ("Tasks", self.stats.tasks),
        ]
    }

    /// Takes whichever of the two responses arrived. The error of the tick
    /// names every part that failed.
    fn apply(
        &mut self,
        stats: Result<Stats, ConnectorError>,
        completion: Result<Vec<CompletionSlice>, ConnectorError>,
    ) {
        self.ticks += 1;
        let mut errors = Vec::new();

        match stats {
            Ok(stats) => self.stats = stats,
            Err(e) => {
                tracing::error!("Error fetching dashboard stats: {}", e);
                errors.push(format!("stats: {}", e));
            }
        }

        match completion {
            Ok(completion) => self.completion = completion,
            Err(e) => {
                tracing::error!("Error fetching task completion: {}", e);
                errors.push(format!("completion: {}", e));
            }
        }

        self.error = (!errors.is_empty()).then(|| errors.join("; "));
    }

    /// Share of each completion slice in percent. All zero when there is
    /// nothing to divide.
    pub fn proportions(&self) -> Vec<(String, f64)> {
        let total: f64 = self.completion.iter().map(|slice| slice.value).sum();

        self.completion
            .iter()
            .map(|slice| {
                let percent = if total > 0.0 {
                    slice.value / total * 100.0
                } else {
                    0.0
                };
                (slice.name.clone(), percent)
            })
            .collect()
    }
}

/// Handle of the background poller. Dropping it stops polling.
pub struct DashboardView {
    snapshot: watch::Receiver<DashboardSnapshot>,
    handle: Option<JoinHandle<()>>,
}

impl DashboardView {
    /// Fetches immediately, then every `interval` until stopped.
    pub fn start(config: RequestConfig, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(DashboardSnapshot::default());
        let handle = tokio::spawn(poll(config, interval, tx));

        Self {
            snapshot: rx,
            handle: Some(handle),
        }
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Waits for the next published snapshot. Returns `None` once polling
    /// has ended.
    pub async fn changed(&mut self) -> Option<DashboardSnapshot> {
        self.snapshot.changed().await.ok()?;
        Some(self.snapshot.borrow_and_update().clone())
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Cancels the poller and waits until it is gone.
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn poll(config: RequestConfig, interval: Duration, tx: watch::Sender<DashboardSnapshot>) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let (stats, completion) = dashboard::get(&config).await;

        if tx.is_closed() {
            tracing::debug!("dashboard closed, stopping poller");
            break;
        }

        tx.send_modify(|snapshot| snapshot.apply(stats, completion));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot() {
        let snapshot = DashboardSnapshot::default();
        assert_eq!(snapshot.ticks, 0);
        assert!(snapshot.cards().iter().all(|(_, count)| *count == 0));
        assert_eq!(
            snapshot.proportions(),
            vec![("Completed".to_string(), 0.0), ("Pending".to_string(), 0.0)]
        );
    }

    #[test]
    fn test_proportions() {
        let snapshot = DashboardSnapshot {
            completion: vec![
                CompletionSlice {
                    name: "Completed".to_string(),
                    value: 3.0,
                },
                CompletionSlice {
                    name: "Pending".to_string(),
                    value: 1.0,
                },
            ],
            ..Default::default()
        };

        let proportions = snapshot.proportions();
        assert_eq!(proportions[0].1, 75.0);
        assert_eq!(proportions[1].1, 25.0);
    }

    #[test]
    fn test_apply_keeps_what_arrived() {
        let failure = || ConnectorError::Decode(serde_json::from_str::<u64>("x").unwrap_err());
        let mut snapshot = DashboardSnapshot::default();

        snapshot.apply(
            Ok(Stats {
                tasks: 4,
                ..Default::default()
            }),
            Err(failure()),
        );
        assert_eq!(snapshot.ticks, 1);
        assert_eq!(snapshot.stats.tasks, 4);
        assert!(snapshot.error.as_deref().unwrap().starts_with("completion:"));

        snapshot.apply(Err(failure()), Err(failure()));
        assert_eq!(snapshot.stats.tasks, 4);
        assert!(snapshot.error.as_deref().unwrap().starts_with("stats:"));
        assert!(snapshot.error.as_deref().unwrap().contains("; completion:"));

        snapshot.apply(Ok(Stats::default()), Ok(dashboard::default_completion()));
        assert_eq!(snapshot.ticks, 3);
        assert_eq!(snapshot.error, None);
    }

    #[test]
    fn test_cards_order() {
        let snapshot = DashboardSnapshot {
            stats: Stats {
                colleges: 1,
                departments: 2,
                programmes: 3,
                courses: 4,
                staff: 5,
                tasks: 6,
            },
            ..Default::default()
        };

        let labels: Vec<&str> = snapshot.cards().iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            vec!["Colleges", "Departments", "Programmes", "Courses", "Staff", "Tasks"]
        );
        assert_eq!(snapshot.cards()[4].1, 5);
    }
}
