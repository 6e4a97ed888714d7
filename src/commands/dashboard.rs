/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::*;
use std::time::Duration;
use tadmust::render;
use tadmust::views::dashboard::DashboardView;

/// Prints a snapshot on every refresh until Ctrl-C or `ticks` refreshes.
pub async fn handle(ctx: &Context, interval: Option<u64>, ticks: Option<u64>) -> anyhow::Result<()> {
    let interval = interval
        .map(Duration::from_secs)
        .unwrap_or(ctx.settings.poll_interval);

    let mut view = DashboardView::start(ctx.config.clone(), interval);

    loop {
        tokio::select! {
            snapshot = view.changed() => {
                let Some(snapshot) = snapshot else {
                    break;
                };

                println!("{}\n", render::dashboard(&snapshot));

                if ticks.is_some_and(|ticks| snapshot.ticks >= ticks) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("interrupted, stopping dashboard");
                break;
            }
        }
    }

    view.stop().await;
    Ok(())
}
