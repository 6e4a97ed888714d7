/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::*;
use anyhow::bail;
use tadmust::render;
use tadmust::views::Route;
use tadmust::views::search::SearchView;

pub async fn handle(ctx: &Context, term: String) -> anyhow::Result<()> {
    let term = term.trim();
    if term.is_empty() {
        return Ok(());
    }

    let route = Route::Search(term.to_string());
    tracing::debug!("navigating to {}", route);

    let mut view = SearchView::new(ctx.config.clone(), ctx.settings.search_endpoint);
    view.navigate(&route.path()).await;

    println!("{}", render::search(&view));

    if let Some(message) = view.results().error() {
        bail!("{}", message);
    }

    Ok(())
}
