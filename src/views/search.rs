/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::Fetch;
use connector::RequestConfig;
use connector::search::{self, SearchEndpoint, SearchItem};

pub const NO_RESULTS: &str = "No results found";

/// Search results driven by the `query` parameter of the current location.
pub struct SearchView {
    config: RequestConfig,
    endpoint: SearchEndpoint,
    term: String,
    results: Fetch<Vec<SearchItem>>,
}

impl SearchView {
    pub fn new(config: RequestConfig, endpoint: SearchEndpoint) -> Self {
        Self {
            config,
            endpoint,
            term: String::new(),
            results: Fetch::Loaded(Vec::new()),
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn results(&self) -> &Fetch<Vec<SearchItem>> {
        &self.results
    }

    pub fn empty_message() -> &'static str {
        NO_RESULTS
    }

    /// Follows a new location, a full URL, a path with a query string or a
    /// bare query string. Searches only when the term changed and is not
    /// blank, returning whether a request was made.
    pub async fn navigate(&mut self, location: &str) -> bool {
        let term = query_from_location(location);

        if term == self.term {
            return false;
        }
        self.term = term;

        if self.term.trim().is_empty() {
            self.results = Fetch::Loaded(Vec::new());
            return false;
        }

        self.results = Fetch::Loading;
        self.results = match search::get(&self.config, self.endpoint, &self.term).await {
            Ok(items) => Fetch::Loaded(items),
            Err(e) => {
                tracing::error!("Search error: {}", e);
                Fetch::Failed(format!("Search failed: {}", e))
            }
        };

        true
    }
}

/// Decoded value of the `query` parameter, empty when absent.
pub fn query_from_location(location: &str) -> String {
    let query = match location.split_once('?') {
        Some((_, query)) => query,
        None if location.contains('=') => location,
        None => return String::new(),
    };
    let query = query.split('#').next().unwrap_or_default();

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "query")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}
