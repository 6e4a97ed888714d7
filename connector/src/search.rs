/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::resource::null_as_default;
use crate::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The backend has been seen exposing search under two different paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchEndpoint {
    /// `GET /items?search=`
    Items,
    /// `GET /search?query=`
    #[default]
    Search,
}

impl SearchEndpoint {
    fn path(self) -> &'static str {
        match self {
            SearchEndpoint::Items => "items",
            SearchEndpoint::Search => "search",
        }
    }

    fn param(self) -> &'static str {
        match self {
            SearchEndpoint::Items => "search",
            SearchEndpoint::Search => "query",
        }
    }
}

impl fmt::Display for SearchEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for SearchEndpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "items" => Ok(SearchEndpoint::Items),
            "search" => Ok(SearchEndpoint::Search),
            other => Err(format!("unknown search endpoint: {}", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

pub async fn get(
    config: &RequestConfig,
    endpoint: SearchEndpoint,
    term: &str,
) -> Result<Vec<SearchItem>, ConnectorError> {
    let res = send(
        get_client(config, endpoint.path(), RequestType::GET).query(&[(endpoint.param(), term)]),
    )
    .await?;

    parse_response(res).await
}
