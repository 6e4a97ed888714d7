/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::*;
use serde::{Deserialize, Serialize};

/// Record counts per resource.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Stats {
    pub colleges: u64,
    pub departments: u64,
    pub programmes: u64,
    pub courses: u64,
    pub staff: u64,
    pub tasks: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompletionSlice {
    pub name: String,
    pub value: f64,
}

/// Shown until the first completion response arrives.
pub fn default_completion() -> Vec<CompletionSlice> {
    vec![
        CompletionSlice {
            name: "Completed".to_string(),
            value: 0.0,
        },
        CompletionSlice {
            name: "Pending".to_string(),
            value: 0.0,
        },
    ]
}

pub async fn get_stats(config: &RequestConfig) -> Result<Stats, ConnectorError> {
    let res = send(get_client(config, "dashboard/stats", RequestType::GET)).await?;
    parse_response(res).await
}

pub async fn get_completion(config: &RequestConfig) -> Result<Vec<CompletionSlice>, ConnectorError> {
    let res = send(get_client(config, "tasks/completion", RequestType::GET)).await?;
    parse_response(res).await
}

/// Both aggregate endpoints, requested concurrently. One failing does not
/// discard the other.
pub async fn get(
    config: &RequestConfig,
) -> (
    Result<Stats, ConnectorError>,
    Result<Vec<CompletionSlice>, ConnectorError>,
) {
    futures::join!(get_stats(config), get_completion(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_stats() {
        let stats: Stats = serde_json::from_str(r#"{"colleges": 2, "tasks": 9}"#).unwrap();
        assert_eq!(stats.colleges, 2);
        assert_eq!(stats.tasks, 9);
        assert_eq!(stats.staff, 0);
    }

    #[test]
    fn test_completion_integer_values() {
        let slices: Vec<CompletionSlice> =
            serde_json::from_str(r#"[{"name": "Completed", "value": 3}, {"name": "Pending", "value": 1}]"#)
                .unwrap();
        assert_eq!(slices[0].value, 3.0);
        assert_eq!(default_completion().len(), 2);
    }
}
