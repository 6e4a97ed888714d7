/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::{Fetch, Notice, Route};
use connector::resource;
use connector::{FieldSpec, RequestConfig, Resource, ResourceKind};
use std::collections::HashMap;

pub const UNRESOLVED: &str = "N/A";

/// One table row. Rows are numbered by position, not by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a, R> {
    pub number: usize,
    pub record: &'a R,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No row with that id is on screen.
    NotListed,
    Cancelled,
    Deleted,
    Failed,
}

/// Table of every record of one resource.
pub struct ListView<R: Resource> {
    config: RequestConfig,
    state: Fetch<Vec<R>>,
    names: HashMap<ResourceKind, HashMap<i64, String>>,
    notice: Option<Notice>,
}

impl<R: Resource> ListView<R> {
    pub fn new(config: RequestConfig) -> Self {
        Self {
            config,
            state: Fetch::Loading,
            names: HashMap::new(),
            notice: None,
        }
    }

    pub fn state(&self) -> &Fetch<Vec<R>> {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn columns() -> impl Iterator<Item = &'static FieldSpec> {
        R::FIELDS.iter().chain(R::EXTRA_COLUMNS.iter())
    }

    pub fn loading_message() -> String {
        format!("Loading {}...", R::KIND.plural())
    }

    pub fn empty_message() -> String {
        format!("No {} found.", R::KIND.plural())
    }

    pub fn create_route() -> Route {
        Route::Create(R::KIND)
    }

    pub fn edit_route(id: i64) -> Route {
        Route::Edit(R::KIND, id)
    }

    /// Fetches the collection, and the referenced collections so foreign
    /// keys can be shown by name.
    pub async fn load(&mut self) {
        self.state = Fetch::Loading;

        let references: Vec<ResourceKind> = R::references().into_iter().map(|(_, k)| k).collect();
        let lookups = futures::future::join_all(
            references
                .iter()
                .map(|kind| resource::options(&self.config, *kind)),
        );

        let (records, lookups) = futures::join!(resource::list::<R>(&self.config), lookups);

        for (kind, options) in references.into_iter().zip(lookups) {
            match options {
                Ok(options) => {
                    self.names.insert(
                        kind,
                        options.into_iter().map(|o| (o.id, o.label)).collect(),
                    );
                }
                Err(e) => {
                    tracing::error!("Error fetching {}: {}", kind.plural(), e);
                    self.names.remove(&kind);
                }
            }
        }

        self.state = match records {
            Ok(records) => Fetch::Loaded(records),
            Err(e) => {
                tracing::error!("Error fetching {}: {}", R::KIND.plural(), e);
                Fetch::Failed(format!("Failed to load {}: {}", R::KIND.plural(), e))
            }
        };
    }

    pub fn rows(&self) -> Vec<Row<'_, R>> {
        let records = match &self.state {
            Fetch::Loaded(records) => records,
            _ => return Vec::new(),
        };

        records
            .iter()
            .enumerate()
            .map(|(index, record)| Row {
                number: index + 1,
                record,
                cells: Self::columns().map(|field| self.cell(record, field)).collect(),
            })
            .collect()
    }

    fn cell(&self, record: &R, field: &FieldSpec) -> String {
        let value = record.cell(field.name);

        match field.reference() {
            Some(kind) => value
                .parse::<i64>()
                .ok()
                .and_then(|id| self.names.get(&kind)?.get(&id).cloned())
                .unwrap_or_else(|| UNRESOLVED.to_string()),
            None => value,
        }
    }

    pub fn find(&self, id: i64) -> Option<&R> {
        self.state
            .value()?
            .iter()
            .find(|record| record.id() == Some(id))
    }

    /// Asks `confirm` with the record's name, deletes it and reloads the
    /// table. A failed delete leaves the table as it was.
    pub async fn delete(&mut self, id: i64, confirm: impl FnOnce(&str) -> bool) -> DeleteOutcome {
        let prompt = match self.find(id) {
            Some(record) => record.delete_prompt(),
            None => {
                self.notice = Some(Notice::error(format!(
                    "No {} with id {} in the list.",
                    R::KIND.singular(),
                    id
                )));
                return DeleteOutcome::NotListed;
            }
        };

        if !confirm(&prompt) {
            return DeleteOutcome::Cancelled;
        }

        match resource::delete::<R>(&self.config, id).await {
            Ok(()) => {
                self.notice = Some(Notice::success(format!(
                    "{} deleted successfully",
                    deleted_label(R::KIND)
                )));
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                tracing::error!("Error deleting {}: {}", R::KIND.singular(), e);
                self.notice = Some(Notice::error(format!(
                    "Failed to delete {}: {}",
                    R::KIND.singular(),
                    e
                )));
                DeleteOutcome::Failed
            }
        }
    }
}

fn deleted_label(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Staff => "Staff member",
        kind => kind.title(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connector::{College, Task};

    #[test]
    fn test_messages() {
        assert_eq!(ListView::<College>::loading_message(), "Loading colleges...");
        assert_eq!(ListView::<connector::Staff>::empty_message(), "No staff members found.");
        assert_eq!(ListView::<Task>::edit_route(3).path(), "/edit-task/3");
    }

    #[test]
    fn test_columns_include_extra() {
        let names: Vec<&str> = ListView::<College>::columns().map(|c| c.name).collect();
        assert_eq!(names, vec!["name", "description", "createdAt", "updatedAt"]);
    }

    #[test]
    fn test_unloaded_view_has_no_rows() {
        let view = ListView::<College>::new(RequestConfig::default());
        assert!(view.state().is_loading());
        assert!(view.rows().is_empty());
        assert!(view.find(1).is_none());
    }

    #[test]
    fn test_unresolved_reference() {
        let mut view = ListView::<Task>::new(RequestConfig::default());
        view.names.insert(
            ResourceKind::Staff,
            HashMap::from([(9, "Neema Mushi".to_string())]),
        );
        view.state = Fetch::Loaded(vec![Task {
            id: Some(1),
            title: "Moderate exam".to_string(),
            staff_id: Some(9),
            course_id: Some(4),
            ..Default::default()
        }]);

        let rows = view.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number, 1);

        let staff_column = ListView::<Task>::columns()
            .position(|c| c.name == "staffId")
            .unwrap();
        let course_column = ListView::<Task>::columns()
            .position(|c| c.name == "courseId")
            .unwrap();
        assert_eq!(rows[0].cells[staff_column], "Neema Mushi");
        assert_eq!(rows[0].cells[course_column], UNRESOLVED);
    }
}
