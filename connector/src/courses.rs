/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::resource::null_as_default;
use crate::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Some backends name courses by title instead of name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub programme_id: Option<i64>,
}

impl Resource for Course {
    const KIND: ResourceKind = ResourceKind::Course;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Course Name", FieldKind::Text),
        FieldSpec::new("code", "Course Code", FieldKind::Text),
        FieldSpec::new(
            "programmeId",
            "Programme",
            FieldKind::ForeignKey(ResourceKind::Programme),
        ),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
    ];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn display_name(&self) -> String {
        match &self.title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => self.name.clone(),
        }
    }

    fn delete_prompt(&self) -> String {
        format!(
            "Are you sure you want to delete the course: \"{}\"?",
            self.display_name()
        )
    }
}
