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
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Kept as the backend sends it, never parsed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub due_date: String,
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub staff_id: Option<i64>,
    #[serde(default)]
    pub programme_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

impl Resource for Task {
    const KIND: ResourceKind = ResourceKind::Task;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("title", "Title", FieldKind::Text),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
        FieldSpec::new("dueDate", "Due Date", FieldKind::Date),
        FieldSpec::new(
            "departmentId",
            "Department",
            FieldKind::ForeignKey(ResourceKind::Department),
        ),
        FieldSpec::new("staffId", "Staff", FieldKind::ForeignKey(ResourceKind::Staff)),
        FieldSpec::new("courseId", "Course", FieldKind::ForeignKey(ResourceKind::Course)),
        FieldSpec::new(
            "programmeId",
            "Programme",
            FieldKind::ForeignKey(ResourceKind::Programme),
        ),
        FieldSpec::new("completed", "Completed", FieldKind::Checkbox).optional(),
    ];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn display_name(&self) -> String {
        self.title.clone()
    }

    fn delete_prompt(&self) -> String {
        format!("Are you sure you want to delete the task: \"{}\"?", self.title)
    }
}
