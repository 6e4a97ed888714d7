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
pub struct Programme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub department_id: Option<i64>,
}

impl Resource for Programme {
    const KIND: ResourceKind = ResourceKind::Programme;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Programme Name", FieldKind::Text),
        FieldSpec::new("code", "Programme Code", FieldKind::Text),
        FieldSpec::new(
            "departmentId",
            "Department",
            FieldKind::ForeignKey(ResourceKind::Department),
        ),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
    ];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}
