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
pub struct Department {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub college_id: Option<i64>,
}

impl Resource for Department {
    const KIND: ResourceKind = ResourceKind::Department;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Department Name", FieldKind::Text),
        FieldSpec::new("collegeId", "College", FieldKind::ForeignKey(ResourceKind::College)),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
    ];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}
