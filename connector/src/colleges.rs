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
pub struct College {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Resource for College {
    const KIND: ResourceKind = ResourceKind::College;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Full Name", FieldKind::Text),
        FieldSpec::new("description", "Description", FieldKind::TextArea),
    ];
    const EXTRA_COLUMNS: &'static [FieldSpec] = &[
        FieldSpec::new("createdAt", "Created At", FieldKind::Text).optional(),
        FieldSpec::new("updatedAt", "Updated At", FieldKind::Text).optional(),
    ];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}
