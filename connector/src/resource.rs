/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Declarative description of the six CRUD resources and the generic calls
//! shared by all of them.

use crate::*;
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    College,
    Department,
    Programme,
    Course,
    Staff,
    Task,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::College,
        ResourceKind::Department,
        ResourceKind::Programme,
        ResourceKind::Course,
        ResourceKind::Staff,
        ResourceKind::Task,
    ];

    /// Collection endpoint relative to the server URL.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::College => "colleges",
            ResourceKind::Department => "departments",
            ResourceKind::Programme => "programmes",
            ResourceKind::Course => "courses",
            ResourceKind::Staff => "staffs",
            ResourceKind::Task => "tasks",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            ResourceKind::College => "college",
            ResourceKind::Department => "department",
            ResourceKind::Programme => "programme",
            ResourceKind::Course => "course",
            ResourceKind::Staff => "staff",
            ResourceKind::Task => "task",
        }
    }

    /// Plural used in loading and empty-state messages.
    pub fn plural(self) -> &'static str {
        match self {
            ResourceKind::Staff => "staff members",
            kind => kind.path(),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ResourceKind::College => "College",
            ResourceKind::Department => "Department",
            ResourceKind::Programme => "Programme",
            ResourceKind::Course => "Course",
            ResourceKind::Staff => "Staff",
            ResourceKind::Task => "Task",
        }
    }

    pub fn list_route(self) -> String {
        format!("/{}", self.path())
    }

    pub fn create_route(self) -> String {
        format!("/create-{}", self.singular())
    }

    pub fn edit_route(self, id: i64) -> String {
        format!("/edit-{}/{}", self.singular(), id)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.singular())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_lowercase();

        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.singular() == s || kind.path() == s)
            .ok_or_else(|| format!("unknown resource: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Date,
    Checkbox,
    /// Id of a record of another resource, chosen from its full collection.
    ForeignKey(ResourceKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Attribute name on the wire.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn reference(&self) -> Option<ResourceKind> {
        match self.kind {
            FieldKind::ForeignKey(kind) => Some(kind),
            _ => None,
        }
    }
}

/// A flat record exchanged verbatim with one collection endpoint.
pub trait Resource: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static {
    const KIND: ResourceKind;
    /// Form fields, in display order.
    const FIELDS: &'static [FieldSpec];
    /// Read-only columns shown in the list after the form fields.
    const EXTRA_COLUMNS: &'static [FieldSpec] = &[];

    fn id(&self) -> Option<i64>;

    /// Name shown in select options and name lookups.
    fn display_name(&self) -> String;

    fn delete_prompt(&self) -> String {
        format!("Are you sure you want to delete {}?", self.display_name())
    }

    /// Textual value of one attribute, empty when absent.
    fn cell(&self, field: &str) -> String {
        let value = match serde_json::to_value(self) {
            Ok(value) => value,
            Err(_) => return String::new(),
        };

        match value.get(field) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Bool(true)) => "Yes".to_string(),
            Some(serde_json::Value::Bool(false)) => "No".to_string(),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    fn references() -> Vec<(&'static FieldSpec, ResourceKind)> {
        Self::FIELDS
            .iter()
            .filter_map(|field| field.reference().map(|kind| (field, kind)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: i64,
    pub label: String,
}

/// Deserializes `null` as the type's default, the backend sends nulls for
/// blank columns.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub async fn list<R: Resource>(config: &RequestConfig) -> Result<Vec<R>, ConnectorError> {
    let res = send(get_client(config, R::KIND.path(), RequestType::GET)).await?;
    parse_response(res).await
}

pub async fn get<R: Resource>(config: &RequestConfig, id: i64) -> Result<R, ConnectorError> {
    let res = send(get_client(
        config,
        &format!("{}/{}", R::KIND.path(), id),
        RequestType::GET,
    ))
    .await?;

    parse_response(res).await
}

pub async fn post<R: Resource>(config: &RequestConfig, record: &R) -> Result<(), ConnectorError> {
    let res = send(get_client(config, R::KIND.path(), RequestType::POST).json(record)).await?;
    expect_success(res).await
}

/// Replaces the whole record; there is no partial update.
pub async fn put<R: Resource>(
    config: &RequestConfig,
    id: i64,
    record: &R,
) -> Result<(), ConnectorError> {
    let res = send(
        get_client(
            config,
            &format!("{}/{}", R::KIND.path(), id),
            RequestType::PUT,
        )
        .json(record),
    )
    .await?;

    expect_success(res).await
}

pub async fn delete<R: Resource>(config: &RequestConfig, id: i64) -> Result<(), ConnectorError> {
    let res = send(get_client(
        config,
        &format!("{}/{}", R::KIND.path(), id),
        RequestType::DELETE,
    ))
    .await?;

    expect_success(res).await
}

/// Every record of a collection as `(id, display name)`, unfiltered and
/// unpaginated. Records without an id are skipped.
pub async fn options(
    config: &RequestConfig,
    kind: ResourceKind,
) -> Result<Vec<SelectOption>, ConnectorError> {
    match kind {
        ResourceKind::College => Ok(to_options(list::<College>(config).await?)),
        ResourceKind::Department => Ok(to_options(list::<Department>(config).await?)),
        ResourceKind::Programme => Ok(to_options(list::<Programme>(config).await?)),
        ResourceKind::Course => Ok(to_options(list::<Course>(config).await?)),
        ResourceKind::Staff => Ok(to_options(list::<Staff>(config).await?)),
        ResourceKind::Task => Ok(to_options(list::<Task>(config).await?)),
    }
}

fn to_options<R: Resource>(records: Vec<R>) -> Vec<SelectOption> {
    records
        .into_iter()
        .filter_map(|record| {
            record.id().map(|id| SelectOption {
                id,
                label: record.display_name(),
            })
        })
        .collect()
}
