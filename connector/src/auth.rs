/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::resource::null_as_default;
use crate::*;
use serde::{Deserialize, Serialize};

/// The authenticated user as the backend describes it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ if !self.username.is_empty() => &self.username,
            _ => "User",
        }
    }

    /// Whether the record names an actual account. Acknowledgement bodies
    /// such as `{"message": "..."}` decode into a user without one.
    pub fn is_identified(&self) -> bool {
        self.id.is_some() || !self.username.trim().is_empty()
    }

    /// Server-relative path of the profile image, if one was uploaded.
    pub fn image_path(&self) -> Option<&str> {
        self.profile_image
            .as_deref()
            .or(self.avatar.as_deref())
            .filter(|path| !path.is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

async fn parse_user(res: reqwest::Response) -> Result<Option<User>, ConnectorError> {
    let user: Option<User> = parse_optional(res).await?;
    Ok(user.filter(User::is_identified))
}

/// Returns the user from the response body when the backend sends one.
pub async fn post_login(
    config: &RequestConfig,
    username: String,
    password: String,
) -> Result<Option<User>, ConnectorError> {
    let req = MakeLoginRequest { username, password };

    let res = send(get_client(config, "auth/login", RequestType::POST).json(&req)).await?;
    parse_user(res).await
}

pub async fn post_register(
    config: &RequestConfig,
    username: String,
    email: String,
    password: String,
) -> Result<Option<User>, ConnectorError> {
    let req = MakeUserRequest {
        username,
        email,
        password,
    };

    let res = send(get_client(config, "auth/register", RequestType::POST).json(&req)).await?;
    parse_user(res).await
}
