/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::*;
use reqwest::multipart::{Form, Part};

/// `GET /user`, the profile of whoever the backend considers logged in.
pub async fn get_current(config: &RequestConfig) -> Result<User, ConnectorError> {
    let res = send(get_client(config, "user", RequestType::GET)).await?;
    parse_response(res).await
}

/// Replaces the avatar of `user_id` and returns the updated user.
pub async fn upload_profile(
    config: &RequestConfig,
    user_id: i64,
    file_name: String,
    contents: Vec<u8>,
) -> Result<User, ConnectorError> {
    let form = Form::new().part("file", Part::bytes(contents).file_name(file_name));

    let res = send(
        get_client(
            config,
            &format!("users/{}/upload-profile", user_id),
            RequestType::POST,
        )
        .multipart(form),
    )
    .await?;

    parse_response(res).await
}
