/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::{Fetch, Notice};
use crate::session::Session;
use connector::{RequestConfig, User, user};
use std::path::{Path, PathBuf};

pub const LOGIN_FIRST: &str = "Please login first";
pub const UPLOAD_SUCCEEDED: &str = "Profile image updated!";
pub const UPLOAD_FAILED: &str = "Upload failed!";

/// Full URL of an uploaded image. The backend serves uploads from its
/// origin, not from under the API prefix.
pub fn avatar_url(config: &RequestConfig, user: &User) -> Option<String> {
    let path = user.image_path()?;

    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }

    Some(format!("{}/{}", config.origin(), path.trim_start_matches('/')))
}

pub struct ProfileView {
    user: Fetch<User>,
}

impl ProfileView {
    /// The user stored by the last login, without asking the server.
    pub fn from_session(session: &Session) -> Self {
        let user = match session.user() {
            Some(user) => Fetch::Loaded(user.clone()),
            None => Fetch::Failed(LOGIN_FIRST.to_string()),
        };

        Self { user }
    }

    /// The user the server considers logged in.
    pub async fn fetch(config: &RequestConfig) -> Self {
        let user = match user::get_current(config).await {
            Ok(user) => Fetch::Loaded(user),
            Err(e) => {
                tracing::error!("Error fetching profile: {}", e);
                Fetch::Failed(format!("Failed to load profile: {}", e))
            }
        };

        Self { user }
    }

    pub fn user(&self) -> &Fetch<User> {
        &self.user
    }

    pub fn avatar_url(&self, config: &RequestConfig) -> Option<String> {
        avatar_url(config, self.user.value()?)
    }
}

/// Picks an image and sends it as the user's new avatar.
#[derive(Debug, Default)]
pub struct ProfileUpload {
    file: Option<PathBuf>,
    notice: Option<Notice>,
}

impl ProfileUpload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_file(&mut self, file: impl Into<PathBuf>) {
        self.file = Some(file.into());
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Uploads the selected file for the session user and stores the
    /// updated user. Nothing is sent without a file or a user id.
    pub async fn submit(&mut self, config: &RequestConfig, session: &mut Session) -> bool {
        let Some(file) = self.file.clone() else {
            self.notice = Some(Notice::error("Please select a file"));
            return false;
        };

        let Some(user_id) = session.user_id() else {
            self.notice = Some(Notice::error(LOGIN_FIRST));
            return false;
        };

        let contents = match tokio::fs::read(&file).await {
            Ok(contents) => contents,
            Err(e) => {
                tracing::error!("Could not read {}: {}", file.display(), e);
                self.notice = Some(Notice::error(UPLOAD_FAILED));
                return false;
            }
        };

        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "profile".to_string());

        match user::upload_profile(config, user_id, file_name, contents).await {
            Ok(updated) => {
                if let Err(e) = session.set_user(updated) {
                    tracing::error!("Could not store session: {}", e);
                }
                self.notice = Some(Notice::success(UPLOAD_SUCCEEDED));
                true
            }
            Err(e) => {
                tracing::error!("Upload error: {}", e);
                self.notice = Some(Notice::error(UPLOAD_FAILED));
                false
            }
        }
    }
}
