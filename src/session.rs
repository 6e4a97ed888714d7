/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! The logged-in user, kept in a JSON file so it survives between runs.
//!
//! A `Session` is handed explicitly to whatever needs the current user. It is
//! filled by login, register and profile uploads, and emptied by logout.

use connector::User;
use std::path::{Path, PathBuf};
use std::{fs, io};

pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Session {
    path: PathBuf,
    user: Option<User>,
}

impl Session {
    /// Reads the session file. A missing or unreadable file means nobody is
    /// logged in.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let user = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<User>(&bytes) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("ignoring corrupt session file {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("could not read session file {}: {}", path.display(), e);
                None
            }
        };

        Self { path, user }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().and_then(|user| user.id)
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Replaces the current user and writes it to disk. The user stays
    /// current for this run even when writing fails.
    pub fn set_user(&mut self, user: User) -> Result<(), SessionError> {
        let contents = serde_json::to_vec_pretty(&user)?;
        self.user = Some(user);

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|source| SessionError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, contents).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })
    }

    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.user = None;

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
