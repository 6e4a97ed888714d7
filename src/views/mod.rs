/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Screen state without a screen: each view owns what it fetched and
//! exposes it for rendering, and returns the route it would navigate to.
//!
//! Results are applied only by the `&mut self` call awaiting them, so a view
//! that has been dropped can never be updated afterwards.

pub mod auth;
pub mod dashboard;
pub mod form;
pub mod list;
pub mod profile;
pub mod search;

use connector::ResourceKind;
use std::fmt;

/// Result of one fetch. `Failed` is terminal, a view never stays `Loading`
/// after its request has finished.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Fetch<T> {
    #[default]
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Fetch<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Fetch::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Fetch::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Fetch::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Inline message shown above a view until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Profile,
    Search(String),
    List(ResourceKind),
    Create(ResourceKind),
    Edit(ResourceKind, i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboards".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Search(query) => format!(
                "/search?query={}",
                url::form_urlencoded::byte_serialize(query.as_bytes()).collect::<String>()
            ),
            Route::List(kind) => kind.list_route(),
            Route::Create(kind) => kind.create_route(),
            Route::Edit(kind, id) => kind.edit_route(*id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
