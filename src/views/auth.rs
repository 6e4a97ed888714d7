/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::{Notice, Route};
use crate::session::{Session, SessionError};
use connector::{RequestConfig, User, auth};

pub const LOGIN_FAILED: &str = "Login failed! Check credentials.";
pub const REGISTER_FAILED: &str = "Registration failed. Try again.";

fn missing(fields: &[(&'static str, &str)]) -> Option<&'static str> {
    fields
        .iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| *label)
}

fn remember(session: &mut Session, user: Option<User>) {
    if let Some(user) = user {
        if let Err(e) = session.set_user(user) {
            tracing::error!("Could not store session: {}", e);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginView {
    pub username: String,
    pub password: String,
    notice: Option<Notice>,
}

impl LoginView {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            notice: None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Logs in and returns where to go next. Blank credentials are rejected
    /// without contacting the server.
    pub async fn submit(&mut self, config: &RequestConfig, session: &mut Session) -> Option<Route> {
        if let Some(label) = missing(&[
            ("Username", self.username.as_str()),
            ("Password", self.password.as_str()),
        ]) {
            self.notice = Some(Notice::error(format!("{} is required", label)));
            return None;
        }

        match auth::post_login(config, self.username.clone(), self.password.clone()).await {
            Ok(user) => {
                remember(session, user);
                self.notice = Some(Notice::success("Login successful!"));
                Some(Route::Dashboard)
            }
            Err(e) => {
                tracing::error!("Login error: {}", e);
                self.notice = Some(Notice::error(LOGIN_FAILED));
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterView {
    pub username: String,
    pub email: String,
    pub password: String,
    notice: Option<Notice>,
}

impl RegisterView {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            notice: None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub async fn submit(&mut self, config: &RequestConfig, session: &mut Session) -> Option<Route> {
        if let Some(label) = missing(&[
            ("Username", self.username.as_str()),
            ("Email", self.email.as_str()),
            ("Password", self.password.as_str()),
        ]) {
            self.notice = Some(Notice::error(format!("{} is required", label)));
            return None;
        }

        match auth::post_register(
            config,
            self.username.clone(),
            self.email.clone(),
            self.password.clone(),
        )
        .await
        {
            Ok(user) => {
                remember(session, user);
                self.notice = Some(Notice::success("Registration successful! Please login."));
                Some(Route::Login)
            }
            Err(e) => {
                tracing::error!("Registration error: {}", e);
                self.notice = Some(Notice::error(REGISTER_FAILED));
                None
            }
        }
    }
}

/// Forgets the current user. Nothing is sent to the server.
pub fn logout(session: &mut Session) -> Result<(Notice, Route), SessionError> {
    session.clear()?;
    Ok((Notice::info("Logged out!"), Route::Login))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reports_first_blank() {
        assert_eq!(missing(&[("Username", "amina"), ("Password", " ")]), Some("Password"));
        assert_eq!(missing(&[("Username", ""), ("Password", "")]), Some("Username"));
        assert_eq!(missing(&[("Username", "amina"), ("Password", "x")]), None);
    }

    #[tokio::test]
    async fn test_blank_login_is_rejected_locally() {
        // Nothing listens on port 9, a request would fail with a different notice.
        let config = RequestConfig::new("http://127.0.0.1:9/api");
        let path = std::env::temp_dir()
            .join(format!("tadmust-auth-{}", uuid::Uuid::new_v4()))
            .join("session.json");
        let mut session = Session::load(path);

        let mut view = LoginView::new("amina", "");
        assert_eq!(view.submit(&config, &mut session).await, None);
        assert_eq!(view.notice().unwrap().text, "Password is required");
        assert!(!session.is_logged_in());
    }
}
