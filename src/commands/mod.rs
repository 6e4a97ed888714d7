/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod base;
pub mod dashboard;
pub mod profile;
pub mod resource;
pub mod search;

use connector::RequestConfig;
use tadmust::config::{Settings, data_dir};
use tadmust::session::{SESSION_FILE, Session};
use tadmust::views::Notice;

/// Everything a command needs: settings, the HTTP client and the session.
pub struct Context {
    pub settings: Settings,
    pub config: RequestConfig,
    pub session: Session,
}

impl Context {
    pub fn load(settings: Settings) -> anyhow::Result<Self> {
        let session = Session::load(data_dir()?.join(SESSION_FILE));

        Ok(Self {
            config: settings.request_config(),
            settings,
            session,
        })
    }
}

/// Prints a notice, errors on stderr.
pub fn show_notice(notice: Option<&Notice>) {
    match notice {
        Some(notice) if notice.is_error() => eprintln!("{}", notice),
        Some(notice) => println!("{}", notice),
        None => {}
    }
}
