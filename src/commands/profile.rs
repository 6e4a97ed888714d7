/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::*;
use anyhow::bail;
use clap::Subcommand;
use std::path::PathBuf;
use tadmust::render;
use tadmust::views::Fetch;
use tadmust::views::profile::{ProfileUpload, ProfileView};

#[derive(Subcommand, Debug)]
pub enum Commands {
    Show {
        /// Ask the server instead of using the stored login
        #[arg(short, long)]
        remote: bool,
    },
    /// Uploads a new profile image
    Upload {
        file: PathBuf,
    },
}

pub async fn handle(ctx: &mut Context, cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Show { remote } => {
            let view = if remote {
                ProfileView::fetch(&ctx.config).await
            } else {
                ProfileView::from_session(&ctx.session)
            };

            match view.user() {
                Fetch::Loaded(user) => println!("{}", render::profile(&ctx.config, user)),
                Fetch::Failed(message) => bail!("{}", message),
                Fetch::Loading => {}
            }
        }

        Commands::Upload { file } => {
            let mut upload = ProfileUpload::new();
            upload.select_file(file);

            let uploaded = upload.submit(&ctx.config, &mut ctx.session).await;
            show_notice(upload.notice());

            if !uploaded {
                bail!("profile image not changed");
            }
        }
    }

    Ok(())
}
