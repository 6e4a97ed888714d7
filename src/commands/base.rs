/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::*;
use crate::input::*;
use anyhow::{Context as _, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use connector::{College, Course, Department, Programme, Staff, Task};
use std::io;
use tadmust::config::{ConfigStore, DEFAULT_LOG_LEVEL};
use tadmust::views::auth::{LoginView, RegisterView, logout};

#[derive(Parser, Debug)]
#[command(name = "TADMUST", display_name = "TADMUST", bin_name = "tadmust", author = "Wavelens", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<MainCommands>,
    #[arg(long, value_enum)]
    generate_completions: Option<Shell>,
}

#[derive(Subcommand, Debug)]
enum MainCommands {
    /// Shows or sets a configuration value
    Config {
        key: String,
        value: Option<String>,
    },
    Login {
        #[arg(short, long)]
        username: Option<String>,
    },
    Register {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
    },
    Logout,
    /// Shows record counts and task completion, refreshed periodically
    Dashboard {
        /// Seconds between refreshes
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
        /// Stop after this many refreshes
        #[arg(short, long)]
        ticks: Option<u64>,
    },
    Search {
        term: String,
    },
    Profile {
        #[command(subcommand)]
        cmd: profile::Commands,
    },
    College {
        #[command(subcommand)]
        cmd: resource::Commands,
    },
    Department {
        #[command(subcommand)]
        cmd: resource::Commands,
    },
    Programme {
        #[command(subcommand)]
        cmd: resource::Commands,
    },
    Course {
        #[command(subcommand)]
        cmd: resource::Commands,
    },
    Staff {
        #[command(subcommand)]
        cmd: resource::Commands,
    },
    Task {
        #[command(subcommand)]
        cmd: resource::Commands,
    },
}

pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completions {
        let mut app = Cli::command();
        let bin_name = app.get_name().to_string();
        generate(shell, &mut app, bin_name, &mut io::stdout());
        return Ok(());
    }

    let Some(cmd) = cli.cmd else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let store = ConfigStore::default_location()?;
    let settings = store.settings();

    tadmust::init_logging(
        settings
            .as_ref()
            .map(|s| s.log_level.as_str())
            .unwrap_or(DEFAULT_LOG_LEVEL),
    );

    if let MainCommands::Config { key, value } = cmd {
        match store.set_get_value_from_string(&key, value)? {
            Some(value) => println!("{}", value),
            None => println!("{} is not set.", key.to_lowercase()),
        }
        return Ok(());
    }

    let settings = settings.with_context(|| {
        format!(
            "invalid configuration in {}, fix it with `tadmust config <key> <value>`",
            store.path().display()
        )
    })?;
    let mut ctx = Context::load(settings)?;

    match cmd {
        MainCommands::Config { .. } => {}

        MainCommands::Login { username } => {
            let username = match username {
                Some(username) => username,
                None => ask_for_input("Username")?,
            };
            let password = ask_for_password()?;

            let mut view = LoginView::new(username, password);
            let route = view.submit(&ctx.config, &mut ctx.session).await;
            show_notice(view.notice());

            if route.is_none() {
                bail!("not logged in");
            }
        }

        MainCommands::Register { username, email } => {
            let username = match username {
                Some(username) => username,
                None => ask_for_input("Username")?,
            };
            let email = match email {
                Some(email) => email,
                None => ask_for_input("Email")?,
            };
            let password = ask_for_password()?;

            let mut view = RegisterView::new(username, email, password);
            let route = view.submit(&ctx.config, &mut ctx.session).await;
            show_notice(view.notice());

            if route.is_none() {
                bail!("not registered");
            }
        }

        MainCommands::Logout => {
            let (notice, _) = logout(&mut ctx.session)?;
            show_notice(Some(&notice));
        }

        MainCommands::Dashboard { interval, ticks } => {
            dashboard::handle(&ctx, interval, ticks).await?
        }
        MainCommands::Search { term } => search::handle(&ctx, term).await?,
        MainCommands::Profile { cmd } => profile::handle(&mut ctx, cmd).await?,
        MainCommands::College { cmd } => resource::handle::<College>(&ctx, cmd).await?,
        MainCommands::Department { cmd } => resource::handle::<Department>(&ctx, cmd).await?,
        MainCommands::Programme { cmd } => resource::handle::<Programme>(&ctx, cmd).await?,
        MainCommands::Course { cmd } => resource::handle::<Course>(&ctx, cmd).await?,
        MainCommands::Staff { cmd } => resource::handle::<Staff>(&ctx, cmd).await?,
        MainCommands::Task { cmd } => resource::handle::<Task>(&ctx, cmd).await?,
    }

    Ok(())
}
