/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::*;
use crate::input::*;
use anyhow::{anyhow, bail};
use clap::Subcommand;
use connector::{FieldKind, FieldSpec, Resource, resource};
use tadmust::render;
use tadmust::views::Fetch;
use tadmust::views::form::FormView;
use tadmust::views::list::{DeleteOutcome, ListView};

#[derive(Subcommand, Debug)]
pub enum Commands {
    List,
    Show {
        id: i64,
    },
    Create {
        /// Field values as FIELD=VALUE, missing fields are asked for
        #[arg(short, long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    Edit {
        id: i64,
        /// Field values as FIELD=VALUE, other fields keep their value
        #[arg(short, long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    Delete {
        id: i64,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle<R: Resource>(ctx: &Context, cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::List => {
            let mut view = ListView::<R>::new(ctx.config.clone());
            view.load().await;

            println!("{}", render::list(&view));

            if let Some(message) = view.state().error() {
                bail!("{}", message);
            }
        }

        Commands::Show { id } => {
            let record = resource::get::<R>(&ctx.config, id)
                .await
                .map_err(|e| anyhow!("Failed to load {} {}: {}", R::KIND.singular(), id, e))?;

            println!("{}", render::record(&record));
        }

        Commands::Create { set } => {
            let form = FormView::<R>::create(ctx.config.clone());
            fill_and_submit(form, &set, true).await?;
            println!("{} created.", R::KIND.title());
        }

        Commands::Edit { id, set } => {
            let form = FormView::<R>::edit(ctx.config.clone(), id);
            fill_and_submit(form, &set, set.is_empty()).await?;
            println!("{} updated.", R::KIND.title());
        }

        Commands::Delete { id, yes } => {
            let mut view = ListView::<R>::new(ctx.config.clone());
            view.load().await;

            if let Some(message) = view.state().error() {
                bail!("{}", message);
            }

            let outcome = view
                .delete(id, |prompt| {
                    yes || (is_interactive() && ask_for_confirmation(prompt).unwrap_or(false))
                })
                .await;

            show_notice(view.notice());

            match outcome {
                DeleteOutcome::Deleted => {}
                DeleteOutcome::Cancelled => println!("Nothing deleted."),
                DeleteOutcome::NotListed | DeleteOutcome::Failed => {
                    bail!("{} {} was not deleted", R::KIND.singular(), id)
                }
            }
        }
    }

    Ok(())
}

fn parse_assignment(raw: &str) -> anyhow::Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(field, value)| (field.trim(), value))
        .ok_or_else(|| anyhow!("expected FIELD=VALUE, got \"{}\"", raw))
}

async fn fill_and_submit<R: Resource>(
    mut form: FormView<R>,
    set: &[String],
    prompt_missing: bool,
) -> anyhow::Result<()> {
    form.mount().await;

    if let Some(message) = form.record().error() {
        bail!("{}", message);
    }

    let mut given = Vec::new();
    for raw in set {
        let (field, value) = parse_assignment(raw)?;
        form.set(field, value)?;
        given.push(field.to_string());
    }

    if prompt_missing && is_interactive() {
        for field in FormView::<R>::fields() {
            if !given.iter().any(|name| name == field.name) {
                prompt_field(&mut form, field)?;
            }
        }
    }

    let submission = match form.start_submit() {
        Ok(submission) => submission,
        Err(e) => {
            show_notice(form.notice());
            return Err(e.into());
        }
    };

    eprintln!("{}", form.submit_label());
    let result = submission.send().await;

    if let Err(e) = form.finish_submit(result) {
        show_notice(form.notice());
        return Err(e.into());
    }

    Ok(())
}

fn prompt_field<R: Resource>(form: &mut FormView<R>, field: &FieldSpec) -> anyhow::Result<()> {
    match field.kind {
        FieldKind::ForeignKey(kind) => {
            let options = match form.options(kind) {
                Some(Fetch::Loaded(options)) => options.clone(),
                Some(Fetch::Failed(message)) => bail!("{}", message),
                _ => Vec::new(),
            };

            if options.is_empty() {
                bail!("No {} found, create one first.", kind.plural());
            }

            let current = form.value(field.name).and_then(|v| v.as_i64());
            let labels: Vec<String> = options.iter().map(|o| o.label.clone()).collect();
            let choice = ask_for_choice(
                &format!("Select {}", field.label),
                &labels,
                current.and_then(|id| options.iter().position(|o| o.id == id)),
            )?;

            form.select(field.name, choice.map(|index| options[index].id))?;
        }

        FieldKind::Checkbox => {
            let current = if form.text(field.name) == "true" { "yes" } else { "no" };
            let answer = ask_with_default(&format!("{} (yes/no)", field.label), current)?;
            form.set(field.name, &answer)?;
        }

        _ => {
            let answer = if field.required && form.text(field.name).is_empty() {
                ask_for_input(field.label)?
            } else {
                ask_with_default(field.label, &form.text(field.name))?
            };
            form.set(field.name, &answer)?;
        }
    }

    Ok(())
}
