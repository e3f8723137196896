//! Event commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use ecclesia_core::event::model::{Event, EventDraft, EventStatus};
use std::path::Path;

use super::open_store;
use super::records::{self, parse_choice, set, DeleteArgs, ListArgs};
use crate::output;

#[derive(Subcommand)]
pub enum EventCommands {
    /// List events, latest first
    List(ListArgs),

    /// Schedule an event
    Add(AddEventArgs),

    /// Change an event; only the given fields are touched
    Edit(EditEventArgs),

    /// Remove an event
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct EventFields {
    /// Start time (HH:MM)
    #[arg(long)]
    pub time: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub expected: Option<String>,

    #[arg(long)]
    pub confirmed: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Status (planned, confirmed, completed, cancelled)
    #[arg(long)]
    pub status: Option<String>,
}

impl EventFields {
    fn apply(self, draft: &mut EventDraft) -> Result<()> {
        set(&mut draft.time, self.time);
        set(&mut draft.location, self.location);
        set(&mut draft.expected_attendees, self.expected);
        set(&mut draft.confirmed_attendees, self.confirmed);
        set(&mut draft.description, self.description);
        if let Some(raw) = self.status {
            draft.status = parse_choice::<EventStatus>("status", &raw)?;
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct AddEventArgs {
    pub name: String,

    /// Date (YYYY-MM-DD)
    pub date: String,

    #[command(flatten)]
    pub fields: EventFields,
}

#[derive(Args)]
pub struct EditEventArgs {
    /// Event ID
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    #[command(flatten)]
    pub fields: EventFields,
}

pub async fn execute(cmd: EventCommands, project_dir: &Path) -> Result<()> {
    let (_, pool) = open_store(project_dir)?;

    match cmd {
        EventCommands::List(args) => {
            let view = records::load_view::<Event>(&pool, &args).await?;
            output::print_events_table(&view.filtered());
        }

        EventCommands::Add(args) => {
            let mut draft = EventDraft {
                name: args.name,
                date: args.date,
                ..Default::default()
            };
            args.fields.apply(&mut draft)?;
            let name = draft.name.clone();

            let id = records::add::<Event>(&pool, draft).await?;
            println!(
                "{} Added event: {} ({})",
                "✓".green().bold(),
                name.cyan(),
                id.dimmed()
            );
        }

        EventCommands::Edit(args) => {
            let EditEventArgs {
                id,
                name,
                date,
                fields,
            } = args;
            records::edit::<Event, _>(&pool, &id, |draft| {
                set(&mut draft.name, name);
                set(&mut draft.date, date);
                fields.apply(draft)
            })
            .await?;
            println!("{} Updated event {}", "✓".green().bold(), id.dimmed());
        }

        EventCommands::Delete(args) => {
            if records::delete::<Event>(&pool, &args.id, args.yes).await? {
                println!("{} Deleted event {}", "✓".green().bold(), args.id.dimmed());
            } else {
                println!("{}", "Cancelled.".dimmed());
            }
        }
    }

    Ok(())
}
