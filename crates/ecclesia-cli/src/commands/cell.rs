//! Cell commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use ecclesia_core::cell::model::{Cell, CellDraft};
use ecclesia_core::member::MemberLookup;
use std::path::Path;

use super::open_store;
use super::records::{self, set, DeleteArgs, ListArgs};
use crate::output;

#[derive(Subcommand)]
pub enum CellCommands {
    /// List cells with their leader and members
    List(ListArgs),

    /// Create a cell
    Add(AddCellArgs),

    /// Change a cell; only the given fields are touched
    Edit(EditCellArgs),

    /// Remove a cell
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct CellFields {
    /// Leader member ID ("" for none)
    #[arg(long)]
    pub leader: Option<String>,

    /// Meeting day, e.g. Wednesday
    #[arg(long)]
    pub day: Option<String>,

    /// Meeting time (HH:MM)
    #[arg(long)]
    pub time: Option<String>,

    #[arg(long)]
    pub address: Option<String>,
}

impl CellFields {
    fn apply(self, draft: &mut CellDraft) {
        set(&mut draft.leader_id, self.leader);
        set(&mut draft.meeting_day, self.day);
        set(&mut draft.meeting_time, self.time);
        set(&mut draft.meeting_address, self.address);
    }
}

#[derive(Args)]
pub struct AddCellArgs {
    pub name: String,

    #[command(flatten)]
    pub fields: CellFields,
}

#[derive(Args)]
pub struct EditCellArgs {
    /// Cell ID
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub fields: CellFields,
}

pub async fn execute(cmd: CellCommands, project_dir: &Path) -> Result<()> {
    let (_, pool) = open_store(project_dir)?;

    match cmd {
        CellCommands::List(args) => {
            let view = records::load_view::<Cell>(&pool, &args).await?;
            let members = MemberLookup::load(&pool).await;
            output::print_cells(&view.filtered(), &members);
        }

        CellCommands::Add(args) => {
            let mut draft = CellDraft {
                name: args.name,
                ..Default::default()
            };
            args.fields.apply(&mut draft);
            let name = draft.name.clone();

            let id = records::add::<Cell>(&pool, draft).await?;
            println!(
                "{} Added cell: {} ({})",
                "✓".green().bold(),
                name.cyan(),
                id.dimmed()
            );
        }

        CellCommands::Edit(args) => {
            let EditCellArgs { id, name, fields } = args;
            records::edit::<Cell, _>(&pool, &id, |draft| {
                set(&mut draft.name, name);
                fields.apply(draft);
                Ok(())
            })
            .await?;
            println!("{} Updated cell {}", "✓".green().bold(), id.dimmed());
        }

        CellCommands::Delete(args) => {
            if records::delete::<Cell>(&pool, &args.id, args.yes).await? {
                println!("{} Deleted cell {}", "✓".green().bold(), args.id.dimmed());
            } else {
                println!("{}", "Cancelled.".dimmed());
            }
        }
    }

    Ok(())
}
