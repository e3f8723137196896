//! Member commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use ecclesia_core::cell::cell_options;
use ecclesia_core::member::model::{Member, MemberDraft, MemberStatus};
use std::path::Path;

use super::open_store;
use super::records::{self, parse_choice, set, DeleteArgs, ListArgs};
use crate::output;

#[derive(Subcommand)]
pub enum MemberCommands {
    /// List members
    List(ListArgs),

    /// Register a member
    Add(AddMemberArgs),

    /// Change a member; only the given fields are touched
    Edit(EditMemberArgs),

    /// Remove a member
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct MemberFields {
    /// National ID (CPF)
    #[arg(long)]
    pub national_id: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Conversion date (YYYY-MM-DD)
    #[arg(long)]
    pub conversion_date: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    /// Cell ID ("" for none)
    #[arg(long)]
    pub cell: Option<String>,

    /// Status (active, inactive, transferred)
    #[arg(long)]
    pub status: Option<String>,
}

impl MemberFields {
    fn apply(self, draft: &mut MemberDraft) -> Result<()> {
        set(&mut draft.national_id, self.national_id);
        set(&mut draft.phone, self.phone);
        set(&mut draft.email, self.email);
        set(&mut draft.conversion_date, self.conversion_date);
        set(&mut draft.address, self.address);
        set(&mut draft.cell_id, self.cell);
        if let Some(raw) = self.status {
            draft.status = parse_choice::<MemberStatus>("status", &raw)?;
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct AddMemberArgs {
    /// Full name
    pub name: String,

    #[command(flatten)]
    pub fields: MemberFields,
}

#[derive(Args)]
pub struct EditMemberArgs {
    /// Member ID
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub fields: MemberFields,
}

pub async fn execute(cmd: MemberCommands, project_dir: &Path) -> Result<()> {
    let (_, pool) = open_store(project_dir)?;

    match cmd {
        MemberCommands::List(args) => {
            let view = records::load_view::<Member>(&pool, &args).await?;
            let cells = cell_options(&pool).await;
            output::print_members_table(&view.filtered(), &cells);
        }

        MemberCommands::Add(args) => {
            let mut draft = MemberDraft {
                name: args.name,
                ..Default::default()
            };
            args.fields.apply(&mut draft)?;
            let name = draft.name.clone();

            let id = records::add::<Member>(&pool, draft).await?;
            println!(
                "{} Added member: {} ({})",
                "✓".green().bold(),
                name.cyan(),
                id.dimmed()
            );
        }

        MemberCommands::Edit(args) => {
            let EditMemberArgs { id, name, fields } = args;
            records::edit::<Member, _>(&pool, &id, |draft| {
                set(&mut draft.name, name);
                fields.apply(draft)
            })
            .await?;
            println!("{} Updated member {}", "✓".green().bold(), id.dimmed());
        }

        MemberCommands::Delete(args) => {
            if records::delete::<Member>(&pool, &args.id, args.yes).await? {
                println!("{} Deleted member {}", "✓".green().bold(), args.id.dimmed());
            } else {
                println!("{}", "Cancelled.".dimmed());
            }
        }
    }

    Ok(())
}
