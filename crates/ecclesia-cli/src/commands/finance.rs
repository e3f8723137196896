//! Finance commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use ecclesia_core::finance::model::{Finance, FinanceDraft, FinanceKind};
use ecclesia_core::member::all_members;
use ecclesia_core::Resource;
use std::path::Path;

use super::open_store;
use super::records::{self, parse_choice, set, DeleteArgs, ListArgs};
use crate::output;

#[derive(Subcommand)]
pub enum FinanceCommands {
    /// List entries with their total
    List(ListArgs),

    /// Record an entry
    Add(AddFinanceArgs),

    /// Change an entry; only the given fields are touched
    Edit(EditFinanceArgs),

    /// Remove an entry
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct FinanceFields {
    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Type (tithe, offering, campaign, other)
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Contributing member ID ("" for anonymous)
    #[arg(long)]
    pub member: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

impl FinanceFields {
    fn apply(self, draft: &mut FinanceDraft) -> Result<()> {
        set(&mut draft.date, self.date);
        set(&mut draft.member_id, self.member);
        set(&mut draft.description, self.description);
        if let Some(raw) = self.kind {
            draft.kind = parse_choice::<FinanceKind>("type", &raw)?;
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct AddFinanceArgs {
    /// Amount, e.g. 150.00
    pub amount: String,

    #[command(flatten)]
    pub fields: FinanceFields,
}

#[derive(Args)]
pub struct EditFinanceArgs {
    /// Entry ID
    pub id: String,

    #[arg(long)]
    pub amount: Option<String>,

    #[command(flatten)]
    pub fields: FinanceFields,
}

/// A blank entry (dated today) with the given amount and fields.
fn add_draft(args: AddFinanceArgs) -> Result<FinanceDraft> {
    let mut draft = FinanceDraft {
        amount: args.amount,
        ..Finance::blank_draft()
    };
    args.fields.apply(&mut draft)?;
    Ok(draft)
}

pub async fn execute(cmd: FinanceCommands, project_dir: &Path) -> Result<()> {
    let (_, pool) = open_store(project_dir)?;

    match cmd {
        FinanceCommands::List(args) => {
            let view = records::load_view::<Finance>(&pool, &args).await?;
            let members = all_members(&pool).await;
            output::print_finances_table(&view.filtered(), &members);
        }

        FinanceCommands::Add(args) => {
            let draft = add_draft(args)?;
            let amount = draft.parsed_amount()?;

            let id = records::add::<Finance>(&pool, draft).await?;
            println!(
                "{} Recorded {} ({})",
                "✓".green().bold(),
                amount.to_string().yellow(),
                id.dimmed()
            );
        }

        FinanceCommands::Edit(args) => {
            let EditFinanceArgs { id, amount, fields } = args;
            records::edit::<Finance, _>(&pool, &id, |draft| {
                set(&mut draft.amount, amount);
                fields.apply(draft)
            })
            .await?;
            println!("{} Updated entry {}", "✓".green().bold(), id.dimmed());
        }

        FinanceCommands::Delete(args) => {
            if records::delete::<Finance>(&pool, &args.id, args.yes).await? {
                println!("{} Deleted entry {}", "✓".green().bold(), args.id.dimmed());
            } else {
                println!("{}", "Cancelled.".dimmed());
            }
        }
    }

    Ok(())
}
