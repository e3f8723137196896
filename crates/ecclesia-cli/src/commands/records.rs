//! Shared list/add/edit/delete flow for the record commands.
//!
//! Every command drives the same [`ResourceView`] the web pages use, so a
//! rejected submit or a declined delete behaves identically in both.

use anyhow::{anyhow, bail, Result};
use clap::Args;
use ecclesia_core::badge::Categorical;
use ecclesia_core::{Resource, ResourceView};
use ecclesia_db::DbPool;

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive search term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show this category ("all" for every record)
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Record ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Parse a category value, listing the accepted ones on failure.
pub fn parse_choice<C: Categorical>(field: &str, raw: &str) -> Result<C> {
    C::parse(raw.trim()).ok_or_else(|| {
        let accepted: Vec<&str> = C::ALL.iter().map(|c| c.as_str()).collect();
        anyhow!(
            "invalid {} '{}' (expected one of: {})",
            field,
            raw,
            accepted.join(", ")
        )
    })
}

/// Fetch the records and apply the list filters.
pub async fn load_view<R: Resource>(pool: &DbPool, args: &ListArgs) -> Result<ResourceView<R>> {
    let mut view = ResourceView::<R>::new();
    view.set_search(args.search.clone().unwrap_or_default());

    if let Some(raw) = args.category.as_deref() {
        let raw = raw.trim();
        if !raw.is_empty() && !raw.eq_ignore_ascii_case("all") {
            if R::Category::ALL.is_empty() {
                bail!("{} records have no category", R::NOUN);
            }
            view.set_category(Some(parse_choice::<R::Category>("category", raw)?));
        }
    }

    view.fetch(pool).await;
    Ok(view)
}

/// Submit a new record built from `draft`.
pub async fn add<R: Resource>(pool: &DbPool, draft: R::Draft) -> Result<String> {
    let mut view = ResourceView::<R>::new();
    view.open_create();
    view.editor_mut().set_draft(draft);
    Ok(view.submit(pool).await?)
}

/// Load record `id` into the editor, let `apply` change the draft, then
/// submit it.
pub async fn edit<R, F>(pool: &DbPool, id: &str, apply: F) -> Result<()>
where
    R: Resource,
    F: FnOnce(&mut R::Draft) -> Result<()>,
{
    let mut view = ResourceView::<R>::new();
    view.fetch(pool).await;
    view.open_edit(id)?;

    let draft = view
        .editor_mut()
        .draft_mut()
        .ok_or_else(|| anyhow!("the {} form did not open", R::NOUN))?;
    apply(draft)?;

    view.submit(pool).await?;
    Ok(())
}

/// Delete record `id`. Without `yes` the user is asked first.
pub async fn delete<R: Resource>(pool: &DbPool, id: &str, yes: bool) -> Result<bool> {
    let mut view = ResourceView::<R>::new();
    let deleted = if yes {
        view.delete(pool, id, true).await?
    } else {
        view.delete(pool, id, ask).await?
    };
    Ok(deleted)
}

fn ask(prompt: &str) -> bool {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false)
}

/// Overwrite `field` when a flag was given.
pub fn set(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}
