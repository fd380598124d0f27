//! The `practicum practical` commands.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use practicum::data::load_test_text;
use practicum::models::Status;
use practicum::service::content::{self, PracticalDraft};
use practicum::{Config, GateError, PracticumError, Repository};
use uuid::Uuid;

pub struct SaveArgs {
    pub file: PathBuf,
    pub title: String,
    pub order: u32,
    pub id: Option<Uuid>,
    /// `None` keeps the current value when editing.
    pub description: Option<String>,
    /// `None` keeps the current status when editing, draft when creating.
    pub status: Option<Status>,
    pub created_by: Option<Uuid>,
}

pub fn list(repo: &dyn Repository) -> Result<()> {
    let practicals = repo.practicals()?;
    if practicals.is_empty() {
        println!("No practicals yet.");
        return Ok(());
    }

    for practical in practicals {
        let questions = repo.test_questions(practical.id)?.len();
        println!(
            "{:>3}. {}  [{}, {} question(s)]  {}",
            practical.order_number, practical.title, practical.status, questions, practical.id
        );
        if let Some(description) = &practical.description {
            println!("     {}", description);
        }
    }
    Ok(())
}

/// The `--created-by` id, else the first admin. Edits keep their author.
fn author(repo: &dyn Repository, args: &SaveArgs) -> Result<Uuid> {
    if let Some(id) = args.created_by {
        return Ok(id);
    }
    if args.id.is_some() {
        return Ok(Uuid::nil());
    }
    match repo.admins()?.into_iter().next() {
        Some(admin) => Ok(admin.id),
        None => bail!("no admin profile in the course, pass --created-by"),
    }
}

pub fn save(repo: &mut dyn Repository, config: &Config, args: SaveArgs) -> Result<()> {
    let test_text = load_test_text(&args.file)?;
    let created_by = author(repo, &args)?;
    let draft = PracticalDraft {
        id: args.id,
        title: args.title,
        description: args.description,
        order_number: args.order,
        status: args.status,
        created_by,
        file: None,
        test_text,
    };

    let practical = content::save_practical(repo, &config.gate(), config.mark_policy(), draft)
        .inspect_err(|err| {
            if let PracticumError::Gate(GateError::CountMismatch { dropped, .. }) = err {
                for block in dropped {
                    if let Some(reason) = block.drop_reason() {
                        eprintln!("  block {}: {}", block.block_number, reason);
                    }
                }
            }
        })
        .context("test was not saved")?;

    println!("Saved \"{}\" ({})", practical.title, practical.id);
    Ok(())
}

pub fn edit_text(repo: &dyn Repository, id: Uuid) -> Result<()> {
    println!("{}", content::practical_test_text(repo, id)?);
    Ok(())
}

pub fn delete(repo: &mut dyn Repository, id: Uuid) -> Result<()> {
    content::delete_practical(repo, id)?;
    println!("Deleted practical {}", id);
    Ok(())
}
