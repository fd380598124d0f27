//! The `practicum format` command.

use std::path::Path;

use anyhow::Result;
use practicum::codec;
use practicum::data::load_question_rows;

pub fn execute(file: &Path) -> Result<()> {
    let questions = load_question_rows(file)?;
    println!("{}", codec::encode(&questions));
    Ok(())
}
