// ABOUTME: Implementation of 'keypairs delete'
// ABOUTME: Removes the named keypair of the acting user

use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use keypairs_core::{KeypairService, KeypairStore};

pub async fn run<S: KeypairStore>(
    service: &KeypairService<S>,
    user_id: &str,
    name: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    service.delete(user_id, name).await?;

    if json {
        writeln!(out, "{}", serde_json::json!({ "deleted": name }))?;
    } else {
        writeln!(out, "{} {}", "Keypair deleted:".green().bold(), name)?;
    }

    Ok(())
}
