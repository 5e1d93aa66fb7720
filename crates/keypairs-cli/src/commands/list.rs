// ABOUTME: Implementation of 'keypairs list'
// ABOUTME: Prints the acting user's keypairs ordered by name

use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use keypairs_api::KeypairsEnvelope;
use keypairs_core::{KeypairService, KeypairStore};

pub async fn run<S: KeypairStore>(
    service: &KeypairService<S>,
    user_id: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let keypairs = service.list(user_id).await?;

    if json {
        let envelope = KeypairsEnvelope::from_keypairs(&keypairs);
        writeln!(out, "{}", serde_json::to_string_pretty(&envelope)?)?;
        return Ok(());
    }

    if keypairs.is_empty() {
        writeln!(out, "{}", "No keypairs found".dimmed())?;
        return Ok(());
    }

    writeln!(out, "{}", format!("Keypairs ({})", keypairs.len()).bold())?;
    writeln!(out)?;
    for keypair in keypairs {
        writeln!(out, "{}", keypair.name.bold())?;
        writeln!(out, "    {}: {}", "Fingerprint".dimmed(), keypair.fingerprint)?;
        writeln!(
            out,
            "    {}:     {}",
            "Created".dimmed(),
            keypair.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
    }

    Ok(())
}
