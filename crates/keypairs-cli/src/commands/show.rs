// ABOUTME: Implementation of 'keypairs show'
// ABOUTME: Prints one keypair's public half; private keys are never available here

use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use keypairs_api::{KeypairEnvelope, KeypairView};
use keypairs_core::{KeypairService, KeypairStore};

pub async fn run<S: KeypairStore>(
    service: &KeypairService<S>,
    user_id: &str,
    name: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let keypair = service.get(user_id, name).await?;

    if json {
        let envelope = KeypairEnvelope::from(KeypairView::from(&keypair));
        writeln!(out, "{}", serde_json::to_string_pretty(&envelope)?)?;
        return Ok(());
    }

    writeln!(out, "{}", keypair.name.bold())?;
    writeln!(out, "  {}: {}", "Fingerprint".dimmed(), keypair.fingerprint)?;
    writeln!(
        out,
        "  {}:     {}",
        "Created".dimmed(),
        keypair.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out, "  {}:  {}", "Public key".dimmed(), keypair.public_key)?;

    Ok(())
}
