// ABOUTME: Implementation of 'keypairs create'
// ABOUTME: Generates or imports a keypair and prints any private key exactly once

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;

use keypairs_api::{KeypairEnvelope, KeypairView};
use keypairs_core::{KeySource, KeyType, KeypairService, KeypairStore, NewKeypair};

pub async fn run<S: KeypairStore>(
    service: &KeypairService<S>,
    user_id: &str,
    name: String,
    public_key_file: Option<PathBuf>,
    key_type: Option<String>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let source = match (public_key_file, key_type) {
        (Some(path), _) => {
            let key = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read public key from {}", path.display()))?;
            KeySource::Import(key)
        }
        (None, Some(raw)) => {
            let key_type: KeyType = raw.parse().map_err(|e| anyhow!("{e}"))?;
            KeySource::Generate(key_type)
        }
        (None, None) => KeySource::Generate(service.default_key_type()),
    };

    let created = service
        .create_with(user_id, NewKeypair { name, source })
        .await?;

    if json {
        let envelope = KeypairEnvelope::from(KeypairView::from(&created));
        writeln!(out, "{}", serde_json::to_string_pretty(&envelope)?)?;
        return Ok(());
    }

    let keypair = &created.keypair;
    writeln!(out, "{}", "Keypair created".green().bold())?;
    writeln!(out, "  {}:        {}", "Name".dimmed(), keypair.name)?;
    writeln!(out, "  {}: {}", "Fingerprint".dimmed(), keypair.fingerprint)?;
    writeln!(out, "  {}:  {}", "Public key".dimmed(), keypair.public_key)?;

    if let Some(private_key) = &created.private_key {
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            "Private key (shown once, it is not stored):".yellow().bold()
        )?;
        write!(out, "{private_key}")?;
        if !private_key.ends_with('\n') {
            writeln!(out)?;
        }
    }

    Ok(())
}
