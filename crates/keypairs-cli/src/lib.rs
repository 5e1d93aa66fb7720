// ABOUTME: Library half of the keypairs CLI: config resolution, store setup, and dispatch
// ABOUTME: Commands are generic over the store so they run against memory in tests

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use keypairs_core::{Config, KeypairService, KeypairStore, SqliteKeypairStore};

pub mod commands;

pub use commands::{Cli, Command};

/// Load config (arg or env already folded in by clap, else the default path)
/// and pick the database path (`--db` beats `[database] path`).
pub fn resolve(config: Option<PathBuf>, db: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let config = Config::load_or_default(config.as_deref()).context("Failed to load config")?;
    let db_path = db.unwrap_or_else(|| config.database.resolved_path());
    Ok((config, db_path))
}

/// Run a parsed command against the configured SQLite store, writing to stdout.
pub async fn run(cli: Cli) -> Result<()> {
    let Some(user) = cli.user else {
        bail!("No user given. Set KEYPAIRS_USER environment variable or use --user flag.");
    };

    let (config, db_path) = resolve(cli.config, cli.db)?;
    debug!(db = %db_path.display(), "Opening keypair store");
    let store = SqliteKeypairStore::open(&db_path)
        .await
        .with_context(|| format!("Failed to open keypair store at {}", db_path.display()))?;

    let service = KeypairService::from_config(store, &config).context("Invalid config")?;

    let mut stdout = std::io::stdout().lock();
    let result = execute(&service, &user, cli.command, cli.json, &mut stdout).await;
    service.store().close().await;
    result
}

/// Dispatch one command for `user_id`.
pub async fn execute<S: KeypairStore>(
    service: &KeypairService<S>,
    user_id: &str,
    command: Command,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Create {
            name,
            public_key_file,
            key_type,
        } => {
            commands::create::run(service, user_id, name, public_key_file, key_type, json, out)
                .await
        }
        Command::List => commands::list::run(service, user_id, json, out).await,
        Command::Show { name } => commands::show::run(service, user_id, &name, json, out).await,
        Command::Delete { name } => commands::delete::run(service, user_id, &name, json, out).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keypairs_core::{KeypairError, MemoryKeypairStore, QuotaConfig, QuotaGuard};
    use tempfile::TempDir;

    fn service() -> KeypairService<MemoryKeypairStore> {
        colored::control::set_override(false);
        KeypairService::new(
            MemoryKeypairStore::new(),
            QuotaGuard::new(QuotaConfig::default()),
        )
    }

    async fn output<S: KeypairStore>(
        svc: &KeypairService<S>,
        command: Command,
        json: bool,
    ) -> Result<String> {
        let mut buf = Vec::new();
        execute(svc, "alice", command, json, &mut buf).await?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[tokio::test]
    async fn create_prints_private_key_once() {
        let svc = service();
        let text = output(
            &svc,
            Command::Create {
                name: "laptop".into(),
                public_key_file: None,
                key_type: None,
            },
            false,
        )
        .await
        .unwrap();
        assert!(text.contains("Keypair created"));
        assert!(text.contains("BEGIN OPENSSH PRIVATE KEY"));

        let shown = output(&svc, Command::Show { name: "laptop".into() }, false)
            .await
            .unwrap();
        assert!(shown.contains("ssh-ed25519 "));
        assert!(!shown.contains("PRIVATE KEY"));
    }

    #[tokio::test]
    async fn create_with_explicit_type() {
        let svc = service();
        let json = output(
            &svc,
            Command::Create {
                name: "ec".into(),
                public_key_file: None,
                key_type: Some("ecdsa".into()),
            },
            true,
        )
        .await
        .unwrap();
        let body: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(body["keypair"]["public_key"]
            .as_str()
            .unwrap()
            .starts_with("ecdsa-sha2-nistp256 "));
    }

    #[tokio::test]
    async fn unknown_type_is_an_error() {
        let err = output(
            &service(),
            Command::Create {
                name: "k".into(),
                public_key_file: None,
                key_type: Some("ssh-dss".into()),
            },
            false,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("ssh-dss"));
    }

    #[tokio::test]
    async fn import_from_file_has_no_private_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("id.pub");
        let generated = keypairs_core::KeypairService::new(
            MemoryKeypairStore::new(),
            QuotaGuard::new(QuotaConfig::default()),
        )
        .create("tmp", "tmp", None)
        .await
        .unwrap();
        std::fs::write(&path, format!("{}\n", generated.keypair.public_key)).unwrap();

        let svc = service();
        let json = output(
            &svc,
            Command::Create {
                name: "imported".into(),
                public_key_file: Some(path),
                key_type: None,
            },
            true,
        )
        .await
        .unwrap();
        let body: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            body["keypair"]["fingerprint"],
            generated.keypair.fingerprint.as_str()
        );
        assert!(body["keypair"].get("private_key").is_none());
    }

    #[tokio::test]
    async fn missing_key_file_is_an_error() {
        let result = output(
            &service(),
            Command::Create {
                name: "k".into(),
                public_key_file: Some(PathBuf::from("/nonexistent/id.pub")),
                key_type: None,
            },
            false,
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn list_and_delete() {
        let svc = service();
        assert!(output(&svc, Command::List, false)
            .await
            .unwrap()
            .contains("No keypairs found"));

        svc.create("alice", "a", None).await.unwrap();
        svc.create("alice", "b", None).await.unwrap();

        let json = output(&svc, Command::List, true).await.unwrap();
        let body: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(body["keypairs"].as_array().unwrap().len(), 2);

        let text = output(&svc, Command::Delete { name: "a".into() }, false)
            .await
            .unwrap();
        assert!(text.contains("Keypair deleted: a"));
        assert!(output(&svc, Command::List, false)
            .await
            .unwrap()
            .contains("Keypairs (1)"));
    }

    #[tokio::test]
    async fn delete_missing_surfaces_not_found() {
        let err = output(&service(), Command::Delete { name: "nope".into() }, false)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<KeypairError>(),
            Some(KeypairError::NotFound { .. })
        ));
    }

    #[test]
    fn db_flag_overrides_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "[database]\npath = \"/from/config.db\"\n").unwrap();

        let (_, from_config) = resolve(Some(config_path.clone()), None).unwrap();
        assert_eq!(from_config, PathBuf::from("/from/config.db"));

        let (_, from_flag) = resolve(Some(config_path), Some(PathBuf::from("/flag.db"))).unwrap();
        assert_eq!(from_flag, PathBuf::from("/flag.db"));
    }

    #[tokio::test]
    async fn runs_against_sqlite() {
        let dir = TempDir::new().unwrap();
        let store = SqliteKeypairStore::open(&dir.path().join("keypairs.db"))
            .await
            .unwrap();
        let svc = KeypairService::new(store, QuotaGuard::new(QuotaConfig::default()));

        output(
            &svc,
            Command::Create {
                name: "disk".into(),
                public_key_file: None,
                key_type: None,
            },
            false,
        )
        .await
        .unwrap();
        let shown = output(&svc, Command::Show { name: "disk".into() }, true)
            .await
            .unwrap();
        assert!(shown.contains("\"name\": \"disk\""));
    }
}
