//! # Access Key Manager
//!
//! Creates, lists, inspects and deletes service access keys owned by the
//! MinIO root user.
//!
//! ## Usage
//!
//! ```bash
//! # List access keys (default)
//! access-key-manager
//!
//! # Create a key with generated credentials
//! access-key-manager --create --name ci --description "CI uploads"
//!
//! # Create a key with caller-supplied credentials
//! access-key-manager --create --access-key CIKEY --secret-key ...
//!
//! # Show or delete one key
//! access-key-manager --info CIKEY
//! access-key-manager --delete CIKEY
//! ```
//!
//! When several actions are given, `--create` wins over `--list`, which wins
//! over `--delete`, which wins over `--info`.

use anyhow::{Context, Result};
use clap::Parser;
use minio_reconciler::config::Settings;
use minio_reconciler::display::access_keys::{
    access_key_detail, access_key_table, created_access_key,
};
use minio_reconciler::initialization::initialize;
use minio_reconciler::logging::init_tracing;
use minio_reconciler::mc::McRunner;
use minio_reconciler::probe::S3Probe;
use minio_reconciler::reconciler::{AccessKeyReconciler, DeleteOutcome, NewAccessKey};
use minio_reconciler::{BUILD_DATETIME, BUILD_GIT_HASH};
use std::process::ExitCode;
use tracing::info;
use zeroize::Zeroizing;

/// MinIO service access key management tool
#[derive(Parser)]
#[command(name = "access-key-manager")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")"),
    about = "MinIO service access key management tool",
    long_about = None,
    after_help = "\
Environment:
  MINIO_ENDPOINT, MINIO_ROOT_USER, MINIO_ROOT_PASSWORD (required)
  MINIO_ALIAS, MINIO_ACCESS_KEY_NAME, MINIO_MC_PATH, LOG_LEVEL, LOG_FORMAT (optional)

Without an action flag, the access keys are listed.
"
)]
struct Cli {
    /// Create a service access key
    #[arg(long)]
    create: bool,

    /// List service access keys
    #[arg(long)]
    list: bool,

    /// Delete the given access key
    #[arg(long, value_name = "ACCESS_KEY")]
    delete: Option<String>,

    /// Show details of the given access key
    #[arg(long, value_name = "ACCESS_KEY")]
    info: Option<String>,

    /// Access key to use (with --create); generated when omitted
    #[arg(long)]
    access_key: Option<String>,

    /// Secret key to use (with --create); generated when omitted
    #[arg(long)]
    secret_key: Option<String>,

    /// Key name (with --create); defaults to MINIO_ACCESS_KEY_NAME
    #[arg(long)]
    name: Option<String>,

    /// Key description (with --create)
    #[arg(long)]
    description: Option<String>,
}

enum Action {
    Create(NewAccessKey),
    List,
    Delete(String),
    Info(String),
}

/// An empty flag value counts as not supplied
fn given(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl Cli {
    fn action(self) -> Action {
        if self.create {
            Action::Create(NewAccessKey {
                access_key: given(self.access_key),
                secret_key: given(self.secret_key).map(Zeroizing::new),
                name: given(self.name),
                description: given(self.description),
            })
        } else if self.list {
            Action::List
        } else if let Some(key) = self.delete {
            Action::Delete(key)
        } else if let Some(key) = self.info {
            Action::Info(key)
        } else {
            Action::List
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tokio::select! {
        result = run(cli) => match result {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(e) => {
                eprintln!("❌ {e:#}");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\n⏹️  Interrupted");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the selected operation failed
async fn run(cli: Cli) -> Result<bool> {
    let settings =
        Settings::from_env().context("Failed to load configuration (check your .env file)")?;
    init_tracing("access_key_manager", &settings.log_level, settings.log_format);
    info!(
        "access-key-manager {} (git: {}, built: {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_GIT_HASH,
        BUILD_DATETIME
    );

    println!("🔧 Configuration:");
    println!("   Endpoint: {}", settings.endpoint);
    println!("   Alias: {}", settings.alias);
    println!("   Root user: {}", settings.root_user);

    let runner = McRunner::from_settings(&settings)
        .context("The MinIO client (mc) is required; set MINIO_MC_PATH or add it to PATH")?;
    initialize(&settings, &S3Probe, &runner, &[])
        .await
        .context("Initialization failed")?;

    let reconciler = AccessKeyReconciler::new(
        &runner,
        settings.alias.clone(),
        settings.root_user.clone(),
        settings.access_key_fallback_name.clone(),
    );

    let ok = match cli.action() {
        Action::Create(request) => match reconciler.create(&request).await {
            Ok(Some(created)) => {
                print!("{}", created_access_key(&created, request.name.as_deref()));
                true
            }
            Ok(None) => {
                println!(
                    "ℹ️  Access key '{}' already exists; nothing created",
                    request.access_key.as_deref().unwrap_or_default()
                );
                true
            }
            Err(e) => {
                println!("❌ Failed to create access key");
                if let Some(stderr) = e.tool_stderr() {
                    println!("   Error: {stderr}");
                }
                false
            }
        },
        Action::List => {
            print!("{}", access_key_table(&reconciler.list().await));
            true
        }
        Action::Delete(key) => match reconciler.delete(&key).await {
            Ok(DeleteOutcome::Deleted) => {
                println!("✅ Access key '{key}' deleted");
                true
            }
            Ok(DeleteOutcome::AlreadyAbsent) => {
                println!("⚠️  Access key '{key}' does not exist");
                true
            }
            Err(e) => {
                println!("❌ Failed to delete access key '{key}'");
                if let Some(stderr) = e.tool_stderr() {
                    println!("   Error: {stderr}");
                }
                false
            }
        },
        Action::Info(key) => match reconciler.detail(&key).await {
            Some(found) => {
                print!("{}", access_key_detail(&found));
                true
            }
            None => {
                println!("❌ Access key '{key}' not found");
                false
            }
        },
    };

    Ok(ok)
}
