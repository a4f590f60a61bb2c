//! # Bucket Manager
//!
//! Creates, lists, inspects and deletes the buckets declared in
//! `MINIO_BUCKETS`.
//!
//! ## Usage
//!
//! ```bash
//! # Declared-bucket status followed by the full bucket listing
//! bucket-manager
//!
//! # Create every declared bucket that does not exist yet
//! bucket-manager --create
//!
//! # Delete a bucket, including its contents
//! bucket-manager --delete logs --force
//! ```
//!
//! When several actions are given, `--create` wins over `--list`, which wins
//! over `--status`, which wins over `--delete`.

use anyhow::{Context, Result};
use clap::Parser;
use minio_reconciler::config::BucketSettings;
use minio_reconciler::display::buckets::{bucket_table, status_table};
use minio_reconciler::initialization::initialize;
use minio_reconciler::logging::init_tracing;
use minio_reconciler::mc::McRunner;
use minio_reconciler::probe::S3Probe;
use minio_reconciler::reconciler::{BucketReconciler, DeleteOutcome};
use minio_reconciler::{BUILD_DATETIME, BUILD_GIT_HASH};
use std::process::ExitCode;
use tracing::info;

/// MinIO bucket management tool
#[derive(Parser)]
#[command(name = "bucket-manager")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")"),
    about = "MinIO bucket management tool",
    long_about = None,
    after_help = "\
Environment:
  MINIO_ENDPOINT, MINIO_ROOT_USER, MINIO_ROOT_PASSWORD, MINIO_BUCKETS (required)
  MINIO_ALIAS, MINIO_MC_PATH, LOG_LEVEL, LOG_FORMAT (optional)

Without an action flag, the declared-bucket status and the bucket listing are shown.
"
)]
struct Cli {
    /// Create every bucket declared in MINIO_BUCKETS
    #[arg(long)]
    create: bool,

    /// List all buckets
    #[arg(long)]
    list: bool,

    /// Show whether each declared bucket exists
    #[arg(long)]
    status: bool,

    /// Delete the named bucket
    #[arg(long, value_name = "BUCKET")]
    delete: Option<String>,

    /// Remove the bucket even when it is not empty (with --delete)
    #[arg(long)]
    force: bool,
}

enum Action {
    Create,
    List,
    Status,
    Delete { name: String, force: bool },
    Overview,
}

impl Cli {
    fn action(self) -> Action {
        if self.create {
            Action::Create
        } else if self.list {
            Action::List
        } else if self.status {
            Action::Status
        } else if let Some(name) = self.delete {
            Action::Delete {
                name,
                force: self.force,
            }
        } else {
            Action::Overview
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
    let config = BucketSettings::from_env()
        .context("Failed to load configuration (check your .env file)")?;
    let settings = &config.settings;
    init_tracing("bucket_manager", &settings.log_level, settings.log_format);
    info!(
        "bucket-manager {} (git: {}, built: {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_GIT_HASH,
        BUILD_DATETIME
    );

    println!("🔧 Configuration:");
    println!("   Endpoint: {}", settings.endpoint);
    println!("   Alias: {}", settings.alias);
    println!("   Declared buckets: {}", config.buckets.join(", "));

    let runner = McRunner::from_settings(settings)
        .context("The MinIO client (mc) is required; set MINIO_MC_PATH or add it to PATH")?;
    initialize(settings, &S3Probe, &runner, &config.buckets)
        .await
        .context("Initialization failed")?;

    let reconciler = BucketReconciler::new(&runner, settings.alias.clone(), config.buckets.clone());

    let ok = match cli.action() {
        Action::Create => {
            let report = reconciler.create_declared().await;
            println!(
                "\n📊 Created {}/{} declared buckets",
                report.succeeded(),
                report.total()
            );
            for (name, error) in report.failures() {
                println!("   ❌ {name}: {error}");
            }
            report.is_complete()
        }
        Action::List => {
            print!("{}", bucket_table(&reconciler.list().await));
            true
        }
        Action::Status => {
            print!("{}", status_table(&reconciler.status_report().await));
            true
        }
        Action::Delete { name, force } => match reconciler.delete(&name, force).await {
            Ok(DeleteOutcome::Deleted) => {
                println!("✅ Bucket '{name}' deleted");
                true
            }
            Ok(DeleteOutcome::AlreadyAbsent) => {
                println!("⚠️  Bucket '{name}' does not exist");
                true
            }
            Err(e) => {
                println!("❌ Failed to delete bucket '{name}'");
                if let Some(stderr) = e.tool_stderr() {
                    println!("   Error: {stderr}");
                }
                false
            }
        },
        Action::Overview => {
            print!("{}", status_table(&reconciler.status_report().await));
            print!("{}", bucket_table(&reconciler.list().await));
            true
        }
    };

    Ok(ok)
}
