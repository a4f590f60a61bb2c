//! Common test utilities for reconciler integration tests
//!
//! Provides an in-memory `mc` ([`FakeCluster`]), a closure-driven runner
//! ([`ScriptedRunner`]) and a connectivity check stub.

#![allow(dead_code, reason = "each test binary uses a subset of these helpers")]

use async_trait::async_trait;
use minio_reconciler::config::Settings;
use minio_reconciler::mc::{CommandOutput, CommandRunner, McCommand};
use minio_reconciler::probe::ConnectivityProbe;
use minio_reconciler::AdminError;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ALIAS: &str = "myminio";
pub const ROOT_USER: &str = "minioadmin";

/// Settings pointing at a local cluster, with `overrides` applied on top
pub fn settings_with(overrides: &[(&str, &str)]) -> Settings {
    let mut env: HashMap<String, String> = [
        ("MINIO_ENDPOINT", "http://localhost:9000"),
        ("MINIO_ROOT_USER", ROOT_USER),
        ("MINIO_ROOT_PASSWORD", "minioadmin-secret"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in overrides {
        env.insert((*k).to_string(), (*v).to_string());
    }
    Settings::from_lookup(|key| env.get(key).cloned()).unwrap()
}

pub fn settings() -> Settings {
    settings_with(&[])
}

pub fn success(stdout: &str) -> CommandOutput {
    CommandOutput {
        success: true,
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

pub fn failure(stderr: &str) -> CommandOutput {
    CommandOutput {
        success: false,
        code: Some(1),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

type Handler = Box<dyn Fn(&[String]) -> CommandOutput + Send + Sync>;

/// Runner that answers every call with a closure and records the arguments
pub struct ScriptedRunner {
    handler: Handler,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl ScriptedRunner {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&[String]) -> CommandOutput + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Runner whose every call succeeds with empty output
    pub fn succeeding() -> Self {
        Self::new(|_| success(""))
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &McCommand) -> Result<CommandOutput, AdminError> {
        self.calls.lock().unwrap().push(command.args().to_vec());
        Ok((self.handler)(command.args()))
    }
}

/// Runner whose `mc` binary cannot be started
#[derive(Default)]
pub struct UnstartableRunner {
    attempts: AtomicUsize,
}

impl UnstartableRunner {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandRunner for UnstartableRunner {
    async fn run(&self, _command: &McCommand) -> Result<CommandOutput, AdminError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(AdminError::ToolSpawn {
            program: "/usr/local/bin/mc".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        })
    }
}

/// A service access key held by [`FakeCluster`]
#[derive(Debug, Clone)]
pub struct FakeKey {
    pub access_key: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: String,
}

#[derive(Default)]
struct ClusterState {
    /// Bucket name -> whether it holds objects
    buckets: BTreeMap<String, bool>,
    keys: Vec<FakeKey>,
    /// Argument prefixes that fail with the given stderr
    failures: Vec<(Vec<String>, String)>,
    calls: Vec<Vec<String>>,
    generated: usize,
}

/// In-memory stand-in for `mc` talking to a MinIO cluster
///
/// Interprets the argument vectors the reconcilers issue and keeps buckets
/// and service accounts in memory.
#[derive(Default)]
pub struct FakeCluster {
    state: Mutex<ClusterState>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(self, name: &str) -> Self {
        self.state.lock().unwrap().buckets.insert(name.to_string(), false);
        self
    }

    /// A bucket that `rb` only removes with `--force`
    pub fn with_nonempty_bucket(self, name: &str) -> Self {
        self.state.lock().unwrap().buckets.insert(name.to_string(), true);
        self
    }

    pub fn with_key(self, access_key: &str, name: Option<&str>, description: Option<&str>) -> Self {
        self.state.lock().unwrap().keys.push(FakeKey {
            access_key: access_key.to_string(),
            name: name.map(ToString::to_string),
            description: description.map(ToString::to_string),
            status: "on".to_string(),
        });
        self
    }

    /// Fail every call whose arguments start with `prefix`
    pub fn fail_on(self, prefix: &[&str], stderr: &str) -> Self {
        self.state.lock().unwrap().failures.push((
            prefix.iter().map(ToString::to_string).collect(),
            stderr.to_string(),
        ));
        self
    }

    pub fn bucket_names(&self) -> Vec<String> {
        self.state.lock().unwrap().buckets.keys().cloned().collect()
    }

    pub fn keys(&self) -> Vec<FakeKey> {
        self.state.lock().unwrap().keys.clone()
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of recorded calls whose arguments start with `prefix`
    pub fn count_calls(&self, prefix: &[&str]) -> usize {
        self.calls()
            .iter()
            .filter(|args| starts_with(args, prefix))
            .count()
    }
}

fn starts_with(args: &[String], prefix: &[&str]) -> bool {
    args.len() >= prefix.len() && args.iter().zip(prefix).all(|(a, p)| a == p)
}

/// `myminio/logs/` -> `logs`, `myminio/` -> ``
fn bucket_of(target: &str) -> &str {
    target
        .split_once('/')
        .map_or("", |(_, rest)| rest.trim_end_matches('/'))
}

fn flag<'a>(args: &'a [&'a str], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| *a == name)
        .and_then(|i| args.get(i + 1))
        .copied()
}

impl ClusterState {
    fn handle(&mut self, args: &[&str]) -> CommandOutput {
        match args {
            ["alias", "set", ..] => success(""),
            ["ls", target, "--json"] => {
                let bucket = bucket_of(target);
                if bucket.is_empty() {
                    let lines: Vec<String> = self
                        .buckets
                        .keys()
                        .map(|name| {
                            json!({
                                "status": "success",
                                "type": "folder",
                                "lastModified": "2024-05-01T10:00:00Z",
                                "size": 0,
                                "key": format!("{name}/"),
                            })
                            .to_string()
                        })
                        .collect();
                    success(&lines.join("\n"))
                } else if self.buckets.contains_key(bucket) {
                    success("")
                } else {
                    failure(&format!(
                        "mc: <ERROR> Unable to list folder. Bucket `{bucket}` does not exist."
                    ))
                }
            }
            ["mb", path] => {
                let bucket = bucket_of(path).to_string();
                if self.buckets.contains_key(&bucket) {
                    failure("mc: <ERROR> Unable to make bucket. Your previous request to create the named bucket succeeded and you already own it.")
                } else {
                    self.buckets.insert(bucket, false);
                    success("")
                }
            }
            ["rb", path, rest @ ..] => {
                let bucket = bucket_of(path);
                let force = rest.contains(&"--force");
                match self.buckets.get(bucket).copied() {
                    None => failure("mc: <ERROR> Unable to validate target. Bucket does not exist."),
                    Some(true) if !force => {
                        failure("mc: <ERROR> Failed to remove bucket. The bucket you tried to delete is not empty.")
                    }
                    Some(_) => {
                        self.buckets.remove(bucket);
                        success("")
                    }
                }
            }
            ["admin", "user", "svcacct", "list", _, _, "--json"] => {
                let lines: Vec<String> = self
                    .keys
                    .iter()
                    .map(|k| json!({"status": "success", "accessKey": k.access_key}).to_string())
                    .collect();
                success(&lines.join("\n"))
            }
            ["admin", "user", "svcacct", "info", _, key, "--json"] => {
                match self.keys.iter().find(|k| k.access_key == *key) {
                    Some(k) => success(
                        &json!({
                            "status": "success",
                            "accessKey": k.access_key,
                            "parentUser": ROOT_USER,
                            "accountStatus": k.status,
                            "name": k.name,
                            "description": k.description,
                            "expiration": "1970-01-01T00:00:00Z",
                        })
                        .to_string(),
                    ),
                    None => failure("mc: <ERROR> Unable to get information of the specified service account."),
                }
            }
            ["admin", "user", "svcacct", "add", _, _, rest @ ..] => {
                let access_key = match flag(rest, "--access-key") {
                    Some(key) => key.to_string(),
                    None => {
                        self.generated += 1;
                        format!("GENERATEDKEY{:04}", self.generated)
                    }
                };
                if self.keys.iter().any(|k| k.access_key == access_key) {
                    return failure("mc: <ERROR> Unable to add a new service account. The specified service account already exists.");
                }
                let secret_key = flag(rest, "--secret-key").map_or_else(
                    || format!("generated-secret-for-{access_key}"),
                    ToString::to_string,
                );
                self.keys.push(FakeKey {
                    access_key: access_key.clone(),
                    name: flag(rest, "--name").map(ToString::to_string),
                    description: flag(rest, "--description").map(ToString::to_string),
                    status: "on".to_string(),
                });
                success(
                    &json!({
                        "status": "success",
                        "accessKey": access_key,
                        "secretKey": secret_key,
                        "expiration": "1970-01-01T00:00:00Z",
                    })
                    .to_string(),
                )
            }
            ["admin", "user", "svcacct", "remove", _, key] | ["admin", "accesskey", "remove", _, key] => {
                let before = self.keys.len();
                self.keys.retain(|k| k.access_key != *key);
                if self.keys.len() < before {
                    success("")
                } else {
                    failure("mc: <ERROR> Unable to remove the service account.")
                }
            }
            _ => failure(&format!("mc: <ERROR> unknown command: {}", args.join(" "))),
        }
    }
}

#[async_trait]
impl CommandRunner for FakeCluster {
    async fn run(&self, command: &McCommand) -> Result<CommandOutput, AdminError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(command.args().to_vec());

        if let Some((_, stderr)) = state
            .failures
            .iter()
            .find(|(prefix, _)| command.args().starts_with(prefix))
        {
            return Ok(failure(stderr));
        }

        let args: Vec<&str> = command.args().iter().map(String::as_str).collect();
        Ok(state.handle(&args))
    }
}

/// Probe stub with a fixed answer
#[derive(Default)]
pub struct StubProbe {
    reachable: bool,
    checks: AtomicUsize,
}

impl StubProbe {
    pub fn reachable() -> Self {
        Self {
            reachable: true,
            checks: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectivityProbe for StubProbe {
    async fn check(&self, _settings: &Settings) -> bool {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.reachable
    }
}
