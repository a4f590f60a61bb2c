//! # mc Commands
//!
//! Argument vectors for every `mc` invocation the reconciler issues.
//!
//! Secret arguments (root password, supplied secret keys) are tracked by
//! position and masked whenever a command is displayed or logged.

use std::fmt;

/// One `mc` invocation
#[derive(Clone, PartialEq, Eq)]
pub struct McCommand {
    args: Vec<String>,
    secret_indexes: Vec<usize>,
}

impl McCommand {
    fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            secret_indexes: Vec::new(),
        }
    }

    fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secret_indexes.push(self.args.len());
        self.args.push(arg.into());
        self
    }

    fn flag_value(self, flag: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.arg(flag).arg(value),
            None => self,
        }
    }

    /// Raw arguments passed to the binary (secrets unmasked)
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether any argument holds a secret
    #[must_use]
    pub fn has_secrets(&self) -> bool {
        !self.secret_indexes.is_empty()
    }

    /// `mc alias set <alias> <endpoint> <user> <password>`
    #[must_use]
    pub fn alias_set(alias: &str, endpoint: &str, user: &str, password: &str) -> Self {
        Self::new(["alias", "set", alias, endpoint, user]).secret_arg(password)
    }

    /// `mc ls <target> --json`
    #[must_use]
    pub fn list_json(target: &str) -> Self {
        Self::new(["ls", target, "--json"])
    }

    /// `mc mb <alias>/<bucket>`
    #[must_use]
    pub fn make_bucket(alias: &str, bucket: &str) -> Self {
        Self::new(["mb".to_string(), bucket_path(alias, bucket)])
    }

    /// `mc rb <alias>/<bucket> [--force]`
    #[must_use]
    pub fn remove_bucket(alias: &str, bucket: &str, force: bool) -> Self {
        let command = Self::new(["rb".to_string(), bucket_path(alias, bucket)]);
        if force {
            command.arg("--force")
        } else {
            command
        }
    }

    /// `mc admin user svcacct list <alias>/ <root-user> --json`
    #[must_use]
    pub fn service_account_list(alias: &str, root_user: &str) -> Self {
        Self::new(["admin", "user", "svcacct", "list"])
            .arg(alias_root(alias))
            .arg(root_user)
            .arg("--json")
    }

    /// `mc admin user svcacct info <alias>/ <access-key> --json`
    #[must_use]
    pub fn service_account_info(alias: &str, access_key: &str) -> Self {
        Self::new(["admin", "user", "svcacct", "info"])
            .arg(alias_root(alias))
            .arg(access_key)
            .arg("--json")
    }

    /// `mc admin user svcacct add <alias>/ <root-user> [--access-key K] [--secret-key S] --name N [--description D] --json`
    #[must_use]
    pub fn service_account_add(alias: &str, root_user: &str, request: &ServiceAccountAdd<'_>) -> Self {
        let command = Self::new(["admin", "user", "svcacct", "add"])
            .arg(alias_root(alias))
            .arg(root_user)
            .flag_value("--access-key", request.access_key);
        let command = match request.secret_key {
            Some(secret) => command.arg("--secret-key").secret_arg(secret),
            None => command,
        };
        command
            .arg("--name")
            .arg(request.name)
            .flag_value("--description", request.description)
            .arg("--json")
    }
}

impl fmt::Display for McCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("mc")?;
        for (i, arg) in self.args.iter().enumerate() {
            if self.secret_indexes.contains(&i) {
                f.write_str(" ***")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for McCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("McCommand").field(&self.to_string()).finish()
    }
}

/// Fields of a `svcacct add` call, with the name already resolved
#[derive(Debug, Clone, Copy)]
pub struct ServiceAccountAdd<'a> {
    pub access_key: Option<&'a str>,
    pub secret_key: Option<&'a str>,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// Access-key removal commands, tried in [`RemovalCommand::ORDER`]
///
/// `mc` renamed the removal subcommand between releases; either may be the
/// one the installed binary understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalCommand {
    /// `mc admin user svcacct remove <alias>/ <key>`
    ServiceAccount,
    /// `mc admin accesskey remove <alias>/ <key>`
    LegacyAccessKey,
}

impl RemovalCommand {
    pub const ORDER: [RemovalCommand; 2] =
        [RemovalCommand::ServiceAccount, RemovalCommand::LegacyAccessKey];

    #[must_use]
    pub fn command(self, alias: &str, access_key: &str) -> McCommand {
        let prefix: &[&str] = match self {
            RemovalCommand::ServiceAccount => &["admin", "user", "svcacct", "remove"],
            RemovalCommand::LegacyAccessKey => &["admin", "accesskey", "remove"],
        };
        McCommand::new(prefix.iter().copied())
            .arg(alias_root(alias))
            .arg(access_key)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RemovalCommand::ServiceAccount => "svcacct remove",
            RemovalCommand::LegacyAccessKey => "accesskey remove",
        }
    }
}

/// `<alias>/`
#[must_use]
pub fn alias_root(alias: &str) -> String {
    format!("{alias}/")
}

/// `<alias>/<bucket>`
#[must_use]
pub fn bucket_path(alias: &str, bucket: &str) -> String {
    format!("{alias}/{bucket}")
}

/// `<alias>/<bucket>/`, the target used for bucket existence checks
#[must_use]
pub fn bucket_root(alias: &str, bucket: &str) -> String {
    format!("{alias}/{bucket}/")
}
