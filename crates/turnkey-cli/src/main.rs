#![warn(clippy::all)]
#![forbid(unsafe_code)]

//! Command-line administration for a Turnkey grant store.
//!
//! The binary speaks the same vocabulary as the library: owners are
//! `Kind:id` pairs, targets are `Kind` or `Kind:id`, and omitting the
//! target addresses the global scope. Backend selection comes from an
//! optional TOML configuration file with per-flag overrides on top.

use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use turnkey::core::{OwnerRef, Scope};
use turnkey::store::{Store, StoreConfig};

/// Turnkey CLI - Grant store administration
#[derive(Parser, Debug)]
#[command(name = "turnkey")]
#[command(about = "Turnkey grant store administration", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "TURNKEY_CONFIG")]
    config: Option<PathBuf>,

    /// Backend to use: memory, document, column or redis
    #[arg(long, env = "TURNKEY_BACKEND")]
    backend: Option<String>,

    /// Data directory for the embedded backends
    #[arg(long, env = "TURNKEY_PATH")]
    path: Option<String>,

    /// Connection URL for the redis backend
    #[arg(long, env = "TURNKEY_URL")]
    url: Option<String>,

    /// Key namespace for the redis backend
    #[arg(long, env = "TURNKEY_NAMESPACE")]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    /// Lays the command-line overrides over a loaded configuration.
    fn apply_to(&self, config: &mut StoreConfig) {
        if let Some(backend) = &self.backend {
            config.backend = backend.clone();
        }
        if let Some(path) = &self.path {
            config.path = Some(path.clone());
        }
        if let Some(url) = &self.url {
            config.url = Some(url.clone());
        }
        if let Some(namespace) = &self.namespace {
            config.namespace = namespace.clone();
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Grant a role to an owner
    Set {
        /// Role name
        role: String,
        /// Owner as `Kind:id`
        owner: String,
        /// Target as `Kind` or `Kind:id`; omit for a global grant
        #[arg(short, long)]
        target: Option<String>,
    },
    /// Check whether an owner holds a role; exits 1 when it does not
    Check {
        /// Role name
        role: String,
        /// Owner as `Kind:id`
        owner: String,
        /// Target as `Kind` or `Kind:id`; omit for the global scope
        #[arg(short, long)]
        target: Option<String>,
    },
    /// Revoke a role from an owner
    Delete {
        /// Role name
        role: String,
        /// Owner as `Kind:id`
        owner: String,
        /// Target as `Kind` or `Kind:id`; omit for the global grant
        #[arg(short, long)]
        target: Option<String>,
    },
    /// List roles held by an owner, or every role in the store
    Roles {
        /// Owner as `Kind:id`; omit for the store-wide list
        owner: Option<String>,
    },
    /// Remove every grant from the store
    Clear {
        /// Confirm the destructive operation
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let store = open_store(&args).await?;
    let code = run(args.command, &store).await?;
    Ok(ExitCode::from(code))
}

/// Executes one subcommand against an open store and reports the
/// process exit code.
async fn run(command: Command, store: &Store) -> Result<u8> {
    match command {
        Command::Set { role, owner, target } => {
            let target = parse_target(target.as_deref())?;
            let suffix = scope_suffix(&target);
            store
                .grantee_ref(parse_owner(&owner)?)
                .grant_on(&role, target)
                .await?;
            println!("granted '{role}' to '{owner}'{suffix}");
            Ok(0)
        }
        Command::Check { role, owner, target } => {
            let target = parse_target(target.as_deref())?;
            let held = store
                .grantee_ref(parse_owner(&owner)?)
                .has_on(&role, target)
                .await?;
            println!("{held}");
            Ok(if held { 0 } else { 1 })
        }
        Command::Delete { role, owner, target } => {
            let target = parse_target(target.as_deref())?;
            let suffix = scope_suffix(&target);
            store
                .grantee_ref(parse_owner(&owner)?)
                .revoke_on(&role, target)
                .await?;
            println!("revoked '{role}' from '{owner}'{suffix}");
            Ok(0)
        }
        Command::Roles { owner } => {
            let roles = match owner {
                Some(owner) => store.grantee_ref(parse_owner(&owner)?).roles().await?,
                None => store.roles().await?,
            };
            for role in roles {
                println!("{role}");
            }
            Ok(0)
        }
        Command::Clear { force } => {
            if !force {
                anyhow::bail!("refusing to remove every grant without --force");
            }
            store.clear().await?;
            println!("store cleared");
            Ok(0)
        }
    }
}

/// Builds the store from the configuration file and flag overrides.
async fn open_store(args: &Args) -> Result<Store> {
    let mut config = load_config(args.config.as_deref())?;
    args.apply_to(&mut config);
    let store = Store::open(&config).await?;
    Ok(store)
}

/// Reads a `StoreConfig` from a TOML file, or starts from the defaults
/// when no file was given.
fn load_config(path: Option<&Path>) -> Result<StoreConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading configuration {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("parsing configuration {}", path.display()))
        }
        None => Ok(StoreConfig::default()),
    }
}

fn parse_owner(raw: &str) -> Result<OwnerRef> {
    raw.parse().with_context(|| format!("invalid owner '{raw}'"))
}

fn parse_target(raw: Option<&str>) -> Result<Scope> {
    match raw {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid target '{raw}'")),
        None => Ok(Scope::Global),
    }
}

/// Renders the ` on '...'` tail of a status line; empty for the global
/// scope.
fn scope_suffix(scope: &Scope) -> String {
    if scope.is_global() {
        String::new()
    } else {
        format!(" on '{scope}'")
    }
}

// ============================================================================
// Tests
// ============================================================================
