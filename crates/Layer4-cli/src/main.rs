//! Liberstatus CLI - USSD 단말 에뮬레이터

mod init;
mod terminal;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use parish_core::{DataStore, MemoryStore};
use parish_foundation::{Catalog, JsonStore, ParishConfig, User};
use parish_ussd::UssdService;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "parish")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Parish data file (default: .parish/<dataFile>)
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Use the built-in sample parish (nothing is saved)
    #[arg(long)]
    demo: bool,

    /// Sign in as this user (id or username)
    #[arg(short, long)]
    user: Option<String>,

    /// Message catalog override (JSON)
    #[arg(long, value_name = "FILE")]
    locale: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Write the sample parish into the project data file
    Init {
        /// Overwrite existing data
        #[arg(short, long)]
        force: bool,
    },
    /// List sign-in identities
    Users,
    /// Run the USSD handset emulator (default)
    Ussd,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = ParishConfig::load().context("Failed to load configuration")?;

    match &args.command {
        Some(Command::Init { force }) => {
            let (store, filename) = data_location(&args, &config)?;
            init::init_project(&store, &filename, *force)
        }
        Some(Command::Users) => {
            let store = open_store(&args, &config)?;
            list_users(&store);
            Ok(())
        }
        Some(Command::Ussd) | None => {
            let mut store = open_store(&args, &config)?;
            let catalog = load_catalog(&args, &config)?;
            let user = sign_in(&args, &config, &store)?;
            let service = UssdService::new(config.ussd.clone());

            tracing::info!(user = %user.id, username = %user.username, "Signed in");
            let stdin = std::io::stdin();
            terminal::run(
                &service,
                &user,
                &mut store,
                &catalog,
                stdin.lock(),
                std::io::stdout(),
            )?;
            Ok(())
        }
    }
}

// ============================================================================
// Setup
// ============================================================================

/// 데이터 파일 위치 (저장소 + 파일명)
fn data_location(args: &Args, config: &ParishConfig) -> anyhow::Result<(JsonStore, String)> {
    match &args.data {
        Some(path) => {
            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .with_context(|| format!("Invalid data file: {}", path.display()))?
                .to_string();
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            Ok((JsonStore::new(dir), filename))
        }
        None => Ok((JsonStore::current_project()?, config.data_file().to_string())),
    }
}

fn open_store(args: &Args, config: &ParishConfig) -> anyhow::Result<MemoryStore> {
    if args.demo {
        tracing::info!("Using sample parish data (demo mode)");
        return Ok(MemoryStore::sample());
    }

    let (store, filename) = data_location(args, config)?;
    if !store.exists(&filename) {
        bail!(
            "No parish data at {}. Run `parish init` or pass --demo.",
            store.file_path(&filename).display()
        );
    }
    let path = store.file_path(&filename);
    MemoryStore::open(store, filename)
        .with_context(|| format!("Failed to load parish data from {}", path.display()))
}

fn load_catalog(args: &Args, config: &ParishConfig) -> anyhow::Result<Catalog> {
    let mut catalog = Catalog::english();
    let override_path: Option<&Path> = args
        .locale
        .as_deref()
        .or(config.locale_file.as_deref());

    if let Some(path) = override_path {
        catalog.merge(Catalog::load(path)?);
    }
    Ok(catalog)
}

/// --user 또는 defaultUser로 로그인 (id 또는 username)
fn sign_in(args: &Args, config: &ParishConfig, store: &MemoryStore) -> anyhow::Result<User> {
    let Some(wanted) = args.user.as_deref().or(config.default_user.as_deref()) else {
        bail!("No user selected. Pass --user <ID> (see `parish users`).");
    };

    store
        .users()
        .iter()
        .find(|user| user.id == wanted || user.username == wanted)
        .cloned()
        .with_context(|| format!("Unknown user: {} (see `parish users`)", wanted))
}

// ============================================================================
// Users
// ============================================================================

fn list_users(store: &MemoryStore) {
    let users = store.users();
    if users.is_empty() {
        println!("No users found.");
        return;
    }

    println!("{:<12} {:<20} {:<16} {:<12}", "ID", "Username", "Role", "Territory");
    println!("{}", "-".repeat(64));
    for user in users {
        println!(
            "{:<12} {:<20} {:<16} {:<12}",
            user.id,
            user.username,
            format!("{:?}", user.role),
            if user.highest_level_territory_id.is_empty() {
                "-"
            } else {
                user.highest_level_territory_id.as_str()
            }
        );
    }
    println!("\nUse 'parish --user <ID>' to sign in.");
}
