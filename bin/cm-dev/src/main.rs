//! Cloudmock Development Binary
//!
//! Builds a Resource Directory from configuration, seeds it with fixtures
//! and prints the resulting snapshot as JSON.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use cm_config::{AppConfig, ConfigLoader, DirectorySettings, FixtureSettings, IdAssignmentSetting};
use cm_directory::{Directory, DirectoryOptions, FixturePlan, IdAssignment};

#[derive(Parser, Debug)]
#[command(name = "cm-dev")]
#[command(about = "Cloudmock Development Binary - seeded Resource Directory snapshots")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, env = "CLOUDMOCK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed a directory from the configured fixture counts and print it
    Seed {
        /// Overrides directory.seed for this run
        #[arg(long)]
        seed: Option<u64>,

        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print an example configuration file
    ExampleConfig,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(Command::ExampleConfig) = args.command {
        print!("{}", AppConfig::example_toml());
        return Ok(());
    }

    cm_common::logging::init_logging("cm-dev");

    let loader = match &args.config {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;

    let (seed, compact) = match args.command {
        Some(Command::Seed { seed, compact }) => (seed, compact),
        _ => (None, false),
    };

    let mut options = directory_options(&config.directory);
    if seed.is_some() {
        options.seed = seed;
    }
    info!(id_assignment = ?options.id_assignment, seed = ?options.seed, "Starting Cloudmock directory");

    let mut directory = Directory::with_options(options);
    let report = fixture_plan(&config.fixtures).apply(&mut directory)?;
    info!(?report, "Fixtures applied");

    let snapshot = directory.snapshot();
    let json = if compact {
        serde_json::to_string(&snapshot)?
    } else {
        serde_json::to_string_pretty(&snapshot)?
    };
    println!("{}", json);

    Ok(())
}

fn directory_options(settings: &DirectorySettings) -> DirectoryOptions {
    DirectoryOptions {
        id_assignment: match settings.id_assignment {
            IdAssignmentSetting::CollectionLength => IdAssignment::CollectionLength,
            IdAssignmentSetting::Monotonic => IdAssignment::Monotonic,
        },
        login_prefix: settings.login_prefix.clone(),
        policy_token_placeholder: settings.policy_token_placeholder.clone(),
        credential_suffix_max: settings.credential_suffix_max,
        seed: settings.seed,
    }
}

fn fixture_plan(settings: &FixtureSettings) -> FixturePlan {
    FixturePlan {
        service_accounts: settings.service_accounts,
        tokens_per_service_account: settings.tokens_per_service_account,
        cloud_api_keys: settings.cloud_api_keys,
        access_policies: settings.access_policies,
        tokens_per_access_policy: settings.tokens_per_access_policy,
        key_prefix: settings.key_prefix.clone(),
        policy_prefix: settings.policy_prefix.clone(),
        region: settings.region.clone(),
    }
}
