//! Addressable Versioning CLI
//!
//! Command-line interface for comparing versions, checking bundle
//! compatibility and stamping manifests before a content build.

use addressable_versioning::{
    AddressableGate, Comparison, ManifestStore, StampOptions, VersionDependenceConfig,
    compare_versions, load_groups, stamp_groups,
};
use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "addressable-version")]
#[command(about = "Version manifests and compatibility checks for addressable bundles")]
#[command(version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two version strings
    Compare {
        /// Left-hand version
        a: String,
        /// Right-hand version
        b: String,
    },

    /// Check every required bundle against the discovered manifests
    Check {
        /// Version dependence configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Host version to check with instead of the configured app version
        #[arg(long)]
        host_version: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        format: OutputFormat,
    },

    /// Stamp manifests of the given content groups before a build
    Stamp {
        /// Version dependence configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// YAML list of content groups and their asset GUIDs
        #[arg(short, long)]
        groups: PathBuf,

        /// Set every minimum host version to the configured app version
        #[arg(long)]
        refresh_min_host: bool,
    },

    /// Remove requirements for bundles that have no manifest anymore
    Prune {
        /// Version dependence configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Summary,
    Yaml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compare { a, b } => compare_command(&a, &b),
        Commands::Check {
            config,
            host_version,
            format,
        } => check_command(&config, host_version, format),
        Commands::Stamp {
            config,
            groups,
            refresh_min_host,
        } => stamp_command(&config, &groups, refresh_min_host),
        Commands::Prune { config } => prune_command(&config),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn compare_command(a: &str, b: &str) -> Result<()> {
    let symbol = match compare_versions(a, b)? {
        Comparison::Equal => "==",
        Comparison::Less => "<",
        Comparison::Greater => ">",
        Comparison::Incomparable => "<>",
    };
    println!("{} {} {}", a, symbol, b);
    Ok(())
}

fn load_config(path: &Path) -> Result<(VersionDependenceConfig, PathBuf)> {
    let config = VersionDependenceConfig::load(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    let config_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok((config, config_dir))
}

fn check_command(path: &Path, host_version: Option<String>, format: OutputFormat) -> Result<()> {
    let (mut config, config_dir) = load_config(path)?;
    if let Some(host_version) = host_version {
        config.app_version = host_version;
    }
    config.validate()?;

    let gate = AddressableGate::from_config(&config, &config_dir);
    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(gate.check_available())?;

    match format {
        OutputFormat::Summary => {
            println!("Host version: {}", config.app_version);
            for (bundle, status) in report.iter() {
                let mark = if status.is_compatible() { "✓" } else { "✗" };
                println!("  {} {}: {}", mark, bundle, status);
            }
        }
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(report.as_ref())?),
    }

    let blocked = report.blocked().count();
    if blocked > 0 {
        bail!("{} of {} bundles are not compatible", blocked, report.len());
    }
    Ok(())
}

fn stamp_command(path: &Path, groups_path: &Path, refresh_min_host: bool) -> Result<()> {
    let (mut config, config_dir) = load_config(path)?;
    let groups = load_groups(groups_path)
        .with_context(|| format!("Failed to load groups {}", groups_path.display()))?;
    let store = ManifestStore::new(config.manifest_dir(&config_dir));

    let options = StampOptions {
        built_at: Utc::now(),
        refresh_minimum_host_version: refresh_min_host,
    };
    let summary = stamp_groups(&mut config, &store, &groups, &options)?;

    for manifest in &summary.stamped {
        println!("  {} {}", manifest.name, manifest.full_version);
    }
    for group in &summary.created {
        println!("  + created manifest for {}", group);
    }
    for bundle in &summary.pruned {
        println!("  - pruned dependency {}", bundle);
    }

    if !summary.pruned.is_empty() {
        config.save(path)?;
        info!(path = %path.display(), "Saved pruned config");
    }
    Ok(())
}

fn prune_command(path: &Path) -> Result<()> {
    let (mut config, config_dir) = load_config(path)?;
    let store = ManifestStore::new(config.manifest_dir(&config_dir));
    let discovery = store.discover()?;

    // Unreadable manifests still count as present
    let broken = discovery
        .failures
        .iter()
        .filter_map(|(path, _)| path.file_stem().and_then(|stem| stem.to_str()));
    let known = discovery.manifests.iter().map(|m| m.name.as_str()).chain(broken);
    let pruned = config.dependencies.prune_stale(known);

    if pruned.is_empty() {
        println!("No stale dependencies");
        return Ok(());
    }

    for bundle in &pruned {
        println!("  - pruned dependency {}", bundle);
    }
    config.save(path)?;
    Ok(())
}
