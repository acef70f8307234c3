//! mc-artifacts CLI - populate and inspect the artifact cache
//!
//! Usage:
//!   mc-artifacts manifest               Fetch the version manifest
//!   mc-artifacts version <id>           Fetch metadata for a version
//!   mc-artifacts client <id>            Download the client jar
//!   mc-artifacts server <id>            Download the server jar
//!   mc-artifacts mappings <id>          Download and parse client mappings
//!   mc-artifacts yarn <id>              Look up the yarn build for a version
//!   mc-artifacts tools                  Clone the external tool repositories
//!   mc-artifacts status <id>            Show what is cached for a version
//!   mc-artifacts clear                  Drop manifests and pull tool repositories

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mc_artifacts::{ArtifactCache, Config, ProguardMappings, ProguardParser, output};
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mc-artifacts")]
#[command(about = "Fetch and cache game jars, mappings and codegen tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Cache root directory
    #[arg(short = 'd', long, global = true, env = "MC_ARTIFACTS_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Only print results and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the version manifest
    Manifest,

    /// Fetch metadata for a version
    Version {
        /// Version id, e.g. 1.20.1
        version: String,
    },

    /// Download the client jar
    Client { version: String },

    /// Download the server jar
    Server { version: String },

    /// Download and parse the client mappings
    Mappings {
        version: String,

        /// Show one class, by deobfuscated or obfuscated name
        #[arg(long)]
        class: Option<String>,
    },

    /// Look up the yarn build for a game version
    Yarn { version: String },

    /// Clone the external tool repositories
    Tools,

    /// Show which artifacts are cached for a version
    Status { version: String },

    /// Remove cached manifests and pull the tool repositories
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    output::set_quiet(cli.quiet);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.cache_dir {
        config.cache_root = dir;
    }

    let cache = ArtifactCache::new(config).with_context(|| "Failed to open artifact cache")?;

    match cli.command {
        Commands::Manifest => {
            let manifest = cache.get_version_manifest()?;
            if let Some(latest) = &manifest.latest {
                println!("{:<10} {}", "release:".bold(), latest.release.green());
                println!("{:<10} {}", "snapshot:".bold(), latest.snapshot.cyan());
            }
            println!("{} versions known", manifest.versions.len());
        }

        Commands::Version { version } => {
            let meta = cache
                .get_version_data(&version)
                .with_context(|| format!("Failed to get data for {}", version))?;
            let downloads = [
                ("client", &meta.downloads.client),
                ("server", &meta.downloads.server),
                ("mappings", &meta.downloads.client_mappings),
            ];
            for (name, download) in downloads {
                match download {
                    Some(d) => println!("{:<10} {}", name.bold(), d.url),
                    None => println!("{:<10} {}", name.bold(), "(none)".dimmed()),
                }
            }
        }

        Commands::Client { version } => {
            let path = cache.get_client_jar(&version)?;
            println!("{}", path.display());
        }

        Commands::Server { version } => {
            let path = cache.get_server_jar(&version)?;
            println!("{}", path.display());
        }

        Commands::Mappings { version, class } => {
            let mappings = cache.get_mappings_for_version(&version, &ProguardParser)?;
            match class {
                Some(name) => show_class(&mappings, &name)?,
                None => println!("{} classes mapped", mappings.len()),
            }
        }

        Commands::Yarn { version } => match cache.get_yarn_data(&version)? {
            Some(yarn) => {
                println!(
                    "{}",
                    yarn.version.as_deref().unwrap_or(&yarn.game_version).green()
                );
                if let Some(maven) = yarn.maven {
                    println!("{:<8} {}", "maven:".bold(), maven);
                }
            }
            None => output::info(&format!("No yarn build for {}", version)),
        },

        Commands::Tools => {
            let burger = cache.get_burger()?;
            let generator = cache.get_generator_mod()?;
            println!("{}", burger.display());
            println!("{}", generator.display());
        }

        Commands::Status { version } => {
            for status in cache.status(&version)? {
                let detail = match status.size {
                    Some(bytes) => format!("{} bytes", bytes),
                    None => status.path.display().to_string(),
                };
                output::status_item(&status.artifact.file_name(), &detail, status.present);
            }
        }

        Commands::Clear => {
            cache.clear_version_cache()?;
            output::success("Version cache cleared");
        }
    }

    Ok(())
}

fn show_class(mappings: &ProguardMappings, name: &str) -> Result<()> {
    let class = mappings
        .class_by_name(name)
        .or_else(|| mappings.class_by_obfuscated(name))
        .with_context(|| format!("No class named {} in mappings", name))?;

    println!("{} -> {}", class.name.bold(), class.obfuscated.cyan());
    for field in &class.fields {
        println!(
            "  {} {} -> {}",
            field.field_type.dimmed(),
            field.name,
            field.obfuscated.cyan()
        );
    }
    for method in &class.methods {
        println!(
            "  {} {}({}) -> {}",
            method.return_type.dimmed(),
            method.name,
            method.args.join(","),
            method.obfuscated.cyan()
        );
    }
    Ok(())
}
