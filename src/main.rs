use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::error;

use version_discovery::config::{self, DiscoveryConfig, HttpConfig, RepositoryConfig};
use version_discovery::discovery::{
    ArtifactDescriptor, ModuleCoordinate, RepositoryLayout, VersionList,
};
use version_discovery::logging::init_logging;
use version_discovery::repository::Repository;

#[derive(Parser)]
#[command(name = "version-discovery")]
#[command(version, about = "Discover the published versions of a module")]
struct Cli {
    /// Also write logs to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the versions of a module in the configured repositories
    List(ListArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Module as <organisation>:<module>
    coordinate: ModuleCoordinate,

    /// Configuration file (defaults to <data dir>/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Query a single repository URL instead of the configured ones
    #[arg(long)]
    repository: Option<String>,

    /// Layout of --repository
    #[arg(long, value_enum, default_value_t = RepositoryLayout::Maven)]
    layout: RepositoryLayout,

    /// Artifact pattern of --repository, relative to its URL
    #[arg(long = "pattern")]
    patterns: Vec<String>,

    /// Artifact name (defaults to the module name)
    #[arg(long)]
    artifact: Option<String>,

    /// Artifact extension
    #[arg(long, default_value = "jar")]
    ext: String,

    /// Artifact classifier
    #[arg(long)]
    classifier: Option<String>,

    /// Print JSON instead of one version per line
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RepositoryVersions {
    repository: String,
    versions: VersionList,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&config::log_dir(), cli.verbose);

    match cli.command {
        Command::List(args) => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(run_list(args))
            .inspect_err(|e| error!("{:#}", e)),
    }
}

async fn run_list(args: ListArgs) -> anyhow::Result<()> {
    let (http, repositories) = repositories_from_args(&args)?;

    let mut artifact = ArtifactDescriptor::new(
        args.artifact
            .clone()
            .unwrap_or_else(|| args.coordinate.module().to_string()),
        args.ext.clone(),
    );
    if let Some(classifier) = &args.classifier {
        artifact = artifact.with_classifier(classifier.clone());
    }

    let mut results = Vec::new();
    for repository_config in &repositories {
        let repository = Repository::from_config(repository_config, &http)?;
        let versions = repository
            .list_versions(&args.coordinate, Some(&artifact))
            .await
            .with_context(|| {
                format!(
                    "Failed to list versions of {} in '{}'",
                    args.coordinate,
                    repository.name()
                )
            })?;
        results.push(RepositoryVersions {
            repository: repository.name().to_string(),
            versions,
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            for version in &result.versions {
                println!("{}", version);
            }
        }
    }

    Ok(())
}

fn repositories_from_args(args: &ListArgs) -> anyhow::Result<(HttpConfig, Vec<RepositoryConfig>)> {
    if let Some(url) = &args.repository {
        let repository = RepositoryConfig {
            name: url.clone(),
            url: url.clone(),
            layout: args.layout,
            artifact_patterns: args.patterns.clone(),
        };
        return Ok((HttpConfig::default(), vec![repository]));
    }

    let path = args.config.clone().unwrap_or_else(config::config_path);
    let config = DiscoveryConfig::load(&path)?;
    if config.repositories.is_empty() {
        return Err(anyhow!(
            "No repositories configured in {}; pass --repository or add some",
            path.display()
        ));
    }

    Ok((config.http, config.repositories))
}
