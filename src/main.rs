//! release-metadata CLI
//!
//! Entry point for the `release-metadata` command-line tool.

use clap::{ArgAction, Parser, Subcommand};
use release_metadata::config::{default_host_config_path, DEFAULT_REPO_CONFIG};
use release_metadata::{
    ArtifactClassifier, BuildContext, ConfigError, ContextInputs, EffectiveConfig, EnvSnapshot,
    ExplainOutput, GroupBy, GroupingReport,
};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "release-metadata")]
#[command(about = "Canonical product names and variant groups for release artifacts", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to repo config file (default: .release/classifier.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Variant tag for repositories without rules
    #[arg(long, global = true)]
    default_variant: Option<String>,

    /// Repository name (default: from GITHUB_REPOSITORY)
    #[arg(long, global = true)]
    repository: Option<String>,

    /// Organization (default: from GITHUB_REPOSITORY, then config)
    #[arg(long, global = true)]
    org: Option<String>,

    /// Branch (default: GITHUB_HEAD_REF, then GITHUB_REF)
    #[arg(long, global = true)]
    branch: Option<String>,

    /// Commit SHA (default: GITHUB_SHA)
    #[arg(long, global = true)]
    sha: Option<String>,

    /// CI run ID (default: GITHUB_RUN_ID)
    #[arg(long, global = true)]
    run_id: Option<String>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Group a repository's artifacts by canonical product name or variant
    Group {
        /// File with one artifact name per line (default: stdin)
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,

        /// Grouping key: product, variant or product_and_variant
        #[arg(long)]
        group_by: Option<GroupBy>,

        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,

        /// Exit with status 2 if any artifact produced a diagnostic
        #[arg(long)]
        deny_diagnostics: bool,

        /// Artifact names (after --)
        #[arg(last = true)]
        names: Vec<String>,
    },

    /// Explain how a single artifact name is classified
    Explain {
        /// Artifact file name
        name: String,

        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,
    },

    /// Print the effective configuration and where it came from
    Config,

    /// Print the resolved build context
    Context,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let env = EnvSnapshot::capture();

    match cli.command {
        Commands::Group {
            ref input,
            group_by,
            human,
            deny_diagnostics,
            ref names,
        } => {
            run_group(&cli, &env, input.as_deref(), group_by, human, deny_diagnostics, names);
        }
        Commands::Explain { ref name, human } => {
            run_explain(&cli, &env, name, human);
        }
        Commands::Config => {
            run_config(&cli, &env);
        }
        Commands::Context => {
            run_context(&cli, &env);
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn run_group(
    cli: &Cli,
    env: &EnvSnapshot,
    input: Option<&Path>,
    group_by: Option<GroupBy>,
    human: bool,
    deny_diagnostics: bool,
    names: &[String],
) {
    let config = load_config_or_exit(cli, env, group_by);
    let context = resolve_context_or_exit(cli, env, &config);
    let classifier = build_classifier_or_exit(&config);

    let names = if names.is_empty() {
        match read_names(input) {
            Ok(names) => names,
            Err(e) => {
                eprintln!("Error reading artifact names: {}", e);
                process::exit(1);
            }
        }
    } else {
        names.to_vec()
    };

    tracing::info!(
        repository = %context.repository,
        artifacts = names.len(),
        "grouping artifacts"
    );

    let outcome = classifier.group(&context.repository, &names);
    let report = GroupingReport::new(context, names.len(), outcome);

    if human {
        println!("{}", report.to_human());
    } else {
        print_json_or_exit(report.to_json());
    }

    if deny_diagnostics && report.has_diagnostics() {
        process::exit(2);
    }
}

fn run_explain(cli: &Cli, env: &EnvSnapshot, name: &str, human: bool) {
    let config = load_config_or_exit(cli, env, None);
    let context = resolve_context_or_exit(cli, env, &config);
    let classifier = build_classifier_or_exit(&config);

    let decision = classifier.classify_artifact(&context.repository, name);
    let rules = classifier
        .config()
        .variants
        .rules_for(&context.repository)
        .cloned();
    let output = ExplainOutput::new(
        &context.repository,
        decision,
        rules,
        &classifier.config().variants.default_tag,
    );

    if human {
        println!("{}", output.to_human());
    } else {
        print_json_or_exit(output.to_json());
    }
}

fn run_config(cli: &Cli, env: &EnvSnapshot) {
    let config = load_config_or_exit(cli, env, None);
    print_json_or_exit(config.to_json());
}

fn run_context(cli: &Cli, env: &EnvSnapshot) {
    let config = load_config_or_exit(cli, env, None);
    let context = resolve_context_or_exit(cli, env, &config);
    print_json_or_exit(serde_json::to_string_pretty(&context));
}

fn load_config(
    cli: &Cli,
    env: &EnvSnapshot,
    group_by: Option<GroupBy>,
) -> Result<EffectiveConfig, ConfigError> {
    // An explicit --config must exist; the default location is optional.
    let repo_path = match cli.config {
        Some(ref path) if !path.exists() => {
            return Err(ConfigError::IoError(format!(
                "{}: config file not found",
                path.display()
            )));
        }
        Some(ref path) => path.clone(),
        None => PathBuf::from(DEFAULT_REPO_CONFIG),
    };
    let host_path = default_host_config_path(env);

    let mut overrides = Map::new();
    if let Some(group_by) = group_by {
        overrides.insert(
            "group_by".to_string(),
            Value::String(group_by.as_str().to_string()),
        );
    }
    if let Some(ref tag) = cli.default_variant {
        overrides.insert("default_variant".to_string(), Value::String(tag.clone()));
    }
    let cli_layer = if overrides.is_empty() {
        None
    } else {
        Some(Value::Object(overrides))
    };

    EffectiveConfig::build(host_path.as_deref(), Some(&repo_path), cli_layer)
}

fn load_config_or_exit(cli: &Cli, env: &EnvSnapshot, group_by: Option<GroupBy>) -> EffectiveConfig {
    match load_config(cli, env, group_by) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    }
}

fn resolve_context_or_exit(cli: &Cli, env: &EnvSnapshot, config: &EffectiveConfig) -> BuildContext {
    let inputs = ContextInputs {
        branch: cli.branch.clone(),
        sha: cli.sha.clone(),
        org: cli.org.clone(),
        repository: cli.repository.clone(),
        run_id: cli.run_id.clone(),
    };

    match BuildContext::resolve(&inputs, env, &config.settings.default_org) {
        Ok(context) => context,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn build_classifier_or_exit(config: &EffectiveConfig) -> ArtifactClassifier {
    let classifier = config
        .classifier_config()
        .and_then(|c| ArtifactClassifier::new(c).map_err(ConfigError::from));

    match classifier {
        Ok(classifier) => classifier,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    }
}

/// Artifact names, one per line, from `input` or stdin. Blank lines are
/// skipped.
fn read_names(input: Option<&Path>) -> io::Result<Vec<String>> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

fn print_json_or_exit(json: Result<String, serde_json::Error>) {
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
