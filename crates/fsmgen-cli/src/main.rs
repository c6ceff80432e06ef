//! `fsmgen` - generate state machine sources from spec files

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use fsmgen_artifact::SourceArtifact;
use fsmgen_core::{AggregatorOutcome, GenerationReport, Generator, GeneratorConfig, SpecDocument};
use fsmgen_merge::MergeEngine;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let config_arg = Arg::new("config")
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Generator configuration (TOML)");

    Command::new("fsmgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("State machine scaffolding with edit-preserving regeneration")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level"),
        )
        .subcommand(
            Command::new("generate")
                .about("Write entity files and create or update the aggregator")
                .arg(
                    Arg::new("spec")
                        .long("spec")
                        .value_name("FILE")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Spec file (.json, .yaml, .yml or .toml)"),
                )
                .arg(config_arg.clone())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the report as JSON"),
                ),
        )
        .subcommand(
            Command::new("scan")
                .about("Print what the merge engine sees in an aggregator file")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Aggregator source file"),
                )
                .arg(config_arg.clone()),
        )
        .subcommand(
            Command::new("config")
                .about("Print the effective configuration as TOML")
                .arg(config_arg),
        )
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn load_config(args: &ArgMatches) -> anyhow::Result<GeneratorConfig> {
    match args.get_one::<PathBuf>("config") {
        Some(path) => GeneratorConfig::load(path)
            .await
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(GeneratorConfig::default()),
    }
}

async fn generate(args: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(args).await?;
    let spec_path = args
        .get_one::<PathBuf>("spec")
        .context("--spec is required")?;
    let document = SpecDocument::load(spec_path)
        .await
        .with_context(|| format!("loading spec {}", spec_path.display()))?;

    let report = Generator::new(config).generate(&document).await?;
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &GenerationReport) {
    println!("Output: {}", report.directory.display());
    for path in &report.entities_written {
        println!("  written  {}", path.display());
    }
    for path in &report.entities_skipped {
        println!("  kept     {}", path.display());
    }
    match &report.aggregator {
        AggregatorOutcome::Created => {
            println!("  created  {}", report.aggregator_path.display());
        }
        AggregatorOutcome::Merged {
            declarations_added,
            method,
        } => println!(
            "  merged   {} (+{} states, method {:?})",
            report.aggregator_path.display(),
            declarations_added.len(),
            method
        ),
    }
}

async fn scan(args: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(args).await?;
    let path: &Path = args.get_one::<PathBuf>("file").context("file is required")?;
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;

    let engine = MergeEngine::new(config.dialect);
    let result = engine
        .scanner()
        .scan(&SourceArtifact::parse(&text))
        .with_context(|| format!("scanning {}", path.display()))?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn show_config(args: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(args).await?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let verbose = matches.get_flag("verbose")
        || matches
            .subcommand()
            .is_some_and(|(_, args)| args.get_flag("verbose"));
    init_tracing(verbose);

    match matches.subcommand() {
        Some(("generate", args)) => generate(args).await,
        Some(("scan", args)) => scan(args).await,
        Some(("config", args)) => show_config(args).await,
        _ => unreachable!("subcommand_required"),
    }
}
