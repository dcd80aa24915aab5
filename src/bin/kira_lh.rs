use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use kira_ligand_harvest::config::{ConfigLoader, ConfigOverrides, ResolvedConfig};
use kira_ligand_harvest::error::HarvestError;
use kira_ligand_harvest::ids::{parse_entry_arg, read_entry_file};
use kira_ligand_harvest::output::{JsonOutput, OutputMode, TextOutput};
use kira_ligand_harvest::pipeline::{Harvester, IdSource, ProgressSink};
use kira_ligand_harvest::query::QueryBuilder;
use kira_ligand_harvest::rcsb::RcsbHttpClient;
use kira_ligand_harvest::sink::CsvSink;

#[derive(Parser)]
#[command(name = "kira-lh")]
#[command(about = "Harvest ligand and residue metadata for RCSB PDB entries into a CSV")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true, alias = "json")]
    non_interactive: bool,

    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Search RCSB and write one row per matching entry")]
    Harvest(HarvestArgs),
    #[command(about = "Print the search request body without sending it")]
    Query(CriteriaArgs),
}

#[derive(Args, Clone, Default)]
struct CriteriaArgs {
    #[arg(long)]
    organism: Option<String>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    description: Option<String>,
}

#[derive(Args, Clone, Default)]
struct HarvestArgs {
    #[command(flatten)]
    criteria: CriteriaArgs,

    #[arg(long)]
    label: Option<String>,

    #[arg(long, short)]
    output: Option<Utf8PathBuf>,

    #[arg(long, conflicts_with = "ids_file")]
    ids: Option<String>,

    #[arg(long)]
    ids_file: Option<Utf8PathBuf>,

    #[arg(long)]
    exclude_solvents: bool,

    #[arg(long)]
    require_ligands: bool,

    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<HarvestError>() {
            return ExitCode::from(err.exit_code());
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.non_interactive {
        OutputMode::NonInteractive
    } else {
        OutputMode::Interactive
    };

    match cli.command {
        Some(Commands::Harvest(args)) => run_harvest(args, cli.config.as_deref(), output_mode),
        Some(Commands::Query(args)) => {
            let resolved = ConfigLoader::resolve(cli.config.as_deref(), overrides(&args, None))?;
            run_query(&resolved)
        }
        None => run_harvest(HarvestArgs::default(), cli.config.as_deref(), output_mode),
    }
}

fn overrides(criteria: &CriteriaArgs, args: Option<&HarvestArgs>) -> ConfigOverrides {
    ConfigOverrides {
        organism: criteria.organism.clone(),
        title: criteria.title.clone(),
        description: criteria.description.clone(),
        label: args.and_then(|args| args.label.clone()),
        output: args.and_then(|args| args.output.clone()),
        exclude_solvents: args.map(|args| args.exclude_solvents).unwrap_or(false),
        require_ligands: args.map(|args| args.require_ligands).unwrap_or(false),
    }
}

fn run_query(resolved: &ResolvedConfig) -> miette::Result<()> {
    let query = QueryBuilder::build(&resolved.criteria()?);
    JsonOutput::print_query(&query).into_diagnostic()
}

fn run_harvest(
    args: HarvestArgs,
    config_path: Option<&str>,
    output_mode: OutputMode,
) -> miette::Result<()> {
    let resolved = ConfigLoader::resolve(config_path, overrides(&args.criteria, Some(&args)))?;

    let source = if let Some(ids) = &args.ids {
        IdSource::Explicit(parse_entry_arg(ids))
    } else if let Some(path) = &args.ids_file {
        IdSource::Explicit(read_entry_file(path)?)
    } else {
        IdSource::Search(QueryBuilder::build(&resolved.criteria()?))
    };

    if args.dry_run {
        return match &source {
            IdSource::Search(query) => JsonOutput::print_query(query).into_diagnostic(),
            IdSource::Explicit(ids) => {
                for id in ids {
                    println!("{id}");
                }
                Ok(())
            }
        };
    }

    let client = RcsbHttpClient::new(resolved.endpoints.clone())?;
    let harvester = Harvester::new(client, resolved.harvest_options());
    let mut sink = CsvSink::create(&resolved.output)?;

    let progress: &dyn ProgressSink = match output_mode {
        OutputMode::Interactive => &TextOutput,
        OutputMode::NonInteractive => &JsonOutput,
    };
    let summary = harvester
        .run(source, &mut sink, progress)?
        .with_output(display_path(&resolved.output));

    match output_mode {
        OutputMode::Interactive => TextOutput::print_summary(&summary),
        OutputMode::NonInteractive => JsonOutput::print_summary(&summary).into_diagnostic()?,
    }
    Ok(())
}

fn display_path(path: &Utf8Path) -> Utf8PathBuf {
    std::fs::canonicalize(path.as_std_path())
        .ok()
        .and_then(|absolute| Utf8PathBuf::from_path_buf(absolute).ok())
        .unwrap_or_else(|| path.to_path_buf())
}
