use anyhow::Result;
use arch_deps::adapters::fs::discovery::FsProjectDiscovery;
use arch_deps::adapters::json::extractor::JsonDependencyExtractor;
use arch_deps::app::engine::ArchitectureEngine;
use arch_deps::cli;
use arch_deps::domain::noise::NoisePolicy;
use arch_deps::domain::pipeline::{ExtractionPipeline, PipelineConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "archdeps")]
#[command(about = "Build and query a class-level dependency model of a project", long_about = None)]
struct Cli {
    /// Project root
    project: PathBuf,

    /// Source file extension to discover
    #[arg(long, default_value = "java")]
    extension: String,

    /// Directory holding `<file>.deps.json` dumps (mirrors the project tree); defaults to next to each source
    #[arg(long)]
    dump_dir: Option<PathBuf>,

    /// Extraction worker count (default: one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Drop edges to primitives, wrappers, markers and the generic list family
    #[arg(long)]
    filter_noise: bool,

    /// Extra fully-qualified name to treat as noise (repeatable)
    #[arg(long = "ignore-type")]
    ignore_types: Vec<String>,

    /// Extra name prefix to treat as noise (repeatable)
    #[arg(long = "ignore-prefix")]
    ignore_prefixes: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every relation as `A,TYPE,B,LINE`
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List known classes, optionally matching a regex
    Classes {
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Show the dependencies of one class as JSON
    Show { class_name: String },
    /// Look up a single relation
    Find {
        class_a: String,
        class_b: String,
        /// Dependency kind, e.g. FIELD or LOCAL_VARIABLE
        kind: String,
        /// Line in A; omit to match relations without a line
        #[arg(long)]
        line: Option<u32>,
    },
    /// Print run statistics and per-file failures as JSON
    Summary,
    /// Print the effective noise policy (`exact <name>` / `prefix <name>`)
    Noise,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    cli::install_panic_logging();

    let cli = Cli::parse();

    let mut policy = NoisePolicy::default();
    for name in &cli.ignore_types {
        policy = policy.with_exact(name.clone());
    }
    for prefix in &cli.ignore_prefixes {
        policy = policy.with_prefix(prefix.clone());
    }
    let config = PipelineConfig {
        threads: cli.threads,
        apply_noise_filter: cli.filter_noise,
        noise_policy: policy.clone(),
    };

    let extractor = match &cli.dump_dir {
        Some(dump_dir) => JsonDependencyExtractor::mirrored(&cli.project, dump_dir),
        None => JsonDependencyExtractor::new(),
    };
    let pipeline = ExtractionPipeline::new(Arc::new(extractor), config);
    let discovery = FsProjectDiscovery::new(cli.extension.clone());
    let engine = ArchitectureEngine::analyze(&cli.project, &discovery, pipeline)?;

    match cli.command {
        Commands::Export { output } => cli::export_relations(&engine, output.as_deref())?,
        Commands::Classes { pattern } => cli::list_classes(&engine, pattern.as_deref())?,
        Commands::Show { class_name } => cli::show_class(&engine, &class_name)?,
        Commands::Find {
            class_a,
            class_b,
            kind,
            line,
        } => cli::find_relation(&engine, &class_a, &class_b, &kind, line)?,
        Commands::Summary => cli::print_summary(&engine)?,
        Commands::Noise => cli::print_noise_policy(&policy)?,
    }

    Ok(())
}
