use crate::app::engine::ArchitectureEngine;
use crate::domain::dependency::DependencyType;
use crate::domain::export::{to_relation_line, write_architecture};
use crate::domain::noise::NoisePolicy;
use anyhow::{Context as _, Result, anyhow};
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the relation listing to `output`, or stdout.
///
/// When the pipeline filtered noise the store already holds the filtered view,
/// so the export is always taken from the store as-is.
pub fn export_relations(engine: &ArchitectureEngine, output: Option<&Path>) -> Result<()> {
    let architecture = engine.architecture();
    let written = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_architecture(architecture, BufWriter::new(file))?
        }
        None => write_architecture(architecture, std::io::stdout().lock())?,
    };
    tracing::info!(relations = written, "export written");
    Ok(())
}

pub fn list_classes(engine: &ArchitectureEngine, pattern: Option<&str>) -> Result<()> {
    let architecture = engine.architecture();
    let names = match pattern {
        Some(p) => {
            let re = Regex::new(p).with_context(|| format!("Invalid pattern: {}", p))?;
            architecture.search_classes(&re)
        }
        None => {
            let mut names: Vec<String> = architecture.class_names().into_iter().collect();
            names.sort();
            names
        }
    };

    let mut out = std::io::stdout().lock();
    for name in &names {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

pub fn show_class(engine: &ArchitectureEngine, class_name: &str) -> Result<()> {
    let result = engine.class_dependencies(class_name, None)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub fn find_relation(
    engine: &ArchitectureEngine,
    class_a: &str,
    class_b: &str,
    kind: &str,
    line: Option<u32>,
) -> Result<()> {
    let kind: DependencyType = kind.parse()?;
    let dep = engine
        .architecture()
        .find_dependency(class_a, class_b, line, kind)
        .ok_or_else(|| anyhow!("Relation not found: {} -> {} ({})", class_a, class_b, kind))?;
    println!("{}", to_relation_line(&dep));
    Ok(())
}

pub fn print_summary(engine: &ArchitectureEngine) -> Result<()> {
    let summary = engine.summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Print the effective noise policy, one rule per line: `exact <name>` or `prefix <name>`.
pub fn print_noise_policy(policy: &NoisePolicy) -> Result<()> {
    write_noise_policy(policy, std::io::stdout().lock())
}

fn write_noise_policy<W: Write>(policy: &NoisePolicy, mut out: W) -> Result<()> {
    for name in policy.exact_names() {
        writeln!(out, "exact {}", name)?;
    }
    for prefix in policy.prefixes() {
        writeln!(out, "prefix {}", prefix)?;
    }
    out.flush()?;
    Ok(())
}

/// Route panic reports through `tracing` instead of the default stderr hook.
///
/// Panics on the main thread are errors. Panics elsewhere come from extraction
/// workers, where the pipeline already reports the file with a `warn!`, so the
/// hook only records them at debug level.
pub fn install_panic_logging() {
    std::panic::set_hook(Box::new(|info| {
        let thread = std::thread::current();
        let name = thread.name().unwrap_or("<unnamed>");
        if name == "main" {
            tracing::error!(thread = name, panic = %info, "panicked");
        } else {
            tracing::debug!(thread = name, panic = %info, "worker panicked");
        }
    }));
}
