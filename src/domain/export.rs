//! Flat relation export: `A,TYPE,B,LINE`, one record per line.

use crate::domain::architecture::Architecture;
use crate::domain::dependency::Dependency;
use anyhow::Result;
use std::io::Write;

/// Rendered in place of a line number the front-end could not determine.
pub const ABSENT_LINE: &str = "null";

pub fn to_relation_line(dependency: &Dependency) -> String {
    let line = dependency
        .line_number()
        .map(|l| l.to_string())
        .unwrap_or_else(|| ABSENT_LINE.to_string());
    format!(
        "{},{},{},{}",
        dependency.class_name_a(),
        dependency.dependency_type().value(),
        dependency.class_name_b(),
        line
    )
}

/// Write a relation listing, sorted so repeated exports are byte-identical.
pub fn write_relations<W: Write>(
    lines: impl IntoIterator<Item = String>,
    mut out: W,
) -> Result<usize> {
    let mut lines: Vec<String> = lines.into_iter().collect();
    lines.sort();
    for line in &lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(lines.len())
}

/// Write every stored relation of `architecture`.
pub fn write_architecture<W: Write>(architecture: &Architecture, out: W) -> Result<usize> {
    write_relations(architecture.export_all(), out)
}
