//! Table command: dump the loaded trainer table.
//!
//! The JSON form can be saved and fed back with `--table` to work offline.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use xp_core::SourceTable;

use super::util::{SourceArgs, load_table};
use crate::Config;

pub fn format_table(table: &SourceTable) -> String {
    let mut output = String::new();
    let name_width = table
        .data
        .iter()
        .map(|source| source.name.chars().count())
        .chain(std::iter::once("Name".len()))
        .max()
        .unwrap_or_default();

    writeln!(
        output,
        "{:>8}  {:<name_width$}  {:>12}  {:>12}  Level",
        "ID", "Name", "Day", "Night"
    )
    .unwrap();
    for source in &table.data {
        writeln!(
            output,
            "{:>8}  {:<name_width$}  {:>12}  {:>12}  {}",
            source.number,
            source.name,
            source.exp_day,
            source.exp_night,
            source.level.as_deref().unwrap_or("-")
        )
        .unwrap();
    }
    writeln!(output, "{} trainers", table.len()).unwrap();
    output
}

pub fn run<W: Write>(
    writer: &mut W,
    source: &SourceArgs,
    json: bool,
    config: &Config,
) -> Result<()> {
    let table = load_table(source, config)?;
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&table)?)?;
    } else {
        write!(writer, "{}", format_table(&table))?;
    }
    Ok(())
}
