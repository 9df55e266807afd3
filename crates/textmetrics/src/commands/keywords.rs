//! Keywords command — most frequent non-stop-words and their density.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use textmetrics_core::keywords;

use super::read_input;

/// Arguments for the `keywords` subcommand.
#[derive(Args, Debug)]
pub struct KeywordsArgs {
    /// File to analyze (stdin when omitted or `-`).
    pub file: Option<Utf8PathBuf>,
}

/// Rank keywords in a file or stdin.
#[instrument(name = "cmd_keywords", skip_all, fields(file = ?args.file))]
pub fn cmd_keywords(
    args: KeywordsArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = ?args.file, "executing keywords command");

    let (content, label) = read_input(args.file.as_ref(), max_input_bytes)?;
    let report = keywords::analyze_keywords(&content);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("{}: {}", label.bold(), "no keywords found".dimmed());
        return Ok(());
    }

    println!(
        "{} ({} keyword occurrences)",
        label.bold(),
        report.filtered_total
    );
    let width = report
        .keywords
        .iter()
        .map(|k| k.word.chars().count())
        .max()
        .unwrap_or(0);
    for (rank, (keyword, density)) in report.keywords.iter().zip(&report.density).enumerate() {
        println!(
            "  {:>2}. {:<width$}  {:>4}  {:>5.1}%",
            rank + 1,
            keyword.word.cyan(),
            keyword.count,
            density.percentage,
        );
    }

    Ok(())
}
