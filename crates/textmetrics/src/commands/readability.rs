//! Readability command — Flesch Reading Ease and reading time.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use textmetrics_core::{counts, readability};

use super::analyze::level_colored;
use super::read_input;

/// Arguments for the `readability` subcommand.
#[derive(Args, Debug)]
pub struct ReadabilityArgs {
    /// File to analyze (stdin when omitted or `-`).
    pub file: Option<Utf8PathBuf>,
}

/// Score readability of a file or stdin.
#[instrument(name = "cmd_readability", skip_all, fields(file = ?args.file))]
pub fn cmd_readability(
    args: ReadabilityArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = ?args.file, "executing readability command");

    let (content, label) = read_input(args.file.as_ref(), max_input_bytes)?;
    let basic = counts::count(&content);
    let report = readability::estimate(&content, basic.words, basic.sentences);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report.score {
        Some(score) => println!(
            "{} {} (score {:.1})",
            label.bold(),
            level_colored(report.level),
            score
        ),
        None => println!("{} {}", label.bold(), level_colored(report.level)),
    }
    println!(
        "  {} {:.2} syllables per word",
        "Syllables:".cyan(),
        report.average_syllables
    );
    println!(
        "  {} {} min reading, {} min speaking",
        "Time:".cyan(),
        report.reading_minutes,
        report.speaking_minutes,
    );

    Ok(())
}
