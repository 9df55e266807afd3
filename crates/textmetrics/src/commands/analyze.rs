//! Analyze command — every metric for one piece of text.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use textmetrics_core::{MetricsSnapshot, ReadingLevel, analyze};

use super::read_input;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze (stdin when omitted or `-`).
    pub file: Option<Utf8PathBuf>,

    /// Only show counts and reading times.
    #[arg(long)]
    pub basic: bool,
}

/// The subset of a snapshot shown in basic mode.
#[derive(Debug, Serialize)]
struct BasicView {
    word_count: usize,
    character_count: usize,
    sentence_count: usize,
    paragraph_count: usize,
    reading_minutes: usize,
    speaking_minutes: usize,
}

impl From<&MetricsSnapshot> for BasicView {
    fn from(s: &MetricsSnapshot) -> Self {
        Self {
            word_count: s.word_count,
            character_count: s.character_count,
            sentence_count: s.sentence_count,
            paragraph_count: s.paragraph_count,
            reading_minutes: s.reading_minutes,
            speaking_minutes: s.speaking_minutes,
        }
    }
}

/// Analyze a file or stdin and print the metrics.
#[instrument(name = "cmd_analyze", skip_all, fields(file = ?args.file, basic = args.basic))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = ?args.file, basic = args.basic, "executing analyze command");

    let (content, label) = read_input(args.file.as_ref(), max_input_bytes)?;
    let snapshot = analyze(&content);

    if global_json {
        if args.basic {
            println!(
                "{}",
                serde_json::to_string_pretty(&BasicView::from(&snapshot))?
            );
        } else {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        return Ok(());
    }

    println!("{}", label.bold());
    print_snapshot(&snapshot, args.basic);
    Ok(())
}

/// Print a snapshot as labelled sections.
///
/// Shared with `compose`, which reprints after every edit.
pub fn print_snapshot(snapshot: &MetricsSnapshot, basic: bool) {
    println!(
        "\n  {} {} words, {} characters, {} sentences, {} paragraphs",
        "Counts:".cyan(),
        snapshot.word_count,
        snapshot.character_count,
        snapshot.sentence_count,
        snapshot.paragraph_count,
    );
    println!(
        "  {} {} min reading, {} min speaking",
        "Time:".cyan(),
        snapshot.reading_minutes,
        snapshot.speaking_minutes,
    );

    if basic {
        return;
    }

    println!(
        "\n  {} {}",
        "Reading level:".cyan(),
        level_colored(snapshot.reading_level)
    );
    println!(
        "  {} avg word {:.1} chars, avg sentence {:.1} words, longest \"{}\"",
        "Details:".cyan(),
        snapshot.average_word_length,
        snapshot.average_sentence_length,
        snapshot.longest_word,
    );

    if snapshot.keywords.is_empty() {
        println!("\n  {} {}", "Keywords:".cyan(), "none".dimmed());
    } else {
        let top: Vec<_> = snapshot
            .keywords
            .iter()
            .zip(&snapshot.keyword_density)
            .map(|(k, d)| format!("{} ({}, {:.1}%)", k.word, k.count, d.percentage))
            .collect();
        println!("\n  {} {}", "Keywords:".cyan(), top.join(", "));
    }
}

/// Reading level label, colored by difficulty.
pub fn level_colored(level: ReadingLevel) -> String {
    match level {
        ReadingLevel::Elementary | ReadingLevel::MiddleSchool => level.green().to_string(),
        ReadingLevel::HighSchool | ReadingLevel::College => level.yellow().to_string(),
        ReadingLevel::Graduate | ReadingLevel::PostGraduate => level.red().to_string(),
        ReadingLevel::Undetermined => level.dimmed().to_string(),
    }
}
