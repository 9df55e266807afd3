//! Compose command — a line-oriented editing session on stdin.
//!
//! Plain lines are typed into the buffer. Lines starting with `:` are
//! directives:
//!
//! | Directive        | Effect                                  |
//! |------------------|-----------------------------------------|
//! | `:paste TEXT`    | append `TEXT` as a paste                |
//! | `:clear`         | empty the buffer                        |
//! | `:mode`          | toggle basic/advanced                   |
//! | `:theme`         | toggle light/dark                       |
//! | `:save`          | save the draft now                      |
//! | `:autosave on`   | turn autosave on (`off` to turn it off) |
//! | `:stats`         | print the full metrics                  |
//! | `:log`           | print recent activity                   |
//!
//! Autosave deadlines are checked as each line arrives; a pending save is
//! flushed at end of input.

use std::io::BufRead;
use std::time::Instant;

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use textmetrics_core::autosave::{AutosaveScheduler, SaveStatus};
use textmetrics_core::config::Config;
use textmetrics_core::session::{ActivityLog, Session, Theme, ViewMode};
use textmetrics_core::{FileStore, MetricsSnapshot, TextStore};

use super::analyze::print_snapshot;

/// Arguments for the `compose` subcommand.
#[derive(Args, Debug, Default)]
pub struct ComposeArgs {
    /// Load the saved draft before reading input.
    #[arg(long)]
    pub restore: bool,

    /// Draft file (overrides config `draft_file`).
    #[arg(long, value_name = "FILE")]
    pub draft: Option<Utf8PathBuf>,

    /// Do not save automatically.
    #[arg(long)]
    pub no_autosave: bool,

    /// Starting theme (overrides config `theme`).
    #[arg(long, value_enum)]
    pub theme: Option<Theme>,

    /// Start in basic mode.
    #[arg(long)]
    pub basic: bool,
}

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Directive<'a> {
    Type(&'a str),
    Paste(&'a str),
    Clear,
    Mode,
    Theme,
    Save,
    Autosave(bool),
    Stats,
    Log,
}

fn parse_line(line: &str) -> anyhow::Result<Directive<'_>> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Directive::Type(line));
    };
    let (name, arg) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(n, a)| (n, a.trim()));
    Ok(match name {
        "paste" => Directive::Paste(arg),
        "clear" => Directive::Clear,
        "mode" => Directive::Mode,
        "theme" => Directive::Theme,
        "save" => Directive::Save,
        "autosave" => match arg {
            "on" => Directive::Autosave(true),
            "off" => Directive::Autosave(false),
            other => bail!("expected `:autosave on` or `:autosave off`, got `{other}`"),
        },
        "stats" => Directive::Stats,
        "log" => Directive::Log,
        other => bail!("unknown directive `:{other}`"),
    })
}

/// Final state printed with `--json`.
#[derive(Serialize)]
struct ComposeSummary<'a> {
    mode: ViewMode,
    theme: Theme,
    save_status: SaveStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    draft_file: Option<String>,
    metrics: MetricsSnapshot,
    activity: &'a ActivityLog,
}

/// Run an editing session over stdin.
#[instrument(name = "cmd_compose", skip_all, fields(restore = args.restore))]
pub fn cmd_compose(args: ComposeArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(?args, "executing compose command");

    let draft = args
        .draft
        .clone()
        .or_else(|| config.draft_path())
        .context("no draft location: set `draft_file` in config or pass --draft")?;
    let store = FileStore::new(&draft);

    let autosave = if config.autosave && !args.no_autosave {
        AutosaveScheduler::new(config.autosave_delay())
    } else {
        AutosaveScheduler::disabled(config.autosave_delay())
    };
    let theme = args.theme.or(config.theme).unwrap_or_default();
    let mode = if args.basic {
        ViewMode::Basic
    } else {
        ViewMode::Advanced
    };
    let mut session = Session::new(autosave).with_theme(theme).with_mode(mode);

    if args.restore {
        let restored = session
            .restore(&store)
            .with_context(|| format!("failed to restore draft from {draft}"))?;
        if !global_json && !restored {
            eprintln!("{} no saved draft at {}", "note:".yellow(), draft);
        }
    }

    let stdin = std::io::stdin();
    run_session(
        &mut session,
        stdin.lock(),
        &store,
        config.input_limit(),
        global_json,
    )?;

    if global_json {
        let summary = ComposeSummary {
            mode: session.mode(),
            theme: session.theme(),
            save_status: session.autosave().status(),
            draft_file: Some(draft.to_string()),
            metrics: session.snapshot(),
            activity: session.activity(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

/// Feed every line of `input` into `session`, saving through `store`.
///
/// Stops with an error once more than `max_bytes` have been read; edits
/// accepted before that point are still saved.
fn run_session(
    session: &mut Session,
    mut input: impl BufRead,
    store: &impl TextStore,
    max_bytes: Option<usize>,
    quiet_output: bool,
) -> anyhow::Result<()> {
    let mut total = 0usize;
    let mut buf = String::new();
    loop {
        buf.clear();
        let read = input.read_line(&mut buf).context("failed to read stdin")?;
        if read == 0 {
            break;
        }
        total += read;
        if let Some(max) = max_bytes
            && total > max
        {
            if let Err(e) = session.flush_pending(store) {
                warn!(error = %e, "save before stopping failed");
            }
            bail!("input too large: stdin exceeds {max} bytes");
        }

        let line = buf
            .strip_suffix('\n')
            .map_or(buf.as_str(), |l| l.strip_suffix('\r').unwrap_or(l));
        let now = Instant::now();

        if let Err(e) = session.flush_due(store, now) {
            warn!(error = %e, "autosave failed");
        }

        let directive = match parse_line(line) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("{} {e}", "error:".red());
                continue;
            }
        };
        apply(session, directive, store, now, quiet_output);
    }

    match session.flush_pending(store) {
        Ok(true) => info!("draft saved at end of input"),
        Ok(false) => {}
        Err(e) => warn!(error = %e, "final save failed"),
    }
    Ok(())
}

fn apply(
    session: &mut Session,
    directive: Directive<'_>,
    store: &impl TextStore,
    now: Instant,
    quiet_output: bool,
) {
    match directive {
        Directive::Type(line) => session.type_line(line, now),
        Directive::Paste(text) => session.append(text, now),
        Directive::Clear => session.clear(now),
        Directive::Mode => {
            session.toggle_mode();
        }
        Directive::Theme => {
            session.toggle_theme();
        }
        Directive::Save => {
            if let Err(e) = session.save_now(store) {
                eprintln!("{} {e}", "error:".red());
            }
        }
        Directive::Autosave(true) => session.autosave_mut().enable(),
        Directive::Autosave(false) => session.autosave_mut().disable(),
        Directive::Stats => {
            if !quiet_output {
                print_snapshot(&session.snapshot(), session.mode() == ViewMode::Basic);
            }
            return;
        }
        Directive::Log => {
            if !quiet_output {
                for entry in session.activity().iter() {
                    println!(
                        "  {} {}",
                        entry.at.format("%H:%M:%S").dimmed(),
                        entry.action
                    );
                }
            }
            return;
        }
    }

    if !quiet_output {
        print_status(session);
    }
}

/// One-line status after each change.
fn print_status(session: &Session) {
    let snapshot = session.snapshot();
    let status = session.autosave().status().label();
    let mut line = format!(
        "{} words, {} chars, {} min read",
        snapshot.word_count, snapshot.character_count, snapshot.reading_minutes
    );
    if session.mode() == ViewMode::Advanced {
        line.push_str(&format!(", {}", snapshot.reading_level));
    }
    if status.is_empty() {
        println!("{} [{}]", line, session.theme().as_str().dimmed());
    } else {
        println!(
            "{} [{}] {}",
            line,
            session.theme().as_str().dimmed(),
            status.dimmed()
        );
    }
}
