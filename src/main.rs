//! Purpose: `vcrt` CLI entry point.
//! Role: Binary crate root; parses args, runs commands, emits results on stdout.
//! Invariants: Human text on a terminal, JSON otherwise (or when `--json` is passed).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Diagnostics go through `tracing` on stderr, filtered by `RUST_LOG`.
use std::io::{self, IsTerminal, Write};

use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum, error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod command_dispatch;

use vcrt::api::{Error, ErrorKind, TableEntry, to_exit_code};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                let message = clap_error_summary(&err);
                let hint = clap_error_hint(&err);
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(message)
                        .with_hint(hint),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    tracing::debug!(?color_mode, "dispatching command");

    command_dispatch::dispatch_command(cli.command, color_mode)
        .map_err(add_io_hint)
        .map_err(add_internal_hint)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "vcrt",
    version,
    about = "Resolve the MSVC C runtime library for a compiler version",
    help_template = r#"{about-with-newline}
{before-help}USAGE
  {usage}

COMMANDS
{subcommands}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    before_help = r#"A version token is the number MSVC reports as _MSC_VER (e.g. 1916).
Each token maps to exactly one runtime library; many tokens can share one.
"#,
    after_help = r#"EXAMPLES
  $ vcrt resolve 1600                 # msvcr100
  $ vcrt resolve 1928 --json          # {"token":"1928","library":"vcruntime140",...}
  $ vcrt resolve --banner "$(python -c 'import sys; print(sys.version)')"
  $ vcrt table --library vcruntime140

LEARN MORE
  $ vcrt <command> --help
  Set RUST_LOG=debug to trace lookups on stderr."#,
    arg_required_else_help = true,
    disable_help_subcommand = false
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        arg_required_else_help = true,
        about = "Resolve a compiler version token to its runtime library",
        long_about = r#"Resolve a compiler version token to the C runtime library it links against.

The token is matched exactly against the built-in version table. Use --banner to
extract the token from a version banner containing `MSC v.NNNN` first."#,
        after_help = r#"EXAMPLES
  $ vcrt resolve 1800
  $ vcrt resolve 1916 --json
  $ vcrt resolve --banner "3.8.10 (default) [MSC v.1928 64 bit (AMD64)]"

NOTES
  - Unknown tokens exit with code 3 and name the token on stderr"#
    )]
    Resolve {
        #[arg(
            help = "Compiler version token (e.g. 1916)",
            required_unless_present = "banner"
        )]
        token: Option<String>,
        #[arg(
            long,
            help = "Version banner to extract the token from",
            conflicts_with = "token"
        )]
        banner: Option<String>,
        #[arg(long, help = "Emit JSON even on a terminal")]
        json: bool,
    },
    #[command(
        about = "List the version table",
        after_help = r#"EXAMPLES
  $ vcrt table
  $ vcrt table --library msvcr90
  $ vcrt table --json"#
    )]
    Table {
        #[arg(long, help = "Only show tokens that resolve to this library")]
        library: Option<String>,
        #[arg(long, help = "Emit JSON even on a terminal")]
        json: bool,
    },
    #[command(about = "Print version info")]
    Version,
    #[command(about = "Generate a shell completion script")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn entry_json(entry: &TableEntry) -> Value {
    json!({
        "token": entry.token,
        "library": entry.library,
        "toolset": entry.toolset,
    })
}

fn emit_table(headers: &[&str], rows: &[Vec<String>]) -> Result<(), Error> {
    emit_line(&render_table(headers, rows))
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let mut widths = headers
        .iter()
        .map(|header| header.chars().count())
        .collect::<Vec<_>>();
    for row in rows {
        for (idx, width) in widths.iter_mut().enumerate() {
            let cell = row.get(idx).map(String::as_str).unwrap_or("");
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_table_line(
        &headers
            .iter()
            .map(|header| header.to_string())
            .collect::<Vec<_>>(),
        &widths,
    ));
    for row in rows {
        lines.push(format_table_line(row, &widths));
    }
    lines.join("\n")
}

fn format_table_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (idx, width) in widths.iter().enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let cell = cells.get(idx).map(String::as_str).unwrap_or("");
        line.push_str(cell);
        let cell_len = cell.chars().count();
        if idx + 1 < widths.len() && *width > cell_len {
            line.push_str(&" ".repeat(*width - cell_len));
        }
    }
    line
}

fn emit_version_output(json_output: bool) -> Result<(), Error> {
    if json_output {
        emit_json(json!({
            "name": "vcrt",
            "version": env!("CARGO_PKG_VERSION"),
        }))
    } else {
        emit_line(&format!("vcrt {}", env!("CARGO_PKG_VERSION")))
    }
}

fn emit_json(value: Value) -> Result<(), Error> {
    let json = encode_json(&value, io::stdout().is_terminal())?;
    emit_line(&json)
}

fn emit_line(line: &str) -> Result<(), Error> {
    write_line(&mut io::stdout().lock(), line)
}

fn encode_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, Error> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("json encode failed")
            .with_source(err)
    })
}

fn write_line(out: &mut impl Write, line: &str) -> Result<(), Error> {
    writeln!(out, "{line}")
        .and_then(|()| out.flush())
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write output")
                .with_source(err)
        })
}

fn add_io_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Io || err.hint().is_some() {
        return err;
    }
    err.with_hint("Failed writing output. Check that stdout is still open.")
}

fn add_internal_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Internal || err.hint().is_some() {
        return err;
    }
    err.with_hint(
        "Unexpected internal failure. Retry with RUST_BACKTRACE=1 and share command/context if it persists.",
    )
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn empty_filter_notice(library: &str, use_color: bool) -> String {
    let label = colorize_label("notice:", use_color, AnsiColor::Yellow);
    format!("{label} no tokens resolve to {library}")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::UnknownCompilerVersion => "unknown compiler version".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(token) = err.token() {
        inner.insert("token".to_string(), json!(token));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(token) = err.token() {
        lines.push(format!(
            "{} {token:?}",
            colorize_label("token:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let usage = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .map(str::trim);

    let Some(usage) = usage else {
        return "Try `vcrt --help`.".to_string();
    };

    let tokens: Vec<&str> = usage.split_whitespace().collect();
    let Some(pos) = tokens.iter().position(|t| *t == "vcrt") else {
        return "Try `vcrt --help`.".to_string();
    };

    let mut parts = Vec::new();
    for token in tokens.iter().skip(pos + 1) {
        if token.starts_with('-') || token.starts_with('<') || token.starts_with('[') {
            break;
        }
        parts.push(*token);
    }

    if parts.is_empty() {
        return "Try `vcrt --help`.".to_string();
    }
    format!("Try `vcrt {} --help`.", parts.join(" "))
}
