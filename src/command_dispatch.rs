//! Purpose: Hold top-level CLI command dispatch for `vcrt`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: All lookups go through `vcrt::api`; no table access from the binary.
//! Invariants: JSON is emitted when `--json` is set or stdout is not a terminal.

use super::*;
use vcrt::api::{VERSION_LIBRARY_TABLE, lookup, resolve, resolve_banner, token_from_banner};

pub(super) fn dispatch_command(command: Command, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "vcrt", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Version => {
            emit_version_output(!io::stdout().is_terminal())?;
            Ok(RunOutcome::ok())
        }
        Command::Resolve {
            token,
            banner,
            json,
        } => {
            let json_output = json || !io::stdout().is_terminal();
            let (token, library) = match banner.as_deref() {
                Some(text) => {
                    let library = resolve_banner(text)?;
                    let token = token_from_banner(text).unwrap_or_default().to_string();
                    (token, library)
                }
                None => {
                    let token = token.ok_or_else(|| {
                        Error::new(ErrorKind::Usage)
                            .with_message("resolve requires a version token or --banner")
                            .with_hint("Use `vcrt resolve <TOKEN>` or `vcrt resolve --banner <TEXT>`.")
                    })?;
                    let library = resolve(&token)?;
                    (token, library)
                }
            };

            if json_output {
                let mut value = json!({
                    "token": token,
                    "library": library,
                });
                if let Some(entry) = lookup(&token) {
                    value["toolset"] = json!(entry.toolset);
                }
                if let Some(text) = banner {
                    value["banner"] = json!(text);
                }
                emit_json(value)?;
            } else {
                emit_line(library.as_str())?;
            }
            Ok(RunOutcome::ok())
        }
        Command::Table { library, json } => {
            let json_output = json || !io::stdout().is_terminal();
            let entries = VERSION_LIBRARY_TABLE
                .iter()
                .filter(|entry| {
                    library
                        .as_deref()
                        .is_none_or(|wanted| entry.library.as_str() == wanted)
                })
                .collect::<Vec<_>>();
            tracing::debug!(
                filter = library.as_deref().unwrap_or("*"),
                count = entries.len(),
                "listing version table"
            );

            if json_output {
                let values = entries.iter().map(|entry| entry_json(entry)).collect::<Vec<_>>();
                emit_json(json!({ "entries": values }))?;
            } else if entries.is_empty() {
                eprintln!(
                    "{}",
                    empty_filter_notice(
                        library.as_deref().unwrap_or_default(),
                        color_mode.use_color(io::stderr().is_terminal()),
                    )
                );
            } else {
                let rows = entries
                    .iter()
                    .map(|entry| {
                        vec![
                            entry.token.to_string(),
                            entry.library.to_string(),
                            entry.toolset.to_string(),
                        ]
                    })
                    .collect::<Vec<_>>();
                emit_table(&["TOKEN", "LIBRARY", "TOOLSET"], &rows)?;
            }
            Ok(RunOutcome::ok())
        }
    }
}
