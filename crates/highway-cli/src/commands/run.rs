use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};

use highway_lib::{CommandStream, Registry};

use crate::commands::read_script;
use crate::output::{write_response, OutputFormat};
use crate::GlobalOptions;

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Script to execute (reads stdin when omitted).
    pub script: Option<PathBuf>,

    /// Abort on the first malformed command instead of skipping it.
    #[arg(long)]
    pub strict: bool,
}

/// Counters reported once a script has been executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub skipped: usize,
}

pub fn handle_run(global: &GlobalOptions, args: &RunArgs) -> Result<()> {
    let script = read_script(args.script.as_deref())?;
    let mut registry = Registry::new(global.registry_config()?);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = execute_script(&mut registry, &script, global.format, args.strict, &mut out)?;
    out.flush().context("failed to flush output")?;

    info!(
        executed = summary.executed,
        skipped = summary.skipped,
        stations = registry.len(),
        "script finished"
    );
    Ok(())
}

/// Execute every command in `script` against `registry`, writing one
/// response per command to `out`.
///
/// Malformed commands are logged and skipped, or abort the run when
/// `strict` is set. Responses written before the failure are kept.
pub fn execute_script<W: Write>(
    registry: &mut Registry,
    script: &str,
    format: OutputFormat,
    strict: bool,
    out: &mut W,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    for parsed in CommandStream::new(script) {
        match parsed {
            Ok(command) => {
                let response = command.execute(registry);
                write_response(out, format, command.keyword(), &response)
                    .context("failed to write response")?;
                summary.executed += 1;
            }
            Err(err) if strict => {
                return Err(err).context(format!(
                    "malformed command after {} executed",
                    summary.executed
                ));
            }
            Err(err) => {
                warn!(error = %err, "skipping malformed command");
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str, strict: bool) -> (Result<RunSummary>, String) {
        let mut registry = Registry::default();
        let mut buffer = Vec::new();
        let summary = execute_script(&mut registry, script, OutputFormat::Text, strict, &mut buffer);
        (summary, String::from_utf8(buffer).expect("utf8"))
    }

    #[test]
    fn executes_every_command() {
        let (summary, output) = run(
            "aggiungi-stazione 0 1 10\naggiungi-stazione 10 0\npianifica-percorso 0 10\n",
            false,
        );
        assert_eq!(
            summary.expect("valid"),
            RunSummary {
                executed: 3,
                skipped: 0
            }
        );
        assert_eq!(output, "aggiunta\naggiunta\n0 10\n");
    }

    #[test]
    fn lenient_mode_skips_malformed_commands() {
        let (summary, output) = run("vola 3\ndemolisci-stazione 3\n", false);
        assert_eq!(
            summary.expect("lenient"),
            RunSummary {
                executed: 1,
                skipped: 1
            }
        );
        assert_eq!(output, "non demolita\n");
    }

    #[test]
    fn strict_mode_stops_at_first_error() {
        let (summary, output) = run("aggiungi-stazione 1 0\nvola\ndemolisci-stazione 1\n", true);
        let err = summary.expect_err("strict");
        assert!(err.to_string().contains("after 1 executed"));
        assert_eq!(output, "aggiunta\n");
    }
}
