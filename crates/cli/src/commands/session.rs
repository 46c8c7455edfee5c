//! `shepherd session`: the interactive protection dashboard

use anyhow::Result;
use colored::Colorize;
use shepherd_core::TierKind;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::output::{json, terminal};
use crate::session::{Session, SessionCommand, SessionEvent};
use crate::OutputFormat;

pub fn run(tier: TierKind, format: OutputFormat) -> Result<()> {
    let stdin = io::stdin();
    let prompt = stdin.is_terminal() && matches!(format, OutputFormat::Terminal);
    drive(tier, format, stdin.lock(), io::stdout().lock(), prompt)
}

/// Reads commands from `input` until it ends or `quit`, writing one rendered
/// event per command to `out`. The entitlement state lives only as long as
/// this call.
pub fn drive<R: BufRead, W: Write>(
    tier: TierKind,
    format: OutputFormat,
    input: R,
    mut out: W,
    prompt: bool,
) -> Result<()> {
    let mut session = Session::new(tier);
    let opening = session.handle(SessionCommand::Status);
    emit(&mut out, format, &opening)?;
    if prompt {
        writeln!(out, "  {}", "Type 'help' for commands.".dimmed())?;
    }

    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else { break };
        let Some(event) = session.handle_line(&line?) else {
            continue;
        };
        emit(&mut out, format, &event)?;
        if matches!(event, SessionEvent::Quit) {
            break;
        }
    }

    if let Some(pending) = session.state().pending() {
        tracing::info!(?pending, "session ended with an unconfirmed change");
    }
    Ok(())
}

fn emit<W: Write>(out: &mut W, format: OutputFormat, event: &SessionEvent) -> Result<()> {
    match format {
        OutputFormat::Terminal => write!(out, "{}", terminal::format_event(event))?,
        OutputFormat::Json => writeln!(out, "{}", json::line(event)?)?,
    }
    Ok(())
}
