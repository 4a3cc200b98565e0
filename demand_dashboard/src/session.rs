//! Interactive selection loop over already-loaded artifacts

use crate::config::DashboardConfig;
use crate::render::{render_choices, render_view, Panel};
use anyhow::Result;
use demand_forecast::AppContext;
use std::io::{BufRead, Write};
use tracing::debug;

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select { store: u32, item: u32 },
    List,
    Help,
    Quit,
}

/// Parse a line such as `3 14`, `3,14`, `list` or `quit`.
///
/// Blank lines parse to `Ok(None)`.
pub fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let line = line.trim();
    match line {
        "" => return Ok(None),
        "list" => return Ok(Some(Command::List)),
        "help" | "?" => return Ok(Some(Command::Help)),
        "quit" | "exit" | "q" => return Ok(Some(Command::Quit)),
        _ => {}
    }

    let parts: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [store, item] => {
            let store = store
                .parse::<u32>()
                .map_err(|_| format!("Invalid store '{}'", store))?;
            let item = item
                .parse::<u32>()
                .map_err(|_| format!("Invalid item '{}'", item))?;
            Ok(Some(Command::Select { store, item }))
        }
        _ => Err(format!("Expected '<store> <item>', got '{}'", line)),
    }
}

const HELP: &str = "Enter '<store> <item>' to select, 'list' for choices, 'quit' to leave.";

/// Read selections from `input` and write a rendered view for each to
/// `output`, until end of input or `quit`.
pub fn run_session<R, W>(
    context: &AppContext,
    config: &DashboardConfig,
    input: R,
    mut output: W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", HELP)?;
    write!(output, "{}", render_choices(&context.stores(), &context.items()))?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => writeln!(output, "{}", HELP)?,
            Ok(Some(Command::List)) => write!(
                output,
                "{}",
                render_choices(&context.stores(), &context.items())
            )?,
            Ok(Some(Command::Select { store, item })) => {
                debug!(store, item, "Selection changed");
                let view = context.view(store, item);
                writeln!(output)?;
                write!(output, "{}", render_view(&view, config, Panel::All))?;
            }
            Err(message) => writeln!(output, "{}", message)?,
        }
        output.flush()?;
    }

    Ok(())
}
