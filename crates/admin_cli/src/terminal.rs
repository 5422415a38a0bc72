use std::{
    error::Error,
    fmt::Write as _,
    io::{self, Write},
};

use backoffice::{Dialogs, Route, Router};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::{Print, Stylize},
    terminal,
    terminal::ClearType,
};

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Reads a single `y`/`n` key. Enter, Esc and Ctrl-C answer no.
fn prompt_yes_no(question: &str) -> Result<bool, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(question),
        Print(" [y/N] ")
    )?;
    out.flush()?;

    let answer = loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => break false,
            KeyCode::Char('y' | 'Y') => break true,
            KeyCode::Char('n' | 'N') | KeyCode::Enter | KeyCode::Esc => break false,
            _ => {}
        }
    };

    execute!(out, Print(if answer { "y" } else { "n" }), Print("\r\n"))?;
    out.flush()?;
    Ok(answer)
}

/// Operator dialogs on the controlling terminal.
pub struct TerminalDialogs {
    /// Answer every confirmation with yes (`--yes`).
    pub assume_yes: bool,
}

impl Dialogs for TerminalDialogs {
    fn alert(&self, message: &str) {
        let mut out = io::stderr();
        if let Err(err) = execute!(out, Print("! ".yellow()), Print(message), Print("\n")) {
            tracing::error!("failed to print alert: {err}");
        }
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            tracing::debug!(question = message, "confirmed by --yes");
            return true;
        }
        match prompt_yes_no(message) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::error!("confirmation prompt failed: {err}");
                false
            }
        }
    }
}

/// There are no other views to switch to; the target is reported instead.
pub struct TerminalRouter;

impl Router for TerminalRouter {
    fn go(&self, route: Route) {
        let mut line = format!("-> {}", route.name);
        for (key, value) in &route.params {
            let value = value.as_str().map_or_else(|| value.to_string(), str::to_string);
            let _ = write!(line, " {key}={value}");
        }
        eprintln!("{line}");
    }
}
