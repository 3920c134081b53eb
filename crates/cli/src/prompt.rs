//! Interactive prompts for values left off the command line.
//!
//! Secrets are read with terminal echo switched off. Echo is switched back on
//! before the prompt returns, whether it returns a value, an error, or the
//! user interrupts with Ctrl-C (which ends the process).

use std::io::{self, stdin, IsTerminal};
use std::process;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::debug;
use twurl_core::error::Result;
use twurl_core::output::OutputSink;

/// Exit status used when the user interrupts a prompt.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Source of values the user did not pass as flags.
///
/// The terminal implementation is [`SecurePrompt`]; tests supply canned answers.
pub trait Prompt {
    /// Writes `"{label}: "` to `output` and reads one line without echoing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal or `output` cannot be used.
    fn secret(&mut self, label: &str, output: &mut OutputSink) -> Result<String>;
}

/// Reads secrets from the controlling terminal with echo disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecurePrompt;

impl Prompt for SecurePrompt {
    fn secret(&mut self, label: &str, output: &mut OutputSink) -> Result<String> {
        if !stdin().is_terminal() {
            debug!("stdin is not a terminal, reading `{label}` as a plain line");
            output.print(&format!("{label}: "))?;
            let line = read_line()?;
            output.puts("")?;
            return Ok(line);
        }

        let echo_guard = EchoGuard::disable_echo()?;
        output.print(&format!("{label}: "))?;

        let input = read_secret(next_key_press)?;
        drop(echo_guard);

        match close_prompt(input, output) {
            Some(result) => result,
            None => process::exit(INTERRUPTED_EXIT_CODE),
        }
    }
}

/// Ends the prompt line. `None` means the user interrupted, and the newline
/// is then best effort.
fn close_prompt(input: SecretInput, output: &mut OutputSink) -> Option<Result<String>> {
    match input {
        SecretInput::Line(line) => Some(output.puts("").map(|()| line).map_err(Into::into)),
        SecretInput::Interrupted => {
            let _ = output.puts("");
            None
        }
    }
}

/// Turns terminal echo back on when dropped.
struct EchoGuard;

impl EchoGuard {
    fn disable_echo() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for EchoGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// What the user typed at a secret prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretInput {
    Line(String),
    Interrupted,
}

/// Collects key presses until Enter, end of input, or Ctrl-C.
///
/// # Errors
///
/// Returns an error if reading a key fails.
pub fn read_secret<F>(mut next_key: F) -> io::Result<SecretInput>
where
    F: FnMut() -> io::Result<Option<KeyEvent>>,
{
    let mut line = String::new();

    while let Some(key_event) = next_key()? {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Enter => break,
            KeyCode::Char('c') if ctrl => return Ok(SecretInput::Interrupted),
            KeyCode::Char('d') if ctrl => break,
            KeyCode::Char('u') if ctrl => line.clear(),
            KeyCode::Backspace => {
                line.pop();
            }
            KeyCode::Char(c) => line.push(c),
            _ => {}
        }
    }

    Ok(SecretInput::Line(line))
}

fn next_key_press() -> io::Result<Option<KeyEvent>> {
    loop {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press {
                return Ok(Some(key_event));
            }
        }
    }
}

/// Prompts for a value that is fine to echo, such as an authorization PIN.
///
/// # Errors
///
/// Returns an error if stdin or `output` cannot be used.
pub fn prompt_line(label: &str, output: &mut OutputSink) -> Result<String> {
    output.print(&format!("{label}: "))?;
    Ok(read_line()?)
}

fn read_line() -> io::Result<String> {
    let mut input = String::new();
    stdin().read_line(&mut input)?;
    Ok(strip_line_terminator(&input).to_string())
}

fn strip_line_terminator(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .unwrap_or(line)
}
