use crate::Controller;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use lingo_client_core::language::Language;
use lingo_client_core::notify::{Clipboard, ClipboardError, Notice, Notifier};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Type text and press enter to translate it. Start a line with :: to
translate text that itself begins with a colon.
  :source <code>   set the source language (en, de, fr, es)
  :target <code>   set the target language
  :clear           clear input and result
  :copy            copy the result to the clipboard
  :show            show the current session
  :help            show this help
  :quit            exit";

/// Notices go to stderr so stdout only carries results.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{}", notice.message());
    }
}

/// Sets the system clipboard through the terminal's OSC 52 escape.
#[derive(Clone, Copy, Debug, Default)]
pub struct Osc52Clipboard;

impl Osc52Clipboard {
    pub fn stdout() -> Self {
        Self
    }
}

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut out = std::io::stdout().lock();
        out.write_all(osc52_sequence(text).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Translate(String),
    Source(Language),
    Target(Language),
    Clear,
    Copy,
    Show,
    Help,
    Quit,
    Invalid(String),
}

fn parse_command(line: &str) -> Command {
    if let Some(text) = line.strip_prefix("::") {
        return Command::Translate(format!(":{text}"));
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Translate(line.to_owned());
    };
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();
    match (name, arg) {
        ("source", Some(code)) => code
            .parse()
            .map(Command::Source)
            .unwrap_or_else(|e| Command::Invalid(format!("{e}"))),
        ("target", Some(code)) => code
            .parse()
            .map(Command::Target)
            .unwrap_or_else(|e| Command::Invalid(format!("{e}"))),
        ("source" | "target", None) => Command::Invalid(format!(":{name} needs a language code")),
        ("clear", _) => Command::Clear,
        ("copy", _) => Command::Copy,
        ("show", _) => Command::Show,
        ("help", _) => Command::Help,
        ("quit" | "q" | "exit", _) => Command::Quit,
        _ => Command::Invalid(format!("unknown command {line:?}; try :help")),
    }
}

pub async fn run_interactive(controller: &Controller) -> anyhow::Result<()> {
    let state = controller.state();
    eprintln!(
        "{} -> {}. :help for commands.",
        state.source_lang.display_name(),
        state.target_lang.display_name()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Translate(text) => {
                controller.set_input_text(text);
                if let Ok(outcome) = controller.submit_translation().await {
                    println!("{}", outcome.display_text());
                }
            }
            Command::Source(lang) => {
                controller.set_source_lang(lang);
                eprintln!("source: {}", lang.display_name());
            }
            Command::Target(lang) => {
                controller.set_target_lang(lang);
                eprintln!("target: {}", lang.display_name());
            }
            Command::Clear => {
                if controller.state().can_clear() {
                    controller.clear_session();
                } else {
                    eprintln!("nothing to clear");
                }
            }
            Command::Copy => match controller.copy_result() {
                Ok(true) => {}
                Ok(false) => eprintln!("nothing to copy"),
                Err(e) => tracing::warn!(error = %e, "copy failed"),
            },
            Command::Show => {
                let s = controller.state();
                eprintln!(
                    "{} -> {} | input: {:?}",
                    s.source_lang, s.target_lang, s.input_text
                );
                println!("{}", s.display_text());
            }
            Command::Help => eprintln!("{HELP}"),
            Command::Quit => break,
            Command::Invalid(msg) => eprintln!("{msg}"),
        }
    }
    Ok(())
}
