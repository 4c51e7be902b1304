//! Line-based editing session
//!
//! Plain lines are appended to the buffer. Lines starting with `:` are
//! commands; `::` escapes a literal leading colon.

use anyhow::{Context, Result};
use codepad::{ExecutionResult, ExecutionStatus, Language, UnknownLanguage};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::Controller;

const HELP: &str = "\
Commands:
  :lang <key>   switch language (java, python, c_cpp, javascript)
  :run          submit the buffer
  :save         save the buffer
  :show         print the buffer
  :clear        empty the buffer
  :help         show this help
  :quit         leave the session
Any other line is appended to the buffer (start with :: for a literal ':').";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Text(String),
    Language(Language),
    Run,
    Save,
    Show,
    Clear,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum InputError {
    #[error("unknown command ':{0}' (try :help)")]
    UnknownCommand(String),

    #[error(":lang needs a language key")]
    MissingLanguage,

    #[error(transparent)]
    BadLanguage(#[from] UnknownLanguage),
}

fn parse_line(line: &str) -> Result<Input, InputError> {
    if let Some(literal) = line.strip_prefix("::") {
        return Ok(Input::Text(format!(":{literal}")));
    }
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Input::Text(line.to_owned()));
    };

    let mut parts = command.split_whitespace();
    match parts.next().unwrap_or_default() {
        "lang" | "language" => {
            let key = parts.next().ok_or(InputError::MissingLanguage)?;
            Ok(Input::Language(key.parse()?))
        }
        "run" | "r" => Ok(Input::Run),
        "save" | "w" => Ok(Input::Save),
        "show" | "p" => Ok(Input::Show),
        "clear" => Ok(Input::Clear),
        "help" | "h" => Ok(Input::Help),
        "quit" | "q" => Ok(Input::Quit),
        other => Err(InputError::UnknownCommand(other.to_owned())),
    }
}

fn append_line(buffer: &str, line: &str) -> String {
    let mut text = String::with_capacity(buffer.len() + line.len() + 1);
    text.push_str(buffer);
    text.push_str(line);
    text.push('\n');
    text
}

fn print_result(controller: &Controller) {
    match controller.status() {
        ExecutionStatus::Unreachable(reason) => eprintln!("! {reason}"),
        _ => match controller.current_result() {
            Some(ExecutionResult::Output(output)) => {
                println!("--- output ---");
                print!("{output}");
                if !output.ends_with('\n') {
                    println!();
                }
            }
            Some(ExecutionResult::Failure(message)) => {
                println!("--- error ---");
                println!("{message}");
            }
            None => {}
        },
    }
}

/// Drive the controller from stdin until `:quit` or end of input
pub(crate) async fn run(controller: &mut Controller) -> Result<()> {
    let settings = controller.editor_settings();
    println!(
        "codepad session: {} (mode {}, theme {}). Type :help for commands.",
        controller.language().display_name(),
        settings.mode,
        settings.theme
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let input = match parse_line(&line) {
            Ok(input) => input,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        match input {
            Input::Text(text) => {
                let updated = append_line(controller.source_text(), &text);
                controller.set_source_text(updated);
            }
            Input::Language(language) => {
                controller.set_language(language);
                println!(
                    "language: {} (mode {})",
                    language.display_name(),
                    controller.editor_settings().mode
                );
            }
            Input::Run => {
                controller.run().await;
                print_result(controller);
            }
            Input::Save => {
                let artifact = controller.artifact();
                controller.save();
                println!(
                    "saved {}",
                    controller
                        .downloader()
                        .target_path(&artifact.file_name)
                        .display()
                );
            }
            Input::Show => {
                for (i, line) in controller.source_text().lines().enumerate() {
                    println!("{:>4} | {line}", i + 1);
                }
            }
            Input::Clear => controller.set_source_text(String::new()),
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
        }
    }

    Ok(())
}
