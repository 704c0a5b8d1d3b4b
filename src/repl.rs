use psi::display::{format_stack_line, format_stack_listing};
use psi::{Interpreter, Scoping};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::Editor;
use rustyline::{Helper, Result as RlResult};
use std::borrow::Cow;

use crate::cli::{print_commands, VERSION};
use crate::rcfile::{dirs_home, load_psirc};
use crate::terminal::{execute_line, is_input_complete};

/// Helper struct for rustyline with stack hint and tab completion
struct PsHelper {
    operators: Vec<&'static str>,
    definitions: Vec<String>,
    /// Current stack, shown as a hint on an empty line
    stack_hint: Option<String>,
}

impl Helper for PsHelper {}

impl Completer for PsHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Find the word being completed
        let start = line[..pos]
            .rfind(|c: char| c.is_whitespace() || c == '{' || c == '/')
            .map(|i| i + 1)
            .unwrap_or(0);
        let prefix = &line[start..pos];

        if prefix.is_empty() {
            return Ok((start, Vec::new()));
        }

        let mut completions: Vec<String> = self
            .operators
            .iter()
            .filter(|op| op.starts_with(prefix))
            .map(|op| op.to_string())
            .chain(
                self.definitions
                    .iter()
                    .filter(|d| d.starts_with(prefix))
                    .cloned(),
            )
            .collect();
        completions.sort();
        completions.dedup();

        let pairs: Vec<Pair> = completions
            .into_iter()
            .map(|c| Pair {
                display: c.clone(),
                replacement: c,
            })
            .collect();

        Ok((start, pairs))
    }
}

impl Hinter for PsHelper {
    type Hint = String;

    fn hint(&self, line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if line.is_empty() {
            self.stack_hint.clone()
        } else {
            None
        }
    }
}

impl Highlighter for PsHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_char(&self, _line: &str, _pos: usize) -> bool {
        false
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        // Dim the stack hint
        Cow::Owned(format!("\x1b[90m{}\x1b[0m", hint))
    }
}

impl Validator for PsHelper {}

fn print_banner(scoping: Scoping) {
    println!("psi {} - PostScript-style stack interpreter", VERSION);
    println!("  Currently in: {} scoping mode", scoping.label());
    println!("  Type 'quit' or Ctrl-D to exit, 'commands' for the operator reference");
}

// ============================================
// REPL main loop
// ============================================

pub(crate) fn run_repl(scoping: Scoping, trace: bool) -> RlResult<()> {
    let mut rl: Editor<PsHelper, DefaultHistory> = Editor::new()?;

    let mut interp = Interpreter::new(scoping);
    interp.set_trace_mode(trace);

    rl.set_helper(Some(PsHelper {
        operators: interp.operator_names(),
        definitions: Vec::new(),
        stack_hint: None,
    }));

    // ~/.psirc may define names or even quit
    load_psirc(&mut interp);
    if interp.has_quit() {
        return Ok(());
    }

    let history_path = dirs_home().map(|h| h.join(".psi_history"));
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    if std::env::var("PSI_BANNER").is_ok() {
        print_banner(scoping);
    }

    // Track multiline input (open blocks and strings)
    let mut multiline_buffer = String::new();

    loop {
        if let Some(helper) = rl.helper_mut() {
            helper.definitions = interp.defined_names();
            helper.stack_hint = if interp.stack_count() == 0 {
                None
            } else {
                Some(format!("  [{}]", format_stack_line(interp.stack())))
            };
        }

        let prompt = if multiline_buffer.is_empty() {
            format!("PS ({})> ", interp.stack_count())
        } else {
            "... ".to_string()
        };

        match rl.readline(&prompt) {
            Ok(line) => {
                // If we're in multiline mode, accumulate
                if !multiline_buffer.is_empty() {
                    multiline_buffer.push('\n');
                    multiline_buffer.push_str(&line);

                    if is_input_complete(&multiline_buffer) {
                        let complete_input = std::mem::take(&mut multiline_buffer);
                        let _ = rl.add_history_entry(complete_input.as_str());
                        if let Err(e) = execute_line(&mut interp, &complete_input) {
                            eprintln!("Error: {}", e);
                        }
                    }
                } else {
                    let trimmed = line.trim();

                    if trimmed.is_empty() {
                        continue;
                    }

                    if !is_input_complete(trimmed) {
                        multiline_buffer = trimmed.to_string();
                        continue;
                    }

                    let _ = rl.add_history_entry(trimmed);

                    // Handle built-in REPL commands
                    match trimmed {
                        "commands" | ".help" | ".h" => {
                            print_commands();
                            continue;
                        }
                        ".stack" | ".s" => {
                            println!("{}", format_stack_listing(interp.stack()));
                            continue;
                        }
                        ".clear" | ".c" => {
                            interp.clear_stack();
                            continue;
                        }
                        _ => {}
                    }

                    if let Err(e) = execute_line(&mut interp, trimmed) {
                        eprintln!("Error: {}", e);
                    }
                }

                if interp.has_quit() {
                    println!("\nExiting...");
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C - drop any partial input
                multiline_buffer.clear();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D - exit
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history
    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }

    Ok(())
}
