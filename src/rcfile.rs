use crate::terminal::{execute_line, split_chunks};
use psi::Interpreter;
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Get home directory
pub(crate) fn dirs_home() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}

/// Load and execute ~/.psirc if it exists
pub(crate) fn load_psirc(interp: &mut Interpreter) {
    let rc_path = match dirs_home() {
        Some(home) => home.join(".psirc"),
        None => return,
    };

    let content = match fs::read_to_string(&rc_path) {
        Ok(c) => c,
        Err(_) => return,
    };

    debug!(path = %rc_path.display(), "loading rc file");
    load_rc_content(interp, &content, "~/.psirc");
}

/// Run rc content chunk by chunk. Failures are warnings; definitions
/// persist but the operand stack is cleared after every chunk.
pub(crate) fn load_rc_content(interp: &mut Interpreter, content: &str, source: &str) {
    for (line, chunk) in split_chunks(content) {
        if let Err(e) = execute_line(interp, &chunk) {
            eprintln!("Warning: {} line {}: {}", source, line, e);
        }
        interp.clear_stack();
        if interp.has_quit() {
            break;
        }
    }
}
