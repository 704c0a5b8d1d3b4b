use psi::Interpreter;

/// Execute one chunk of psi source
pub(crate) fn execute_line(interp: &mut Interpreter, input: &str) -> Result<(), String> {
    interp.run(input).map_err(|e| e.to_string())
}

/// True when every `{` is closed and no `(` string is left open.
///
/// Used to decide whether more lines are needed before executing. Surplus
/// `}` counts as complete so the error is reported instead of waiting.
pub(crate) fn is_input_complete(input: &str) -> bool {
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut in_comment = false;

    for c in input.chars() {
        if in_comment {
            in_comment = c != '\n';
            continue;
        }
        if in_string {
            in_string = c != ')';
            continue;
        }
        match c {
            '%' => in_comment = true,
            '(' => in_string = true,
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
    }

    !in_string && depth <= 0
}

/// Group file content into executable chunks.
///
/// Lines are joined until the chunk is complete, so a procedure may span
/// several lines. Each chunk carries its 1-based starting line number.
/// Blank and comment-only lines between chunks are skipped.
pub(crate) fn split_chunks(content: &str) -> Vec<(usize, String)> {
    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut start_line = 1;

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if buffer.is_empty() {
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }
            start_line = line_num + 1;
            buffer.push_str(trimmed);
        } else {
            // newline keeps a trailing % comment from swallowing the next line
            buffer.push('\n');
            buffer.push_str(trimmed);
        }

        if is_input_complete(&buffer) {
            chunks.push((start_line, std::mem::take(&mut buffer)));
        }
    }

    // Unbalanced tail; executing it reports the error
    if !buffer.is_empty() {
        chunks.push((start_line, buffer));
    }

    chunks
}
