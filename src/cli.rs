use crate::rcfile::load_psirc;
use crate::terminal::{execute_line, split_chunks};
use psi::{Interpreter, Scoping};
use std::env;
use std::fs;
use std::process::ExitCode;
use tracing::debug;

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CliArgs {
    pub(crate) lexical: bool,
    pub(crate) command: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) help: bool,
    pub(crate) version: bool,
    pub(crate) trace: bool,
}

impl CliArgs {
    /// `--lex` wins; otherwise PSI_LEXICAL=1 selects lexical scoping
    pub(crate) fn scoping(&self) -> Scoping {
        let from_env = env::var("PSI_LEXICAL").map(|v| v == "1").unwrap_or(false);
        if self.lexical || from_env {
            Scoping::Lexical
        } else {
            Scoping::Dynamic
        }
    }
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "-l" | "--lex" | "-lex" => {
                cli.lexical = true;
            }
            "--trace" => {
                cli.trace = true;
            }
            "-c" => {
                // Everything after -c is the code
                if i + 1 < args.len() {
                    cli.command = Some(args[i + 1..].join(" "));
                    break;
                }
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            path => {
                // Assume it's a script file if not a flag
                if !path.starts_with('-') {
                    cli.script = Some(path.to_string());
                }
            }
        }
        i += 1;
    }

    cli
}

pub(crate) fn print_help() {
    println!(
        r#"psi {} - a PostScript-style stack language interpreter

USAGE:
    psi                     Start interactive REPL
    psi -c <code>           Execute code and exit
    psi <script.ps>         Execute a script file
    psi -l, --lex           Use lexical scoping (default: dynamic)
    psi --trace             Print the stack after every token (stderr)
    psi --help              Show this help message
    psi --version           Show version

STARTUP:
    ~/.psirc                Executed on REPL and -c startup (if exists)
    ~/.psi_history          REPL history
    PSI_LEXICAL=1           Same as --lex
    PSI_BANNER=1            Show startup banner (quiet by default)
    PSI_LOG=debug           Interpreter logging to stderr (RUST_LOG also works)

REPL COMMANDS:
    commands, .help         Operator reference
    .stack, .s              Show the operand stack
    .clear, .c              Clear the operand stack
    quit                    Exit"#,
        VERSION
    );
}

/// Operator reference for the REPL `commands` command
pub(crate) fn print_commands() {
    println!(
        r#"ARITHMETIC:
    add          x y -> x+y                 5 3 add = -> 8
    sub          x y -> x-y                 10 3 sub = -> 7
    mul          x y -> x*y                 4 5 mul = -> 20
    div          x y -> x/y                 7 2 div = -> 3.5
    idiv         x y -> integer quotient    7 2 idiv = -> 3
    mod          x y -> remainder           10 3 mod = -> 1
    abs neg      x -> |x|, -x               -5 abs = -> 5
    sqrt         x -> square root           16 sqrt = -> 4
    ceiling      x -> rounded up            3.2 ceiling = -> 4
    floor        x -> rounded down          3.8 floor = -> 3
    round        x -> nearest               3.5 round = -> 4

STACK:
    dup          a -> a a
    pop          a -> -
    exch         a b -> b a
    clear        ... -> -
    count        ... -> ... n

COMPARISON / BOOLEAN:
    eq ne        a b -> bool                5 5 eq = -> true
    gt ge lt le  a b -> bool                3 5 lt = -> true
    and or       bool bool -> bool
    not          bool -> bool
    true false   - -> bool

DICTIONARIES:
    dict         n -> dict                  10 dict
    begin        dict -> -                  enter a scope
    end          - -> -                     leave it
    def          key value -> -             /x 5 def
    length       dict|string -> n
    maxlength    dict -> capacity

STRINGS:
    get          str i -> code              (hello) 0 get = -> 104
    getinterval  str i n -> substring       (hello) 1 3 getinterval = -> ell
    putinterval  str i repl -> str          (hello) 1 (EL) putinterval = -> hELlo

FLOW CONTROL:
    if           bool proc -> -             5 3 gt {{ (yes) print }} if
    ifelse       bool p1 p2 -> -            true {{ 1 }} {{ 2 }} ifelse
    for          start step limit proc      0 1 5 {{ = }} for
    repeat       n proc -> -                3 {{ (hi) print }} repeat
    exec         proc -> -                  {{ 1 2 add }} exec = -> 3
    quit         - -> -                     stop the interpreter

OUTPUT:
    print        str -> -                   (hello) print
    =            any -> -                   42 = (value and newline)
    ==           any -> -                   (test) == -> (test)

SCOPING:
    /x 1 def /show {{ x = }} def
    10 dict begin /x 2 def show exec end
    dynamic prints 2, lexical (--lex) prints 1"#
    );
}

pub(crate) fn print_version() {
    println!("psi {}", VERSION);
}

/// Execute code given with -c
pub(crate) fn execute_command(code: &str, scoping: Scoping, trace: bool) -> ExitCode {
    let mut interp = Interpreter::new(scoping);
    interp.set_trace_mode(trace);

    load_psirc(&mut interp);
    if interp.has_quit() {
        return ExitCode::SUCCESS;
    }

    match execute_line(&mut interp, code) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Execute a script file. The operand stack carries over between chunks.
pub(crate) fn execute_script(path: &str, scoping: Scoping, trace: bool) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let mut interp = Interpreter::new(scoping);
    interp.set_trace_mode(trace);
    debug!(path, scoping = scoping.label(), "running script");

    for (line_num, chunk) in split_chunks(&content) {
        if let Err(e) = execute_line(&mut interp, &chunk) {
            eprintln!("Error at line {}: {}", line_num, e);
            return ExitCode::FAILURE;
        }
        if interp.has_quit() {
            break;
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("psi")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn no_arguments_means_repl() {
        assert_eq!(parse_args(&args(&[])), CliArgs::default());
    }

    #[test]
    fn command_takes_the_rest_of_the_line() {
        let cli = parse_args(&args(&["--lex", "-c", "1", "2", "add", "="]));
        assert!(cli.lexical);
        assert_eq!(cli.command.as_deref(), Some("1 2 add ="));
    }

    #[test]
    fn bare_argument_is_a_script() {
        let cli = parse_args(&args(&["--trace", "prog.ps"]));
        assert!(cli.trace);
        assert_eq!(cli.script.as_deref(), Some("prog.ps"));
    }

    #[test]
    fn help_and_version_flags() {
        assert!(parse_args(&args(&["-h"])).help);
        assert!(parse_args(&args(&["--version"])).version);
    }
}
