//! psi - a PostScript-style stack language interpreter
//!
//! Usage:
//!   psi               Start interactive REPL
//!   psi -c "code"     Execute code and exit
//!   psi script.ps     Execute a script file

mod cli;
mod rcfile;
mod repl;
mod terminal;

use cli::{execute_command, execute_script, parse_args, print_help, print_version};
use std::env;
use std::process::ExitCode;

/// Install a stderr log subscriber when PSI_LOG (or RUST_LOG) is set
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match env::var("PSI_LOG") {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) if env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        Err(_) => return,
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args);

    if cli.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    let scoping = cli.scoping();

    if let Some(code) = &cli.command {
        return execute_command(code, scoping, cli.trace);
    }

    if let Some(path) = &cli.script {
        return execute_script(path, scoping, cli.trace);
    }

    match repl::run_repl(scoping, cli.trace) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
