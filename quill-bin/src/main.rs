//! quill — batch host for the quill interpreter.
//!
//! Reads a program from a file (or stdin when no file is given), runs it
//! against a fresh root environment, and streams interpreter output to
//! stdout. Errors go to stderr with their source line and exit non-zero.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use quill_core::{run_source, Env};

const HELP_MSG: &str = "Usage: quill [FILE] [--help|-h]

  FILE  Path of a source file to evaluate; stdin is read when omitted.

Options:
  -h, --help  Print this message

Output from print/print-line goes to stdout. Errors are reported on
stderr with the source line they occurred on.";

struct Args {
    file: Option<String>,
    help: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        file: None,
        help: false,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => args.help = true,
            _ => args.file = Some(arg),
        }
    }
    args
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    if args.help {
        println!("{HELP_MSG}");
        return ExitCode::SUCCESS;
    }

    let source = match read_source(&args.file) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!(
        "loaded {} bytes from {}",
        source.len(),
        args.file.as_deref().unwrap_or("stdin"),
    );

    let env = Env::root();
    let stdout = io::stdout();
    let mut sink = stdout.lock();
    match run_source(&source, &env, &mut sink) {
        Ok(_) => {
            let _ = sink.flush();
            log::debug!("evaluation finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let _ = sink.flush();
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn read_source(file: &Option<String>) -> io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
