//! holiya interpreter command-line.
//!
//! When called without arguments it drops into an interactive
//! read-evaluate-print loop against a persistent environment.
//!
//! When called with a file argument, the whole file is parsed as one
//! program and evaluated.

use std::env;
use std::fs;
use std::io;
use std::io::prelude::*;

use anyhow::Context;
use log::debug;

use holiya::interpreter::Interpreter;

const PROMPT: &str = ">> ";

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let args = env::args().skip(1).collect::<Vec<_>>();
    if let Some(path) = args.first() {
        run_file(path)?;
    } else {
        run_prompt()?;
    }
    Ok(())
}

fn run_file(path: &str) -> Result<(), anyhow::Error> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to open {path}"))?;
    debug!("evaluating {path} ({} bytes)", source.len());

    let mut interp_stdout = io::stdout();
    let mut out = io::stdout();
    let mut interp = Interpreter::new(&mut interp_stdout);

    if let Some(value) = interp.eval(&source)? {
        writeln!(out, "{value}")?;
    }

    Ok(())
}

fn run_prompt() -> Result<(), anyhow::Error> {
    let stdin = io::stdin();
    let mut repl_stdout = io::stdout();
    let mut interp_stdout = io::stdout();

    let mut interp = Interpreter::new(&mut interp_stdout);

    writeln!(repl_stdout, "Hello! This is the holiya programming language!")?;
    writeln!(repl_stdout, "Feel free to type in commands")?;

    let mut input = String::new();
    loop {
        repl_stdout.write_all(PROMPT.as_bytes())?;
        repl_stdout.flush()?;

        input.clear();
        let nbytes = stdin.read_line(&mut input)?;
        if nbytes == 0 {
            break;
        }

        if input.trim_end() == "exit" {
            break;
        }

        if let Some(value) = interp.eval(&input)? {
            writeln!(repl_stdout, "{value}")?;
        }
    }

    Ok(())
}
