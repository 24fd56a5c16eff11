use std::{
    fs::read_to_string,
    io::{self, BufWriter},
    path::PathBuf,
    process::ExitCode,
    thread,
    time::Instant,
};

use anyhow::{anyhow, Context, Result};
use clap::Parser as ClapParser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use spi::{
    errors::errors::Error, format_error, interpreter::interpreter::Interpreter,
    lexer::lexer::tokenize, parser::parser::parse, semantic::analyzer::analyze,
};

/// Room for the deepest recursion the interpreter allows.
const INTERPRETER_STACK_SIZE: usize = 256 * 1024 * 1024;

#[derive(Debug, ClapParser)]
#[command(
    name = "spi",
    about = "Interprets programs written in a small Pascal subset.",
    version
)]
struct Args {
    /// Path to the program source.
    file: PathBuf,

    /// Stop after semantic analysis without running the program.
    #[arg(long)]
    check: bool,

    /// Print every token and stop.
    #[arg(long)]
    dump_tokens: bool,

    /// Pretty-print the parsed tree.
    #[arg(long)]
    dump_ast: bool,

    /// Print the scopes built by semantic analysis.
    #[arg(long)]
    dump_scopes: bool,

    /// Raise log verbosity: `-v` for debug, `-vv` for trace. `RUST_LOG`
    /// overrides this.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    install_tracing(args.verbose);

    let source = read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let outcome = thread::Builder::new()
        .name(String::from("interpreter"))
        .stack_size(INTERPRETER_STACK_SIZE)
        .spawn(move || {
            execute(&args, &source, file_name).map_err(|error| format_error(&error, &source))
        })
        .context("failed to start the interpreter thread")?
        .join()
        .map_err(|_| anyhow!("the interpreter thread panicked"))?;

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(report) => {
            eprintln!("{}", report);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn execute(args: &Args, source: &str, file_name: Option<String>) -> Result<(), Error> {
    let start = Instant::now();

    if args.dump_tokens {
        for token in tokenize(source, file_name)? {
            println!("{}", token);
        }
        return Ok(());
    }

    let program = parse(source, file_name)?;
    debug!(elapsed = ?start.elapsed(), "parsed");

    if args.dump_ast {
        println!("{:#?}", program);
    }

    let analysis = analyze(&program)?;
    debug!(elapsed = ?start.elapsed(), "analyzed");

    if args.dump_scopes {
        print!("{}", analysis);
    }

    if args.check {
        return Ok(());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut interpreter = Interpreter::new(
        &program,
        &analysis,
        stdin.lock(),
        BufWriter::new(stdout.lock()),
    );
    interpreter.interpret()?;

    debug!(elapsed = ?start.elapsed(), "interpreted");
    Ok(())
}

fn install_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
