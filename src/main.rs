use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use rox::ast_printer::AstPrinter;
use rox::error::LoxError;
use rox::interpreter::Interpreter;
use rox::lox::Lox;
use rox::parser::Parser;
use rox::scanner::Scanner;

/// Exit code for static (scan/parse/resolve) errors.
const EXIT_STATIC: i32 = 65;
/// Exit code for runtime errors.
const EXIT_RUNTIME: i32 = 70;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the tokens as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Parses a program and prints the AST of each statement
    Parse { filename: PathBuf },

    /// Evaluates input from a file as a single expression and prints the result
    Evaluate { filename: PathBuf },

    /// Runs input from a file as a Lox program
    Run { filename: PathBuf },

    /// Starts an interactive session
    Repl,
}

/// Reads a whole source file as UTF-8 text.
fn read_file(filename: &PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    String::from_utf8(buf).context(format!("{:?} is not valid UTF-8", filename))
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'rox::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("rox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

/// Print a static or runtime error and pick the matching exit code.
fn report(error: &LoxError) -> i32 {
    debug!("Reporting: {:?}", error);
    eprintln!("{}", error);

    if error.is_static() {
        EXIT_STATIC
    } else {
        EXIT_RUNTIME
    }
}

fn tokenize(filename: &PathBuf, json: bool) -> Result<()> {
    let source = read_file(filename)?;
    let (tokens, errors) = Scanner::new(&source).scan_all();

    for e in &errors {
        eprintln!("{}", e);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for token in &tokens {
            println!("{}", token);
        }
    }

    if !errors.is_empty() {
        debug!("Tokenization failed, exiting with code {}", EXIT_STATIC);
        process::exit(EXIT_STATIC);
    }

    info!("Tokenization completed successfully");
    Ok(())
}

fn parse(filename: &PathBuf) -> Result<()> {
    let source = read_file(filename)?;
    let (tokens, mut errors) = Scanner::new(&source).scan_all();

    match Parser::new(tokens).parse() {
        Ok(statements) if errors.is_empty() => {
            for stmt in &statements {
                println!("{}", AstPrinter::print_stmt(stmt));
            }
        }
        Ok(_) => process::exit(report(&LoxError::Static(errors))),
        Err(parse_errors) => {
            errors.extend(parse_errors);
            process::exit(report(&LoxError::Static(errors)));
        }
    }

    Ok(())
}

fn evaluate(filename: &PathBuf) -> Result<()> {
    let source = read_file(filename)?;
    let (tokens, errors) = Scanner::new(&source).scan_all();

    if !errors.is_empty() {
        process::exit(report(&LoxError::Static(errors)));
    }

    let expr = match Parser::new(tokens).parse_expression() {
        Ok(expr) => expr,
        Err(e) => process::exit(report(&e)),
    };

    let mut interpreter = Interpreter::new();
    match interpreter.evaluate(&expr) {
        Ok(value) => println!("{}", value),
        Err(e) => process::exit(report(&LoxError::Runtime(e))),
    }

    Ok(())
}

fn run(filename: &PathBuf) -> Result<()> {
    let source = read_file(filename)?;
    let mut lox = Lox::new();

    if let Err(e) = lox.run(&source) {
        process::exit(report(&e));
    }

    info!("Program executed successfully");
    Ok(())
}

fn repl() -> Result<()> {
    let mut lox = Lox::repl();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        match line.trim() {
            "" => continue,
            "exit()" => break,
            _ => {}
        }

        if let Err(e) = lox.run(&line) {
            // errors end the line, not the session
            report(&e);
        }
    }

    println!();
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match &args.commands {
        Commands::Tokenize { filename, json } => tokenize(filename, *json),
        Commands::Parse { filename } => parse(filename),
        Commands::Evaluate { filename } => evaluate(filename),
        Commands::Run { filename } => run(filename),
        Commands::Repl => repl(),
    }
}
