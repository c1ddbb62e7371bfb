use bf_vm::{BrainfuckVm, RunConfig, compile};
use clap::Parser;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Run a Brainfuck program.
///
/// Reads the program file, compiles it to an opcode stream, and executes it.
/// `,` reads from stdin and `.` writes to stdout unless redirected with
/// --input/--output.
#[derive(Parser, Debug)]
#[command(name = "bfvm", version, about)]
struct Cli {
    /// Path to the Brainfuck program
    program: PathBuf,

    /// Read `,` input from PATH instead of stdin
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    input: Option<PathBuf>,

    /// Write `.` output to PATH instead of stdout
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Trace compiler decisions and every executed opcode to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

/// Open every sink before the machine runs; if any acquisition fails the
/// machine is never invoked. Returns a process exit status.
fn run(cli: Cli) -> u8 {
    if cli.verbose {
        eprintln!("load: program is {}", cli.program.display());
    }
    let source = match fs::read(&cli.program) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("bfvm: failed to read program file: {e}");
            return 1;
        }
    };

    let input: Box<dyn Read> = match &cli.input {
        Some(path) => {
            if cli.verbose {
                eprintln!("load: input source is {}", path.display());
            }
            match File::open(path) {
                Ok(file) => Box::new(file),
                Err(e) => {
                    eprintln!("bfvm: failed to open input file: {e}");
                    return 1;
                }
            }
        }
        None => Box::new(io::stdin()),
    };

    let output: Box<dyn Write> = match &cli.output {
        Some(path) => {
            if cli.verbose {
                eprintln!("load: output target is {}", path.display());
            }
            match File::create(path) {
                Ok(file) => Box::new(file),
                Err(e) => {
                    eprintln!("bfvm: failed to open output file: {e}");
                    return 1;
                }
            }
        }
        None => Box::new(io::stdout()),
    };

    let program = match compile(&source, cli.verbose) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("bfvm: {e}");
            return 1;
        }
    };

    let config = RunConfig {
        input,
        output,
        verbose: cli.verbose,
    };
    // Sinks are dropped (and files closed) with the machine on both paths.
    match BrainfuckVm::new(program, config).run() {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("bfvm: {e}");
            let _ = io::stderr().flush();
            1
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    ExitCode::from(run(cli))
}
