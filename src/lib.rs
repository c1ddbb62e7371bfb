//! A tiny Brainfuck bytecode interpreter library.
//!
//! This crate compiles Brainfuck source into a compact opcode stream and
//! executes it against an unbounded memory tape with a single data pointer.
//!
//! Features and behaviors:
//! - The tape grows lazily in both directions; cells start at 0 and are
//!   never freed during a run.
//! - Cell arithmetic wraps at byte width (0..=255).
//! - Any non-Brainfuck character is a comment and compiles to nothing.
//! - Input `,` reads a single byte from the configured input sink; on EOF
//!   the current cell is set to 0.
//! - Output `.` writes the byte at the current cell to the configured
//!   output sink.
//! - Brackets are matched lazily at run time; an unmatched `[` or `]` is
//!   reported as an error when execution reaches it.
//!
//! Quick start:
//!
//! ```
//! use bf_vm::{compile, BrainfuckVm, RunConfig};
//! use std::io;
//!
//! let program = compile(b"++++++++[>++++++++<-]>+.", false).expect("program should compile");
//! let mut out = Vec::new();
//! let config = RunConfig {
//!     input: io::empty(),
//!     output: &mut out,
//!     verbose: false,
//! };
//! BrainfuckVm::new(program, config).run().expect("program should run");
//! assert_eq!(out, b"A");
//! ```

use std::collections::TryReserveError;
use std::io;

mod compiler;
mod opcode;
mod tape;
mod vm;

pub use compiler::compile;
pub use opcode::Opcode;
pub use tape::Tape;
pub use vm::{BrainfuckVm, RunConfig};

/// Errors that can abort a Brainfuck run.
///
/// All variants are fatal: the run stops immediately and any output bytes
/// already written to the sink stay written.
#[derive(Debug, thiserror::Error)]
pub enum BrainfuckVmError {
    /// A loop jump could not be resolved: the forward scan from `[` ran off
    /// the end of the program, or `]` was reached with an empty bracket stack.
    #[error("no matching bracket found at instruction {ip}")]
    UnbalancedBrackets { ip: usize },

    /// Growing the opcode buffer or the tape failed.
    #[error("failed to resize memory: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// The input or output sink failed mid-run.
    #[error("I/O error at instruction {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: io::Error,
    },
}
