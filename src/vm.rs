//! The fetch-decode-execute loop and its run configuration.

use std::io::{Read, Write};

use crate::{BrainfuckVmError, Opcode, Tape};

/// Everything one run needs from the outside world.
///
/// Input and output are plain `Read`/`Write` sinks; callers decide whether
/// they are files, the standard streams, or in-memory buffers. The bundle
/// is owned by the machine for the whole run and released when the machine
/// is dropped.
pub struct RunConfig<R, W> {
    /// Source of bytes for the `,` instruction.
    pub input: R,
    /// Destination for bytes written by the `.` instruction.
    pub output: W,
    /// Trace every executed opcode to stderr.
    pub verbose: bool,
}

/// A Brainfuck virtual machine.
///
/// Owns the compiled program, a fresh [`Tape`], a bracket stack for loop
/// matching, and the [`RunConfig`] for the run. The program is immutable
/// once handed over; only the program counter moves through it.
pub struct BrainfuckVm<R, W> {
    program: Vec<Opcode>,
    tape: Tape,
    brackets: Vec<usize>,
    config: RunConfig<R, W>,
}

impl<R: Read, W: Write> BrainfuckVm<R, W> {
    /// Create a machine over a compiled program with a fresh tape and an
    /// empty bracket stack.
    pub fn new(program: Vec<Opcode>, config: RunConfig<R, W>) -> Self {
        Self {
            program,
            tape: Tape::new(),
            brackets: Vec::new(),
            config,
        }
    }

    /// The machine's tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Consume the machine and return its tape, e.g. to inspect final cell
    /// contents after a run.
    pub fn into_tape(self) -> Tape {
        self.tape
    }

    /// Execute the program until it halts or fails.
    ///
    /// Returns `Ok(())` once the `Exit` sentinel is reached; any
    /// [`BrainfuckVmError`] aborts the run immediately. Output bytes
    /// already written stay written either way.
    pub fn run(&mut self) -> Result<(), BrainfuckVmError> {
        let verbose = self.config.verbose;
        let mut pc = 0;

        while pc < self.program.len() {
            match self.program[pc] {
                Opcode::Exit => break,
                Opcode::IncrPtr => {
                    self.tape.move_right()?;
                    if verbose {
                        eprintln!("eval: increase pointer by one");
                    }
                }
                Opcode::DecrPtr => {
                    self.tape.move_left()?;
                    if verbose {
                        eprintln!("eval: decrease pointer by one");
                    }
                }
                Opcode::IncrData => {
                    self.tape.increment();
                    if verbose {
                        eprintln!("eval: increase storage by one to {}", self.tape.current());
                    }
                }
                Opcode::DecrData => {
                    self.tape.decrement();
                    if verbose {
                        eprintln!("eval: decrease storage by one to {}", self.tape.current());
                    }
                }
                Opcode::Output => {
                    let byte = self.tape.current();
                    self.config
                        .output
                        .write_all(&[byte])
                        .map_err(|source| BrainfuckVmError::Io { ip: pc, source })?;
                    if verbose {
                        eprintln!("eval: write output {}", byte as char);
                    }
                }
                Opcode::Input => {
                    let mut buf = [0u8; 1];
                    match self.config.input.read(&mut buf) {
                        // End of input sets the cell to 0.
                        Ok(0) => self.tape.set(0),
                        Ok(_) => self.tape.set(buf[0]),
                        Err(source) => return Err(BrainfuckVmError::Io { ip: pc, source }),
                    }
                    if verbose {
                        eprintln!("eval: read input {}", self.tape.current() as char);
                    }
                }
                Opcode::LoopStart => {
                    if self.tape.current() == 0 {
                        pc = self.matching_loop_end(pc)?;
                        if verbose {
                            eprintln!("eval: jump to {pc}");
                        }
                    } else {
                        self.brackets.push(pc);
                        if verbose {
                            eprintln!("eval: start loop");
                        }
                    }
                }
                Opcode::LoopEnd => {
                    if self.tape.current() != 0 {
                        // Peek, not pop: the entry index is reused on every
                        // pass through the loop body.
                        let entry = *self
                            .brackets
                            .last()
                            .ok_or(BrainfuckVmError::UnbalancedBrackets { ip: pc })?;
                        pc = entry;
                        if verbose {
                            eprintln!("eval: jump to {pc}");
                        }
                    } else {
                        self.brackets
                            .pop()
                            .ok_or(BrainfuckVmError::UnbalancedBrackets { ip: pc })?;
                        if verbose {
                            eprintln!("eval: end loop");
                        }
                    }
                }
            }
            pc += 1;
        }

        self.config
            .output
            .flush()
            .map_err(|source| BrainfuckVmError::Io { ip: pc, source })?;
        Ok(())
    }

    /// Scan forward from the `LoopStart` at `pc` for the matching
    /// `LoopEnd`, tracking nesting depth. Running into `Exit` (or off the
    /// end of the stream) means the bracket has no partner.
    fn matching_loop_end(&self, pc: usize) -> Result<usize, BrainfuckVmError> {
        let mut depth = 1usize;
        let mut index = pc;
        loop {
            index += 1;
            match self.program.get(index) {
                Some(Opcode::LoopStart) => depth += 1,
                Some(Opcode::LoopEnd) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(index);
                    }
                }
                Some(Opcode::Exit) | None => {
                    return Err(BrainfuckVmError::UnbalancedBrackets { ip: pc });
                }
                Some(_) => {}
            }
        }
    }
}
