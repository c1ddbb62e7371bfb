//! Translation from raw source bytes to the opcode stream.

use crate::{BrainfuckVmError, Opcode};

/// Initial capacity of the opcode buffer; doubled whenever full.
const BUFFER_START_SIZE: usize = 15;

/// Compile Brainfuck source into an opcode stream terminated by
/// [`Opcode::Exit`].
///
/// Every byte with a mapping in the operation table produces exactly one
/// opcode, in source order. Everything else — whitespace, punctuation,
/// letters, bytes past the ASCII range — is a comment and is dropped.
/// The empty source compiles to a stream holding only `Exit`.
///
/// Brackets are not balance-checked here; a mismatched program compiles
/// fine and fails during execution when the bad jump is reached.
///
/// With `verbose` set, each accepted command character is echoed to stderr
/// along with buffer resizes and the final program size.
pub fn compile(source: &[u8], verbose: bool) -> Result<Vec<Opcode>, BrainfuckVmError> {
    let mut program: Vec<Opcode> = Vec::new();
    program.try_reserve(BUFFER_START_SIZE)?;

    for &byte in source {
        let Some(op) = Opcode::from_byte(byte) else {
            continue;
        };
        reserve_for_push(&mut program, verbose)?;
        if verbose {
            eprint!("{}", byte as char);
        }
        program.push(op);
    }
    if verbose && !program.is_empty() {
        eprintln!();
    }

    reserve_for_push(&mut program, verbose)?;
    program.push(Opcode::Exit);

    if verbose {
        eprintln!("compile: program size is {}", program.len());
    }
    Ok(program)
}

/// Double the buffer's capacity when it is full, surfacing allocation
/// failure instead of aborting.
fn reserve_for_push(program: &mut Vec<Opcode>, verbose: bool) -> Result<(), BrainfuckVmError> {
    if program.len() == program.capacity() {
        program.try_reserve(program.capacity().max(1))?;
        if verbose {
            eprintln!("compile: resized program buffer to {}", program.capacity());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_produce_no_opcodes() {
        let with_comments = compile(b"abc+xyz", false).unwrap();
        let bare = compile(b"+", false).unwrap();
        assert_eq!(with_comments, bare);
        assert_eq!(with_comments, vec![Opcode::IncrData, Opcode::Exit]);
    }

    #[test]
    fn empty_source_compiles_to_exit_only() {
        let program = compile(b"", false).unwrap();
        assert_eq!(program, vec![Opcode::Exit]);
    }

    #[test]
    fn opcodes_keep_source_order() {
        let program = compile(b"+[>-.,<]", false).unwrap();
        assert_eq!(
            program,
            vec![
                Opcode::IncrData,
                Opcode::LoopStart,
                Opcode::IncrPtr,
                Opcode::DecrData,
                Opcode::Output,
                Opcode::Input,
                Opcode::DecrPtr,
                Opcode::LoopEnd,
                Opcode::Exit,
            ]
        );
    }

    #[test]
    fn exactly_one_exit_sentinel_at_the_end() {
        let program = compile(b"++[-]>", false).unwrap();
        let exits = program.iter().filter(|op| **op == Opcode::Exit).count();
        assert_eq!(exits, 1);
        assert_eq!(program.last(), Some(&Opcode::Exit));
    }

    #[test]
    fn unbalanced_brackets_compile_without_error() {
        // Balance is checked lazily during execution, not here.
        assert!(compile(b"[[[", false).is_ok());
        assert!(compile(b"]]]", false).is_ok());
    }

    #[test]
    fn high_bytes_are_dropped() {
        let source: Vec<u8> = vec![0xFF, b'+', 0x80, 0xC3, b'-'];
        let program = compile(&source, false).unwrap();
        assert_eq!(
            program,
            vec![Opcode::IncrData, Opcode::DecrData, Opcode::Exit]
        );
    }

    #[test]
    fn buffer_growth_past_initial_capacity() {
        let source = "+".repeat(1000);
        let program = compile(source.as_bytes(), false).unwrap();
        assert_eq!(program.len(), 1001);
    }
}
