//! The compiled instruction set and the byte-to-opcode mapping table.

/// Only bytes below this bound may index [`OPERATION`]; everything at or
/// above it is a comment.
const WORD_SIZE: usize = 128;

/// One instruction in the compiled stream.
///
/// `Exit` terminates every compiled program and never appears in source;
/// the other eight variants correspond one-to-one to the Brainfuck command
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// `>` — move the data pointer one cell to the right.
    IncrPtr,
    /// `<` — move the data pointer one cell to the left.
    DecrPtr,
    /// `+` — increment the current cell, wrapping at byte width.
    IncrData,
    /// `-` — decrement the current cell, wrapping at byte width.
    DecrData,
    /// `.` — write the current cell to the output sink.
    Output,
    /// `,` — read one byte from the input sink into the current cell.
    Input,
    /// `[` — enter the loop, or skip past the matching `]` on a zero cell.
    LoopStart,
    /// `]` — loop back to the matching `[` on a nonzero cell.
    LoopEnd,
    /// Sentinel appended by the compiler; halts the machine.
    Exit,
}

const fn operation_table() -> [Option<Opcode>; WORD_SIZE] {
    let mut table = [None; WORD_SIZE];
    table[b'>' as usize] = Some(Opcode::IncrPtr);
    table[b'<' as usize] = Some(Opcode::DecrPtr);
    table[b'+' as usize] = Some(Opcode::IncrData);
    table[b'-' as usize] = Some(Opcode::DecrData);
    table[b'.' as usize] = Some(Opcode::Output);
    table[b',' as usize] = Some(Opcode::Input);
    table[b'[' as usize] = Some(Opcode::LoopStart);
    table[b']' as usize] = Some(Opcode::LoopEnd);
    table
}

/// ASCII-range lookup table from source byte to opcode.
const OPERATION: [Option<Opcode>; WORD_SIZE] = operation_table();

impl Opcode {
    /// Map a source byte to its opcode, or `None` for comment bytes.
    ///
    /// Bytes at or above 128 never index the table.
    pub fn from_byte(byte: u8) -> Option<Opcode> {
        if (byte as usize) < WORD_SIZE {
            OPERATION[byte as usize]
        } else {
            None
        }
    }
}
