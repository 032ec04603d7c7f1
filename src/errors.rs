use std::io;

use thiserror::Error;

use crate::constants::TOM;

/// Fatal machine and loader errors. None of these are recoverable: the
/// machine stops with memory, registers and stack left in their last-valid
/// state for inspection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid opcode {opcode:#06x} at {pc:#06x}")]
    InvalidOpcode { pc: u16, opcode: u16 },

    #[error("invalid operand {raw:#06x} at {pc:#06x}")]
    InvalidOperand { pc: u16, raw: u16 },

    #[error("attempted to pop off of an empty stack at {pc:#06x}")]
    StackUnderflow { pc: u16 },

    #[error("modulo by zero at {pc:#06x}")]
    DivisionByZero { pc: u16 },

    #[error("input exhausted while executing `in` at {pc:#06x}")]
    InputExhausted { pc: u16 },

    #[error("fetch past the top of memory at {pc:#06x}")]
    OutOfBoundsFetch { pc: u16 },

    #[error("program image of {words} words does not fit in {TOM} words of memory")]
    ImageTooLarge { words: usize },

    #[error("program image of {bytes} bytes ends in the middle of a word")]
    ImageTruncated { bytes: usize },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit code for this error kind. 0 is reserved for a clean halt.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Io(_) => 1,
            Error::InvalidOpcode { .. } => 2,
            Error::InvalidOperand { .. } => 3,
            Error::StackUnderflow { .. } => 4,
            Error::DivisionByZero { .. } => 5,
            Error::InputExhausted { .. } => 6,
            Error::OutOfBoundsFetch { .. } => 7,
            Error::ImageTooLarge { .. } => 8,
            Error::ImageTruncated { .. } => 9,
        }
    }
}
