use std::ops::{Index, IndexMut};

use tracing::trace;

use crate::console::{Console, StdConsole};
use crate::constants::{
    MAX_LITERAL, NUM_REG, OP_ADD, OP_AND, OP_CALL, OP_EQ, OP_GT, OP_HALT, OP_IN, OP_JF, OP_JMP,
    OP_JT, OP_MOD, OP_MULT, OP_NOOP, OP_NOT, OP_OR, OP_OUT, OP_POP, OP_PUSH, OP_RET, OP_RMEM,
    OP_SET, OP_WMEM, REG_BASE, REG_TOP, TOM,
};
use crate::errors::Error;

/// One virtual machine: 32768 words of memory shared by code and data,
/// eight registers, an unbounded stack and a program counter. Instances
/// are fully independent of each other.
pub struct Machine {
    pub mem: Vec<u16>,
    pub registers: [u16; NUM_REG],
    pub stack: Vec<u16>,
    pub pc: u16,
    halted: bool,
    console: Box<dyn Console>,
}

impl Machine {
    pub fn new() -> Machine {
        Machine::with_console(Box::new(StdConsole))
    }

    pub fn with_console(console: Box<dyn Console>) -> Machine {
        Machine {
            mem: vec![0; TOM],
            registers: [0; NUM_REG],
            stack: Vec::new(),
            pc: 0,
            halted: false,
            console,
        }
    }

    /// Copies a program image into memory starting at address 0. Fails
    /// before any execution if the image is longer than memory.
    pub fn load_image(&mut self, words: &[u16]) -> Result<(), Error> {
        if words.len() > TOM {
            return Err(Error::ImageTooLarge { words: words.len() });
        }
        self.mem[..words.len()].copy_from_slice(words);
        Ok(())
    }

    /// Runs the fetch-decode-execute loop until a halt instruction. Fatal
    /// errors stop the loop with all state left as the failing instruction
    /// saw it.
    pub fn run(&mut self) -> Result<(), Error> {
        while !self.halted {
            self.fetch_and_execute()?;
        }
        Ok(())
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Reads a cell the way an operand addresses it: memory below
    /// `REG_BASE`, registers at `REG_BASE..=REG_TOP`.
    pub fn peek(&self, addr: u16) -> u16 {
        if (REG_BASE..=REG_TOP).contains(&addr) {
            self.registers[(addr - REG_BASE) as usize]
        } else {
            self.mem[addr as usize]
        }
    }

    fn fetch(&mut self) -> Result<u16, Error> {
        let pc = self.pc;
        if (pc as usize) >= TOM {
            return Err(Error::OutOfBoundsFetch { pc });
        }
        self.pc += 1;
        Ok(self.mem[pc as usize])
    }

    /// Consumes one operand cell as a value: literals stand for themselves,
    /// register references stand for the register's current content.
    pub(crate) fn resolve_value(&mut self) -> Result<u16, Error> {
        let pc = self.pc;
        let raw = self.fetch()?;
        if raw <= MAX_LITERAL {
            Ok(raw)
        } else if raw <= REG_TOP {
            Ok(self.registers[(raw - REG_BASE) as usize])
        } else {
            Err(Error::InvalidOperand { pc, raw })
        }
    }

    /// Consumes one operand cell as a register destination.
    pub(crate) fn resolve_register(&mut self) -> Result<usize, Error> {
        let pc = self.pc;
        let raw = self.fetch()?;
        if (REG_BASE..=REG_TOP).contains(&raw) {
            Ok((raw - REG_BASE) as usize)
        } else {
            Err(Error::InvalidOperand { pc, raw })
        }
    }

    /// One fetch-decode-execute cycle.
    pub fn fetch_and_execute(&mut self) -> Result<(), Error> {
        let pc = self.pc;
        let opcode = self.fetch()?;
        trace!(pc, opcode, "execute");

        match opcode {
            OP_HALT => self.halted = true,
            OP_SET => {
                let dst = self.resolve_register()?;
                let src = self.resolve_value()?;
                self.registers[dst] = src;
            }
            OP_PUSH => {
                let src = self.resolve_value()?;
                self.stack.push(src);
            }
            OP_POP => {
                let dst = self.resolve_register()?;
                let val = self.stack.pop().ok_or(Error::StackUnderflow { pc })?;
                self.registers[dst] = val;
            }
            OP_EQ => self.binary_op(|a, b| u16::from(a == b))?,
            OP_GT => self.binary_op(|a, b| u16::from(a > b))?,
            OP_JMP => {
                let addr = self.resolve_value()?;
                self.pc = addr;
            }
            OP_JT => {
                let cond = self.resolve_value()?;
                let addr = self.resolve_value()?;
                if cond != 0 {
                    self.pc = addr;
                }
            }
            OP_JF => {
                let cond = self.resolve_value()?;
                let addr = self.resolve_value()?;
                if cond == 0 {
                    self.pc = addr;
                }
            }
            OP_ADD => self.binary_op(|a, b| ((u32::from(a) + u32::from(b)) % TOM as u32) as u16)?,
            OP_MULT => self.binary_op(|a, b| ((u32::from(a) * u32::from(b)) % TOM as u32) as u16)?,
            OP_MOD => {
                let dst = self.resolve_register()?;
                let a = self.resolve_value()?;
                let b = self.resolve_value()?;
                if b == 0 {
                    return Err(Error::DivisionByZero { pc });
                }
                self.registers[dst] = a % b;
            }
            OP_AND => self.binary_op(|a, b| a & b)?,
            OP_OR => self.binary_op(|a, b| a | b)?,
            OP_NOT => {
                let dst = self.resolve_register()?;
                let a = self.resolve_value()?;
                // 15-bit complement; a plain `!a` would set bits outside
                // the literal range
                self.registers[dst] = a ^ MAX_LITERAL;
            }
            OP_RMEM => {
                let dst = self.resolve_register()?;
                let addr = self.resolve_value()?;
                self.registers[dst] = self.mem[addr as usize];
            }
            OP_WMEM => {
                let addr = self.resolve_value()?;
                let src = self.resolve_value()?;
                self.mem[addr as usize] = src;
            }
            OP_CALL => {
                let addr = self.resolve_value()?;
                self.stack.push(self.pc);
                self.pc = addr;
            }
            OP_RET => {
                self.pc = self.stack.pop().ok_or(Error::StackUnderflow { pc })?;
            }
            OP_OUT => {
                let ch = self.resolve_value()?;
                // every literal is below the surrogate range, so this
                // conversion cannot actually miss
                let c = char::from_u32(u32::from(ch)).unwrap_or(char::REPLACEMENT_CHARACTER);
                self.console.write_char(c)?;
            }
            OP_IN => {
                let dst = self.resolve_register()?;
                let ch = self.read_input(pc)?;
                self.registers[dst] = ch;
            }
            OP_NOOP => {}
            _ => return Err(Error::InvalidOpcode { pc, opcode }),
        }

        Ok(())
    }

    /// dst <- f(a, b) for the three-operand arithmetic/comparison family.
    fn binary_op(&mut self, f: impl Fn(u16, u16) -> u16) -> Result<(), Error> {
        let dst = self.resolve_register()?;
        let a = self.resolve_value()?;
        let b = self.resolve_value()?;
        self.registers[dst] = f(a, b);
        Ok(())
    }

    /// Blocks for one character, discarding carriage returns. End of input
    /// is fatal rather than an endless retry.
    fn read_input(&mut self, pc: u16) -> Result<u16, Error> {
        loop {
            match self.console.read_char()? {
                Some('\r') => continue,
                Some(c) => return Ok(c as u16),
                None => return Err(Error::InputExhausted { pc }),
            }
        }
    }
}

impl Default for Machine {
    fn default() -> Machine {
        Machine::new()
    }
}

impl Index<u16> for Machine {
    type Output = u16;

    fn index(&self, addr: u16) -> &u16 {
        &self.mem[addr as usize]
    }
}

impl IndexMut<u16> for Machine {
    fn index_mut(&mut self, addr: u16) -> &mut u16 {
        &mut self.mem[addr as usize]
    }
}
