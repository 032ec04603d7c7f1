pub const TOM: usize = 0x8000; // Top Of Memory, exclusive (mem: 0x0000-0x7FFF inclusive)
pub const NUM_REG: usize = 8;

pub const MAX_LITERAL: u16 = 0x7FFF; // anything above is a register reference or invalid
pub const REG_BASE: u16 = 0x8000; // register n is addressed as REG_BASE + n
pub const REG_TOP: u16 = 0x8007;

pub const OP_HALT: u16 = 0x00;
pub const OP_SET: u16 = 0x01;
pub const OP_PUSH: u16 = 0x02;
pub const OP_POP: u16 = 0x03;
pub const OP_EQ: u16 = 0x04;
pub const OP_GT: u16 = 0x05;
pub const OP_JMP: u16 = 0x06;
pub const OP_JT: u16 = 0x07;
pub const OP_JF: u16 = 0x08;
pub const OP_ADD: u16 = 0x09;
pub const OP_MULT: u16 = 0x0A;
pub const OP_MOD: u16 = 0x0B;
pub const OP_AND: u16 = 0x0C;
pub const OP_OR: u16 = 0x0D;
pub const OP_NOT: u16 = 0x0E;
pub const OP_RMEM: u16 = 0x0F;
pub const OP_WMEM: u16 = 0x10;
pub const OP_CALL: u16 = 0x11;
pub const OP_RET: u16 = 0x12;
pub const OP_OUT: u16 = 0x13;
pub const OP_IN: u16 = 0x14;
pub const OP_NOOP: u16 = 0x15;
