use std::io::{self, Read, Write};

/// Character source and sink wired to the `in` and `out` opcodes.
pub trait Console {
    fn write_char(&mut self, c: char) -> io::Result<()>;

    /// Blocks until one character is available. `None` means the input
    /// source is exhausted and no further characters are forthcoming.
    fn read_char(&mut self) -> io::Result<Option<char>>;
}

/// Console over the process stdin/stdout, one byte per character.
pub struct StdConsole;

impl Console for StdConsole {
    fn write_char(&mut self, c: char) -> io::Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", c)?;
        // prompts must be visible before a blocking read
        stdout.flush()
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        let mut byte = [0u8; 1];
        match io::stdin().read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0] as char)),
        }
    }
}
