pub mod console;
pub mod constants;
pub mod errors;
pub mod image;
pub mod machine;


pub use constants::{NUM_REG, TOM};
pub use errors::Error;
pub use machine::Machine;
