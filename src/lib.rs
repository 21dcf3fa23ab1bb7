pub mod memory;
pub mod process;
pub mod trace;
