pub mod messages;
mod memory;

pub use memory::*;
