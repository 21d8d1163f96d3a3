//! Configuration file sources, lowest precedence first.

pub mod adjacent_file;
pub mod global_file;
