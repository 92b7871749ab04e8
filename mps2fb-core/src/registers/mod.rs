//! Control region register file

pub mod file;

pub use file::RegisterFile;
